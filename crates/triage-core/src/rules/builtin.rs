use crate::error::TriageError;
use crate::rules::schema::{CatalogDef, RuleDef};

const DEFAULT_CATALOG_JSON: &str = include_str!("../../../../rules/default-catalog.json");

/// Parse the built-in catalog document.
pub fn default_catalog() -> Result<CatalogDef, TriageError> {
    let catalog: CatalogDef = serde_json::from_str(DEFAULT_CATALOG_JSON)?;
    Ok(catalog)
}

/// Rules of the built-in catalog, in catalog order.
///
/// The catalog is compiled in and covered by tests, so an empty list here
/// only happens if the embedded document itself is broken.
pub fn default_rules() -> Vec<RuleDef> {
    match default_catalog() {
        Ok(catalog) => catalog.rules,
        Err(e) => {
            tracing::error!(error = %e, "built-in rule catalog is malformed");
            Vec::new()
        }
    }
}
