//! Process-wide rule catalog.
//!
//! Rules live in an immutable `Arc<[RuleDef]>` snapshot. Readers clone the
//! `Arc` and evaluate without holding the lock; `add` and `reload` build a
//! complete replacement and swap it in, so every reader sees one consistent
//! rule set.

use crate::error::TriageError;
use crate::rules::{self, builtin, schema::RuleDef};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Where the active rules came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    Builtin,
    File(PathBuf),
    /// Loading `path` failed and the built-in catalog is active instead.
    Fallback { path: PathBuf, reason: String },
    InMemory,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Builtin => write!(f, "built-in catalog"),
            CatalogOrigin::File(path) => write!(f, "{}", path.display()),
            CatalogOrigin::Fallback { path, .. } => {
                write!(f, "built-in catalog (fallback from {})", path.display())
            }
            CatalogOrigin::InMemory => write!(f, "in-memory catalog"),
        }
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    origin: CatalogOrigin,
    rules: Arc<[RuleDef]>,
}

#[derive(Debug)]
pub struct RuleCatalog {
    state: RwLock<Snapshot>,
}

impl RuleCatalog {
    /// Catalog holding only the built-in rules.
    pub fn builtin() -> Self {
        Self::with_snapshot(Snapshot {
            origin: CatalogOrigin::Builtin,
            rules: builtin::default_rules().into(),
        })
    }

    /// Catalog from an explicit rule list, validated like a loaded file.
    pub fn from_rules(rules: Vec<RuleDef>) -> Result<Self, TriageError> {
        rules::validate_catalog(&rules)?;
        Ok(Self::with_snapshot(Snapshot {
            origin: CatalogOrigin::InMemory,
            rules: rules.into(),
        }))
    }

    /// Load rules from `source`, or the built-in catalog when no source is
    /// given. Load failures are logged and recovered with the built-in
    /// catalog; they never reach the caller.
    pub fn load(source: Option<&Path>) -> Self {
        Self::with_snapshot(resolve(source))
    }

    /// Re-run `load` and atomically replace the active snapshot.
    pub fn reload(&self, source: Option<&Path>) -> CatalogOrigin {
        let snapshot = resolve(source);
        let origin = snapshot.origin.clone();
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        origin
    }

    /// The active rules in catalog order.
    pub fn get_all(&self) -> Arc<[RuleDef]> {
        Arc::clone(&self.read().rules)
    }

    pub fn origin(&self) -> CatalogOrigin {
        self.read().origin.clone()
    }

    pub fn len(&self) -> usize {
        self.read().rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<RuleDef> {
        self.read().rules.iter().find(|r| r.id == id).cloned()
    }

    /// Append a rule to the in-memory catalog. Nothing is persisted.
    pub fn add(&self, rule: RuleDef) -> Result<(), TriageError> {
        rules::validate_rule(&rule)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.rules.iter().any(|r| r.id == rule.id) {
            return Err(TriageError::CatalogInvalid(format!(
                "duplicate rule id '{}'",
                rule.id
            )));
        }

        tracing::debug!(rule = %rule.id, "adding rule to catalog");
        let mut next = state.rules.to_vec();
        next.push(rule);
        state.rules = next.into();
        Ok(())
    }

    fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    // Writers only ever store whole snapshots, so a poisoned lock still
    // holds a consistent one.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn resolve(source: Option<&Path>) -> Snapshot {
    let Some(path) = source else {
        tracing::info!("no rule catalog configured, using built-in catalog");
        return Snapshot {
            origin: CatalogOrigin::Builtin,
            rules: builtin::default_rules().into(),
        };
    };

    match rules::load_catalog(path) {
        Ok(rules) => {
            tracing::info!(
                path = %path.display(),
                rules = rules.len(),
                "loaded rule catalog"
            );
            Snapshot {
                origin: CatalogOrigin::File(path.to_path_buf()),
                rules: rules.into(),
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "rule catalog could not be loaded, falling back to built-in catalog"
            );
            Snapshot {
                origin: CatalogOrigin::Fallback {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
                rules: builtin::default_rules().into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Urgency;
    use crate::rules::schema::{Conditions, SuggestionDef};
    use std::io::Write;

    fn rule(id: &str) -> RuleDef {
        RuleDef {
            id: id.into(),
            name: format!("Rule {id}"),
            conditions: Conditions {
                symptoms: Some(vec!["rash".into()]),
                ..Default::default()
            },
            suggestions: SuggestionDef {
                urgency: Urgency::Mild,
                action: "Apply a cold compress".into(),
                reasoning: "Rashes often settle on their own".into(),
                confidence: 50.0,
                next_steps: vec![],
            },
        }
    }

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_source_uses_builtin() {
        let catalog = RuleCatalog::load(None);
        assert_eq!(catalog.origin(), CatalogOrigin::Builtin);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let catalog = RuleCatalog::load(Some(Path::new("/nonexistent/rules.json")));
        assert!(matches!(catalog.origin(), CatalogOrigin::Fallback { .. }));
        assert_eq!(catalog.len(), builtin::default_rules().len());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let file = catalog_file("{ not json");
        let catalog = RuleCatalog::load(Some(file.path()));
        assert!(matches!(catalog.origin(), CatalogOrigin::Fallback { .. }));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_empty_file_catalog_falls_back() {
        let file = catalog_file("[]");
        let catalog = RuleCatalog::load(Some(file.path()));
        assert!(matches!(catalog.origin(), CatalogOrigin::Fallback { .. }));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_valid_file_is_used() {
        let json = serde_json::to_string(&vec![rule("rash")]).unwrap();
        let file = catalog_file(&json);
        let catalog = RuleCatalog::load(Some(file.path()));
        assert_eq!(catalog.origin(), CatalogOrigin::File(file.path().to_path_buf()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("rash").unwrap().name, "Rule rash");
    }

    #[test]
    fn test_add_appends_in_order() {
        let catalog = RuleCatalog::from_rules(vec![rule("a")]).unwrap();
        catalog.add(rule("b")).unwrap();
        let ids: Vec<_> = catalog.get_all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let catalog = RuleCatalog::from_rules(vec![rule("a")]).unwrap();
        assert!(catalog.add(rule("a")).is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let catalog = RuleCatalog::from_rules(vec![rule("a")]).unwrap();
        let before = catalog.get_all();
        let origin = catalog.reload(None);
        assert_eq!(origin, CatalogOrigin::Builtin);
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].id, "a");
        assert!(catalog.get("a").is_none());
    }
}
