//! Policies for choosing which logged records form an analysis batch.
//!
//! The engine never sees the policy; it only gets the resulting records.

use crate::model::{SymptomRecord, SymptomStatus};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

/// Trailing window of the `All` policy.
pub const ALL_WINDOW_DAYS: i64 = 7;
/// Trailing window of the `Recent` policy.
pub const RECENT_WINDOW_HOURS: i64 = 24;
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Exactly these records, in the given order. Unknown ids are skipped.
    Ids(Vec<String>),
    /// Active or worsening records from the last 7 days, newest first.
    All,
    /// Records from the last 24 hours, newest first, at most 5.
    Recent,
}

/// Apply `policy` to `records` relative to `now`.
///
/// Records without `recordedAt` never fall inside a time window.
pub fn select(
    records: &[SymptomRecord],
    policy: &SelectionPolicy,
    now: DateTime<Utc>,
) -> Vec<SymptomRecord> {
    match policy {
        SelectionPolicy::Ids(ids) => select_ids(records, ids),
        SelectionPolicy::All => {
            let mut selected = within(records, now, Duration::days(ALL_WINDOW_DAYS))
                .filter(|r| {
                    matches!(
                        r.status,
                        Some(SymptomStatus::Active) | Some(SymptomStatus::Worsening)
                    )
                })
                .cloned()
                .collect::<Vec<_>>();
            newest_first(&mut selected);
            selected
        }
        SelectionPolicy::Recent => {
            let mut selected = within(records, now, Duration::hours(RECENT_WINDOW_HOURS))
                .cloned()
                .collect::<Vec<_>>();
            newest_first(&mut selected);
            selected.truncate(RECENT_LIMIT);
            selected
        }
    }
}

fn select_ids(records: &[SymptomRecord], ids: &[String]) -> Vec<SymptomRecord> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| {
            let found = records.iter().find(|r| r.id.as_deref() == Some(id.as_str()));
            if found.is_none() {
                tracing::debug!(id = %id, "requested symptom record not found");
            }
            found.cloned()
        })
        .collect()
}

/// Records in the trailing `span` ending at `now`. A window that would start
/// before the earliest representable time is empty.
fn within<'a>(
    records: &'a [SymptomRecord],
    now: DateTime<Utc>,
    span: Duration,
) -> impl Iterator<Item = &'a SymptomRecord> {
    let from = now.checked_sub_signed(span);
    if from.is_none() {
        tracing::debug!(%now, "selection window out of range");
    }
    records.iter().filter(move |r| match (from, r.recorded_at) {
        (Some(from), Some(at)) => at >= from && at <= now,
        _ => false,
    })
}

fn newest_first(records: &mut [SymptomRecord]) {
    records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
}
