//! Triage heuristics for the admin dashboard.
//!
//! Pure functions over status tags and timestamps: priority-by-age,
//! relative-time labels, and the per-status breakdown behind the stats
//! endpoint.

use chrono::Duration;
use serde::Serialize;

use crate::submission::VALID_STATUSES;
use crate::types::Timestamp;

/// Age after which an untouched `new` submission is escalated.
const ESCALATION_HOURS: i64 = 48;

/// Triage priority derived from status and age, newest-first ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Derive a priority for a submission.
///
/// A `new` submission older than 48 hours has been waiting too long and is
/// High; a recent `new` or a `read` submission is Medium; anything already
/// being worked (or finished) is Low.
pub fn priority_for(status: &str, created_at: Timestamp, now: Timestamp) -> Priority {
    let age = now.signed_duration_since(created_at);
    match status {
        "new" if age > Duration::hours(ESCALATION_HOURS) => Priority::High,
        "new" | "read" => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Format a timestamp relative to `now` for list rendering.
///
/// Falls back to an absolute date beyond 30 days; a timestamp in the future
/// (clock skew) renders as "just now".
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < Duration::minutes(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed <= Duration::days(30) {
        format!("{}d ago", elapsed.num_days())
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// Count of submissions carrying a given status tag.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Priority bucket totals across the active view.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PriorityCounts {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

/// Derived stats for the admin dashboard, computed over active submissions.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOverview {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
    pub priorities: PriorityCounts,
}

impl TriageOverview {
    /// Build the overview from `(status, created_at)` pairs.
    ///
    /// Statuses are reported in the canonical order; unknown tags (legacy
    /// rows) are appended after the known ones rather than dropped.
    pub fn compute<'a, I>(rows: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = (&'a str, Timestamp)>,
    {
        let mut total = 0i64;
        let mut known = vec![0i64; VALID_STATUSES.len()];
        let mut unknown: Vec<StatusCount> = Vec::new();
        let mut priorities = PriorityCounts::default();

        for (status, created_at) in rows {
            total += 1;
            match VALID_STATUSES.iter().position(|s| *s == status) {
                Some(idx) => known[idx] += 1,
                None => match unknown.iter_mut().find(|c| c.status == status) {
                    Some(c) => c.count += 1,
                    None => unknown.push(StatusCount {
                        status: status.to_string(),
                        count: 1,
                    }),
                },
            }
            match priority_for(status, created_at, now) {
                Priority::High => priorities.high += 1,
                Priority::Medium => priorities.medium += 1,
                Priority::Low => priorities.low += 1,
            }
        }

        let mut by_status: Vec<StatusCount> = VALID_STATUSES
            .iter()
            .zip(known)
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| StatusCount {
                status: (*status).to_string(),
                count,
            })
            .collect();
        by_status.extend(unknown);

        Self {
            total,
            by_status,
            priorities,
        }
    }
}
