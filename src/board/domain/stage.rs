//! Stage transition resolver: maps columns to canonical task statuses.
//!
//! Resolution is two-tier. Boards created per organisational area declare a
//! machine-readable `stage_key` on each column, which takes precedence.
//! Legacy boards carry no stage semantics, so their free-text column names
//! are matched against a fixed label table instead. Both tables live here
//! so the matching order stays a single reviewable list.

use super::{Column, TaskStatus};

/// Resolves the canonical status for tasks sitting in the given column.
///
/// Priority order, first match wins:
///
/// 1. declared stage key (lowercased): `finalizado*` → done, `bloqueado*` →
///    blocked, `aprovacao*` → in-review, `*revisao*` → in-review,
///    `demanda*`/`lead*` → todo;
/// 2. legacy display name (lowercased): `backlog`, `a fazer`,
///    `em progresso`, `revis*`/`aprova*`, `conclu*`, `bloque*`, `cancel*`;
/// 3. default: in-progress.
///
/// The function is pure: the same stage key and name always resolve to the
/// same status.
#[must_use]
pub fn resolve_status(column: &Column) -> TaskStatus {
    column
        .stage_key()
        .and_then(|key| match_stage_key(&normalize(key)))
        .or_else(|| match_legacy_name(&normalize(column.name())))
        .unwrap_or(TaskStatus::InProgress)
}

/// Returns true when a move from `source` into `destination` enters an
/// approval stage.
///
/// The source must not already be an approval lane: jostling a task within
/// the same approval column (or between two approval columns) must not
/// re-arm the SLA clock.
#[must_use]
pub fn enters_approval(source: &Column, destination: &Column) -> bool {
    is_approval_stage(destination) && !is_approval_stage(source)
}

/// Returns true when the column resolves through an approval branch, either
/// via its declared stage key or via the legacy name heuristic.
///
/// Mirrors [`resolve_status`]: a recognised non-approval key overrides an
/// approval-looking name, while an unmatched key falls through to the name
/// heuristic.
#[must_use]
pub fn is_approval_stage(column: &Column) -> bool {
    if let Some(key) = column.stage_key() {
        let normalized = normalize(key);
        if normalized.starts_with("aprovacao") || normalized.contains("revisao") {
            return true;
        }
        if match_stage_key(&normalized).is_some() {
            return false;
        }
    }
    let name = normalize(column.name());
    name.starts_with("aprova") || name.starts_with("revis")
}

/// Fixed table for declared stage keys.
fn match_stage_key(key: &str) -> Option<TaskStatus> {
    if key.starts_with("finalizado") {
        Some(TaskStatus::Done)
    } else if key.starts_with("bloqueado") {
        Some(TaskStatus::Blocked)
    } else if key.starts_with("aprovacao") || key.contains("revisao") {
        Some(TaskStatus::InReview)
    } else if key.starts_with("demanda") || key.starts_with("lead") {
        Some(TaskStatus::Todo)
    } else {
        None
    }
}

/// Fixed table for legacy free-text column names.
fn match_legacy_name(name: &str) -> Option<TaskStatus> {
    if name == "backlog" {
        Some(TaskStatus::Backlog)
    } else if name == "a fazer" {
        Some(TaskStatus::Todo)
    } else if name == "em progresso" {
        Some(TaskStatus::InProgress)
    } else if name.starts_with("revis") || name.starts_with("aprova") {
        Some(TaskStatus::InReview)
    } else if name.starts_with("conclu") {
        Some(TaskStatus::Done)
    } else if name.starts_with("bloque") {
        Some(TaskStatus::Blocked)
    } else if name.starts_with("cancel") {
        Some(TaskStatus::Cancelled)
    } else {
        None
    }
}

/// Lowercases and trims a stage key or column name for matching.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
