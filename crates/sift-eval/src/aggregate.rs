//! Combination of per-clause predicates
//!
//! Clauses are grouped by property: a clause carrying an aggregate mode
//! folds into the group directly before it when both name the same
//! canonical path. Groups are then joined with AND in query order.

use sift_ast::AggregateMode;
use sift_ir::Predicate;

/// One compiled clause awaiting aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Canonical path of the compared property
    pub path: String,
    pub aggregate: Option<AggregateMode>,
    pub predicate: Predicate,
}

impl Condition {
    pub fn new(path: impl Into<String>, aggregate: Option<AggregateMode>, predicate: Predicate) -> Self {
        Self {
            path: path.into(),
            aggregate,
            predicate,
        }
    }
}

/// Fold conditions into one predicate; no conditions accept every record.
///
/// Mixed modes on one property fold strictly left to right, so
/// `a Or b And c` is `(a OR b) AND c`.
pub fn aggregate(conditions: impl IntoIterator<Item = Condition>) -> Predicate {
    let mut groups: Vec<(String, Predicate)> = Vec::new();

    for condition in conditions {
        match (condition.aggregate, groups.last_mut()) {
            (Some(mode), Some((path, current))) if *path == condition.path => {
                let previous = std::mem::take(current);
                *current = match mode {
                    AggregateMode::And => Predicate::and(previous, condition.predicate),
                    AggregateMode::Or => Predicate::or(previous, condition.predicate),
                };
            }
            _ => groups.push((condition.path, condition.predicate)),
        }
    }

    log::trace!("Aggregated {} property groups", groups.len());
    Predicate::all(groups.into_iter().map(|(_, predicate)| predicate))
}
