//! Syntactic validity of object names.
//!
//! Every semantic model, metric and semantic model element name must:
//! - start with a lower case letter
//! - end with a lower case letter or a number
//! - contain only lower case letters, numbers and underscores
//! - not contain a double underscore (`__` separates entity links in queries)
//! - be at least 2 characters long
//! - not be a time granularity keyword or a reserved keyword

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::issues::{ValidationContext, ValidationIssue};
use crate::model::TimeGranularity;

/// Shape of a valid name. Double underscores are rejected separately since
/// the regex crate has no lookahead.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*[a-z0-9]$").unwrap());

/// Names reserved for internal use by the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKeyword {
    MetricTime,
    MfInternalUuid,
}

impl ReservedKeyword {
    pub const ALL: [ReservedKeyword; 2] = [ReservedKeyword::MetricTime, ReservedKeyword::MfInternalUuid];

    pub fn value(&self) -> &'static str {
        match self {
            ReservedKeyword::MetricTime => "metric_time",
            ReservedKeyword::MfInternalUuid => "mf_internal_uuid",
        }
    }

    /// Why the keyword is reserved.
    pub fn reserved_reason(&self) -> &'static str {
        match self {
            ReservedKeyword::MetricTime => {
                "Used as the query input for creating time series metrics from measures with \
                 different time dimension names."
            }
            ReservedKeyword::MfInternalUuid => {
                "Used internally to reference a column that has a uuid generated by the query layer."
            }
        }
    }

    /// Look up a reserved keyword by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        Self::ALL.iter().copied().find(|k| k.value() == lowered)
    }
}

impl fmt::Display for ReservedKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Whether a name has the required shape, ignoring keyword collisions.
pub fn is_valid_name_syntax(name: &str) -> bool {
    NAME_PATTERN.is_match(name) && !name.contains("__")
}

/// Check a single name, returning one issue per violated constraint.
///
/// The syntax, granularity and reserved keyword checks are independent; a
/// name can fail several of them at once.
pub fn check_valid_name(name: &str, context: Option<&ValidationContext>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !is_valid_name_syntax(name) {
        issues.push(ValidationIssue::error(
            context.cloned(),
            format!(
                "Invalid name `{}` - names may only contain lower case letters, numbers, \
                 and underscores. Additionally, names must start with a lower case letter, cannot end \
                 with an underscore, cannot contain dunders (double underscores, or __), and must be \
                 at least 2 characters long.",
                name
            ),
        ));
    }

    let granularity_names = TimeGranularity::list_names();
    if granularity_names.contains(&name.to_uppercase().as_str()) {
        issues.push(ValidationIssue::error(
            context.cloned(),
            format!(
                "Invalid name `{}` - names cannot match reserved time granularity keywords ({})",
                name,
                granularity_names.join(", ")
            ),
        ));
    }

    if let Some(keyword) = ReservedKeyword::from_name(name) {
        issues.push(ValidationIssue::error(
            context.cloned(),
            format!(
                "Invalid name `{}` - this name is reserved by the query layer. Reason: {}",
                name,
                keyword.reserved_reason()
            ),
        ));
    }

    issues
}
