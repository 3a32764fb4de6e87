//! Validation issues and the context pointing at the offending declaration.

use serde::Serialize;
use std::fmt;

use crate::model::{Metadata, MetricReference, SemanticModelElementReference, SemanticModelReference};

/// Severity of a validation issue, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssueLevel {
    Warning,
    /// Will become an error in a future release
    FutureError,
    Error,
    /// A rule failed internally; its findings are incomplete
    Fatal,
}

impl ValidationIssueLevel {
    pub fn is_blocking(&self) -> bool {
        matches!(self, ValidationIssueLevel::Error | ValidationIssueLevel::Fatal)
    }
}

impl fmt::Display for ValidationIssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationIssueLevel::Warning => "WARNING",
            ValidationIssueLevel::FutureError => "FUTURE_ERROR",
            ValidationIssueLevel::Error => "ERROR",
            ValidationIssueLevel::Fatal => "FATAL",
        };
        write!(f, "{}", label)
    }
}

/// The file and line a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileContext {
    pub file_name: Option<String>,
    pub line_number: Option<usize>,
}

impl FileContext {
    pub fn from_metadata(metadata: Option<&Metadata>) -> Self {
        match metadata {
            Some(metadata) => Self {
                file_name: Some(metadata.repo_file_path.clone()),
                line_number: Some(metadata.file_slice.start_line_number),
            },
            None => Self::default(),
        }
    }

    pub fn context_str(&self) -> String {
        let mut context = String::new();
        if let Some(file_name) = &self.file_name {
            context.push_str(&format!("in file `{}`", file_name));
            if let Some(line_number) = self.line_number {
                context.push_str(&format!(" on line #{}", line_number));
            }
        }
        context
    }
}

/// Kind of a semantic model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticModelElementType {
    Measure,
    Entity,
    Dimension,
}

impl fmt::Display for SemanticModelElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SemanticModelElementType::Measure => "measure",
            SemanticModelElementType::Entity => "entity",
            SemanticModelElementType::Dimension => "dimension",
        };
        write!(f, "{}", label)
    }
}

/// Where a validation issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ValidationContext {
    File {
        file_context: FileContext,
    },
    SemanticModel {
        file_context: FileContext,
        semantic_model: SemanticModelReference,
    },
    SemanticModelElement {
        file_context: FileContext,
        semantic_model_element: SemanticModelElementReference,
        element_type: SemanticModelElementType,
    },
    Metric {
        file_context: FileContext,
        metric: MetricReference,
    },
}

impl ValidationContext {
    pub fn file_context(&self) -> &FileContext {
        match self {
            ValidationContext::File { file_context }
            | ValidationContext::SemanticModel { file_context, .. }
            | ValidationContext::SemanticModelElement { file_context, .. }
            | ValidationContext::Metric { file_context, .. } => file_context,
        }
    }

    /// Human-readable location, e.g. "With metric `bookings` in file `metrics.yml` on line #3".
    pub fn context_str(&self) -> String {
        let scope = match self {
            ValidationContext::File { .. } => None,
            ValidationContext::SemanticModel { semantic_model, .. } => Some(format!(
                "With semantic model `{}`",
                semantic_model.semantic_model_name
            )),
            ValidationContext::SemanticModelElement {
                semantic_model_element,
                element_type,
                ..
            } => Some(format!(
                "With {} `{}` in semantic model `{}`",
                element_type,
                semantic_model_element.element_name,
                semantic_model_element.semantic_model_name
            )),
            ValidationContext::Metric { metric, .. } => {
                Some(format!("With metric `{}`", metric.metric_name))
            }
        };
        let file = self.file_context().context_str();
        match (scope, file.is_empty()) {
            (Some(scope), true) => scope,
            (Some(scope), false) => format!("{} {}", scope, file),
            (None, false) => format!("In {}", file.trim_start_matches("in ")),
            (None, true) => String::new(),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub level: ValidationIssueLevel,
    pub context: Option<ValidationContext>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        level: ValidationIssueLevel,
        context: Option<ValidationContext>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            context,
            message: message.into(),
        }
    }

    pub fn warning(context: Option<ValidationContext>, message: impl Into<String>) -> Self {
        Self::new(ValidationIssueLevel::Warning, context, message)
    }

    pub fn future_error(context: Option<ValidationContext>, message: impl Into<String>) -> Self {
        Self::new(ValidationIssueLevel::FutureError, context, message)
    }

    pub fn error(context: Option<ValidationContext>, message: impl Into<String>) -> Self {
        Self::new(ValidationIssueLevel::Error, context, message)
    }

    pub fn fatal(context: Option<ValidationContext>, message: impl Into<String>) -> Self {
        Self::new(ValidationIssueLevel::Fatal, context, message)
    }

    pub fn is_blocking(&self) -> bool {
        self.level.is_blocking()
    }

    /// Render the issue on one line, with its location when known.
    pub fn as_readable(&self) -> String {
        let context = self
            .context
            .as_ref()
            .map(|c| c.context_str())
            .unwrap_or_default();
        if context.is_empty() {
            format!("{}: {}", self.level, self.message)
        } else {
            format!("{}: {} - {}", self.level, context, self.message)
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_readable())
    }
}

/// Issues grouped by level.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResults {
    pub warnings: Vec<ValidationIssue>,
    pub future_errors: Vec<ValidationIssue>,
    /// Errors and fatal issues
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResults {
    pub fn from_issues(issues: impl IntoIterator<Item = ValidationIssue>) -> Self {
        let mut results = Self::default();
        for issue in issues {
            match issue.level {
                ValidationIssueLevel::Warning => results.warnings.push(issue),
                ValidationIssueLevel::FutureError => results.future_errors.push(issue),
                ValidationIssueLevel::Error | ValidationIssueLevel::Fatal => {
                    results.errors.push(issue)
                }
            }
        }
        results
    }

    pub fn merge(results: impl IntoIterator<Item = ValidationResults>) -> Self {
        let mut merged = Self::default();
        for result in results {
            merged.warnings.extend(result.warnings);
            merged.future_errors.extend(result.future_errors);
            merged.errors.extend(result.errors);
        }
        merged
    }

    pub fn has_blocking_issues(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.future_errors.is_empty() && self.errors.is_empty()
    }

    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.future_errors.iter())
            .chain(self.warnings.iter())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} error(s), {} future error(s), {} warning(s)",
            self.errors.len(),
            self.future_errors.len(),
            self.warnings.len()
        )
    }
}
