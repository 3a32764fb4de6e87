//! # semantic-manifest
//!
//! Validation and transformation of semantic layer manifests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │           SemanticManifest (models, metrics)             │
//! └─────────────────────────────────────────────────────────┘
//!               │                              │
//!               ▼ [validation]                 ▼ [transform]
//! ┌───────────────────────────┐  ┌──────────────────────────┐
//! │ names valid + unique,     │  │ phases of rules: lower-  │
//! │ dimension / primary entity│  │ case names, measure      │
//! │ pairs unique              │  │ rewrites, proxy metrics, │
//! │ → ValidationResults       │  │ metric granularities     │
//! └───────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! [`query_syntax`] parses the object builder text used to refer to
//! dimensions, entities and metrics, e.g.
//! `Dimension('listing__created_at').grain('day')`.

pub mod config;
pub mod model;
pub mod query_syntax;
pub mod transform;
pub mod validation;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::model::{
        Dimension, Entity, Measure, Metric, SemanticManifest, SemanticModel, TimeGranularity,
    };
    pub use crate::query_syntax::{
        parse_object_builder_item, InvalidQuerySyntax, ObjectBuilderItemDescription,
        ObjectBuilderTextProcessor,
    };
    pub use crate::transform::{
        transform_with_defaults, DefaultTransformRuleSet, RuleSequence,
        SemanticManifestTransformRule, SemanticManifestTransformer, TransformError,
    };
    pub use crate::validation::{
        check_valid_name, validate, SemanticManifestValidationRule, SemanticManifestValidator,
        ValidationIssue, ValidationIssueLevel, ValidationResults,
    };
}
