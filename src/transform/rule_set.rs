//! The built-in transform phases.

use super::{
    AddInputMetricMeasuresRule, BooleanMeasureAggregationRule, ConvertCountToSumRule,
    ConvertMedianToPercentileRule, LowerCaseNamesRule, ProxyMeasureRule, RuleSequence,
    SetMeasureAggregationTimeDimensionRule, SetMetricTimeGranularityRule,
};
use crate::config::TransformSettings;

/// Built-in rules, split into the phase that runs before caller rules and the
/// phase that runs after them.
pub struct DefaultTransformRuleSet;

impl DefaultTransformRuleSet {
    /// Normalization rules. Run before any caller-supplied rules.
    pub fn primary_rules() -> RuleSequence {
        vec![
            Box::new(LowerCaseNamesRule),
            Box::new(SetMeasureAggregationTimeDimensionRule),
            Box::new(ProxyMeasureRule),
            Box::new(BooleanMeasureAggregationRule),
            Box::new(ConvertCountToSumRule),
            Box::new(ConvertMedianToPercentileRule),
            Box::new(AddInputMetricMeasuresRule),
        ]
    }

    /// Defaulting rules. Values set by earlier phases are kept.
    pub fn secondary_rules() -> RuleSequence {
        vec![Box::new(SetMetricTimeGranularityRule)]
    }

    pub fn all_rules() -> Vec<RuleSequence> {
        vec![Self::primary_rules(), Self::secondary_rules()]
    }

    /// Both phases, minus the rules named in `skip_rules`.
    pub fn from_settings(settings: &TransformSettings) -> Vec<RuleSequence> {
        Self::all_rules()
            .into_iter()
            .map(|phase| {
                phase
                    .into_iter()
                    .filter(|rule| {
                        let skipped = settings.skip_rules.iter().any(|name| name == rule.name());
                        if skipped {
                            tracing::debug!(rule = rule.name(), "skipping transform rule");
                        }
                        !skipped
                    })
                    .collect()
            })
            .collect()
    }
}
