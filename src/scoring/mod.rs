//! Attractiveness scoring
//!
//! Folds a declarative list of (predicate, weight) rules over an indicator
//! snapshot. Rules are independent and unconditional: any subset may fire on
//! the same snapshot. The policy lives in one table so it can be tested and
//! extended without touching control flow.

use crate::models::{IndicatorSet, Score};

pub const BASELINE: i32 = 50;

/// A single scoring rule: fires when the predicate holds, contributing its
/// weight to the baseline.
pub struct ScoringRule {
    pub description: &'static str,
    pub predicate: fn(&IndicatorSet) -> bool,
    pub weight: i32,
}

/// The scoring policy. Missing sub-fields default to neutral: an undefined
/// RSI behaves like the midpoint 50 and an undefined band position fires no
/// band rule.
pub const RULES: &[ScoringRule] = &[
    ScoringRule {
        description: "RSI oversold",
        predicate: |ind| ind.rsi.unwrap_or(50.0) < 30.0,
        weight: 25,
    },
    ScoringRule {
        description: "RSI overbought",
        predicate: |ind| ind.rsi.unwrap_or(50.0) > 70.0,
        weight: -25,
    },
    ScoringRule {
        description: "MACD histogram positive",
        predicate: |ind| ind.macd_hist > 0.0,
        weight: 15,
    },
    ScoringRule {
        description: "price near lower Bollinger band",
        predicate: |ind| ind.bb_position.unwrap_or(0.5) < 0.2,
        weight: 15,
    },
    ScoringRule {
        description: "golden cross",
        predicate: |ind| ind.golden_cross,
        weight: 20,
    },
];

/// Derive the bounded attractiveness score from an indicator snapshot.
///
/// Never fails for a well-formed snapshot; the result is clamped to [0, 100]
/// regardless of how many rules fire.
pub fn compute_score(indicators: &IndicatorSet) -> Score {
    let raw = RULES
        .iter()
        .filter(|rule| (rule.predicate)(indicators))
        .fold(BASELINE, |acc, rule| acc + rule.weight);

    Score::computed(raw.clamp(0, 100) as u8)
}

/// Descriptions of the rules that fired, for display next to the score.
pub fn fired_rules(indicators: &IndicatorSet) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| (rule.predicate)(indicators))
        .map(|rule| rule.description)
        .collect()
}
