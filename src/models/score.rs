//! Attractiveness score and recommendation models

use serde::{Deserialize, Serialize};

/// Five-bucket ordinal recommendation, ascending by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl Recommendation {
    /// Map a clamped score (0-100) to its bucket. A score of exactly 100
    /// still lands in the last bucket.
    pub fn from_score(score: u8) -> Self {
        const BUCKETS: [Recommendation; 5] = [
            Recommendation::StrongSell,
            Recommendation::Sell,
            Recommendation::Hold,
            Recommendation::Buy,
            Recommendation::StrongBuy,
        ];
        BUCKETS[(score as usize / 20).min(4)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongSell => "strong sell",
            Recommendation::Sell => "sell",
            Recommendation::Hold => "hold",
            Recommendation::Buy => "buy",
            Recommendation::StrongBuy => "strong buy",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a score was actually derived from indicators or is the
/// engine-unavailable default. A fallback Hold must stay distinguishable
/// from a legitimately computed neutral score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Computed,
    Fallback,
}

/// Bounded attractiveness score paired with its recommendation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: u8,
    pub recommendation: Recommendation,
    pub source: ScoreSource,
}

impl Score {
    pub fn computed(value: u8) -> Self {
        Self {
            value,
            recommendation: Recommendation::from_score(value),
            source: ScoreSource::Computed,
        }
    }

    /// The unadjusted baseline, used when no indicator set is available.
    pub fn fallback() -> Self {
        Self {
            value: 50,
            recommendation: Recommendation::Hold,
            source: ScoreSource::Fallback,
        }
    }
}
