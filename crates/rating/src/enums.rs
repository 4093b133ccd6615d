use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly the regression rejects a zero alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlphaSignificance {
    #[serde(rename = "Highly Significant")]
    HighlySignificant,
    #[serde(rename = "Significant")]
    Significant,
    #[serde(rename = "Marginally Significant")]
    MarginallySignificant,
    #[serde(rename = "Not Significant")]
    NotSignificant,
}

impl fmt::Display for AlphaSignificance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlphaSignificance::HighlySignificant => "Highly Significant",
            AlphaSignificance::Significant => "Significant",
            AlphaSignificance::MarginallySignificant => "Marginally Significant",
            AlphaSignificance::NotSignificant => "Not Significant",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceRating {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl PerformanceRating {
    /// Contribution to the recommendation score, from 2 (Excellent) down to -2 (Very Poor).
    pub fn score(self) -> i32 {
        match self {
            PerformanceRating::Excellent => 2,
            PerformanceRating::Good => 1,
            PerformanceRating::Average => 0,
            PerformanceRating::Poor => -1,
            PerformanceRating::VeryPoor => -2,
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::Good => "Good",
            PerformanceRating::Average => "Average",
            PerformanceRating::Poor => "Poor",
            PerformanceRating::VeryPoor => "Very Poor",
        };
        f.write_str(label)
    }
}

/// Ordered from least to most risky, so `max` picks the worse of two ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskRating {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskRating::Low => "Low",
            RiskRating::Moderate => "Moderate",
            RiskRating::High => "High",
            RiskRating::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Recommendation {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 2 => Recommendation::StrongBuy,
            1 => Recommendation::Buy,
            0 => Recommendation::Hold,
            -1 => Recommendation::Sell,
            _ => Recommendation::StrongSell,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        };
        f.write_str(label)
    }
}
