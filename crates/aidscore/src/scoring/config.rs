use serde::{Deserialize, Serialize};

/// Rubric configuration: the per-person poverty line plus the risk-category
/// cut-offs applied to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub poverty_line: f64,
    pub critical_threshold: u8,
    pub high_threshold: u8,
    pub medium_threshold: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            poverty_line: 200.0,
            critical_threshold: 80,
            high_threshold: 60,
            medium_threshold: 35,
        }
    }
}

impl ScoringConfig {
    pub fn with_poverty_line(poverty_line: f64) -> Self {
        Self {
            poverty_line,
            ..Self::default()
        }
    }
}
