use serde::{Deserialize, Serialize};

/// Score awarded to a single sustainability goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalScore {
    #[serde(rename = "Goal")]
    pub goal: String,
    #[serde(rename = "Score")]
    pub score: u32,
}

/// Result of scoring a generated plan against the requested goals
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SustainabilityAssessment {
    pub score: u32,
    /// One entry per input goal, in input order
    pub breakdown: Vec<GoalScore>,
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}
