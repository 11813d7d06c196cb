//! Urban Planner - development plan generation service
//!
//! Renders structured planning requests into prompts for a hosted
//! text-generation model (Amazon Bedrock) and scores the generated plan
//! against the caller's sustainability goals.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{analyze_sustainability, render_prompt, GOAL_MATCH_POINTS};
pub use crate::models::{PlanRequest, PlanResponse, GoalScore, SustainabilityAssessment, GenerationParams};
pub use crate::services::{BedrockClient, GatewayError, TextGenerator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = analyze_sustainability("more parks", &["parks".to_string()]);
        assert_eq!(result.score, GOAL_MATCH_POINTS);
    }
}
