// Core exports
pub mod charts;
pub mod growth;
pub mod prompt;
pub mod scoring;

pub use charts::{city_model, traffic_flow, Figure};
pub use growth::project_population;
pub use prompt::{render_prompt, RECOMMENDATION_CATEGORIES};
pub use scoring::{analyze_sustainability, GOAL_MATCH_POINTS};
