// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GoalScore, SustainabilityAssessment, GenerationParams};
pub use requests::PlanRequest;
pub use responses::{PlanResponse, HealthResponse, ErrorResponse};
