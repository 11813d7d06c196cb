use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to generate a development plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanRequest {
    /// Land area in square kilometres
    #[validate(range(exclusive_min = 0.0))]
    pub land_area: f64,
    pub current_population: u64,
    pub zoning: String,
    pub existing_infrastructure: String,
    #[validate(custom(function = "validate_goal_labels"))]
    pub sustainability_goals: Vec<String>,
    /// Development budget in millions
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
}

#[allow(clippy::ptr_arg)]
fn validate_goal_labels(goals: &Vec<String>) -> Result<(), ValidationError> {
    if goals.iter().any(|g| g.trim().is_empty()) {
        let mut err = ValidationError::new("blank_goal");
        err.message = Some("sustainability goals must be non-empty labels".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest {
            land_area: 12.5,
            current_population: 40_000,
            zoning: "mixed-use".to_string(),
            existing_infrastructure: "one rail line".to_string(),
            sustainability_goals: vec!["transit".to_string(), "housing".to_string()],
            budget: 250.0,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_goal_list_is_valid() {
        let mut req = request();
        req.sustainability_goals.clear();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_goal_rejected() {
        let mut req = request();
        req.sustainability_goals.push("  ".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_positive_area_and_budget_rejected() {
        let mut req = request();
        req.land_area = 0.0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.budget = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_budget_fails_to_parse() {
        let body = r#"{
            "land_area": 10,
            "current_population": 1000,
            "zoning": "residential",
            "existing_infrastructure": "roads",
            "sustainability_goals": ["solar"]
        }"#;
        let err = serde_json::from_str::<PlanRequest>(body).unwrap_err();
        assert!(err.to_string().contains("budget"));
    }

    #[test]
    fn test_fractional_population_fails_to_parse() {
        let body = r#"{
            "land_area": 10,
            "current_population": 40000.0,
            "zoning": "residential",
            "existing_infrastructure": "roads",
            "sustainability_goals": [],
            "budget": 20
        }"#;
        assert!(serde_json::from_str::<PlanRequest>(body).is_err());
    }
}
