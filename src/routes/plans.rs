use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{analyze_sustainability, render_prompt};
use crate::models::{PlanRequest, PlanResponse, HealthResponse, ErrorResponse};
use crate::services::TextGenerator;
use std::sync::Arc;

/// Plan text substituted when generation fails for any reason
pub const FALLBACK_PLAN: &str = "Error: Unable to generate response. Please try again.";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

/// Configure plan generation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/generate_plan", web::post().to(generate_plan));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate plan endpoint
///
/// POST /generate_plan
///
/// Request body:
/// ```json
/// {
///   "land_area": 12.5,
///   "current_population": 40000,
///   "zoning": "mixed-use",
///   "existing_infrastructure": "two bus lines",
///   "sustainability_goals": ["transit", "housing"],
///   "budget": 250
/// }
/// ```
///
/// Generation failures do not fail the request: the plan falls back to
/// [`FALLBACK_PLAN`], which is then scored like any other text.
async fn generate_plan(
    state: web::Data<AppState>,
    req: web::Json<PlanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_plan request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Generating plan for {} sq km {} zone with {} goals",
        req.land_area,
        req.zoning,
        req.sustainability_goals.len()
    );

    let prompt = render_prompt(&req);

    let plan = match state.generator.generate(&prompt).await {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("Error calling Bedrock: {}", e);
            FALLBACK_PLAN.to_string()
        }
    };

    let assessment = analyze_sustainability(&plan, &req.sustainability_goals);

    tracing::info!(
        "Plan scored {} across {} goals",
        assessment.score,
        assessment.breakdown.len()
    );

    HttpResponse::Ok().json(PlanResponse {
        plan,
        sustainability_score: assessment.score,
        sustainability_breakdown: assessment.breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::GatewayError;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct Declining;

    #[async_trait]
    impl TextGenerator for Declining {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Declined("no".into()))
        }
    }

    #[actix_web::test]
    async fn test_health_check() {
        let state = AppState { generator: Arc::new(Declining) };
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn test_declined_generation_scores_fallback() {
        let state = AppState { generator: Arc::new(Declining) };
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate_plan")
            .set_json(serde_json::json!({
                "land_area": 3,
                "current_population": 1200,
                "zoning": "rural",
                "existing_infrastructure": "gravel roads",
                "sustainability_goals": ["error", "solar"],
                "budget": 5
            }))
            .to_request();
        let body: PlanResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.plan, FALLBACK_PLAN);
        // The fallback text itself contains "Error"
        assert_eq!(body.sustainability_score, 25);
    }
}
