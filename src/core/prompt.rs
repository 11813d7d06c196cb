use crate::models::PlanRequest;

/// Recommendation areas every generated plan is asked to cover
pub const RECOMMENDATION_CATEGORIES: [&str; 10] = [
    "Land use optimization",
    "Infrastructure development",
    "Sustainability implementation",
    "Community engagement strategies",
    "Economic development opportunities",
    "Smart city technologies integration",
    "Climate resilience measures",
    "Public space design",
    "Transportation network improvements",
    "Affordable housing initiatives",
];

/// Render a planning request into the prompt sent to the model
pub fn render_prompt(request: &PlanRequest) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "As an advanced urban planning AI, create a comprehensive development plan \
         with the following characteristics:\n",
    );
    prompt.push_str(&format!("- Land Area: {} sq km\n", request.land_area));
    prompt.push_str(&format!("- Current Population: {}\n", request.current_population));
    prompt.push_str(&format!("- Zoning: {}\n", request.zoning));
    prompt.push_str(&format!(
        "- Existing Infrastructure: {}\n",
        request.existing_infrastructure
    ));
    prompt.push_str(&format!(
        "- Sustainability Goals: {}\n",
        request.sustainability_goals.join(", ")
    ));
    prompt.push_str(&format!("- Development Budget: ${} million\n", request.budget));

    prompt.push_str("\nProvide detailed recommendations on:\n");
    for (i, category) in RECOMMENDATION_CATEGORIES.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, category));
    }

    prompt
}
