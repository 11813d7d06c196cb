/// Project a population forward with compound annual growth
///
/// `growth_rate` is a fraction per year, e.g. `0.02` for 2%.
pub fn project_population(initial_population: f64, growth_rate: f64, years: u32) -> f64 {
    initial_population * (1.0 + growth_rate).powf(f64::from(years))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_years_is_identity() {
        assert_eq!(project_population(50_000.0, 0.03, 0), 50_000.0);
    }

    #[test]
    fn test_compound_growth() {
        let projected = project_population(10_000.0, 0.1, 2);
        assert!((projected - 12_100.0).abs() < 1e-6);
    }

    #[test]
    fn test_large_horizon_keeps_growing() {
        let projected = project_population(100.0, 0.01, u32::MAX);
        assert!(projected.is_infinite() && projected > 0.0);
    }

    #[test]
    fn test_decline() {
        let projected = project_population(1_000.0, -0.5, 1);
        assert!((projected - 500.0).abs() < 1e-9);
    }
}
