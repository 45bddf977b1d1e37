use super::constants::*;
use serde::{Deserialize, Serialize};

/// Tunable engine policy. The defaults reproduce the historical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub max_iterations: usize,
    pub min_outcome_probability: f64,
    pub max_outcome_probability: f64,
    pub defensive_rebound_multiplier: f64,
    pub min_offensive_rebound_probability: f64,
    pub max_offensive_rebound_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_PLAY_ITERATIONS,
            min_outcome_probability: MIN_OUTCOME_PROBABILITY,
            max_outcome_probability: MAX_OUTCOME_PROBABILITY,
            defensive_rebound_multiplier: DEFENSIVE_REBOUND_MULTIPLIER,
            min_offensive_rebound_probability: MIN_OFFENSIVE_REBOUND_PROBABILITY,
            max_offensive_rebound_probability: MAX_OFFENSIVE_REBOUND_PROBABILITY,
        }
    }
}

impl EngineConfig {
    // Swapped or out-of-range bounds are repaired instead of rejected,
    // so a bad config file cannot stall a game.
    pub fn sanitized(mut self) -> Self {
        if self.max_iterations == 0 {
            log::warn!("max_iterations cannot be 0, using {MAX_PLAY_ITERATIONS}");
            self.max_iterations = MAX_PLAY_ITERATIONS;
        }
        let (low, high) = ordered_unit_bounds(
            self.min_outcome_probability,
            self.max_outcome_probability,
            (MIN_OUTCOME_PROBABILITY, MAX_OUTCOME_PROBABILITY),
        );
        self.min_outcome_probability = low;
        self.max_outcome_probability = high;

        let (low, high) = ordered_unit_bounds(
            self.min_offensive_rebound_probability,
            self.max_offensive_rebound_probability,
            (
                MIN_OFFENSIVE_REBOUND_PROBABILITY,
                MAX_OFFENSIVE_REBOUND_PROBABILITY,
            ),
        );
        self.min_offensive_rebound_probability = low;
        self.max_offensive_rebound_probability = high;

        if !(self.defensive_rebound_multiplier.is_finite() && self.defensive_rebound_multiplier > 0.0)
        {
            self.defensive_rebound_multiplier = DEFENSIVE_REBOUND_MULTIPLIER;
        }
        self
    }
}

fn ordered_unit_bounds(low: f64, high: f64, fallback: (f64, f64)) -> (f64, f64) {
    if !low.is_finite() || !high.is_finite() {
        log::warn!("Non finite probability bounds {low}..{high}, using defaults");
        return fallback;
    }
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    (low.clamp(0.0, 1.0), high.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::types::AppResult;

    #[test]
    fn test_partial_config_uses_defaults() -> AppResult<()> {
        let config: EngineConfig = serde_json::from_str(r#"{"maxIterations": 8}"#)?;
        assert_eq!(config.max_iterations, 8);
        assert_eq!(
            config.min_outcome_probability,
            EngineConfig::default().min_outcome_probability
        );
        Ok(())
    }

    #[test]
    fn test_sanitized_repairs_bounds() {
        let config = EngineConfig {
            max_iterations: 0,
            min_outcome_probability: 0.9,
            max_outcome_probability: 0.1,
            min_offensive_rebound_probability: f64::NAN,
            defensive_rebound_multiplier: -1.0,
            ..Default::default()
        }
        .sanitized();
        let defaults = EngineConfig::default();

        assert_eq!(config.max_iterations, defaults.max_iterations);
        assert_eq!(config.min_outcome_probability, 0.1);
        assert_eq!(config.max_outcome_probability, 0.9);
        assert_eq!(
            config.min_offensive_rebound_probability,
            defaults.min_offensive_rebound_probability
        );
        assert_eq!(
            config.defensive_rebound_multiplier,
            defaults.defensive_rebound_multiplier
        );
    }
}
