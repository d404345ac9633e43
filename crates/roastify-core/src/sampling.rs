//! Sampling controls and their human-readable tiers.
//!
//! Both temperature and top-p map onto the same six tiers via fixed
//! thresholds (0.1 / 0.3 / 0.5 / 0.7 / 0.9). A threshold value belongs to
//! the lower tier. Values are never validated: anything at or below 0.1,
//! negatives included, lands in the lowest tier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier thresholds, upper bound inclusive.
const TIER_THRESHOLDS: [(f64, SamplingTier); 5] = [
    (0.1, SamplingTier::VeryLow),
    (0.3, SamplingTier::Low),
    (0.5, SamplingTier::Medium),
    (0.7, SamplingTier::MediumHigh),
    (0.9, SamplingTier::High),
];

/// Coarse bucket for a sampling value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingTier {
    VeryLow,
    Low,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
}

impl SamplingTier {
    pub fn from_value(value: f64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(limit, _)| value <= *limit)
            .map(|(_, tier)| *tier)
            .unwrap_or(SamplingTier::VeryHigh)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SamplingTier::VeryLow => "Very Low",
            SamplingTier::Low => "Low",
            SamplingTier::Medium => "Medium",
            SamplingTier::MediumHigh => "Medium-High",
            SamplingTier::High => "High",
            SamplingTier::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for SamplingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single sampling control value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sampling {
    Temperature(f64),
    TopP(f64),
}

impl Sampling {
    pub fn value(&self) -> f64 {
        match self {
            Sampling::Temperature(v) | Sampling::TopP(v) => *v,
        }
    }

    pub fn tier(&self) -> SamplingTier {
        SamplingTier::from_value(self.value())
    }

    /// Tier name plus a short explanation, e.g. "Low - Consistent and predictable".
    pub fn description(&self) -> &'static str {
        match self {
            Sampling::Temperature(_) => match self.tier() {
                SamplingTier::VeryLow => "Very Low - Highly focused and deterministic",
                SamplingTier::Low => "Low - Consistent and predictable",
                SamplingTier::Medium => "Medium - Balanced creativity and consistency",
                SamplingTier::MediumHigh => "Medium-High - Creative with some variety",
                SamplingTier::High => "High - Very creative and diverse",
                SamplingTier::VeryHigh => "Very High - Maximum creativity and randomness",
            },
            Sampling::TopP(_) => match self.tier() {
                SamplingTier::VeryLow => "Very Low - Highly focused on most probable tokens",
                SamplingTier::Low => "Low - Concentrated on high-probability outputs",
                SamplingTier::Medium => "Medium - Balanced probability distribution",
                SamplingTier::MediumHigh => "Medium-High - Good diversity with quality",
                SamplingTier::High => "High - Diverse and creative responses",
                SamplingTier::VeryHigh => "Very High - Maximum diversity and exploration",
            },
        }
    }
}

/// Tier description for a temperature value.
pub fn temperature_description(temperature: f64) -> &'static str {
    Sampling::Temperature(temperature).description()
}

/// Tier description for a top-p value.
pub fn top_p_description(top_p: f64) -> &'static str {
    Sampling::TopP(top_p).description()
}

/// One point of a sampling sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPoint {
    pub value: f64,
    pub name: String,
    pub description: String,
}

impl SamplingPoint {
    fn new(value: f64, description: &str) -> Self {
        Self {
            value,
            name: SamplingTier::from_value(value).name().to_string(),
            description: description.to_string(),
        }
    }
}

/// The canonical temperature sweep.
pub fn temperature_settings() -> Vec<SamplingPoint> {
    vec![
        SamplingPoint::new(0.1, "Highly focused, deterministic responses"),
        SamplingPoint::new(0.3, "Consistent, predictable outputs"),
        SamplingPoint::new(0.5, "Balanced creativity and consistency"),
        SamplingPoint::new(0.7, "Creative with moderate variety"),
        SamplingPoint::new(0.9, "Very creative and diverse"),
    ]
}

/// The canonical top-p sweep.
pub fn top_p_settings() -> Vec<SamplingPoint> {
    vec![
        SamplingPoint::new(0.1, "Highly focused, most probable tokens only"),
        SamplingPoint::new(0.3, "Concentrated on high-probability outputs"),
        SamplingPoint::new(0.5, "Balanced probability distribution"),
        SamplingPoint::new(0.7, "Good diversity while maintaining quality"),
        SamplingPoint::new(0.9, "Diverse and creative responses"),
    ]
}

/// The temperature sweep point for `value`.
///
/// Values from [`temperature_settings`] get their table entry; anything
/// else is described by its tier.
pub fn temperature_point(value: f64) -> SamplingPoint {
    lookup_point(temperature_settings(), Sampling::Temperature(value))
}

/// The top-p sweep point for `value`, as [`temperature_point`] does.
pub fn top_p_point(value: f64) -> SamplingPoint {
    lookup_point(top_p_settings(), Sampling::TopP(value))
}

fn lookup_point(table: Vec<SamplingPoint>, sampling: Sampling) -> SamplingPoint {
    let value = sampling.value();
    table
        .into_iter()
        .find(|point| point.value == value)
        .unwrap_or_else(|| {
            let description = sampling.description();
            let explanation = description
                .split_once(" - ")
                .map(|(_, rest)| rest)
                .unwrap_or(description);
            SamplingPoint::new(value, explanation)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_extremes() {
        assert!(temperature_description(0.05).starts_with("Very Low"));
        assert!(temperature_description(1.0).starts_with("Very High"));
    }

    #[test]
    fn test_thresholds_are_inclusive_on_lower_tier() {
        assert_eq!(SamplingTier::from_value(0.1), SamplingTier::VeryLow);
        assert_eq!(SamplingTier::from_value(0.3), SamplingTier::Low);
        assert_eq!(SamplingTier::from_value(0.5), SamplingTier::Medium);
        assert_eq!(SamplingTier::from_value(0.7), SamplingTier::MediumHigh);
        assert_eq!(SamplingTier::from_value(0.9), SamplingTier::High);
        assert_eq!(SamplingTier::from_value(0.91), SamplingTier::VeryHigh);
    }

    #[test]
    fn test_negative_values_use_lowest_tier() {
        assert_eq!(SamplingTier::from_value(-3.0), SamplingTier::VeryLow);
        assert_eq!(
            top_p_description(-0.5),
            "Very Low - Highly focused on most probable tokens"
        );
    }

    #[test]
    fn test_top_p_descriptions_differ_from_temperature() {
        assert_eq!(top_p_description(0.8), "High - Diverse and creative responses");
        assert_eq!(temperature_description(0.8), "High - Very creative and diverse");
    }

    #[test]
    fn test_settings_tables() {
        let temps = temperature_settings();
        assert_eq!(temps.len(), 5);
        assert_eq!(temps[0].name, "Very Low");
        assert_eq!(temps[3].name, "Medium-High");

        let top_ps = top_p_settings();
        let values: Vec<f64> = top_ps.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.1, 0.3, 0.5, 0.7, 0.9]);
        assert_eq!(top_ps[4].description, "Diverse and creative responses");
    }

    #[test]
    fn test_point_lookup_prefers_table() {
        let point = temperature_point(0.3);
        assert_eq!(point.name, "Low");
        assert_eq!(point.description, "Consistent, predictable outputs");

        let point = top_p_point(0.7);
        assert_eq!(point.name, "Medium-High");
        assert_eq!(point.description, "Good diversity while maintaining quality");
    }

    #[test]
    fn test_point_lookup_falls_back_to_tier() {
        let point = temperature_point(0.8);
        assert_eq!(point.value, 0.8);
        assert_eq!(point.name, "High");
        assert_eq!(point.description, "Very creative and diverse");

        let point = top_p_point(1.0);
        assert_eq!(point.name, "Very High");
        assert_eq!(point.description, "Maximum diversity and exploration");
    }
}
