//! Data-source preferences and AI settings.
//!
//! The defaults are enumerated here once; every reader of preferences falls
//! back to [`Settings::default`] rather than carrying its own literals.

use crate::RiskLevel;
use serde::{Deserialize, Serialize};

/// A single data-source toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceToggle {
    /// Stable identifier (`weather`, `market`, `news`, `location`)
    pub id: String,
    /// Whether the source is used
    pub enabled: bool,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PreferenceToggle {
    fn new(id: &str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            enabled,
            name: None,
            description: None,
            category: None,
        }
    }
}

/// Knobs that steer the decision engine.
///
/// Missing fields in a submitted document take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    /// Include weather readings
    pub use_weather_data: bool,
    /// Include market readings
    pub use_market_data: bool,
    /// Include news readings
    pub use_news_data: bool,
    /// Include trading data
    pub use_trading_data: bool,
    /// Free-text instructions appended by the operator
    pub custom_instructions: String,
    /// Appetite for risk
    pub risk_tolerance: RiskLevel,
    /// Minutes between automatic decisions; stored as given
    pub decision_frequency: i64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            use_weather_data: true,
            use_market_data: true,
            use_news_data: false,
            use_trading_data: true,
            custom_instructions: String::new(),
            risk_tolerance: RiskLevel::Medium,
            decision_frequency: 30,
        }
    }
}

/// The singleton settings document.
///
/// # Examples
///
/// ```
/// use depot_core::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{"aiSettings": {"decisionFrequency": 2}}"#).unwrap();
/// assert_eq!(settings.ai_settings.decision_frequency, 2);
/// assert!(settings.ai_settings.use_weather_data);
/// assert_eq!(settings.preferences.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Data-source toggles
    pub preferences: Vec<PreferenceToggle>,
    /// Engine knobs
    pub ai_settings: AiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preferences: vec![
                PreferenceToggle::new("weather", true),
                PreferenceToggle::new("market", true),
                PreferenceToggle::new("news", false),
                PreferenceToggle::new("location", true),
            ],
            ai_settings: AiSettings::default(),
        }
    }
}
