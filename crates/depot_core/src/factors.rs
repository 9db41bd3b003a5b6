//! External-factor readings used as prompt context.

use serde::{Deserialize, Serialize};

/// Three-level ordinal used for weather risk, risk-factor impact and risk tolerance.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}

/// Sky condition reported by the weather feed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    strum::VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeatherCondition {
    /// Clear skies
    Clear,
    /// Overcast
    Cloudy,
    /// Rain
    Rainy,
    /// Storms
    Stormy,
    /// Snow
    Snowy,
}

impl WeatherCondition {
    /// Shipping risk implied by the condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_core::{RiskLevel, WeatherCondition};
    ///
    /// assert_eq!(WeatherCondition::Stormy.risk_level(), RiskLevel::High);
    /// assert_eq!(WeatherCondition::Rainy.risk_level(), RiskLevel::Medium);
    /// assert_eq!(WeatherCondition::Snowy.risk_level(), RiskLevel::Low);
    /// ```
    pub fn risk_level(self) -> RiskLevel {
        match self {
            Self::Stormy => RiskLevel::High,
            Self::Rainy => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    /// Operational impact text for the condition.
    pub fn impact(self) -> &'static str {
        match self {
            Self::Stormy => "Potential shipping delays",
            _ => "Normal operations expected",
        }
    }
}

/// A weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Location the reading applies to
    pub location: String,
    /// Sky condition
    pub condition: WeatherCondition,
    /// Temperature in degrees Celsius
    pub temperature: i32,
    /// Wind speed
    pub wind_speed: i32,
    /// Shipping risk
    pub risk_level: RiskLevel,
    /// Operational impact
    pub impact: String,
}

impl WeatherReading {
    /// Build a reading whose risk level and impact follow from the condition.
    pub fn new(
        location: impl Into<String>,
        condition: WeatherCondition,
        temperature: i32,
        wind_speed: i32,
    ) -> Self {
        Self {
            location: location.into(),
            condition,
            temperature,
            wind_speed,
            risk_level: condition.risk_level(),
            impact: condition.impact().to_string(),
        }
    }
}

/// Direction of a commodity price.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarketTrend {
    /// Price moving up
    Rising,
    /// Price moving down
    Falling,
    /// Price within the noise band
    Stable,
}

impl MarketTrend {
    /// Classify a price change against a base price; more than 5 either way is a trend.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_core::MarketTrend;
    ///
    /// assert_eq!(MarketTrend::from_delta(7.5), MarketTrend::Rising);
    /// assert_eq!(MarketTrend::from_delta(-5.0), MarketTrend::Stable);
    /// assert_eq!(MarketTrend::from_delta(-5.1), MarketTrend::Falling);
    /// ```
    pub fn from_delta(delta: f64) -> Self {
        if delta > 5.0 {
            Self::Rising
        } else if delta < -5.0 {
            Self::Falling
        } else {
            Self::Stable
        }
    }

    /// Procurement recommendation for the trend.
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Falling => "Consider increasing inventory",
            Self::Rising => "Monitor costs closely",
            Self::Stable => "Maintain current strategy",
        }
    }
}

/// A commodity market reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReading {
    /// Commodity the reading applies to
    pub commodity: String,
    /// Current price, rounded to cents
    pub current_price: f64,
    /// Price direction
    pub trend: MarketTrend,
    /// Absolute price change
    pub volatility: f64,
    /// Procurement recommendation
    pub recommendation: String,
}

/// Tone of recent news coverage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    /// Favourable
    Positive,
    /// Neither
    Neutral,
    /// Unfavourable
    Negative,
}

impl Sentiment {
    /// Candidate headlines for the sentiment.
    pub fn headlines(self) -> &'static [&'static str] {
        match self {
            Self::Positive => &[
                "Supply chain efficiency improves globally",
                "New trade agreements boost logistics",
            ],
            Self::Neutral => &[
                "Market conditions remain stable",
                "Industry reports steady growth",
            ],
            Self::Negative => &[
                "Supply chain disruptions reported",
                "Rising costs affect manufacturing",
            ],
        }
    }

    /// Outlook text for the sentiment.
    pub fn impact(self) -> &'static str {
        match self {
            Self::Negative => "Potential challenges ahead",
            Self::Positive => "Favorable conditions",
            Self::Neutral => "No significant impact",
        }
    }
}

/// A news sentiment reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsReading {
    /// Topic the reading applies to
    pub topic: String,
    /// Overall tone
    pub sentiment: Sentiment,
    /// Classifier confidence in percent
    pub confidence: i32,
    /// Representative headline
    pub headline: String,
    /// Outlook
    pub impact: String,
}

/// The three readings that accompany every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFactors {
    /// Weather reading
    pub weather: WeatherReading,
    /// Market reading
    pub market: MarketReading,
    /// News reading
    pub news: NewsReading,
}
