//! External signal readings.
//!
//! Real weather, market and news feeds are not wired up; [`RandomSignals`]
//! synthesises plausible readings and [`FixedSignals`] returns the same
//! readings every time.

use depot_core::{
    ExternalFactors, MarketReading, MarketTrend, NewsReading, Sentiment, WeatherCondition,
    WeatherReading,
};
use rand::Rng;
use strum::VariantArray;

/// Location used for the weather reading attached to decisions.
pub const DEFAULT_LOCATION: &str = "global";
/// Commodity used for the market reading attached to decisions.
pub const DEFAULT_COMMODITY: &str = "raw_materials";
/// Topic used for the news reading attached to decisions.
pub const DEFAULT_TOPIC: &str = "supply_chain";

const BASE_PRICE: f64 = 100.0;

/// Source of external-factor readings.
pub trait SignalSource: Send + Sync {
    /// Weather at `location`.
    fn weather(&self, location: &str) -> WeatherReading;

    /// Market conditions for `commodity`.
    fn market(&self, commodity: &str) -> MarketReading;

    /// News sentiment about `topic`.
    fn news(&self, topic: &str) -> NewsReading;

    /// The three readings attached to a decision.
    fn read(&self) -> ExternalFactors {
        ExternalFactors {
            weather: self.weather(DEFAULT_LOCATION),
            market: self.market(DEFAULT_COMMODITY),
            news: self.news(DEFAULT_TOPIC),
        }
    }
}

/// Build a market reading from a price change against the base price.
pub fn market_from_delta(commodity: &str, delta: f64) -> MarketReading {
    let trend = MarketTrend::from_delta(delta);
    MarketReading {
        commodity: commodity.to_string(),
        current_price: ((BASE_PRICE + delta) * 100.0).round() / 100.0,
        trend,
        volatility: delta.abs(),
        recommendation: trend.recommendation().to_string(),
    }
}

/// Randomly generated readings.
///
/// - weather: uniform condition, 10-49 °C, wind 0-29
/// - market: price 100 ± 10
/// - news: uniform sentiment, confidence 60-99
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSignals;

impl SignalSource for RandomSignals {
    fn weather(&self, location: &str) -> WeatherReading {
        let mut rng = rand::thread_rng();
        let conditions = WeatherCondition::VARIANTS;
        let condition = conditions[rng.gen_range(0..conditions.len())];
        WeatherReading::new(
            location,
            condition,
            rng.gen_range(10..50),
            rng.gen_range(0..30),
        )
    }

    fn market(&self, commodity: &str) -> MarketReading {
        let delta = rand::thread_rng().gen_range(-10.0..10.0);
        market_from_delta(commodity, delta)
    }

    fn news(&self, topic: &str) -> NewsReading {
        let mut rng = rand::thread_rng();
        let sentiments = Sentiment::VARIANTS;
        let sentiment = sentiments[rng.gen_range(0..sentiments.len())];
        let headlines = sentiment.headlines();
        NewsReading {
            topic: topic.to_string(),
            sentiment,
            confidence: rng.gen_range(60..100),
            headline: headlines[rng.gen_range(0..headlines.len())].to_string(),
            impact: sentiment.impact().to_string(),
        }
    }
}

/// Readings that never change.
///
/// The default is calm: clear weather, a stable market and positive news.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSignals {
    factors: ExternalFactors,
}

impl FixedSignals {
    /// Always return `factors`.
    pub fn new(factors: ExternalFactors) -> Self {
        Self { factors }
    }
}

impl Default for FixedSignals {
    fn default() -> Self {
        let sentiment = Sentiment::Positive;
        Self::new(ExternalFactors {
            weather: WeatherReading::new(DEFAULT_LOCATION, WeatherCondition::Clear, 22, 8),
            market: MarketReading {
                commodity: DEFAULT_COMMODITY.to_string(),
                current_price: BASE_PRICE,
                trend: MarketTrend::Stable,
                volatility: 3.2,
                recommendation: MarketTrend::Stable.recommendation().to_string(),
            },
            news: NewsReading {
                topic: DEFAULT_TOPIC.to_string(),
                sentiment,
                confidence: 85,
                headline: sentiment.headlines()[0].to_string(),
                impact: sentiment.impact().to_string(),
            },
        })
    }
}

impl SignalSource for FixedSignals {
    fn weather(&self, location: &str) -> WeatherReading {
        WeatherReading {
            location: location.to_string(),
            ..self.factors.weather.clone()
        }
    }

    fn market(&self, commodity: &str) -> MarketReading {
        MarketReading {
            commodity: commodity.to_string(),
            ..self.factors.market.clone()
        }
    }

    fn news(&self, topic: &str) -> NewsReading {
        NewsReading {
            topic: topic.to_string(),
            ..self.factors.news.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::RiskLevel;

    #[test]
    fn random_readings_stay_in_range() {
        let source = RandomSignals;
        for _ in 0..200 {
            let factors = source.read();

            assert!((10..50).contains(&factors.weather.temperature));
            assert!((0..30).contains(&factors.weather.wind_speed));
            assert_eq!(factors.weather.risk_level, factors.weather.condition.risk_level());

            assert!((90.0..=110.0).contains(&factors.market.current_price));
            assert!(factors.market.volatility < 10.0);

            assert!((60..100).contains(&factors.news.confidence));
            assert!(
                factors
                    .news
                    .sentiment
                    .headlines()
                    .contains(&factors.news.headline.as_str())
            );
        }
    }

    #[test]
    fn market_reading_follows_delta() {
        let up = market_from_delta("steel", 6.456);
        assert_eq!(up.current_price, 106.46);
        assert_eq!(up.trend, MarketTrend::Rising);
        assert_eq!(up.recommendation, "Monitor costs closely");

        let down = market_from_delta("steel", -7.0);
        assert_eq!(down.trend, MarketTrend::Falling);
        assert_eq!(down.volatility, 7.0);
        assert_eq!(down.recommendation, "Consider increasing inventory");
    }

    #[test]
    fn fixed_readings_are_stable() {
        let source = FixedSignals::default();
        assert_eq!(source.read(), source.read());
        assert_eq!(source.read().weather.risk_level, RiskLevel::Low);
        assert_eq!(source.weather("Leeds").location, "Leeds");
    }
}
