use depot_core::{RiskLevel, Settings};
use serde_json::json;

#[test]
fn defaults_match_documented_values() {
    let settings = Settings::default();
    let enabled: Vec<(&str, bool)> = settings
        .preferences
        .iter()
        .map(|p| (p.id.as_str(), p.enabled))
        .collect();
    assert_eq!(
        enabled,
        vec![
            ("weather", true),
            ("market", true),
            ("news", false),
            ("location", true)
        ]
    );

    let ai = &settings.ai_settings;
    assert!(ai.use_weather_data);
    assert!(ai.use_market_data);
    assert!(!ai.use_news_data);
    assert!(ai.use_trading_data);
    assert_eq!(ai.custom_instructions, "");
    assert_eq!(ai.risk_tolerance, RiskLevel::Medium);
    assert_eq!(ai.decision_frequency, 30);
}

#[test]
fn serializes_in_camel_case() -> anyhow::Result<()> {
    let value = serde_json::to_value(Settings::default())?;
    assert_eq!(value["aiSettings"]["riskTolerance"], "medium");
    assert_eq!(value["aiSettings"]["decisionFrequency"], 30);
    assert_eq!(value["preferences"][2], json!({"id": "news", "enabled": false}));
    Ok(())
}

#[test]
fn missing_sections_fall_back_to_defaults() -> anyhow::Result<()> {
    let settings: Settings = serde_json::from_value(json!({
        "preferences": [{"id": "weather", "enabled": false}]
    }))?;
    assert_eq!(settings.preferences.len(), 1);
    assert!(!settings.preferences[0].enabled);
    assert_eq!(settings.ai_settings, Settings::default().ai_settings);
    Ok(())
}

#[test]
fn out_of_range_frequency_is_kept() -> anyhow::Result<()> {
    let settings: Settings = serde_json::from_value(json!({
        "aiSettings": {"decisionFrequency": 99999, "riskTolerance": "high"}
    }))?;
    assert_eq!(settings.ai_settings.decision_frequency, 99999);
    assert_eq!(settings.ai_settings.risk_tolerance, RiskLevel::High);
    Ok(())
}

#[test]
fn unknown_risk_tolerance_is_rejected() {
    let parsed: Result<Settings, _> = serde_json::from_value(json!({
        "aiSettings": {"riskTolerance": "extreme"}
    }));
    assert!(parsed.is_err());
}
