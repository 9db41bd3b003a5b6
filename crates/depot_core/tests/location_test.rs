use depot_core::{LocationInput, DEFAULT_LOCATION_TYPE};
use serde_json::json;

#[test]
fn fills_defaults() -> anyhow::Result<()> {
    let input: LocationInput = serde_json::from_value(json!({
        "name": "Plant 2",
        "address": "44 Mill Lane"
    }))?;
    let location = input.validate()?;
    assert_eq!(location.name, "Plant 2");
    assert_eq!(location.latitude, 0.0);
    assert_eq!(location.longitude, 0.0);
    assert_eq!(location.location_type, DEFAULT_LOCATION_TYPE);
    Ok(())
}

#[test]
fn keeps_supplied_values() -> anyhow::Result<()> {
    let input: LocationInput = serde_json::from_value(json!({
        "name": "Plant 2",
        "address": "44 Mill Lane",
        "latitude": 51.5,
        "longitude": -0.12,
        "type": "factory"
    }))?;
    let location = input.validate()?;
    assert_eq!(location.latitude, 51.5);
    assert_eq!(location.longitude, -0.12);
    assert_eq!(location.location_type, "factory");
    Ok(())
}

#[test]
fn requires_name_and_address() {
    let missing_address = LocationInput {
        name: Some("Plant 2".into()),
        ..Default::default()
    };
    let err = missing_address.validate().unwrap_err();
    assert_eq!(err.message, "Name and address are required");

    let blank_name = LocationInput {
        name: Some("   ".into()),
        address: Some("44 Mill Lane".into()),
        ..Default::default()
    };
    assert!(blank_name.validate().is_err());
}
