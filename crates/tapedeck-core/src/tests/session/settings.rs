use crate::{CoreError, SessionSettings};

use std::time::Duration;

/// WHAT: Default settings are usable as-is
/// WHY: A machine built from defaults must never hit a validation error
#[test]
fn given_default_settings_when_validating_then_ok() {
    assert!(SessionSettings::default().validate().is_ok());
}

/// WHAT: Zero durations, zero bins and empty encoding lists are rejected
/// WHY: A zero tick would spin the clock, zero bins would render nothing
#[test]
fn given_unusable_settings_when_validating_then_invalid_settings() {
    // Given: One broken field per case
    let cases = [
        SessionSettings {
            max_duration: Duration::ZERO,
            ..SessionSettings::default()
        },
        SessionSettings {
            tick_interval: Duration::ZERO,
            ..SessionSettings::default()
        },
        SessionSettings {
            encodings: Vec::new(),
            ..SessionSettings::default()
        },
        SessionSettings {
            spectrum_bins: 0,
            ..SessionSettings::default()
        },
    ];

    for settings in cases {
        // When: Validating
        let result = settings.validate();

        // Then: InvalidSettings
        assert!(matches!(result, Err(CoreError::InvalidSettings { .. })));
    }
}
