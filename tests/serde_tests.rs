#![cfg(feature = "serde")]

//! Integration tests for serde support in verity.
//!
//! These tests verify that configuration and status types serialize and
//! deserialize with serde_json.

use rstest::rstest;
use verity::Comparison;

// =============================================================================
// Comparison
// =============================================================================

#[rstest]
#[case(Comparison::LessThan, "\"LessThan\"")]
#[case(Comparison::Equal, "\"Equal\"")]
#[case(Comparison::GreaterThan, "\"GreaterThan\"")]
fn test_comparison_json(#[case] comparison: Comparison, #[case] json: &str) {
    assert_eq!(serde_json::to_string(&comparison).unwrap(), json);
    assert_eq!(serde_json::from_str::<Comparison>(json).unwrap(), comparison);
}

// =============================================================================
// RegistryOptions
// =============================================================================

#[cfg(feature = "compare")]
#[rstest]
fn test_registry_options_missing_fields_default_to_enabled() {
    use verity::compare::{ComparisonRegistry, RegistryOptions};

    let options: RegistryOptions = serde_json::from_str(r#"{"ordering_defaults": false}"#).unwrap();
    assert!(options.equality_defaults);
    assert!(!options.ordering_defaults);

    let registry = ComparisonRegistry::with_options(options);
    assert!(registry.are_equal(&1_u8, &1_i32));
    assert!(registry.compare(&1_u8, &2_i32).is_err());
}

#[cfg(feature = "compare")]
#[rstest]
fn test_registry_options_json_roundtrip() {
    use verity::compare::RegistryOptions;

    let options = RegistryOptions::empty();
    let json = serde_json::to_string(&options).unwrap();
    let restored: RegistryOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, options);
}

// =============================================================================
// LazyStatus
// =============================================================================

#[cfg(feature = "control")]
#[rstest]
fn test_lazy_status_json() {
    use verity::control::{LazyResult, LazyStatus};

    let status = LazyResult::value(1).status();
    let json = serde_json::to_string(&status).unwrap();
    assert_eq!(json, "\"Value\"");
    assert_eq!(serde_json::from_str::<LazyStatus>(&json).unwrap(), LazyStatus::Value);
}
