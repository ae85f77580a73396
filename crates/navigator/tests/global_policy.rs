//! Process-wide conversion policy.
//!
//! Kept in its own test binary: installing a policy affects every
//! navigator in the process.

use nebula_navigator::{ConversionPolicy, Navigator};
use pretty_assertions::assert_eq;

#[test]
fn test_installed_policy_applies_until_overridden() {
    let items = || Navigator::new(vec!["1", "x", "3"]);
    assert!(items().to_list_i64().is_err());

    ConversionPolicy::default()
        .with_skip_partial_array_conversion_failures(true)
        .install();
    assert!(ConversionPolicy::current().skip_partial_array_conversion_failures);
    assert_eq!(items().to_list_i64().unwrap(), vec![1, 3]);

    let strict = items().with_policy(ConversionPolicy::default());
    assert!(strict.to_list_i64().is_err());

    ConversionPolicy::reset();
    assert_eq!(*ConversionPolicy::current(), ConversionPolicy::default());
    assert!(items().to_list_i64().is_err());
}
