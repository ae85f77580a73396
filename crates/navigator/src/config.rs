//! Conversion policy.
//!
//! The policy decides whether a collection coercion aborts on the first
//! unconvertible entry or drops it, and whether records may render
//! themselves as text. A process-wide instance lives in an `ArcSwap`
//! (lock-free reads, atomic replacement); navigators may carry their own
//! override instead.
//!
//! ```rust
//! use nebula_navigator::ConversionPolicy;
//!
//! let lenient = ConversionPolicy::default()
//!     .with_skip_partial_array_conversion_failures(true);
//! assert!(!lenient.skip_partial_collection_conversion_failures);
//! assert!(lenient.use_custom_text_rendering_hook);
//! ```

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable for [`ConversionPolicy::skip_partial_collection_conversion_failures`]
pub const ENV_SKIP_COLLECTION_FAILURES: &str = "NEBULA_NAV_SKIP_COLLECTION_FAILURES";
/// Environment variable for [`ConversionPolicy::skip_partial_array_conversion_failures`]
pub const ENV_SKIP_ARRAY_FAILURES: &str = "NEBULA_NAV_SKIP_ARRAY_FAILURES";
/// Environment variable for [`ConversionPolicy::use_custom_text_rendering_hook`]
pub const ENV_TEXT_HOOK: &str = "NEBULA_NAV_TEXT_HOOK";

static GLOBAL_POLICY: LazyLock<ArcSwap<ConversionPolicy>> =
    LazyLock::new(|| ArcSwap::from_pointee(ConversionPolicy::default()));

/// Errors reading a policy from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("{var} must be one of true/false/1/0, got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

/// Coercion policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionPolicy {
    /// Drop unconvertible keys/values of keyed-collection targets instead of failing
    pub skip_partial_collection_conversion_failures: bool,
    /// Drop unconvertible elements of ordered-collection targets instead of failing
    pub skip_partial_array_conversion_failures: bool,
    /// Let records render themselves through their own description
    pub use_custom_text_rendering_hook: bool,
}

impl Default for ConversionPolicy {
    fn default() -> Self {
        Self {
            skip_partial_collection_conversion_failures: false,
            skip_partial_array_conversion_failures: false,
            use_custom_text_rendering_hook: true,
        }
    }
}

impl ConversionPolicy {
    /// Drop failures in both collection shapes
    pub fn lenient() -> Self {
        Self::default()
            .with_skip_partial_collection_conversion_failures(true)
            .with_skip_partial_array_conversion_failures(true)
    }

    pub fn with_skip_partial_collection_conversion_failures(mut self, skip: bool) -> Self {
        self.skip_partial_collection_conversion_failures = skip;
        self
    }

    pub fn with_skip_partial_array_conversion_failures(mut self, skip: bool) -> Self {
        self.skip_partial_array_conversion_failures = skip;
        self
    }

    pub fn with_custom_text_rendering_hook(mut self, enabled: bool) -> Self {
        self.use_custom_text_rendering_hook = enabled;
        self
    }

    /// Defaults overridden by `NEBULA_NAV_*` environment variables
    pub fn from_env() -> Result<Self, PolicyError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PolicyError> {
        let flag = |var: &'static str, default: bool| match lookup(var) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(PolicyError::InvalidFlag { var, value: raw }),
            },
        };
        let defaults = Self::default();
        Ok(Self {
            skip_partial_collection_conversion_failures: flag(
                ENV_SKIP_COLLECTION_FAILURES,
                defaults.skip_partial_collection_conversion_failures,
            )?,
            skip_partial_array_conversion_failures: flag(
                ENV_SKIP_ARRAY_FAILURES,
                defaults.skip_partial_array_conversion_failures,
            )?,
            use_custom_text_rendering_hook: flag(
                ENV_TEXT_HOOK,
                defaults.use_custom_text_rendering_hook,
            )?,
        })
    }

    // ------------------------------------------------------------------------
    // Process-wide instance
    // ------------------------------------------------------------------------

    /// The process-wide policy
    pub fn current() -> Arc<Self> {
        GLOBAL_POLICY.load_full()
    }

    /// Replace the process-wide policy
    ///
    /// Meant to be called once at startup; readers pick up the new value on
    /// their next coercion.
    pub fn install(self) {
        tracing::debug!(policy = ?self, "installing conversion policy");
        GLOBAL_POLICY.store(Arc::new(self));
    }

    /// Restore the default process-wide policy
    pub fn reset() {
        GLOBAL_POLICY.store(Arc::new(Self::default()));
    }
}
