//! Builder for key-exchange configuration.
//!
//! # Presets
//!
//! | Preset | Wrap variant | Typical peer |
//! |--------|--------------|--------------|
//! | `simple()` | Simple export | Default, most interoperable |
//! | `provider_specific()` | CryptoPro diversification | CryptoPro CSP |
//! | `tk26()` | TC 26 export | GOST R 34.10-2012 deployments |
//!
//! # Example
//!
//! ```rust
//! use gost_kex::prelude::*;
//!
//! let magma = OidValue::from(known::MAGMA_KEY_WRAP);
//! let config = ExchangeConfigBuilder::tk26()
//!     .encryption_param_set(magma.clone())
//!     .build();
//!
//! assert_eq!(config.wrap_variant, WrapVariant::Tk26);
//! assert_eq!(config.encryption_param_set, Some(magma));
//! ```

use crate::core::config::ExchangeConfig;
use crate::core::family::WrapVariant;
use crate::core::oid::OidValue;
use crate::core::operations::{KeyExchangeDeformatter, KeyExchangeFormatter};

/// Fluent builder for [`ExchangeConfig`].
///
/// The same configuration must be used on both ends: the wrap variant is
/// not transported.
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfigBuilder {
    wrap_variant: WrapVariant,
    encryption_param_set: Option<OidValue>,
}

impl ExchangeConfigBuilder {
    /// Creates a builder with the simple preset.
    #[must_use]
    pub const fn new() -> Self {
        Self::simple()
    }

    /// Simple export preset.
    #[must_use]
    pub const fn simple() -> Self {
        Self {
            wrap_variant: WrapVariant::Simple,
            encryption_param_set: None,
        }
    }

    /// Provider-specific (CryptoPro) export preset.
    #[must_use]
    pub const fn provider_specific() -> Self {
        Self {
            wrap_variant: WrapVariant::ProviderSpecific,
            encryption_param_set: None,
        }
    }

    /// TC 26 export preset.
    #[must_use]
    pub const fn tk26() -> Self {
        Self {
            wrap_variant: WrapVariant::Tk26,
            encryption_param_set: None,
        }
    }

    /// Sets the wrap variant.
    #[must_use]
    pub fn wrap_variant(mut self, wrap_variant: WrapVariant) -> Self {
        self.wrap_variant = wrap_variant;
        self
    }

    /// Pins the encryption parameter set, overriding the recipient's and
    /// the family default.
    #[must_use]
    pub fn encryption_param_set(mut self, oid: OidValue) -> Self {
        self.encryption_param_set = Some(oid);
        self
    }

    /// Returns the configured wrap variant.
    #[must_use]
    pub const fn get_wrap_variant(&self) -> WrapVariant {
        self.wrap_variant
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ExchangeConfig {
        ExchangeConfig {
            wrap_variant: self.wrap_variant,
            encryption_param_set: self.encryption_param_set,
        }
    }

    /// Builds a formatter over `provider` with this configuration.
    #[must_use]
    pub fn formatter<P: ?Sized>(self, provider: &P) -> KeyExchangeFormatter<'_, P> {
        KeyExchangeFormatter::with_config(provider, self.build())
    }

    /// Builds a deformatter over `provider` with this configuration.
    #[must_use]
    pub fn deformatter<P: ?Sized>(self, provider: &P) -> KeyExchangeDeformatter<'_, P> {
        KeyExchangeDeformatter::with_config(provider, self.build())
    }
}
