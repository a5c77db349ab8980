//! Key-exchange configuration.
//!
//! The configuration holds what both ends must agree on out of band. The
//! wrap variant in particular is never carried on the wire: a recipient
//! configured with another variant than the sender derives a different
//! key-encryption key and fails with `KeyRecoveryFailed`.

use crate::core::family::WrapVariant;
use crate::core::oid::OidValue;
use crate::core::types::KeyExchangeParameters;

/// Settings shared by the formatter and the deformatter.
///
/// # Example
///
/// ```rust
/// use gost_kex::core::config::ExchangeConfig;
/// use gost_kex::core::family::WrapVariant;
///
/// let config = ExchangeConfig::tk26();
/// assert_eq!(config.wrap_variant, WrapVariant::Tk26);
/// assert!(config.encryption_param_set.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Key-derivation variant used by the provider.
    pub wrap_variant: WrapVariant,
    /// Encryption parameter set to announce. When `None`, the recipient's
    /// own encryption parameter set is used, then the family default.
    pub encryption_param_set: Option<OidValue>,
}

impl ExchangeConfig {
    /// Simple export with the default parameter set.
    #[must_use]
    pub const fn simple() -> Self {
        Self {
            wrap_variant: WrapVariant::Simple,
            encryption_param_set: None,
        }
    }

    /// Provider-specific export with the default parameter set.
    #[must_use]
    pub const fn provider_specific() -> Self {
        Self {
            wrap_variant: WrapVariant::ProviderSpecific,
            encryption_param_set: None,
        }
    }

    /// TC 26 export with the default parameter set.
    #[must_use]
    pub const fn tk26() -> Self {
        Self {
            wrap_variant: WrapVariant::Tk26,
            encryption_param_set: None,
        }
    }

    /// Chooses the encryption parameter set to announce to `recipient`.
    ///
    /// Precedence: this configuration, then the recipient's public-key
    /// parameters, then the family default.
    #[must_use]
    pub fn encryption_param_set_for(&self, recipient: &KeyExchangeParameters) -> OidValue {
        self.encryption_param_set
            .as_ref()
            .or_else(|| recipient.params().encryption_param_set())
            .cloned()
            .unwrap_or_else(|| {
                OidValue::from(recipient.family().default_encryption_param_set())
            })
    }
}
