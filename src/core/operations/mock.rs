//! Deterministic provider double for unit tests.
//!
//! Agreement is a byte addition, so both sides of an exchange land on the
//! same shared byte. The MAC covers that byte, the variant and the
//! plaintext, which is enough for wrong keys, wrong variants and tampered
//! ciphertext to surface as `MacMismatch`.

use core::cell::Cell;

use zeroize::Zeroizing;

use crate::core::error::{GostResult, ProviderError, UnwrapError};
use crate::core::family::{AlgorithmFamily, WrapVariant};
use crate::core::oid::{known, OidValue};
use crate::core::operations::provider::{
    KeyExchangeProvider, PrivateKeyHandle, SharedKeyProvider, WrappedKey,
};
use crate::core::types::{
    KeyExchangeParameters, PublicKeyParams, PublicKeyValue, ENCRYPTED_KEY_LEN, UKM_LEN,
};

#[derive(Debug)]
pub(crate) struct MockKey {
    family: AlgorithmFamily,
    secret: u8,
}

impl MockKey {
    pub(crate) const fn new(family: AlgorithmFamily, secret: u8) -> Self {
        Self { family, secret }
    }
}

impl PrivateKeyHandle for MockKey {
    fn family(&self) -> AlgorithmFamily {
        self.family
    }
}

#[derive(Debug)]
pub(crate) struct MockProvider {
    calls: Cell<usize>,
    next_secret: Cell<u8>,
    failure: Option<&'static str>,
    ephemeral_len: Option<usize>,
}

impl MockProvider {
    pub(crate) const UKM: [u8; UKM_LEN] = [0x55; UKM_LEN];

    pub(crate) const fn new() -> Self {
        Self {
            calls: Cell::new(0),
            next_secret: Cell::new(0x40),
            failure: None,
            ephemeral_len: None,
        }
    }

    pub(crate) fn failing(message: &'static str) -> Self {
        let mut provider = Self::new();
        provider.failure = Some(message);
        provider
    }

    pub(crate) fn with_ephemeral_len(mut self, len: usize) -> Self {
        self.ephemeral_len = Some(len);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    fn enter(&self) -> Result<(), ProviderError> {
        self.calls.set(self.calls.get() + 1);
        match self.failure {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }
}

const fn variant_tag(variant: WrapVariant) -> u8 {
    match variant {
        WrapVariant::Simple => 0x01,
        WrapVariant::ProviderSpecific => 0x02,
        WrapVariant::Tk26 => 0x03,
    }
}

fn keystream(shared: u8, variant: WrapVariant) -> [u8; ENCRYPTED_KEY_LEN] {
    let mut stream = [0u8; ENCRYPTED_KEY_LEN];
    for (i, byte) in (0u8..).zip(stream.iter_mut()) {
        *byte = shared ^ variant_tag(variant) ^ i.wrapping_mul(31);
    }
    stream
}

fn mac(shared: u8, variant: WrapVariant, plaintext: &[u8]) -> Vec<u8> {
    let sum = plaintext.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    let parity = plaintext.iter().fold(0u8, |acc, &b| acc ^ b);
    vec![sum ^ shared, shared, variant_tag(variant), parity]
}

fn wrap(shared: u8, variant: WrapVariant, plaintext: &[u8], ukm: Vec<u8>) -> WrappedKey {
    let ciphertext = plaintext
        .iter()
        .zip(keystream(shared, variant))
        .map(|(p, k)| p ^ k)
        .collect();
    WrappedKey {
        ciphertext,
        mac: mac(shared, variant, plaintext),
        ukm,
    }
}

fn unwrap(
    shared: u8,
    variant: WrapVariant,
    ciphertext: &[u8; ENCRYPTED_KEY_LEN],
    expected_mac: &[u8],
) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
    let plaintext: Vec<u8> = ciphertext
        .iter()
        .zip(keystream(shared, variant))
        .map(|(c, k)| c ^ k)
        .collect();
    if mac(shared, variant, &plaintext) != expected_mac {
        return Err(UnwrapError::MacMismatch);
    }
    Ok(Zeroizing::new(plaintext))
}

impl KeyExchangeProvider for MockProvider {
    type PrivateKey = MockKey;

    fn generate_ephemeral_keypair(
        &self,
        family: AlgorithmFamily,
        _digest_param_set: &OidValue,
        _public_key_param_set: &OidValue,
    ) -> Result<(MockKey, Vec<u8>), ProviderError> {
        self.enter()?;
        let secret = self.next_secret.get();
        self.next_secret.set(secret.wrapping_add(1));
        let len = self.ephemeral_len.unwrap_or(family.public_key_len());
        Ok((MockKey::new(family, secret), vec![secret; len]))
    }

    fn agree_and_wrap(
        &self,
        private_key: &MockKey,
        public_key: &[u8],
        variant: WrapVariant,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError> {
        self.enter()?;
        let shared = private_key.secret.wrapping_add(public_key[0]);
        Ok(wrap(shared, variant, plaintext, Self::UKM.to_vec()))
    }

    fn agree_and_unwrap(
        &self,
        private_key: &MockKey,
        ephemeral_public_key: &[u8],
        variant: WrapVariant,
        _ukm: &[u8; UKM_LEN],
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        self.enter().map_err(UnwrapError::Provider)?;
        let shared = private_key.secret.wrapping_add(ephemeral_public_key[0]);
        unwrap(shared, variant, ciphertext, mac)
    }
}

impl SharedKeyProvider for MockProvider {
    type SharedKey = u8;

    fn wrap_with_shared_key(
        &self,
        shared_key: &u8,
        variant: WrapVariant,
        _encryption_param_set: &OidValue,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError> {
        self.enter()?;
        Ok(wrap(*shared_key, variant, plaintext, Vec::new()))
    }

    fn unwrap_with_shared_key(
        &self,
        shared_key: &u8,
        variant: WrapVariant,
        _encryption_param_set: &OidValue,
        _ukm: Option<&[u8; UKM_LEN]>,
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        self.enter().map_err(UnwrapError::Provider)?;
        unwrap(*shared_key, variant, ciphertext, mac)
    }
}

/// Recipient parameters and matching private key for `family`.
pub(crate) fn recipient(
    family: AlgorithmFamily,
    secret: u8,
) -> GostResult<(KeyExchangeParameters, MockKey)> {
    let (public_key_set, digest_set) = match family {
        AlgorithmFamily::Gost94 => (
            known::GOST_R3410_94_CRYPTOPRO_XCHA_PARAMSET,
            known::GOST_R3411_94_CRYPTOPRO_PARAMSET,
        ),
        AlgorithmFamily::Gost2001 => (
            known::GOST_R3410_2001_CRYPTOPRO_XCHA_PARAMSET,
            known::GOST_R3411_94_CRYPTOPRO_PARAMSET,
        ),
        AlgorithmFamily::Gost2012_256 => (
            known::GOST_R3410_2012_256_TC26_A_PARAMSET,
            known::GOST_R3411_2012_256,
        ),
        AlgorithmFamily::Gost2012_512 => (
            known::GOST_R3410_2012_512_TC26_A_PARAMSET,
            known::GOST_R3411_2012_512,
        ),
    };
    let params = PublicKeyParams::new(
        OidValue::from(public_key_set),
        OidValue::from(digest_set),
    );
    let public_key = PublicKeyValue::new(family, &vec![secret; family.public_key_len()])?;
    Ok((
        KeyExchangeParameters::new(params, public_key),
        MockKey::new(family, secret),
    ))
}
