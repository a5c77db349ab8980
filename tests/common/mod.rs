//! Software provider for integration tests.
//!
//! X25519 stands in for the GOST key agreement: the 32-byte X25519 public
//! key is repeated to the family's public-key length and only the first
//! 32 bytes are used for agreement. The key-encryption key is a BLAKE2b MAC
//! of the wrap-variant label and UKM keyed by the agreed secret, the wrap
//! is ChaCha20, and the MAC is the first four bytes of a BLAKE2b MAC over
//! the plaintext. None of this is GOST; it only gives the formatter and
//! deformatter a provider with real failure modes.

#![allow(dead_code)]

use blake2::digest::consts::U32;
use blake2::digest::{FixedOutput, KeyInit, Update};
use blake2::Blake2bMac;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use gost_kex::core::oid::known;
use gost_kex::core::types::{ENCRYPTED_KEY_LEN, UKM_LEN};
use gost_kex::{
    AlgorithmFamily, GostResult, KeyExchangeParameters, KeyExchangeProvider, OidValue,
    PrivateKeyHandle, ProviderError, PublicKeyParams, PublicKeyValue, SharedKeyProvider,
    UnwrapError, WrapVariant, WrappedKey,
};

type Blake2bMac32 = Blake2bMac<U32>;

const MAC_LEN: usize = 4;

/// Private key held by [`SoftProvider`].
pub struct SoftKey {
    family: AlgorithmFamily,
    secret: StaticSecret,
}

impl SoftKey {
    /// Generates a fresh key for `family`.
    pub fn generate(family: AlgorithmFamily) -> Self {
        Self {
            family,
            secret: StaticSecret::random_from_rng(&mut OsRng),
        }
    }

    /// Returns the public key, padded to the family length.
    pub fn public_key(&self) -> Vec<u8> {
        let public = PublicKey::from(&self.secret).to_bytes();
        public
            .iter()
            .copied()
            .cycle()
            .take(self.family.public_key_len())
            .collect()
    }

    /// Returns the public half as recipient parameters.
    pub fn exchange_parameters(&self) -> GostResult<KeyExchangeParameters> {
        let params = default_params(self.family)?;
        let public_key = PublicKeyValue::new(self.family, &self.public_key())?;
        Ok(KeyExchangeParameters::new(params, public_key))
    }

    fn agree(&self, public_key: &[u8]) -> Result<Zeroizing<[u8; 32]>, ProviderError> {
        let peer: [u8; 32] = public_key
            .get(..32)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or("public key too short")?;
        let shared = self.secret.diffie_hellman(&PublicKey::from(peer));
        Ok(Zeroizing::new(*shared.as_bytes()))
    }
}

impl PrivateKeyHandle for SoftKey {
    fn family(&self) -> AlgorithmFamily {
        self.family
    }
}

/// Typical parameter sets for each family.
pub fn default_params(family: AlgorithmFamily) -> GostResult<PublicKeyParams> {
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
    Ok(PublicKeyParams::new(
        OidValue::from(public_key_set),
        OidValue::from(digest_set),
    ))
}

const fn variant_label(variant: WrapVariant) -> &'static [u8] {
    match variant {
        WrapVariant::Simple => b"gost-kex.simple.",
        WrapVariant::ProviderSpecific => b"gost-kex.provider-specific.",
        WrapVariant::Tk26 => b"gost-kex.tk26.",
    }
}

fn derive_kek(
    secret: &[u8; 32],
    variant: WrapVariant,
    context: &[u8],
    ukm: &[u8],
) -> Result<Zeroizing<[u8; 32]>, ProviderError> {
    let mut mac = <Blake2bMac32 as KeyInit>::new_from_slice(secret)
        .map_err(|_| "invalid key-derivation key")?;
    <Blake2bMac32 as Update>::update(&mut mac, variant_label(variant));
    <Blake2bMac32 as Update>::update(&mut mac, context);
    <Blake2bMac32 as Update>::update(&mut mac, ukm);
    Ok(Zeroizing::new(
        <Blake2bMac32 as FixedOutput>::finalize_fixed(mac).into(),
    ))
}

fn compute_mac(kek: &[u8; 32], plaintext: &[u8]) -> Result<[u8; MAC_LEN], ProviderError> {
    let mut mac =
        <Blake2bMac32 as KeyInit>::new_from_slice(kek).map_err(|_| "invalid MAC key")?;
    <Blake2bMac32 as Update>::update(&mut mac, b"gost-kex.mac.");
    <Blake2bMac32 as Update>::update(&mut mac, plaintext);
    let full: [u8; 32] = <Blake2bMac32 as FixedOutput>::finalize_fixed(mac).into();
    let mut out = [0u8; MAC_LEN];
    out.copy_from_slice(&full[..MAC_LEN]);
    Ok(out)
}

fn apply_keystream(kek: &[u8; 32], data: &mut [u8]) {
    let mut cipher = ChaCha20::new(&(*kek).into(), &[0u8; 12].into());
    cipher.apply_keystream(data);
}

fn seal(kek: &[u8; 32], plaintext: &[u8], ukm: Vec<u8>) -> Result<WrappedKey, ProviderError> {
    let mac = compute_mac(kek, plaintext)?;
    let mut ciphertext = plaintext.to_vec();
    apply_keystream(kek, &mut ciphertext);
    Ok(WrappedKey {
        ciphertext,
        mac: mac.to_vec(),
        ukm,
    })
}

fn open(
    kek: &[u8; 32],
    ciphertext: &[u8; ENCRYPTED_KEY_LEN],
    mac: &[u8],
) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    apply_keystream(kek, &mut plaintext);
    let expected = compute_mac(kek, &plaintext).map_err(UnwrapError::Provider)?;
    if !bool::from(expected.as_slice().ct_eq(mac)) {
        return Err(UnwrapError::MacMismatch);
    }
    Ok(plaintext)
}

fn random_ukm() -> [u8; UKM_LEN] {
    let mut ukm = [0u8; UKM_LEN];
    OsRng.fill_bytes(&mut ukm);
    ukm
}

/// Software provider backed by X25519, BLAKE2b and ChaCha20.
#[derive(Debug, Default)]
pub struct SoftProvider {
    /// When set, shared-key wraps carry a random UKM.
    pub shared_ukm: bool,
}

impl SoftProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared_ukm() -> Self {
        Self { shared_ukm: true }
    }
}

impl KeyExchangeProvider for SoftProvider {
    type PrivateKey = SoftKey;

    fn generate_ephemeral_keypair(
        &self,
        family: AlgorithmFamily,
        _digest_param_set: &OidValue,
        _public_key_param_set: &OidValue,
    ) -> Result<(SoftKey, Vec<u8>), ProviderError> {
        let key = SoftKey::generate(family);
        let public = key.public_key();
        Ok((key, public))
    }

    fn agree_and_wrap(
        &self,
        private_key: &SoftKey,
        public_key: &[u8],
        variant: WrapVariant,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError> {
        let shared = private_key.agree(public_key)?;
        let ukm = random_ukm();
        let kek = derive_kek(&shared, variant, &[], &ukm)?;
        seal(&kek, plaintext, ukm.to_vec())
    }

    fn agree_and_unwrap(
        &self,
        private_key: &SoftKey,
        ephemeral_public_key: &[u8],
        variant: WrapVariant,
        ukm: &[u8; UKM_LEN],
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        let shared = private_key
            .agree(ephemeral_public_key)
            .map_err(UnwrapError::Provider)?;
        let kek = derive_kek(&shared, variant, &[], ukm).map_err(UnwrapError::Provider)?;
        open(&kek, ciphertext, mac)
    }
}

impl SharedKeyProvider for SoftProvider {
    type SharedKey = [u8; 32];

    fn wrap_with_shared_key(
        &self,
        shared_key: &[u8; 32],
        variant: WrapVariant,
        encryption_param_set: &OidValue,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError> {
        let ukm = if self.shared_ukm {
            random_ukm().to_vec()
        } else {
            Vec::new()
        };
        let kek = derive_kek(
            shared_key,
            variant,
            encryption_param_set.as_str().as_bytes(),
            &ukm,
        )?;
        seal(&kek, plaintext, ukm)
    }

    fn unwrap_with_shared_key(
        &self,
        shared_key: &[u8; 32],
        variant: WrapVariant,
        encryption_param_set: &OidValue,
        ukm: Option<&[u8; UKM_LEN]>,
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        let ukm = ukm.map_or(&[][..], |ukm| &ukm[..]);
        let kek = derive_kek(
            shared_key,
            variant,
            encryption_param_set.as_str().as_bytes(),
            ukm,
        )
        .map_err(UnwrapError::Provider)?;
        open(&kek, ciphertext, mac)
    }
}
