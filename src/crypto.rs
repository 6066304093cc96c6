//! Key primitives over Ed25519: secret and public key types, hex codec,
//! point validation and the CryptoNote subaddress derivation.
//!
//! A secret key is a canonical little-endian scalar modulo the group order
//! `l = 2^252 + 27742317777372353535851937790883648493`, and a public key is a
//! compressed Edwards point (`y` with the sign of `x` in the top bit). For a
//! subaddress `(i, j)` of a wallet with view secret `a` and public spend key
//! `B`:
//!
//! `m = Hs("SubAddr\0" || a || i || j)`, `D = B + m G`, `C = a D`
//!
//! where `i` and `j` are little-endian `u32` and `Hs` is Keccak-256 reduced
//! modulo `l`. `D` and `C` are the subaddress public spend and view keys.
//! Index `(0, 0)` is the primary address itself, so it maps to `B` and the
//! primary public view key.

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

use crate::validate;
use crate::utils::*;
use crate::error::{Error, ErrorKind};
use crate::subaddress::SubaddressIndex;


/// Domain separator of the subaddress derivation hash.
const SUBADDRESS_PREFIX: &[u8] = b"SubAddr\0";


/// Secret 32-byte scalar. The bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);


impl SecretKey {
    /// Create a secret key from bytes. The bytes must be a canonical scalar.
    pub fn from_bytes(bytes: [u8; 32]) -> AccountResult<Self> {
        let canonical: Option<Scalar> = Scalar::from_canonical_bytes(bytes)
            .into();
        validate!(canonical.is_some(), MalformedKey,
                  "secret key is not a canonical scalar")?;
        Ok(Self(bytes))
    }

    /// Parse a secret key from 64 hex characters.
    pub fn from_hex(s: &str) -> AccountResult<Self> {
        let bytes = hex_to_bytes32(s)?;
        Self::from_bytes(bytes).map_err(|_| Error::new(
            ErrorKind::MalformedKey,
            format!("cannot parse secret key: {}", s)
        ))
    }

    /// Create a secret key by reducing arbitrary 32 bytes modulo the order.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self(Scalar::from_bytes_mod_order(*bytes).to_bytes())
    }

    /// Generate a random secret key.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut wide = [0u8; 64];
        rng.fill(&mut wide[..]);
        let key = Self(Scalar::from_bytes_mod_order_wide(&wide).to_bytes());
        wide.zeroize();
        key
    }

    /// Raw bytes of the key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the corresponding public key `k G`.
    pub fn public_key(&self) -> PublicKey {
        let point = &self.scalar() * ED25519_BASEPOINT_TABLE;
        PublicKey::from_point(&point)
    }

    pub(crate) fn scalar(&self) -> Scalar {
        Scalar::from_bytes_mod_order(self.0)
    }
}


impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}


/// Compressed Edwards point. Any 32 bytes are accepted on construction,
/// well-formedness is checked separately with `is_valid`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 32]);


impl PublicKey {
    /// Create a public key from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a public key from 64 hex characters.
    pub fn from_hex(s: &str) -> AccountResult<Self> {
        Ok(Self(hex_to_bytes32(s)?))
    }

    /// Raw bytes of the key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check that the bytes are a canonical encoding of a curve point.
    pub fn is_valid(&self) -> bool {
        self.point().is_some()
    }

    /// Canonically encoded points only, the same rule the address codec
    /// applies.
    pub(crate) fn point(&self) -> Option<EdwardsPoint> {
        CompressedEdwardsY(self.0).decompress()
            .filter(|point| point.compress().to_bytes() == self.0)
    }

    pub(crate) fn from_point(point: &EdwardsPoint) -> Self {
        Self(point.compress().to_bytes())
    }
}


impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}


impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}


impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S)
            -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}


impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D)
            -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}


/// Parse a secret key supplied as hex. This is the only key parsing step
/// that fails hard: callers run it before handing keys to the factory.
pub fn parse_secret_key(s: &str) -> AccountResult<SecretKey> {
    SecretKey::from_hex(s)
}


/// Well-formedness check of a public key (on-curve point).
pub fn validate_public_key(key: &PublicKey) -> bool {
    key.is_valid()
}


/// Public spend key of the subaddress `index`, derived from the view secret
/// and the primary public spend key.
pub fn derive_subaddress_public_spend_key(view_secret: &SecretKey,
                                          index: &SubaddressIndex,
                                          base_spend_key: &PublicKey)
        -> AccountResult<PublicKey> {
    let deriver = SubaddressDeriver::new(view_secret, base_spend_key)?;
    Ok(deriver.spend_key(index))
}


/// Derivation context for one wallet. It keeps the decompressed primary spend
/// point so bulk derivation does not decompress it again for every index.
pub struct SubaddressDeriver {
    view_secret: SecretKey,
    base_key: PublicKey,
    base_point: EdwardsPoint,
}


impl SubaddressDeriver {
    /// Create a deriver. Fails with `MalformedKey` if the spend key is not a
    /// point on the curve.
    pub fn new(view_secret: &SecretKey, base_spend_key: &PublicKey)
            -> AccountResult<Self> {
        let base_point = base_spend_key.point().ok_or_else(|| Error::new(
            ErrorKind::MalformedKey,
            format!("public spend key is not a curve point: {}",
                    base_spend_key)
        ))?;
        Ok(Self {
            view_secret: view_secret.clone(),
            base_key: *base_spend_key,
            base_point,
        })
    }

    /// Scalar `m` of the subaddress `index`.
    pub fn offset(&self, index: &SubaddressIndex) -> Scalar {
        let mut hasher_input = [0u8; 48];
        hasher_input[..8].copy_from_slice(SUBADDRESS_PREFIX);
        hasher_input[8..40].copy_from_slice(self.view_secret.as_bytes());
        hasher_input[40..44].copy_from_slice(&index.major.to_le_bytes());
        hasher_input[44..].copy_from_slice(&index.minor.to_le_bytes());
        let m = hash_to_scalar(&hasher_input);
        hasher_input.zeroize();
        m
    }

    /// Public spend key `D` of the subaddress `index`.
    pub fn spend_key(&self, index: &SubaddressIndex) -> PublicKey {
        if index.is_primary() {
            return self.base_key;
        }
        PublicKey::from_point(&self.spend_point(index))
    }

    /// Public spend and view keys `(D, C)` of the subaddress `index`.
    /// Primary index returns the base spend key and `a G`.
    pub fn keys(&self, index: &SubaddressIndex) -> (PublicKey, PublicKey) {
        if index.is_primary() {
            return (self.base_key, self.view_secret.public_key());
        }
        let spend = self.spend_point(index);
        let view = self.view_secret.scalar() * spend;
        (PublicKey::from_point(&spend), PublicKey::from_point(&view))
    }

    fn spend_point(&self, index: &SubaddressIndex) -> EdwardsPoint {
        let m = self.offset(index);
        self.base_point + (&m * ED25519_BASEPOINT_TABLE)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_public_from_secret() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let spend = parse_secret_key(SPEND_SECRET).unwrap();

        assert_eq!(view.public_key().to_hex(), VIEW_PUBLIC);
        assert_eq!(spend.public_key().to_hex(), SPEND_PUBLIC);
    }

    #[test]
    fn test_known_wallet_view_key() {
        // Published view key of the Monero general fund address
        let view = parse_secret_key(
            "f359631075708155cc3d92a32b75a7d02a5dcf27756707b47a2b31b21c389501"
        ).unwrap();

        assert_eq!(view.public_key(), donation_view_public());
    }

    #[test]
    fn test_parse_secret_key_malformed() {
        // Wrong length
        let err = parse_secret_key("28e1ffa41384a6bc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedKey);

        // Not hex
        let err = parse_secret_key(&"xy".repeat(32)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedKey);

        // Not a canonical scalar
        let err = parse_secret_key(&"ff".repeat(32)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedKey);
        assert!(err.to_string().contains("cannot parse secret key"));
    }

    #[test]
    fn test_secret_key_hex() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        assert_eq!(view.to_hex(), VIEW_SECRET);
        assert_eq!(format!("{:?}", view), "SecretKey(..)");
    }

    #[test]
    fn test_random_secret_is_canonical() {
        let mut rng = rand::rng();
        for _ in 0..8 {
            let key = SecretKey::random(&mut rng);
            let reparsed = SecretKey::from_bytes(*key.as_bytes()).unwrap();
            assert_eq!(reparsed, key);
            assert!(key.public_key().is_valid());
        }
    }

    #[test]
    fn test_validate_public_key() {
        assert!(validate_public_key(&PublicKey::from_hex(SPEND_PUBLIC)
            .unwrap()));
        assert!(!validate_public_key(&PublicKey::from_hex(INVALID_POINT)
            .unwrap()));

        // Identity with an unreduced y and with a negative zero x
        let unreduced = format!("ee{}7f", "ff".repeat(30));
        assert!(!validate_public_key(&PublicKey::from_hex(&unreduced)
            .unwrap()));
        let negative_zero = format!("01{}80", "00".repeat(30));
        assert!(!validate_public_key(&PublicKey::from_hex(&negative_zero)
            .unwrap()));
    }

    #[test]
    fn test_public_key_serde() {
        let key = PublicKey::from_hex(SPEND_PUBLIC).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", SPEND_PUBLIC));

        let key2: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key2, key);

        assert!(serde_json::from_str::<PublicKey>("\"abc\"").is_err());
    }

    #[test]
    fn test_derive_subaddress_golden() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let base = PublicKey::from_hex(SPEND_PUBLIC).unwrap();

        let key = derive_subaddress_public_spend_key(
            &view, &SubaddressIndex::new(1, 5), &base
        ).unwrap();
        assert_eq!(key.to_hex(), SUB_1_5_SPEND);

        let key = derive_subaddress_public_spend_key(
            &view, &SubaddressIndex::new(0, 1), &base
        ).unwrap();
        assert_eq!(key.to_hex(), SUB_0_1_SPEND);
    }

    #[test]
    fn test_derive_subaddress_view_key() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let base = PublicKey::from_hex(SPEND_PUBLIC).unwrap();
        let deriver = SubaddressDeriver::new(&view, &base).unwrap();

        let (spend, view_pub) = deriver.keys(&SubaddressIndex::new(49, 199));
        assert_eq!(spend.to_hex(), SUB_49_199_SPEND);
        assert_eq!(view_pub.to_hex(), SUB_49_199_VIEW);
    }

    #[test]
    fn test_derive_primary_index_degenerates() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let base = PublicKey::from_hex(SPEND_PUBLIC).unwrap();
        let deriver = SubaddressDeriver::new(&view, &base).unwrap();

        let (spend, view_pub) = deriver.keys(&SubaddressIndex::primary());
        assert_eq!(spend, base);
        assert_eq!(view_pub.to_hex(), VIEW_PUBLIC);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let base = PublicKey::from_hex(SPEND_PUBLIC).unwrap();
        let index = SubaddressIndex::new(3, 17);

        let k1 = derive_subaddress_public_spend_key(&view, &index, &base)
            .unwrap();
        let k2 = derive_subaddress_public_spend_key(&view, &index, &base)
            .unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_derive_with_invalid_base() {
        let view = parse_secret_key(VIEW_SECRET).unwrap();
        let base = PublicKey::from_hex(INVALID_POINT).unwrap();

        let err = derive_subaddress_public_spend_key(
            &view, &SubaddressIndex::new(0, 1), &base
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedKey);
    }
}
