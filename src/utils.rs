use std::hash::Hash;
use std::collections::HashSet;

use sha3::{Keccak256, Digest};
use curve25519_dalek::scalar::Scalar;

use crate::error::{Error, ErrorKind};


/// Result to manage account errors.
pub type AccountResult<T> = Result<T, Error>;


/// Get Keccak-256 hash of a buffer (original Keccak padding, as used by
/// CryptoNote, not the standardized SHA3).
pub fn keccak256(buffer: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(buffer);
    hasher.finalize().into()
}


/// Hash a buffer into a scalar reduced modulo the group order (`Hs`).
pub fn hash_to_scalar(buffer: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(buffer))
}


/// Decode a hex string into exactly 32 bytes. Any failure is reported as
/// `MalformedKey` since 32-byte hex blobs are always keys here.
pub fn hex_to_bytes32(s: &str) -> AccountResult<[u8; 32]> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::new(
        ErrorKind::MalformedKey,
        format!("cannot parse 32-byte hex '{}': {}", s, e)
    ))?;
    Ok(bytes)
}


/// Check unique values.
pub fn check_unique<T: Eq + Hash, I: Iterator<Item = T>>(it: I) -> bool {
    let mut set = HashSet::<T>::new();
    for elem in it {
        if !set.insert(elem) {
            return false;
        }
    }
    true
}
