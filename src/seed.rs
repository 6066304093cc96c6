use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::utils::*;
use crate::keys::Secrets;
use crate::crypto::SecretKey;


/// 256-bit wallet seed. The spend secret is the seed reduced modulo the group
/// order and the view secret is `Hs(spend secret)`, so the seed alone
/// restores both keys.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 32]);


impl Seed {
    /// Generate a random seed.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        rng.random()
    }

    /// Create seed from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create seed from 64 hex characters.
    pub fn from_hex(s: &str) -> AccountResult<Self> {
        Ok(Self(hex_to_bytes32(s)?))
    }

    /// Raw bytes of the seed.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Get the spend secret.
    pub fn spend_secret(&self) -> SecretKey {
        SecretKey::from_bytes_reduced(&self.0)
    }

    /// Get the view secret.
    pub fn view_secret(&self) -> SecretKey {
        let spend = self.spend_secret();
        let mut hash = keccak256(spend.as_bytes());
        let view = SecretKey::from_bytes_reduced(&hash);
        hash.zeroize();
        view
    }

    /// Both secrets, ready for the account factory.
    pub fn secrets(&self) -> Secrets {
        Secrets::full(self.view_secret(), self.spend_secret())
    }
}


impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Seed(..)")
    }
}


impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        Seed(rng.random())
    }
}
