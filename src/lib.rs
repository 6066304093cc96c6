#![cfg_attr(feature = "bench", feature(test))]

#[cfg(feature = "bench")]
extern crate test;

pub mod utils;
pub mod error;
pub mod crypto;
pub mod network;
pub mod address;
pub mod subaddress;
pub mod keys;
pub mod seed;
pub mod account;
pub mod factory;

#[cfg(test)]
mod fixtures;

pub use utils::AccountResult;
pub use error::{Error, ErrorKind};
pub use crypto::{SecretKey, PublicKey, parse_secret_key};
pub use network::{NetworkType, AddressKind};
pub use address::{AccountAddress, AddressInfo, PaymentId};
pub use subaddress::{SubaddressIndex, SubaddressRegistry, RegistryEntry,
                     RegistryConfig};
pub use keys::{KeyBundle, KeyMaterial, Secrets};
pub use seed::Seed;
pub use account::{Account, AccountInfo, AddressType, PrimaryAccount,
                  SubaddressAccount};
pub use factory::AccountSource;
