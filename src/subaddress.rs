use std::fmt;
use std::collections::HashMap;

use serde::{Serialize, Deserialize};
use tracing::{debug, trace, warn};

use crate::validate;
use crate::utils::*;
use crate::error::{Error, ErrorKind};
use crate::crypto::{PublicKey, SubaddressDeriver};


/// Position of a subaddress: `major` is the account index and `minor` the
/// address index inside the account. `(0, 0)` is the primary address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
         Serialize, Deserialize)]
pub struct SubaddressIndex {
    pub major: u32,
    pub minor: u32,
}


impl SubaddressIndex {
    /// Create a new index.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Index of the primary address.
    pub fn primary() -> Self {
        Self::new(0, 0)
    }

    /// Check if this is the primary address index.
    pub fn is_primary(&self) -> bool {
        self.major == 0 && self.minor == 0
    }
}


impl fmt::Display for SubaddressIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.major, self.minor)
    }
}


impl From<(u32, u32)> for SubaddressIndex {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}


/// Stored registry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub public_key: PublicKey,
    pub index: SubaddressIndex,
}


/// Largest number of index pairs a config loaded from JSON may cover.
pub const MAX_REGISTRY_SIZE: usize = 1 << 24;


/// Bounds of the bulk precomputation of subaddress keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Account indices `0..max_account_id` are populated.
    #[serde(default = "default_max_account_id")]
    pub max_account_id: u32,

    /// Address indices `0..max_address_id` are populated in every account.
    #[serde(default = "default_max_address_id")]
    pub max_address_id: u32,
}


fn default_max_account_id() -> u32 {
    50
}


fn default_max_address_id() -> u32 {
    200
}


impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_account_id: default_max_account_id(),
            max_address_id: default_max_address_id(),
        }
    }
}


impl RegistryConfig {
    /// Create a config with explicit bounds.
    pub fn new(max_account_id: u32, max_address_id: u32) -> Self {
        Self { max_account_id, max_address_id }
    }

    /// Load a config from JSON. Missing fields take the defaults, bounds
    /// covering more than `MAX_REGISTRY_SIZE` pairs are rejected.
    pub fn from_json(s: &str) -> AccountResult<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| Error::new(
            ErrorKind::Other, format!("cannot parse registry config: {}", e)
        ))?;
        validate!(config.total() <= MAX_REGISTRY_SIZE, Other,
                  "registry config covers {}x{} indices, limit is {}",
                  config.max_account_id, config.max_address_id,
                  MAX_REGISTRY_SIZE)?;
        Ok(config)
    }

    /// Number of index pairs covered by the bounds, saturating at
    /// `usize::MAX`.
    pub fn total(&self) -> usize {
        (self.max_account_id as usize)
            .saturating_mul(self.max_address_id as usize)
    }

    /// Iterate over the covered indices, account by account.
    pub fn indices(&self) -> impl Iterator<Item = SubaddressIndex> + use<> {
        let max_address_id = self.max_address_id;
        (0..self.max_account_id).flat_map(move |major| {
            (0..max_address_id).map(move |minor| {
                SubaddressIndex::new(major, minor)
            })
        })
    }
}


/// Cache that maps public spend keys of derived subaddresses back to their
/// indices. It is append-only and always keeps the primary spend key at
/// `(0, 0)`. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct SubaddressRegistry {
    entries: HashMap<PublicKey, SubaddressIndex>,
    order: Vec<PublicKey>,
}


impl SubaddressRegistry {
    /// Create a registry seeded with the primary spend key.
    pub fn new(primary_spend_key: PublicKey) -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
            order: Vec::new(),
        };
        registry.insert(primary_spend_key, SubaddressIndex::primary());
        registry
    }

    /// Store a key. Storing the same key again is a no-op apart from the
    /// index value, which derivation makes identical anyway.
    pub fn insert(&mut self, public_key: PublicKey, index: SubaddressIndex)
            -> RegistryEntry {
        match self.entries.insert(public_key, index) {
            None => {
                trace!(%public_key, %index, "registered subaddress key");
                self.order.push(public_key);
            },
            Some(previous) if previous != index => {
                warn!(%public_key, %previous, %index,
                      "subaddress key re-registered under another index");
            },
            Some(_) => {},
        }
        RegistryEntry { public_key, index }
    }

    /// Derive the spend key of `index` and store it.
    pub fn register(&mut self, deriver: &SubaddressDeriver,
                    index: SubaddressIndex) -> RegistryEntry {
        let public_key = deriver.spend_key(&index);
        self.insert(public_key, index)
    }

    /// Derive and store all indices covered by `config`.
    pub fn populate(&mut self, deriver: &SubaddressDeriver,
                    config: &RegistryConfig) {
        debug!(max_account_id = config.max_account_id,
               max_address_id = config.max_address_id,
               "populating subaddress registry");
        for index in config.indices() {
            self.register(deriver, index);
        }
        debug!(entries = self.len(), "subaddress registry populated");
    }

    /// Reverse lookup. `None` means the key has not been derived yet.
    pub fn find(&self, public_key: &PublicKey) -> Option<SubaddressIndex> {
        self.entries.get(public_key).copied()
    }

    /// Check if the key is registered.
    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.entries.contains_key(public_key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: the primary key is never removed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(public key, index)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PublicKey, &SubaddressIndex)> {
        self.order.iter().map(|key| (key, &self.entries[key]))
    }

    /// Copy all entries out in insertion order.
    pub fn export(&self) -> Vec<RegistryEntry> {
        self.iter()
            .map(|(public_key, index)| RegistryEntry {
                public_key: *public_key, index: *index
            })
            .collect()
    }
}


impl<'a> IntoIterator for &'a SubaddressRegistry {
    type Item = (&'a PublicKey, &'a SubaddressIndex);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
