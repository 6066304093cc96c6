use std::sync::OnceLock;

use crate::utils::*;
use crate::error::{Error, ErrorKind};
use crate::address::AccountAddress;
use crate::crypto::{SecretKey, parse_secret_key};


/// Address together with the secrets needed to operate on it: the view
/// secret always, the spend secret only for spending accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBundle {
    pub address: AccountAddress,
    pub view_secret: SecretKey,
    pub spend_secret: Option<SecretKey>,
}


impl KeyBundle {
    /// Create a new bundle.
    pub fn new(address: &AccountAddress, view_secret: &SecretKey,
               spend_secret: Option<&SecretKey>) -> Self {
        Self {
            address: *address,
            view_secret: view_secret.clone(),
            spend_secret: spend_secret.cloned(),
        }
    }

    /// Check if the bundle can authorize spending.
    pub fn can_spend(&self) -> bool {
        self.spend_secret.is_some()
    }
}


/// Secrets handed to the account factory.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub view: Option<SecretKey>,
    pub spend: Option<SecretKey>,
}


impl Secrets {
    /// No secrets: the account only knows its public address.
    pub fn none() -> Self {
        Self::default()
    }

    /// View secret only: the account can scan but not spend.
    pub fn view_only(view: SecretKey) -> Self {
        Self { view: Some(view), spend: None }
    }

    /// Both secrets.
    pub fn full(view: SecretKey, spend: SecretKey) -> Self {
        Self { view: Some(view), spend: Some(spend) }
    }

    /// Parse secrets from hex. Empty string means the secret is absent, any
    /// other malformed input fails with `MalformedKey`.
    pub fn from_hex(view: &str, spend: &str) -> AccountResult<Self> {
        let parse = |s: &str| {
            if s.is_empty() {
                Ok(None)
            } else {
                parse_secret_key(s).map(Some)
            }
        };
        Ok(Self { view: parse(view)?, spend: parse(spend)? })
    }
}


/// Address and optional secrets of an account plus the key bundle built from
/// them on first request. The bundle slot is the only part that changes
/// after construction, and it is written at most once.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    address: AccountAddress,
    view_secret: Option<SecretKey>,
    spend_secret: Option<SecretKey>,
    bundle: OnceLock<KeyBundle>,
}


impl KeyMaterial {
    /// Create key material for `address` from optional secrets.
    pub fn new(address: AccountAddress, view_secret: Option<SecretKey>,
               spend_secret: Option<SecretKey>) -> Self {
        Self { address, view_secret, spend_secret, bundle: OnceLock::new() }
    }

    /// Address the bundle is built for.
    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// View secret, if known.
    pub fn view_secret(&self) -> Option<&SecretKey> {
        self.view_secret.as_ref()
    }

    /// Spend secret, if known.
    pub fn spend_secret(&self) -> Option<&SecretKey> {
        self.spend_secret.as_ref()
    }

    /// View secret as hex, empty if absent.
    pub fn view_secret_hex(&self) -> String {
        self.view_secret.as_ref().map(SecretKey::to_hex).unwrap_or_default()
    }

    /// Spend secret as hex, empty if absent.
    pub fn spend_secret_hex(&self) -> String {
        self.spend_secret.as_ref().map(SecretKey::to_hex).unwrap_or_default()
    }

    /// Key bundle of the address. Computed on the first call, including
    /// concurrent first calls, and returned from the cache afterwards.
    /// Fails with `InvalidKeyState` if there is no view secret.
    pub fn bundle(&self) -> AccountResult<&KeyBundle> {
        self.bundle_with(KeyBundle::new)
    }

    /// Check if the bundle has already been built.
    pub fn is_bundle_ready(&self) -> bool {
        self.bundle.get().is_some()
    }

    pub(crate) fn bundle_with<F>(&self, build: F) -> AccountResult<&KeyBundle>
            where F: FnOnce(&AccountAddress, &SecretKey, Option<&SecretKey>)
                            -> KeyBundle {
        let view_secret = self.view_secret.as_ref().ok_or_else(|| Error::new(
            ErrorKind::InvalidKeyState,
            "key bundle requires a view secret".to_string()
        ))?;
        Ok(self.bundle.get_or_init(|| {
            build(&self.address, view_secret, self.spend_secret.as_ref())
        }))
    }
}
