//! Named constructors of accounts. Construction never fails: every
//! validation failure yields `Account::Empty`, and the reason is logged at
//! debug level. Hex secrets are parsed by the caller beforehand with
//! `Secrets::from_hex` or `parse_secret_key`, which are the steps that fail
//! hard.

use tracing::debug;

use crate::utils::*;
use crate::seed::Seed;
use crate::keys::{KeyMaterial, Secrets};
use crate::network::{NetworkType, AddressKind};
use crate::subaddress::SubaddressIndex;
use crate::address::{AccountAddress, AddressInfo,
                     detect_network_and_address_type, parse_address};
use crate::account::{Account, AccountBase, PrimaryAccount, SubaddressAccount};


/// Input of `with_index`: one of the two construction paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSource<'a> {
    AddressString(&'a str),
    AddressInfo(NetworkType, AddressInfo),
}


/// The empty sentinel.
pub fn empty() -> Account {
    Account::Empty
}


/// Build an account from an address string. The network and the variant
/// come from the string itself.
pub fn from_address_string(address: &str, secrets: Secrets) -> Account {
    let (network, kind) = detect_network_and_address_type(address);
    if network == NetworkType::Undefined {
        debug!(address, "cannot detect network of address");
        return Account::Empty;
    }

    match kind {
        AddressKind::Regular | AddressKind::Integrated |
        AddressKind::Subaddress => {
            match parse_address(address, network) {
                Ok(info) => from_address_info(network, info, secrets),
                Err(err) => {
                    debug!(address, %err, "cannot parse address");
                    Account::Empty
                },
            }
        },
        AddressKind::Invalid => {
            debug!(address, "invalid address kind");
            Account::Empty
        },
    }
}


/// Build an account from decoded address info. Both public keys must be
/// points on the curve and the network must be defined.
pub fn from_address_info(network: NetworkType, info: AddressInfo,
                         secrets: Secrets) -> Account {
    if network == NetworkType::Undefined {
        debug!("account network is undefined");
        return Account::Empty;
    }
    if !info.address.is_valid() {
        debug!(spend_public_key = %info.address.spend_public_key,
               view_public_key = %info.address.view_public_key,
               "address keys are not curve points");
        return Account::Empty;
    }
    if info.is_subaddress && info.payment_id.is_some() {
        debug!("subaddress cannot carry a payment id");
        return Account::Empty;
    }

    let keys = KeyMaterial::new(info.address, secrets.view, secrets.spend);
    let base = AccountBase::new(network, info, keys);
    if info.is_subaddress {
        SubaddressAccount::new(base).into()
    } else {
        PrimaryAccount::new(base).into()
    }
}


/// Build an account from either source and position it at `index` if it is
/// a subaddress. Primary accounts keep `(0, 0)` and the empty sentinel stays
/// empty.
pub fn with_index(index: SubaddressIndex, source: AccountSource,
                  secrets: Secrets) -> Account {
    let mut account = match source {
        AccountSource::AddressString(address) =>
            from_address_string(address, secrets),
        AccountSource::AddressInfo(network, info) =>
            from_address_info(network, info, secrets),
    };
    account.stamp_index(index);
    account
}


/// Derive the subaddress `index` of a primary account. The subaddress gets
/// the network of the primary and its spend key is registered there.
pub fn derive(primary: &mut PrimaryAccount, index: SubaddressIndex)
        -> AccountResult<SubaddressAccount> {
    primary.derive_subaddress(index)
}


/// Build a full primary account restored from a seed.
pub fn from_seed(network: NetworkType, seed: &Seed) -> Account {
    let address = AccountAddress::new(
        seed.spend_secret().public_key(), seed.view_secret().public_key()
    );
    from_address_info(network, AddressInfo::new(address, false),
                      seed.secrets())
}
