//! Account variants. `Account` is a closed sum over the empty sentinel, a
//! primary address and a subaddress; both concrete variants expose the same
//! read-only surface through `AccountInfo`, and the sum type forwards it with
//! `InvalidAccountState` for the empty sentinel.
//!
//! Accounts are built by the `factory` module only, so network, address and
//! secrets are consistent and immutable after construction. The exceptions
//! are the write-once key bundle and the append-only registry of a primary
//! account.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::utils::*;
use crate::error::{Error, ErrorKind};
use crate::network::NetworkType;
use crate::address::{AccountAddress, AddressInfo, encode_address_info};
use crate::crypto::{PublicKey, SecretKey, SubaddressDeriver};
use crate::keys::{KeyBundle, KeyMaterial};
use crate::subaddress::{SubaddressIndex, SubaddressRegistry, RegistryEntry,
                        RegistryConfig};


/// Variant tag of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    None,
    Primary,
    Subaddress,
}


/// State shared by every non-empty account.
#[derive(Debug, Clone)]
pub struct AccountBase {
    network: NetworkType,
    info: AddressInfo,
    keys: KeyMaterial,
}


impl AccountBase {
    pub(crate) fn new(network: NetworkType, info: AddressInfo,
                      keys: KeyMaterial) -> Self {
        Self { network, info, keys }
    }

    /// Network of the account.
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Decoded address of the account.
    pub fn address_info(&self) -> &AddressInfo {
        &self.info
    }

    /// Secrets and the cached key bundle.
    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }
}


/// Read-only capability surface of a constructed account.
pub trait AccountInfo {
    /// Shared state.
    fn base(&self) -> &AccountBase;

    /// Variant tag.
    fn address_type(&self) -> AddressType;

    /// Subaddress index, absent while a subaddress is not positioned yet.
    fn index(&self) -> Option<SubaddressIndex>;

    /// Check if the account is a subaddress.
    fn is_subaddress(&self) -> bool {
        self.address_type() == AddressType::Subaddress
    }

    /// Network of the account.
    fn network(&self) -> NetworkType {
        self.base().network()
    }

    /// Decoded address of the account.
    fn address_info(&self) -> &AddressInfo {
        self.base().address_info()
    }

    /// Public key pair of the address.
    fn address(&self) -> &AccountAddress {
        &self.base().address_info().address
    }

    /// Address string on the account network. Integrated addresses keep
    /// their payment id.
    fn address_string(&self) -> AccountResult<String> {
        encode_address_info(self.network(), self.address_info())
    }

    /// Public view key.
    fn public_view_key(&self) -> &PublicKey {
        &self.address().view_public_key
    }

    /// Public spend key.
    fn public_spend_key(&self) -> &PublicKey {
        &self.address().spend_public_key
    }

    /// View secret, if known.
    fn view_secret(&self) -> Option<&SecretKey> {
        self.base().key_material().view_secret()
    }

    /// Spend secret, if known.
    fn spend_secret(&self) -> Option<&SecretKey> {
        self.base().key_material().spend_secret()
    }

    /// View secret as hex, empty if absent.
    fn view_secret_hex(&self) -> String {
        self.base().key_material().view_secret_hex()
    }

    /// Spend secret as hex, empty if absent.
    fn spend_secret_hex(&self) -> String {
        self.base().key_material().spend_secret_hex()
    }

    /// Memoized key bundle, `InvalidKeyState` without a view secret.
    fn keys(&self) -> AccountResult<&KeyBundle> {
        let base = self.base();
        base.key_material().bundle()
    }
}


/// Subaddress account. Its index is stamped by the factory or by derivation
/// from a primary account.
#[derive(Debug, Clone)]
pub struct SubaddressAccount {
    base: AccountBase,
    index: Option<SubaddressIndex>,
}


impl SubaddressAccount {
    pub(crate) fn new(base: AccountBase) -> Self {
        Self { base, index: None }
    }

    pub(crate) fn set_index(&mut self, index: SubaddressIndex) {
        self.index = Some(index);
    }
}


impl AccountInfo for SubaddressAccount {
    fn base(&self) -> &AccountBase {
        &self.base
    }

    fn address_type(&self) -> AddressType {
        AddressType::Subaddress
    }

    fn index(&self) -> Option<SubaddressIndex> {
        self.index
    }
}


/// Primary account. Its index is always `(0, 0)` and it owns the registry of
/// derived subaddress keys.
#[derive(Debug, Clone)]
pub struct PrimaryAccount {
    base: AccountBase,
    registry: SubaddressRegistry,
}


impl PrimaryAccount {
    pub(crate) fn new(base: AccountBase) -> Self {
        let registry = SubaddressRegistry::new(
            base.address_info().address.spend_public_key
        );
        Self { base, registry }
    }

    /// Registry of derived subaddress keys.
    pub fn registry(&self) -> &SubaddressRegistry {
        &self.registry
    }

    /// Reverse lookup of a public spend key.
    pub fn find(&self, public_key: &PublicKey) -> Option<SubaddressIndex> {
        self.registry.find(public_key)
    }

    /// Derivation context of this account. Requires the view secret.
    pub fn subaddress_deriver(&self) -> AccountResult<SubaddressDeriver> {
        let view_secret = self.view_secret().ok_or_else(|| Error::new(
            ErrorKind::InvalidKeyState,
            "subaddress derivation requires a view secret".to_string()
        ))?;
        SubaddressDeriver::new(view_secret, self.public_spend_key())
    }

    /// Build the subaddress account at `index` and register its spend key.
    /// The subaddress carries the secrets of this account. Index `(0, 0)`
    /// gives the primary keys under the subaddress variant.
    pub fn derive_subaddress(&mut self, index: SubaddressIndex)
            -> AccountResult<SubaddressAccount> {
        let deriver = self.subaddress_deriver()?;
        let (spend_public_key, view_public_key) = deriver.keys(&index);
        self.registry.insert(spend_public_key, index);

        let address = AccountAddress::new(spend_public_key, view_public_key);
        let info = AddressInfo::new(address, true);
        let keys = KeyMaterial::new(
            address, self.view_secret().cloned(), self.spend_secret().cloned()
        );
        let mut account = SubaddressAccount::new(
            AccountBase::new(self.network(), info, keys)
        );
        account.set_index(index);
        Ok(account)
    }

    /// Same as `derive_subaddress` with the index given by parts.
    pub fn derive_subaddress_at(&mut self, major: u32, minor: u32)
            -> AccountResult<SubaddressAccount> {
        self.derive_subaddress(SubaddressIndex::new(major, minor))
    }

    /// Derive only the spend key of `(major, minor)` and register it.
    pub fn register_index(&mut self, major: u32, minor: u32)
            -> AccountResult<RegistryEntry> {
        let deriver = self.subaddress_deriver()?;
        Ok(self.registry.register(&deriver, SubaddressIndex::new(major, minor)))
    }

    /// Register every index within the bounds of `config`. The primary index
    /// is inside the bounds and maps onto the seeded entry, so the registry
    /// ends up with exactly `config.total()` entries when it held only the
    /// primary key before.
    pub fn populate_indices(&mut self, config: &RegistryConfig)
            -> AccountResult<()> {
        let deriver = self.subaddress_deriver()?;
        self.registry.populate(&deriver, config);
        Ok(())
    }

    /// `populate_indices` with the default bounds of 50 accounts and 200
    /// addresses.
    pub fn populate_default_indices(&mut self) -> AccountResult<()> {
        self.populate_indices(&RegistryConfig::default())
    }
}


impl AccountInfo for PrimaryAccount {
    fn base(&self) -> &AccountBase {
        &self.base
    }

    fn address_type(&self) -> AddressType {
        AddressType::Primary
    }

    fn index(&self) -> Option<SubaddressIndex> {
        Some(SubaddressIndex::primary())
    }
}


/// Account handle returned by the factory. `Empty` marks a failed
/// construction and fails every address or key accessor.
#[derive(Debug, Clone, Default)]
pub enum Account {
    #[default]
    Empty,
    Primary(PrimaryAccount),
    Subaddress(SubaddressAccount),
}


impl Account {
    /// Variant tag.
    pub fn address_type(&self) -> AddressType {
        match self {
            Account::Empty => AddressType::None,
            Account::Primary(_) => AddressType::Primary,
            Account::Subaddress(_) => AddressType::Subaddress,
        }
    }

    /// `false` for the empty sentinel only. Safe to call on any account.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Account::Empty)
    }

    /// Check if the account is a primary address.
    pub fn is_primary(&self) -> bool {
        matches!(self, Account::Primary(_))
    }

    /// Check if the account is a subaddress.
    pub fn is_subaddress(&self) -> bool {
        matches!(self, Account::Subaddress(_))
    }

    /// Index of the account. Absent for the empty sentinel and for a
    /// subaddress that was not positioned.
    pub fn index(&self) -> Option<SubaddressIndex> {
        match self {
            Account::Empty => None,
            Account::Primary(acc) => acc.index(),
            Account::Subaddress(acc) => acc.index(),
        }
    }

    /// Network of the account.
    pub fn network(&self) -> AccountResult<NetworkType> {
        Ok(self.base()?.network())
    }

    /// Decoded address of the account.
    pub fn address_info(&self) -> AccountResult<&AddressInfo> {
        Ok(self.base()?.address_info())
    }

    /// Address string on the account network.
    pub fn address_string(&self) -> AccountResult<String> {
        let base = self.base()?;
        encode_address_info(base.network(), base.address_info())
    }

    /// Public view key.
    pub fn public_view_key(&self) -> AccountResult<&PublicKey> {
        Ok(&self.base()?.address_info().address.view_public_key)
    }

    /// Public spend key.
    pub fn public_spend_key(&self) -> AccountResult<&PublicKey> {
        Ok(&self.base()?.address_info().address.spend_public_key)
    }

    /// View secret, if known.
    pub fn view_secret(&self) -> AccountResult<Option<&SecretKey>> {
        Ok(self.base()?.key_material().view_secret())
    }

    /// Spend secret, if known.
    pub fn spend_secret(&self) -> AccountResult<Option<&SecretKey>> {
        Ok(self.base()?.key_material().spend_secret())
    }

    /// View secret as hex, empty if absent.
    pub fn view_secret_hex(&self) -> AccountResult<String> {
        Ok(self.base()?.key_material().view_secret_hex())
    }

    /// Spend secret as hex, empty if absent.
    pub fn spend_secret_hex(&self) -> AccountResult<String> {
        Ok(self.base()?.key_material().spend_secret_hex())
    }

    /// Memoized key bundle.
    pub fn keys(&self) -> AccountResult<&KeyBundle> {
        let base = self.base()?;
        base.key_material().bundle()
    }

    /// Borrow the primary variant.
    pub fn as_primary(&self) -> Option<&PrimaryAccount> {
        match self {
            Account::Primary(acc) => Some(acc),
            _ => None,
        }
    }

    /// Borrow the primary variant mutably, to derive or register indices.
    pub fn as_primary_mut(&mut self) -> Option<&mut PrimaryAccount> {
        match self {
            Account::Primary(acc) => Some(acc),
            _ => None,
        }
    }

    /// Borrow the subaddress variant.
    pub fn as_subaddress(&self) -> Option<&SubaddressAccount> {
        match self {
            Account::Subaddress(acc) => Some(acc),
            _ => None,
        }
    }

    /// Unwrap the primary variant.
    pub fn into_primary(self) -> Option<PrimaryAccount> {
        match self {
            Account::Primary(acc) => Some(acc),
            _ => None,
        }
    }

    /// Unwrap the subaddress variant.
    pub fn into_subaddress(self) -> Option<SubaddressAccount> {
        match self {
            Account::Subaddress(acc) => Some(acc),
            _ => None,
        }
    }

    /// Position a subaddress. Other variants are left untouched.
    pub(crate) fn stamp_index(&mut self, index: SubaddressIndex) {
        if let Account::Subaddress(acc) = self {
            acc.set_index(index);
        }
    }

    fn base(&self) -> AccountResult<&AccountBase> {
        match self {
            Account::Primary(acc) => Ok(acc.base()),
            Account::Subaddress(acc) => Ok(acc.base()),
            Account::Empty => Err(Error::new(
                ErrorKind::InvalidAccountState,
                "account is empty".to_string()
            )),
        }
    }
}


impl From<PrimaryAccount> for Account {
    fn from(acc: PrimaryAccount) -> Self {
        Account::Primary(acc)
    }
}


impl From<SubaddressAccount> for Account {
    fn from(acc: SubaddressAccount) -> Self {
        Account::Subaddress(acc)
    }
}


fn fmt_base(base: &AccountBase, f: &mut fmt::Formatter) -> fmt::Result {
    let address = encode_address_info(base.network(), base.address_info())
        .unwrap_or_default();
    write!(f, "nt:{},a:{},v:{},s:{}", base.network(), address,
           base.key_material().view_secret_hex(),
           base.key_material().spend_secret_hex())
}


impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.base() {
            Ok(base) => fmt_base(base, f),
            Err(_) => write!(f, "none"),
        }
    }
}


impl fmt::Display for PrimaryAccount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_base(&self.base, f)
    }
}


impl fmt::Display for SubaddressAccount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_base(&self.base, f)
    }
}




#[cfg(all(test, feature = "bench"))]
mod benches {
    use super::*;
    use test::Bencher;
    use crate::keys::Secrets;
    use crate::fixtures::*;

    #[bench]
    fn bench_register_index(bencher: &mut Bencher) {
        let secrets = Secrets::from_hex(VIEW_SECRET, "").unwrap();
        let info = AddressInfo::new(AccountAddress::new(
            PublicKey::from_hex(SPEND_PUBLIC).unwrap(),
            PublicKey::from_hex(VIEW_PUBLIC).unwrap(),
        ), false);
        let mut acc = PrimaryAccount::new(AccountBase::new(
            NetworkType::Test, info,
            KeyMaterial::new(info.address, secrets.view, secrets.spend)
        ));
        let mut minor = 0;

        bencher.iter(|| {
            minor += 1;
            let _entry = acc.register_index(0, minor).unwrap();
        });
    }
}
