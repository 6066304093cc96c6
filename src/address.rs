//! Address strings. Encoding, checksum and network bytes are handled by
//! `monero-address`; this module maps its addresses onto `AddressInfo`.
//! Featured addresses are not supported and fail to parse.

use serde::{Serialize, Deserialize};
use monero_address::{AddressType, MoneroAddress};
use monero_ed25519::{CompressedPoint, Point};

use crate::validate;
use crate::utils::*;
use crate::error::{Error, ErrorKind};
use crate::crypto::PublicKey;
use crate::network::{NetworkType, AddressKind};


/// Short payment id carried by integrated addresses.
pub type PaymentId = [u8; 8];


/// Pair of public keys that makes an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress {
    pub spend_public_key: PublicKey,
    pub view_public_key: PublicKey,
}


/// Decoded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: AccountAddress,
    pub is_subaddress: bool,
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
}


impl AccountAddress {
    /// Create a new address from public spend and view keys.
    pub fn new(spend_public_key: PublicKey, view_public_key: PublicKey) -> Self {
        Self { spend_public_key, view_public_key }
    }

    /// Check that both keys are points on the curve.
    pub fn is_valid(&self) -> bool {
        self.spend_public_key.is_valid() && self.view_public_key.is_valid()
    }
}


impl AddressInfo {
    /// Info of a standard address or a subaddress.
    pub fn new(address: AccountAddress, is_subaddress: bool) -> Self {
        Self { address, is_subaddress, payment_id: None }
    }

    /// Info of an integrated address.
    pub fn integrated(address: AccountAddress, payment_id: PaymentId) -> Self {
        Self { address, is_subaddress: false, payment_id: Some(payment_id) }
    }

    /// Kind of the address.
    pub fn kind(&self) -> AddressKind {
        if self.is_subaddress {
            AddressKind::Subaddress
        } else if self.payment_id.is_some() {
            AddressKind::Integrated
        } else {
            AddressKind::Regular
        }
    }
}


/// Detect network and kind of an address string. Anything that does not
/// decode (bad characters, length, checksum, unknown prefix, keys off the
/// curve) is reported as `(Undefined, Invalid)`.
pub fn detect_network_and_address_type(s: &str) -> (NetworkType, AddressKind) {
    match decode(s) {
        Ok((network, info)) => (network, info.kind()),
        Err(_) => (NetworkType::Undefined, AddressKind::Invalid),
    }
}


/// Parse an address string that must belong to `network`.
pub fn parse_address(s: &str, network: NetworkType)
        -> AccountResult<AddressInfo> {
    let (detected, info) = decode(s)?;
    validate!(detected == network, MalformedAddress,
              "address belongs to {}, expected {}", detected, network)?;
    Ok(info)
}


/// Encode a standard address or a subaddress.
pub fn encode_address(network: NetworkType, is_subaddress: bool,
                      address: &AccountAddress) -> AccountResult<String> {
    encode_address_info(network, &AddressInfo::new(*address, is_subaddress))
}


/// Encode any address info, including integrated ones. Both keys must be
/// canonical curve points.
pub fn encode_address_info(network: NetworkType, info: &AddressInfo)
        -> AccountResult<String> {
    let monero_network = network.to_monero().ok_or_else(|| Error::new(
        ErrorKind::MalformedAddress,
        format!("no address encoding on {} network", network)
    ))?;

    let kind = match (info.is_subaddress, info.payment_id) {
        (false, None) => AddressType::Legacy,
        (false, Some(payment_id)) => AddressType::LegacyIntegrated(payment_id),
        (true, None) => AddressType::Subaddress,
        (true, Some(_)) => return Err(Error::new(
            ErrorKind::MalformedAddress,
            "subaddress cannot carry a payment id".to_string()
        )),
    };

    let spend = to_point(&info.address.spend_public_key)?;
    let view = to_point(&info.address.view_public_key)?;
    Ok(MoneroAddress::new(monero_network, kind, spend, view).to_string())
}


fn decode(s: &str) -> AccountResult<(NetworkType, AddressInfo)> {
    let parsed = MoneroAddress::from_str_with_unchecked_network(s)
        .map_err(|e| Error::new(
            ErrorKind::MalformedAddress, format!("cannot parse address: {}", e)
        ))?;

    let address = AccountAddress::new(
        from_point(parsed.spend()), from_point(parsed.view())
    );
    let info = match *parsed.kind() {
        AddressType::Legacy => AddressInfo::new(address, false),
        AddressType::LegacyIntegrated(payment_id) =>
            AddressInfo::integrated(address, payment_id),
        AddressType::Subaddress => AddressInfo::new(address, true),
        AddressType::Featured { .. } => return Err(Error::new(
            ErrorKind::MalformedAddress,
            "featured addresses are not supported".to_string()
        )),
    };

    Ok((parsed.network().into(), info))
}


fn to_point(key: &PublicKey) -> AccountResult<Point> {
    CompressedPoint::from(*key.as_bytes()).decompress().ok_or_else(|| {
        Error::new(ErrorKind::MalformedKey,
                   format!("public key is not a curve point: {}", key))
    })
}


fn from_point(point: Point) -> PublicKey {
    PublicKey::from_bytes(point.compress().to_bytes())
}
