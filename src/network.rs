use std::fmt;

use serde::{Serialize, Deserialize};
use monero_address::Network;


/// Network an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Main,
    Test,
    Stage,
    Undefined,
}


/// Kind of an address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Regular,
    Integrated,
    Subaddress,
    Invalid,
}


impl NetworkType {
    /// Codec network, `None` for the undefined network.
    pub(crate) fn to_monero(self) -> Option<Network> {
        match self {
            NetworkType::Main => Some(Network::Mainnet),
            NetworkType::Test => Some(Network::Testnet),
            NetworkType::Stage => Some(Network::Stagenet),
            NetworkType::Undefined => None,
        }
    }
}


impl From<Network> for NetworkType {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => NetworkType::Main,
            Network::Testnet => NetworkType::Test,
            Network::Stagenet => NetworkType::Stage,
        }
    }
}


impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            NetworkType::Main => "mainnet",
            NetworkType::Test => "testnet",
            NetworkType::Stage => "stagenet",
            NetworkType::Undefined => "undefined",
        };
        write!(f, "{}", name)
    }
}
