//! Fixed keys and addresses shared by the unit tests. The wallet below was
//! generated from fixed secrets, and every derived value was computed
//! independently of this crate.

use crate::crypto::PublicKey;


pub const VIEW_SECRET: &str =
    "28e1ffa41384a6bc0595b7a2f4f1b7000e5201e1606035a4f1ed888348b6c00a";
pub const SPEND_SECRET: &str =
    "21356949887c20bf30edd9823c660323330adb0eda25a059d0a165be17350d01";
pub const VIEW_PUBLIC: &str =
    "9da0fd77de108b966a464cdbfbe5b66289f8d59266ab3e1135de1676c79b19c6";
pub const SPEND_PUBLIC: &str =
    "14e5b8225232fe62b3d8383c39900f049789845fc86bfeb48d4c6060ab59c9a9";

pub const MAINNET_PRIMARY: &str =
    "42R3Fm2ppzHHWYD3pdzx2J1mYm6TjVuhXXCaeHwuW6qnVNV8xq7eTa2SADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuiPNhSX6x";
pub const TESTNET_PRIMARY: &str =
    "9sxak1h67MPHWYD3pdzx2J1mYm6TjVuhXXCaeHwuW6qnVNV8xq7eTa2SADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuiPQR8WHM";
pub const STAGENET_PRIMARY: &str =
    "52d5LbwnUbPHWYD3pdzx2J1mYm6TjVuhXXCaeHwuW6qnVNV8xq7eTa2SADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuiPNn3hcY";

pub const PAYMENT_ID: [u8; 8] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
pub const TESTNET_INTEGRATED: &str =
    "A3fFkpWaicuHWYD3pdzx2J1mYm6TjVuhXXCaeHwuW6qnVNV8xq7eTa2SADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuia8VqxQfkshgGPeM4fV";

pub const SUB_1_5_SPEND: &str =
    "9c80ddb0c0d764b3838035e27d4ce24408b1861332866df211aef59143d027bc";
pub const SUB_1_5_VIEW: &str =
    "3e880aa20c8d57f23694ad76e6c89c5fea93da0c6a425592c68192f6e40b5bbf";
pub const TESTNET_SUB_1_5: &str =
    "Be7N1aLPGM1X2WSHXGP8rmCP1rC9cYhechVNefNTUf98YVCu9uu3YDthWmkMVsg68TH3WVPeRr1VvRYuWhaeDRMcNfAG3nf";
pub const MAINNET_SUB_1_5: &str =
    "88PEid92Vj9X2WSHXGP8rmCP1rC9cYhechVNefNTUf98YVCu9uu3YDthWmkMVsg68TH3WVPeRr1VvRYuWhaeDRMcNZEPJZs";

pub const SUB_0_1_SPEND: &str =
    "1501a530b3d454bcc121c7394b44008b53489daf2d2c630a1406c2921a0a9bd9";
pub const SUB_0_1_VIEW: &str =
    "23770cf76fef951900b46388f639230ce944049e340cc15b8817eeaca307642c";
pub const TESTNET_SUB_0_1: &str =
    "BYyYnenQp2wYa9xBKvTB5HQJdYykysKhU2gmk7j2eL4idKWv861P4Fn5BZNBE4wvz63AFmzzeM7xcGJyLY3ZUTqd61wNkQB";

pub const SUB_49_199_SPEND: &str =
    "17df01d61170106faec68cfe54124695e22ce73109e4b14a736d84aa1b381ce7";
pub const SUB_49_199_VIEW: &str =
    "7af9dd68e2dee05372b2de597a65ea5f75cc10a45cdde6790699678c23cbd6b2";

/// Bytes that do not decode to a curve point.
pub const INVALID_POINT: &str =
    "0200000000000000000000000000000000000000000000000000000000000000";

/// Testnet primary address whose spend key is `INVALID_POINT`. The checksum
/// is correct, so only key validation can reject it.
pub const TESTNET_INVALID_SPEND: &str =
    "9sF3hXMo4VD11111111111111111111111111111111116yTcQjHhMcSADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuiPRPzSHh";

/// Well-formed address with an unknown network prefix (17).
pub const UNKNOWN_PREFIX: &str =
    "3riNExDLDimHWYD3pdzx2J1mYm6TjVuhXXCaeHwuW6qnVNV8xq7eTa2SADV2mnWmG9HUxB7FbzbrM3sxqJFv9wuiPLxkKg6";

/// Monero general fund address and its published view key.
pub const DONATION_ADDRESS: &str =
    "44AFFq5kSiGBoZ4NMDwYtN18obc8AemS33DBLWs3H7otXft3XjrpDtQGv7SqSsaBYBb98uNbr2VBBEt7f2wfn3RVGQBEP3A";
pub const DONATION_SPEND_PUBLIC: &str =
    "42f18fc61586554095b0799b5c4b6f00cdeb26a93b20540d366932c6001617b7";
pub const DONATION_VIEW_PUBLIC: &str =
    "5db35109fbba7d5f275fef4b9c49e0cc1c84b219ec6ff652fda54f89f7f63c88";


pub fn donation_view_public() -> PublicKey {
    PublicKey::from_hex(DONATION_VIEW_PUBLIC).unwrap()
}
