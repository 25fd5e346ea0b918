//! Drips account identifiers and driver classification.
//!
//! An account id is a 256-bit integer. The top 32 bits name the driver that
//! owns the account, the remaining 224 bits are driver specific:
//! - address driver: the low 160 bits are the Ethereum address
//! - repo driver: the next byte is the forge id, followed by a name hash

use std::{fmt, str::FromStr};

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projects::Forge;

/// Driver ids as registered in the Drips hub.
pub mod driver_ids {
    pub const ADDRESS: u32 = 0;
    pub const NFT: u32 = 1;
    pub const IMMUTABLE_SPLITS: u32 = 2;
    pub const REPO: u32 = 3;
}

const DRIVER_ID_SHIFT: usize = 224;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("account id is empty")]
    Empty,

    #[error("account id {0:?} is not a 256-bit decimal integer")]
    NotDecimal(String),
}

/// The driver an account id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    Address,
    Nft,
    ImmutableSplits,
    Repo,
    Unknown(u32),
}

impl Driver {
    pub fn from_id(id: u32) -> Self {
        match id {
            driver_ids::ADDRESS => Self::Address,
            driver_ids::NFT => Self::Nft,
            driver_ids::IMMUTABLE_SPLITS => Self::ImmutableSplits,
            driver_ids::REPO => Self::Repo,
            other => Self::Unknown(other),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Self::Address => driver_ids::ADDRESS,
            Self::Nft => driver_ids::NFT,
            Self::ImmutableSplits => driver_ids::IMMUTABLE_SPLITS,
            Self::Repo => driver_ids::REPO,
            Self::Unknown(id) => *id,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Nft => f.write_str("nft"),
            Self::ImmutableSplits => f.write_str("immutableSplits"),
            Self::Repo => f.write_str("repo"),
            Self::Unknown(id) => write!(f, "unknown({id})"),
        }
    }
}

/// How a split receiver is presented once resolved.
///
/// Only repo-driver accounts need a project lookup; every other driver is
/// shown as a plain address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    Address,
    Project,
}

impl From<Driver> for ReceiverKind {
    fn from(driver: Driver) -> Self {
        match driver {
            Driver::Repo => Self::Project,
            Driver::Address | Driver::Nft | Driver::ImmutableSplits | Driver::Unknown(_) => {
                Self::Address
            }
        }
    }
}

/// A Drips account id.
///
/// Serialized as a decimal string, which is how the subgraph and the
/// contracts' JSON tooling represent `uint256` values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(U256);

impl AccountId {
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Build an account id from a driver id and a driver-specific payload.
    ///
    /// Payload bits above the low 224 are discarded.
    pub fn from_parts(driver_id: u32, payload: U256) -> Self {
        let payload_mask = (U256::from(1u8) << DRIVER_ID_SHIFT) - U256::from(1u8);
        Self((U256::from(driver_id) << DRIVER_ID_SHIFT) | (payload & payload_mask))
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn driver_id(&self) -> u32 {
        let bytes = self.to_be_bytes();
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn driver(&self) -> Driver {
        Driver::from_id(self.driver_id())
    }

    pub fn receiver_kind(&self) -> ReceiverKind {
        self.driver().into()
    }

    /// The address held in the low 160 bits.
    ///
    /// Meaningful for address-driver accounts; for other drivers this is
    /// simply the truncated id, which is what receivers display for them.
    pub fn address(&self) -> Address {
        Address::from_slice(&self.to_be_bytes()[12..])
    }

    /// EIP-55 checksummed form of [`AccountId::address`].
    pub fn checksummed_address(&self) -> String {
        self.address().to_checksum(None)
    }

    /// The forge a repo-driver account was registered for.
    ///
    /// `None` for other drivers and for forge ids this crate doesn't know.
    pub fn forge(&self) -> Option<Forge> {
        match self.driver() {
            Driver::Repo => Forge::from_id(self.to_be_bytes()[4]),
            _ => None,
        }
    }

    fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }
}

impl From<U256> for AccountId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        Self::from_parts(driver_ids::ADDRESS, U256::from_be_slice(address.as_slice()))
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AccountIdError::Empty);
        }
        U256::from_str_radix(s, 10)
            .map(Self)
            .map_err(|_| AccountIdError::NotDecimal(s.to_string()))
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn repo_account(forge_id: u8, name_hash: u64) -> AccountId {
        let payload = (U256::from(forge_id) << 216) | U256::from(name_hash);
        AccountId::from_parts(driver_ids::REPO, payload)
    }

    #[test]
    fn test_address_account_id_is_the_address_integer() {
        let address: Address = CHECKSUMMED.parse().unwrap();
        let decimal = U256::from_be_slice(address.as_slice()).to_string();

        let id: AccountId = decimal.parse().unwrap();

        assert_eq!(id.driver(), Driver::Address);
        assert_eq!(id.receiver_kind(), ReceiverKind::Address);
        assert_eq!(id, AccountId::from(address));
        assert_eq!(id.checksummed_address(), CHECKSUMMED);
    }

    #[test]
    fn test_driver_is_read_from_top_32_bits() {
        assert_eq!(AccountId::from_parts(1, U256::from(7u8)).driver(), Driver::Nft);
        assert_eq!(
            AccountId::from_parts(2, U256::from(7u8)).driver(),
            Driver::ImmutableSplits
        );
        assert_eq!(repo_account(0, 42).driver(), Driver::Repo);
        assert_eq!(
            AccountId::from_parts(99, U256::ZERO).driver(),
            Driver::Unknown(99)
        );
    }

    #[test]
    fn test_only_repo_driver_is_a_project_receiver() {
        assert_eq!(repo_account(0, 1).receiver_kind(), ReceiverKind::Project);

        for driver_id in [0, 1, 2, 4, u32::MAX] {
            let id = AccountId::from_parts(driver_id, U256::from(1u8));
            assert_eq!(id.receiver_kind(), ReceiverKind::Address, "{driver_id}");
        }
    }

    #[test]
    fn test_from_parts_discards_bits_above_payload() {
        let id = AccountId::from_parts(driver_ids::REPO, U256::MAX);
        assert_eq!(id.driver_id(), driver_ids::REPO);
    }

    #[test]
    fn test_forge_is_read_from_repo_accounts_only() {
        assert_eq!(repo_account(0, 5).forge(), Some(Forge::GitHub));
        assert_eq!(repo_account(1, 5).forge(), Some(Forge::GitLab));
        assert_eq!(repo_account(9, 5).forge(), None);

        let address_id = AccountId::from_parts(driver_ids::ADDRESS, U256::from(1u8) << 216);
        assert_eq!(address_id.forge(), None);
    }

    #[test]
    fn test_parse_rejects_non_decimal_input() {
        assert_eq!("".parse::<AccountId>(), Err(AccountIdError::Empty));
        assert!(matches!(
            "0xabc".parse::<AccountId>(),
            Err(AccountIdError::NotDecimal(_))
        ));
        assert!(matches!(
            "12a".parse::<AccountId>(),
            Err(AccountIdError::NotDecimal(_))
        ));
    }

    #[test]
    fn test_serde_uses_decimal_strings() {
        let id = repo_account(0, 12345);
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, format!("\"{}\"", id.as_u256()));
        assert_eq!(serde_json::from_str::<AccountId>(&json).unwrap(), id);
        assert!(serde_json::from_str::<AccountId>("\"nope\"").is_err());
    }
}
