//! # Address Book
//!
//! Maps member identity to voting stake. The consensus engine consumes the
//! address book read-only; administrative changes only take effect at a
//! round boundary, supplied through the engine's stake-table port.

use crate::entities::CreatorId;
use serde::{Deserialize, Serialize};

/// Voting stake held by a member.
pub type Stake = u128;

/// A single member entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookEntry {
    pub id: CreatorId,
    pub stake: Stake,
}

/// The stake table for the current network membership.
///
/// Member ids are dense: entry `i` has `CreatorId(i)`. `total_stake` is
/// precomputed so supermajority checks are a single comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    entries: Vec<AddressBookEntry>,
    total_stake: Stake,
}

impl AddressBook {
    /// Build an address book from stake values; member `i` gets
    /// `CreatorId(i)`.
    pub fn from_stakes(stakes: impl IntoIterator<Item = Stake>) -> Self {
        let entries: Vec<AddressBookEntry> = stakes
            .into_iter()
            .enumerate()
            .map(|(i, stake)| AddressBookEntry {
                id: CreatorId(i as u64),
                stake,
            })
            .collect();
        let total_stake = entries.iter().map(|e| e.stake).sum();
        Self {
            entries,
            total_stake,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: CreatorId) -> bool {
        id.index() < self.entries.len()
    }

    /// Stake of a member, or 0 for an unknown id.
    pub fn stake(&self, id: CreatorId) -> Stake {
        self.entries.get(id.index()).map_or(0, |e| e.stake)
    }

    pub fn total_stake(&self) -> Stake {
        self.total_stake
    }

    pub fn entries(&self) -> &[AddressBookEntry] {
        &self.entries
    }

    /// Strict stake supermajority test: `observed > 2/3 * total`.
    ///
    /// Integer form `3 * observed > 2 * total` avoids rounding; a bare
    /// majority is never sufficient.
    pub fn is_supermajority(&self, observed: Stake) -> bool {
        observed.saturating_mul(3) > self.total_stake.saturating_mul(2)
    }
}
