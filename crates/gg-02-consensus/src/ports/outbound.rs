//! Driven ports (outbound dependencies).

use crate::events::RoundDecidedEvent;
use async_trait::async_trait;
use shared_types::AddressBook;

/// Sink for decided rounds, consumed by state-machine application and by
/// stake-weighted signature collection.
///
/// Publications arrive strictly in round order; each carries the complete
/// ordered batch for its round.
#[async_trait]
pub trait FinalizedSink: Send + Sync {
    async fn publish_round_decided(&self, event: RoundDecidedEvent) -> Result<(), String>;
}

/// Supplies the stake table.
///
/// The engine snapshots the address book between `add_event` calls and
/// refreshes it only after a round decision, so an administrative stake
/// change lands on a round boundary on every node rather than mid-vote.
#[async_trait]
pub trait StakeTableProvider: Send + Sync {
    async fn address_book(&self) -> Result<AddressBook, String>;
}
