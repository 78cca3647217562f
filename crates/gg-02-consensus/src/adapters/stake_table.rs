//! Stake table adapter.

use crate::ports::StakeTableProvider;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::AddressBook;

/// A fixed stake table, swappable for administrative membership changes.
/// The service re-reads it only at round boundaries.
pub struct StaticStakeTable {
    book: RwLock<AddressBook>,
}

impl StaticStakeTable {
    pub fn new(book: AddressBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Swap the stake table; takes effect at the next round boundary.
    pub fn replace(&self, book: AddressBook) {
        *self.book.write() = book;
    }
}

#[async_trait]
impl StakeTableProvider for StaticStakeTable {
    async fn address_book(&self) -> Result<AddressBook, String> {
        Ok(self.book.read().clone())
    }
}
