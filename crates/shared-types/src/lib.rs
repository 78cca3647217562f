//! # Shared Types Crate
//!
//! Domain entities shared by every subsystem of the platform: hashes and
//! identifiers, the immutable gossip [`Event`], the finalized consensus
//! record, the stake [`AddressBook`], and the insertion error taxonomy that
//! the shadow graph and the event intake both speak.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-subsystem types are defined here.
//! - **Immutable events**: an [`Event`] never changes after construction;
//!   everything consensus derives about it lives in the consensus engine's
//!   own records, and is published as a separate [`FinalizedEvent`].
//! - **Dense identifiers**: creators are addressed by a small dense
//!   [`CreatorId`] index into the address book, so per-creator state can be
//!   kept in plain vectors.

pub mod address_book;
pub mod entities;
pub mod errors;

pub use address_book::{AddressBook, AddressBookEntry, Stake};
pub use entities::*;
pub use errors::*;
