//! Published event types (outgoing).

mod published;

pub use published::*;
