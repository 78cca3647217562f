//! Cross-subsystem integration scenarios.

mod determinism;
mod end_to_end;
mod expiration;
mod forks;
mod intake_flow;
