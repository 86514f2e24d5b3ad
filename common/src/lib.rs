#![no_std]
//! Shared interface clients and wire types for the bound-asset protocol.
//!
//! Every cross-contract seam in the workspace goes through one of the
//! `#[contractclient]` traits below, so contracts, mocks and test suites all
//! talk to each other through the same typed clients.

mod interfaces;
mod types;

pub use interfaces::*;
pub use types::*;
