//! Agora Types - Core type definitions for the Agora governance engine.
//!
//! This crate provides the fundamental types shared by every Agora crate:
//! - Addresses (20-byte, `0x`-hex encoded)
//! - Fixed-point token amounts and timestamps
//! - Checked fixed-point arithmetic helpers

pub mod address;
pub mod amount;
pub mod error;

#[cfg(any(feature = "serde", feature = "borsh"))]
mod serialization;

pub use address::Address;
pub use amount::{Amount, Timestamp, SCALE};
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, Amount, Timestamp, TypesError, SCALE};
}
