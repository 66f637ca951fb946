//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the ledger are abstracted behind traits. This
//! crate provides test-friendly implementations that return deterministic
//! values and can be controlled programmatically.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;

pub use clock::NullClock;
