//! FarePay Channel API
//!
//! The method-dispatch boundary over [`bank_core`]: a method name plus a JSON
//! argument map goes in, a JSON result or a structured `(code, message)`
//! error comes out. Both mobile clients speak this exact contract, so the
//! ledger logic lives in one place instead of two platform copies.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod args;
pub mod dispatch;
pub mod error;
pub mod provider;

// Re-exports
pub use dispatch::Dispatcher;
pub use error::ErrorBody;
