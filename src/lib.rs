//! Daily journal library
//!
//! This library stores one short reflection per day, tagged with a mood and
//! optional emotions, in a local key-value store, and provides monthly
//! listings and mood statistics over it.

mod cli;
mod clock;
mod codec;
mod config;
mod entry;
mod errors;
mod file_store;
mod helper;
mod keyspace;
mod kv;
mod month;
mod stats;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use clock::*;
pub use codec::{decode, encode};
pub use config::*;
pub use entry::*;
pub use errors::*;
pub use file_store::*;
pub use helper::*;
pub use keyspace::*;
pub use kv::*;
pub use month::*;
pub use stats::*;
pub use store::*;
pub use types::*;
