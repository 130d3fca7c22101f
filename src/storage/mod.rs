//! File-backed storage layer for account records.
//!
//! Accounts persist as a JSON array in `{data_dir}/users.json`. The file is
//! fully rewritten on every mutation; direct readers must tolerate full-file
//! replacement, not append semantics.

pub mod account;

pub use account::{AccountStore, StoreError};
