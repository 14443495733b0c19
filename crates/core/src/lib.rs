//! Corner Shop Core - Shared types library.
//!
//! This crate provides the types shared by the Corner Shop components:
//! - `storefront` - Catalog pages and the persisted shopping cart
//! - `integration-tests` - End-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, type-safe IDs, prices and category filters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
