//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod category;
pub mod id;
pub mod price;
pub mod product;

pub use category::{ALL_CATEGORIES, CategoryFilter};
pub use id::*;
pub use price::{Price, format_amount};
pub use product::{Product, Rating};
