//! Lodge Core - Foundational types for the Lodge terrain tools
//!
//! This crate provides the types every other Lodge crate depends on:
//! - `Vec3` - Positions and normals
//! - `Color` - Material colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{LodgeError, Result};
pub use types::{Color, Vec3};
