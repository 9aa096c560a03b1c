//! High-level operations.
//!
//! This module contains the implementation of funcgen-recipe commands.

pub mod inspect;
pub mod recipe;
pub mod recipe_create;

pub use inspect::{format_layout, format_report, InspectReport};
pub use recipe::{Recipe, LICENSE_FILE};
pub use recipe_create::{create, CreateOptions, CreateReport};
