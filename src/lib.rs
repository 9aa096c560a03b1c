//! funcgen-recipe - build recipe for the func-gen C++ library
//!
//! This crate provides the recipe logic: version resolution, option
//! pruning, build layout, CMake descriptor generation, compiler
//! compatibility checks and the create lifecycle driving CMake.

pub mod builder;
pub mod core;
pub mod generators;
pub mod ops;
pub mod util;

pub use core::{
    compat::ConfigurationError, layout::Layout, options::OptionSet, package::PackageIdentity,
    settings::Settings,
};

pub use ops::Recipe;
pub use util::config::Profile;
