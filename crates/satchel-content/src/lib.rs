//! Satchel Content - authoring pipeline for item definitions
//!
//! This crate sits between authored content and the runtime:
//! - [`Loader`] reads item definitions from RON files
//! - [`PropertyRegistry`] enumerates the available property kinds for
//!   authoring tools and creates configured defaults by name
//!
//! Loaded definitions carry no ids yet; a database build
//! (`satchel-db`) assigns them.

mod error;
mod loader;
mod registry;

pub use error::{Error, Result};
pub use loader::{ItemLibrary, Loader};
pub use registry::{PropertyFactory, PropertyRegistry};
