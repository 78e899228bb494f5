//! Satchel DB - item databases and catalog lookup
//!
//! This crate turns authored item definitions into runtime-addressable ones:
//! - [`ItemDatabase`] compiles definitions, assigning each a stable id
//! - [`ItemCatalog`] searches every registered database and instantiates
//!   items from saved ids

mod catalog;
mod database;
mod error;

pub use catalog::ItemCatalog;
pub use database::ItemDatabase;
pub use error::{Error, Result};
