//! Component catalog for documentation code previews.
//!
//! The catalog groups component records into sections. Each record names a
//! component and points at its source files, either as a list of named files
//! or as a single registry path. A catalog is loaded once per build, validated
//! for duplicate names, and then only read.

pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, CatalogError, ComponentRecord, FileRef, LookupMiss, Section};
pub use loader::CatalogFormat;
