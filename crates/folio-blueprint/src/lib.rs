//! Blueprint storage for the Folio portfolio site.
//!
//! The blueprint is a flat JSON file holding every project shown on the
//! homepage plus the time it was last rewritten. This crate owns the
//! document model, reading and writing the file, and the two derived
//! views the pages need: the name-sorted project list and the tag set.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod model;
pub mod store;
pub mod tags;

pub use model::{Blueprint, Project, GITHUB_LINK};
pub use store::StoreError;
pub use tags::{derive_tags, sort_projects, FEATURED_TAG};
