//! Renders the operating systems lab codes & outputs report as a PDF.
//!
//! The crate is split into a rendering-agnostic content model
//! ([`model`], [`labs`]), font discovery ([`fonts`]), document
//! configuration ([`builder`]), custom page elements ([`elements`]) and
//! the report assembly layer ([`report`]) that ties them together.

pub mod builder;
pub mod elements;
pub mod fonts;
pub mod labs;
pub mod model;
pub mod report;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;
