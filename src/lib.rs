//! # ddexplorer - Diving Degree-of-Difficulty Explorer
//!
//! Loads a table of competitive dives with their difficulty (DD) per body position and
//! narrows it interactively: by event, board height, dive group, dive number, a DD window,
//! entry direction and whether any difficulty is listed at all.
//!
//! ## Architecture
//!
//! - [`dataset`] - record loading and the one-time derivation of numeric fields
//! - [`filter`] - filter state, debounced text criteria and the filter/sort pipeline
//! - [`columns`] - column descriptors and visibility
//! - [`input`] - terminal events to session actions
//! - [`render`] - terminal renderer, theme and view state
//! - [`app`] - the interactive session and its event loop
//! - [`print`] - tab-separated output for `--print`

pub mod error;

pub mod columns;
pub mod config;
pub mod dataset;
pub mod filter;

pub mod input;
pub mod render;

pub mod app;
pub mod cli;
pub mod print;

pub use error::{DdError, Result};

pub use app::{Application, Session};
pub use dataset::{DatasetFactory, RecordStore};
pub use filter::{visible_records, FilterState};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
