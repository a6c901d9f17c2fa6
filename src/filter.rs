//! Filtering core.
//!
//! [`FilterState`] holds the user's criteria, [`visible_records`] turns a record store and
//! a filter state into the ordered rows the table shows. Text criteria commit either on
//! confirmation or after a debounce deadline, see [`criterion`].

pub mod boards;
pub mod criterion;
pub mod debounce;
pub mod pipeline;
pub mod state;

pub use boards::available_boards;
pub use criterion::{CriterionValue, DebouncedCriterion};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use pipeline::{matches, visible_records};
pub use state::{FilterState, NumericField};
