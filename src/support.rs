//! Supporting utilities used by models.
//!
//! - [`constraint`]: Numeric invariants checked once at construction.
//! - [`members`]: One ordered, optionally named collection for inputs given as
//!   a single item, a list, or a map.
//! - [`units`]: Extensions to [`uom`].

pub mod constraint;
pub mod members;
pub mod units;
