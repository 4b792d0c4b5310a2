//! Numeric invariants checked once, at construction.
//!
//! Physical inputs to the thermal models carry simple invariants: areas and
//! powers cannot be negative, distances and absolute temperatures must be
//! positive, emissivity and absorptance are fractions.
//! A [`Constrained<T, C>`] value can only be built if `C` accepts it, so code
//! holding one never has to check again.
//!
//! Available markers:
//!
//! - [`NonNegative`]: zero or greater
//! - [`StrictlyPositive`]: greater than zero
//! - [`UnitInterval`]: `0 ≤ x ≤ 1`
//!
//! New invariants are added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod sign;
mod unit_interval;

use std::{iter::Sum, marker::PhantomData, ops::Add};

use num_traits::Zero;
use thiserror::Error;

pub use sign::{NonNegative, StrictlyPositive};
pub use unit_interval::{UnitBounds, UnitInterval};

/// A check that a value must pass before it can be wrapped.
pub trait Constraint<T> {
    /// Checks that `value` satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Why a value was rejected by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    NotFinite,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value known to satisfy constraint `C`.
///
/// # Example
///
/// ```
/// use spacecraft_thermal::support::constraint::{Constrained, NonNegative};
/// use uom::si::{area::square_meter, f64::Area};
///
/// let area = Constrained::<Area, NonNegative>::new(Area::new::<square_meter>(12.0)).unwrap();
/// assert_eq!(area.into_inner().get::<square_meter>(), 12.0);
///
/// assert!(NonNegative::new(Area::new::<square_meter>(-1.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Wraps `value` if it satisfies `C`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] reported by `C`.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self::new_unchecked(value))
    }

    /// Wraps `value` without checking it.
    ///
    /// Only for values the caller has already proven valid.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Totals of constrained values, for constraints closed under addition.
impl<T, C> Sum for Constrained<T, C>
where
    C: Constraint<T>,
    Constrained<T, C>: Add<Output = Self> + Zero,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}
