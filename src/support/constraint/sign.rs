use std::{cmp::Ordering, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Zero or greater.
///
/// Used for areas, powers and other quantities that may vanish but never go
/// negative.
/// Non-negative values are closed under addition, so they can be summed:
///
/// ```
/// use spacecraft_thermal::support::constraint::{Constrained, NonNegative};
/// use uom::si::{f64::Power, power::kilowatt};
///
/// let total: Constrained<Power, NonNegative> = [10.0, 5.0]
///     .into_iter()
///     .map(|kw| NonNegative::new(Power::new::<kilowatt>(kw)).unwrap())
///     .sum();
/// assert_eq!(total.into_inner().get::<kilowatt>(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Wraps `value` if it is zero or greater.
    ///
    /// # Errors
    ///
    /// Fails if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// # Panics
///
/// Panics in debug builds if the sum is negative, which only happens for
/// types whose addition does not preserve sign.
impl<T> Add for Constrained<T, NonNegative>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        debug_assert!(value >= T::zero(), "sum of non-negative values is negative");
        Self::new_unchecked(value)
    }
}

impl<T> Zero for Constrained<T, NonNegative>
where
    T: PartialOrd + Zero,
{
    fn zero() -> Self {
        Self::new_unchecked(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

/// Greater than zero.
///
/// Used for distances and absolute temperatures.
///
/// ```
/// use spacecraft_thermal::support::constraint::StrictlyPositive;
///
/// assert!(StrictlyPositive::new(273.15).is_ok());
/// assert!(StrictlyPositive::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is greater than zero.
    ///
    /// # Errors
    ///
    /// Fails if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
