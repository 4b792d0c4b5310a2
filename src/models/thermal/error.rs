use thiserror::Error;
use uom::si::{
    angle::degree,
    f64::{Angle, Power},
    power::watt,
};

use crate::support::constraint::ConstraintError;

/// Errors raised while assembling a thermal scenario.
///
/// These are reported at construction time, before any solver runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A scalar input violated its numeric constraint.
    #[error("invalid {field}: {source}")]
    Constraint {
        /// Name of the offending input.
        field: &'static str,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// A collection that needs at least one member was empty.
    #[error("{what} must contain at least one entry")]
    Empty {
        /// What the collection holds (e.g., "radiators").
        what: &'static str,
    },

    /// A surface angle outside the sunlit half-space.
    #[error("angle to sun must lie within ±90°, got {:.1}°", .angle.get::<degree>())]
    AngleOutOfRange {
        /// The rejected angle.
        angle: Angle,
    },

    /// Both a custom (qt, T_H) pair and a catalogue (brand, model) pair were given.
    #[error(
        "reactor is over-specified: give either both of qt and hot-side temperature \
         or both of brand and model, not all of them"
    )]
    ReactorOverSpecified,

    /// Neither a complete custom pair nor a complete catalogue pair was given.
    #[error(
        "reactor is under-specified: give either both of qt and hot-side temperature \
         or both of brand and model"
    )]
    ReactorUnderSpecified,

    /// The requested brand/model pair is not in the catalogue.
    #[error("reactor '{model}' by '{brand}' cannot be found! The valid brands and their models are:\n{valid}")]
    UnknownReactor {
        /// Requested brand.
        brand: String,

        /// Requested model.
        model: String,

        /// Pre-rendered listing of every catalogue entry.
        valid: String,
    },

    /// A solar absorber was asked to deliver more than it receives.
    #[error(
        "power pulled from the solar absorber (~{:.0} W) exceeds the solar power \
         it receives (~{:.0} W)",
        .extracted.get::<watt>(),
        .available.get::<watt>()
    )]
    ExtractionExceedsSolarInput {
        /// Total requested extraction.
        extracted: Power,

        /// Total absorbed solar power.
        available: Power,
    },
}

impl ConfigError {
    /// Creates a closure mapping a [`ConstraintError`] to a named field error.
    pub(crate) fn field(field: &'static str) -> impl Fn(ConstraintError) -> Self {
        move |source| Self::Constraint { field, source }
    }
}
