//! Public models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. Currently the only
//! domain is [`thermal`], which covers radiative equilibrium of spacecraft
//! heat sources, absorbers and radiators.
//!
//! # Model structure
//!
//! Each solver-backed model keeps its numerical formulation in a private
//! submodule (`balance`, `newton`) next to its public type. Where a residual is
//! handed to a Twine solver, it is expressed as a [`twine_core::Model`] plus a
//! [`twine_core::EquationProblem`] so the solver sees a thin adapter over the
//! model's own energy terms.

pub mod thermal;
