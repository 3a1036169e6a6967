//! This module holds typed parameters for various endpoint inputs.
//!
//! By using typed parameters, inputs are validated (by type) and correctly
//! formatted before they reach the domain layer.

pub(crate) mod appointment;
pub(crate) mod pet;
pub(crate) mod user;
