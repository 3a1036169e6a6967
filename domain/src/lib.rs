//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with records within the domain layer, while the underlying
//! implementation details remain in the `entity_api` crate.
pub use entity_api::{appointment_status, appointments, pets, roles, users, Id};

pub mod actor;
pub mod appointment;
pub mod error;
pub mod jwt;
pub mod pet;
pub mod user;
