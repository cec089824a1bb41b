//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the pet pen: creation,
//! care actions, passive decay, neglect, and reset. All interaction
//! with the view and speaker happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without any UI runtime.

pub mod commands;
pub mod ports;
pub mod service;
