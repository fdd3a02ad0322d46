//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading, component wiring and the operator
//! implementation behind the inbound ports.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions
//! - [`operator`] - CLI operator interface

pub mod config;
pub mod factory;
pub mod operator;
