//! tokex-util - Foundation Types for the tokex Workspace
//!
//! This crate provides the small set of types shared by every other tokex
//! crate: source positions and the error-reporting contract.
//!
//! # Module Structure
//!
//! - [`position`] - Line/column source locations
//! - [`error`] - The [`CodedError`] contract for machine-readable errors

#![warn(missing_docs)]

pub mod error;
pub mod position;

pub use error::CodedError;
pub use position::Position;
