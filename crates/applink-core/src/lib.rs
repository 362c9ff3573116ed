//! Core types shared across AppLink crates.
//!
//! This crate provides the fundamental building blocks:
//! - [`ProtocolError`] and the shared [`Result`] alias
//! - Logging utilities built on the [`log`] facade
//!
//! # Design Principles
//!
//! - Write-side violations are loud: typed setters return errors
//! - Read-side violations are absorbed: typed getters return absence
//! - No panicking paths outside of tests

#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::{ProtocolError, Result};
