//! Common types and utilities for the heritage workspace.
//!
//! This crate provides foundational types used across all heritage crates:
//! - Name interning (`Atom`, `Interner`)
//! - Hierarchy limits and thresholds

// Name interning for class and type-parameter names
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;
