//! Testing infrastructure for quill integration tests.
//!
//! This crate provides utilities for writing readable tests:
//! - `world`: Captured controllers with passthrough formats pre-registered
//! - `assertions`: Line-level assertions over captured output

pub mod assertions;
pub mod world;

pub use world::CaptureWorld;
