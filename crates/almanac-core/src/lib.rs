//! Almanac Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Almanac parser,
//! layout engine and command-line tool. It includes:
//!
//! - **Geometry**: Pixel-space primitives and collision tests ([`geometry`] module)
//! - **Colors**: CSS color handling for event accents ([`color::Color`])
//! - **Granularity**: Time bucket units for axis scales ([`granularity::Granularity`])
//! - **Timeline**: The validated timeline model ([`timeline`] module)

pub mod color;
pub mod geometry;
pub mod granularity;
pub mod timeline;
