//! Rungdiff Core Types and Definitions
//!
//! This crate provides the foundational types for rendering and diffing
//! PLCopen ladder diagrams. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::ElementId`])
//! - **Diagram**: The ladder diagram model ([`diagram`] module)
//! - **Diff**: The structural diff engine ([`diff`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Visual definitions used by renderers ([`draw`] module)

pub mod color;
pub mod diagram;
pub mod diff;
pub mod draw;
pub mod identifier;
