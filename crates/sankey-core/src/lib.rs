//! Sankey Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Sankey layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Graph**: The caller-facing input model of a flow graph ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
