//! Shared test utilities for the stratum workspace.
//!
//! Builders for [`ConfigLayer`](stratum_core::ConfigLayer) values so test
//! suites can describe a scenario in a few lines instead of hand-writing JSON
//! documents. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`layer`]: [`LayerBuilder`] for settings files, [`McpLayerBuilder`] for MCP files
//! - [`scenario`]: canned layer stacks shared by several suites

pub mod layer;
pub mod scenario;

pub use layer::{LayerBuilder, McpLayerBuilder};
