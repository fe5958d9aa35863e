//! Configuration types for Sankey layout.
//!
//! This module provides configuration structures that control how flow graphs
//! are laid out. All types implement [`serde::Deserialize`] for flexible
//! loading from external sources, and every field has a default so partial
//! configuration files are accepted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and link settings.
//! - [`LayoutConfig`] - Canvas extents, node sizing and relaxation settings.
//! - [`LinkConfig`] - Settings for the geometry of link bands.
//! - [`LayeringPolicy`] - Where nodes without links on one side are placed.
//!
//! # Example
//!
//! ```
//! # use sankey::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 32);
//! assert_eq!(config.link().curvature(), 0.5);
//! ```

use serde::Deserialize;

/// Top-level application configuration combining layout and link settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Link geometry configuration section.
    #[serde(default)]
    link: LinkConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and link configurations.
    ///
    /// # Arguments
    ///
    /// * `layout` - Canvas and node placement settings.
    /// * `link` - Link band geometry settings.
    pub fn new(layout: LayoutConfig, link: LinkConfig) -> Self {
        Self { layout, link }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the link configuration.
    pub fn link(&self) -> &LinkConfig {
        &self.link
    }
}

/// Post-processing applied to the layers computed by breadth-first leveling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayeringPolicy {
    /// Nodes without outgoing links are moved to the rightmost layer.
    #[default]
    MoveSinksRight,

    /// Nodes without incoming links are first pulled right, to the layer just
    /// before their nearest target, then sinks are moved to the rightmost layer.
    MoveSourcesRight,
}

/// Canvas extents and node placement settings.
///
/// Built once and passed by reference to the layout; it is never mutated by it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_padding: f32,
    width: f32,
    height: f32,
    iterations: usize,
    layering: LayeringPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_padding: 8.0,
            width: 960.0,
            height: 500.0,
            iterations: 32,
            layering: LayeringPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Set the horizontal size of every node
    pub fn with_node_width(mut self, node_width: f32) -> Self {
        self.node_width = node_width;
        self
    }

    /// Set the vertical gap between nodes stacked in the same layer
    pub fn with_node_padding(mut self, node_padding: f32) -> Self {
        self.node_padding = node_padding;
        self
    }

    /// Set the available canvas extents
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of relaxation iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the layering post-processing policy
    pub fn with_layering(mut self, layering: LayeringPolicy) -> Self {
        self.layering = layering;
        self
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn layering(&self) -> LayeringPolicy {
        self.layering
    }
}

/// Geometry settings for link bands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Fraction of the horizontal span at which the curve's control points sit.
    curvature: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { curvature: 0.5 }
    }
}

impl LinkConfig {
    pub fn new(curvature: f32) -> Self {
        Self { curvature }
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let config = LayoutConfig::default();

        assert_eq!(config.node_width(), 24.0);
        assert_eq!(config.node_padding(), 8.0);
        assert_eq!(config.iterations(), 32);
        assert_eq!(config.layering(), LayeringPolicy::MoveSinksRight);
    }

    #[test]
    fn test_builder_setters() {
        let config = LayoutConfig::default()
            .with_node_width(15.0)
            .with_node_padding(10.0)
            .with_size(700.0, 400.0)
            .with_iterations(0)
            .with_layering(LayeringPolicy::MoveSourcesRight);

        assert_eq!(config.node_width(), 15.0);
        assert_eq!(config.node_padding(), 10.0);
        assert_eq!(config.width(), 700.0);
        assert_eq!(config.height(), 400.0);
        assert_eq!(config.iterations(), 0);
        assert_eq!(config.layering(), LayeringPolicy::MoveSourcesRight);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            height = 300.0
            layering = "move_sources_right"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().height(), 300.0);
        assert_eq!(config.layout().width(), 960.0);
        assert_eq!(config.layout().layering(), LayeringPolicy::MoveSourcesRight);
        assert_eq!(config.link().curvature(), 0.5);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.layout(), &LayoutConfig::default());
        assert_eq!(config.link(), &LinkConfig::default());
    }
}
