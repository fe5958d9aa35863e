//! JSON export of a computed layout.
//!
//! The document mirrors the input graph: nodes and links keep their input
//! order, annotated with every derived field. Each link also carries its band
//! centre line as SVG path data.

use std::{fs, io, path::Path};

use log::debug;
use serde::Serialize;

use sankey::{LayoutLink, LayoutNode, SankeyError, SankeyLayout, geometry::CubicCurve};

/// Serializable view of a [`SankeyLayout`].
#[derive(Debug, Serialize)]
pub struct LayoutDocument<'a> {
    layer_count: usize,
    ky: f32,
    nodes: &'a [LayoutNode],
    links: Vec<LinkEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct LinkEntry<'a> {
    #[serde(flatten)]
    link: &'a LayoutLink,
    path: String,
}

impl<'a> LayoutDocument<'a> {
    /// Pairs every link of `layout` with its path.
    ///
    /// `paths` must be in link order, as returned by
    /// [`SankeyBuilder::link_paths`](sankey::SankeyBuilder::link_paths).
    pub fn new(layout: &'a SankeyLayout, paths: &[CubicCurve]) -> Self {
        let links = layout
            .links()
            .iter()
            .zip(paths)
            .map(|(link, path)| LinkEntry {
                link,
                path: path.to_path_data(),
            })
            .collect();

        Self {
            layer_count: layout.layer_count(),
            ky: layout.ky(),
            nodes: layout.nodes(),
            links,
        }
    }

    /// Writes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SankeyError::Io`] if serialization or the write fails.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SankeyError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, json)?;
        debug!(path = path.display().to_string(), links = self.links.len(); "Layout written");
        Ok(())
    }
}
