//! JSON pipe documents.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_pipe::PipeConfig;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Configuration plus waypoint lists, as stored on disk.
///
/// ```json
/// {
///   "config": { "radius": 0.5, "has_caps": true },
///   "pipes": [[[0, 0, 0], [0, 0, 10], [10, 0, 10]]]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeDocument {
    /// Shared geometric configuration. Missing fields take defaults.
    pub config: PipeConfig,
    /// One waypoint list per pipe.
    pub pipes: Vec<Vec<[f64; 3]>>,
}

impl PipeDocument {
    /// Read and parse a document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a document from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Waypoints as points.
    pub fn points(&self) -> Vec<Vec<Point3<f64>>> {
        self.pipes
            .iter()
            .map(|pipe| pipe.iter().map(|&p| Point3::from(p)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let doc = PipeDocument::parse(
            r#"{ "config": { "radius": 0.5, "has_caps": true },
                 "pipes": [[[0, 0, 0], [0, 0, 10]]] }"#,
        )
        .unwrap_or_default();

        assert!((doc.config.radius - 0.5).abs() < f64::EPSILON);
        assert!(doc.config.has_caps);
        assert_eq!(doc.config.edge_count, 10);
        assert_eq!(doc.points(), vec![vec![Point3::origin(), Point3::new(0.0, 0.0, 10.0)]]);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PipeDocument::parse("{}").ok(), Some(PipeDocument::default()));
    }

    #[test]
    fn rejects_bad_points() {
        assert!(PipeDocument::parse(r#"{ "pipes": [[[0, 0]]] }"#).is_err());
    }
}
