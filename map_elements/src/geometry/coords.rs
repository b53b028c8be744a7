//! Polyline coordinate sequences: single or multi-part lines.

use super::LatLng;

/// Internal geometry representation of a polyline.
///
/// A flat position sequence describes a single line, a nested one a
/// multi-part line. Inputs in any accepted coordinate form are normalized
/// into this representation on conversion; reads always return it as-is.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LineCoords {
    Single(Vec<LatLng>),
    Multi(Vec<Vec<LatLng>>),
}

impl LineCoords {
    /// An empty single-part line.
    pub fn empty() -> Self {
        Self::Single(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Total number of positions across all parts.
    pub fn point_count(&self) -> usize {
        match self {
            Self::Single(pts) => pts.len(),
            Self::Multi(parts) => parts.iter().map(Vec::len).sum(),
        }
    }

    /// Appends positions to the line, or to the last part of a multi-part
    /// line.
    pub(crate) fn append(&mut self, pts: impl IntoIterator<Item = LatLng>) {
        match self {
            Self::Single(existing) => existing.extend(pts),
            Self::Multi(parts) => match parts.last_mut() {
                Some(last) => last.extend(pts),
                None => parts.push(pts.into_iter().collect()),
            },
        }
    }
}

impl Default for LineCoords {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<LatLng>> for LineCoords {
    fn from(pts: Vec<LatLng>) -> Self {
        Self::Single(pts)
    }
}

impl From<Vec<(f64, f64)>> for LineCoords {
    fn from(pts: Vec<(f64, f64)>) -> Self {
        Self::Single(pts.into_iter().map(LatLng::from).collect())
    }
}

impl From<Vec<[f64; 2]>> for LineCoords {
    fn from(pts: Vec<[f64; 2]>) -> Self {
        Self::Single(pts.into_iter().map(LatLng::from).collect())
    }
}

impl From<Vec<Vec<LatLng>>> for LineCoords {
    fn from(parts: Vec<Vec<LatLng>>) -> Self {
        Self::Multi(parts)
    }
}

impl From<Vec<Vec<(f64, f64)>>> for LineCoords {
    fn from(parts: Vec<Vec<(f64, f64)>>) -> Self {
        Self::Multi(
            parts
                .into_iter()
                .map(|part| part.into_iter().map(LatLng::from).collect())
                .collect(),
        )
    }
}

impl From<Vec<Vec<[f64; 2]>>> for LineCoords {
    fn from(parts: Vec<Vec<[f64; 2]>>) -> Self {
        Self::Multi(
            parts
                .into_iter()
                .map(|part| part.into_iter().map(LatLng::from).collect())
                .collect(),
        )
    }
}
