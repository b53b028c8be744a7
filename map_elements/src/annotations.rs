//! Popup and tooltip annotations bindable to a shape.

/// Popup annotation. Built by the host and bound to a shape after the first
/// render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Popup {
    pub content: String,
    #[serde(skip)]
    pub open: bool,
}

impl Popup {
    /// Creates a closed popup with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            open: false,
        }
    }
}

/// Tooltip annotation. Built by the host and bound to a shape after the
/// first render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tooltip {
    pub content: String,
    #[serde(skip)]
    pub open: bool,
}

impl Tooltip {
    /// Creates a closed tooltip with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            open: false,
        }
    }
}
