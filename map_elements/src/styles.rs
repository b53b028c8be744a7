//! Path styling records shared by shapes and elements.

/// Stroke end-cap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke corner-join shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Interior fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    NonZero,
    #[default]
    EvenOdd,
}

/// Partial style update.
///
/// Only the keys present are applied, and only those keys are notified
/// downstream, whether or not the value differs from the current one.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<LineCap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_join: Option<LineJoin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_rule: Option<FillRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl PathStyle {
    /// Single-key update for the stroke flag.
    pub fn stroke(value: bool) -> Self {
        Self {
            stroke: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the stroke color.
    pub fn color(value: impl Into<String>) -> Self {
        Self {
            color: Some(value.into()),
            ..Self::default()
        }
    }

    /// Single-key update for the stroke weight.
    pub fn weight(value: f64) -> Self {
        Self {
            weight: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the stroke opacity.
    pub fn opacity(value: f64) -> Self {
        Self {
            opacity: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the end-cap shape.
    pub fn line_cap(value: LineCap) -> Self {
        Self {
            line_cap: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the corner-join shape.
    pub fn line_join(value: LineJoin) -> Self {
        Self {
            line_join: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the dash pattern.
    pub fn dash_array(value: impl Into<String>) -> Self {
        Self {
            dash_array: Some(value.into()),
            ..Self::default()
        }
    }

    /// Single-key update for the dash offset.
    pub fn dash_offset(value: impl Into<String>) -> Self {
        Self {
            dash_offset: Some(value.into()),
            ..Self::default()
        }
    }

    /// Single-key update for the fill flag.
    pub fn fill(value: bool) -> Self {
        Self {
            fill: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the fill color.
    pub fn fill_color(value: impl Into<String>) -> Self {
        Self {
            fill_color: Some(value.into()),
            ..Self::default()
        }
    }

    /// Single-key update for the fill opacity.
    pub fn fill_opacity(value: f64) -> Self {
        Self {
            fill_opacity: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the fill rule.
    pub fn fill_rule(value: FillRule) -> Self {
        Self {
            fill_rule: Some(value),
            ..Self::default()
        }
    }

    /// Single-key update for the container class name.
    pub fn class_name(value: impl Into<String>) -> Self {
        Self {
            class_name: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Fully resolved style options as the renderer sees them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathOptions {
    pub stroke: bool,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub dash_array: Option<String>,
    pub dash_offset: Option<String>,
    pub fill: bool,
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
    pub fill_rule: FillRule,
    pub class_name: Option<String>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            stroke: true,
            color: "#3388ff".to_string(),
            weight: 3.0,
            opacity: 1.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash_array: None,
            dash_offset: None,
            fill: false,
            fill_color: None,
            fill_opacity: 0.2,
            fill_rule: FillRule::EvenOdd,
            class_name: None,
        }
    }
}

impl PathOptions {
    /// Merges a partial update: present keys override, absent keys keep
    /// their current values.
    pub fn apply(&mut self, style: &PathStyle) {
        if let Some(v) = style.stroke {
            self.stroke = v;
        }
        if let Some(v) = &style.color {
            self.color = v.clone();
        }
        if let Some(v) = style.weight {
            self.weight = v;
        }
        if let Some(v) = style.opacity {
            self.opacity = v;
        }
        if let Some(v) = style.line_cap {
            self.line_cap = v;
        }
        if let Some(v) = style.line_join {
            self.line_join = v;
        }
        if let Some(v) = &style.dash_array {
            self.dash_array = Some(v.clone());
        }
        if let Some(v) = &style.dash_offset {
            self.dash_offset = Some(v.clone());
        }
        if let Some(v) = style.fill {
            self.fill = v;
        }
        if let Some(v) = &style.fill_color {
            self.fill_color = Some(v.clone());
        }
        if let Some(v) = style.fill_opacity {
            self.fill_opacity = v;
        }
        if let Some(v) = style.fill_rule {
            self.fill_rule = v;
        }
        if let Some(v) = &style.class_name {
            self.class_name = Some(v.clone());
        }
    }
}
