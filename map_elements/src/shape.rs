//! Headless imperative polyline primitive and its rendered-container model.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::annotations::{Popup, Tooltip};
use crate::events::{EventKind, EventTarget, PopupEvent, ShapeEvent, TooltipEvent};
use crate::geometry::{LatLng, LineCoords};
use crate::gis::{self, FeatureEnvelope};
use crate::map::MapSurface;
use crate::styles::{PathOptions, PathStyle};

/// Resolved options of a polyline shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeOptions {
    /// Whether the shape takes part in event capture. Changing this requires
    /// a structural re-add, as capture wiring is established at attach time.
    pub interactive: bool,
    /// Geometry simplification factor applied when rendering.
    pub smooth_factor: f64,
    /// Disables clipping of the rendered geometry to the viewport.
    pub no_clip: bool,
    #[serde(flatten)]
    pub style: PathOptions,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            smooth_factor: 1.0,
            no_clip: false,
            style: PathOptions::default(),
        }
    }
}

/// Minimal model of the rendered container element backing a shape.
///
/// The hidden flag survives detach; the parent link is cleared by it.
#[derive(Debug, Default)]
pub struct RenderNode {
    hidden: Cell<bool>,
    parent: RefCell<Option<Rc<RenderNode>>>,
    redraws: Cell<u32>,
}

impl RenderNode {
    pub fn hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    pub fn has_parent(&self) -> bool {
        self.parent.borrow().is_some()
    }

    /// Number of re-render requests seen by this container.
    pub fn redraw_count(&self) -> u32 {
        self.redraws.get()
    }

    pub(crate) fn set_parent(&self, parent: Option<Rc<RenderNode>>) {
        *self.parent.borrow_mut() = parent;
    }

    pub(crate) fn mark_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

/// Imperative polyline shape: mutable geometry and resolved options, native
/// events, rendered by a host surface.
///
/// Methods that fire events are associated functions over
/// `Rc<RefCell<Polyline>>` so the shape borrow is released before handlers
/// run.
pub struct Polyline {
    latlngs: LineCoords,
    options: ShapeOptions,
    events: EventTarget,
    container: Option<Rc<RenderNode>>,
    surface: Option<Weak<MapSurface>>,
    popup: Option<Rc<RefCell<Popup>>>,
    tooltip: Option<Rc<RefCell<Tooltip>>>,
}

impl Polyline {
    /// Creates a detached shape from an initial position list.
    pub fn new(latlngs: impl Into<LineCoords>) -> Self {
        Self {
            latlngs: latlngs.into(),
            options: ShapeOptions::default(),
            events: EventTarget::new(),
            container: None,
            surface: None,
            popup: None,
            tooltip: None,
        }
    }

    /// The internal coordinate representation.
    pub fn latlngs(&self) -> &LineCoords {
        &self.latlngs
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ShapeOptions {
        &mut self.options
    }

    /// Handle to the shape's event registry.
    pub fn events(&self) -> EventTarget {
        self.events.clone()
    }

    /// Replaces the whole geometry, normalizing the input.
    pub fn set_latlngs(&mut self, latlngs: impl Into<LineCoords>) {
        self.latlngs = latlngs.into();
        self.redraw();
    }

    /// Appends positions to the line (the last part of a multi-part line).
    pub fn add_latlngs(&mut self, pts: impl IntoIterator<Item = impl Into<LatLng>>) {
        self.latlngs.append(pts.into_iter().map(Into::into));
        self.redraw();
    }

    /// Appends one position.
    pub fn add_latlng(&mut self, pt: impl Into<LatLng>) {
        self.add_latlngs([pt.into()]);
    }

    /// Merges a partial style into the resolved options and redraws.
    pub fn apply_style(&mut self, style: &PathStyle) {
        self.options.style.apply(style);
        self.redraw();
    }

    /// Re-render hint; a no-op until the shape has been rendered.
    pub fn redraw(&mut self) {
        if let Some(container) = &self.container {
            container.mark_redraw();
        }
    }

    /// The rendered container, if rendering has occurred.
    pub fn container(&self) -> Option<Rc<RenderNode>> {
        self.container.clone()
    }

    /// The host surface this shape is currently attached to.
    pub fn surface(&self) -> Option<Rc<MapSurface>> {
        self.surface.as_ref().and_then(Weak::upgrade)
    }

    /// Structural attach hook: records the host and materializes the
    /// container under its render root. Fires no events.
    pub fn on_add(&mut self, surface: &Rc<MapSurface>) {
        self.surface = Some(Rc::downgrade(surface));
        if surface.is_ready() {
            let container = match &self.container {
                Some(existing) => Rc::clone(existing),
                None => {
                    let created = Rc::new(RenderNode::default());
                    self.container = Some(Rc::clone(&created));
                    created
                }
            };
            container.set_parent(Some(surface.render_root()));
        }
    }

    /// Structural detach hook: unlinks the container and drops the host
    /// reference. Fires no events.
    pub fn on_remove(&mut self) {
        if let Some(container) = &self.container {
            container.set_parent(None);
        }
        self.surface = None;
    }

    /// Binds a popup annotation, replacing any previous one.
    pub fn bind_popup(&mut self, popup: Rc<RefCell<Popup>>) {
        self.popup = Some(popup);
    }

    /// Binds a tooltip annotation, replacing any previous one.
    pub fn bind_tooltip(&mut self, tooltip: Rc<RefCell<Tooltip>>) {
        self.tooltip = Some(tooltip);
    }

    pub fn popup(&self) -> Option<Rc<RefCell<Popup>>> {
        self.popup.clone()
    }

    pub fn tooltip(&self) -> Option<Rc<RefCell<Tooltip>>> {
        self.tooltip.clone()
    }

    /// Exports the current geometry paired with the given property bag.
    pub fn to_feature<P: Clone>(&self, properties: &P) -> FeatureEnvelope<P> {
        FeatureEnvelope::new(gis::latlngs_to_geometry(&self.latlngs), properties.clone())
    }

    /// Dispatches a native event. The shape borrow is released before
    /// handlers run, so handlers may call back into the shape.
    pub fn fire(this: &Rc<RefCell<Self>>, kind: EventKind, event: &ShapeEvent) {
        let events = this.borrow().events();
        events.fire(kind, event);
    }

    /// Opens the bound popup and fires `PopupOpen`. No-op without a popup.
    pub fn open_popup(this: &Rc<RefCell<Self>>) {
        let Some((events, event)) = Self::popup_transition(this, true) else {
            return;
        };
        events.fire(EventKind::PopupOpen, &event);
    }

    /// Closes the bound popup and fires `PopupClose`. No-op without a popup.
    pub fn close_popup(this: &Rc<RefCell<Self>>) {
        let Some((events, event)) = Self::popup_transition(this, false) else {
            return;
        };
        events.fire(EventKind::PopupClose, &event);
    }

    /// Opens the bound tooltip and fires `TooltipOpen`. No-op without a
    /// tooltip.
    pub fn open_tooltip(this: &Rc<RefCell<Self>>) {
        let Some((events, event)) = Self::tooltip_transition(this, true) else {
            return;
        };
        events.fire(EventKind::TooltipOpen, &event);
    }

    /// Closes the bound tooltip and fires `TooltipClose`. No-op without a
    /// tooltip.
    pub fn close_tooltip(this: &Rc<RefCell<Self>>) {
        let Some((events, event)) = Self::tooltip_transition(this, false) else {
            return;
        };
        events.fire(EventKind::TooltipClose, &event);
    }

    fn popup_transition(
        this: &Rc<RefCell<Self>>,
        open: bool,
    ) -> Option<(EventTarget, ShapeEvent)> {
        let shape = this.borrow();
        let popup = shape.popup.clone()?;
        popup.borrow_mut().open = open;
        let content = popup.borrow().content.clone();
        Some((shape.events(), ShapeEvent::Popup(PopupEvent { content })))
    }

    fn tooltip_transition(
        this: &Rc<RefCell<Self>>,
        open: bool,
    ) -> Option<(EventTarget, ShapeEvent)> {
        let shape = this.borrow();
        let tooltip = shape.tooltip.clone()?;
        tooltip.borrow_mut().open = open;
        let content = tooltip.borrow().content.clone();
        Some((shape.events(), ShapeEvent::Tooltip(TooltipEvent { content })))
    }
}
