//! Reactive polyline element: bindable properties mirrored by change
//! channels over an imperative shape.
//!
//! The element owns its shape by composition and exposes only the documented
//! operations. Every setter completes the shape mutation before any channel
//! emits, so a subscriber reacting to a notification observes fully updated
//! state. Subscribers run synchronously and unguarded; a subscriber that
//! re-enters a setter through a shared handle is on its own.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::annotations::{Popup, Tooltip};
use crate::events::{
    EventChannel, EventKind, EventTarget, LayerEvent, MouseEvent, PopupEvent, ShapeEvent,
    TooltipEvent,
};
use crate::geometry::{LatLng, LineCoords};
use crate::gis::{self, FeatureEnvelope};
use crate::map::MapSurface;
use crate::shape::Polyline;
use crate::styles::{FillRule, LineCap, LineJoin, PathOptions, PathStyle};

/// Change-notification channels mirroring the element's bindable properties.
///
/// Per-attribute style channels fire for exactly the keys present in a
/// partial update; `style` fires once per update with the merged options.
pub struct ChangeChannels<P: 'static> {
    pub display: EventChannel<bool>,
    pub stroke: EventChannel<bool>,
    pub color: EventChannel<String>,
    pub weight: EventChannel<f64>,
    pub opacity: EventChannel<f64>,
    pub line_cap: EventChannel<LineCap>,
    pub line_join: EventChannel<LineJoin>,
    pub dash_array: EventChannel<String>,
    pub dash_offset: EventChannel<String>,
    pub fill: EventChannel<bool>,
    pub fill_color: EventChannel<String>,
    pub fill_opacity: EventChannel<f64>,
    pub fill_rule: EventChannel<FillRule>,
    pub class_name: EventChannel<String>,
    pub style: EventChannel<PathOptions>,
    pub latlngs: EventChannel<LineCoords>,
    pub feature: EventChannel<FeatureEnvelope<P>>,
}

impl<P> ChangeChannels<P> {
    fn new() -> Self {
        Self {
            display: EventChannel::new(),
            stroke: EventChannel::new(),
            color: EventChannel::new(),
            weight: EventChannel::new(),
            opacity: EventChannel::new(),
            line_cap: EventChannel::new(),
            line_join: EventChannel::new(),
            dash_array: EventChannel::new(),
            dash_offset: EventChannel::new(),
            fill: EventChannel::new(),
            fill_color: EventChannel::new(),
            fill_opacity: EventChannel::new(),
            fill_rule: EventChannel::new(),
            class_name: EventChannel::new(),
            style: EventChannel::new(),
            latlngs: EventChannel::new(),
            feature: EventChannel::new(),
        }
    }
}

/// Native shape events re-exposed as element channels, forwarded verbatim.
pub struct ShapeEventChannels {
    pub add: EventChannel<LayerEvent>,
    pub remove: EventChannel<LayerEvent>,
    pub popup_open: EventChannel<PopupEvent>,
    pub popup_close: EventChannel<PopupEvent>,
    pub tooltip_open: EventChannel<TooltipEvent>,
    pub tooltip_close: EventChannel<TooltipEvent>,
    pub click: EventChannel<MouseEvent>,
    pub dbl_click: EventChannel<MouseEvent>,
    pub mouse_down: EventChannel<MouseEvent>,
    pub mouse_over: EventChannel<MouseEvent>,
    pub mouse_out: EventChannel<MouseEvent>,
    pub context_menu: EventChannel<MouseEvent>,
}

impl ShapeEventChannels {
    fn new() -> Self {
        Self {
            add: EventChannel::new(),
            remove: EventChannel::new(),
            popup_open: EventChannel::new(),
            popup_close: EventChannel::new(),
            tooltip_open: EventChannel::new(),
            tooltip_close: EventChannel::new(),
            click: EventChannel::new(),
            dbl_click: EventChannel::new(),
            mouse_down: EventChannel::new(),
            mouse_over: EventChannel::new(),
            mouse_out: EventChannel::new(),
            context_menu: EventChannel::new(),
        }
    }
}

/// Polyline exposed as a bindable element on a map surface.
pub struct PolylineElement<P: 'static = geojson::JsonObject> {
    shape: Rc<RefCell<Polyline>>,
    properties: P,
    changes: ChangeChannels<P>,
    shape_events: ShapeEventChannels,
    annotations_bound: bool,
}

impl<P: Clone + Default> PolylineElement<P> {
    /// Creates an empty element with an empty property bag and registers it
    /// on `map` immediately.
    pub fn new(map: &Rc<MapSurface>) -> Self {
        Self::with_properties(map, P::default())
    }

    /// Creates an empty element carrying `properties` and registers it on
    /// `map` immediately.
    pub fn with_properties(map: &Rc<MapSurface>, properties: P) -> Self {
        let shape = Rc::new(RefCell::new(Polyline::new(Vec::<LatLng>::new())));
        let changes = ChangeChannels::new();
        let shape_events = ShapeEventChannels::new();

        let events = shape.borrow().events();

        // Attach/detach drive the derived visibility notification.
        let display = changes.display.clone();
        events.on(EventKind::Add, move |_| display.emit(&true));
        let display = changes.display.clone();
        events.on(EventKind::Remove, move |_| display.emit(&false));

        map.add_layer(&shape);

        forward_layer(&events, EventKind::Add, &shape_events.add);
        forward_layer(&events, EventKind::Remove, &shape_events.remove);
        forward_popup(&events, EventKind::PopupOpen, &shape_events.popup_open);
        forward_popup(&events, EventKind::PopupClose, &shape_events.popup_close);
        forward_tooltip(&events, EventKind::TooltipOpen, &shape_events.tooltip_open);
        forward_tooltip(&events, EventKind::TooltipClose, &shape_events.tooltip_close);
        forward_mouse(&events, EventKind::Click, &shape_events.click);
        forward_mouse(&events, EventKind::DblClick, &shape_events.dbl_click);
        forward_mouse(&events, EventKind::MouseDown, &shape_events.mouse_down);
        forward_mouse(&events, EventKind::MouseOver, &shape_events.mouse_over);
        forward_mouse(&events, EventKind::MouseOut, &shape_events.mouse_out);
        forward_mouse(&events, EventKind::ContextMenu, &shape_events.context_menu);

        Self {
            shape,
            properties,
            changes,
            shape_events,
            annotations_bound: false,
        }
    }

    /// The wrapped shape, e.g. for dispatching native events or re-adding
    /// the element to a surface.
    pub fn shape(&self) -> &Rc<RefCell<Polyline>> {
        &self.shape
    }

    /// Property change channels.
    pub fn changes(&self) -> &ChangeChannels<P> {
        &self.changes
    }

    /// Forwarded native event channels.
    pub fn shape_events(&self) -> &ShapeEventChannels {
        &self.shape_events
    }

    /// Post-first-render hook: binds the optional annotations to the shape.
    /// Binding is attempted at most once per element instance.
    pub fn bind_annotations(
        &mut self,
        popup: Option<Rc<RefCell<Popup>>>,
        tooltip: Option<Rc<RefCell<Tooltip>>>,
    ) {
        if self.annotations_bound {
            return;
        }
        self.annotations_bound = true;
        let mut shape = self.shape.borrow_mut();
        if let Some(popup) = popup {
            shape.bind_popup(popup);
        }
        if let Some(tooltip) = tooltip {
            shape.bind_tooltip(tooltip);
        }
    }

    /// Detaches the shape from its current host surface.
    pub fn destroy(&mut self) {
        let surface = self.shape.borrow().surface();
        if let Some(surface) = surface {
            surface.remove_layer(&self.shape);
        }
    }

    // ── geometry ─────────────────────────────────────────────────────────

    /// Replaces the geometry, then notifies `latlngs` and `feature` with the
    /// shape's resulting internal representation.
    pub fn set_latlngs(&mut self, latlngs: impl Into<LineCoords>) {
        let internal = {
            let mut shape = self.shape.borrow_mut();
            shape.set_latlngs(latlngs);
            shape.latlngs().clone()
        };
        self.changes.latlngs.emit(&internal);
        let feature = self.feature();
        self.changes.feature.emit(&feature);
    }

    /// Appends positions, then notifies `latlngs` and `feature`.
    pub fn add_latlngs(&mut self, pts: impl IntoIterator<Item = impl Into<LatLng>>) {
        let internal = {
            let mut shape = self.shape.borrow_mut();
            shape.add_latlngs(pts);
            shape.latlngs().clone()
        };
        self.changes.latlngs.emit(&internal);
        let feature = self.feature();
        self.changes.feature.emit(&feature);
    }

    /// Appends one position, then notifies `latlngs` and `feature`.
    pub fn add_latlng(&mut self, pt: impl Into<LatLng>) {
        self.add_latlngs([pt.into()]);
    }

    /// The shape's internal coordinate representation.
    pub fn latlngs(&self) -> LineCoords {
        self.shape.borrow().latlngs().clone()
    }

    // ── feature envelope ─────────────────────────────────────────────────

    /// Derived envelope: current internal geometry plus the current property
    /// bag.
    pub fn feature(&self) -> FeatureEnvelope<P> {
        self.shape.borrow().to_feature(&self.properties)
    }

    /// Imports an envelope. Only `LineString` and `MultiLineString`
    /// geometries are accepted; anything else fails without mutating
    /// existing geometry or properties. On success the property bag is
    /// replaced before the geometry is applied.
    pub fn set_feature(&mut self, feature: FeatureEnvelope<P>) -> io::Result<()> {
        let latlngs = gis::coords_to_latlngs(&feature.geometry)?;
        self.properties = feature.properties;
        self.set_latlngs(latlngs);
        Ok(())
    }

    // ── style ────────────────────────────────────────────────────────────

    /// Applies a partial style. Per-key notifications fire for exactly the
    /// keys present in `style` (presence, not value difference), followed
    /// by one aggregate notification carrying the merged options.
    pub fn set_style(&mut self, style: &PathStyle) {
        let merged = {
            let mut shape = self.shape.borrow_mut();
            shape.apply_style(style);
            shape.options().style.clone()
        };
        if let Some(v) = style.stroke {
            self.changes.stroke.emit(&v);
        }
        if let Some(v) = &style.color {
            self.changes.color.emit(v);
        }
        if let Some(v) = style.weight {
            self.changes.weight.emit(&v);
        }
        if let Some(v) = style.opacity {
            self.changes.opacity.emit(&v);
        }
        if let Some(v) = style.line_cap {
            self.changes.line_cap.emit(&v);
        }
        if let Some(v) = style.line_join {
            self.changes.line_join.emit(&v);
        }
        if let Some(v) = &style.dash_array {
            self.changes.dash_array.emit(v);
        }
        if let Some(v) = &style.dash_offset {
            self.changes.dash_offset.emit(v);
        }
        if let Some(v) = style.fill {
            self.changes.fill.emit(&v);
        }
        if let Some(v) = &style.fill_color {
            self.changes.fill_color.emit(v);
        }
        if let Some(v) = style.fill_opacity {
            self.changes.fill_opacity.emit(&v);
        }
        if let Some(v) = style.fill_rule {
            self.changes.fill_rule.emit(&v);
        }
        if let Some(v) = &style.class_name {
            self.changes.class_name.emit(v);
        }
        self.changes.style.emit(&merged);
    }

    /// The shape's resolved style options.
    pub fn style(&self) -> PathOptions {
        self.shape.borrow().options().style.clone()
    }

    pub fn set_stroke(&mut self, value: bool) {
        self.set_style(&PathStyle::stroke(value));
    }

    pub fn stroke(&self) -> bool {
        self.shape.borrow().options().style.stroke
    }

    pub fn set_color(&mut self, value: impl Into<String>) {
        self.set_style(&PathStyle::color(value));
    }

    pub fn color(&self) -> String {
        self.shape.borrow().options().style.color.clone()
    }

    pub fn set_weight(&mut self, value: f64) {
        self.set_style(&PathStyle::weight(value));
    }

    pub fn weight(&self) -> f64 {
        self.shape.borrow().options().style.weight
    }

    pub fn set_opacity(&mut self, value: f64) {
        self.set_style(&PathStyle::opacity(value));
    }

    pub fn opacity(&self) -> f64 {
        self.shape.borrow().options().style.opacity
    }

    pub fn set_line_cap(&mut self, value: LineCap) {
        self.set_style(&PathStyle::line_cap(value));
    }

    pub fn line_cap(&self) -> LineCap {
        self.shape.borrow().options().style.line_cap
    }

    pub fn set_line_join(&mut self, value: LineJoin) {
        self.set_style(&PathStyle::line_join(value));
    }

    pub fn line_join(&self) -> LineJoin {
        self.shape.borrow().options().style.line_join
    }

    pub fn set_dash_array(&mut self, value: impl Into<String>) {
        self.set_style(&PathStyle::dash_array(value));
    }

    pub fn dash_array(&self) -> Option<String> {
        self.shape.borrow().options().style.dash_array.clone()
    }

    pub fn set_dash_offset(&mut self, value: impl Into<String>) {
        self.set_style(&PathStyle::dash_offset(value));
    }

    pub fn dash_offset(&self) -> Option<String> {
        self.shape.borrow().options().style.dash_offset.clone()
    }

    pub fn set_fill(&mut self, value: bool) {
        self.set_style(&PathStyle::fill(value));
    }

    pub fn fill(&self) -> bool {
        self.shape.borrow().options().style.fill
    }

    pub fn set_fill_color(&mut self, value: impl Into<String>) {
        self.set_style(&PathStyle::fill_color(value));
    }

    pub fn fill_color(&self) -> Option<String> {
        self.shape.borrow().options().style.fill_color.clone()
    }

    pub fn set_fill_opacity(&mut self, value: f64) {
        self.set_style(&PathStyle::fill_opacity(value));
    }

    pub fn fill_opacity(&self) -> f64 {
        self.shape.borrow().options().style.fill_opacity
    }

    pub fn set_fill_rule(&mut self, value: FillRule) {
        self.set_style(&PathStyle::fill_rule(value));
    }

    pub fn fill_rule(&self) -> FillRule {
        self.shape.borrow().options().style.fill_rule
    }

    pub fn set_class_name(&mut self, value: impl Into<String>) {
        self.set_style(&PathStyle::class_name(value));
    }

    pub fn class_name(&self) -> Option<String> {
        self.shape.borrow().options().style.class_name.clone()
    }

    // ── visibility ───────────────────────────────────────────────────────

    /// Derived visibility: the container exists, is not hidden and has a
    /// parent. Never fails, even before first render.
    pub fn display(&self) -> bool {
        match self.shape.borrow().container() {
            Some(container) => !container.hidden() && container.has_parent(),
            None => false,
        }
    }

    /// Shows or hides the rendered container. A no-op when the value is
    /// already current, and silently tolerated before first render.
    pub fn set_display(&mut self, value: bool) {
        if self.display() == value {
            return;
        }
        let container = self.shape.borrow().container();
        let Some(container) = container else {
            return;
        };
        self.changes.display.emit(&value);
        container.set_hidden(!value);
    }

    // ── interactivity & rendering hints ──────────────────────────────────

    pub fn interactive(&self) -> bool {
        self.shape.borrow().options().interactive
    }

    /// Toggles event capture. Capture wiring is established at attach time,
    /// so the shape is structurally detached and re-attached to its current
    /// surface.
    pub fn set_interactive(&mut self, value: bool) {
        let surface = self.shape.borrow().surface();
        let mut shape = self.shape.borrow_mut();
        shape.options_mut().interactive = value;
        if let Some(surface) = &surface {
            shape.on_remove();
            shape.on_add(surface);
        }
    }

    pub fn smooth_factor(&self) -> f64 {
        self.shape.borrow().options().smooth_factor
    }

    /// Geometry-affecting rendering hint: mutates the option and redraws.
    pub fn set_smooth_factor(&mut self, value: f64) {
        let mut shape = self.shape.borrow_mut();
        shape.options_mut().smooth_factor = value;
        shape.redraw();
    }

    pub fn no_clip(&self) -> bool {
        self.shape.borrow().options().no_clip
    }

    /// Geometry-affecting rendering hint: mutates the option and redraws.
    pub fn set_no_clip(&mut self, value: bool) {
        let mut shape = self.shape.borrow_mut();
        shape.options_mut().no_clip = value;
        shape.redraw();
    }

    // ── metadata ─────────────────────────────────────────────────────────

    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Replaces the property bag and notifies `feature`; geometry is
    /// unchanged.
    pub fn set_properties(&mut self, properties: P) {
        self.properties = properties;
        let feature = self.feature();
        self.changes.feature.emit(&feature);
    }
}

fn forward_layer(events: &EventTarget, kind: EventKind, channel: &EventChannel<LayerEvent>) {
    let channel = channel.clone();
    events.on(kind, move |event| {
        if let ShapeEvent::Layer(ev) = event {
            channel.emit(ev);
        }
    });
}

fn forward_mouse(events: &EventTarget, kind: EventKind, channel: &EventChannel<MouseEvent>) {
    let channel = channel.clone();
    events.on(kind, move |event| {
        if let ShapeEvent::Mouse(ev) = event {
            channel.emit(ev);
        }
    });
}

fn forward_popup(events: &EventTarget, kind: EventKind, channel: &EventChannel<PopupEvent>) {
    let channel = channel.clone();
    events.on(kind, move |event| {
        if let ShapeEvent::Popup(ev) = event {
            channel.emit(ev);
        }
    });
}

fn forward_tooltip(events: &EventTarget, kind: EventKind, channel: &EventChannel<TooltipEvent>) {
    let channel = channel.clone();
    events.on(kind, move |event| {
        if let ShapeEvent::Tooltip(ev) = event {
            channel.emit(ev);
        }
    });
}
