//! Host map surface: render root and layer registry.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::events::{EventKind, LayerEvent, ShapeEvent};
use crate::shape::{Polyline, RenderNode};

/// Container managing a collection of shapes and their rendering.
///
/// A surface is either ready (layers get containers as they attach) or
/// deferred: layers attach without containers until [`MapSurface::render`]
/// materializes them, mirroring a host whose renderer comes up after the
/// first layers are registered.
pub struct MapSurface {
    render_root: Rc<RenderNode>,
    ready: Cell<bool>,
    layers: RefCell<Vec<Rc<RefCell<Polyline>>>>,
    // Handle to the owning Rc so attach hooks can be given the surface.
    self_ref: RefCell<Weak<MapSurface>>,
}

impl MapSurface {
    /// Surface with a ready renderer.
    pub fn new() -> Rc<Self> {
        let surface = Rc::new(Self {
            render_root: Rc::new(RenderNode::default()),
            ready: Cell::new(true),
            layers: RefCell::new(Vec::new()),
            self_ref: RefCell::new(Weak::new()),
        });
        *surface.self_ref.borrow_mut() = Rc::downgrade(&surface);
        surface
    }

    /// Surface whose renderer is not yet set up.
    pub fn deferred() -> Rc<Self> {
        let surface = Self::new();
        surface.ready.set(false);
        surface
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Root node rendered containers are parented under.
    pub fn render_root(&self) -> Rc<RenderNode> {
        Rc::clone(&self.render_root)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.borrow().len()
    }

    pub fn has_layer(&self, layer: &Rc<RefCell<Polyline>>) -> bool {
        self.layers.borrow().iter().any(|l| Rc::ptr_eq(l, layer))
    }

    /// Registers a shape as a layer, runs its attach hook and fires its
    /// `Add` event. Re-adding a registered layer is a no-op.
    pub fn add_layer(&self, layer: &Rc<RefCell<Polyline>>) {
        let Some(surface) = self.self_ref.borrow().upgrade() else {
            return;
        };
        if self.has_layer(layer) {
            return;
        }
        self.layers.borrow_mut().push(Rc::clone(layer));
        layer.borrow_mut().on_add(&surface);
        log::debug!("layer attached, {} on surface", self.layer_count());
        Polyline::fire(layer, EventKind::Add, &ShapeEvent::Layer(LayerEvent));
    }

    /// Fires the shape's `Remove` event, runs its detach hook and
    /// unregisters it. Removing an unknown layer is a no-op.
    pub fn remove_layer(&self, layer: &Rc<RefCell<Polyline>>) {
        if !self.has_layer(layer) {
            return;
        }
        Polyline::fire(layer, EventKind::Remove, &ShapeEvent::Layer(LayerEvent));
        layer.borrow_mut().on_remove();
        self.layers.borrow_mut().retain(|l| !Rc::ptr_eq(l, layer));
        log::debug!("layer detached, {} on surface", self.layer_count());
    }

    /// Marks the renderer ready and materializes containers for every layer
    /// attached so far.
    pub fn render(&self) {
        let Some(surface) = self.self_ref.borrow().upgrade() else {
            return;
        };
        if self.ready.replace(true) {
            return;
        }
        let layers: Vec<_> = self.layers.borrow().iter().map(Rc::clone).collect();
        for layer in layers {
            layer.borrow_mut().on_add(&surface);
        }
    }
}
