//! Notification channels and the shape's named-event registry.
//!
//! Everything here is single-threaded and cooperative: emission runs every
//! callback to completion before returning. Neither type holds its internal
//! borrow while callbacks run, so a callback may subscribe, unsubscribe or
//! call back into a shape. Recursive emission cycles are possible and
//! unguarded.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::geometry::LatLng;

/// Handle returned by [`EventChannel::subscribe`].
pub type SubscriptionId = usize;

type Subscriber<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Single-value, multi-subscriber notification channel.
///
/// There is no buffering: subscribers only see emissions made after they
/// subscribed. Handles are cheap clones sharing one subscriber list.
pub struct EventChannel<T: 'static> {
    inner: Rc<RefCell<ChannelInner<T>>>,
}

struct ChannelInner<T: 'static> {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Registers a subscriber and returns its id.
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let subscriber: Subscriber<T> = Rc::new(RefCell::new(f));
        inner.subscribers.push((id, subscriber));
        id
    }

    /// Removes a subscriber; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Delivers `value` to every current subscriber in registration order.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        for subscriber in snapshot {
            (&mut *subscriber.borrow_mut())(value);
        }
    }
}

/// Native events a shape can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Remove,
    PopupOpen,
    PopupClose,
    TooltipOpen,
    TooltipClose,
    Click,
    DblClick,
    MouseDown,
    MouseOver,
    MouseOut,
    ContextMenu,
}

/// Payload of an attach/detach event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerEvent;

/// Payload of a pointer event dispatched by the host surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Geographic location of the pointer.
    pub latlng: LatLng,
    /// Pixel position relative to the surface container.
    pub container_point: (f64, f64),
}

/// Payload of a popup open/close event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupEvent {
    pub content: String,
}

/// Payload of a tooltip open/close event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipEvent {
    pub content: String,
}

/// Event payload dispatched through a shape's [`EventTarget`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEvent {
    Layer(LayerEvent),
    Mouse(MouseEvent),
    Popup(PopupEvent),
    Tooltip(TooltipEvent),
}

type Handler = Rc<RefCell<dyn FnMut(&ShapeEvent)>>;

/// Registration and dispatch surface for a shape's native events.
#[derive(Clone, Default)]
pub struct EventTarget {
    handlers: Rc<RefCell<HashMap<EventKind, Vec<Handler>>>>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the named event.
    pub fn on(&self, kind: EventKind, f: impl FnMut(&ShapeEvent) + 'static) {
        let handler: Handler = Rc::new(RefCell::new(f));
        self.handlers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Runs every handler registered for `kind` in registration order.
    pub fn fire(&self, kind: EventKind, event: &ShapeEvent) {
        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .get(&kind)
            .map(|handlers| handlers.iter().map(Rc::clone).collect())
            .unwrap_or_default();
        for handler in snapshot {
            (&mut *handler.borrow_mut())(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_to_every_subscriber_in_order() {
        let channel = EventChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v: &i32| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        channel.emit(&1);
        assert_eq!(*seen.borrow(), vec!["a1", "b1"]);
    }

    #[test]
    fn late_subscribers_miss_prior_emissions() {
        let channel = EventChannel::new();
        channel.emit(&1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        channel.subscribe(move |v: &i32| sink.borrow_mut().push(*v));
        channel.emit(&2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = EventChannel::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = channel.subscribe(move |_: &()| *sink.borrow_mut() += 1);
        channel.emit(&());
        channel.unsubscribe(id);
        channel.emit(&());
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn subscribing_during_emission_does_not_deliver_current_value() {
        let channel: EventChannel<i32> = EventChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let reentrant = channel.clone();
        let sink = Rc::clone(&seen);
        channel.subscribe(move |v: &i32| {
            sink.borrow_mut().push(*v);
            let inner_sink = Rc::clone(&sink);
            reentrant.subscribe(move |v: &i32| inner_sink.borrow_mut().push(100 + *v));
        });
        channel.emit(&1);
        assert_eq!(*seen.borrow(), vec![1]);
        channel.emit(&2);
        assert_eq!(seen.borrow().first(), Some(&1));
        assert!(seen.borrow().contains(&2));
        assert!(seen.borrow().contains(&102));
    }

    #[test]
    fn event_target_dispatches_by_kind() {
        let target = EventTarget::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        target.on(EventKind::Add, move |_| sink.borrow_mut().push("add"));
        let sink = Rc::clone(&seen);
        target.on(EventKind::Remove, move |_| sink.borrow_mut().push("remove"));
        target.fire(EventKind::Add, &ShapeEvent::Layer(LayerEvent));
        assert_eq!(*seen.borrow(), vec!["add"]);
    }
}
