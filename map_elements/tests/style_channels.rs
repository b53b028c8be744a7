use std::cell::RefCell;
use std::rc::Rc;

use map_elements::element::PolylineElement;
use map_elements::map::MapSurface;
use map_elements::styles::{LineCap, PathStyle};

fn element() -> (Rc<MapSurface>, PolylineElement) {
    let map = MapSurface::new();
    let element: PolylineElement = PolylineElement::new(&map);
    (map, element)
}

#[test]
fn per_key_notifications_follow_presence_not_value_difference() {
    let (_map, mut element) = element();

    let colors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&colors);
    element
        .changes()
        .color
        .subscribe(move |c| sink.borrow_mut().push(c.clone()));

    element.set_color("red");
    element.set_color("red");

    assert_eq!(*colors.borrow(), vec!["red", "red"]);
}

#[test]
fn only_present_keys_notify() {
    let (_map, mut element) = element();

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    element
        .changes()
        .color
        .subscribe(move |_| sink.borrow_mut().push("color"));
    let sink = Rc::clone(&log);
    element
        .changes()
        .opacity
        .subscribe(move |_| sink.borrow_mut().push("opacity"));
    let sink = Rc::clone(&log);
    element
        .changes()
        .stroke
        .subscribe(move |_| sink.borrow_mut().push("stroke"));
    let sink = Rc::clone(&log);
    element
        .changes()
        .style
        .subscribe(move |_| sink.borrow_mut().push("style"));

    element.set_style(&PathStyle {
        color: Some("blue".to_string()),
        weight: Some(2.0),
        ..PathStyle::default()
    });

    assert_eq!(*log.borrow(), vec!["color", "style"]);
}

#[test]
fn aggregate_notification_carries_merged_options() {
    let (_map, mut element) = element();
    element.set_weight(5.0);

    let merged = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&merged);
    element
        .changes()
        .style
        .subscribe(move |options| sink.borrow_mut().push(options.clone()));

    element.set_style(&PathStyle::color("green"));

    let seen = merged.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].color, "green");
    assert_eq!(seen[0].weight, 5.0);
}

#[test]
fn aggregate_fires_even_for_an_empty_partial() {
    let (_map, mut element) = element();

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    element
        .changes()
        .style
        .subscribe(move |_| *sink.borrow_mut() += 1);

    element.set_style(&PathStyle::default());

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn alias_setters_route_through_the_style_path() {
    let (_map, mut element) = element();

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    element
        .changes()
        .dash_array
        .subscribe(move |d| sink.borrow_mut().push(d.clone()));
    let sink = Rc::clone(&log);
    element
        .changes()
        .style
        .subscribe(move |_| sink.borrow_mut().push("aggregate".to_string()));

    element.set_dash_array("4 2");

    assert_eq!(*log.borrow(), vec!["4 2", "aggregate"]);
    assert_eq!(element.dash_array().as_deref(), Some("4 2"));
}

#[test]
fn getters_read_resolved_renderer_defaults() {
    let (_map, element) = element();

    assert!(element.stroke());
    assert_eq!(element.color(), "#3388ff");
    assert_eq!(element.weight(), 3.0);
    assert_eq!(element.opacity(), 1.0);
    assert_eq!(element.line_cap(), LineCap::Round);
    assert!(!element.fill());
    assert_eq!(element.fill_opacity(), 0.2);
    assert_eq!(element.dash_array(), None);
    assert_eq!(element.class_name(), None);
}

#[test]
fn getters_reflect_merged_updates() {
    let (_map, mut element) = element();

    element.set_style(&PathStyle {
        fill: Some(true),
        fill_color: Some("#f00".to_string()),
        ..PathStyle::default()
    });

    assert!(element.fill());
    assert_eq!(element.fill_color().as_deref(), Some("#f00"));
    assert_eq!(element.color(), "#3388ff");
}
