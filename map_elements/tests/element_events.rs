use std::cell::RefCell;
use std::rc::Rc;

use map_elements::annotations::{Popup, Tooltip};
use map_elements::element::PolylineElement;
use map_elements::events::{EventKind, MouseEvent, ShapeEvent};
use map_elements::geometry::LatLng;
use map_elements::map::MapSurface;
use map_elements::shape::Polyline;

fn mouse_event(lat: f64, lng: f64) -> ShapeEvent {
    ShapeEvent::Mouse(MouseEvent {
        latlng: LatLng::new(lat, lng),
        container_point: (10.0, 20.0),
    })
}

#[test]
fn click_is_forwarded_verbatim() {
    let map = MapSurface::new();
    let element: PolylineElement = PolylineElement::new(&map);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    element
        .shape_events()
        .click
        .subscribe(move |ev| sink.borrow_mut().push(ev.clone()));

    Polyline::fire(element.shape(), EventKind::Click, &mouse_event(52.5, 13.4));

    assert_eq!(
        *seen.borrow(),
        vec![MouseEvent {
            latlng: LatLng::new(52.5, 13.4),
            container_point: (10.0, 20.0),
        }]
    );
}

#[test]
fn mouse_channels_are_separated_by_kind() {
    let map = MapSurface::new();
    let element: PolylineElement = PolylineElement::new(&map);

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .mouse_over
        .subscribe(move |_| sink.borrow_mut().push("over"));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .mouse_out
        .subscribe(move |_| sink.borrow_mut().push("out"));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .dbl_click
        .subscribe(move |_| sink.borrow_mut().push("dblclick"));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .context_menu
        .subscribe(move |_| sink.borrow_mut().push("contextmenu"));

    Polyline::fire(element.shape(), EventKind::MouseOver, &mouse_event(0.0, 0.0));
    Polyline::fire(element.shape(), EventKind::ContextMenu, &mouse_event(0.0, 0.0));

    assert_eq!(*log.borrow(), vec!["over", "contextmenu"]);
}

#[test]
fn bound_popup_events_reach_the_element_channels() {
    let map = MapSurface::new();
    let mut element: PolylineElement = PolylineElement::new(&map);
    let popup = Rc::new(RefCell::new(Popup::new("details")));
    let tooltip = Rc::new(RefCell::new(Tooltip::new("hint")));
    element.bind_annotations(Some(Rc::clone(&popup)), Some(Rc::clone(&tooltip)));

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .popup_open
        .subscribe(move |ev| sink.borrow_mut().push(format!("popup open {}", ev.content)));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .popup_close
        .subscribe(move |ev| sink.borrow_mut().push(format!("popup close {}", ev.content)));
    let sink = Rc::clone(&log);
    element
        .shape_events()
        .tooltip_open
        .subscribe(move |ev| sink.borrow_mut().push(format!("tooltip open {}", ev.content)));

    Polyline::open_popup(element.shape());
    Polyline::close_popup(element.shape());
    Polyline::open_tooltip(element.shape());

    assert_eq!(
        *log.borrow(),
        vec![
            "popup open details",
            "popup close details",
            "tooltip open hint"
        ]
    );
    assert!(tooltip.borrow().open);
    assert!(!popup.borrow().open);
}

#[test]
fn annotation_binding_happens_at_most_once() {
    let map = MapSurface::new();
    let mut element: PolylineElement = PolylineElement::new(&map);

    let first = Rc::new(RefCell::new(Popup::new("first")));
    let second = Rc::new(RefCell::new(Popup::new("second")));
    element.bind_annotations(Some(Rc::clone(&first)), None);
    element.bind_annotations(Some(Rc::clone(&second)), None);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    element
        .shape_events()
        .popup_open
        .subscribe(move |ev| sink.borrow_mut().push(ev.content.clone()));

    Polyline::open_popup(element.shape());

    assert_eq!(*seen.borrow(), vec!["first"]);
    assert!(!second.borrow().open);
}

#[test]
fn an_empty_first_binding_consumes_the_attempt() {
    let map = MapSurface::new();
    let mut element: PolylineElement = PolylineElement::new(&map);

    element.bind_annotations(None, None);
    let popup = Rc::new(RefCell::new(Popup::new("late")));
    element.bind_annotations(Some(Rc::clone(&popup)), None);

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    element
        .shape_events()
        .popup_open
        .subscribe(move |_| *sink.borrow_mut() += 1);

    Polyline::open_popup(element.shape());

    assert_eq!(*count.borrow(), 0);
    assert!(!popup.borrow().open);
}
