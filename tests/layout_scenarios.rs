//! End-to-end layout scenarios: partitioning, overflow, visibility, layering.

use std::cell::RefCell;
use std::rc::Rc;

use paneflow::pane::ButtonEvent;
use paneflow::{
    EventStatus, HAlign, Modifiers, MouseButtons, Pane, PaneEvent, PointerEvent, Rect, Slot, VAlign,
    View, ViewConfig,
};

fn alloc(view: &View) -> Rect {
    view.pane().map(|p| p.alloc_box()).unwrap_or_default()
}

fn active(view: &View) -> Rect {
    view.pane().map(|p| p.active_box()).unwrap_or_default()
}

/// A(200 x 100, flex both ways) and B(100 x 150, fixed both ways).
fn two_children() -> (View, View) {
    let a = View::new(ViewConfig::new().min_size(200.0, 100.0));
    let b = View::new(
        ViewConfig::new()
            .min_size(100.0, 150.0)
            .flex_width(false)
            .flex_height(false),
    );
    (a, b)
}

fn press(pane: &Pane, x: f32, y: f32) -> EventStatus {
    pane.dispatch(&mut PaneEvent::Pointer(PointerEvent::Press(ButtonEvent {
        x,
        y,
        button: MouseButtons::LEFT,
        modifiers: Modifiers::empty(),
    })))
}

#[test]
fn test_horizontal_partition() {
    let (a, b) = two_children();
    let stack = View::hstack(vec![a.clone(), b.clone()]);
    stack.attach(&Pane::new(Rect::new(100.0, 150.0, 500.0, 550.0)));

    assert_eq!(stack.derived_width(), 300.0);
    assert_eq!(stack.derived_height(), 150.0);
    assert_eq!(alloc(&a), Rect::new(100.0, 150.0, 400.0, 550.0));
    assert_eq!(alloc(&b), Rect::new(400.0, 150.0, 500.0, 550.0));
}

#[test]
fn test_overflow_clips_instead_of_shrinking() {
    let (a, b) = two_children();
    let stack = View::hstack(vec![a.clone(), b.clone()]);
    stack.attach(&Pane::new(Rect::new(0.0, 0.0, 250.0, 100.0)));

    assert_eq!(alloc(&a), Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(alloc(&b), Rect::new(200.0, 0.0, 250.0, 100.0));
}

#[test]
fn test_vertical_partition_runs_top_down() {
    let first = View::new(ViewConfig::new().min_size(200.0, 100.0));
    let second = View::new(
        ViewConfig::new()
            .min_size(100.0, 150.0)
            .flex_height(false),
    );
    let stack = View::vstack(vec![first.clone(), second.clone()]);
    stack.attach(&Pane::new(Rect::new(100.0, 150.0, 500.0, 550.0)));

    assert_eq!(stack.derived_width(), 200.0);
    assert_eq!(stack.derived_height(), 250.0);
    assert_eq!(alloc(&first), Rect::new(100.0, 300.0, 500.0, 550.0));
    assert_eq!(alloc(&second), Rect::new(100.0, 150.0, 500.0, 300.0));
}

#[test]
fn test_vertical_overflow_clips_last_child() {
    let first = View::new(ViewConfig::new().min_height(100.0));
    let second = View::new(ViewConfig::new().min_height(150.0).flex_height(false));
    let stack = View::vstack(vec![first.clone(), second.clone()]);
    stack.attach(&Pane::new(Rect::new(0.0, 0.0, 100.0, 200.0)));

    assert_eq!(alloc(&first), Rect::new(0.0, 100.0, 100.0, 200.0));
    assert_eq!(alloc(&second), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_layers_route_front_to_back() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let c1 = View::new(ViewConfig::new());
    let c2 = View::new(
        ViewConfig::new()
            .min_size(100.0, 150.0)
            .halign(HAlign::Center)
            .valign(VAlign::Center),
    );
    for (view, name) in [(&c1, "c1"), (&c2, "c2")] {
        let hits = hits.clone();
        view.on_pointer(move |_| {
            hits.borrow_mut().push(name);
            EventStatus::Handled
        });
    }

    let layers = View::layers(vec![c1.clone(), c2.clone()]);
    let pane = Pane::new(Rect::new(100.0, 150.0, 500.0, 550.0));
    layers.attach(&pane);
    assert_eq!(active(&c2), Rect::new(250.0, 275.0, 350.0, 425.0));

    assert_eq!(press(&pane, 300.0, 300.0), EventStatus::Handled);
    assert_eq!(*hits.borrow(), vec!["c2"]);

    hits.borrow_mut().clear();
    press(&pane, 120.0, 160.0);
    assert_eq!(*hits.borrow(), vec!["c1"]);
}

#[test]
fn test_visibility_reflow_matches_fresh_layout() {
    let (a, b) = two_children();
    let c = View::new(ViewConfig::new().min_width(50.0).flex_width(false));
    let stack = View::hstack(vec![a.clone(), b.clone(), c.clone()]);
    stack.attach(&Pane::new(Rect::new(0.0, 0.0, 600.0, 200.0)));
    assert_eq!(alloc(&a), Rect::new(0.0, 0.0, 450.0, 200.0));

    b.set_hidden(true);
    assert_eq!(stack.derived_width(), 250.0);
    assert_eq!(alloc(&a), Rect::new(0.0, 0.0, 550.0, 200.0));
    assert_eq!(alloc(&c), Rect::new(550.0, 0.0, 600.0, 200.0));

    b.set_hidden(false);
    let (fa, fb) = two_children();
    let fc = View::new(ViewConfig::new().min_width(50.0).flex_width(false));
    let fresh = View::hstack(vec![fa.clone(), fb.clone(), fc.clone()]);
    fresh.attach(&Pane::new(Rect::new(0.0, 0.0, 600.0, 200.0)));
    for (live, rebuilt) in [(&a, &fa), (&b, &fb), (&c, &fc)] {
        assert_eq!(alloc(live), alloc(rebuilt));
    }
}

#[test]
fn test_nested_growth_propagates_to_parent() {
    let leaf = View::new(ViewConfig::new().min_size(10.0, 10.0).flex_width(false));
    let inner = View::vstack_with(ViewConfig::new().flex_width(false), vec![leaf.clone()]);
    let sibling = View::new(ViewConfig::new());
    let outer = View::hstack(vec![inner.clone(), sibling.clone()]);
    outer.attach(&Pane::new(Rect::from_size(100.0, 50.0)));
    assert_eq!(alloc(&sibling), Rect::new(10.0, 0.0, 100.0, 50.0));

    leaf.set_min_width(Some(30.0));
    assert_eq!(inner.derived_width(), 30.0);
    assert_eq!(alloc(&inner), Rect::new(0.0, 0.0, 30.0, 50.0));
    assert_eq!(alloc(&sibling), Rect::new(30.0, 0.0, 100.0, 50.0));
}

#[test]
fn test_external_slot_drives_layout() {
    let width = Slot::new(Some(40.0));
    let a = View::new(ViewConfig::new().min_width(width.clone()).flex_width(false));
    let b = View::new(ViewConfig::new());
    let stack = View::hstack(vec![a, b.clone()]);
    stack.attach(&Pane::new(Rect::from_size(100.0, 10.0)));
    assert_eq!(alloc(&b), Rect::new(40.0, 0.0, 100.0, 10.0));

    width.set(Some(70.0));
    assert_eq!(alloc(&b), Rect::new(70.0, 0.0, 100.0, 10.0));
}

#[test]
fn test_tree_dump() {
    let a = View::new(ViewConfig::new().hidden(true));
    let stack = View::hstack(vec![a, View::spacer()]);
    let dump = stack.to_string();
    assert!(dump.starts_with("HorizontalLayout[None]("));
    assert!(dump.contains("  View[None][hidden],"));
    assert!(dump.contains("  Spacer[None],"));
}
