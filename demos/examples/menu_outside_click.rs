// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside clicks.
//!
//! Open a dropdown by pointer, click elsewhere to close it, then toggle it from
//! its label. Prints the open state and listener count at each step.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_outside_click`

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_menu::clock::ManualClock;
use understory_menu::config::MenuConfig;
use understory_menu::context::MenuContext;
use understory_menu::display::{MenuContent, content};
use understory_menu::dropdown::{Dropdown, DropdownOptions};
use understory_menu::item::{ItemSpec, MenuItem};
use understory_menu::submenu::{Submenu, SubmenuOptions};
use understory_menu::view::EditorView;
use understory_menu_tree::Element;

struct Editor;

impl EditorView for Editor {
    type State = ();
    type Transaction = &'static str;

    fn state(&self) {}

    fn dispatch(&self, tr: &'static str) {
        println!("  dispatch {tr:?}");
    }
}

fn item(label: &'static str) -> MenuContent<Editor> {
    content(
        MenuItem::new(
            ItemSpec::<Editor>::new(move |_, dispatch, _, _| dispatch(label)).label(label),
        )
        .unwrap(),
    )
}

fn main() {
    let clock = ManualClock::new(0);
    let cx = MenuContext::new(clock.clone(), MenuConfig::default());
    let editor = Rc::new(Editor);

    let more = Submenu::new([item("Cut"), item("Copy")], SubmenuOptions::new("More"));
    let edit = Dropdown::new(
        [item("Undo"), content(more)],
        DropdownOptions::new("Edit"),
    );
    let (rendered, control) = edit.render_with_control(&cx, &editor).unwrap();
    let bar = cx.create_element(
        None,
        Element::with_class("ProseMirror-menubar").bounds(Rect::new(0.0, 0.0, 800.0, 600.0)),
    );

    // The host's layout: the label sits at the top left, the panel below it.
    cx.with_tree_mut(|tree| {
        tree.append_child(bar, rendered.node);
        tree.set_local_bounds(control.wrapper(), Rect::new(0.0, 0.0, 60.0, 200.0));
        tree.set_local_bounds(control.label(), Rect::new(0.0, 0.0, 60.0, 20.0));
        tree.set_local_bounds(control.panel(), Rect::new(0.0, 20.0, 160.0, 80.0));
    });

    let report = |step: &str| {
        println!(
            "{step}: open={} listeners={}",
            control.is_open(),
            cx.window_listener_count()
        );
    };

    let e = cx.pointer_down(bar, Point::new(10.0, 10.0));
    println!("label press prevented default: {}", e.default_prevented());
    report("after opening click");

    clock.advance(40);
    cx.pointer_down(bar, Point::new(400.0, 400.0));
    report("outside click 40ms later (still the opening gesture)");

    clock.advance(500);
    cx.pointer_down(bar, Point::new(400.0, 400.0));
    report("outside click 540ms later");

    clock.advance(500);
    cx.pointer_down(bar, Point::new(10.0, 10.0));
    report("reopened");
    clock.advance(500);
    cx.pointer_down(bar, Point::new(10.0, 10.0));
    report("label pressed again");

    // The closed panel is detached, so its items are out of reach.
    clock.advance(500);
    cx.with_tree_mut(|tree| {
        for item in tree.children(control.panel()).to_vec() {
            tree.set_local_bounds(item, Rect::new(0.0, 20.0, 160.0, 40.0));
        }
    });
    let e = cx.pointer_down(bar, Point::new(10.0, 30.0));
    println!("click over the closed panel hit {:?}", e.target);
    report("after clicking where the panel was");
}
