// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu basics.
//!
//! Build a toolbar with a bold button and an "Insert" dropdown holding a
//! submenu, drive it through a few editor states, and print the element tree.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_basics`

use std::cell::RefCell;
use std::rc::Rc;

use understory_menu::clock::ManualClock;
use understory_menu::config::MenuConfig;
use understory_menu::context::MenuContext;
use understory_menu::display::{MenuElement, content};
use understory_menu::dropdown::{Dropdown, DropdownOptions};
use understory_menu::group::Group;
use understory_menu::icon::Icon;
use understory_menu::item::{ItemSpec, MenuItem};
use understory_menu::submenu::{Submenu, SubmenuOptions};
use understory_menu::view::EditorView;
use understory_menu_tree::{ElementId, Tree};

#[derive(Clone, Debug, Default)]
struct State {
    bold: bool,
    in_code_block: bool,
}

#[derive(Debug)]
enum Tr {
    ToggleBold,
    InsertRule,
    Heading(u8),
}

#[derive(Default)]
struct Editor {
    state: RefCell<State>,
}

impl EditorView for Editor {
    type State = State;
    type Transaction = Tr;

    fn state(&self) -> State {
        self.state.borrow().clone()
    }

    fn dispatch(&self, tr: Tr) {
        println!("dispatch {tr:?}");
        if let Tr::ToggleBold = tr {
            let mut s = self.state.borrow_mut();
            s.bold = !s.bold;
        }
    }
}

fn main() {
    let clock = ManualClock::new(0);
    let cx = MenuContext::new(clock.clone(), MenuConfig::default());
    let editor = Rc::new(Editor::default());

    let bold = MenuItem::new(
        ItemSpec::<Editor>::new(|_, dispatch, _, _| dispatch(Tr::ToggleBold))
            .icon(Icon::Text {
                text: "B".into(),
                css: Some("font-weight: bold".into()),
            })
            .title("Toggle strong style")
            .enable(|s: &State| !s.in_code_block)
            .active(|s: &State| s.bold),
    )
    .unwrap();
    let rule = MenuItem::new(
        ItemSpec::<Editor>::new(|_, dispatch, _, _| dispatch(Tr::InsertRule))
            .label("Horizontal rule")
            .select(|s: &State| !s.in_code_block),
    )
    .unwrap();
    let headings = (1..=3).map(|level| {
        content(
            MenuItem::new(
                ItemSpec::<Editor>::new(move |_, dispatch, _, _| dispatch(Tr::Heading(level)))
                    .label(format!("Level {level}")),
            )
            .unwrap(),
        )
    });
    let heading = Submenu::new(headings, SubmenuOptions::new("Heading"));
    let insert = Dropdown::new(
        [content(rule), content(heading)],
        DropdownOptions::new("Insert").title("Insert new content"),
    );
    let bar = Group::new([content(bold), content(insert)]);

    let mut rendered = bar.render(&cx, &editor).unwrap();

    rendered.update(&editor.state());
    cx.with_tree(|tree| print_ascii_tree(tree, rendered.node, "Toolbar:"));

    // Click the bold button, then refresh styling.
    cx.mouse_down(find_text(&cx, rendered.node, "B"));
    rendered.update(&editor.state());

    // Inside a code block the rule item disappears and bold is disabled.
    editor.state.borrow_mut().in_code_block = true;
    rendered.update(&editor.state());
    cx.with_tree(|tree| print_ascii_tree(tree, rendered.node, "\nToolbar (in code block):"));
}

fn find_text(cx: &MenuContext, root: ElementId, text: &str) -> Option<ElementId> {
    cx.with_tree(|tree| {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if tree.text(id) == Some(text) {
                return Some(id);
            }
            stack.extend(tree.children(id).iter().rev().copied());
        }
        None
    })
}

fn print_ascii_tree(tree: &Tree, root: ElementId, title: &str) {
    println!("{title}");
    print_node(tree, "", root);
    fn go(tree: &Tree, node: ElementId, prefix: &str) {
        let kids = tree.children(node);
        let len = kids.len();
        for (i, &k) in kids.iter().enumerate() {
            let last = i + 1 == len;
            let branch = if last { "└── " } else { "├── " };
            print_node(tree, &format!("{prefix}{branch}"), k);
            let next_prefix = if last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            go(tree, k, &next_prefix);
        }
    }
    go(tree, root, "");
}

fn print_node(tree: &Tree, prefix: &str, id: ElementId) {
    let Some(el) = tree.get(id) else {
        println!("{prefix}{id:?} (stale)");
        return;
    };
    let hidden = if tree.is_hidden(id) { "  [hidden]" } else { "" };
    let text = el.text.as_deref().map(|t| format!("  {t:?}")).unwrap_or_default();
    println!("{prefix}.{}{text}{hidden}", el.classes.join("."));
}
