// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use understory_menu_tree::ElementId;

use crate::clock::ManualClock;
use crate::config::MenuConfig;
use crate::context::MenuContext;
use crate::display::{MenuContent, content};
use crate::item::{ItemSpec, MenuItem};
use crate::view::EditorView;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TestState {
    pub(crate) strong: bool,
    pub(crate) in_code: bool,
}

#[derive(Default)]
pub(crate) struct TestView {
    pub(crate) state: RefCell<TestState>,
    pub(crate) dispatched: RefCell<Vec<&'static str>>,
    pub(crate) shout: Cell<bool>,
}

impl EditorView for TestView {
    type State = TestState;
    type Transaction = &'static str;

    fn state(&self) -> TestState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, tr: &'static str) {
        self.dispatched.borrow_mut().push(tr);
    }

    fn translate(&self, text: &str) -> String {
        if self.shout.get() {
            text.to_uppercase()
        } else {
            text.into()
        }
    }
}

pub(crate) fn fixture() -> (MenuContext, ManualClock, Rc<TestView>) {
    let clock = ManualClock::new(1_000);
    let cx = MenuContext::new(clock.clone(), MenuConfig::default());
    (cx, clock, Rc::new(TestView::default()))
}

/// A label item that dispatches `tr` when run.
pub(crate) fn label_item(label: &str, tr: &'static str) -> MenuContent<TestView> {
    content(
        MenuItem::new(
            ItemSpec::<TestView>::new(move |_, dispatch, _, _| dispatch(tr)).label(label),
        )
        .expect("label items are valid"),
    )
}

/// Element holding `text`, searched depth-first under `root`.
pub(crate) fn find_text(cx: &MenuContext, root: ElementId, text: &str) -> Option<ElementId> {
    cx.with_tree(|tree| {
        let mut stack = alloc::vec![root];
        while let Some(id) = stack.pop() {
            if tree.text(id) == Some(text) {
                return Some(id);
            }
            stack.extend(tree.children(id).iter().rev().copied());
        }
        None
    })
}
