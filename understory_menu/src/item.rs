// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf menu items: a clickable control bound to a command.
//!
//! ## Building
//!
//! An [`ItemSpec`] collects a run handler, optional predicates, and at least one
//! visual: a render function, an [`Icon`], or a label. [`MenuItem::new`]
//! resolves the visuals into a single [`VisualSource`] (render function first,
//! then icon, then label) and rejects specs with none.
//!
//! ## Update
//!
//! On every state:
//! 1. `select` false hides the item and stops there; `enable` and `active` are not consulted.
//! 2. Otherwise the item is shown and `enable` (default true) toggles
//!    [`DISABLED`](crate::classes::DISABLED).
//! 3. `active` is consulted only for enabled items and toggles
//!    [`ACTIVE`](crate::classes::ACTIVE).
//!
//! The item reports itself visible whenever `select` passed.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;

use understory_menu_tree::{Element, ElementId};

use crate::classes;
use crate::context::MenuContext;
use crate::display::{MenuElement, Rendered};
use crate::error::InvalidSpecError;
use crate::icon::Icon;
use crate::types::MenuEvent;
use crate::view::EditorView;

/// Predicate over editor state.
pub type Predicate<S> = Rc<dyn Fn(&S) -> bool>;

/// Command run when an enabled item is clicked:
/// `(state, dispatch, view, event)`.
pub type RunFn<V> = Rc<
    dyn Fn(
        &<V as EditorView>::State,
        &dyn Fn(<V as EditorView>::Transaction),
        &V,
        &MenuEvent,
    ),
>;

/// Custom item renderer. Returns the item's element, or `None` if it has nothing to show.
pub type RenderFn<V> = Rc<dyn Fn(&MenuContext, &V) -> Option<ElementId>>;

/// Tooltip text, fixed or derived from the state at render time.
pub enum Title<S> {
    /// Fixed text.
    Static(String),
    /// Text computed from the state when the item is rendered.
    Dynamic(Rc<dyn Fn(&S) -> String>),
}

impl<S> Clone for Title<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(s) => Self::Static(s.clone()),
            Self::Dynamic(f) => Self::Dynamic(f.clone()),
        }
    }
}

impl<S> core::fmt::Debug for Title<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// The one visual an item renders.
pub enum VisualSource<V: EditorView> {
    /// Host-provided renderer.
    Render(RenderFn<V>),
    /// Icon descriptor.
    Icon(Icon),
    /// Text label, translated at render time.
    Label(String),
}

impl<V: EditorView> VisualSource<V> {
    /// Pick the visual by priority: render function, icon, non-empty label.
    pub fn resolve(
        render: Option<RenderFn<V>>,
        icon: Option<Icon>,
        label: Option<String>,
    ) -> Result<Self, InvalidSpecError> {
        if let Some(render) = render {
            return Ok(Self::Render(render));
        }
        if let Some(icon) = icon {
            return Ok(Self::Icon(icon));
        }
        match label {
            Some(label) if !label.is_empty() => Ok(Self::Label(label)),
            _ => Err(InvalidSpecError::NoVisual),
        }
    }
}

impl<V: EditorView> core::fmt::Debug for VisualSource<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Render(_) => f.write_str("Render(..)"),
            Self::Icon(icon) => f.debug_tuple("Icon").field(icon).finish(),
            Self::Label(label) => f.debug_tuple("Label").field(label).finish(),
        }
    }
}

/// Description of a leaf item.
pub struct ItemSpec<V: EditorView> {
    /// Command run on mousedown while enabled.
    pub run: RunFn<V>,
    /// Hide the item when this returns false.
    pub select: Option<Predicate<V::State>>,
    /// Disable the item when this returns false.
    pub enable: Option<Predicate<V::State>>,
    /// Highlight the (enabled) item when this returns true.
    pub active: Option<Predicate<V::State>>,
    /// Custom renderer; wins over `icon` and `label`.
    pub render: Option<RenderFn<V>>,
    /// Icon; wins over `label`.
    pub icon: Option<Icon>,
    /// Text label.
    pub label: Option<String>,
    /// Tooltip.
    pub title: Option<Title<V::State>>,
    /// Extra class names (space separated).
    pub class: Option<String>,
    /// Extra inline style.
    pub css: Option<String>,
}

impl<V: EditorView> core::fmt::Debug for ItemSpec<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemSpec")
            .field("select", &self.select.is_some())
            .field("enable", &self.enable.is_some())
            .field("active", &self.active.is_some())
            .field("render", &self.render.is_some())
            .field("icon", &self.icon)
            .field("label", &self.label)
            .field("title", &self.title)
            .field("class", &self.class)
            .field("css", &self.css)
            .finish_non_exhaustive()
    }
}

impl<V: EditorView> ItemSpec<V> {
    /// A spec with the given run handler and nothing else.
    pub fn new(
        run: impl Fn(&V::State, &dyn Fn(V::Transaction), &V, &MenuEvent) + 'static,
    ) -> Self {
        Self {
            run: Rc::new(run),
            select: None,
            enable: None,
            active: None,
            render: None,
            icon: None,
            label: None,
            title: None,
            class: None,
            css: None,
        }
    }

    /// Set the `select` predicate.
    #[must_use]
    pub fn select(mut self, f: impl Fn(&V::State) -> bool + 'static) -> Self {
        self.select = Some(Rc::new(f));
        self
    }

    /// Set the `enable` predicate.
    #[must_use]
    pub fn enable(mut self, f: impl Fn(&V::State) -> bool + 'static) -> Self {
        self.enable = Some(Rc::new(f));
        self
    }

    /// Set the `active` predicate.
    #[must_use]
    pub fn active(mut self, f: impl Fn(&V::State) -> bool + 'static) -> Self {
        self.active = Some(Rc::new(f));
        self
    }

    /// Set a custom renderer.
    #[must_use]
    pub fn render(mut self, f: impl Fn(&MenuContext, &V) -> Option<ElementId> + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set a fixed tooltip.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Title::Static(title.into()));
        self
    }

    /// Set a tooltip computed from the state at render time.
    #[must_use]
    pub fn title_with(mut self, f: impl Fn(&V::State) -> String + 'static) -> Self {
        self.title = Some(Title::Dynamic(Rc::new(f)));
        self
    }

    /// Set extra class names.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set extra inline style.
    #[must_use]
    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }
}

/// A leaf item built from a validated [`ItemSpec`].
pub struct MenuItem<V: EditorView> {
    source: VisualSource<V>,
    run: RunFn<V>,
    select: Option<Predicate<V::State>>,
    enable: Option<Predicate<V::State>>,
    active: Option<Predicate<V::State>>,
    title: Option<Title<V::State>>,
    class: Option<String>,
    css: Option<String>,
}

impl<V: EditorView> core::fmt::Debug for MenuItem<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuItem")
            .field("source", &self.source)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl<V: EditorView> MenuItem<V> {
    /// Validate `spec` and build the item.
    pub fn new(spec: ItemSpec<V>) -> Result<Self, InvalidSpecError> {
        let source = VisualSource::resolve(spec.render, spec.icon, spec.label)?;
        Ok(Self {
            source,
            run: spec.run,
            select: spec.select,
            enable: spec.enable,
            active: spec.active,
            title: spec.title,
            class: spec.class,
            css: spec.css,
        })
    }

    /// The visual this item renders.
    pub fn source(&self) -> &VisualSource<V> {
        &self.source
    }

    fn build_node(&self, cx: &MenuContext, view: &V) -> Result<ElementId, InvalidSpecError> {
        match &self.source {
            VisualSource::Render(render) => {
                let node = render(cx, view).ok_or(InvalidSpecError::EmptyRender)?;
                if cx.with_tree(|tree| tree.is_alive(node)) {
                    Ok(node)
                } else {
                    Err(InvalidSpecError::EmptyRender)
                }
            }
            VisualSource::Icon(icon) => Ok(icon.render(cx)),
            VisualSource::Label(label) => {
                let text = view.translate(label);
                Ok(cx.create_element(None, Element::default().text(text)))
            }
        }
    }
}

impl<V: EditorView> MenuElement<V> for MenuItem<V> {
    fn render(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<Rendered<V::State>, InvalidSpecError> {
        let node = self.build_node(cx, view)?;

        let title = self.title.as_ref().map(|title| {
            let text = match title {
                Title::Static(text) => text.clone(),
                Title::Dynamic(f) => f(&view.state()),
            };
            view.translate(&text)
        });
        cx.with_tree_mut(|tree| {
            if let Some(title) = title {
                tree.set_attribute(node, "title", title);
            }
            if let Some(class) = &self.class {
                for c in class.split_whitespace() {
                    tree.add_class(node, c);
                }
            }
            if let Some(css) = &self.css {
                tree.append_style(node, css);
            }
        });

        let run = self.run.clone();
        let handler_view = view.clone();
        cx.on_mouse_down(node, move |cx, e| {
            e.prevent_default();
            if cx.with_tree(|tree| tree.has_class(node, classes::DISABLED)) {
                return;
            }
            let view = &*handler_view;
            let state = view.state();
            let dispatch: &dyn Fn(V::Transaction) = &|tr| view.dispatch(tr);
            run(&state, dispatch, view, e);
        });

        let (select, enable, active) = (
            self.select.clone(),
            self.enable.clone(),
            self.active.clone(),
        );
        let cx = cx.clone();
        let update = move |state: &V::State| -> bool {
            if let Some(select) = &select
                && !select(state)
            {
                cx.with_tree_mut(|tree| tree.set_hidden(node, true));
                return false;
            }
            let enabled = enable.as_ref().is_none_or(|f| f(state));
            let is_active = enabled && active.as_ref().is_some_and(|f| f(state));
            cx.with_tree_mut(|tree| {
                tree.set_hidden(node, false);
                tree.set_class(node, classes::DISABLED, !enabled);
                tree.set_class(node, classes::ACTIVE, is_active);
            });
            true
        };

        Ok(Rendered {
            node,
            update: Box::new(update),
        })
    }
}
