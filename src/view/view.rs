//! View - a layout participant.
//!
//! A view owns reactive sizing and alignment attributes and drives the
//! active box of the pane it is attached to.
//!
//! # Sizing
//!
//! `derived_width` / `derived_height` resolve, in order of priority:
//!
//! 1. `hidden` - zero
//! 2. `min_*` - set by the code that builds the view
//! 3. `content_*` - set by the view itself (image size, children)
//! 4. zero
//!
//! # Alignment
//!
//! Whenever the allocated box, the derived size or an alignment changes, the
//! active box is recomputed with [`calc_axis`] on each axis.
//!
//! # Variants
//!
//! A view is a leaf, a linear stack or a layered overlay. The variant is fixed
//! at construction; layouts own their child list for life.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::align::calc_axis;
use super::config::ViewConfig;
use crate::layout::{self, Layers, Layout, Stack};
use crate::pane::{priority, EventKind, Painter, Pane, PaneEvent, PointerEvent};
use crate::reactive::{Owner, Prop, Slot};
use crate::types::{EventStatus, HAlign, Rect, Rgba, VAlign};

// =============================================================================
// Attributes
// =============================================================================

pub(crate) struct Attrs {
    pub(crate) min_width: Slot<Option<f32>>,
    pub(crate) min_height: Slot<Option<f32>>,
    pub(crate) content_width: Slot<Option<f32>>,
    pub(crate) content_height: Slot<Option<f32>>,
    pub(crate) derived_width: Slot<f32>,
    pub(crate) derived_height: Slot<f32>,
    pub(crate) flex_width: Slot<bool>,
    pub(crate) flex_height: Slot<bool>,
    pub(crate) halign: Slot<HAlign>,
    pub(crate) valign: Slot<VAlign>,
    pub(crate) hidden: Slot<bool>,
    pub(crate) background: Slot<Option<Rgba>>,
}

/// Per-kind fallbacks for attributes a [`ViewConfig`] leaves unset.
pub(crate) struct Defaults {
    pub(crate) halign: HAlign,
    pub(crate) valign: VAlign,
}

impl Defaults {
    pub(crate) const FILL: Self = Self {
        halign: HAlign::Fill,
        valign: VAlign::Fill,
    };

    pub(crate) const CENTER: Self = Self {
        halign: HAlign::Center,
        valign: VAlign::Center,
    };
}

fn slot_or<T: Clone + PartialEq + 'static>(prop: Option<Prop<T>>, default: T) -> Slot<T> {
    prop.unwrap_or(Prop::Value(default)).into_slot()
}

impl Attrs {
    fn new(config: ViewConfig, defaults: Defaults) -> Self {
        Self {
            min_width: slot_or(config.min_width, None),
            min_height: slot_or(config.min_height, None),
            content_width: Slot::new(None),
            content_height: Slot::new(None),
            derived_width: Slot::new(0.0),
            derived_height: Slot::new(0.0),
            flex_width: slot_or(config.flex_width, true),
            flex_height: slot_or(config.flex_height, true),
            halign: slot_or(config.halign, defaults.halign),
            valign: slot_or(config.valign, defaults.valign),
            hidden: slot_or(config.hidden, false),
            background: slot_or(config.background, None),
        }
    }
}

// =============================================================================
// View
// =============================================================================

pub(crate) enum ViewKind {
    Leaf,
    Stack(Stack),
    Layers(Layers),
}

impl ViewKind {
    fn layout(&self) -> Option<&dyn Layout> {
        match self {
            ViewKind::Leaf => None,
            ViewKind::Stack(stack) => Some(stack),
            ViewKind::Layers(layers) => Some(layers),
        }
    }
}

type DrawFn = Rc<dyn Fn(&mut dyn Painter, Rect)>;
type PointerFn = Rc<dyn Fn(&PointerEvent) -> EventStatus>;

#[derive(Clone, Default)]
struct ContentHandlers {
    draw: Vec<DrawFn>,
    pointer: Vec<PointerFn>,
}

pub(crate) struct ViewInner {
    owner: Owner,
    name: &'static str,
    pub(crate) attrs: Attrs,
    pane: RefCell<Option<Pane>>,
    pub(crate) kind: ViewKind,
    handlers: RefCell<ContentHandlers>,
}

/// Handle to a view. Cloning yields another handle to the same view.
#[derive(Clone)]
pub struct View {
    pub(crate) inner: Rc<ViewInner>,
}

pub(crate) type WeakView = Weak<ViewInner>;

macro_rules! attr_accessors {
    ($($(#[$meta:meta])* $name:ident, $setter:ident, $slot:ident: $ty:ty;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> $ty {
                self.inner.attrs.$name.get()
            }

            pub fn $setter(&self, value: $ty) {
                self.inner.attrs.$name.set(value);
            }

            pub fn $slot(&self) -> &Slot<$ty> {
                &self.inner.attrs.$name
            }
        )*
    };
}

impl View {
    /// A plain leaf view.
    pub fn new(config: ViewConfig) -> Self {
        Self::build("View", ViewKind::Leaf, config, Defaults::FILL)
    }

    /// An empty leaf that soaks up extra space on both axes.
    pub fn spacer() -> Self {
        Self::build("Spacer", ViewKind::Leaf, ViewConfig::new(), Defaults::FILL)
    }

    pub(crate) fn build(
        name: &'static str,
        kind: ViewKind,
        config: ViewConfig,
        defaults: Defaults,
    ) -> Self {
        let view = View {
            inner: Rc::new(ViewInner {
                owner: Owner::new(),
                name,
                attrs: Attrs::new(config, defaults),
                pane: RefCell::new(None),
                kind,
                handlers: RefCell::new(ContentHandlers::default()),
            }),
        };
        view.wire_sizing();
        if let Some(layout) = view.layout() {
            layout::wire(&view, layout);
            view.children_changed();
        }
        view
    }

    fn wire_sizing(&self) {
        let owner = self.inner.owner;
        let a = &self.inner.attrs;
        a.min_width.observe_owned(owner, self.listener(View::resolve_width));
        a.content_width.observe_owned(owner, self.listener(View::resolve_width));
        a.min_height.observe_owned(owner, self.listener(View::resolve_height));
        a.content_height.observe_owned(owner, self.listener(View::resolve_height));
        a.hidden.observe_owned(owner, self.listener(View::resolve_width));
        a.hidden.observe_owned(owner, self.listener(View::resolve_height));
        a.derived_width.observe_owned(owner, self.listener(View::realign));
        a.derived_height.observe_owned(owner, self.listener(View::realign));
        a.halign.observe_owned(owner, self.listener(View::realign));
        a.valign.observe_owned(owner, self.listener(View::realign));
        self.resolve_width();
        self.resolve_height();
    }

    /// A slot listener that calls `f` on this view while it is alive.
    pub(crate) fn listener<T: 'static>(&self, f: fn(&View)) -> impl Fn(&T) + 'static {
        let weak = self.downgrade();
        move |_| {
            if let Some(view) = View::upgrade(&weak) {
                f(&view);
            }
        }
    }

    pub(crate) fn downgrade(&self) -> WeakView {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &WeakView) -> Option<View> {
        weak.upgrade().map(|inner| View { inner })
    }

    pub(crate) fn owner(&self) -> Owner {
        self.inner.owner
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Child views of a layout; empty for leaves.
    pub fn children(&self) -> &[View] {
        match self.layout() {
            Some(layout) => layout.children().views(),
            None => &[],
        }
    }

    pub(crate) fn layout(&self) -> Option<&dyn Layout> {
        self.inner.kind.layout()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    attr_accessors! {
        /// Explicit minimum width, highest sizing priority.
        min_width, set_min_width, min_width_slot: Option<f32>;
        min_height, set_min_height, min_height_slot: Option<f32>;
        /// Width computed by the view itself, used when no minimum is set.
        content_width, set_content_width, content_width_slot: Option<f32>;
        content_height, set_content_height, content_height_slot: Option<f32>;
        flex_width, set_flex_width, flex_width_slot: bool;
        flex_height, set_flex_height, flex_height_slot: bool;
        halign, set_halign, halign_slot: HAlign;
        valign, set_valign, valign_slot: VAlign;
        /// Hidden views resolve to zero size and skip their draw pass.
        hidden, set_hidden, hidden_slot: bool;
        background, set_background, background_slot: Option<Rgba>;
    }

    /// Resolved width. Read-only: written by the sizing chain.
    pub fn derived_width(&self) -> f32 {
        self.inner.attrs.derived_width.get()
    }

    pub fn derived_width_slot(&self) -> &Slot<f32> {
        &self.inner.attrs.derived_width
    }

    /// Resolved height. Read-only: written by the sizing chain.
    pub fn derived_height(&self) -> f32 {
        self.inner.attrs.derived_height.get()
    }

    pub fn derived_height_slot(&self) -> &Slot<f32> {
        &self.inner.attrs.derived_height
    }

    fn resolve_width(&self) {
        let a = &self.inner.attrs;
        a.derived_width
            .set(resolve(a.hidden.get(), a.min_width.get(), a.content_width.get()));
    }

    fn resolve_height(&self) {
        let a = &self.inner.attrs;
        a.derived_height
            .set(resolve(a.hidden.get(), a.min_height.get(), a.content_height.get()));
    }

    // =========================================================================
    // Pane attachment
    // =========================================================================

    /// The pane this view is attached to, if any.
    pub fn pane(&self) -> Option<Pane> {
        self.inner.pane.borrow().clone()
    }

    /// Attach to `pane`, replacing any previous attachment.
    ///
    /// Usually called by the parent layout.
    pub fn attach(&self, pane: &Pane) {
        self.detach();
        debug!(view = self.name(), %pane, "attach");
        *self.inner.pane.borrow_mut() = Some(pane.clone());
        let owner = self.owner();

        let weak = self.downgrade();
        pane.subscribe(EventKind::Draw, priority::VIEW, owner, move |_| {
            match weak.upgrade() {
                Some(inner) if inner.attrs.hidden.get() => EventStatus::Handled,
                _ => EventStatus::Unhandled,
            }
        });

        let handlers = self.inner.handlers.borrow().clone();
        for f in handlers.draw {
            self.install_draw(pane, f);
        }
        for f in handlers.pointer {
            self.install_pointer(pane, f);
        }

        pane.swap_background(self.inner.attrs.background.clone());
        pane.alloc_box_slot()
            .observe_owned(owner, self.listener(View::realign));
        self.realign();

        if let Some(layout) = self.layout() {
            layout::attach(self, layout, pane);
        }
    }

    /// Undo [`View::attach`]. Does nothing when not attached.
    pub fn detach(&self) {
        let Some(pane) = self.inner.pane.borrow_mut().take() else {
            return;
        };
        debug!(view = self.name(), %pane, "detach");

        if let Some(layout) = self.layout() {
            layout.children().detach();
        }

        let owner = self.owner();
        pane.unsubscribe(owner);
        pane.remove_observer(owner);
        pane.swap_background(Slot::new(None));
    }

    /// Recompute the active box from the allocated box, derived size and
    /// alignment.
    pub(crate) fn realign(&self) {
        let Some(pane) = self.pane() else {
            return;
        };
        let a = &self.inner.attrs;
        let alloc = pane.alloc_box();
        let (x0, x1) = calc_axis(alloc.x0, alloc.x1, a.derived_width.get(), a.halign.get().into());
        let (y0, y1) = calc_axis(alloc.y0, alloc.y1, a.derived_height.get(), a.valign.get().into());
        let active = Rect::new(x0, y0, x1, y1);
        trace!(view = self.name(), %alloc, %active, "realign");
        pane.set_active_box(active);
    }

    /// Re-run the partition of a layout over its active box.
    pub(crate) fn relayout(&self) {
        if let (Some(layout), Some(pane)) = (self.layout(), self.pane()) {
            layout.partition(pane.active_box());
        }
    }

    /// A child's size or visibility changed: refresh content size, then
    /// re-partition.
    pub(crate) fn children_changed(&self) {
        if let Some(layout) = self.layout() {
            layout.children().forget_hidden();
            let (width, height) = layout.content_size();
            self.inner.attrs.content_width.set(Some(width));
            self.inner.attrs.content_height.set(Some(height));
        }
        self.relayout();
    }

    // =========================================================================
    // Content handlers
    // =========================================================================

    /// Paint content during the draw pass. `f` receives the active box.
    ///
    /// Runs after the pane background and is skipped while hidden.
    pub fn on_draw(&self, f: impl Fn(&mut dyn Painter, Rect) + 'static) {
        let f: DrawFn = Rc::new(f);
        self.inner.handlers.borrow_mut().draw.push(f.clone());
        if let Some(pane) = self.pane() {
            self.install_draw(&pane, f);
        }
    }

    /// React to pointer events delivered to this view's pane.
    pub fn on_pointer(&self, f: impl Fn(&PointerEvent) -> EventStatus + 'static) {
        let f: PointerFn = Rc::new(f);
        self.inner.handlers.borrow_mut().pointer.push(f.clone());
        if let Some(pane) = self.pane() {
            self.install_pointer(&pane, f);
        }
    }

    fn install_draw(&self, pane: &Pane, f: DrawFn) {
        let weak = self.downgrade();
        pane.subscribe(EventKind::Draw, priority::VIEW, self.owner(), move |event| {
            let active = View::upgrade(&weak)
                .and_then(|view| view.pane())
                .map(|pane| pane.active_box());
            if let (PaneEvent::Draw(painter), Some(active)) = (event, active) {
                f(&mut **painter, active);
            }
            EventStatus::Unhandled
        });
    }

    fn install_pointer(&self, pane: &Pane, f: PointerFn) {
        for kind in EventKind::POINTER {
            let f = f.clone();
            pane.subscribe(kind, priority::VIEW, self.owner(), move |event| match event {
                PaneEvent::Pointer(pointer) => f(pointer),
                PaneEvent::Draw(_) => EventStatus::Unhandled,
            });
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}{}[", self.name())?;
        match self.pane() {
            Some(pane) => write!(f, "{pane}")?,
            None => write!(f, "None")?,
        }
        write!(f, "]")?;
        if self.hidden() {
            write!(f, "[hidden]")?;
        }
        let children = self.children();
        if !children.is_empty() {
            writeln!(f, "(")?;
            for child in children {
                child.write_tree(f, depth + 1)?;
                writeln!(f, ",")?;
            }
            write!(f, "{indent})")?;
        }
        Ok(())
    }
}

fn resolve(hidden: bool, min: Option<f32>, content: Option<f32>) -> f32 {
    if hidden {
        0.0
    } else {
        min.or(content).unwrap_or(0.0)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::{ButtonEvent, DrawCommand, DrawList};
    use crate::types::{Modifiers, MouseButtons};
    use std::cell::Cell;

    fn counting_draws(view: &View) -> Rc<Cell<usize>> {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        view.on_draw(move |_, _| c.set(c.get() + 1));
        calls
    }

    #[test]
    fn test_derived_dim() {
        let view = View::new(ViewConfig::new().min_width(100.0).flex_height(false));
        assert!(view.flex_width());
        assert!(!view.flex_height());
        assert_eq!(view.derived_width(), 100.0);
        assert_eq!(view.derived_height(), 0.0);

        view.set_content_width(Some(50.0));
        view.set_content_height(Some(50.0));
        assert_eq!(view.derived_width(), 100.0);
        assert_eq!(view.derived_height(), 50.0);

        view.set_min_width(Some(200.0));
        assert_eq!(view.derived_width(), 200.0);

        view.set_min_width(None);
        assert_eq!(view.derived_width(), 50.0);
    }

    #[test]
    fn test_min_wins_regardless_of_order() {
        let view = View::new(ViewConfig::new());
        view.set_min_width(Some(80.0));
        view.set_content_width(Some(120.0));
        assert_eq!(view.derived_width(), 80.0);
    }

    #[test]
    fn test_external_width() {
        let width = Slot::new(Some(100.0));
        let view = View::new(ViewConfig::new().min_width(width.clone()));
        assert_eq!(view.derived_width(), 100.0);
        width.set(Some(200.0));
        assert_eq!(view.derived_width(), 200.0);
    }

    #[test]
    fn test_hidden_zeroes_and_restores() {
        let view = View::new(ViewConfig::new().min_size(100.0, 40.0));
        view.set_content_height(Some(70.0));
        view.set_hidden(true);
        assert_eq!(view.derived_width(), 0.0);
        assert_eq!(view.derived_height(), 0.0);

        view.set_hidden(false);
        assert_eq!(view.derived_width(), 100.0);
        assert_eq!(view.derived_height(), 40.0);
    }

    #[test]
    fn test_background() {
        let view = View::new(ViewConfig::new().background(Rgba::rgb(1, 2, 3)));
        let pane = Pane::new(Rect::from_size(100.0, 100.0));
        view.attach(&pane);
        assert_eq!(pane.background(), Some(Rgba::rgb(1, 2, 3)));

        view.set_background(Some(Rgba::rgb(4, 5, 6)));
        assert_eq!(pane.background(), Some(Rgba::rgb(4, 5, 6)));
    }

    #[test]
    fn test_hidden_skips_draw() {
        let view = View::new(ViewConfig::new().min_width(100.0));
        let calls = counting_draws(&view);
        let pane = Pane::new(Rect::from_size(100.0, 100.0));
        view.attach(&pane);

        pane.draw(&mut DrawList::new());
        assert_eq!(calls.get(), 1);

        view.set_hidden(true);
        assert_eq!(view.derived_width(), 0.0);
        assert_eq!(pane.draw(&mut DrawList::new()), EventStatus::Handled);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_detach() {
        let view = View::new(ViewConfig::new().min_width(100.0).background(Rgba::rgb(1, 2, 3)));
        let draws = counting_draws(&view);
        let pane = Pane::new(Rect::from_size(100.0, 100.0));

        let moves = Rc::new(Cell::new(0));
        view.attach(&pane);
        let m = moves.clone();
        pane.active_box_slot()
            .observe_owned(view.owner(), move |_| m.set(m.get() + 1));

        assert_eq!(pane.background(), Some(Rgba::rgb(1, 2, 3)));
        pane.draw(&mut DrawList::new());
        assert_eq!(draws.get(), 1);
        pane.set_active_box(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(moves.get(), 1);

        view.detach();
        assert!(view.pane().is_none());
        assert_eq!(pane.background(), None);
        view.set_background(Some(Rgba::rgb(4, 5, 6)));
        assert_eq!(pane.background(), None);
        pane.set_active_box(Rect::new(50.0, 50.0, 150.0, 150.0));
        assert_eq!(moves.get(), 1);

        pane.draw(&mut DrawList::new());
        assert_eq!(draws.get(), 1);

        // detaching twice is harmless
        view.detach();
    }

    #[test]
    fn test_alignment_updates_active_box() {
        let view = View::new(
            ViewConfig::new()
                .min_size(100.0, 50.0)
                .halign(HAlign::Center)
                .valign(VAlign::Top),
        );
        let pane = Pane::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        view.attach(&pane);
        assert_eq!(pane.active_box(), Rect::new(100.0, 150.0, 200.0, 200.0));

        view.set_halign(HAlign::Right);
        assert_eq!(pane.active_box(), Rect::new(200.0, 150.0, 300.0, 200.0));

        view.set_valign(VAlign::Bottom);
        assert_eq!(pane.active_box(), Rect::new(200.0, 0.0, 300.0, 50.0));

        pane.set_alloc_box(Rect::new(0.0, 0.0, 400.0, 100.0));
        assert_eq!(pane.active_box(), Rect::new(300.0, 0.0, 400.0, 50.0));

        view.set_min_width(Some(500.0));
        assert_eq!(pane.active_box(), Rect::new(0.0, 0.0, 400.0, 50.0));
        assert_eq!(pane.alloc_box(), Rect::new(0.0, 0.0, 400.0, 100.0));
    }

    #[test]
    fn test_attach_replaces_previous_pane() {
        let view = View::new(ViewConfig::new().background(Rgba::RED));
        let first = Pane::new(Rect::from_size(10.0, 10.0));
        let second = Pane::new(Rect::from_size(20.0, 20.0));

        view.attach(&first);
        view.attach(&second);
        assert!(view.pane().is_some_and(|p| p.ptr_eq(&second)));
        assert_eq!(first.background(), None);
        assert_eq!(first.handler_count(EventKind::Draw), 1);
        assert_eq!(second.background(), Some(Rgba::RED));
    }

    #[test]
    fn test_draw_order_background_then_content() {
        let view = View::new(ViewConfig::new().background(Rgba::BLUE));
        view.on_draw(|painter, rect| painter.fill_rect(rect, Rgba::WHITE));
        let pane = Pane::new(Rect::from_size(10.0, 10.0));
        view.attach(&pane);

        let mut list = DrawList::new();
        pane.draw(&mut list);
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Fill {
                    rect: Rect::from_size(10.0, 10.0),
                    color: Rgba::BLUE
                },
                DrawCommand::Fill {
                    rect: Rect::from_size(10.0, 10.0),
                    color: Rgba::WHITE
                },
            ]
        );
    }

    #[test]
    fn test_on_pointer_after_attach() {
        let view = View::new(ViewConfig::new());
        let pane = Pane::new(Rect::from_size(10.0, 10.0));
        view.attach(&pane);

        let presses = Rc::new(Cell::new(0));
        let p = presses.clone();
        view.on_pointer(move |event| {
            if matches!(event, PointerEvent::Press(_)) {
                p.set(p.get() + 1);
                EventStatus::Handled
            } else {
                EventStatus::Unhandled
            }
        });

        let status = pane.dispatch(&mut PaneEvent::Pointer(PointerEvent::Press(ButtonEvent {
            x: 1.0,
            y: 1.0,
            button: MouseButtons::LEFT,
            modifiers: Modifiers::empty(),
        })));
        assert_eq!(status, EventStatus::Handled);
        assert_eq!(presses.get(), 1);
    }

    #[test]
    fn test_dropped_view_releases_pane() {
        let pane = Pane::new(Rect::from_size(10.0, 10.0));
        {
            let view = View::new(ViewConfig::new().min_width(5.0).halign(HAlign::Left));
            view.attach(&pane);
            assert_eq!(pane.active_box(), Rect::new(0.0, 0.0, 5.0, 10.0));
        }
        // listeners hold weak references only; a dead view is a no-op
        pane.set_alloc_box(Rect::from_size(20.0, 20.0));
        assert_eq!(pane.active_box(), Rect::new(0.0, 0.0, 5.0, 10.0));
    }
}
