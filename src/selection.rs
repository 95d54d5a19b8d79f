//! Hover/lock selection controller for the works list.
//!
//! A [`Selection`] tracks two optional items: the one under the pointer
//! (*hovered*) and the one pinned by a click (*locked*). The item shown in the
//! detail panel is derived from both, and a lock always wins:
//!
//! ```text
//! displayed = locked.or(hovered)
//! ```
//!
//! # Transitions
//!
//! | Call | Nothing locked | Some item locked |
//! |------|----------------|------------------|
//! | `hover(x)` | hovered = x | ignored |
//! | `unhover()` | hovered = none | ignored |
//! | `select(x, _)` | lock + hover x | lock + hover x |
//! | `select(locked, true)` | n/a | clear, navigate |
//! | `clear()` | reset | reset |
//!
//! # Listeners and effects
//!
//! The controller never touches a document. Global pointer listeners are
//! requested from an injected [`PointerSource`] and cursor changes are queued
//! as [`UiEffect`]s for the presentation layer to apply
//! ([`Selection::take_effects`]).
//!
//! - The pointer-down listener lives for the whole active lifetime
//!   ([`Selection::activate`] to [`Selection::deactivate`] or drop). A
//!   pointer-down outside the bound [`Container`] clears the selection.
//! - The pointer-move listener exists only while the controller is active
//!   *and* an item is locked. While it exists, moving outside the container
//!   shows the close cursor and moving back inside restores the default.
//!   Removing it always restores the default cursor.

use crate::types::Identifiable;
use tracing::debug;

/// CSS cursor value for the "click to close" affordance: a white X with the
/// hotspot in the middle, falling back to `pointer`.
pub const CLOSE_CURSOR: &str = "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24' viewBox='0 0 24 24' fill='none' stroke='white' stroke-width='2' stroke-linecap='round' stroke-linejoin='round'><line x1='18' y1='6' x2='6' y2='18'/><line x1='6' y1='6' x2='18' y2='18'/></svg>\") 12 12, pointer";

/// Cursor shown for the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Close,
}

impl Cursor {
    /// The value to assign to the body's `cursor` style. Empty resets it.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Close => CLOSE_CURSOR,
        }
    }
}

/// A UI side effect the presentation layer must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    SetCursor(Cursor),
}

/// Global listeners the controller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    PointerDown,
    PointerMove,
}

/// An ambient pointer event stream.
///
/// Implementations register the listener with whatever delivers events (a
/// DOM document, a test harness) and route matching events back to
/// [`Selection::on_pointer_down`] / [`Selection::on_pointer_move`].
pub trait PointerSource {
    fn install(&mut self, listener: Listener);
    fn remove(&mut self, listener: Listener);
}

/// The region the selection is bound to. Pointer events outside it clear
/// the selection or show the close cursor.
pub trait Container {
    type Target;

    fn contains(&self, target: &Self::Target) -> bool;
}

/// A [`PointerSource`] that only remembers which listeners are installed.
///
/// Used when the host delivers every event regardless of registration (for
/// instance when replaying recorded interactions) but still wants to know
/// what the controller asked for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListenerSet {
    pointer_down: bool,
    pointer_move: bool,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_installed(&self, listener: Listener) -> bool {
        match listener {
            Listener::PointerDown => self.pointer_down,
            Listener::PointerMove => self.pointer_move,
        }
    }
}

impl PointerSource for ListenerSet {
    fn install(&mut self, listener: Listener) {
        match listener {
            Listener::PointerDown => self.pointer_down = true,
            Listener::PointerMove => self.pointer_move = true,
        }
    }

    fn remove(&mut self, listener: Listener) {
        match listener {
            Listener::PointerDown => self.pointer_down = false,
            Listener::PointerMove => self.pointer_move = false,
        }
    }
}

/// Result of [`Selection::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    /// `false` means the caller must suppress the default link navigation.
    pub should_navigate: bool,
}

/// Hover/lock selection state bound to a container and a pointer source.
pub struct Selection<T, C, P: PointerSource> {
    hovered: Option<T>,
    locked: Option<T>,
    container: C,
    pointer: P,
    active: bool,
    tracking_moves: bool,
    effects: Vec<UiEffect>,
    on_navigate: Option<Box<dyn FnMut()>>,
}

impl<T, C, P> Selection<T, C, P>
where
    T: Identifiable + Clone,
    C: Container,
    P: PointerSource,
{
    /// Create an inactive controller. Call [`activate`](Self::activate) to
    /// install listeners.
    pub fn new(container: C, pointer: P) -> Self {
        Self {
            hovered: None,
            locked: None,
            container,
            pointer,
            active: false,
            tracking_moves: false,
            effects: Vec::new(),
            on_navigate: None,
        }
    }

    /// Callback invoked when a second click on a locked, linked item
    /// navigates away.
    pub fn with_on_navigate(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_on_navigate(callback);
        self
    }

    pub fn set_on_navigate(&mut self, callback: impl FnMut() + 'static) {
        self.on_navigate = Some(Box::new(callback));
    }

    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.pointer.install(Listener::PointerDown);
        debug!("selection activated");
        self.sync_move_listener();
    }

    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.sync_move_listener();
        self.pointer.remove(Listener::PointerDown);
        debug!("selection deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The item to show in detail: the locked item, else the hovered one.
    pub fn displayed(&self) -> Option<&T> {
        self.locked.as_ref().or(self.hovered.as_ref())
    }

    pub fn hovered(&self) -> Option<&T> {
        self.hovered.as_ref()
    }

    pub fn locked(&self) -> Option<&T> {
        self.locked.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn is_item_active(&self, item: &T) -> bool {
        self.displayed().is_some_and(|d| d.same_item(item))
    }

    /// Handle a click on `item`.
    ///
    /// Clicking the locked item again follows its link when it has one.
    /// Any other click pins the item.
    pub fn select(&mut self, item: &T, has_link: bool) -> SelectOutcome {
        let is_currently_locked = self.locked.as_ref().is_some_and(|l| l.same_item(item));

        if is_currently_locked && has_link {
            self.clear();
            if let Some(navigate) = self.on_navigate.as_mut() {
                navigate();
            }
            return SelectOutcome {
                should_navigate: true,
            };
        }

        self.locked = Some(item.clone());
        self.hovered = Some(item.clone());
        self.sync_move_listener();
        SelectOutcome {
            should_navigate: false,
        }
    }

    pub fn hover(&mut self, item: &T) {
        if self.locked.is_none() {
            self.hovered = Some(item.clone());
        }
    }

    pub fn unhover(&mut self) {
        if self.locked.is_none() {
            self.hovered = None;
        }
    }

    pub fn clear(&mut self) {
        self.locked = None;
        self.hovered = None;
        self.sync_move_listener();
    }

    /// Pointer pressed anywhere on the page.
    pub fn on_pointer_down(&mut self, target: &C::Target) {
        if !self.active {
            return;
        }
        if !self.container.contains(target) {
            self.clear();
        }
    }

    /// Pointer moved anywhere on the page.
    pub fn on_pointer_move(&mut self, target: &C::Target) {
        if !self.tracking_moves {
            return;
        }
        let cursor = if self.container.contains(target) {
            Cursor::Default
        } else {
            Cursor::Close
        };
        self.effects.push(UiEffect::SetCursor(cursor));
    }

    /// Drain queued UI effects, oldest first.
    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Keep the move listener installed exactly while active and locked.
    fn sync_move_listener(&mut self) {
        let wanted = self.active && self.locked.is_some();
        if wanted && !self.tracking_moves {
            self.pointer.install(Listener::PointerMove);
            self.tracking_moves = true;
            debug!("tracking pointer moves while locked");
        } else if !wanted && self.tracking_moves {
            self.pointer.remove(Listener::PointerMove);
            self.tracking_moves = false;
            self.effects.push(UiEffect::SetCursor(Cursor::Default));
            debug!("stopped tracking pointer moves");
        }
    }
}

impl<T, C, P: PointerSource> Drop for Selection<T, C, P> {
    fn drop(&mut self) {
        if self.tracking_moves {
            self.pointer.remove(Listener::PointerMove);
        }
        if self.active {
            self.pointer.remove(Listener::PointerDown);
        }
    }
}
