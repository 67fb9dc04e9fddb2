use std::fmt::Debug;

use super::{Window, WindowPatch, WindowSpec};
use crate::constants::MIN_WINDOW_SIZE;
use crate::geometry::{Bounds, Point, Size, Viewport};
use crate::host::{FrameToken, InteractionHost};
use crate::input::PointerEvent;
use crate::layout::floating::ResizeEdge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A window with that id existed; it was restored and focused instead.
    AlreadyOpen,
}

/// Owns every open window, their stacking order and focus.
///
/// Operations naming an id that is not open are silently ignored.
#[derive(Debug)]
pub struct WindowRegistry<Id> {
    // kept in open order; stacking comes from z_index
    windows: Vec<Window<Id>>,
    next_z: u64,
    min_size: Size,
}

impl<Id: Clone + Eq + Debug> Default for WindowRegistry<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Clone + Eq + Debug> WindowRegistry<Id> {
    pub fn new() -> Self {
        Self::with_min_size(MIN_WINDOW_SIZE)
    }

    pub fn with_min_size(min_size: Size) -> Self {
        Self {
            windows: Vec::new(),
            next_z: 1,
            min_size,
        }
    }

    fn index_of(&self, id: &Id) -> Option<usize> {
        self.windows.iter().position(|w| w.id == *id)
    }

    fn window_mut(&mut self, id: &Id) -> Option<&mut Window<Id>> {
        self.windows.iter_mut().find(|w| w.id == *id)
    }

    fn take_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    pub fn get(&self, id: &Id) -> Option<&Window<Id>> {
        self.windows.iter().find(|w| w.id == *id)
    }

    pub fn is_window_open(&self, id: &Id) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows in the order they were opened (taskbar order).
    pub fn windows(&self) -> impl Iterator<Item = &Window<Id>> {
        self.windows.iter()
    }

    /// Windows bottom-to-top.
    pub fn stack(&self) -> Vec<&Window<Id>> {
        let mut stack: Vec<&Window<Id>> = self.windows.iter().collect();
        stack.sort_by_key(|w| w.z_index);
        stack
    }

    pub fn focused(&self) -> Option<&Window<Id>> {
        self.windows.iter().find(|w| w.focused)
    }

    /// Topmost visible window under `point`.
    pub fn topmost_at(&self, point: Point) -> Option<&Window<Id>> {
        self.windows
            .iter()
            .filter(|w| !w.minimized && w.bounds().contains(point))
            .max_by_key(|w| w.z_index)
    }

    pub fn open_window(&mut self, spec: WindowSpec<Id>) -> OpenOutcome {
        if let Some(existing) = self.get(&spec.id) {
            let id = existing.id.clone();
            tracing::info!(window_id = ?id, "{} is already running", existing.title);
            if existing.minimized {
                self.update_window(&id, WindowPatch::minimized(false));
            }
            self.focus_window(&id);
            return OpenOutcome::AlreadyOpen;
        }
        let z = self.take_z();
        for window in &mut self.windows {
            window.focused = false;
        }
        let window = Window::new(spec, z, self.min_size);
        tracing::debug!(window_id = ?window.id, z_index = z, bounds = ?window.bounds(), "opened window");
        self.windows.push(window);
        OpenOutcome::Opened
    }

    /// Remove a window, handing focus to the highest survivor if it had it.
    pub fn close_window<H: InteractionHost + ?Sized>(&mut self, host: &mut H, id: &Id) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let mut closed = self.windows.remove(idx);
        closed.frame.teardown(host);
        tracing::debug!(window_id = ?closed.id, "closing window");
        if closed.focused
            && let Some(next) = self.windows.iter_mut().max_by_key(|w| w.z_index)
        {
            next.focused = true;
            tracing::debug!(window_id = ?next.id, "focus passed on close");
        }
        true
    }

    /// Raise a window above every other and give it focus.
    pub fn focus_window(&mut self, id: &Id) {
        if !self.is_window_open(id) {
            return;
        }
        let z = self.take_z();
        for window in &mut self.windows {
            window.focused = window.id == *id;
            if window.focused {
                window.z_index = z;
            }
        }
        tracing::debug!(window_id = ?id, z_index = z, "focused window");
    }

    /// Shallow merge of `patch`.
    ///
    /// Entering the minimized state stores the current normal bounds;
    /// leaving it puts them back, overriding any bounds in the patch.
    pub fn update_window(&mut self, id: &Id, patch: WindowPatch) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        let was_minimized = window.minimized;
        let minimize = patch.minimized.unwrap_or(was_minimized);

        if minimize && !was_minimized {
            let normal = if window.frame.is_maximized() {
                window.frame.take_restore()
            } else {
                None
            };
            window.snapshot = Some(normal.unwrap_or(window.frame.bounds()));
            tracing::debug!(window_id = ?id, snapshot = ?window.snapshot, "minimized window");
        }

        if let Some(title) = patch.title.clone() {
            window.title = title;
        }
        if let Some(content) = patch.content.clone() {
            window.content = content;
        }
        let mut bounds = patch.merge_bounds(window.frame.bounds());

        if !minimize && was_minimized {
            if let Some(saved) = window.snapshot.take() {
                bounds = saved;
            }
            tracing::debug!(window_id = ?id, bounds = ?bounds, "restored window");
        }

        window.minimized = minimize;
        if patch.touches_bounds() || minimize != was_minimized {
            window.frame.set_bounds(bounds);
        }
    }

    pub fn minimize_window(&mut self, id: &Id) {
        self.update_window(id, WindowPatch::minimized(true));
    }

    pub fn restore_window(&mut self, id: &Id) {
        self.update_window(id, WindowPatch::minimized(false));
    }

    /// Maximize a normal window or return a maximized one to its bounds.
    /// Minimized windows are left alone.
    pub fn toggle_maximize(&mut self, id: &Id, viewport: Viewport) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        if window.minimized {
            return;
        }
        window.frame.toggle_maximize(viewport);
    }

    /// Taskbar button behaviour: restore a minimized window, minimize the
    /// focused one, otherwise bring it forward.
    pub fn toggle_taskbar(&mut self, id: &Id) {
        let Some(window) = self.get(id) else {
            return;
        };
        if window.minimized {
            self.restore_window(id);
            self.focus_window(id);
        } else if window.focused {
            self.minimize_window(id);
        } else {
            self.focus_window(id);
        }
    }

    /// Keep maximized windows filling a resized viewport.
    pub fn reflow(&mut self, viewport: Viewport) {
        for window in &mut self.windows {
            window.frame.reflow(viewport);
        }
    }

    pub fn begin_drag<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &Id,
        event: &PointerEvent,
    ) -> bool {
        self.window_mut(id)
            .is_some_and(|w| w.frame.drag_start(host, event))
    }

    pub fn begin_resize<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &Id,
        event: &PointerEvent,
        edge: ResizeEdge,
    ) -> bool {
        self.window_mut(id)
            .is_some_and(|w| w.frame.resize_start(host, event, edge))
    }

    /// Window whose drag or resize gesture is in progress.
    pub fn active_gesture(&self) -> Option<&Id> {
        self.windows
            .iter()
            .find(|w| w.frame.gesture().is_some())
            .map(|w| &w.id)
    }

    pub fn pointer_move<H: InteractionHost + ?Sized>(&mut self, host: &mut H, event: &PointerEvent) {
        for window in &mut self.windows {
            window.frame.pointer_move(host, event);
        }
    }

    pub fn pointer_up<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Option<(Id, Bounds)> {
        let mut ended = None;
        for window in &mut self.windows {
            if let Some(bounds) = window.frame.pointer_up(host) {
                ended = Some((window.id.clone(), bounds));
            }
        }
        ended
    }

    /// Abandon every running gesture without committing it.
    pub fn teardown_gestures<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        for window in &mut self.windows {
            window.frame.teardown(host);
        }
    }

    /// Deliver a fired frame; returns the window that committed new bounds.
    pub fn on_frame(&mut self, token: FrameToken) -> Option<(Id, Bounds)> {
        self.windows.iter_mut().find_map(|w| {
            w.frame
                .on_frame(token)
                .map(|bounds| (w.id.clone(), bounds))
        })
    }
}
