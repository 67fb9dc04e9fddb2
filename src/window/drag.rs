//! Pointer-driven move and resize for a single window.
//!
//! A gesture runs from `drag_start`/`resize_start` to `pointer_up`. Every
//! pointer move recomputes a candidate from the gesture's recorded origin,
//! never from the last committed bounds, and parks it as pending. The
//! pending candidate is published when the host's next frame fires, so any
//! number of moves inside one frame produce a single commit carrying the
//! latest position.

use crate::geometry::{Bounds, Point, Size, Viewport};
use crate::host::{FrameToken, GestureListeners, InteractionHost};
use crate::input::PointerEvent;
use crate::layout::floating::{ResizeEdge, apply_resize_clamped};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Move,
    Resize(ResizeEdge),
}

#[derive(Debug)]
struct Session {
    gesture: Gesture,
    origin: Point,
    start: Bounds,
    listeners: GestureListeners,
}

#[derive(Debug)]
pub struct DragResizeController {
    bounds: Bounds,
    min_size: Size,
    maximized: bool,
    // bounds to return to when leaving the maximized state
    restore: Option<Bounds>,
    session: Option<Session>,
    pending: Option<Bounds>,
    frame: Option<FrameToken>,
}

impl DragResizeController {
    pub fn new(bounds: Bounds, min_size: Size) -> Self {
        Self {
            bounds,
            min_size,
            maximized: false,
            restore: None,
            session: None,
            pending: None,
            frame: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn position(&self) -> Point {
        self.bounds.position()
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.session,
            Some(Session {
                gesture: Gesture::Move,
                ..
            })
        )
    }

    pub fn is_resizing(&self) -> bool {
        matches!(
            self.session,
            Some(Session {
                gesture: Gesture::Resize(_),
                ..
            })
        )
    }

    /// Bounds saved by `maximize`, present only while maximized.
    pub fn restore_bounds(&self) -> Option<Bounds> {
        self.restore.filter(|_| self.maximized)
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.session.as_ref().map(|s| s.gesture)
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Overwrite the committed bounds from outside a gesture.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn drag_start<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> bool {
        self.begin(host, event, Gesture::Move)
    }

    pub fn resize_start<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        edge: ResizeEdge,
    ) -> bool {
        self.begin(host, event, Gesture::Resize(edge))
    }

    fn begin<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        gesture: Gesture,
    ) -> bool {
        if self.maximized {
            return false;
        }
        // a second pointer-down without an up replaces the old gesture
        self.end_session(host);
        tracing::debug!(?gesture, origin = ?event.position, bounds = ?self.bounds, "gesture start");
        self.session = Some(Session {
            gesture,
            origin: event.position,
            start: self.bounds,
            listeners: GestureListeners::attach(host),
        });
        true
    }

    /// Recompute the candidate bounds for the current pointer position.
    ///
    /// Does nothing outside a gesture or while the viewport is unknown.
    pub fn pointer_move<H: InteractionHost + ?Sized>(&mut self, host: &mut H, event: &PointerEvent) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(viewport) = host.viewport() else {
            return;
        };
        let delta = event.position.offset_from(session.origin);
        let candidate = match session.gesture {
            Gesture::Move => {
                let moved = session.start.with_position(session.start.position().translate(delta));
                viewport.clamp_bounds(moved)
            }
            Gesture::Resize(edge) => {
                apply_resize_clamped(session.start, edge, delta, self.min_size, &viewport)
            }
        };
        self.pending = Some(candidate);
        if self.frame.is_none() {
            self.frame = Some(host.request_frame());
        }
    }

    /// Publish the pending candidate if `token` is this controller's frame.
    pub fn on_frame(&mut self, token: FrameToken) -> Option<Bounds> {
        if self.frame != Some(token) {
            return None;
        }
        self.frame = None;
        let next = self.pending.take()?;
        self.bounds = next;
        Some(next)
    }

    /// Finish the gesture, committing whatever was still pending.
    ///
    /// Returns the final bounds when a gesture was active.
    pub fn pointer_up<H: InteractionHost + ?Sized>(&mut self, host: &mut H) -> Option<Bounds> {
        if self.session.is_none() {
            return None;
        }
        if let Some(next) = self.pending.take() {
            self.bounds = next;
        }
        self.end_session(host);
        tracing::debug!(bounds = ?self.bounds, "gesture end");
        Some(self.bounds)
    }

    /// Release every host resource without committing anything.
    pub fn teardown<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        self.pending = None;
        self.end_session(host);
    }

    fn end_session<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.frame.take() {
            host.cancel_frame(token);
        }
        if let Some(session) = self.session.take() {
            session.listeners.detach(host);
        }
    }

    /// Fill the viewport, or return to the bounds held before maximizing.
    pub fn toggle_maximize(&mut self, viewport: Viewport) {
        if self.maximized {
            self.unmaximize();
        } else {
            self.maximize(viewport);
        }
    }

    pub fn maximize(&mut self, viewport: Viewport) {
        if self.maximized {
            return;
        }
        self.restore = Some(self.bounds);
        self.bounds = viewport.fill_bounds();
        self.maximized = true;
        tracing::debug!(bounds = ?self.bounds, "maximized");
    }

    pub fn unmaximize(&mut self) {
        if !self.maximized {
            return;
        }
        if let Some(prev) = self.restore.take() {
            self.bounds = prev;
        }
        self.maximized = false;
        tracing::debug!(bounds = ?self.bounds, "unmaximized");
    }

    /// Leave the maximized state without restoring, handing back the
    /// bounds that were saved when maximizing.
    pub fn take_restore(&mut self) -> Option<Bounds> {
        self.maximized = false;
        self.restore.take()
    }

    /// Track a new viewport while maximized.
    pub fn reflow(&mut self, viewport: Viewport) {
        if self.maximized {
            self.bounds = viewport.fill_bounds();
        }
    }
}
