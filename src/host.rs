//! Services the interaction controllers borrow from whatever drives them.
//!
//! Controllers never own a clock, a listener registry or a measurement of
//! the screen. They ask the host for a frame, attach pointer listeners for
//! the lifetime of a gesture and read geometry at the moment they need it,
//! which keeps the math testable without a rendering surface.

use std::collections::BTreeMap;

use crate::geometry::{Bounds, Viewport};

/// Handle for one requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

/// Handle for one attached global pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

pub trait PointerListeners {
    fn attach(&mut self, kind: ListenerKind) -> ListenerToken;
    fn detach(&mut self, token: ListenerToken);
}

pub trait GeometryProvider {
    /// `None` while the shell has not been measured yet.
    fn viewport(&self) -> Option<Viewport>;
    /// Screen rectangle of the icon plane, `None` until it is mounted.
    fn container(&self) -> Option<Bounds>;
}

pub trait InteractionHost: FrameScheduler + PointerListeners + GeometryProvider {}

impl<T: FrameScheduler + PointerListeners + GeometryProvider + ?Sized> InteractionHost for T {}

/// In-process frame scheduler: every outstanding request fires on the next
/// tick, cancelled requests never fire.
#[derive(Debug, Default)]
pub struct FrameClock {
    next: u64,
    pending: Vec<FrameToken>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    /// Drain the requests that fire on this tick, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameToken {
        self.next = self.next.saturating_add(1);
        let token = FrameToken(self.next);
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}

/// Bookkeeping for global pointer listeners so a leaked gesture is visible.
#[derive(Debug, Default)]
pub struct ListenerTable {
    next: u64,
    attached: BTreeMap<ListenerToken, ListenerKind>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.attached.len()
    }

    pub fn active_of(&self, kind: ListenerKind) -> usize {
        self.attached.values().filter(|k| **k == kind).count()
    }
}

impl PointerListeners for ListenerTable {
    fn attach(&mut self, kind: ListenerKind) -> ListenerToken {
        self.next = self.next.saturating_add(1);
        let token = ListenerToken(self.next);
        self.attached.insert(token, kind);
        token
    }

    fn detach(&mut self, token: ListenerToken) {
        self.attached.remove(&token);
    }
}

/// Listener pair held by one gesture; detached together exactly once.
#[derive(Debug)]
pub(crate) struct GestureListeners {
    on_move: ListenerToken,
    on_up: ListenerToken,
}

impl GestureListeners {
    pub(crate) fn attach<H: PointerListeners + ?Sized>(host: &mut H) -> Self {
        Self {
            on_move: host.attach(ListenerKind::PointerMove),
            on_up: host.attach(ListenerKind::PointerUp),
        }
    }

    pub(crate) fn detach<H: PointerListeners + ?Sized>(self, host: &mut H) {
        host.detach(self.on_move);
        host.detach(self.on_up);
    }
}

/// Host used by the terminal runtime and the tests.
#[derive(Debug, Default)]
pub struct ShellHost {
    pub frames: FrameClock,
    pub listeners: ListenerTable,
    viewport: Option<Viewport>,
    container: Option<Bounds>,
}

impl ShellHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(viewport: Viewport, container: Bounds) -> Self {
        let mut host = Self::new();
        host.set_viewport(Some(viewport));
        host.set_container(Some(container));
        host
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn set_container(&mut self, container: Option<Bounds>) {
        self.container = container;
    }
}

impl FrameScheduler for ShellHost {
    fn request_frame(&mut self) -> FrameToken {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.cancel_frame(token);
    }
}

impl PointerListeners for ShellHost {
    fn attach(&mut self, kind: ListenerKind) -> ListenerToken {
        self.listeners.attach(kind)
    }

    fn detach(&mut self, token: ListenerToken) {
        self.listeners.detach(token);
    }
}

impl GeometryProvider for ShellHost {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn container(&self) -> Option<Bounds> {
        self.container
    }
}
