pub mod decorator;
pub mod drag;

mod registry;

pub use drag::{DragResizeController, Gesture};
pub use registry::{OpenOutcome, WindowRegistry};

use crate::constants::{DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_TITLE};
use crate::geometry::{Bounds, Point, Size};

/// Opaque reference to whatever the view layer shows inside a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WindowContent {
    #[default]
    Empty,
    /// An application panel looked up by key.
    App(String),
    Text(String),
}

/// Request to open a window; unspecified fields fall back to defaults.
#[derive(Debug, Clone)]
pub struct WindowSpec<Id> {
    pub id: Id,
    pub title: Option<String>,
    pub content: WindowContent,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl<Id> WindowSpec<Id> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            title: None,
            content: WindowContent::Empty,
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: WindowContent) -> Self {
        self.content = content;
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn bounds(self, bounds: Bounds) -> Self {
        self.position(bounds.x, bounds.y)
            .size(bounds.width, bounds.height)
    }

    fn resolved_bounds(&self) -> Bounds {
        Bounds::new(
            self.x.unwrap_or(DEFAULT_WINDOW_POSITION.x),
            self.y.unwrap_or(DEFAULT_WINDOW_POSITION.y),
            self.width.unwrap_or(DEFAULT_WINDOW_SIZE.width),
            self.height.unwrap_or(DEFAULT_WINDOW_SIZE.height),
        )
    }
}

/// Shallow update for [`WindowRegistry::update_window`]; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowPatch {
    pub title: Option<String>,
    pub content: Option<WindowContent>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub minimized: Option<bool>,
}

impl WindowPatch {
    pub fn minimized(value: bool) -> Self {
        Self {
            minimized: Some(value),
            ..Self::default()
        }
    }

    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Self::default()
        }
    }

    fn touches_bounds(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    fn merge_bounds(&self, current: Bounds) -> Bounds {
        Bounds::new(
            self.x.unwrap_or(current.x),
            self.y.unwrap_or(current.y),
            self.width.unwrap_or(current.width),
            self.height.unwrap_or(current.height),
        )
    }
}

#[derive(Debug)]
pub struct Window<Id> {
    id: Id,
    title: String,
    content: WindowContent,
    z_index: u64,
    focused: bool,
    minimized: bool,
    // normal bounds held while minimized
    snapshot: Option<Bounds>,
    frame: DragResizeController,
}

impl<Id> Window<Id> {
    fn new(spec: WindowSpec<Id>, z_index: u64, min_size: Size) -> Self {
        let bounds = spec.resolved_bounds();
        Self {
            title: spec
                .title
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string()),
            content: spec.content,
            id: spec.id,
            z_index,
            focused: true,
            minimized: false,
            snapshot: None,
            frame: DragResizeController::new(bounds, min_size),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &WindowContent {
        &self.content
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.frame.is_maximized()
    }

    pub fn bounds(&self) -> Bounds {
        self.frame.bounds()
    }

    pub fn position(&self) -> Point {
        self.frame.position()
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// Normal bounds to return to, present while minimized or maximized.
    pub fn snapshot(&self) -> Option<Bounds> {
        if self.minimized {
            self.snapshot
        } else {
            self.frame.restore_bounds()
        }
    }

    pub fn controller(&self) -> &DragResizeController {
        &self.frame
    }
}
