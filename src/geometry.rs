//! Pixel-space geometry shared by the window and icon engines.
//!
//! Origins are signed so intermediate drag results can sit past the top or
//! left edge before they are clamped back into the viewport.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn translate(self, delta: Point) -> Point {
        Point {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Signed rectangle origin with its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Inclusive overlap: rectangles that merely touch still overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.x > other.right()
            || self.right() < other.x
            || self.y > other.bottom()
            || self.bottom() < other.y)
    }

    /// Axis-aligned rectangle spanned by two corners in any order.
    pub fn spanning(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            x: left,
            y: top,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }
}

/// Visible desktop area plus the height reserved for the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub chrome_height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32, chrome_height: i32) -> Self {
        Self {
            width,
            height,
            chrome_height,
        }
    }

    /// Height available to windows once the chrome is reserved.
    pub fn usable_height(&self) -> i32 {
        (self.height - self.chrome_height).max(0)
    }

    /// Bounds a maximized window occupies.
    pub fn fill_bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width.max(0), self.usable_height())
    }

    /// Keep a window of `size` inside the viewport, above the chrome.
    ///
    /// When the window is larger than the available area the origin pins to
    /// zero instead of going negative.
    pub fn clamp_position(&self, position: Point, size: Size) -> Point {
        let max_x = self.width - size.width;
        let max_y = self.height - size.height - self.chrome_height;
        Point {
            x: position.x.min(max_x).max(0),
            y: position.y.min(max_y).max(0),
        }
    }

    pub fn clamp_bounds(&self, bounds: Bounds) -> Bounds {
        bounds.with_position(self.clamp_position(bounds.position(), bounds.size()))
    }
}
