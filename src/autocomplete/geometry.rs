//! Integer geometry shared by the surfaces, the controller and the watcher.
//!
//! Units are whatever the host uses: pixels for a windowing toolkit, cells for
//! the terminal widget in this crate.

/// A position in either window-relative or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `other`.
    pub const fn offset(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Returns this point expressed relative to `origin`.
    pub const fn relative_to(self, origin: Point) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle. Containment is half-open: the right and bottom
/// edges lie outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from an origin and a size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// First column to the right of the rectangle.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// First row below the rectangle.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Bottom-left corner.
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    /// Returns the rectangle moved by `delta`.
    pub const fn translate(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Reports whether `point` lies inside the rectangle.
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 5, 20, 1);
        assert!(r.contains(Point::new(10, 5)));
        assert!(r.contains(Point::new(29, 5)));
        assert!(!r.contains(Point::new(30, 5)));
        assert!(!r.contains(Point::new(9, 5)));
        assert!(!r.contains(Point::new(10, 6)));
        assert!(!r.contains(Point::new(10, 4)));
    }

    #[test]
    fn translate_and_corners() {
        let r = Rect::new(2, 3, 4, 5).translate(Point::new(10, 20));
        assert_eq!(r.origin(), Point::new(12, 23));
        assert_eq!(r.bottom_left(), Point::new(12, 28));
        assert_eq!(r.right(), 16);
        assert_eq!(Point::new(15, 30).relative_to(r.origin()), Point::new(3, 7));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 0);
        assert!(!r.contains(Point::new(0, 0)));
    }
}
