//! Coordinate scaling from theme pixels to absolute page points.

use log::debug;

use crate::theme::{PositionPx, Theme};

/// Points per theme pixel (72 pt per inch over 96 px per inch).
pub const PT_PER_PX: f64 = 0.75;

/// A position on the page in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in absolute page points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The "no region available" sentinel.
    pub const EMPTY: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    /// The rectangle spanned by two corner points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Rect {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Zero area means there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrinks by `dx` on the left and right and `dy` on the top and bottom,
    /// never below zero size.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            width: (self.width - 2.0 * dx).max(0.0),
            height: (self.height - 2.0 * dy).max(0.0),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        Rect {
            left,
            top,
            width: self.right().max(other.right()) - left,
            height: self.bottom().max(other.bottom()) - top,
        }
    }
}

/// Converts theme-relative pixel geometry into points for one target page size.
///
/// The theme is authored for a fixed canvas (`basePx`); `scale_x`/`scale_y` stretch
/// that canvas onto the real page so a 960×540 design fills any 16:9 page.
#[derive(Debug, Clone)]
pub struct LayoutManager {
    page_width: f64,
    page_height: f64,
    scale_x: f64,
    scale_y: f64,
    theme: Theme,
}

impl LayoutManager {
    pub fn new(page_width_pt: f64, page_height_pt: f64, theme: Theme) -> Self {
        let base_w = Self::px_to_pt(theme.base_px.width);
        let base_h = Self::px_to_pt(theme.base_px.height);
        let scale_x = if base_w > 0.0 { page_width_pt / base_w } else { 1.0 };
        let scale_y = if base_h > 0.0 { page_height_pt / base_h } else { 1.0 };
        debug!(
            "[LayoutManager::new] page {page_width_pt}x{page_height_pt}pt, scale {scale_x:.4}x{scale_y:.4}"
        );
        LayoutManager {
            page_width: page_width_pt,
            page_height: page_height_pt,
            scale_x,
            scale_y,
            theme,
        }
    }

    /// Uses [`Theme::default`].
    pub fn with_default_theme(page_width_pt: f64, page_height_pt: f64) -> Self {
        Self::new(page_width_pt, page_height_pt, Theme::default())
    }

    /// Fixed-ratio conversion, independent of the page size.
    pub fn px_to_pt(px: f64) -> f64 {
        px * PT_PER_PX
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    /// A horizontal theme length in page points.
    pub fn to_pt_x(&self, px: f64) -> f64 {
        Self::px_to_pt(px) * self.scale_x
    }

    /// A vertical theme length in page points.
    pub fn to_pt_y(&self, px: f64) -> f64 {
        Self::px_to_pt(px) * self.scale_y
    }

    /// Diagram constant from the theme, scaled horizontally.
    pub fn diagram_x(&self, name: &str) -> f64 {
        self.to_pt_x(self.theme.diagram_px(name))
    }

    /// Diagram constant from the theme, scaled vertically.
    pub fn diagram_y(&self, name: &str) -> f64 {
        self.to_pt_y(self.theme.diagram_px(name))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Resolves a dot path in the theme's position tree.
    /// Unknown paths yield [`Rect::EMPTY`].
    pub fn get_rect(&self, path: &str) -> Rect {
        match self.theme.position(path) {
            Some(position) => self.rect_from_position(position),
            None => {
                debug!("[LayoutManager::get_rect] unknown position path '{path}'");
                Rect::EMPTY
            }
        }
    }

    /// Resolves a literal position object.
    pub fn rect_from_position(&self, position: &PositionPx) -> Rect {
        let width = position.width.unwrap_or(0.0).max(0.0);
        let height = position.height.unwrap_or(0.0).max(0.0);
        let left_px = match (position.left, position.right) {
            (Some(left), _) => left,
            (None, Some(right)) => self.theme.base_px.width - right - width,
            (None, None) => 0.0,
        };
        Rect {
            left: self.to_pt_x(left_px),
            top: self.to_pt_y(position.top.unwrap_or(0.0)),
            width: self.to_pt_x(width),
            height: self.to_pt_y(height),
        }
    }
}
