//! Isometric projection between grid cells and screen space.
//!
//! A cell `(x, y)` projects to the top vertex of its diamond:
//!
//! ```text
//! screen_x = (x - y) * tile_width  / 2
//! screen_y = (x + y) * tile_height / 2
//! ```
//!
//! Renderers paint in ascending [`Position::depth_key`] order; equal keys keep
//! the order in which the drawables were produced.

use crate::config::GameConfig;
use crate::state::Position;

/// A point in screen space, in pixels, relative to the projection origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Diamond projection parameterised by tile size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsoProjection {
    tile_width: u32,
    tile_height: u32,
}

impl IsoProjection {
    /// Creates a projection; zero dimensions are bumped to one pixel so the
    /// inverse stays defined.
    pub const fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width: if tile_width == 0 { 1 } else { tile_width },
            tile_height: if tile_height == 0 { 1 } else { tile_height },
        }
    }

    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    #[inline]
    fn half_width(&self) -> f64 {
        f64::from(self.tile_width) / 2.0
    }

    #[inline]
    fn half_height(&self) -> f64 {
        f64::from(self.tile_height) / 2.0
    }

    /// Projects a grid cell to the top vertex of its diamond.
    pub fn to_screen(&self, position: Position) -> ScreenPoint {
        let x = f64::from(position.x);
        let y = f64::from(position.y);
        ScreenPoint::new((x - y) * self.half_width(), (x + y) * self.half_height())
    }

    /// Solves the projection for fractional grid coordinates.
    pub fn to_grid_exact(&self, point: ScreenPoint) -> (f64, f64) {
        let diff = point.x / self.half_width(); // x - y
        let sum = point.y / self.half_height(); // x + y
        ((sum + diff) / 2.0, (sum - diff) / 2.0)
    }

    /// Inverse of [`Self::to_screen`]: the grid vertex nearest to `point`.
    ///
    /// `to_grid(to_screen(p)) == p` for every integer cell.
    pub fn to_grid(&self, point: ScreenPoint) -> Position {
        let (x, y) = self.to_grid_exact(point);
        Position::new(x.round() as i32, y.round() as i32)
    }

    /// Hit test: the cell whose diamond contains `point`.
    ///
    /// A diamond covers the unit square `[x, x + 1) × [y, y + 1)` in grid space,
    /// so the containing cell is the floor of the exact inverse.
    pub fn cell_at(&self, point: ScreenPoint) -> Position {
        let (x, y) = self.to_grid_exact(point);
        Position::new(x.floor() as i32, y.floor() as i32)
    }

    /// Diamond corners of a cell in screen space: top, right, bottom, left.
    pub fn tile_outline(&self, position: Position) -> [ScreenPoint; 4] {
        let top = self.to_screen(position);
        let (hw, hh) = (self.half_width(), self.half_height());
        [
            top,
            ScreenPoint::new(top.x + hw, top.y + hh),
            ScreenPoint::new(top.x, top.y + 2.0 * hh),
            ScreenPoint::new(top.x - hw, top.y + hh),
        ]
    }
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_TILE_WIDTH, GameConfig::DEFAULT_TILE_HEIGHT)
    }
}

/// Sorts drawables into paint order.
///
/// The sort is stable, so drawables sharing a depth key keep their input order.
pub fn paint_order<T, F>(drawables: &mut [T], mut depth_key: F)
where
    F: FnMut(&T) -> i64,
{
    drawables.sort_by_key(|drawable| depth_key(drawable));
}
