//! Pixel geometry: board and tray rectangles, cell sizes, hit testing.
//!
//! The layout uses an engine-local coordinate space with the board's
//! top-left corner at the origin and the tray directly below it. The UI is
//! free to translate the whole play area; pointer input must be mapped into
//! this space before it reaches the game.

use jiglace_core::{GridSize, Position, TrayParams};

use crate::ImageInfo;

/// Board width cap, matching a phone-friendly column.
const MAX_BOARD_WIDTH: f32 = 390.0;
/// Horizontal viewport margin left around the board.
const H_MARGIN: f32 = 40.0;
/// Vertical viewport space reserved for chrome above and below the board.
const V_MARGIN: f32 = 160.0;
/// Gap between the board's bottom edge and the tray.
const TRAY_GAP: f32 = 16.0;
/// Tray cells are rendered at this fraction of a board cell.
const TRAY_SHRINK: f32 = 0.6;
/// Tray height as a fraction of the board height.
const TRAY_HEIGHT_RATIO: f32 = 0.5;

/// The window area available to the game, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Available width.
    pub width: f32,
    /// Available height.
    pub height: f32,
}

/// What a pointer coordinate landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// A board cell.
    Board(Position),
    /// The tray rectangle below the board.
    Tray,
}

/// Resolved pixel geometry for one grid size, image, and viewport.
///
/// The board rectangle keeps the image's aspect ratio, so cells are only
/// square for square images. Cell sides are floored to whole pixels and the
/// board is an exact cell multiple in each dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    size: GridSize,
    cell_width: f32,
    cell_height: f32,
}

impl Layout {
    /// Computes the layout for `size` slicing `image` within `viewport`.
    ///
    /// The board is the largest image-aspect rectangle that fits the
    /// viewport minus margins, with its width capped at a phone column.
    /// Degenerate viewports clamp to one pixel per cell rather than
    /// producing a zero-sized board.
    #[must_use]
    pub fn compute(size: GridSize, image: ImageInfo, viewport: Viewport) -> Self {
        #[expect(clippy::cast_precision_loss)]
        let (image_width, image_height) = (image.width.max(1) as f32, image.height.max(1) as f32);
        let n = f32::from(size.n());
        let max_width = (viewport.width - H_MARGIN).min(MAX_BOARD_WIDTH);
        let max_height = viewport.height - V_MARGIN;
        let scale = (max_width / image_width).min(max_height / image_height);
        let cell_width = ((image_width * scale).floor() / n).floor().max(1.0);
        let cell_height = ((image_height * scale).floor() / n).floor().max(1.0);
        Self {
            size,
            cell_width,
            cell_height,
        }
    }

    /// The grid size this layout was computed for.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Width of one board cell.
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one board cell.
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Width of the board rectangle.
    #[must_use]
    pub fn board_width(&self) -> f32 {
        self.cell_width * f32::from(self.size.n())
    }

    /// Height of the board rectangle.
    #[must_use]
    pub fn board_height(&self) -> f32 {
        self.cell_height * f32::from(self.size.n())
    }

    /// Top-left corner of the tray rectangle.
    #[must_use]
    pub fn tray_origin(&self) -> (f32, f32) {
        (0.0, self.board_height() + TRAY_GAP)
    }

    /// Tray geometry: board-wide, half the board tall, shrunken cells.
    #[must_use]
    pub fn tray_params(&self) -> TrayParams {
        TrayParams {
            width: self.board_width(),
            height: (self.board_height() * TRAY_HEIGHT_RATIO).floor(),
            cell_width: (self.cell_width * TRAY_SHRINK).floor(),
            cell_height: (self.cell_height * TRAY_SHRINK).floor(),
        }
    }

    /// Center of `position`'s cell, for scripted pointer input.
    #[must_use]
    pub fn cell_center(&self, position: Position) -> (f32, f32) {
        (
            (f32::from(position.col) + 0.5) * self.cell_width,
            (f32::from(position.row) + 0.5) * self.cell_height,
        )
    }

    /// The board cell under `(x, y)`, if the point is on the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Position> {
        let on_board =
            (0.0..self.board_width()).contains(&x) && (0.0..self.board_height()).contains(&y);
        on_board.then(|| {
            // In-range coordinates divided by the cell side stay below n <= 8.
            Position::new((y / self.cell_height) as u8, (x / self.cell_width) as u8)
        })
    }

    /// Classifies `(x, y)` as a board cell, the tray, or neither.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<HitRegion> {
        if let Some(position) = self.cell_at(x, y) {
            return Some(HitRegion::Board(position));
        }
        let (tray_x, tray_y) = self.tray_origin();
        let params = self.tray_params();
        let in_tray = (tray_x..tray_x + params.width).contains(&x)
            && (tray_y..tray_y + params.height).contains(&y);
        in_tray.then_some(HitRegion::Tray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Viewport {
        Viewport {
            width: 430.0,
            height: 800.0,
        }
    }

    fn square(side: u32) -> ImageInfo {
        ImageInfo {
            width: side,
            height: side,
        }
    }

    #[test]
    fn square_image_fills_the_capped_column() {
        let layout = Layout::compute(GridSize::new(3).unwrap(), square(1024), phone());
        // width - 40 = 390 caps before height - 160 = 640 does.
        assert_eq!(layout.cell_width(), 130.0);
        assert_eq!(layout.cell_height(), 130.0);
        assert_eq!(layout.board_width(), 390.0);
        assert_eq!(layout.board_height(), 390.0);
    }

    #[test]
    fn wide_image_keeps_its_aspect() {
        let image = ImageInfo {
            width: 800,
            height: 600,
        };
        let layout = Layout::compute(GridSize::new(3).unwrap(), image, phone());
        // scale = 390 / 800; board = 390 x floor(600 * 390 / 800) = 390 x 292.
        assert_eq!(layout.cell_width(), 130.0);
        assert_eq!(layout.cell_height(), 97.0);
        assert_eq!(layout.board_height(), 291.0);
    }

    #[test]
    fn short_viewport_limits_the_board() {
        let layout = Layout::compute(
            GridSize::new(4).unwrap(),
            square(512),
            Viewport {
                width: 430.0,
                height: 400.0,
            },
        );
        // height - 160 = 240 wins; cell = floor(240 / 4).
        assert_eq!(layout.cell_width(), 60.0);
        assert_eq!(layout.board_height(), 240.0);
    }

    #[test]
    fn degenerate_viewport_clamps_to_unit_cells() {
        let layout = Layout::compute(
            GridSize::new(5).unwrap(),
            square(100),
            Viewport {
                width: 10.0,
                height: 10.0,
            },
        );
        assert_eq!(layout.cell_width(), 1.0);
        assert_eq!(layout.cell_height(), 1.0);
        assert_eq!(layout.board_width(), 5.0);
    }

    #[test]
    fn cell_side_is_exact() {
        // 390 / 7 is not whole; the board shrinks to a cell multiple.
        let layout = Layout::compute(GridSize::new(7).unwrap(), square(2048), phone());
        assert_eq!(layout.cell_width(), 55.0);
        assert_eq!(layout.board_width(), 385.0);
    }

    #[test]
    fn hit_test_distinguishes_regions() {
        let layout = Layout::compute(GridSize::new(3).unwrap(), square(1024), phone());
        assert_eq!(
            layout.hit_test(0.0, 0.0),
            Some(HitRegion::Board(Position::new(0, 0)))
        );
        assert_eq!(
            layout.hit_test(389.0, 200.0),
            Some(HitRegion::Board(Position::new(1, 2)))
        );
        // Just past the board edge, above the tray gap.
        assert_eq!(layout.hit_test(0.0, 395.0), None);
        // Inside the tray rectangle.
        assert_eq!(layout.hit_test(10.0, 410.0), Some(HitRegion::Tray));
        // Below the tray.
        assert_eq!(layout.hit_test(10.0, 700.0), None);
        // Left of the play area.
        assert_eq!(layout.hit_test(-1.0, 10.0), None);
    }

    #[test]
    fn cell_centers_round_trip_through_hit_test() {
        let image = ImageInfo {
            width: 640,
            height: 480,
        };
        let layout = Layout::compute(GridSize::new(4).unwrap(), image, phone());
        for position in GridSize::new(4).unwrap().positions() {
            let (x, y) = layout.cell_center(position);
            assert_eq!(layout.hit_test(x, y), Some(HitRegion::Board(position)));
        }
    }

    #[test]
    fn tray_geometry_follows_the_board() {
        let layout = Layout::compute(GridSize::new(3).unwrap(), square(1024), phone());
        let params = layout.tray_params();
        assert_eq!(params.width, 390.0);
        assert_eq!(params.height, 195.0);
        assert_eq!(params.cell_width, 78.0);
        assert_eq!(layout.tray_origin(), (0.0, 406.0));
    }
}
