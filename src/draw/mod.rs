//! Text rendering onto the 7x53 contribution grid.

pub mod calendar;

use crate::font::{self, HEIGHT, WIDTH};

/// Rows in the grid, one per weekday starting at Sunday.
pub const ROWS: usize = HEIGHT;

/// Columns in the grid, one per week.
pub const WEEKS: usize = 53;

/// Column where the first glyph starts; column 0 is a one-column margin.
const LEFT_MARGIN: usize = 1;

/// Day labels used by [`Grid::render`].
const DAY_LABELS: [&str; ROWS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A single grid cell, addressed by week (column) and day (row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Week index, `0..WEEKS`.
    pub week: usize,
    /// Day index, `0..ROWS`, with 0 being Sunday.
    pub day: usize,
}

/// A rendered contribution grid.
///
/// Each cell holds a weight; zero is background, anything else is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[u8; WEEKS]; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self { cells: [[0; WEEKS]; ROWS] }
    }
}

impl Grid {
    /// Renders `text` left to right, one glyph column of spacing between
    /// characters.
    ///
    /// Rendering stops silently once the column cursor reaches the right
    /// edge; a glyph straddling the edge is clipped.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut grid = Self::default();
        let mut col = LEFT_MARGIN;

        for ch in text.chars() {
            if col >= WEEKS {
                break;
            }
            let glyph = font::glyph(ch);
            for x in 0..WIDTH {
                if col + x >= WEEKS {
                    break;
                }
                for y in 0..HEIGHT {
                    if glyph.is_lit(x, y) {
                        grid.cells[y][col + x] = 1;
                    }
                }
            }
            col += WIDTH + 1;
        }

        tracing::debug!(chars = text.chars().count(), lit = grid.lit_count(), "rendered text");
        grid
    }

    /// Returns the weight of the cell at `point`.
    #[must_use]
    pub fn weight(&self, point: Point) -> u8 {
        self.cells[point.day][point.week]
    }

    /// Returns `true` if the cell at `point` is part of the text.
    #[must_use]
    pub fn is_lit(&self, point: Point) -> bool {
        self.weight(point) > 0
    }

    /// Iterates over every cell in scan order: all of week 0 top to bottom,
    /// then week 1, and so on.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..WEEKS).flat_map(|week| (0..ROWS).map(move |day| Point { week, day }))
    }

    /// Foreground points in scan order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.cells().filter(|p| self.is_lit(*p)).collect()
    }

    /// Number of foreground cells.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|w| **w > 0).count()
    }

    /// Returns `true` when nothing is lit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lit_count() == 0
    }

    /// Draws the grid as text, one labelled line per weekday.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(ROWS * (4 + WEEKS * 6 + 1));
        for (day, label) in DAY_LABELS.iter().enumerate() {
            out.push_str(label);
            out.push(' ');
            for week in 0..WEEKS {
                out.push_str(if self.is_lit(Point { week, day }) { "██" } else { "░░" });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_columns(grid: &Grid) -> Vec<usize> {
        let mut cols: Vec<usize> = grid.points().iter().map(|p| p.week).collect();
        cols.dedup();
        cols
    }

    #[test]
    fn empty_text_yields_empty_grid() {
        let grid = Grid::from_text("");
        assert!(grid.is_empty());
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn hi_occupies_two_blocks_within_first_eleven_columns() {
        let grid = Grid::from_text("HI");
        assert_eq!(grid.lit_count(), 17 + 11);

        let cols = lit_columns(&grid);
        assert!(cols.iter().all(|c| (1..=11).contains(c)));
        assert!(!cols.contains(&0), "left margin must stay empty");
        assert!(!cols.contains(&6), "spacing column must stay empty");

        // H's left stroke fills column 1 top to bottom.
        for day in 0..ROWS {
            assert!(grid.is_lit(Point { week: 1, day }));
        }
        // I's top bar spans columns 8..=10.
        for week in 8..=10 {
            assert!(grid.is_lit(Point { week, day: 0 }));
        }
    }

    #[test]
    fn lowercase_renders_like_uppercase() {
        assert_eq!(Grid::from_text("hi"), Grid::from_text("HI"));
    }

    #[test]
    fn long_text_is_clipped_without_error() {
        let text = "ABCDEFGHIJKLMNOP";
        let grid = Grid::from_text(text);
        assert!(grid.points().iter().all(|p| p.week < WEEKS));

        // Glyphs start at 1, 7, ..., 49; the ninth glyph (I) is clipped at 53.
        let nine = Grid::from_text("ABCDEFGHI");
        assert_eq!(grid, nine);
        assert!(nine.is_lit(Point { week: 50, day: 0 }));
    }

    #[test]
    fn points_are_in_week_then_day_order() {
        let grid = Grid::from_text("HELLO");
        let points = grid.points();
        let mut sorted = points.clone();
        sorted.sort();
        assert_eq!(points, sorted);
    }

    #[test]
    fn render_has_one_labelled_line_per_day() {
        let rendered = Grid::from_text("A").render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), ROWS);
        assert!(lines[0].starts_with("Sun "));
        assert!(lines[6].starts_with("Sat "));
        assert_eq!(lines[3].chars().filter(|c| *c == '█').count(), 10);
    }
}
