//! Fixed 5x7 bitmap font used to letter the contribution calendar.
//!
//! Each glyph is authored as seven rows of ASCII art (`#` lit, `.` unlit)
//! and folded into per-row bitmasks at compile time. Bit `x` of a row lights
//! column `x`, so the least-significant bit is the leftmost column.

/// Number of rows in every glyph.
pub const HEIGHT: usize = 7;

/// Number of columns in every glyph.
pub const WIDTH: usize = 5;

/// A single character bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; HEIGHT],
}

impl Glyph {
    /// The glyph with no lit cells, used for spaces and unknown characters.
    pub const BLANK: Self = Self { rows: [0; HEIGHT] };

    /// Builds a glyph from seven rows of ASCII art.
    ///
    /// Any byte other than `#` is unlit; columns past [`WIDTH`] are ignored.
    #[must_use]
    pub const fn from_art(art: [&str; HEIGHT]) -> Self {
        let mut rows = [0u8; HEIGHT];
        let mut y = 0;
        while y < HEIGHT {
            let line = art[y].as_bytes();
            let mut x = 0;
            while x < line.len() && x < WIDTH {
                if line[x] == b'#' {
                    rows[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        Self { rows }
    }

    /// Returns the bitmask for row `y`.
    #[must_use]
    pub fn row(&self, y: usize) -> u8 {
        self.rows[y]
    }

    /// Returns `true` when column `x` of row `y` is lit.
    #[must_use]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.rows[y] & (1 << x) != 0
    }

    /// Number of lit cells in the glyph.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }
}

/// Looks up the glyph for `ch`.
///
/// Lowercase ASCII letters resolve to their uppercase glyph. Characters
/// outside the alphabet resolve to [`Glyph::BLANK`].
#[must_use]
pub fn glyph(ch: char) -> Glyph {
    let ch = ch.to_ascii_uppercase();
    GLYPHS.iter().find(|(c, _)| *c == ch).map_or(Glyph::BLANK, |(_, g)| *g)
}

/// Returns `true` if `ch` has a dedicated glyph.
#[must_use]
pub fn is_supported(ch: char) -> bool {
    let ch = ch.to_ascii_uppercase();
    GLYPHS.iter().any(|(c, _)| *c == ch)
}

#[rustfmt::skip]
static GLYPHS: &[(char, Glyph)] = &[
    ('A', Glyph::from_art([".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"])),
    ('B', Glyph::from_art(["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."])),
    ('C', Glyph::from_art([".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."])),
    ('D', Glyph::from_art(["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."])),
    ('E', Glyph::from_art(["#####", "#....", "#....", "####.", "#....", "#....", "#####"])),
    ('F', Glyph::from_art(["#####", "#....", "#....", "####.", "#....", "#....", "#...."])),
    ('G', Glyph::from_art([".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"])),
    ('H', Glyph::from_art(["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"])),
    ('I', Glyph::from_art([".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."])),
    ('J', Glyph::from_art(["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."])),
    ('K', Glyph::from_art(["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"])),
    ('L', Glyph::from_art(["#....", "#....", "#....", "#....", "#....", "#....", "#####"])),
    ('M', Glyph::from_art(["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"])),
    ('N', Glyph::from_art(["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"])),
    ('O', Glyph::from_art([".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."])),
    ('P', Glyph::from_art(["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."])),
    ('Q', Glyph::from_art([".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"])),
    ('R', Glyph::from_art(["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"])),
    ('S', Glyph::from_art([".####", "#....", "#....", ".###.", "....#", "....#", "####."])),
    ('T', Glyph::from_art(["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."])),
    ('U', Glyph::from_art(["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."])),
    ('V', Glyph::from_art(["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."])),
    ('W', Glyph::from_art(["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."])),
    ('X', Glyph::from_art(["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"])),
    ('Y', Glyph::from_art(["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."])),
    ('Z', Glyph::from_art(["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"])),
    ('0', Glyph::from_art([".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."])),
    ('1', Glyph::from_art(["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."])),
    ('2', Glyph::from_art([".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"])),
    ('3', Glyph::from_art(["####.", "....#", "....#", ".###.", "....#", "....#", "####."])),
    ('4', Glyph::from_art(["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."])),
    ('5', Glyph::from_art(["#####", "#....", "####.", "....#", "....#", "#...#", ".###."])),
    ('6', Glyph::from_art(["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."])),
    ('7', Glyph::from_art(["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."])),
    ('8', Glyph::from_art([".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."])),
    ('9', Glyph::from_art([".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."])),
    (' ', Glyph::BLANK),
    ('!', Glyph::from_art(["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."])),
    ('.', Glyph::from_art([".....", ".....", ".....", ".....", ".....", ".....", "..#.."])),
    ('-', Glyph::from_art([".....", ".....", ".....", "#####", ".....", ".....", "....."])),
    ('_', Glyph::from_art([".....", ".....", ".....", ".....", ".....", ".....", "#####"])),
    (':', Glyph::from_art([".....", ".....", "..#..", ".....", "..#..", ".....", "....."])),
    ('/', Glyph::from_art(["....#", "....#", "...#.", "..#..", ".#...", "#....", "#...."])),
    ('<', Glyph::from_art(["...#.", "..#..", ".#...", "#....", ".#...", "..#..", "...#."])),
    ('>', Glyph::from_art([".#...", "..#..", "...#.", "....#", "...#.", "..#..", ".#..."])),
    ('♥', Glyph::from_art([".....", ".#.#.", "#####", "#####", ".###.", "..#..", "....."])),
];
