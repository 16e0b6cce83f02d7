//! Glyph to segment-pattern encoding
//!
//! Segment byte layout, active high:
//!
//! ```text
//!  bit:  7   6   5   4   3   2   1   0
//!       dp   g   f   e   d   c   b   a
//!
//!        ─a─
//!       f   b
//!        ─g─
//!       e   c
//!        ─d─  .dp
//! ```

/// Number of digit positions in the chain
pub const DIGIT_COUNT: usize = 5;

/// Decimal point bit
pub const DECIMAL_POINT: u8 = 0b1000_0000;

/// All segments off
pub const BLANK: u8 = 0b0000_0000;

/// A raw segment pattern as shifted onto the wire
pub type SegmentByte = u8;

/// Patterns for digits 0-9
const DIGITS: [u8; 10] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
];

const LETTER_H: u8 = 0b0111_0110;
const LETTER_E: u8 = 0b0111_1001;
const LETTER_L: u8 = 0b0011_1000;
// Lowercase: an uppercase R is not representable on seven segments
const LETTER_R: u8 = 0b0101_0000;
const LETTER_O: u8 = 0b0101_1100;

/// Something that can be drawn on one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Decimal digit. Values above 9 are not drawable and render blank.
    Digit(u8),
    /// All segments off, decimal point included
    Clear,
    /// `H`
    H,
    /// `E`
    E,
    /// `L`
    L,
    /// Lowercase `r`
    R,
    /// Lowercase `o`
    O,
}

impl Glyph {
    /// Map a character to a glyph
    ///
    /// Accepts `'0'..='9'`, `' '` and `'c'` for clear, and the letters
    /// `h e l r o` in either case. Anything else has no glyph.
    pub fn from_char(c: char) -> Option<Glyph> {
        match c {
            '0'..='9' => Some(Glyph::Digit(c as u8 - b'0')),
            ' ' | 'c' => Some(Glyph::Clear),
            'h' | 'H' => Some(Glyph::H),
            'e' | 'E' => Some(Glyph::E),
            'l' | 'L' => Some(Glyph::L),
            'r' | 'R' => Some(Glyph::R),
            'o' | 'O' => Some(Glyph::O),
            _ => None,
        }
    }

    /// Base pattern without decimal point, or `None` if not drawable
    fn pattern(self) -> Option<u8> {
        match self {
            Glyph::Digit(d) => DIGITS.get(d as usize).copied(),
            Glyph::Clear => None,
            Glyph::H => Some(LETTER_H),
            Glyph::E => Some(LETTER_E),
            Glyph::L => Some(LETTER_L),
            Glyph::R => Some(LETTER_R),
            Glyph::O => Some(LETTER_O),
        }
    }
}

/// Encode a glyph into a segment byte
///
/// `Clear` and undrawable glyphs always yield [`BLANK`], even when
/// `decimal_point` is set.
pub fn encode(glyph: Glyph, decimal_point: bool) -> SegmentByte {
    match glyph.pattern() {
        Some(pattern) if decimal_point => pattern | DECIMAL_POINT,
        Some(pattern) => pattern,
        None => BLANK,
    }
}

/// Encode a character, rendering unknown characters blank
pub fn encode_char(c: char, decimal_point: bool) -> SegmentByte {
    Glyph::from_char(c).map_or(BLANK, |g| encode(g, decimal_point))
}

/// Encode a full row of glyphs without decimal points
pub fn encode_row(glyphs: &[Glyph; DIGIT_COUNT]) -> [SegmentByte; DIGIT_COUNT] {
    glyphs.map(|g| encode(g, false))
}
