//! Fixed 8x8 glyphs
//!
//! Each glyph is 8 column bytes, least significant bit at the top, so a glyph
//! drops straight into one page of the framebuffer.

/// One 8x8 character bitmap, column-major
pub type Glyph = [u8; 8];

/// Source of glyph bitmaps for the driver
pub trait GlyphLookup {
    /// Bitmap for `ch`, or `None` when the character is not supported
    fn glyph(&self, ch: char) -> Option<Glyph>;
}

/// The built-in font: digits, letters (case-insensitive) and space
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

impl GlyphLookup for BuiltinFont {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        let code = usize::try_from(u32::from(ch)).ok()?;
        ASCII.get(code).copied().flatten()
    }
}

/// 5x7 cell bodies, padded to 8 columns by [`pad`]
const DIGITS: [[u8; 5]; 10] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
];

const LETTERS: [[u8; 5]; 26] = [
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x1C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x26, 0x49, 0x49, 0x49, 0x32], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
];

const fn pad(body: [u8; 5]) -> Glyph {
    [0x00, body[0], body[1], body[2], body[3], body[4], 0x00, 0x00]
}

/// Every ASCII code mapped to its glyph, `None` where unsupported
static ASCII: [Option<Glyph>; 128] = build_ascii();

const fn build_ascii() -> [Option<Glyph>; 128] {
    let mut table: [Option<Glyph>; 128] = [None; 128];
    table[b' ' as usize] = Some([0x00; 8]);

    let mut i = 0;
    while i < DIGITS.len() {
        table[b'0' as usize + i] = Some(pad(DIGITS[i]));
        i += 1;
    }

    let mut i = 0;
    while i < LETTERS.len() {
        let glyph = Some(pad(LETTERS[i]));
        table[b'A' as usize + i] = glyph;
        table[b'a' as usize + i] = glyph;
        i += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_digits_letters_and_space() {
        let font = BuiltinFont;
        for ch in ('0'..='9').chain('A'..='Z').chain('a'..='z').chain([' ']) {
            assert!(font.glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        let font = BuiltinFont;
        for ch in ['!', '~', '@', '[', '`', '{', '\n', '\u{7f}', 'é', '日'] {
            assert_eq!(font.glyph(ch), None, "unexpected glyph for {ch:?}");
        }
    }

    #[test]
    fn lowercase_shares_uppercase_bitmap() {
        let font = BuiltinFont;
        assert_eq!(font.glyph('q'), font.glyph('Q'));
        assert_eq!(font.glyph('a'), font.glyph('A'));
    }

    #[test]
    fn space_is_blank_and_letters_are_not() {
        let font = BuiltinFont;
        assert_eq!(font.glyph(' '), Some([0; 8]));
        assert_eq!(
            font.glyph('A'),
            Some([0x00, 0x7E, 0x11, 0x11, 0x11, 0x7E, 0x00, 0x00])
        );
    }
}
