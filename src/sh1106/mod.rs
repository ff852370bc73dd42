//! SH1106 OLED Display Driver
//!
//! Used with the common 1.3" 128x64 monochrome OLED modules wired over 4-wire SPI.
//!
//! The controller exposes its RAM as 8 pages of 132 columns. The glass only shows
//! 128 of them, centred, so every column address sent to the device is biased by
//! [`COLUMN_BIAS`].
//!
//! ### Usage
//! The driver keeps its own framebuffer and tracks which pages changed. To
//! display something you:
//!
//! 1. bring up the session with [`driver::Sh1106::begin`]
//! 1. write glyphs, text or raw column bytes into the buffer
//! 1. push the changed pages out with [`driver::Sh1106::flush`]
//!
//! Filling the whole buffer ([`driver::Sh1106::fill`]) bypasses dirty tracking and
//! redraws every page straight away.

pub mod cmd;
pub mod driver;
pub mod flag;
pub mod interface;
pub mod pins;

/// Number of 8-pixel-high pages
pub const PAGES: usize = 8;

/// Display width, pixels horizontally
pub const WIDTH: usize = 128;

/// Display height, pixels vertically
pub const HEIGHT: usize = 64;

/// Total framebuffer size, one bit per pixel
pub const BYTES: usize = (HEIGHT * WIDTH) / 8;

/// Width of one fixed glyph in columns (and bytes)
pub const GLYPH_WIDTH: usize = 8;

/// Offset added to every column address before it is sent to the controller
pub const COLUMN_BIAS: u8 = 2;

/// Shape of the paged framebuffer: how many pages, and how many one-byte
/// columns each page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of pages
    pub pages: usize,
    /// Columns per page (bytes per page)
    pub width: usize,
}

impl Geometry {
    /// The 128x64 SH1106 panel
    pub const SH1106_128X64: Geometry = Geometry {
        pages: PAGES,
        width: WIDTH,
    };

    /// Create a geometry of `pages` pages, each `width` bytes wide
    pub const fn new(pages: usize, width: usize) -> Self {
        Geometry { pages, width }
    }

    /// Framebuffer length in bytes
    pub const fn len(&self) -> usize {
        self.pages * self.width
    }

    /// True for a degenerate geometry with no bytes at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of glyph-wide columns in one page
    pub const fn columns(&self) -> usize {
        self.width / GLYPH_WIDTH
    }

    /// Offset of the first byte of `page` in the framebuffer
    pub const fn page_start(&self, page: usize) -> usize {
        page * self.width
    }

    /// Check the geometry fits the controller: 1 to 8 pages, at most 128
    /// columns, and a whole number of glyphs per page.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let fits = (1..=PAGES).contains(&self.pages)
            && (GLYPH_WIDTH..=WIDTH).contains(&self.width)
            && self.width % GLYPH_WIDTH == 0;
        if fits {
            Ok(())
        } else {
            Err(crate::Error::InvalidGeometry {
                pages: self.pages,
                width: self.width,
            })
        }
    }

    /// Validate a write of `len` bytes at glyph column `column` of `page` and
    /// return the framebuffer byte range it covers.
    ///
    /// This is the only place page/column arithmetic is turned into buffer
    /// offsets.
    pub fn span(
        &self,
        page: usize,
        column: usize,
        len: usize,
    ) -> Result<core::ops::Range<usize>, crate::Error> {
        if page >= self.pages {
            return Err(crate::Error::InvalidPage {
                page,
                pages: self.pages,
            });
        }
        if column >= self.columns() {
            return Err(crate::Error::InvalidColumn {
                column,
                columns: self.columns(),
            });
        }

        let offset = column * GLYPH_WIDTH;
        let capacity = self.width - offset;
        if len > capacity {
            return Err(crate::Error::RegionOverflow {
                column,
                len,
                capacity,
            });
        }

        let start = self.page_start(page) + offset;
        Ok(start..start + len)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::SH1106_128X64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn sh1106_geometry() {
        let g = Geometry::SH1106_128X64;
        assert_eq!(g.len(), BYTES);
        assert_eq!(g.columns(), 16);
        assert_eq!(g.page_start(3), 384);
    }

    #[test]
    fn span_maps_glyph_columns_to_bytes() {
        let g = Geometry::SH1106_128X64;
        assert_eq!(g.span(0, 0, 8).unwrap(), 0..8);
        assert_eq!(g.span(2, 3, 16).unwrap(), 280..296);
        assert_eq!(g.span(7, 15, 8).unwrap(), 1016..1024);
        assert_eq!(g.span(7, 0, 128).unwrap(), 896..1024);
    }

    #[test]
    fn validate_accepts_only_addressable_shapes() {
        assert_eq!(Geometry::SH1106_128X64.validate(), Ok(()));
        assert_eq!(Geometry::new(4, 64).validate(), Ok(()));
        for (pages, width) in [(0, 128), (9, 128), (17, 128), (8, 0), (8, 132), (8, 12)] {
            assert_eq!(
                Geometry::new(pages, width).validate(),
                Err(Error::InvalidGeometry { pages, width })
            );
        }
    }

    #[test]
    fn span_rejects_out_of_range() {
        let g = Geometry::SH1106_128X64;
        assert_eq!(
            g.span(8, 0, 8),
            Err(Error::InvalidPage { page: 8, pages: 8 })
        );
        assert_eq!(
            g.span(0, 16, 0),
            Err(Error::InvalidColumn {
                column: 16,
                columns: 16
            })
        );
        assert_eq!(
            g.span(0, 15, 9),
            Err(Error::RegionOverflow {
                column: 15,
                len: 9,
                capacity: 8
            })
        );
    }
}
