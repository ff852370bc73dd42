//! Paged framebuffer with per-page dirty tracking
//!
//! The framebuffer is one flat byte array split into equal pages. Each byte is
//! a column of 8 vertical pixels inside its page. Writes go through
//! [`PageBuffer::write_region`], which validates against the [`Geometry`] and
//! widens the page's dirty column range. The redraw scheduler reads the
//! descriptors back to decide what to send.

use crate::sh1106::{Geometry, GLYPH_WIDTH};
use crate::Error;

/// Per-page bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    start: usize,
    dirty: bool,
    dirty_start_col: usize,
    dirty_end_col: usize,
}

impl PageDescriptor {
    /// Sentinel start of an empty range
    pub const NO_START: usize = usize::MAX;
    /// Sentinel end of an empty range
    pub const NO_END: usize = usize::MIN;

    fn new(start: usize) -> Self {
        PageDescriptor {
            start,
            dirty: false,
            dirty_start_col: Self::NO_START,
            dirty_end_col: Self::NO_END,
        }
    }

    /// Framebuffer offset of the first byte of this page
    pub fn page_start_offset(&self) -> usize {
        self.start
    }

    /// True if the page changed since its last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Inclusive glyph-column range modified since the last flush
    pub fn dirty_columns(&self) -> Option<(usize, usize)> {
        self.dirty.then_some((self.dirty_start_col, self.dirty_end_col))
    }

    fn mark(&mut self, first: usize, last: usize) {
        self.dirty = true;
        self.dirty_start_col = self.dirty_start_col.min(first);
        self.dirty_end_col = self.dirty_end_col.max(last);
    }

    fn clean(&mut self) {
        self.dirty = false;
        self.dirty_start_col = Self::NO_START;
        self.dirty_end_col = Self::NO_END;
    }
}

/// The framebuffer and its page descriptors
#[derive(Debug, Clone)]
pub struct PageBuffer {
    geometry: Geometry,
    bytes: Vec<u8>,
    pages: Vec<PageDescriptor>,
}

impl PageBuffer {
    /// Allocate a zeroed buffer for `geometry`, every page clean.
    ///
    /// Fails with [`Error::InvalidGeometry`] for shapes the controller cannot
    /// address.
    pub fn new(geometry: Geometry) -> Result<Self, Error> {
        geometry.validate()?;
        let pages = (0..geometry.pages)
            .map(|page| PageDescriptor::new(geometry.page_start(page)))
            .collect();
        Ok(PageBuffer {
            geometry,
            bytes: vec![0u8; geometry.len()],
            pages,
        })
    }

    /// Reset every descriptor to clean. The pixel data is left as is.
    pub fn reset_descriptors(&mut self) {
        for desc in &mut self.pages {
            desc.clean();
        }
    }

    /// The geometry this buffer was built for
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Whole framebuffer, page 0 first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes of one page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        (page < self.geometry.pages).then(|| {
            let start = self.geometry.page_start(page);
            &self.bytes[start..start + self.geometry.width]
        })
    }

    /// `len` bytes starting at glyph column `column` of `page`
    pub fn region(&self, page: usize, column: usize, len: usize) -> Result<&[u8], Error> {
        let span = self.geometry.span(page, column, len)?;
        Ok(&self.bytes[span])
    }

    /// Descriptor for one page
    pub fn descriptor(&self, page: usize) -> Option<&PageDescriptor> {
        self.pages.get(page)
    }

    /// All descriptors, in page order
    pub fn descriptors(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Indices of the pages currently dirty
    pub fn dirty_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, desc)| desc.dirty)
            .map(|(page, _)| page)
    }

    /// Copy `data` into `page` at glyph column `column` and mark it dirty.
    ///
    /// The call is all-or-nothing: on any bounds violation nothing is written
    /// and the dirty state is untouched. An empty `data` is accepted and does
    /// nothing.
    pub fn write_region(&mut self, page: usize, column: usize, data: &[u8]) -> Result<(), Error> {
        let span = self.geometry.span(page, column, data.len())?;
        if data.is_empty() {
            return Ok(());
        }

        self.bytes[span].copy_from_slice(data);

        let last = column + (data.len() - 1) / GLYPH_WIDTH;
        self.pages[page].mark(column, last);
        Ok(())
    }

    /// Set every byte to `value`. Dirty tracking is left alone: the caller is
    /// expected to follow up with a full redraw.
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// Mark the whole of `page` dirty, used when a full redraw of it failed
    pub(crate) fn mark_all(&mut self, page: usize) {
        let last = self.geometry.columns().saturating_sub(1);
        if let Some(desc) = self.pages.get_mut(page) {
            desc.mark(0, last);
        }
    }

    /// Mark `page` clean after it reached the device
    pub(crate) fn mark_clean(&mut self, page: usize) {
        if let Some(desc) = self.pages.get_mut(page) {
            desc.clean();
        }
    }
}
