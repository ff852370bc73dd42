//! Error type shared by the buffer, scheduler and driver

use crate::sh1106::driver::SessionState;
use crate::transport::BusError;

/// Everything that can go wrong talking to the panel or its buffer.
///
/// Argument errors never touch the framebuffer: the call is rejected before
/// anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operation needing a set-up bus ran before (or twice during) setup
    #[error("operation not allowed in session state {state:?}")]
    InitOrder {
        /// State the session was in when the call was made
        state: SessionState,
    },

    /// Geometry the controller cannot address
    #[error("unsupported geometry: {pages} pages of {width} columns")]
    InvalidGeometry {
        /// Requested page count
        pages: usize,
        /// Requested page width
        width: usize,
    },

    /// Page index outside the configured page count
    #[error("page {page} out of range (display has {pages} pages)")]
    InvalidPage {
        /// Requested page
        page: usize,
        /// Configured page count
        pages: usize,
    },

    /// Glyph column outside the page
    #[error("column {column} out of range (page has {columns} glyph columns)")]
    InvalidColumn {
        /// Requested glyph column
        column: usize,
        /// Glyph columns per page
        columns: usize,
    },

    /// Write does not fit in the rest of the page
    #[error("{len} bytes at column {column} overflow the page ({capacity} bytes left)")]
    RegionOverflow {
        /// Starting glyph column
        column: usize,
        /// Requested length in bytes
        len: usize,
        /// Bytes available from `column` to the end of the page
        capacity: usize,
    },

    /// Text byte budget larger than a page, or text longer than the columns left
    #[error("text needs {needed} bytes but only {available} are available")]
    TextBudget {
        /// Bytes the call asked for
        needed: usize,
        /// Bytes that fit
        available: usize,
    },

    /// No glyph for this character
    #[error("no glyph for character {0:?}")]
    Lookup(char),

    /// The bus rejected a transfer
    #[error("transport failure: {0:?}")]
    Transport(BusError),
}

impl Error {
    /// True for the argument-validation family of errors
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidGeometry { .. }
                | Error::InvalidPage { .. }
                | Error::InvalidColumn { .. }
                | Error::RegionOverflow { .. }
                | Error::TextBudget { .. }
        )
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Transport(e)
    }
}
