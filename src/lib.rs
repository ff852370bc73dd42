//! Paged framebuffer driver for SH1106 128x64 OLED panels over 4-wire SPI.
//!
//! The driver keeps a 1 KiB framebuffer split into 8 pages, remembers which
//! pages (and which glyph columns inside them) changed, and on
//! [`Sh1106::flush`] sends only those pages to the panel.
//!
//! Pages are numbered from 0. Columns passed to the write functions are in
//! glyph units of 8 bytes, so a page has 16 of them.
#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod glyph;
pub mod redraw;
pub mod sh1106;
pub mod transport;

pub use crate::buffer::{PageBuffer, PageDescriptor};
pub use crate::config::{Config, FlushMode};
pub use crate::error::Error;
pub use display_interface::DisplayError;
pub use crate::glyph::{BuiltinFont, Glyph, GlyphLookup};
pub use crate::redraw::FlushReport;
pub use crate::sh1106::cmd::Cmd;
pub use crate::sh1106::driver::{SessionState, Sh1106};
pub use crate::sh1106::flag::Flag;
pub use crate::sh1106::interface::DisplayInterface;
pub use crate::sh1106::pins::{PinAssignment, Pins};
pub use crate::sh1106::Geometry;
pub use crate::transport::{BusError, Frame, RecordingTransport, Transport};
