//! SH1106 Display Driver Implementation
//!
//! This module contains the device session: the transport, the paged
//! framebuffer and the bring-up state machine, behind one owned value.
//!
//! ## Architecture
//!
//! ### Initialization Functions
//! - `new()` - Create the session (nothing sent yet)
//! - `initialize()` - Hardware reset and page buffer setup
//! - `configure()` - Power-up command sequence and display on
//! - `begin()` - Both of the above
//!
//! ### Buffer Functions
//! - `write_region()` - Raw column bytes into one page
//! - `write_glyph()` / `insert_char()` - One character
//! - `write_text()` - A run of characters
//!
//! ### Display Update Functions
//! - `flush()` - Send the dirty pages
//! - `fill()` / `clear()` / `set_all()` - Whole-buffer fill and immediate redraw
//!
//! ## Session state
//!
//! Every buffer or bus operation needs at least [`SessionState::Initialized`].
//! Calling one earlier returns [`Error::InitOrder`] and leaves everything
//! untouched.

use embedded_hal::delay::DelayNs;

use crate::buffer::{PageBuffer, PageDescriptor};
use crate::config::Config;
use crate::glyph::{BuiltinFont, GlyphLookup};
use crate::redraw::{self, FlushReport};
use crate::sh1106::{cmd::Cmd, flag::Flag, GLYPH_WIDTH};
use crate::transport::Transport;
use crate::Error;

const DISPLAY_ON_DELAY_MS: u32 = 500;

/// Bring-up progress of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, bus not set up
    Uninitialized,
    /// Reset done, buffer ready, commands may be sent
    Initialized,
    /// Power-up sequence sent, display on
    Configured,
}

/// SH1106 OLED session
///
/// ## Type Parameters
///
/// - `T` - Transport the commands and data go through
/// - `DELAY` - Delay provider for timing
/// - `F` - Glyph source for text
pub struct Sh1106<T, DELAY, F = BuiltinFont> {
    transport: T,
    delay: DELAY,
    font: F,
    config: Config,
    buffer: PageBuffer,
    state: SessionState,
}

impl<T, DELAY> Sh1106<T, DELAY, BuiltinFont>
where
    T: Transport,
    DELAY: DelayNs,
{
    /// Create a session with the built-in font
    pub fn new(transport: T, delay: DELAY, config: Config) -> Result<Self, Error> {
        Self::with_font(transport, delay, config, BuiltinFont)
    }
}

impl<T, DELAY, F> Sh1106<T, DELAY, F>
where
    T: Transport,
    DELAY: DelayNs,
    F: GlyphLookup,
{
    /// Create a session with a custom glyph source.
    ///
    /// The geometry must fit the controller: at most 8 pages, at most 128
    /// columns, and a whole number of glyphs per page.
    pub fn with_font(transport: T, delay: DELAY, config: Config, font: F) -> Result<Self, Error> {
        let buffer = PageBuffer::new(config.geometry).inspect_err(|e| {
            log::warn!("Rejecting session: {}", e);
        })?;

        Ok(Sh1106 {
            transport,
            delay,
            font,
            config,
            buffer,
            state: SessionState::Uninitialized,
        })
    }

    /// Reset the controller and set up the page buffer.
    ///
    /// Only valid once, from [`SessionState::Uninitialized`].
    pub fn initialize(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Uninitialized {
            log::error!("Issue during initialization: state is {:?}", self.state);
            return Err(Error::InitOrder { state: self.state });
        }

        let pins = self.config.pins;
        log::info!(
            "Initializing SH1106: rst={} cs={} dc={} mosi={} clk={}",
            pins.reset,
            pins.chip_select,
            pins.data_command,
            pins.mosi,
            pins.clock
        );
        if let Some(pin) = pins.conflict() {
            log::warn!("GPIO {} is assigned to more than one signal", pin);
        }

        self.transport.reset(&mut self.delay)?;
        self.buffer.reset_descriptors();
        self.state = SessionState::Initialized;
        Ok(())
    }

    /// Send the power-up sequence and switch the display on.
    ///
    /// Requires [`SessionState::Initialized`].
    pub fn configure(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Initialized {
            log::error!("Session not initialized, not configuring");
            return Err(Error::InitOrder { state: self.state });
        }

        self.delay.delay_ms(self.config.power_up_delay_ms);
        for &command in Flag::INIT_SEQUENCE.iter() {
            self.transport.send_command(command)?;
        }
        self.transport.send_command(Cmd::DISPLAY_ON)?;
        self.delay.delay_ms(DISPLAY_ON_DELAY_MS);

        self.state = SessionState::Configured;
        log::info!("SH1106 configured, display on");
        Ok(())
    }

    /// [`Self::initialize`] then [`Self::configure`]
    pub fn begin(&mut self) -> Result<(), Error> {
        self.initialize()?;
        self.configure()
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            SessionState::Uninitialized => {
                log::error!("Session not initialized");
                Err(Error::InitOrder { state: self.state })
            }
            SessionState::Initialized | SessionState::Configured => Ok(()),
        }
    }

    /// Copy raw column bytes into `page` (0-based) starting at glyph column
    /// `column`, and mark the page dirty.
    pub fn write_region(&mut self, page: usize, column: usize, data: &[u8]) -> Result<(), Error> {
        self.ensure_ready()?;
        self.buffer
            .write_region(page, column, data)
            .inspect_err(|e| log::warn!("write_region rejected: {}", e))
    }

    /// Write the glyph for `ch` at glyph column `column` of `page`.
    pub fn write_glyph(&mut self, ch: char, page: usize, column: usize) -> Result<(), Error> {
        self.ensure_ready()?;
        let glyph = self.font.glyph(ch).ok_or(Error::Lookup(ch))?;
        self.write_region(page, column, &glyph)
    }

    /// Write `ch` at the start of `page`
    pub fn insert_char(&mut self, ch: char, page: usize) -> Result<(), Error> {
        self.write_glyph(ch, page, 0)
    }

    /// Write the characters of `text` one glyph apart, starting at glyph
    /// column `start_column` of `page`.
    ///
    /// At most `byte_budget / 8` characters are written; `byte_budget` may not
    /// exceed a page. The bounds are checked before anything is written. An
    /// unsupported character stops the call with [`Error::Lookup`], keeping
    /// the characters already written. Returns the number of glyphs written.
    pub fn write_text(
        &mut self,
        text: &str,
        page: usize,
        start_column: usize,
        byte_budget: usize,
    ) -> Result<usize, Error> {
        self.ensure_ready()?;
        let geometry = self.buffer.geometry();
        if byte_budget > geometry.width {
            return Err(Error::TextBudget {
                needed: byte_budget,
                available: geometry.width,
            });
        }

        let count = text.chars().count().min(byte_budget / GLYPH_WIDTH);
        // validates page and column even for an empty run
        geometry.span(page, start_column, count * GLYPH_WIDTH).map_err(|e| match e {
            Error::RegionOverflow { capacity, .. } => Error::TextBudget {
                needed: count * GLYPH_WIDTH,
                available: capacity,
            },
            other => other,
        })?;

        for (i, ch) in text.chars().take(count).enumerate() {
            self.write_glyph(ch, page, start_column + i)?;
        }
        Ok(count)
    }

    /// Send every dirty page to the display and mark it clean.
    ///
    /// Transport failures do not abort the flush; they are listed in the
    /// report and the failed pages stay dirty.
    pub fn flush(&mut self) -> Result<FlushReport, Error> {
        self.ensure_ready()?;
        Ok(redraw::flush(
            &mut self.buffer,
            &mut self.transport,
            self.config.column_bias,
            self.config.flush_mode,
        ))
    }

    /// Set every byte of the buffer to `value` and redraw the whole display.
    pub fn fill(&mut self, value: u8) -> Result<FlushReport, Error> {
        self.ensure_ready()?;
        log::debug!("Filling display with 0x{:02X}", value);
        self.buffer.fill(value);
        Ok(redraw::full_redraw(
            &mut self.buffer,
            &mut self.transport,
            self.config.column_bias,
        ))
    }

    /// All pixels off
    pub fn clear(&mut self) -> Result<FlushReport, Error> {
        self.fill(0x00)
    }

    /// All pixels on
    pub fn set_all(&mut self) -> Result<FlushReport, Error> {
        self.fill(0xFF)
    }

    /// Switch the panel on or off; RAM is kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        let command = if on { Cmd::DISPLAY_ON } else { Cmd::DISPLAY_OFF };
        Ok(self.transport.send_command(command)?)
    }

    /// Set the contrast (segment drive current), 0..=255
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.ensure_ready()?;
        self.transport.send_command(Cmd::SET_CONTRAST)?;
        Ok(self.transport.send_command(contrast)?)
    }

    /// Show lit pixels as dark and the other way round
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        let command = if inverted {
            Cmd::INVERT_DISPLAY
        } else {
            Cmd::NORMAL_DISPLAY
        };
        Ok(self.transport.send_command(command)?)
    }

    /// Current bring-up state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The framebuffer (read only)
    pub fn buffer(&self) -> &PageBuffer {
        &self.buffer
    }

    /// Descriptor for `page`
    pub fn page_descriptor(&self, page: usize) -> Option<&PageDescriptor> {
        self.buffer.descriptor(page)
    }

    /// The transport (read only)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport access, for transports with their own controls
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// End the session and give back the transport and delay
    pub fn release(self) -> (T, DELAY) {
        (self.transport, self.delay)
    }
}
