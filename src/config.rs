//! Session configuration

use crate::sh1106::pins::PinAssignment;
use crate::sh1106::{Geometry, COLUMN_BIAS};

/// How much of a dirty page a flush sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Resend the whole page, starting from column 0
    #[default]
    FullPage,
    /// Send only the glyph columns between the dirty bounds
    DirtySpan,
}

/// Everything fixed at session construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Framebuffer shape
    pub geometry: Geometry,
    /// Added to every column address on the wire
    pub column_bias: u8,
    /// Flush transmission policy
    pub flush_mode: FlushMode,
    /// Logical pin wiring
    pub pins: PinAssignment,
    /// Settle time between reset and the power-up commands
    pub power_up_delay_ms: u32,
}

impl Config {
    /// SH1106 128x64 on the default Pico 2 wiring
    pub const fn new() -> Self {
        Config {
            geometry: Geometry::SH1106_128X64,
            column_bias: COLUMN_BIAS,
            flush_mode: FlushMode::FullPage,
            pins: PinAssignment::new(),
            power_up_delay_ms: 3000,
        }
    }

    /// Use a different framebuffer geometry
    pub const fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Use a different column-address bias
    pub const fn with_column_bias(mut self, column_bias: u8) -> Self {
        self.column_bias = column_bias;
        self
    }

    /// Pick the flush transmission policy
    pub const fn with_flush_mode(mut self, flush_mode: FlushMode) -> Self {
        self.flush_mode = flush_mode;
        self
    }

    /// Record a different pin wiring
    pub const fn with_pins(mut self, pins: PinAssignment) -> Self {
        self.pins = pins;
        self
    }

    /// Change the settle time before the power-up commands
    pub const fn with_power_up_delay_ms(mut self, ms: u32) -> Self {
        self.power_up_delay_ms = ms;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
