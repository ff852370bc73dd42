//! Pin definitions for the SH1106 OLED on the Raspberry Pi Pico 2 (RP2350)
//!
//! These are logical GPIO numbers. The typed embedded-hal pins handed to
//! [`super::interface::DisplayInterface`] are what actually gets driven; this
//! assignment is kept with the session so it can be logged and checked.

/// Pin configuration constants for the SH1106 display
pub struct Pins;

impl Pins {
    /// SPI TX (controller out, peripheral in)
    pub const MOSI: u8 = 19;
    /// Chip Select pin for SPI display
    pub const CS: u8 = 17;
    /// SPI Clock pin
    pub const SCK: u8 = 18;
    /// Data/Command control pin (High for data, Low for command), on the SPI RX pad
    pub const DC: u8 = 16;
    /// Reset pin for display
    pub const RST: u8 = 20;
}

/// The five logical signals the panel needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    /// Reset, active low
    pub reset: u8,
    /// Chip select, active low
    pub chip_select: u8,
    /// Data/command select
    pub data_command: u8,
    /// Bus data output
    pub mosi: u8,
    /// Bus clock
    pub clock: u8,
}

impl PinAssignment {
    /// Pico 2 default wiring
    pub const fn new() -> Self {
        PinAssignment {
            reset: Pins::RST,
            chip_select: Pins::CS,
            data_command: Pins::DC,
            mosi: Pins::MOSI,
            clock: Pins::SCK,
        }
    }

    /// First GPIO used for two different signals, if any
    pub fn conflict(&self) -> Option<u8> {
        let pins = [
            self.reset,
            self.chip_select,
            self.data_command,
            self.mosi,
            self.clock,
        ];
        pins.iter()
            .enumerate()
            .find(|&(i, &pin)| pins[i + 1..].contains(&pin))
            .map(|(_, &pin)| pin)
    }
}

impl Default for PinAssignment {
    fn default() -> Self {
        PinAssignment::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wiring_has_no_conflicts() {
        assert_eq!(PinAssignment::new().conflict(), None);
    }

    #[test]
    fn shared_pin_is_reported() {
        let pins = PinAssignment {
            clock: Pins::CS,
            ..PinAssignment::new()
        };
        assert_eq!(pins.conflict(), Some(Pins::CS));
    }
}
