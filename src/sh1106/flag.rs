use crate::sh1106::cmd::Cmd;

/// Parameter values and the power-up sequence for the SH1106 controller.
///
/// Values follow the Adafruit SH110x 128x64 setup; every parameter is
/// documented inline.
pub struct Flag;

#[allow(missing_docs)]
impl Flag {
    // Set Display Clock Divide Ratio (0xD5)
    pub const CLOCK_DIV_DEFAULT: u8 = 0x80; // Fosc default, divide ratio 1

    // Set Multiplex Ratio (0xA8)
    pub const MULTIPLEX_64: u8 = 0x3F; // 64 COM lines

    // Set Display Offset (0xD3)
    pub const DISPLAY_OFFSET_NONE: u8 = 0x00;

    // DC-DC Control (0xAD)
    pub const DC_DC_ON: u8 = 0x8B; // Built-in DC-DC on during display on
    pub const DC_DC_OFF: u8 = 0x8A;

    // Segment remap (0xA0 | bit)
    pub const SEG_REMAP_REVERSED: u8 = 0x01; // Column 131 mapped to SEG0

    // Common pads hardware configuration (0xDA)
    pub const COM_PINS_ALTERNATIVE: u8 = 0x12;

    // Contrast (0x81)
    pub const CONTRAST_MAX: u8 = 0xFF;

    // Pre-charge period (0xD9)
    pub const PRECHARGE_DEFAULT: u8 = 0x1F; // Discharge 1 DCLK, precharge 15 DCLKs

    // VCOM deselect level (0xDB)
    pub const VCOM_DETECT_DEFAULT: u8 = 0x40;

    // Pump voltage (0x30 | level)
    pub const PUMP_VOLTAGE_9V: u8 = 0x03;

    // Memory mode (0x20)
    pub const MEMORY_MODE_PAGE: u8 = 0x10;

    /// Commands sent in order after reset, before `DISPLAY_ON`
    pub const INIT_SEQUENCE: [u8; 25] = [
        Cmd::DISPLAY_OFF,
        Cmd::SET_DISPLAY_CLOCK_DIV,
        Self::CLOCK_DIV_DEFAULT,
        Cmd::SET_MULTIPLEX,
        Self::MULTIPLEX_64,
        Cmd::SET_DISPLAY_OFFSET,
        Self::DISPLAY_OFFSET_NONE,
        Cmd::SET_START_LINE,
        Cmd::DC_DC_CONTROL,
        Self::DC_DC_ON,
        Cmd::SEG_REMAP | Self::SEG_REMAP_REVERSED,
        Cmd::COM_SCAN_DEC,
        Cmd::SET_COM_PINS,
        Self::COM_PINS_ALTERNATIVE,
        Cmd::SET_CONTRAST,
        Self::CONTRAST_MAX,
        Cmd::SET_PRECHARGE,
        Self::PRECHARGE_DEFAULT,
        Cmd::SET_VCOM_DETECT,
        Self::VCOM_DETECT_DEFAULT,
        Cmd::SET_PUMP_VOLTAGE | Self::PUMP_VOLTAGE_9V,
        Cmd::NORMAL_DISPLAY,
        Cmd::MEMORY_MODE,
        Self::MEMORY_MODE_PAGE,
        Cmd::DISPLAY_ALL_ON_RESUME,
    ];
}
