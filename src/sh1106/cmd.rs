/// SH1106 command bytes (sent with DC low)
pub struct Cmd;

#[allow(missing_docs)]
impl Cmd {
    // Power / display
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const INVERT_DISPLAY: u8 = 0xA7;

    // Init
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const DC_DC_CONTROL: u8 = 0xAD;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_PUMP_VOLTAGE: u8 = 0x30;
    pub const MEMORY_MODE: u8 = 0x20;

    // Addressing
    pub const PAGE_ADDRESS: u8 = 0xB0;
    pub const LOW_COLUMN: u8 = 0x00;
    pub const HIGH_COLUMN: u8 = 0x10;

    /// Page-select command for `page` (0-based)
    pub const fn page_address(page: u8) -> u8 {
        Self::PAGE_ADDRESS | (page & 0x0F)
    }

    /// True for the commands whose next byte is a parameter, not a command
    pub const fn takes_parameter(command: u8) -> bool {
        matches!(
            command,
            Self::SET_DISPLAY_CLOCK_DIV
                | Self::SET_MULTIPLEX
                | Self::SET_DISPLAY_OFFSET
                | Self::DC_DC_CONTROL
                | Self::SET_COM_PINS
                | Self::SET_CONTRAST
                | Self::SET_PRECHARGE
                | Self::SET_VCOM_DETECT
                | Self::MEMORY_MODE
        )
    }

    /// The two column-address commands for logical column `col`, high nibble
    /// first. `bias` is added before the split.
    pub const fn column_address(col: u8, bias: u8) -> [u8; 2] {
        let col = col.wrapping_add(bias);
        [Self::HIGH_COLUMN | (col >> 4), Self::LOW_COLUMN | (col & 0x0F)]
    }
}

/*
Adafruit SH110x code had these:
0xB0 - Page address (0xB0 + page)
0x10 - Higher column address (0x10 | col >> 4)
0x00 - Lower column address (col & 0x0F)
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_address_adds_index_to_base() {
        assert_eq!(Cmd::page_address(0), 0xB0);
        assert_eq!(Cmd::page_address(3), 0xB3);
        assert_eq!(Cmd::page_address(7), 0xB7);
    }

    #[test]
    fn column_address_is_biased_then_split() {
        assert_eq!(Cmd::column_address(0, 2), [0x10, 0x02]);
        assert_eq!(Cmd::column_address(16, 2), [0x11, 0x02]);
        assert_eq!(Cmd::column_address(126, 2), [0x18, 0x00]);
        assert_eq!(Cmd::column_address(127, 0), [0x17, 0x0F]);
    }

    #[test]
    fn two_byte_commands_are_flagged() {
        assert!(Cmd::takes_parameter(Cmd::SET_CONTRAST));
        assert!(Cmd::takes_parameter(Cmd::SET_MULTIPLEX));
        assert!(!Cmd::takes_parameter(Cmd::DISPLAY_ON));
        assert!(!Cmd::takes_parameter(Cmd::page_address(2)));
        assert!(!Cmd::takes_parameter(Cmd::SET_PUMP_VOLTAGE | 0x03));
    }
}
