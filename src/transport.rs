//! Byte-level command/data sink the driver talks through
//!
//! [`crate::sh1106::interface::DisplayInterface`] is the SPI implementation.
//! [`RecordingTransport`] keeps a transcript and a model of the controller RAM,
//! for host-side tests and the demo.

use std::collections::BTreeSet;

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use crate::sh1106::cmd::Cmd;
use crate::sh1106::PAGES;

/// Why a transfer did not reach the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The bus rejected the write
    Write,
    /// The data/command line could not be driven
    DataCommand,
    /// The chip-select line could not be driven
    ChipSelect,
    /// The reset line could not be driven
    Reset,
    /// The device reported busy, nothing was sent
    Busy,
    /// Address or length outside what the device has
    OutOfBounds,
    /// Any other interface failure
    Other,
}

impl From<DisplayError> for BusError {
    fn from(e: DisplayError) -> Self {
        match e {
            DisplayError::BusWriteError => BusError::Write,
            DisplayError::DCError => BusError::DataCommand,
            DisplayError::CSError => BusError::ChipSelect,
            DisplayError::RSError => BusError::Reset,
            DisplayError::OutOfBoundsError => BusError::OutOfBounds,
            _ => BusError::Other,
        }
    }
}

/// What the driver needs from the bus.
///
/// Each call either completes or fails as a whole.
pub trait Transport {
    /// Send one command byte
    fn send_command(&mut self, command: u8) -> Result<(), BusError>;

    /// Send data bytes to the current RAM cursor
    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError>;

    /// True while the device cannot accept transfers
    fn is_busy(&mut self) -> Result<bool, BusError> {
        Ok(false)
    }

    /// Hardware reset of the device
    fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), BusError> {
        let _ = delay;
        Ok(())
    }
}

/// One transfer seen by a [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Command byte (DC low)
    Command(u8),
    /// Data transfer (DC high)
    Data(Vec<u8>),
}

/// Columns of controller RAM per page; the glass shows 128 of them
pub const RAM_COLUMNS: usize = 132;

/// In-memory transport that records every transfer and models the
/// controller's page/column addressing.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    transcript: Vec<Frame>,
    ram: Vec<[u8; RAM_COLUMNS]>,
    page: usize,
    column: usize,
    expect_parameter: bool,
    failing_pages: BTreeSet<usize>,
    busy: bool,
    resets: usize,
}

impl RecordingTransport {
    /// Empty transcript, RAM zeroed, cursor at page 0 column 0
    pub fn new() -> Self {
        RecordingTransport {
            transcript: Vec::new(),
            ram: vec![[0u8; RAM_COLUMNS]; PAGES],
            page: 0,
            column: 0,
            expect_parameter: false,
            failing_pages: BTreeSet::new(),
            busy: false,
            resets: 0,
        }
    }

    /// Every transfer so far
    pub fn transcript(&self) -> &[Frame] {
        &self.transcript
    }

    /// Forget the transcript (RAM is kept)
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Command bytes only, in order
    pub fn commands(&self) -> Vec<u8> {
        self.transcript
            .iter()
            .filter_map(|frame| match frame {
                Frame::Command(c) => Some(*c),
                Frame::Data(_) => None,
            })
            .collect()
    }

    /// Total number of data bytes sent
    pub fn data_len(&self) -> usize {
        self.transcript
            .iter()
            .map(|frame| match frame {
                Frame::Data(d) => d.len(),
                Frame::Command(_) => 0,
            })
            .sum()
    }

    /// Command bytes that are commands in their own right, parameter bytes
    /// of two-byte commands left out
    pub fn opcodes(&self) -> Vec<u8> {
        let mut expect_parameter = false;
        self.commands()
            .into_iter()
            .filter(|&c| {
                let is_opcode = !expect_parameter;
                expect_parameter = is_opcode && Cmd::takes_parameter(c);
                is_opcode
            })
            .collect()
    }

    /// Pages selected with a page-address command, in order
    pub fn selected_pages(&self) -> Vec<usize> {
        self.opcodes()
            .into_iter()
            .filter(|&c| c & 0xF0 == Cmd::PAGE_ADDRESS)
            .map(|c| usize::from(c & 0x0F))
            .collect()
    }

    /// Raw controller RAM for `page`
    pub fn ram_page(&self, page: usize) -> Option<&[u8; RAM_COLUMNS]> {
        self.ram.get(page)
    }

    /// The `width` visible columns of `page`, skipping the `bias` hidden ones
    pub fn visible_page(&self, page: usize, bias: u8, width: usize) -> Option<&[u8]> {
        let start = usize::from(bias);
        self.ram.get(page)?.get(start..start + width)
    }

    /// Make data transfers to `page` fail from now on
    pub fn fail_page(&mut self, page: usize) {
        self.failing_pages.insert(page);
    }

    /// Let transfers to every page succeed again
    pub fn heal(&mut self) {
        self.failing_pages.clear();
    }

    /// Report busy (or ready) on every subsequent poll
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// How many hardware resets were issued
    pub fn resets(&self) -> usize {
        self.resets
    }

    fn apply_command(&mut self, command: u8) {
        if self.expect_parameter {
            self.expect_parameter = false;
            return;
        }
        if Cmd::takes_parameter(command) {
            self.expect_parameter = true;
            return;
        }
        match command & 0xF0 {
            Cmd::PAGE_ADDRESS => self.page = usize::from(command & 0x0F),
            Cmd::HIGH_COLUMN => {
                self.column = (self.column & 0x0F) | (usize::from(command & 0x0F) << 4)
            }
            Cmd::LOW_COLUMN => self.column = (self.column & 0xF0) | usize::from(command & 0x0F),
            _ => {}
        }
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        RecordingTransport::new()
    }
}

impl Transport for RecordingTransport {
    fn send_command(&mut self, command: u8) -> Result<(), BusError> {
        self.transcript.push(Frame::Command(command));
        self.apply_command(command);
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        if self.failing_pages.contains(&self.page) {
            return Err(BusError::Write);
        }
        self.transcript.push(Frame::Data(data.to_vec()));

        let page = self.ram.get_mut(self.page).ok_or(BusError::OutOfBounds)?;
        for &byte in data {
            // the controller's column counter stops at the last column
            if let Some(cell) = page.get_mut(self.column) {
                *cell = byte;
            }
            self.column = (self.column + 1).min(RAM_COLUMNS - 1);
        }
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, BusError> {
        Ok(self.busy)
    }

    fn reset(&mut self, _delay: &mut impl DelayNs) -> Result<(), BusError> {
        self.resets += 1;
        self.page = 0;
        self.column = 0;
        self.expect_parameter = false;
        Ok(())
    }
}
