//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::transport::{BusError, Transport};

const RESET_DELAY_MS: u32 = 10;

/// The 4-wire SPI connection to an SH1106.
///
/// Chip select is owned by the [`SpiDevice`]; this type drives the
/// data/command and reset lines.
pub struct DisplayInterface<SPI, DC, RST> {
    /// SPI device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST> {
    /// Create the interface. Nothing is sent until the driver initializes it.
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        DisplayInterface { spi, dc, rst }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        let written = self.spi.write(data);
        // back to command mode whatever happened on the bus
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        written.map_err(|e| {
            log::error!("SPI write error for {} data bytes: {:?}", data.len(), e);
            DisplayError::BusWriteError
        })
    }

    /// Pulse reset low, then let the controller come back up
    pub(crate) fn pulse_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}

impl<SPI, DC, RST> Transport for DisplayInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn send_command(&mut self, command: u8) -> Result<(), BusError> {
        self.cmd(command).map_err(BusError::from)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.data(data).map_err(BusError::from)
    }

    fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), BusError> {
        self.pulse_reset(delay).map_err(BusError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    /// One `spi.write(&data)` through `SpiDevice` is start + write + end
    fn spi_device_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(data.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn command_sets_dc_low() {
        let mut spi = SpiMock::new(&spi_device_write(&[0xAF]));
        let mut dc = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut rst = PinMock::new(&[]);

        let mut iface = DisplayInterface::new(spi.clone(), dc.clone(), rst.clone());
        iface.send_command(0xAF).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn data_is_framed_high_then_restored_low() {
        let mut spi = SpiMock::new(&spi_device_write(&[1, 2, 3]));
        let mut dc = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut rst = PinMock::new(&[]);

        let mut iface = DisplayInterface::new(spi.clone(), dc.clone(), rst.clone());
        iface.send_data(&[1, 2, 3]).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn reset_pulses_low_then_high() {
        let mut spi = SpiMock::new(&[]);
        let mut dc = PinMock::new(&[]);
        let mut rst = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut iface = DisplayInterface::new(spi.clone(), dc.clone(), rst.clone());
        iface.reset(&mut NoopDelay).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn dc_pin_failure_is_a_data_command_error() {
        let mut spi = SpiMock::new(&[]);
        let mut dc = PinMock::new(&[PinTransaction::set(PinState::Low)
            .with_error(MockError::Io(ErrorKind::NotConnected))]);
        let mut rst = PinMock::new(&[]);

        let mut iface = DisplayInterface::new(spi.clone(), dc.clone(), rst.clone());
        assert_eq!(iface.send_command(0xAE), Err(BusError::DataCommand));

        spi.done();
        dc.done();
        rst.done();
    }
}
