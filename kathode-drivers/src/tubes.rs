//! Nixie tube digit display over SPI shift registers
//!
//! Each tube sits on a 16-bit shift register with one output per cathode.
//! A digit write shifts out both registers (tens tube first) while the
//! latch pin is held low, then raises the latch to transfer the new
//! pattern to the outputs in one step.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use kathode_core::traits::DigitDisplay;

/// Cathode select patterns, indexed by digit. Specific to the tube
/// socket wiring.
const DIGIT_CATHODES: [u16; 10] = [
    0b0000_0000_0010_0000, // 0
    0b0000_0100_0000_0000, // 1
    0b0000_0000_0100_0000, // 2
    0b1000_0000_0000_0000, // 3
    0b0000_0000_1000_0000, // 4
    0b0001_0000_0000_0000, // 5
    0b0000_0000_0001_0000, // 6
    0b0100_0000_0000_0000, // 7
    0b0000_0010_0000_0000, // 8
    0b0000_1000_0000_0000, // 9
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TubeError<S, P> {
    Spi(S),
    Latch(P),
}

/// Two nixie tubes behind daisy-chained shift registers.
pub struct NixieTubes<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
}

impl<SPI, LATCH> NixieTubes<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    pub fn new(spi: SPI, latch: LATCH) -> Self {
        Self { spi, latch }
    }

    fn latch_frame(&mut self, frame: &[u8]) -> Result<(), TubeError<SPI::Error, LATCH::Error>> {
        self.latch.set_low().map_err(TubeError::Latch)?;
        self.spi.write(frame).map_err(TubeError::Spi)?;
        self.spi.flush().map_err(TubeError::Spi)?;
        self.latch.set_high().map_err(TubeError::Latch)
    }
}

impl<SPI, LATCH> DigitDisplay for NixieTubes<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    type Error = TubeError<SPI::Error, LATCH::Error>;

    fn write(&mut self, tens: u8, ones: u8) -> Result<(), Self::Error> {
        let t = DIGIT_CATHODES[tens as usize % 10];
        let o = DIGIT_CATHODES[ones as usize % 10];
        let frame = [(t >> 8) as u8, t as u8, (o >> 8) as u8, o as u8];
        self.latch_frame(&frame)
    }
}
