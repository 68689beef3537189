//! DS3231 battery-backed real-time clock (I2C)
//!
//! The DS3231 keeps seven BCD time registers starting at 0x00. Reads are a
//! single register-pointer write followed by a 7-byte burst; `adjust` is a
//! full overwrite of the same block. Years are stored as an offset from
//! 2000.

use embedded_hal::i2c::I2c;

use kathode_core::clock::ClockTime;
use kathode_core::traits::WallClock;

pub const DS3231_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds3231Error<E> {
    Bus(E),
    /// A register read returned a value no valid time can produce.
    InvalidTime,
}

impl<E> From<E> for Ds3231Error<E> {
    fn from(err: E) -> Self {
        Ds3231Error::Bus(err)
    }
}

pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Check the chip answers on the bus. Called once at startup; a failure
    /// here is the clock-peripheral-missing condition.
    pub fn probe(&mut self) -> Result<(), Ds3231Error<I2C::Error>> {
        let mut status = [0u8];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_STATUS], &mut status)?;
        Ok(())
    }

    fn read_registers(&mut self) -> Result<[u8; 7], Ds3231Error<I2C::Error>> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_SECONDS], &mut regs)?;
        Ok(regs)
    }
}

impl<I2C: I2c> WallClock for Ds3231<I2C> {
    type Error = Ds3231Error<I2C::Error>;

    fn now(&mut self) -> Result<ClockTime, Self::Error> {
        let regs = self.read_registers()?;
        let second = from_bcd(regs[0] & 0x7F);
        let minute = from_bcd(regs[1] & 0x7F);
        // 24-hour mode assumed; bit 6 selects 12-hour mode, which this
        // driver never writes.
        let hour = from_bcd(regs[2] & 0x3F);
        let day = from_bcd(regs[4] & 0x3F);
        let month = from_bcd(regs[5] & 0x1F);
        let year = 2000 + from_bcd(regs[6]) as u16;

        if second > 59 || minute > 59 || hour > 23 || day == 0 || day > 31 || month == 0 || month > 12 {
            return Err(Ds3231Error::InvalidTime);
        }
        Ok(ClockTime::new(year, month, day, hour, minute, second))
    }

    fn adjust(&mut self, time: ClockTime) -> Result<(), Self::Error> {
        let buf = [
            REG_SECONDS,
            to_bcd(time.second),
            to_bcd(time.minute),
            to_bcd(time.hour),
            // Day of week, unused by this clock.
            1,
            to_bcd(time.day),
            to_bcd(time.month),
            to_bcd((time.year % 100) as u8),
        ];
        self.i2c.write(DS3231_ADDR, &buf)?;
        Ok(())
    }
}

fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, Operation};

    /// Replays a fixed register block and records writes.
    struct MockBus {
        regs: [u8; 7],
        written: heapless::Vec<u8, 16>,
    }

    impl MockBus {
        fn with_regs(regs: [u8; 7]) -> Self {
            Self {
                regs,
                written: heapless::Vec::new(),
            }
        }
    }

    impl ErrorType for MockBus {
        type Error = Infallible;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            assert_eq!(address, DS3231_ADDR);
            let mut pointer = 0usize;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        let _ = self.written.extend_from_slice(bytes);
                        if let Some(&reg) = bytes.first() {
                            pointer = reg as usize;
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, out) in buf.iter_mut().enumerate() {
                            *out = self.regs.get(pointer + i).copied().unwrap_or(0);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn now_decodes_bcd_registers() {
        // 14:07:30 on 2024-06-01, day-of-week byte arbitrary.
        let bus = MockBus::with_regs([0x30, 0x07, 0x14, 0x06, 0x01, 0x06, 0x24]);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(
            rtc.now().unwrap(),
            ClockTime::new(2024, 6, 1, 14, 7, 30)
        );
        // The read starts at the seconds register.
        assert_eq!(rtc.i2c.written.as_slice(), &[REG_SECONDS]);
    }

    #[test]
    fn adjust_writes_the_full_block_in_bcd() {
        let bus = MockBus::with_regs([0; 7]);
        let mut rtc = Ds3231::new(bus);
        rtc.adjust(ClockTime::new(2024, 12, 31, 23, 59, 45)).unwrap();
        assert_eq!(
            rtc.i2c.written.as_slice(),
            &[REG_SECONDS, 0x45, 0x59, 0x23, 1, 0x31, 0x12, 0x24]
        );
    }

    #[test]
    fn garbage_registers_surface_as_invalid_time() {
        // 0x7A is not a valid BCD seconds value.
        let bus = MockBus::with_regs([0x7A, 0x00, 0x00, 0x01, 0x01, 0x01, 0x24]);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.now(), Err(Ds3231Error::InvalidTime));
    }

    #[test]
    fn probe_reads_the_status_register() {
        let bus = MockBus::with_regs([0; 7]);
        let mut rtc = Ds3231::new(bus);
        rtc.probe().unwrap();
        assert_eq!(rtc.i2c.written.as_slice(), &[REG_STATUS]);
    }
}
