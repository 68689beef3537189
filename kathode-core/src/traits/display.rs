//! Digit display trait

/// Two-tube digit write path.
///
/// Implementations must be callable at the animation sub-cycle rate
/// (every ~15 ms) without perceptible delay. The written pair stays lit
/// until the next write.
pub trait DigitDisplay {
    type Error;

    /// Latch a digit pair onto the tubes. Both digits are 0-9.
    fn write(&mut self, tens: u8, ones: u8) -> Result<(), Self::Error>;
}
