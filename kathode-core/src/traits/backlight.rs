//! Tube intensity output

/// Tube intensity on a logical 0-100 scale.
///
/// 0 is dark, 100 is full brightness. Hardware encodings that invert the
/// raw drive signal keep the inversion on their side of this trait.
pub trait BrightnessOutput {
    fn set_level(&mut self, percent: u8);
}
