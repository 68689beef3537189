//! PWM tube dimmer
//!
//! The anode driver dims the tubes with an inverted PWM signal: a raw duty
//! of 0 is full brightness and full duty is dark. The inversion stays here;
//! everything above this driver deals in the logical 0-100 scale where 0
//! is dark.

use embedded_hal::pwm::SetDutyCycle;

use kathode_core::traits::BrightnessOutput;

pub struct PwmDimmer<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmDimmer<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }
}

impl<P: SetDutyCycle> BrightnessOutput for PwmDimmer<P> {
    fn set_level(&mut self, percent: u8) {
        let percent = percent.min(100) as u16;
        // Inverted drive: logical 0 is full duty (dark).
        let _ = self.pwm.set_duty_cycle_fraction(100 - percent, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct MockPwm {
        max_duty: u16,
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max_duty
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn logical_scale_is_inverted_into_raw_duty() {
        let mut dimmer = PwmDimmer::new(MockPwm {
            max_duty: 1000,
            duty: 0,
        });
        dimmer.set_level(0);
        assert_eq!(dimmer.pwm.duty, 1000);
        dimmer.set_level(100);
        assert_eq!(dimmer.pwm.duty, 0);
        dimmer.set_level(14);
        assert_eq!(dimmer.pwm.duty, 860);
    }

    #[test]
    fn overrange_input_clamps_to_full_brightness() {
        let mut dimmer = PwmDimmer::new(MockPwm {
            max_duty: 1000,
            duty: 123,
        });
        dimmer.set_level(255);
        assert_eq!(dimmer.pwm.duty, 0);
    }
}
