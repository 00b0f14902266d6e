//! Leads-off fault detection
//!
//! ECG front ends such as the AD8232 drive two comparator outputs, LO+ and
//! LO-, high when the matching electrode loses skin contact. The detector
//! samples both once per cycle. There is no debounce or hysteresis: the
//! result always reflects the pins at the moment of sampling.

use leadlink_hal::InputPin;

use crate::state::LeadPlacement;

/// Samples the two leads-off comparator outputs
pub struct LeadFaultDetector<P, N> {
    /// LO+ comparator output
    lo_plus: P,
    /// LO- comparator output
    lo_minus: N,
}

impl<P: InputPin, N: InputPin> LeadFaultDetector<P, N> {
    pub fn new(lo_plus: P, lo_minus: N) -> Self {
        Self { lo_plus, lo_minus }
    }

    /// Read both pins and derive the placement
    pub fn sample(&mut self) -> LeadPlacement {
        // Both pins are read every time, no short-circuit
        let lo_plus = self.lo_plus.is_high();
        let lo_minus = self.lo_minus.is_high();
        LeadPlacement::from_leads_off(lo_plus, lo_minus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SharedPin;
    use leadlink_hal::gpio::FixedLevel;

    #[test]
    fn test_pin_combinations() {
        let cases = [
            (false, false, LeadPlacement::Ok),
            (true, false, LeadPlacement::Fault),
            (false, true, LeadPlacement::Fault),
            (true, true, LeadPlacement::Fault),
        ];

        for (plus, minus, expected) in cases {
            let mut detector = LeadFaultDetector::new(FixedLevel(plus), FixedLevel(minus));
            assert_eq!(detector.sample(), expected);
        }
    }

    #[test]
    fn test_follows_live_pins() {
        let plus = SharedPin::new(false);
        let minus = SharedPin::new(false);
        let mut detector = LeadFaultDetector::new(plus.clone(), minus.clone());

        assert_eq!(detector.sample(), LeadPlacement::Ok);

        minus.set(true);
        assert_eq!(detector.sample(), LeadPlacement::Fault);

        minus.set(false);
        assert_eq!(detector.sample(), LeadPlacement::Ok);
    }
}
