//! Vital-sign readings and threshold flags.

use crate::constants::{
    DIASTOLIC_HIGH, DIASTOLIC_LOW, DIASTOLIC_RANGE, PULSE_HIGH, PULSE_LOW, PULSE_RANGE,
    SYSTOLIC_HIGH, SYSTOLIC_LOW, SYSTOLIC_RANGE,
};
use crate::error::VitalsError;
use crate::validation::validate_in_range;
use serde::Serialize;

/// A validated set of vital signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VitalsReading {
    pulse: i32,
    systolic: i32,
    diastolic: i32,
}

impl VitalsReading {
    /// Creates a reading after checking every value against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns a `VitalsError` if:
    /// - any value is outside its accepted range,
    /// - diastolic pressure is not strictly below systolic pressure.
    pub fn new(pulse: i32, systolic: i32, diastolic: i32) -> Result<Self, VitalsError> {
        validate_in_range("pulse", pulse, PULSE_RANGE)?;
        validate_in_range("systolicBP", systolic, SYSTOLIC_RANGE)?;
        validate_in_range("diastolicBP", diastolic, DIASTOLIC_RANGE)?;

        if diastolic >= systolic {
            return Err(VitalsError::DiastolicNotBelowSystolic);
        }

        Ok(Self {
            pulse,
            systolic,
            diastolic,
        })
    }

    pub fn pulse(&self) -> i32 {
        self.pulse
    }

    pub fn systolic(&self) -> i32 {
        self.systolic
    }

    pub fn diastolic(&self) -> i32 {
        self.diastolic
    }
}

/// Out-of-range flags derived from a [`VitalsReading`].
///
/// `any_flag` is always the OR of the other three; the fields are private so that it cannot be
/// set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VitalsFlags {
    pulse_flag: bool,
    systolic_flag: bool,
    diastolic_flag: bool,
    any_flag: bool,
}

impl VitalsFlags {
    pub fn new(pulse_flag: bool, systolic_flag: bool, diastolic_flag: bool) -> Self {
        Self {
            pulse_flag,
            systolic_flag,
            diastolic_flag,
            any_flag: pulse_flag || systolic_flag || diastolic_flag,
        }
    }

    pub fn pulse_flag(&self) -> bool {
        self.pulse_flag
    }

    pub fn systolic_flag(&self) -> bool {
        self.systolic_flag
    }

    pub fn diastolic_flag(&self) -> bool {
        self.diastolic_flag
    }

    pub fn any_flag(&self) -> bool {
        self.any_flag
    }
}

/// Flags each vital sign that falls outside its normal range.
pub fn evaluate_vitals(reading: &VitalsReading) -> VitalsFlags {
    VitalsFlags::new(
        reading.pulse < PULSE_LOW || reading.pulse > PULSE_HIGH,
        reading.systolic < SYSTOLIC_LOW || reading.systolic > SYSTOLIC_HIGH,
        reading.diastolic < DIASTOLIC_LOW || reading.diastolic > DIASTOLIC_HIGH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pulse: i32, systolic: i32, diastolic: i32) -> VitalsFlags {
        evaluate_vitals(&VitalsReading::new(pulse, systolic, diastolic).unwrap())
    }

    #[test]
    fn pulse_boundaries() {
        assert!(!flags(60, 120, 80).pulse_flag());
        assert!(flags(59, 120, 80).pulse_flag());
        assert!(!flags(100, 120, 80).pulse_flag());
        assert!(flags(101, 120, 80).pulse_flag());
    }

    #[test]
    fn systolic_boundaries() {
        assert!(!flags(80, 160, 80).systolic_flag());
        assert!(flags(80, 161, 80).systolic_flag());
        assert!(!flags(80, 90, 70).systolic_flag());
        assert!(flags(80, 89, 70).systolic_flag());
    }

    #[test]
    fn diastolic_boundaries() {
        assert!(!flags(80, 150, 60).diastolic_flag());
        assert!(flags(80, 150, 59).diastolic_flag());
        assert!(!flags(80, 150, 100).diastolic_flag());
        assert!(flags(80, 150, 101).diastolic_flag());
    }

    #[test]
    fn normal_reading_has_no_flags() {
        assert_eq!(flags(80, 120, 80), VitalsFlags::new(false, false, false));
        assert!(!flags(80, 120, 80).any_flag());
    }

    #[test]
    fn high_pulse_and_systolic() {
        let f = flags(120, 180, 95);
        assert!(f.pulse_flag());
        assert!(f.systolic_flag());
        assert!(!f.diastolic_flag());
        assert!(f.any_flag());
    }

    #[test]
    fn any_flag_is_or_of_individual_flags_across_valid_readings() {
        for pulse in (30..=250).step_by(7) {
            for systolic in (60..=300).step_by(11) {
                for diastolic in (30..=200).step_by(9) {
                    let Ok(reading) = VitalsReading::new(pulse, systolic, diastolic) else {
                        continue;
                    };
                    let f = evaluate_vitals(&reading);
                    assert_eq!(
                        f.any_flag(),
                        f.pulse_flag() || f.systolic_flag() || f.diastolic_flag()
                    );
                }
            }
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            VitalsReading::new(29, 120, 80),
            Err(VitalsError::OutOfRange { field: "pulse", .. })
        ));
        assert!(matches!(
            VitalsReading::new(80, 301, 80),
            Err(VitalsError::OutOfRange {
                field: "systolicBP",
                ..
            })
        ));
        assert!(matches!(
            VitalsReading::new(80, 120, 201),
            Err(VitalsError::OutOfRange {
                field: "diastolicBP",
                ..
            })
        ));
    }

    #[test]
    fn rejects_diastolic_at_or_above_systolic() {
        assert_eq!(
            VitalsReading::new(80, 100, 100),
            Err(VitalsError::DiastolicNotBelowSystolic)
        );
    }
}
