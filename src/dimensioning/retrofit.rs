//! Motor replacement check: does the cable already installed for the old
//! motor still serve the new one?

use serde::{Deserialize, Serialize};

use super::cable::{select_cable, voltage_drop, CableSelection};
use super::params::InstallationParams;
use crate::catalog::MotorRating;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrofitAssessment {
    /// Power of the motor being replaced (CV)
    pub before_cv: f64,
    /// Section already installed (mm²)
    pub existing_section_mm2: f64,
    /// Power of the replacement motor (CV)
    pub after_cv: f64,
    /// Cable the replacement motor needs on a fresh installation
    pub required: CableSelection,
    /// Voltage drop the replacement would see on the existing cable (fraction)
    pub existing_voltage_drop: f64,
    /// Existing section is at least the required one
    pub section_adequate: bool,
    /// Existing cable keeps the drop within `max_voltage_drop`
    pub voltage_drop_adequate: bool,
    /// Both of the above
    pub adequate: bool,
}

pub fn assess_retrofit(
    before_cv: f64,
    existing_section_mm2: f64,
    after: &MotorRating,
    params: &InstallationParams,
) -> RetrofitAssessment {
    let required = select_cable(after.cv, after.current_in_a, params);
    let existing_voltage_drop = voltage_drop(existing_section_mm2, after.current_in_a, params);
    let section_adequate = existing_section_mm2 >= required.section_mm2;
    let voltage_drop_adequate = existing_voltage_drop <= params.max_voltage_drop;

    RetrofitAssessment {
        before_cv,
        existing_section_mm2,
        after_cv: after.cv,
        required,
        existing_voltage_drop,
        section_adequate,
        voltage_drop_adequate,
        adequate: section_adequate && voltage_drop_adequate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::by_power;

    #[test]
    fn test_upsizing_motor_needs_new_cable() {
        // 10 CV on 2.5 mm² replaced by 25 CV: 10 mm² by ampacity, 16 mm² by class
        let a = assess_retrofit(10.0, 2.5, by_power(25.0).unwrap(), &InstallationParams::default());
        assert!(!a.adequate);
        assert!(!a.section_adequate);
        assert_eq!(a.required.section_mm2, 16.0);
        assert_eq!(a.required.ampacity_section_mm2, 10.0);
        assert!(a.existing_voltage_drop > a.required.voltage_drop);
    }

    #[test]
    fn test_downsizing_keeps_existing_cable() {
        let a = assess_retrofit(50.0, 25.0, by_power(25.0).unwrap(), &InstallationParams::default());
        assert!(a.adequate);
        assert!(a.voltage_drop_adequate);
        assert_eq!(a.before_cv, 50.0);
        assert_eq!(a.after_cv, 25.0);
    }

    #[test]
    fn test_excess_drop_on_existing_cable_is_inadequate() {
        // Past the end of the table the required cable clamps to 150 mm², so the
        // section matches but the drop on it is still far over the limit
        let params = InstallationParams::default().with_run_length(5_000.0);
        let a = assess_retrofit(75.0, 150.0, by_power(75.0).unwrap(), &params);
        assert!(a.required.clamped);
        assert!(a.section_adequate);
        assert!(a.existing_voltage_drop > params.max_voltage_drop);
        assert!(!a.voltage_drop_adequate);
        assert!(!a.adequate);
    }
}
