//! Starting-method recommendation.
//!
//! Which motors get a reduced-current starting device, and which kind, is an
//! engineering policy rather than a fixed rule, so both live in
//! [`StartingPolicy`] and come from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};
use tracing::debug;
use validator::Validate;

use crate::catalog::MotorRating;

/// Smallest motor (CV, inclusive) that gets a starting device by default
pub const DEFAULT_STARTING_THRESHOLD_CV: f64 = 10.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StartingDeviceKind {
    SoftStarter,
    VariableFrequencyDrive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StartingPolicy {
    /// Motors at or above this power (CV) get a starting device
    #[validate(range(min = 0.0))]
    pub threshold_cv: f64,

    /// Device recommended above the threshold
    pub device: StartingDeviceKind,
}

impl Default for StartingPolicy {
    fn default() -> Self {
        Self {
            threshold_cv: DEFAULT_STARTING_THRESHOLD_CV,
            device: StartingDeviceKind::SoftStarter,
        }
    }
}

impl StartingPolicy {
    /// Whether a motor of `cv` gets a starting device (direct-on-line otherwise).
    pub fn requires_device(&self, cv: f64) -> bool {
        cv >= self.threshold_cv
    }
}

/// A device model and its rated current (A).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceModel {
    pub family: &'static str,
    pub rated_current_a: f64,
}

const fn model(family: &'static str, rated_current_a: f64) -> DeviceModel {
    DeviceModel {
        family,
        rated_current_a,
    }
}

/// Soft-starters, ascending by rated current.
pub const SOFT_STARTER_MODELS: &[DeviceModel] = &[
    model("SSW07", 17.0),
    model("SSW07", 24.0),
    model("SSW07", 30.0),
    model("SSW07", 45.0),
    model("SSW07", 61.0),
    model("SSW07", 85.0),
    model("SSW07", 130.0),
    model("SSW07", 171.0),
    model("SSW07", 200.0),
    model("SSW07", 255.0),
    model("SSW07", 312.0),
    model("SSW07", 365.0),
    model("SSW07", 412.0),
];

/// Variable-frequency drives, ascending by rated current.
pub const VFD_MODELS: &[DeviceModel] = &[
    model("CFW500", 2.6),
    model("CFW500", 4.3),
    model("CFW500", 6.1),
    model("CFW500", 10.0),
    model("CFW500", 14.0),
    model("CFW500", 16.0),
    model("CFW500", 24.0),
    model("CFW500", 31.0),
    model("CFW500", 39.0),
    model("CFW500", 49.0),
    model("CFW500", 61.0),
    model("CFW500", 73.0),
    model("CFW500", 88.0),
    model("CFW11", 105.0),
    model("CFW11", 142.0),
    model("CFW11", 180.0),
    model("CFW11", 211.0),
    model("CFW11", 242.0),
    model("CFW11", 312.0),
    model("CFW11", 370.0),
    model("CFW11", 477.0),
    model("CFW11", 515.0),
    model("CFW11", 601.0),
];

impl StartingDeviceKind {
    pub fn models(&self) -> &'static [DeviceModel] {
        match self {
            StartingDeviceKind::SoftStarter => SOFT_STARTER_MODELS,
            StartingDeviceKind::VariableFrequencyDrive => VFD_MODELS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingDevice {
    pub kind: StartingDeviceKind,
    pub family: String,
    /// Rated current of the selected model (A)
    pub rated_current_a: f64,
    /// True when In exceeded the largest model and that model was taken
    pub clamped: bool,
}

impl fmt::Display for StartingDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} A", self.family, self.rated_current_a)
    }
}

/// Device for `motor` under `policy`, or `None` when direct-on-line is adequate.
pub fn recommend(motor: &MotorRating, policy: &StartingPolicy) -> Option<StartingDevice> {
    if !policy.requires_device(motor.cv) {
        return None;
    }

    let models = policy.device.models();
    let (chosen, clamped) = match models
        .iter()
        .find(|m| m.rated_current_a >= motor.current_in_a)
    {
        Some(m) => (*m, false),
        None => {
            let last = models[models.len() - 1];
            debug!(
                cv = motor.cv,
                current_in_a = motor.current_in_a,
                device = %policy.device,
                "motor current exceeds largest starting device, using largest model"
            );
            (last, true)
        }
    };

    Some(StartingDevice {
        kind: policy.device,
        family: chosen.family.to_string(),
        rated_current_a: chosen.rated_current_a,
        clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::by_power;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_model_lists_ascending() {
        for kind in StartingDeviceKind::iter() {
            for pair in kind.models().windows(2) {
                assert!(pair[0].rated_current_a < pair[1].rated_current_a);
            }
        }
    }

    #[rstest]
    #[case(10.0, true)]
    #[case(7.5, false)]
    #[case(12.5, true)]
    #[case(1.0, false)]
    fn test_default_threshold_boundary(#[case] cv: f64, #[case] expected: bool) {
        let motor = by_power(cv).unwrap();
        let device = recommend(motor, &StartingPolicy::default());
        assert_eq!(device.is_some(), expected, "{cv} CV");
    }

    #[rstest]
    #[case(10.0, 17.0)]
    #[case(25.0, 45.0)]
    #[case(50.0, 85.0)]
    #[case(75.0, 130.0)]
    #[case(250.0, 365.0)]
    fn test_soft_starter_bracket(#[case] cv: f64, #[case] rated: f64) {
        let device = recommend(by_power(cv).unwrap(), &StartingPolicy::default()).unwrap();
        assert_eq!(device.kind, StartingDeviceKind::SoftStarter);
        assert_eq!(device.family, "SSW07");
        assert_eq!(device.rated_current_a, rated);
        assert!(!device.clamped);
    }

    #[test]
    fn test_vfd_policy() {
        let policy = StartingPolicy {
            threshold_cv: 1.0,
            device: StartingDeviceKind::VariableFrequencyDrive,
        };
        let device = recommend(by_power(10.0).unwrap(), &policy).unwrap();
        assert_eq!(device.to_string(), "CFW500 16 A");

        let large = recommend(by_power(100.0).unwrap(), &policy).unwrap();
        assert_eq!(large.family, "CFW11");
        assert_eq!(large.rated_current_a, 142.0);
    }

    #[test]
    fn test_oversized_motor_clamps_to_largest_model() {
        let motor = by_power(250.0).unwrap().clone().with_current(500.0);
        let device = recommend(&motor, &StartingPolicy::default()).unwrap();
        assert_eq!(device.rated_current_a, 412.0);
        assert!(device.clamped);
    }

    #[test]
    fn test_device_kind_parses_from_config_string() {
        assert_eq!(
            "variable_frequency_drive".parse::<StartingDeviceKind>().unwrap(),
            StartingDeviceKind::VariableFrequencyDrive
        );
    }
}
