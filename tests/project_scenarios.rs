//! End-to-end scenarios over the public API.

use motor_sizing::dimensioning::{
    BindingConstraint, MainBreaker, ProtectionKind, StartingDeviceKind, StartingPolicy,
};
use motor_sizing::report::ProjectReport;
use motor_sizing::{by_power, config::Config, dimension, summarize, InstallationParams, SummaryPolicy};
use rstest::rstest;

fn catalog(cvs: &[f64]) -> Vec<motor_sizing::MotorRating> {
    cvs.iter()
        .filter_map(|cv| by_power(*cv).cloned())
        .collect()
}

#[test]
fn three_motor_service_entrance() {
    let motors = catalog(&[10.0, 25.0, 50.0]);
    let s = summarize(&motors, &SummaryPolicy::default(), &StartingPolicy::default());

    assert_eq!(s.motor_count, 3);
    let groups: Vec<(f64, usize)> = s.motor_list.iter().map(|g| (g.cv, g.count)).collect();
    assert_eq!(groups, vec![(50.0, 1), (25.0, 1), (10.0, 1)]);

    let rating = s.main_breaker.rating_a().unwrap();
    assert!(rating >= s.total_in_a * 1.15);
    assert_eq!(s.main_breaker, MainBreaker::Standard { rating_a: 160.0 });
}

#[test]
fn lookup_misses_are_skipped_not_fatal() {
    let motors = catalog(&[10.0, 11.0, 25.0]);
    assert_eq!(motors.len(), 2);
    let report = ProjectReport::build(&motors, &Config::default());
    assert_eq!(report.summary.motor_count, 2);
}

#[rstest]
#[case(10.0, true)]
#[case(7.5, false)]
fn starting_threshold_boundary(#[case] cv: f64, #[case] needs_device: bool) {
    let motor = by_power(cv).unwrap();
    let r = dimension(motor, &InstallationParams::default());
    assert_eq!(r.starting_device.is_some(), needs_device);

    let s = summarize(
        std::slice::from_ref(motor),
        &SummaryPolicy::default(),
        &StartingPolicy::default(),
    );
    assert_eq!(s.starting_device_count, usize::from(needs_device));
}

#[rstest]
#[case(5.0, true)]
#[case(4.0, false)]
fn lowered_threshold_boundary(#[case] cv: f64, #[case] needs_device: bool) {
    let starting = StartingPolicy {
        threshold_cv: 5.0,
        device: StartingDeviceKind::VariableFrequencyDrive,
    };
    let params = InstallationParams::default().with_starting(starting.clone());
    let r = dimension(by_power(cv).unwrap(), &params);
    assert_eq!(r.starting_device.is_some(), needs_device);
    if let Some(device) = r.starting_device {
        assert_eq!(device.kind, StartingDeviceKind::VariableFrequencyDrive);
    }
}

#[test]
fn seventy_five_cv_at_default_run_is_ampacity_bound() {
    let r = dimension(by_power(75.0).unwrap(), &InstallationParams::default());
    assert_eq!(r.cable.section_mm2, 50.0);
    assert_eq!(r.cable.binding, BindingConstraint::Ampacity);
    assert!((r.cable.voltage_drop_min_mm2 - 15.92).abs() < 0.01);
    assert_eq!(r.protection_type, ProtectionKind::MoldedCase);
}

#[test]
fn report_serializes_structured_fields() {
    let motors = catalog(&[40.0, 50.0]);
    let report = ProjectReport::build(&motors, &Config::default());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["main_breaker"]["status"], "standard");
    assert_eq!(json["summary"]["inrush_model"], "dominant_motor");
    assert_eq!(json["items"][0]["contactor"], "CWM80");
    assert!(json["brief"].as_str().unwrap().starts_with("Project: 2 motors"));
}
