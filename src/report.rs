//! Report-facing views of the sizing results.
//!
//! These are the values the document editor renders: one row per motor for
//! the equipment table, the project summary, and a one-line brief that can be
//! handed to a text-generation service. Nothing here calls that service.

use serde::{Deserialize, Serialize};

use crate::catalog::MotorRating;
use crate::config::Config;
use crate::dimensioning::{dimension, summarize, DimensioningResult, ProjectSummary};
use crate::utils::round2;

/// Locked-rotor current multiple shown per motor in the equipment table
pub const STARTING_CURRENT_MULTIPLIER: f64 = 7.0;

/// One row of the per-motor equipment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub motor_cv: f64,
    pub current_in_a: f64,
    /// In × [`STARTING_CURRENT_MULTIPLIER`] (A)
    pub starting_current_a: f64,
    pub cable_mm2: f64,
    pub breaker: String,
    pub contactor: String,
    pub starting_device: Option<String>,
}

impl From<&DimensioningResult> for SummaryItem {
    fn from(result: &DimensioningResult) -> Self {
        Self {
            motor_cv: result.motor.cv,
            current_in_a: result.motor.current_in_a,
            starting_current_a: round2(result.motor.current_in_a * STARTING_CURRENT_MULTIPLIER),
            cable_mm2: result.cable.section_mm2,
            breaker: result.breaker.to_string(),
            contactor: result.contactor.model.clone(),
            starting_device: result.starting_device.as_ref().map(ToString::to_string),
        }
    }
}

/// Plain-text project brief built only from computed scalar fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBrief(pub String);

impl ProjectBrief {
    pub fn from_summary(summary: &ProjectSummary) -> Self {
        let totals = summary.display_totals();
        Self(format!(
            "Project: {} motors, total {} CV / {} kW. Main breaker: {}. Maximum starting current: {} A.",
            summary.motor_count,
            totals.total_cv,
            totals.total_kw,
            summary.main_breaker,
            totals.total_inrush_a,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub summary: ProjectSummary,
    pub items: Vec<SummaryItem>,
    pub brief: ProjectBrief,
}

impl ProjectReport {
    /// Dimension every motor and summarize the set, in input order.
    pub fn build(motors: &[MotorRating], cfg: &Config) -> Self {
        let items = motors
            .iter()
            .map(|m| SummaryItem::from(&dimension(m, &cfg.installation)))
            .collect();
        let summary = summarize(motors, &cfg.summary, &cfg.installation.starting);
        let brief = ProjectBrief::from_summary(&summary);

        Self {
            summary,
            items,
            brief,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::by_power;
    use crate::dimensioning::{summarize_default, InstallationParams};

    #[test]
    fn test_summary_item_from_result() {
        let result = dimension(by_power(50.0).unwrap(), &InstallationParams::default());
        let item = SummaryItem::from(&result);
        assert_eq!(item.motor_cv, 50.0);
        assert_eq!(item.starting_current_a, 476.21);
        assert_eq!(item.cable_mm2, 25.0);
        assert_eq!(item.breaker, "DWA 100 A");
        assert_eq!(item.contactor, "CWM95");
        assert_eq!(item.starting_device.as_deref(), Some("SSW07 85 A"));
    }

    #[test]
    fn test_direct_on_line_row_has_no_device() {
        let result = dimension(by_power(5.0).unwrap(), &InstallationParams::default());
        assert!(SummaryItem::from(&result).starting_device.is_none());
    }

    #[test]
    fn test_brief_text() {
        let motors: Vec<_> = [10.0, 25.0, 50.0]
            .iter()
            .map(|cv| by_power(*cv).unwrap().clone())
            .collect();
        let brief = ProjectBrief::from_summary(&summarize_default(&motors));
        assert_eq!(
            brief.as_str(),
            "Project: 3 motors, total 85 CV / 63 kW. Main breaker: 160 A. Maximum starting current: 525.49 A."
        );
    }

    #[test]
    fn test_brief_for_empty_project() {
        let brief = ProjectBrief::from_summary(&summarize_default(&[]));
        assert!(brief.as_str().contains("Main breaker: N/A"));
    }

    #[test]
    fn test_report_keeps_input_order() {
        let motors: Vec<_> = [50.0, 1.0, 25.0]
            .iter()
            .map(|cv| by_power(*cv).unwrap().clone())
            .collect();
        let report = ProjectReport::build(&motors, &Config::default());
        let cvs: Vec<f64> = report.items.iter().map(|i| i.motor_cv).collect();
        assert_eq!(cvs, vec![50.0, 1.0, 25.0]);
        assert_eq!(report.summary.motor_count, 3);
    }
}
