use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::ceil_to_step;

/// Multiplier on In for the contactor's AC-3 rated current
pub const CONTACTOR_MARGIN: f64 = 1.25;

/// Contactor family prefix
pub const CONTACTOR_FAMILY: &str = "CWM";

/// Named AC-3 ratings (A), ascending.
pub const CONTACTOR_RATINGS_A: &[u32] = &[
    9, 12, 18, 25, 32, 40, 50, 65, 80, 95, 105, 150, 180, 250, 300,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactorSelection {
    /// Model designation, e.g. `CWM18`
    pub model: String,
    /// AC-3 rated current of the model (A)
    pub rated_current_a: f64,
    /// In × margin (A)
    pub required_current_a: f64,
    /// True when the requirement exceeded the named models and the rating was
    /// rounded up to the next ten instead
    pub synthesized: bool,
}

pub fn select_contactor(current_in_a: f64, margin: f64) -> ContactorSelection {
    let required_current_a = current_in_a * margin;

    let (rating, synthesized) = match CONTACTOR_RATINGS_A
        .iter()
        .find(|&&r| f64::from(r) >= required_current_a)
    {
        Some(&r) => (f64::from(r), false),
        None => {
            let rating = ceil_to_step(required_current_a, 10.0);
            debug!(
                required_current_a,
                rating, "contactor requirement above named models, synthesizing rating"
            );
            (rating, true)
        }
    };

    ContactorSelection {
        model: format!("{CONTACTOR_FAMILY}{rating}"),
        rated_current_a: rating,
        required_current_a,
        synthesized,
    }
}
