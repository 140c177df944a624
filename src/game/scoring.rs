//! Scoring Policy
//!
//! Run length picks a base value; cascade depth scales the whole cycle.
//! Multipliers are kept in billionths so cycle totals floor exactly for
//! any combo step with up to nine decimal places.

use serde::{Serialize, Deserialize};

use crate::config::{ScoreValues, Settings};
use crate::game::matcher::Match;

/// Scale of the combo multiplier (`COMBO_SCALE` = 1.0x).
pub const COMBO_SCALE: u64 = 1_000_000_000;

/// Combo step in multiplier units, or `None` if it is not a whole number
/// of billionths.
pub fn combo_step_units(step: f64) -> Option<u64> {
    let scaled = step * COMBO_SCALE as f64;
    let units = scaled.round();
    if !units.is_finite() || units < 0.0 || units > u64::MAX as f64 || (scaled - units).abs() > 1e-3 {
        return None;
    }
    Some(units as u64)
}

/// Points for one run.
///
/// Length 5 and above all collapse into the `five` bucket.
pub fn score_for_match(length: usize, values: &ScoreValues) -> u32 {
    match length {
        len if len >= 5 => values.five,
        4 => values.four,
        _ => values.three,
    }
}

/// Scoring rules derived from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Base values per run length
    pub values: ScoreValues,
    /// Combo step in billionths (0.1 -> 100_000_000)
    pub combo_step_units: u64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ScoreTable {
    /// Build from (validated) settings.
    ///
    /// A step that failed validation counts as zero.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            values: settings.score_values,
            combo_step_units: combo_step_units(settings.combo_step).unwrap_or(0),
        }
    }

    /// Sum of base values for the matches of one cycle.
    pub fn base_points(&self, matches: &[Match]) -> u64 {
        matches
            .iter()
            .map(|m| score_for_match(m.len(), &self.values) as u64)
            .sum()
    }

    /// Multiplier for a cycle at `chain` depth, in billionths.
    #[inline]
    pub fn multiplier_units(&self, chain: u32) -> u64 {
        COMBO_SCALE.saturating_add(self.combo_step_units.saturating_mul(chain as u64))
    }

    /// Points for one resolution cycle.
    ///
    /// `floor(base * (1 + chain * combo_step))`, applied once to the cycle
    /// total rather than to each match.
    pub fn cycle_points(&self, matches: &[Match], chain: u32) -> u64 {
        let base = self.base_points(matches);
        let scaled = u128::from(base) * u128::from(self.multiplier_units(chain)) / u128::from(COMBO_SCALE);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}
