// Validity filter between the raw archive rows and everything downstream
use crate::models::{PlanetRecord, RawRecord};

/// Keep the rows that have both orbital period and radius present
///
/// Stable: output order follows input order. An empty result is a valid
/// outcome, not an error.
pub fn process(raw: &[RawRecord]) -> Vec<PlanetRecord> {
    raw.iter().filter_map(PlanetRecord::from_raw).collect()
}
