use crate::record::Record;

pub const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Temporal distance between two records in days
///
/// The raw timestamp difference is read as seconds. Timestamps recorded in
/// milliseconds therefore come out 1000x larger than their true span in days;
/// thresholds are converted independently (see [`crate::units::TemporalUnit`]).
///
/// A missing timestamp on either side yields a distance of 0.
pub fn temporal_days(a: &Record, b: &Record) -> f64 {
    match (a.timestamp(), b.timestamp()) {
        (Some(t1), Some(t2)) => (t1 - t2).abs() / SECONDS_PER_DAY,
        _ => 0.0,
    }
}
