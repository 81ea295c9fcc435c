use chrono::{DateTime, Duration, Utc};

use crate::models::{DataCategory, Quantity, Sample, SampleValue, SeedError, Unit};

/// Spacing between consecutive synthetic heart-rate samples.
pub const HEART_RATE_SPACING_SECONDS: i64 = 1;

pub const DEFAULT_HEART_RATE_COUNT: usize = 7;
pub const DEFAULT_HEART_RATE_VALUES: [f64; 7] = [95.0, 96.0, 97.0, 95.0, 94.0, 95.0, 95.0];

/// How many heart-rate children a seeded workout gets, and which values they cycle through.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartRateBatchPolicy {
    count: usize,
    values: Vec<f64>,
}

impl HeartRateBatchPolicy {
    pub fn new(count: usize, values: Vec<f64>) -> Result<Self, SeedError> {
        if count == 0 {
            return Err(SeedError::InvalidRequest(
                "heart-rate batch needs at least one sample".to_string(),
            ));
        }
        if values.is_empty() {
            return Err(SeedError::InvalidRequest(
                "heart-rate batch needs at least one value".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(SeedError::InvalidRequest(format!(
                "heart-rate value {} must be a non-negative number",
                bad
            )));
        }
        Ok(Self { count, values })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn generate(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sample> {
        generate_heart_rate_batch(start, end, self.count, &self.values)
    }
}

impl Default for HeartRateBatchPolicy {
    fn default() -> Self {
        Self {
            count: DEFAULT_HEART_RATE_COUNT,
            values: DEFAULT_HEART_RATE_VALUES.to_vec(),
        }
    }
}

/// Builds `count` heart-rate samples anchored at `start`, one second apart.
///
/// Sample `i` covers `[start + i s, start + (i + 1) s]`, cut short at `end` but never
/// ending before it starts, so a zero-length workout still gets point samples. Values
/// repeat through `value_sequence`; an empty sequence yields no samples. Samples that
/// would fall past the end of the calendar range are dropped.
pub fn generate_heart_rate_batch(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    count: usize,
    value_sequence: &[f64],
) -> Vec<Sample> {
    if value_sequence.is_empty() {
        return Vec::new();
    }
    let step = Duration::seconds(HEART_RATE_SPACING_SECONDS);

    value_sequence
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .filter_map(|(i, bpm)| {
            let offset = i64::try_from(i)
                .ok()?
                .checked_mul(HEART_RATE_SPACING_SECONDS)
                .and_then(Duration::try_seconds)?;
            let anchor = start.checked_add_signed(offset)?;
            let until = anchor.checked_add_signed(step).unwrap_or(anchor).min(end).max(anchor);
            Sample::interval(
                DataCategory::HeartRate,
                SampleValue::Quantity(Quantity::new(*bpm, Unit::BeatsPerMinute)),
                anchor,
                until,
            )
            .ok()
        })
        .collect()
}
