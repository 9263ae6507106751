use crate::error::{Result, SpikeError};
use crate::types::SpikeTable;

/// Keep only the spikes recorded in the given brain area.
///
/// The requested area is matched case-insensitively (source data carries
/// uppercase codes). Requesting an area absent from the table fails with
/// `UnknownBrainArea` listing the areas that are present.
pub fn select_brain_area(spikes: &SpikeTable, brain_area: &str) -> Result<SpikeTable> {
    let wanted = brain_area.to_uppercase();
    let available = spikes.brain_areas();

    if !available.iter().any(|a| a == &wanted) {
        return Err(SpikeError::UnknownBrainArea {
            area: wanted,
            available,
        });
    }

    let rows = spikes
        .rows()
        .iter()
        .filter(|r| r.brain_area == wanted)
        .cloned()
        .collect();
    Ok(SpikeTable::new(rows))
}

/// Clip the spike table so it doesn't exceed the maximum duration.
///
/// Keeps spikes with `time <= t0 + max_dur` where `t0` is the earliest spike
/// time (inclusive bound). Fails with `EmptyInput` on an empty table, since
/// the minimum is undefined there.
pub fn clip_spikes(spikes: &SpikeTable, max_dur: f64) -> Result<SpikeTable> {
    if !(max_dur > 0.0) || !max_dur.is_finite() {
        return Err(SpikeError::InvalidParameter(format!(
            "max_dur must be a positive finite number, got {}",
            max_dur
        )));
    }
    if spikes.is_empty() {
        return Err(SpikeError::EmptyInput("spikes"));
    }

    let t0 = spikes
        .rows()
        .iter()
        .map(|r| r.time)
        .fold(f64::INFINITY, f64::min);
    let t_stop = t0 + max_dur;

    let rows = spikes
        .rows()
        .iter()
        .filter(|r| r.time <= t_stop)
        .cloned()
        .collect();
    Ok(SpikeTable::new(rows))
}
