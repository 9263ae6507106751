use rayon::prelude::*;

use crate::error::{Result, SpikeError};
use crate::types::{SpikeTable, StimulusTable};

/// Select the spikes that happen in proximity to stimuli.
///
/// A spike at time `t` is kept iff at least one stimulus onset `o` satisfies
/// `o + tmin <= t < o + tmax` (half-open window). A spike inside the window
/// of any stimulus is kept, even if it falls into several windows. Input row
/// order is preserved in the output.
///
/// # Arguments
/// * `spikes` - Spike table (need not be time-sorted)
/// * `stimuli` - Stimulus onsets (need not be time-sorted)
/// * `tmin` - Pre-onset margin in seconds, typically negative
/// * `tmax` - Post-onset margin in seconds
///
/// # Returns
/// A new table with the selected spikes, or `InvalidWindow` if `tmin >= tmax`.
/// Zero spikes or zero stimuli yield an empty table.
pub fn select_spikes_around_stimuli(
    spikes: &SpikeTable,
    stimuli: &StimulusTable,
    tmin: f64,
    tmax: f64,
) -> Result<SpikeTable> {
    if !(tmin < tmax) {
        return Err(SpikeError::InvalidWindow { tmin, tmax });
    }
    if spikes.is_empty() || stimuli.is_empty() {
        return Ok(SpikeTable::default());
    }

    let mut onsets = stimuli.onsets();
    onsets.sort_by(f64::total_cmp);

    // All windows share one width, so for each spike only the latest onset
    // with o + tmin <= t can satisfy the upper bound. Membership tests are
    // independent per spike and run in parallel; collect() keeps row order.
    let mask: Vec<bool> = spikes
        .rows()
        .par_iter()
        .map(|row| {
            let t = row.time;
            let n_below = onsets.partition_point(|&o| o + tmin <= t);
            n_below > 0 && t < onsets[n_below - 1] + tmax
        })
        .collect();

    let selected: Vec<_> = spikes
        .rows()
        .iter()
        .zip(&mask)
        .filter(|(_, &keep)| keep)
        .map(|(row, _)| row.clone())
        .collect();

    log::debug!(
        "selected {} of {} spikes around {} stimuli (window [{}, {}))",
        selected.len(),
        spikes.len(),
        stimuli.len(),
        tmin,
        tmax
    );

    Ok(SpikeTable::new(selected))
}

/// Spike times relative to the latest stimulus onset at or before each spike.
///
/// Onsets are sorted before searching, so the offsets are well defined even
/// for unsorted stimulus tables. Spikes that precede every onset get their
/// (negative) offset to the first onset.
pub fn relative_to_onset(spikes: &SpikeTable, stimuli: &StimulusTable) -> Result<Vec<f64>> {
    if stimuli.is_empty() {
        return Err(SpikeError::EmptyInput("stimuli"));
    }

    let mut onsets = stimuli.onsets();
    onsets.sort_by(f64::total_cmp);

    let offsets = spikes
        .rows()
        .iter()
        .map(|row| {
            let t = row.time;
            let n_below = onsets.partition_point(|&o| o <= t);
            if n_below > 0 {
                t - onsets[n_below - 1]
            } else {
                t - onsets[0]
            }
        })
        .collect();

    Ok(offsets)
}
