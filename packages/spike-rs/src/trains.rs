use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::{clip_spikes, select_brain_area};
use crate::select::select_spikes_around_stimuli;
use crate::types::{SpikeTable, StimulusTable, TrainOptions};

/// The spike times of one recording unit, sorted ascending.
///
/// Derived from a spike table by grouping; never mutated afterwards.
/// `t_start`/`t_stop` bracket the selection with a one-second margin on each
/// side. The brain area is taken from the unit's first row in table order;
/// a unit is assumed to map to exactly one area, and if input data violates
/// that the first row wins (never averaged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeTrain {
    pub unit_id: u64,
    pub brain_area: String,
    pub times: Vec<f64>,
    pub t_start: f64,
    pub t_stop: f64,
}

/// Group a spike table into per-unit spike trains.
///
/// One train per distinct unit id, in first-appearance order, each with its
/// times sorted ascending. A train is kept only if it has strictly more than
/// `min_spikes` events; an empty table yields no trains.
pub fn spikes_to_trains(spikes: &SpikeTable, min_spikes: usize) -> Vec<SpikeTrain> {
    if spikes.is_empty() {
        return Vec::new();
    }

    let t_min = spikes
        .rows()
        .iter()
        .map(|r| r.time)
        .fold(f64::INFINITY, f64::min);
    let t_max = spikes
        .rows()
        .iter()
        .map(|r| r.time)
        .fold(f64::NEG_INFINITY, f64::max);
    let t_start = t_min - 1.0;
    let t_stop = t_max + 1.0;

    let mut order: Vec<u64> = Vec::new();
    let mut groups: HashMap<u64, (String, Vec<f64>)> = HashMap::new();
    for row in spikes.rows() {
        let entry = groups.entry(row.unit_id).or_insert_with(|| {
            order.push(row.unit_id);
            (row.brain_area.clone(), Vec::new())
        });
        entry.1.push(row.time);
    }

    let mut trains = Vec::with_capacity(order.len());
    for unit_id in order {
        if let Some((brain_area, mut times)) = groups.remove(&unit_id) {
            times.sort_by(f64::total_cmp);
            if times.len() > min_spikes {
                trains.push(SpikeTrain {
                    unit_id,
                    brain_area,
                    times,
                    t_start,
                    t_stop,
                });
            }
        }
    }

    log::debug!("grouped {} spikes into {} trains", spikes.len(), trains.len());
    trains
}

/// Build spike trains from a session's tables in one pass.
///
/// Applies, in order: brain-area filter (if requested), stimulus-window
/// selection, duration clipping (if requested, and skipped when the selection
/// came up empty), and per-unit grouping.
pub fn build_spike_trains(
    spikes: &SpikeTable,
    stimuli: &StimulusTable,
    options: &TrainOptions,
) -> Result<Vec<SpikeTrain>> {
    let mut selected = match &options.brain_area {
        Some(area) => select_brain_area(spikes, area)?,
        None => spikes.clone(),
    };

    selected = select_spikes_around_stimuli(&selected, stimuli, options.tmin, options.tmax)?;

    if let Some(max_dur) = options.max_dur {
        if !selected.is_empty() {
            selected = clip_spikes(&selected, max_dur)?;
        }
    }

    Ok(spikes_to_trains(&selected, options.min_spikes))
}
