use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::trains::SpikeTrain;

/// Synchronous spike times and the trains they occurred in.
///
/// `times` and `trains` are parallel: each element pairs one shared
/// timestamp with the index (into the input train list) of a train that
/// contains it. A k-way coincidence contributes k entries with the same
/// timestamp. Entries are ordered by ascending timestamp, then by train
/// index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynchronyEvents {
    pub times: Vec<f64>,
    pub trains: Vec<usize>,
}

impl SynchronyEvents {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Find the synchronous spikes in a list of spike trains.
///
/// Two spikes are synchronous iff their timestamps are exactly equal (bit
/// identical); there is no tolerance. Real free-running clocks rarely
/// collide exactly, so this matching is meant for timestamps derived from a
/// shared discretized clock.
///
/// Returns `None` when no timestamp occurs in two or more places, so callers
/// can tell "no synchrony found" apart from an error. Empty input and empty
/// trains are fine and contribute nothing.
///
/// Runs in O(N log N) over the total spike count via a single stable sort;
/// spikes are never compared pairwise.
pub fn find_synchronous_spikes(trains: &[SpikeTrain]) -> Option<SynchronyEvents> {
    let total: usize = trains.iter().map(|t| t.times.len()).sum();
    let mut flat: Vec<(f64, usize)> = Vec::with_capacity(total);
    for (index, train) in trains.iter().enumerate() {
        for &time in &train.times {
            flat.push((time, index));
        }
    }

    // Stable sort keeps flattening order within an equal-timestamp run, so
    // ties come out in ascending train index.
    flat.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut times = Vec::new();
    let mut owners = Vec::new();
    let mut i = 0;
    while i < flat.len() {
        let mut j = i + 1;
        while j < flat.len() && flat[j].0.total_cmp(&flat[i].0) == Ordering::Equal {
            j += 1;
        }
        if j - i > 1 {
            for &(time, index) in &flat[i..j] {
                times.push(time);
                owners.push(index);
            }
        }
        i = j;
    }

    if times.is_empty() {
        log::info!("found no synchronous spikes in {} trains", trains.len());
        return None;
    }

    Some(SynchronyEvents {
        times,
        trains: owners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(unit_id: u64, times: &[f64]) -> SpikeTrain {
        SpikeTrain {
            unit_id,
            brain_area: "LM".to_string(),
            times: times.to_vec(),
            t_start: -1.0,
            t_stop: 10.0,
        }
    }

    #[test]
    fn test_pairwise_synchrony() {
        let trains = vec![train(1, &[1.0, 2.0, 3.0]), train(2, &[2.0, 4.0])];
        let events = find_synchronous_spikes(&trains).unwrap();
        assert_eq!(events.times, vec![2.0, 2.0]);
        assert_eq!(events.trains, vec![0, 1]);
    }

    #[test]
    fn test_three_way_synchrony_emits_three_pairs() {
        let trains = vec![
            train(1, &[0.5, 2.0]),
            train(2, &[2.0]),
            train(3, &[2.0, 9.0]),
        ];
        let events = find_synchronous_spikes(&trains).unwrap();
        assert_eq!(events.times, vec![2.0, 2.0, 2.0]);
        assert_eq!(events.trains, vec![0, 1, 2]);
    }

    #[test]
    fn test_result_ordered_by_time_then_train() {
        let trains = vec![train(1, &[5.0, 1.0]), train(2, &[1.0, 5.0])];
        let events = find_synchronous_spikes(&trains).unwrap();
        assert_eq!(events.times, vec![1.0, 1.0, 5.0, 5.0]);
        assert_eq!(events.trains, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_no_synchrony_is_none() {
        let trains = vec![train(1, &[1.0, 2.0]), train(2, &[3.0, 4.0])];
        assert!(find_synchronous_spikes(&trains).is_none());
    }

    #[test]
    fn test_empty_input_is_none() {
        assert!(find_synchronous_spikes(&[]).is_none());
    }

    #[test]
    fn test_empty_trains_do_not_crash() {
        let trains = vec![train(1, &[]), train(2, &[1.0]), train(3, &[1.0])];
        let events = find_synchronous_spikes(&trains).unwrap();
        assert_eq!(events.times, vec![1.0, 1.0]);
        assert_eq!(events.trains, vec![1, 2]);
    }

    #[test]
    fn test_exact_equality_no_tolerance() {
        let trains = vec![train(1, &[1.0]), train(2, &[1.0 + f64::EPSILON])];
        assert!(find_synchronous_spikes(&trains).is_none());
    }

    #[test]
    fn test_times_invariant_under_input_order() {
        let a = vec![train(1, &[1.0, 2.0, 7.0]), train(2, &[2.0, 7.0])];
        let b = vec![train(2, &[2.0, 7.0]), train(1, &[1.0, 2.0, 7.0])];
        let ea = find_synchronous_spikes(&a).unwrap();
        let eb = find_synchronous_spikes(&b).unwrap();
        assert_eq!(ea.times, eb.times);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let trains = vec![train(1, &[1.0, 2.0]), train(2, &[2.0])];
        let first = find_synchronous_spikes(&trains).unwrap();
        let second = find_synchronous_spikes(&trains).unwrap();
        assert_eq!(first, second);
    }
}
