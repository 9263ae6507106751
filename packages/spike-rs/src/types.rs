use serde::{Deserialize, Serialize};

use crate::synchrony::SynchronyEvents;
use crate::trains::SpikeTrain;

/// A single spike: one firing event with its recording unit and brain area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeRecord {
    /// Spike time in seconds
    pub time: f64,
    /// Recording unit identifier
    pub unit_id: u64,
    /// Brain area code (uppercase, e.g. "LM")
    pub brain_area: String,
}

/// A single stimulus presentation onset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusRecord {
    /// Onset time in seconds
    pub start_time: f64,
}

/// Ordered collection of spike rows sharing a schema.
///
/// Rows are not required to be time-sorted; operations that need order sort
/// explicitly. Every transformation produces a new table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpikeTable {
    rows: Vec<SpikeRecord>,
}

impl SpikeTable {
    pub fn new(rows: Vec<SpikeRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SpikeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct brain areas in first-appearance order.
    pub fn brain_areas(&self) -> Vec<String> {
        let mut areas: Vec<String> = Vec::new();
        for row in &self.rows {
            if !areas.iter().any(|a| a == &row.brain_area) {
                areas.push(row.brain_area.clone());
            }
        }
        areas
    }

    /// Distinct unit ids in first-appearance order.
    pub fn unit_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = Vec::new();
        for row in &self.rows {
            if !ids.contains(&row.unit_id) {
                ids.push(row.unit_id);
            }
        }
        ids
    }
}

/// Ordered collection of stimulus onsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StimulusTable {
    rows: Vec<StimulusRecord>,
}

impl StimulusTable {
    pub fn new(rows: Vec<StimulusRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StimulusRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Onset times in row order.
    pub fn onsets(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.start_time).collect()
    }
}

/// Parameters for building spike trains from a session's tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOptions {
    /// Restrict to one brain area before alignment (case-insensitive)
    pub brain_area: Option<String>,
    /// Pre-onset window margin in seconds (typically negative)
    pub tmin: f64,
    /// Post-onset window margin in seconds
    pub tmax: f64,
    /// Truncate each selection to this many seconds from its first spike
    pub max_dur: Option<f64>,
    /// Keep only units with strictly more than this many spikes
    pub min_spikes: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            brain_area: None,
            tmin: -0.1,
            tmax: 0.5,
            max_dur: None,
            min_spikes: 0,
        }
    }
}

/// Summary of one spike train for the analysis output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSummary {
    pub unit_id: u64,
    pub brain_area: String,
    pub n_spikes: usize,
    pub t_start: f64,
    pub t_stop: f64,
}

/// Complete result of one session analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub session: String,
    pub stimulus: String,
    pub options: TrainOptions,
    pub trains: Vec<TrainSummary>,
    /// `None` means no synchronous spikes were found
    pub synchrony: Option<SynchronyEvents>,
    pub created_at: String,
}

impl AnalysisResult {
    pub fn new(
        session: String,
        stimulus: String,
        options: TrainOptions,
        trains: &[SpikeTrain],
        synchrony: Option<SynchronyEvents>,
    ) -> Self {
        let summaries = trains
            .iter()
            .map(|t| TrainSummary {
                unit_id: t.unit_id,
                brain_area: t.brain_area.clone(),
                n_spikes: t.times.len(),
                t_start: t.t_start,
                t_stop: t.t_stop,
            })
            .collect();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session,
            stimulus,
            options,
            trains: summaries,
            synchrony,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
