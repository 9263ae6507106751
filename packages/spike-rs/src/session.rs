use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpikeError};
use crate::parser::{parse_spike_table, parse_stimulus_table};
use crate::types::{SpikeTable, StimulusTable};

/// Environment variable for the data directory
pub const DATA_DIR_ENV_VAR: &str = "SPIKELAB_DATA_DIR";

/// Session directory prefix
pub const SESSION_PREFIX: &str = "ses-";

/// Stimulus protocol a session was recorded under.
///
/// Determines the file prefix of the session's spike/stimulus tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    Flash,
    Gabor,
}

impl StimulusKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "flash" => Some(Self::Flash),
            "gabor" => Some(Self::Gabor),
            _ => None,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::Gabor => "gabor",
        }
    }
}

/// On-disk store of recording sessions.
///
/// Layout: `<data_dir>/ses-<id>/<stim>_spikes.csv` and
/// `<data_dir>/ses-<id>/<stim>_stimuli.csv`. The data directory is explicit
/// configuration; there is no process-wide default that callers mutate.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. $SPIKELAB_DATA_DIR environment variable
    /// 3. Platform data directory (`<data_local_dir>/spikelab/data`)
    pub fn resolve(explicit_path: Option<&str>) -> Self {
        if let Some(path) = explicit_path {
            return Self::new(path);
        }
        if let Ok(env_path) = std::env::var(DATA_DIR_ENV_VAR) {
            return Self::new(env_path);
        }
        let default = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spikelab")
            .join("data");
        Self::new(default)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get a list of all available sessions.
    ///
    /// Sessions are directories named `ses-<id>`; the returned ids are the
    /// part after the last `-`, sorted.
    pub fn available_sessions(&self) -> Vec<String> {
        let pattern = self
            .data_dir
            .join(format!("{}*", SESSION_PREFIX))
            .to_string_lossy()
            .into_owned();

        let mut sessions: Vec<String> = glob::glob(&pattern)
            .map(|paths| {
                paths
                    .filter_map(|p| p.ok())
                    .filter(|p| p.is_dir())
                    .filter_map(|p| {
                        p.file_name()
                            .and_then(|n| n.to_str())
                            .and_then(|n| n.rsplit('-').next())
                            .map(str::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default();
        sessions.sort();
        sessions
    }

    /// Load the spike and stimulus tables for one session.
    pub fn load_session(
        &self,
        ses_id: &str,
        stim: StimulusKind,
    ) -> Result<(SpikeTable, StimulusTable)> {
        let ses_dir = self.data_dir.join(format!("{}{}", SESSION_PREFIX, ses_id));
        if !ses_dir.is_dir() {
            return Err(SpikeError::SessionNotFound {
                session: ses_id.to_string(),
                available: self.available_sessions(),
            });
        }

        let spikes_path = ses_dir.join(format!("{}_spikes.csv", stim.prefix()));
        let stimuli_path = ses_dir.join(format!("{}_stimuli.csv", stim.prefix()));

        log::info!("loading session {} from {}", ses_id, ses_dir.display());

        let spikes_map = mmap_file(&spikes_path)?;
        let spikes = parse_spike_table(&spikes_map, &spikes_path.display().to_string())?;

        let stimuli_map = mmap_file(&stimuli_path)?;
        let stimuli = parse_stimulus_table(&stimuli_map, &stimuli_path.display().to_string())?;

        log::info!(
            "session {}: {} spikes, {} stimuli",
            ses_id,
            spikes.len(),
            stimuli.len()
        );

        Ok((spikes, stimuli))
    }

    /// Get a list of all the brain areas recorded in a given session.
    pub fn brain_areas(&self, ses_id: &str, stim: StimulusKind) -> Result<Vec<String>> {
        let (spikes, _) = self.load_session(ses_id, stim)?;
        Ok(spikes.brain_areas())
    }
}

/// Open a file and map it into memory (read-only).
fn mmap_file(path: &Path) -> Result<Mmap> {
    if !path.is_file() {
        return Err(SpikeError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(SpikeError::IoError)?;
    let mmap = unsafe { Mmap::map(&file).map_err(SpikeError::IoError)? };
    Ok(mmap)
}
