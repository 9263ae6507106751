use spike_rs::{SessionStore, StimulusKind, TrainOptions};

/// Parse a stimulus protocol name.
pub fn parse_stim(s: &str) -> Result<StimulusKind, String> {
    StimulusKind::from_str(s).ok_or_else(|| {
        format!(
            "Unknown stimulus protocol '{}'. Valid values: flash, gabor",
            s
        )
    })
}

/// Validate window and clipping parameters before touching any data.
pub fn validate_run_params(tmin: f64, tmax: f64, max_dur: Option<f64>) -> Result<(), String> {
    if !(tmin < tmax) {
        return Err(format!(
            "Window start --tmin ({}) must be less than window end --tmax ({})",
            tmin, tmax
        ));
    }
    if let Some(dur) = max_dur {
        if !(dur > 0.0) || !dur.is_finite() {
            return Err(format!(
                "--max-dur must be a positive finite number, got {}",
                dur
            ));
        }
    }
    Ok(())
}

/// Build the engine options from CLI arguments.
pub fn build_options(
    area: Option<String>,
    tmin: f64,
    tmax: f64,
    max_dur: Option<f64>,
    min_spikes: usize,
) -> TrainOptions {
    TrainOptions {
        brain_area: area,
        tmin,
        tmax,
        max_dur,
        min_spikes,
    }
}

/// Resolve the session store from an optional explicit data directory.
pub fn resolve_store(data_dir: Option<&str>) -> SessionStore {
    SessionStore::resolve(data_dir)
}
