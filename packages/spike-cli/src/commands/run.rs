use crate::cli::RunArgs;
use crate::exit_codes;
use crate::output;
use crate::params;

use spike_rs::{build_spike_trains, find_synchronous_spikes, AnalysisResult, SpikeError};

pub fn execute(args: RunArgs) -> i32 {
    let stim = match params::parse_stim(&args.stim) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if let Err(msg) = params::validate_run_params(args.tmin, args.tmax, args.max_dur) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let store = params::resolve_store(args.data_dir.as_deref());

    if !args.quiet {
        eprintln!("Analyzing session {} ({})...", args.session, args.stim);
        eprintln!("  Data dir: {}", store.data_dir().display());
        eprintln!("  Window: [{}, {}) around onsets", args.tmin, args.tmax);
        if let Some(ref area) = args.area {
            eprintln!("  Brain area: {}", area);
        }
    }

    let (spikes, stimuli) = match store.load_session(&args.session, stim) {
        Ok(tables) => tables,
        Err(e @ (SpikeError::SessionNotFound { .. } | SpikeError::FileNotFound(_))) => {
            eprintln!("Error: {}", e);
            return exit_codes::DATA_NOT_FOUND;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    let options = params::build_options(
        args.area.clone(),
        args.tmin,
        args.tmax,
        args.max_dur,
        args.min_spikes,
    );

    let trains = match build_spike_trains(&spikes, &stimuli, &options) {
        Ok(trains) => trains,
        Err(e @ SpikeError::UnknownBrainArea { .. }) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    let synchrony = find_synchronous_spikes(&trains);

    if !args.quiet {
        eprintln!("  Trains: {}", trains.len());
        match &synchrony {
            Some(events) => eprintln!("  Synchronous spikes: {}", events.len()),
            None => eprintln!("  No synchronous spikes found"),
        }
    }

    let result = AnalysisResult::new(
        args.session.clone(),
        args.stim.clone(),
        options,
        &trains,
        synchrony,
    );

    if let Err(e) = output::emit(&result, args.compact, args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }
    if !args.quiet {
        if let Some(ref path) = args.output {
            eprintln!("Results written to {}", path);
        }
    }

    exit_codes::SUCCESS
}
