use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use serde::Serialize;
use spike_rs::SpikeError;

#[derive(Serialize)]
struct ValidateOutput {
    session: String,
    stimulus: String,
    valid: bool,
    n_spikes: Option<usize>,
    n_stimuli: Option<usize>,
    brain_areas: Vec<String>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let stim = match params::parse_stim(&args.stim) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let store = params::resolve_store(args.data_dir.as_deref());

    let (result, exit_code) = match store.load_session(&args.session, stim) {
        Ok((spikes, stimuli)) => (
            ValidateOutput {
                session: args.session.clone(),
                stimulus: args.stim.clone(),
                valid: true,
                n_spikes: Some(spikes.len()),
                n_stimuli: Some(stimuli.len()),
                brain_areas: spikes.brain_areas(),
                error: None,
            },
            exit_codes::SUCCESS,
        ),
        Err(e) => {
            let code = match &e {
                SpikeError::SessionNotFound { .. } | SpikeError::FileNotFound(_) => {
                    exit_codes::DATA_NOT_FOUND
                }
                _ => exit_codes::INPUT_ERROR,
            };
            (
                ValidateOutput {
                    session: args.session.clone(),
                    stimulus: args.stim.clone(),
                    valid: false,
                    n_spikes: None,
                    n_stimuli: None,
                    brain_areas: Vec::new(),
                    error: Some(e.to_string()),
                },
                code,
            )
        }
    };

    if args.json {
        if let Err(e) = output::emit(&result, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "Session {} ({}) is valid: {} spikes, {} stimuli, areas: {}",
            result.session,
            result.stimulus,
            result.n_spikes.unwrap_or(0),
            result.n_stimuli.unwrap_or(0),
            result.brain_areas.join(", ")
        );
    }

    exit_code
}
