use crate::cli::AreasArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use serde::Serialize;
use spike_rs::SpikeError;

#[derive(Serialize)]
struct AreasOutput {
    session: String,
    stimulus: String,
    brain_areas: Vec<String>,
}

pub fn execute(args: AreasArgs) -> i32 {
    let stim = match params::parse_stim(&args.stim) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let store = params::resolve_store(args.data_dir.as_deref());
    let areas = match store.brain_areas(&args.session, stim) {
        Ok(areas) => areas,
        Err(e @ (SpikeError::SessionNotFound { .. } | SpikeError::FileNotFound(_))) => {
            eprintln!("Error: {}", e);
            return exit_codes::DATA_NOT_FOUND;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    if args.json {
        let listing = AreasOutput {
            session: args.session.clone(),
            stimulus: args.stim.clone(),
            brain_areas: areas,
        };
        if let Err(e) = output::emit(&listing, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        println!("Brain areas in session {} ({}):", args.session, args.stim);
        for area in &areas {
            println!("  {}", area);
        }
    }

    exit_codes::SUCCESS
}
