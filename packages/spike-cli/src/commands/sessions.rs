use crate::cli::SessionsArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use serde::Serialize;

#[derive(Serialize)]
struct SessionsOutput {
    data_dir: String,
    sessions: Vec<String>,
}

pub fn execute(args: SessionsArgs) -> i32 {
    let store = params::resolve_store(args.data_dir.as_deref());
    let sessions = store.available_sessions();

    if args.json {
        let listing = SessionsOutput {
            data_dir: store.data_dir().display().to_string(),
            sessions,
        };
        if let Err(e) = output::emit(&listing, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else if sessions.is_empty() {
        println!("No sessions found under {}", store.data_dir().display());
    } else {
        println!("Available sessions ({}):", store.data_dir().display());
        for id in &sessions {
            println!("  {}", id);
        }
    }

    exit_codes::SUCCESS
}
