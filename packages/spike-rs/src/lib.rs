pub mod error;
pub mod filter;
pub mod parser;
pub mod select;
pub mod session;
pub mod synchrony;
pub mod trains;
pub mod types;

pub use error::{Result, SpikeError};
pub use filter::{clip_spikes, select_brain_area};
pub use select::{relative_to_onset, select_spikes_around_stimuli};
pub use session::{SessionStore, StimulusKind};
pub use synchrony::{find_synchronous_spikes, SynchronyEvents};
pub use trains::{build_spike_trains, spikes_to_trains, SpikeTrain};
pub use types::*;
