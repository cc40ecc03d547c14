pub mod options;
pub mod priority;
pub mod progress;
pub mod sequencer;
