pub mod navigation;
pub mod query;
pub mod sequencer;
pub mod storage;
pub mod time;

pub use sequencer::RequestSequencer;
