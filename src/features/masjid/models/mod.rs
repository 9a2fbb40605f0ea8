mod timings;

pub use timings::{format_time, NamazTimings};
