pub mod coerce;
pub mod infer;
pub mod reformat;
