#![deny(missing_docs)]
#![doc = "Shared error surface for the memory bandwidth benchmark visualisation crates."]

pub mod errors;

pub use errors::{ErrorInfo, VizError};

/// Hint attached to every missing-input failure.
pub const RUN_BENCHMARKS_HINT: &str = "Please run the benchmark script first: ./run_benchmarks.sh";
