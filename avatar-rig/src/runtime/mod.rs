mod host;
mod orchestrator;
mod snapshot;

pub use host::*;
pub use orchestrator::*;
pub use snapshot::*;


#[cfg(test)]
mod orchestrator_tests;
