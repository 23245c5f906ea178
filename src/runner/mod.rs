mod analyzer;
mod orchestrator;
mod outcome;
mod pipeline;
mod retry;
mod select;
#[cfg(test)]
mod testing;

pub use orchestrator::{Orchestrator, RunReport, Totals};
pub use outcome::{LocationOutcome, LocationRun, LocationStatus};

#[cfg(test)]
pub use orchestrator::{Halt, LocationResult};
#[cfg(test)]
pub use outcome::Candidate;
#[cfg(test)]
pub use select::{Selected, SelectionOrigin};
