mod descriptor;
mod resolver;
mod selection;

pub use descriptor::RadioDescriptor;
pub use resolver::resolve_radios;
pub use selection::{FirstAvailable, RadioSelector, RoundRobin};

use crate::config::RadioSelectionStrategy;

/// Builds the configured [`RadioSelector`] implementation.
pub fn build_selector(strategy: RadioSelectionStrategy) -> Box<dyn RadioSelector> {
    match strategy {
        RadioSelectionStrategy::FirstAvailable => Box::new(FirstAvailable),
        RadioSelectionStrategy::RoundRobin => Box::new(RoundRobin::new()),
    }
}
