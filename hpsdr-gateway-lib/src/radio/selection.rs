use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::radio::descriptor::RadioDescriptor;

/// Picks which resolved radio a new or anonymous session is bound to.
///
/// Implementations see only the currently resolved radio set; they do
/// not see session state, so selection never depends on which radios
/// are already busy.
pub trait RadioSelector: Send + Sync {
    fn select<'a>(&self, radios: &'a [RadioDescriptor]) -> Option<&'a RadioDescriptor>;
}

/// Always picks the first enabled radio, in configuration order. The
/// default strategy; matches the reference gateway's fixed behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl RadioSelector for FirstAvailable {
    fn select<'a>(&self, radios: &'a [RadioDescriptor]) -> Option<&'a RadioDescriptor> {
        radios.first()
    }
}

/// Cycles through resolved radios on each call.
#[derive(Clone, Default)]
pub struct RoundRobin {
    index: Arc<AtomicUsize>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self { index: Arc::new(AtomicUsize::new(0)) }
    }
}

impl RadioSelector for RoundRobin {
    fn select<'a>(&self, radios: &'a [RadioDescriptor]) -> Option<&'a RadioDescriptor> {
        if radios.is_empty() {
            return None;
        }
        let i = self.index.fetch_add(1, Ordering::Relaxed) % radios.len();
        radios.get(i)
    }
}
