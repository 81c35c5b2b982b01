//! Asynchronous size queries against the host's latest layout.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::trace;

use crate::layout::LayoutResult;

/// Result of a size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Rendered height of the target.
    Measured(u16),
    /// The target isn't in the render tree (yet).
    Unavailable,
}

impl Measurement {
    pub fn height(&self) -> Option<u16> {
        match self {
            Measurement::Measured(h) => Some(*h),
            Measurement::Unavailable => None,
        }
    }
}

/// Queries the rendered height of a node by id.
///
/// Results are best-effort: a query issued before the final layout pass may
/// undercount. A missing target is [`Measurement::Unavailable`], never an error.
#[async_trait]
pub trait SizeProber: Send + Sync {
    /// `target` is an element id, optionally written as a `#id` selector.
    async fn measure(&self, target: &str) -> Measurement;
}

/// Prober backed by the most recently published [`LayoutResult`].
///
/// The host renderer calls [`LayoutProber::publish`] after every layout pass.
/// Clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct LayoutProber {
    layout: Arc<RwLock<LayoutResult>>,
}

impl LayoutProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout snapshot.
    pub fn publish(&self, layout: LayoutResult) {
        let mut guard = self
            .layout
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = layout;
    }

    /// Look up a target synchronously.
    pub fn lookup(&self, target: &str) -> Measurement {
        let id = target.strip_prefix('#').unwrap_or(target);
        let guard = match self.layout.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.get(id) {
            Some(rect) => Measurement::Measured(rect.height),
            None => {
                trace!("Probe target {id} not in layout");
                Measurement::Unavailable
            }
        }
    }
}

#[async_trait]
impl SizeProber for LayoutProber {
    async fn measure(&self, target: &str) -> Measurement {
        self.lookup(target)
    }
}
