//! Shared open/closed membership for a group of collapse panels.
//!
//! One [`ExpansionRegistry`] scopes a group of panels. It is a cheap handle
//! (clones share the same set) passed explicitly to every panel; there is no
//! global instance. Panels only read membership and ask for toggles; the
//! registry is the single source of truth for "is this panel open".

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use tokio::sync::watch;

/// Glyph panels fall back to when they don't bring their own expand icon.
pub const DEFAULT_EXPAND_ICON: &str = "▾";

#[derive(Debug)]
struct Membership {
    expanded: BTreeSet<String>,
    accordion: bool,
    expand_icon: String,
}

#[derive(Debug, Clone)]
pub struct ExpansionRegistry {
    inner: Arc<RwLock<Membership>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for ExpansionRegistry {
    fn default() -> Self {
        Self::with_mode(false)
    }
}

impl ExpansionRegistry {
    /// Registry where any number of panels may be open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry where opening a panel closes every other one.
    pub fn accordion() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(accordion: bool) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(Membership {
                expanded: BTreeSet::new(),
                accordion,
                expand_icon: DEFAULT_EXPAND_ICON.to_string(),
            })),
            revision: Arc::new(revision),
        }
    }

    /// Seed the initially open panels. Empty names are skipped; in accordion
    /// mode only the last name is kept.
    pub fn with_expanded<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut inner = self.write();
            for name in names {
                let name = name.into();
                if name.is_empty() {
                    continue;
                }
                if inner.accordion {
                    inner.expanded.clear();
                }
                inner.expanded.insert(name);
            }
        }
        self
    }

    pub fn with_expand_icon(self, icon: impl Into<String>) -> Self {
        self.write().expand_icon = icon.into();
        self
    }

    pub fn is_accordion(&self) -> bool {
        self.read().accordion
    }

    pub fn expand_icon(&self) -> String {
        self.read().expand_icon.clone()
    }

    /// Panels without a name are never expanded.
    pub fn is_expanded(&self, name: &str) -> bool {
        !name.is_empty() && self.read().expanded.contains(name)
    }

    /// Names of the open panels, sorted.
    pub fn expanded(&self) -> Vec<String> {
        self.read().expanded.iter().cloned().collect()
    }

    /// Flip membership of `name`. No-op for an empty name.
    ///
    /// The check and the flip happen under one write lock, so concurrent
    /// toggles from different handles each flip exactly once.
    pub fn toggle(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        let opened = {
            let mut inner = self.write();
            if inner.expanded.remove(name) {
                false
            } else {
                if inner.accordion {
                    inner.expanded.clear();
                }
                inner.expanded.insert(name.to_string());
                true
            }
        };
        debug!("Panel {name} {}", if opened { "opened" } else { "closed" });
        self.bump();
    }

    pub fn open(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        let changed = {
            let mut inner = self.write();
            if inner.expanded.contains(name) {
                false
            } else {
                if inner.accordion {
                    inner.expanded.clear();
                }
                inner.expanded.insert(name.to_string());
                true
            }
        };
        if changed {
            debug!("Panel {name} opened");
            self.bump();
        }
    }

    pub fn close(&self, name: &str) {
        let changed = self.write().expanded.remove(name);
        if changed {
            debug!("Panel {name} closed");
            self.bump();
        }
    }

    /// Receiver whose value is bumped on every membership change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Number of membership changes so far.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn read(&self) -> RwLockReadGuard<'_, Membership> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Membership> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
