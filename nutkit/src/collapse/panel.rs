use log::{debug, trace};
use rand::Rng;
use tokio::time::Instant;

use super::CollapseItem;
use crate::animation::{HeightAnimator, Phase};
use crate::config::Timing;
use crate::element::Element;
use crate::layout::Height;
use crate::probe::Measurement;
use crate::registry::ExpansionRegistry;

const CLASS_PREFIX: &str = "nut-collapse-item";
const CONTENT_ID_PREFIX: &str = "nut-collapse__content";
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A measurement the host should run for a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Per-panel sequence number, handed back to [`Panel::apply_measurement`].
    pub seq: u64,
    /// Content node as a `#id` selector.
    pub target: String,
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..8)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// One mounted collapse panel.
///
/// The panel reads its open state from the registry and feeds it to its
/// [`HeightAnimator`]; it never flips the animator itself. Clicks go to the
/// registry and come back through [`Panel::sync`].
///
/// Everything here is synchronous and deadline-driven: the host polls at
/// [`Panel::next_deadline`], runs the probe returned by [`Panel::take_probe`]
/// asynchronously, and hands the result to [`Panel::apply_measurement`].
#[derive(Debug, Clone)]
pub struct Panel {
    item: CollapseItem,
    content_id: String,
    animator: HeightAnimator,
    measured: Height,
    probe_due: Option<Instant>,
    next_seq: u64,
    latest_seq: Option<u64>,
    timing: Timing,
}

impl Panel {
    /// Mount at rest in whatever state the registry reports, and schedule
    /// the first measurement.
    pub fn mount(
        item: CollapseItem,
        registry: &ExpansionRegistry,
        timing: Timing,
        now: Instant,
    ) -> Self {
        let expanded = registry.is_expanded(&item.name);
        let content_id = format!("{CONTENT_ID_PREFIX}-{}", random_suffix());
        debug!(
            "Mounting panel {:?} as {content_id} (expanded: {expanded})",
            item.name
        );

        Self {
            item,
            content_id,
            animator: HeightAnimator::new(expanded, timing),
            measured: Height::Auto,
            probe_due: Some(now + timing.mount_probe_delay),
            next_seq: 0,
            latest_seq: None,
            timing,
        }
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn item(&self) -> &CollapseItem {
        &self.item
    }

    /// Id of the content node this panel measures.
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn is_expanded(&self) -> bool {
        self.animator.is_expanded()
    }

    pub fn phase(&self) -> Phase {
        self.animator.phase()
    }

    pub fn visible_height(&self) -> Height {
        self.animator.visible_height()
    }

    /// Last natural height, `Auto` until a measurement succeeds.
    pub fn measured_height(&self) -> Height {
        self.measured
    }

    pub fn icon_rotation(&self) -> u16 {
        self.animator.icon_rotation(self.item.rotate)
    }

    /// Header click. Asks the registry to toggle this panel unless it is
    /// disabled or unnamed. Returns whether a toggle was requested.
    pub fn click(&self, registry: &ExpansionRegistry) -> bool {
        if self.item.disabled {
            trace!("Ignoring click on disabled panel {:?}", self.item.name);
            return false;
        }
        if self.item.name.is_empty() {
            trace!("Ignoring click on unnamed panel {}", self.content_id);
            return false;
        }
        registry.toggle(&self.item.name);
        true
    }

    /// Pick up the registry's current state. Returns true if an animation started.
    pub fn sync(&mut self, registry: &ExpansionRegistry, now: Instant) -> bool {
        let expanded = registry.is_expanded(&self.item.name);
        self.animator.set_expanded(expanded, self.measured, now)
    }

    /// Replace the content and schedule a re-measurement.
    pub fn set_content(&mut self, content: Vec<Element>, now: Instant) {
        self.item.content = content;
        self.schedule_probe(now + self.timing.content_probe_delay);
    }

    /// Schedule a measurement. A pending one is pushed back rather than
    /// duplicated, so bursts of changes are measured once.
    pub fn schedule_probe(&mut self, due: Instant) {
        self.probe_due = Some(match self.probe_due {
            Some(existing) => existing.max(due),
            None => due,
        });
    }

    /// Take the due measurement, if any. Each request gets the next sequence
    /// number for this panel.
    pub fn take_probe(&mut self, now: Instant) -> Option<ProbeRequest> {
        match self.probe_due {
            Some(due) if due <= now => {
                self.probe_due = None;
                let seq = self.next_seq;
                self.next_seq += 1;
                Some(ProbeRequest {
                    seq,
                    target: format!("#{}", self.content_id),
                })
            }
            _ => None,
        }
    }

    /// Record the result of probe `seq`. Results older than one already
    /// applied are dropped, so a slow probe can't overwrite a newer layout.
    /// Only affects the next transition, never the one in progress.
    /// Returns true if the natural height was updated.
    pub fn apply_measurement(&mut self, seq: u64, measurement: Measurement) -> bool {
        if self.latest_seq.is_some_and(|latest| seq < latest) {
            trace!(
                "Panel {:?} dropping stale probe {seq} ({measurement:?})",
                self.item.name
            );
            return false;
        }
        self.latest_seq = Some(seq);

        match measurement {
            Measurement::Measured(height) if height > 0 => {
                trace!("Panel {:?} measured at {height}", self.item.name);
                self.measured = Height::Px(height);
                true
            }
            _ => false,
        }
    }

    /// Apply due animation steps. Returns true if the visible height changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.animator.poll(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.animator.next_deadline(), self.probe_due) {
            (Some(a), Some(p)) => Some(a.min(p)),
            (a, p) => a.or(p),
        }
    }

    /// Drop every pending step and measurement.
    pub fn unmount(&mut self) {
        self.animator.cancel();
        self.probe_due = None;
    }

    pub fn render(&self, registry: &ExpansionRegistry) -> Element {
        let icon = self
            .item
            .expand_icon
            .clone()
            .unwrap_or_else(|| registry.expand_icon());

        let mut header = Element::box_()
            .class(format!("{CLASS_PREFIX}__header"))
            .clickable(!self.item.disabled)
            .disabled(self.item.disabled)
            .data("name", self.item.name.clone())
            .child(
                Element::text(self.item.title.clone())
                    .class(format!("{CLASS_PREFIX}__title")),
            )
            .child(
                Element::text(self.item.extra.clone().unwrap_or_default())
                    .class(format!("{CLASS_PREFIX}__extra")),
            )
            .child(
                Element::box_().class(format!("{CLASS_PREFIX}__icon-box")).child(
                    Element::text(icon)
                        .class(format!("{CLASS_PREFIX}__icon"))
                        .rotation(self.icon_rotation()),
                ),
            );
        if self.item.disabled {
            header = header.class("disabled");
        }

        let content = Element::box_()
            .class(format!("{CLASS_PREFIX}__content"))
            .height(self.visible_height())
            .child(
                Element::box_()
                    .id(self.content_id.clone())
                    .class(format!("{CLASS_PREFIX}__content-text"))
                    .children(self.item.content.iter().cloned()),
            );

        Element::box_()
            .class(CLASS_PREFIX)
            .child(header)
            .child(content)
    }
}
