//! Height animation for collapsible content.
//!
//! Height can't be animated toward `auto`, so an open/close is played as
//! three phases against a previously measured natural height `H`:
//!
//! - expand: `0` now, `H` after [`Timing::expand_delay`], then `auto` after
//!   [`Timing::settle_delay`] so later content reflows aren't clipped
//! - collapse: `H` now, `0` after [`Timing::expand_delay`]
//!
//! The animator is a pure state machine driven by the caller's clock. It
//! holds at most one pending step; every input change drops it before
//! scheduling its own, so a superseded animation can never fire late.
//! Event loops call [`HeightAnimator::poll`] when
//! [`HeightAnimator::next_deadline`] passes.

use log::{debug, trace};
use tokio::time::Instant;

use crate::config::Timing;
use crate::layout::Height;

/// Where a panel's content region is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Height `0`, at rest.
    Collapsed,
    /// Held at an explicit height while moving toward open or closed.
    Transitioning { expanding: bool, height: Height },
    /// Open and sized by its content.
    ExpandedAuto,
}

impl Phase {
    pub fn visible_height(&self) -> Height {
        match self {
            Phase::Collapsed => Height::ZERO,
            Phase::Transitioning { height, .. } => *height,
            Phase::ExpandedAuto => Height::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Apply the end height of the current transition.
    Apply(Height),
    /// Relax an open panel from its fixed height to `auto`.
    Settle,
}

#[derive(Debug, Clone, Copy)]
struct PendingStep {
    due: Instant,
    step: Step,
}

/// Per-panel height state machine.
#[derive(Debug, Clone)]
pub struct HeightAnimator {
    phase: Phase,
    expanded: bool,
    pending: Option<PendingStep>,
    timing: Timing,
}

impl HeightAnimator {
    /// Start at rest: open panels are `auto`, closed panels are `0`.
    pub fn new(expanded: bool, timing: Timing) -> Self {
        Self {
            phase: if expanded {
                Phase::ExpandedAuto
            } else {
                Phase::Collapsed
            },
            expanded,
            pending: None,
            timing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn visible_height(&self) -> Height {
        self.phase.visible_height()
    }

    /// The expansion intent the animator is moving toward.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True while a step is still scheduled.
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Icon rotation in degrees: `rotate` while open, `0` while closed.
    pub fn icon_rotation(&self, rotate: u16) -> u16 {
        if self.expanded { rotate % 360 } else { 0 }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Feed a new expansion intent.
    ///
    /// `measured` is the last known natural height (`Auto` if nothing was
    /// ever measured). It is read here only, never mid-transition.
    /// Returns false if the intent didn't change.
    pub fn set_expanded(&mut self, expanded: bool, measured: Height, now: Instant) -> bool {
        if expanded == self.expanded {
            return false;
        }

        if let Some(stale) = self.pending.take() {
            trace!("Dropping pending {:?} due at {:?}", stale.step, stale.due);
        }

        let (start, end) = if expanded {
            (Height::ZERO, measured)
        } else {
            (measured, Height::ZERO)
        };
        debug!(
            "Height transition {} -> {} ({})",
            start,
            end,
            if expanded { "expand" } else { "collapse" }
        );

        self.expanded = expanded;
        self.phase = Phase::Transitioning {
            expanding: expanded,
            height: start,
        };
        self.pending = Some(PendingStep {
            due: now + self.timing.expand_delay,
            step: Step::Apply(end),
        });
        true
    }

    /// Apply every step due at `now`. Returns true if the phase changed.
    ///
    /// Chained steps are timed from the previous step's due time, so a late
    /// poll applies both steps rather than stretching the animation.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Some(pending) = self.pending {
            if pending.due > now {
                break;
            }
            self.pending = None;

            match pending.step {
                Step::Apply(end) if self.expanded => {
                    self.phase = Phase::Transitioning {
                        expanding: true,
                        height: end,
                    };
                    self.pending = Some(PendingStep {
                        due: pending.due + self.timing.settle_delay,
                        step: Step::Settle,
                    });
                }
                Step::Apply(_) => {
                    self.phase = Phase::Collapsed;
                }
                Step::Settle => {
                    self.phase = Phase::ExpandedAuto;
                }
            }
            trace!("Applied {:?}, now {:?}", pending.step, self.phase);
            changed = true;
        }

        changed
    }

    /// Drop the pending step without applying it. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_rotation_follows_intent() {
        let t0 = Instant::now();
        let mut animator = HeightAnimator::new(false, Timing::default());
        assert_eq!(animator.icon_rotation(180), 0);

        animator.set_expanded(true, Height::Px(40), t0);
        assert_eq!(animator.icon_rotation(180), 180);
        assert_eq!(animator.icon_rotation(540), 180);

        animator.set_expanded(false, Height::Px(40), t0);
        assert_eq!(animator.icon_rotation(180), 0);
    }

    #[test]
    fn test_same_intent_is_ignored() {
        let t0 = Instant::now();
        let mut animator = HeightAnimator::new(true, Timing::default());
        assert!(!animator.set_expanded(true, Height::Px(10), t0));
        assert_eq!(animator.phase(), Phase::ExpandedAuto);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_poll_before_deadline_is_noop() {
        let t0 = Instant::now();
        let mut animator = HeightAnimator::new(false, Timing::default());
        animator.set_expanded(true, Height::Px(10), t0);
        assert!(!animator.poll(t0 + ms(99)));
        assert_eq!(animator.visible_height(), Height::ZERO);
    }

    #[test]
    fn test_cancel_freezes_phase() {
        let t0 = Instant::now();
        let mut animator = HeightAnimator::new(false, Timing::default());
        animator.set_expanded(true, Height::Px(10), t0);
        assert!(animator.cancel());
        assert!(!animator.cancel());
        assert!(!animator.poll(t0 + ms(1000)));
        assert_eq!(animator.visible_height(), Height::ZERO);
    }
}
