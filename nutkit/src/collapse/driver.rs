use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use super::{CollapseError, CollapseItem, Panel, ProbeRequest};
use crate::config::Timing;
use crate::element::Element;
use crate::probe::{Measurement, SizeProber};
use crate::registry::ExpansionRegistry;

/// A finished probe, routed back to its panel by content id.
#[derive(Debug)]
struct ProbeResult {
    content_id: String,
    seq: u64,
    measurement: Measurement,
}

/// Runs a group of panels sharing one registry.
///
/// All panel state is mutated from the task that owns the `Collapse`; only
/// the probes run as spawned tasks, and their results are applied on the
/// next [`Collapse::step`].
pub struct Collapse<P> {
    registry: ExpansionRegistry,
    prober: Arc<P>,
    timing: Timing,
    panels: Vec<Panel>,
    revision: watch::Receiver<u64>,
    results_tx: mpsc::UnboundedSender<ProbeResult>,
    results_rx: mpsc::UnboundedReceiver<ProbeResult>,
    in_flight: usize,
}

impl<P: SizeProber + 'static> Collapse<P> {
    pub fn new(
        registry: ExpansionRegistry,
        prober: Arc<P>,
        timing: Timing,
    ) -> Result<Self, CollapseError> {
        timing.validate()?;
        let revision = registry.subscribe();
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Ok(Self {
            registry,
            prober,
            timing,
            panels: Vec::new(),
            revision,
            results_tx,
            results_rx,
            in_flight: 0,
        })
    }

    pub fn registry(&self) -> &ExpansionRegistry {
        &self.registry
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name() == name)
    }

    fn panel_mut(&mut self, name: &str) -> Result<&mut Panel, CollapseError> {
        self.panels
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| CollapseError::UnknownPanel(name.to_string()))
    }

    pub fn mount(&mut self, item: CollapseItem) -> Result<&Panel, CollapseError> {
        if !item.name().is_empty() && self.panel(item.name()).is_some() {
            return Err(CollapseError::DuplicatePanel(item.name().to_string()));
        }
        let panel = Panel::mount(item, &self.registry, self.timing, Instant::now());
        self.panels.push(panel);
        Ok(&self.panels[self.panels.len() - 1])
    }

    /// Remove a panel, dropping its pending steps. Late probe results for it
    /// are discarded.
    pub fn unmount(&mut self, name: &str) -> Result<Panel, CollapseError> {
        let index = self
            .panels
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| CollapseError::UnknownPanel(name.to_string()))?;
        let mut panel = self.panels.remove(index);
        panel.unmount();
        debug!("Unmounted panel {name:?}");
        Ok(panel)
    }

    /// Header click on `name`. Registry changes are applied to every panel
    /// before returning, so the start height is visible immediately.
    pub fn click(&mut self, name: &str) -> Result<bool, CollapseError> {
        let requested = {
            let panel = self
                .panel(name)
                .ok_or_else(|| CollapseError::UnknownPanel(name.to_string()))?;
            panel.click(&self.registry)
        };
        if requested {
            self.sync_all(Instant::now());
        }
        Ok(requested)
    }

    pub fn set_content(&mut self, name: &str, content: Vec<Element>) -> Result<(), CollapseError> {
        self.panel_mut(name)?.set_content(content, Instant::now());
        Ok(())
    }

    /// Earliest pending animation step or probe across all panels.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.panels.iter().filter_map(Panel::next_deadline).min()
    }

    /// Nothing scheduled, no probe in flight and no unseen registry change.
    pub fn is_idle(&self) -> bool {
        self.next_deadline().is_none()
            && self.in_flight == 0
            && !self.revision.has_changed().unwrap_or(false)
    }

    /// Wait for the next registry change, probe result or deadline and apply it.
    pub async fn step(&mut self) {
        let deadline = self.next_deadline();

        tokio::select! {
            Ok(()) = self.revision.changed() => {
                self.sync_all(Instant::now());
            }
            Some(result) = self.results_rx.recv() => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.apply_probe(result);
            }
            _ = sleep_until_optional(deadline) => {
                self.poll_due(Instant::now());
            }
        }
    }

    /// Step until idle.
    pub async fn settle(&mut self) {
        while !self.is_idle() {
            self.step().await;
        }
    }

    pub fn render(&self) -> Element {
        Element::box_()
            .class("nut-collapse")
            .children(self.panels.iter().map(|p| p.render(&self.registry)))
    }

    fn sync_all(&mut self, now: Instant) {
        self.revision.borrow_and_update();
        for panel in &mut self.panels {
            panel.sync(&self.registry, now);
        }
    }

    fn poll_due(&mut self, now: Instant) {
        let mut requests = Vec::new();
        for panel in &mut self.panels {
            panel.poll(now);
            if let Some(request) = panel.take_probe(now) {
                requests.push(request);
            }
        }
        for request in requests {
            self.spawn_probe(request);
        }
    }

    fn spawn_probe(&mut self, request: ProbeRequest) {
        let prober = Arc::clone(&self.prober);
        let tx = self.results_tx.clone();
        self.in_flight += 1;
        trace!("Probing {} (seq {})", request.target, request.seq);

        tokio::spawn(async move {
            let measurement = prober.measure(&request.target).await;
            let content_id = request.target.trim_start_matches('#').to_string();
            // Receiver gone means the driver was dropped.
            let _ = tx.send(ProbeResult {
                content_id,
                seq: request.seq,
                measurement,
            });
        });
    }

    fn apply_probe(&mut self, result: ProbeResult) {
        match self
            .panels
            .iter_mut()
            .find(|p| p.content_id() == result.content_id)
        {
            Some(panel) => {
                panel.apply_measurement(result.seq, result.measurement);
            }
            None => trace!("Dropping probe result for {}", result.content_id),
        }
    }
}

/// Sleep until a deadline, or wait forever if None.
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => std::future::pending::<()>().await,
    }
}
