use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use nutkit::{
    Collapse, CollapseItem, ExpansionRegistry, LayoutProber, LayoutResult, Rect, Timing,
    TrendArrow,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::time::Instant;

/// Pretend layout pass: every content node is as tall as its line count.
fn layout_pass(collapse: &Collapse<LayoutProber>) -> LayoutResult {
    collapse
        .panels()
        .iter()
        .map(|p| {
            let lines = p.item().content().len() as u16;
            (p.content_id().to_string(), Rect::from_size(40, lines))
        })
        .collect()
}

fn report(collapse: &Collapse<LayoutProber>, started: Instant) {
    let elapsed = started.elapsed().as_millis();
    for panel in collapse.panels() {
        println!(
            "{elapsed:>5}ms  {:<8} height={:<6} icon={:>3}°  {:?}",
            panel.name(),
            panel.visible_height().to_string(),
            panel.icon_rotation(),
            panel.phase(),
        );
    }
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Set up file logging
    let log_file = File::create("accordion.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let registry = ExpansionRegistry::accordion().with_expanded(["market"]);
    let prober = LayoutProber::new();
    let mut collapse = Collapse::new(registry, Arc::new(prober.clone()), Timing::default())?;

    let change = TrendArrow::new(12.325).symbol(true);
    collapse.mount(
        CollapseItem::new("market")
            .title("Market")
            .extra(change.text())
            .text("Index up on the day")
            .text("Volume above average"),
    )?;
    collapse.mount(
        CollapseItem::new("news")
            .title("News")
            .text("Quiet session")
            .text("No announcements")
            .text("Check back later"),
    )?;
    collapse.mount(
        CollapseItem::new("archive")
            .title("Archive")
            .disabled(true)
            .text("Locked"),
    )?;

    let started = Instant::now();
    prober.publish(layout_pass(&collapse));
    collapse.settle().await;
    report(&collapse, started);

    // Opening "news" closes "market"; the disabled panel ignores clicks.
    collapse.click("news")?;
    collapse.click("archive")?;
    report(&collapse, started);
    while !collapse.is_idle() {
        collapse.step().await;
        report(&collapse, started);
    }

    Ok(())
}
