//! The collapse panel widget.
//!
//! - [`CollapseItem`]: props for one panel (title, extra, content, icon)
//! - [`Panel`]: a mounted panel, gluing registry, animator and prober results
//! - [`Collapse`]: async driver running a group of panels on tokio

mod driver;
mod item;
mod panel;

use thiserror::Error;

use crate::config::ConfigError;

pub use driver::Collapse;
pub use item::CollapseItem;
pub use panel::{Panel, ProbeRequest};

#[derive(Debug, Error)]
pub enum CollapseError {
    #[error("no mounted panel named {0:?}")]
    UnknownPanel(String),

    #[error("a panel named {0:?} is already mounted")]
    DuplicatePanel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
