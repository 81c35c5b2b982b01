pub mod animation;
pub mod collapse;
pub mod color;
pub mod config;
pub mod element;
pub mod layout;
pub mod probe;
pub mod registry;
pub mod trend;

pub use animation::{HeightAnimator, Phase};
pub use collapse::{Collapse, CollapseError, CollapseItem, Panel, ProbeRequest};
pub use color::{ColorError, Rgb};
pub use config::{ConfigError, Timing};
pub use element::{Content, Element, find_all_by_class, find_by_class, find_element};
pub use layout::{Height, LayoutResult, Rect};
pub use probe::{LayoutProber, Measurement, SizeProber};
pub use registry::{DEFAULT_EXPAND_ICON, ExpansionRegistry};
pub use trend::{ArrowPosition, Trend, TrendArrow};
