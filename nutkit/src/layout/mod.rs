mod rect;

use std::collections::HashMap;

pub use rect::Rect;

/// Element id to resolved rect, as produced by the host renderer's layout pass.
pub type LayoutResult = HashMap<String, Rect>;

/// A block height: a fixed length, or the content's intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Height {
    Px(u16),
    #[default]
    Auto,
}

impl Height {
    pub const ZERO: Height = Height::Px(0);

    pub const fn is_zero(&self) -> bool {
        matches!(self, Height::Px(0))
    }
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Height::Px(px) => write!(f, "{px}px"),
            Height::Auto => write!(f, "auto"),
        }
    }
}
