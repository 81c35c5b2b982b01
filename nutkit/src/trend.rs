//! Trend arrow: a percentage with an up/down indicator.

use crate::color::Rgb;
use crate::element::Element;

const CLASS_PREFIX: &str = "nut-trendarrow";

/// Direction of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rise,
    Drop,
    Flat,
}

/// Which side of the value the arrow is drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrowPosition {
    #[default]
    Before,
    After,
}

#[derive(Debug, Clone)]
pub struct TrendArrow {
    value: f64,
    digits: usize,
    symbol: bool,
    show_zero: bool,
    arrow: ArrowPosition,
    sync_color: bool,
    color: Rgb,
    rise_color: Rgb,
    drop_color: Rgb,
}

impl TrendArrow {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            digits: 2,
            symbol: false,
            show_zero: true,
            arrow: ArrowPosition::Before,
            sync_color: true,
            color: Rgb::new(0x33, 0x33, 0x33),
            rise_color: Rgb::new(0xfa, 0x2c, 0x19),
            drop_color: Rgb::new(0x64, 0xb5, 0x78),
        }
    }

    /// Decimal places in the rendered percentage.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Prefix non-zero values with `+` or `-`.
    pub fn symbol(mut self, symbol: bool) -> Self {
        self.symbol = symbol;
        self
    }

    /// Render zero as a number instead of `--`.
    pub fn show_zero(mut self, show_zero: bool) -> Self {
        self.show_zero = show_zero;
        self
    }

    pub fn arrow(mut self, position: ArrowPosition) -> Self {
        self.arrow = position;
        self
    }

    /// Color the value like its arrow instead of with the neutral color.
    pub fn sync_color(mut self, sync: bool) -> Self {
        self.sync_color = sync;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn rise_color(mut self, color: Rgb) -> Self {
        self.rise_color = color;
        self
    }

    pub fn drop_color(mut self, color: Rgb) -> Self {
        self.drop_color = color;
        self
    }

    pub fn trend(&self) -> Trend {
        if !self.value.is_finite() || self.value == 0.0 {
            Trend::Flat
        } else if self.value > 0.0 {
            Trend::Rise
        } else {
            Trend::Drop
        }
    }

    /// The rendered value, e.g. `+12.33%` or `--`.
    pub fn text(&self) -> String {
        if !self.value.is_finite() || (self.value == 0.0 && !self.show_zero) {
            return "--".to_string();
        }

        let sign = match self.trend() {
            Trend::Rise if self.symbol => "+",
            Trend::Drop if self.symbol => "-",
            _ => "",
        };
        format!("{sign}{}%", round_half_up(self.value.abs(), self.digits))
    }

    pub fn value_color(&self) -> Rgb {
        match self.trend() {
            Trend::Rise if self.sync_color => self.rise_color,
            Trend::Drop if self.sync_color => self.drop_color,
            _ => self.color,
        }
    }

    pub fn arrow_color(&self) -> Option<Rgb> {
        match self.trend() {
            Trend::Rise => Some(self.rise_color),
            Trend::Drop => Some(self.drop_color),
            Trend::Flat => None,
        }
    }

    pub fn render(&self) -> Element {
        let value = Element::text(self.text())
            .class(format!("{CLASS_PREFIX}__value"))
            .foreground(self.value_color());

        let arrow = self.arrow_color().map(|color| {
            let glyph = if self.trend() == Trend::Rise { "▲" } else { "▼" };
            let side = match self.arrow {
                ArrowPosition::Before => "before",
                ArrowPosition::After => "after",
            };
            Element::text(glyph)
                .class(format!("{CLASS_PREFIX}__icon-{side}"))
                .foreground(color)
        });

        let root = Element::box_().class(CLASS_PREFIX);
        match (arrow, self.arrow) {
            (Some(arrow), ArrowPosition::Before) => root.child(arrow).child(value),
            (Some(arrow), ArrowPosition::After) => root.child(value).child(arrow),
            (None, _) => root.child(value),
        }
    }
}

/// Format `value` with `digits` decimals, rounding halves away from zero.
///
/// `12.325` is stored as `12.32499..`, but the scaled product rounds to
/// exactly `1232.5`, which `round` then takes up as written.
fn round_half_up(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.digits$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.325, 2), "12.33");
        assert_eq!(round_half_up(12.325, 1), "12.3");
        assert_eq!(round_half_up(0.0, 2), "0.00");
        assert_eq!(round_half_up(1.005, 0), "1");
        // Exact halves go up.
        assert_eq!(round_half_up(0.125, 2), "0.13");
        assert_eq!(round_half_up(2.5, 0), "3");
    }

    #[test]
    fn test_nan_is_placeholder() {
        let arrow = TrendArrow::new(f64::NAN);
        assert_eq!(arrow.text(), "--");
        assert_eq!(arrow.trend(), Trend::Flat);
        assert_eq!(arrow.arrow_color(), None);
    }
}
