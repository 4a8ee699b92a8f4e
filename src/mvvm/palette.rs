use rand::Rng;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors the title background can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Red,
    Green,
    Yellow,
    Brown,
    Blue,
    Cyan,
    Orange,
    Gray,
    Purple,
    Link,
}

impl NamedColor {
    /// Terminal color used when rendering
    pub fn to_color(self) -> Color {
        match self {
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Brown => Color::Rgb(162, 132, 94),
            NamedColor::Blue => Color::Blue,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::Orange => Color::Rgb(255, 149, 0),
            NamedColor::Gray => Color::Gray,
            NamedColor::Purple => Color::Rgb(175, 82, 222),
            NamedColor::Link => Color::Rgb(0, 122, 255),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Brown => "brown",
            NamedColor::Blue => "blue",
            NamedColor::Cyan => "cyan",
            NamedColor::Orange => "orange",
            NamedColor::Gray => "gray",
            NamedColor::Purple => "purple",
            NamedColor::Link => "link",
        }
    }
}

impl std::fmt::Display for NamedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed ten-color palette
pub struct Palette;

impl Palette {
    pub const COLORS: [NamedColor; 10] = [
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Brown,
        NamedColor::Blue,
        NamedColor::Cyan,
        NamedColor::Orange,
        NamedColor::Gray,
        NamedColor::Purple,
        NamedColor::Link,
    ];

    /// Pick a color uniformly at random. Consecutive picks may repeat.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> NamedColor {
        Self::COLORS[rng.gen_range(0..Self::COLORS.len())]
    }

    pub fn contains(color: NamedColor) -> bool {
        Self::COLORS.contains(&color)
    }
}
