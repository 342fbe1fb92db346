use crate::Sample;
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn to_sample(self) -> Sample {
        Sample::from_channels([self.r, self.g, self.b, self.a])
    }

    pub const fn from_sample(sample: Sample) -> Self {
        let [r, g, b, a] = sample.channels();
        Self { r, g, b, a }
    }

    /// Blend `self` over `base` with `coverage` in `0.0..=1.0`.
    pub fn over(self, base: Self, coverage: f32) -> Self {
        let coverage = coverage.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| {
            (f32::from(top) * coverage + f32::from(bottom) * (1.0 - coverage)).round() as u8
        };

        Self {
            r: mix(self.r, base.r),
            g: mix(self.g, base.g),
            b: mix(self.b, base.b),
            a: mix(self.a, base.a),
        }
    }
}

/// Palette for the decorative parts of an encoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Color,
    pub thumbnail: Color,
    pub background: Color,
    pub border: Color,
}

impl Theme {
    pub const SKY: Self = Self {
        foreground: Color::BLACK,
        thumbnail: Color::BLACK,
        background: Color::rgb(101, 190, 235),
        border: Color::rgb(50, 144, 172),
    };

    pub const SLATE: Self = Self {
        foreground: Color::BLACK,
        thumbnail: Color::BLACK,
        background: Color::rgb(131, 161, 168),
        border: Color::rgb(58, 93, 102),
    };

    pub const MIDNIGHT: Self = Self {
        foreground: Color::rgb(239, 240, 245),
        thumbnail: Color::rgb(201, 79, 65),
        background: Color::rgb(46, 48, 61),
        border: Color::BLACK,
    };

    pub const OCEAN: Self = Self {
        foreground: Color::WHITE,
        thumbnail: Color::BLACK,
        background: Color::rgb(65, 110, 159),
        border: Color::rgb(25, 72, 129),
    };

    pub const STEEL: Self = Self {
        foreground: Color::rgb(238, 238, 238),
        thumbnail: Color::BLACK,
        background: Color::rgb(76, 107, 134),
        border: Color::BLACK,
    };

    pub const PRESETS: [(&'static str, Self); 5] = [
        ("sky", Self::SKY),
        ("slate", Self::SLATE),
        ("midnight", Self::MIDNIGHT),
        ("ocean", Self::OCEAN),
        ("steel", Self::STEEL),
    ];
}

impl Default for Theme {
    fn default() -> Self {
        Self::SKY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = Theme::PRESETS.iter().map(|(name, _)| *name).collect();
        write!(f, "unknown theme '{}', expected one of: {}", self.0, names.join(", "))
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRESETS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, theme)| *theme)
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}
