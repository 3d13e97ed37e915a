//! Color conversion math for Horizon Prism.
//!
//! This crate provides the conversions the preprocessor's color-adjustment
//! functions are built on: hex literals, `rgb()`/`rgba()` component lists,
//! CSS color keywords, and the RGB/HSL transforms between them.
//!
//! RGB components are carried as floats in the 0-255 range so that
//! percentage components survive normalization without premature rounding;
//! HSL channels are unit floats.

pub mod keywords;

pub use keywords::keyword;

/// An RGB triple with components in the 0-255 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a new RGB value.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` hex literal.
    ///
    /// Returns `None` for any other length or for non-hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let hex = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return None,
        };

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r as f64, g as f64, b as f64))
    }

    /// Normalize `rgb()`/`rgba()` component strings to a 0-255 triple.
    ///
    /// Percentage components are scaled to the 0-255 range and rounded,
    /// plain numbers are taken as-is, and anything unparseable counts as
    /// zero. Every component is clamped to 0-255.
    pub fn from_css_components(components: &[&str]) -> Self {
        let mut channels = [0.0f64; 3];
        for (channel, component) in channels.iter_mut().zip(components) {
            let component = component.trim();
            let value = if let Some(percentage) = component.strip_suffix('%') {
                let scale: f64 = percentage.trim().parse().unwrap_or(0.0);
                (scale / 100.0 * 255.0).round()
            } else {
                component.parse().unwrap_or(0.0)
            };
            *channel = value.clamp(0.0, 255.0);
        }
        Self::new(channels[0], channels[1], channels[2])
    }

    /// Format as a lowercase `#rrggbb` literal, rounding each component.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b)
        )
    }

    /// Convert to HSL with unit-range channels.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic
            return Hsl::new(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h / 6.0, s, l)
    }
}

fn channel_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// An HSL triple with all channels in the unit range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL value.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert back to RGB, rounding each component to a whole number.
    pub fn to_rgb(&self) -> Rgb {
        if self.s == 0.0 {
            // Achromatic
            let value = (self.l * 255.0).round();
            return Rgb::new(value, value, value);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        let r = hue_to_channel(p, q, self.h + 1.0 / 3.0);
        let g = hue_to_channel(p, q, self.h);
        let b = hue_to_channel(p, q, self.h - 1.0 / 3.0);

        Rgb::new(
            (r * 255.0).round(),
            (g * 255.0).round(),
            (b * 255.0).round(),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
