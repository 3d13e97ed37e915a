//! Hue, saturation, and lightness adjustment functions.
//!
//! All four registered functions are thin argument-shaping wrappers over
//! one adjustment routine: parse the color literal to RGB, shift the HSL
//! channels by percentage deltas, convert back.

use horizon_prism_color::{Rgb, keyword};

use crate::functions::Context;
use crate::split::split_list;

/// `hsl-adjust(color, h, s, l)`: shift all three channels.
pub fn hsl_adjust(input: &str, _context: &Context) -> String {
    let args = split_list(input, ',');
    adjust(first(&args), [delta(&args, 1), delta(&args, 2), delta(&args, 3)])
}

/// `h-adjust(color, h)`: shift the hue channel only.
pub fn h_adjust(input: &str, _context: &Context) -> String {
    let args = split_list(input, ',');
    adjust(first(&args), [delta(&args, 1), None, None])
}

/// `s-adjust(color, s)`: shift the saturation channel only.
pub fn s_adjust(input: &str, _context: &Context) -> String {
    let args = split_list(input, ',');
    adjust(first(&args), [None, delta(&args, 1), None])
}

/// `l-adjust(color, l)`: shift the lightness channel only.
pub fn l_adjust(input: &str, _context: &Context) -> String {
    let args = split_list(input, ',');
    adjust(first(&args), [None, None, delta(&args, 1)])
}

fn first(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("")
}

fn delta(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str)
}

/// Apply `[h, s, l]` percentage deltas to a color literal.
///
/// Hex, `rgb()`, `rgba()`, and keyword colors are adjusted; anything else
/// (including `hsl()` forms) passes through unchanged. A missing delta
/// counts as zero; each adjusted channel clamps to the unit range, so the
/// hue saturates rather than wrapping.
pub(crate) fn adjust(color: &str, deltas: [Option<&str>; 3]) -> String {
    let Some((rgb, alpha)) = parse_color(color) else {
        return color.to_string();
    };

    let mut hsl = rgb.to_hsl();
    let channels = [&mut hsl.h, &mut hsl.s, &mut hsl.l];
    for (channel, delta) in channels.into_iter().zip(deltas) {
        let shift = delta
            .map(|value| value.replace('%', "").trim().parse::<f64>().unwrap_or(0.0))
            .unwrap_or(0.0)
            / 100.0;
        *channel = (*channel + shift).clamp(0.0, 1.0);
    }

    let rgb = hsl.to_rgb();
    match alpha {
        None => rgb.to_hex(),
        Some(alpha) => format!(
            "rgba({},{},{},{alpha})",
            rgb.r.round() as i64,
            rgb.g.round() as i64,
            rgb.b.round() as i64,
        ),
    }
}

/// Classify the literal and extract an RGB triple, plus the verbatim
/// alpha component for `rgba()` input.
fn parse_color(color: &str) -> Option<(Rgb, Option<String>)> {
    if color.starts_with('#') {
        return Rgb::from_hex(color).map(|rgb| (rgb, None));
    }
    if let Some(body) = color.strip_prefix("rgba") {
        let mut components = component_list(body);
        let alpha = components.pop();
        return Some((normalize(&components), alpha));
    }
    if let Some(body) = color.strip_prefix("rgb") {
        let components = component_list(body);
        return Some((normalize(&components), None));
    }
    keyword(color).map(|rgb| (rgb, None))
}

fn component_list(body: &str) -> Vec<String> {
    let body = body.trim();
    let body = body.strip_prefix('(').unwrap_or(body);
    let body = body.strip_suffix(')').unwrap_or(body);
    body.split(',').map(|c| c.trim().to_string()).collect()
}

fn normalize(components: &[String]) -> Rgb {
    let refs: Vec<&str> = components.iter().map(String::as_str).collect();
    Rgb::from_css_components(&refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::tokens::TokenStore;

    fn run(handler: fn(&str, &Context) -> String, input: &str) -> String {
        let options = Options::default();
        let tokens = TokenStore::new();
        let context = Context {
            options: &options,
            tokens: &tokens,
        };
        handler(input, &context)
    }

    #[test]
    fn hue_shift_of_red_gives_cyan() {
        assert_eq!(run(h_adjust, "#ff0000, 50%"), "#00ffff");
    }

    #[test]
    fn hue_shift_leaves_other_channels() {
        // Same shift with or without the percent sign
        assert_eq!(run(h_adjust, "#ff0000, 50"), "#00ffff");
    }

    #[test]
    fn lightness_shift() {
        assert_eq!(run(l_adjust, "#ff0000, 10"), "#ff3333");
    }

    #[test]
    fn desaturation_to_gray() {
        assert_eq!(run(s_adjust, "#ff0000, -100"), "#808080");
    }

    #[test]
    fn zero_deltas_round_trip() {
        assert_eq!(run(hsl_adjust, "#336699, 0, 0, 0"), "#336699");
        assert_eq!(run(hsl_adjust, "#336699"), "#336699");
    }

    #[test]
    fn keyword_colors_resolve() {
        assert_eq!(run(h_adjust, "red, 50%"), "#00ffff");
    }

    #[test]
    fn rgba_keeps_alpha_verbatim() {
        assert_eq!(
            run(hsl_adjust, "rgba( 255, 0, 0, .5), 50%, 0, 0"),
            "rgba(0,255,255,.5)"
        );
    }

    #[test]
    fn rgb_input_emits_hex() {
        assert_eq!(run(h_adjust, "rgb( 255, 0, 0), 50%"), "#00ffff");
    }

    #[test]
    fn hsl_forms_pass_through() {
        assert_eq!(
            run(hsl_adjust, "hsl(120, 50%, 50%), 10"),
            "hsl(120, 50%, 50%)"
        );
    }

    #[test]
    fn unknown_literals_pass_through() {
        assert_eq!(run(h_adjust, "currentColor, 10"), "currentColor");
        assert_eq!(run(h_adjust, ""), "");
    }

    #[test]
    fn hue_clamps_instead_of_wrapping() {
        // +120% hue clamps at 1.0, which is the same angle as 0
        assert_eq!(run(h_adjust, "#ff0000, 120"), "#ff0000");
    }
}
