use crate::foundation::core::Rgba8Premul;

/// Straight-alpha RGBA8 color as written in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white, the neutral background fill.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a configuration color string.
    ///
    /// Accepted forms: `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b, a)` with
    /// `a` in `[0, 1]`, `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)` and a handful of CSS names.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = functional_args(&lower, "rgba").or_else(|| functional_args(&lower, "rgb")) {
            return parse_rgb_args(&args);
        }
        if let Some(args) = functional_args(&lower, "hsla").or_else(|| functional_args(&lower, "hsl")) {
            return parse_hsl_args(&args);
        }
        named(&lower).ok_or_else(|| format!("unrecognized color \"{s}\""))
    }

    /// Same color with its alpha multiplied by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// `#RRGGBB` form, for SVG paint attributes.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// Parse `value`, substituting `default` and logging a warning when it is invalid.
///
/// `None` yields `default` silently.
pub fn color_or_default(value: Option<&str>, default: Color, field: &str) -> Color {
    let Some(value) = value else {
        return default;
    };
    match Color::parse(value) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(
                field,
                value,
                default = %default.to_hex_rgb(),
                "invalid color, using default: {err}"
            );
            default
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let v = hex_byte(&ch.to_string())?;
                out[i] = v * 17;
            }
            Ok(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Color::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn functional_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start();
    let inner = inner.strip_prefix('(')?.strip_suffix(')')?;
    Some(
        inner
            .split(',')
            .map(|p| p.trim().to_string())
            .collect::<Vec<_>>(),
    )
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v = s
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number \"{s}\""))?;
    if !v.is_finite() {
        return Err(format!("invalid number \"{s}\""));
    }
    Ok(v)
}

fn parse_alpha(args: &[String]) -> Result<u8, String> {
    match args.get(3) {
        Some(a) => Ok((parse_number(a)?.clamp(0.0, 1.0) * 255.0).round() as u8),
        None => Ok(255),
    }
}

fn parse_rgb_args(args: &[String]) -> Result<Color, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err("rgb()/rgba() expects 3 or 4 components".to_owned());
    }
    let mut ch = [0u8; 3];
    for (i, slot) in ch.iter_mut().enumerate() {
        *slot = parse_number(&args[i])?.round().clamp(0.0, 255.0) as u8;
    }
    Ok(Color::rgba(ch[0], ch[1], ch[2], parse_alpha(args)?))
}

fn parse_hsl_args(args: &[String]) -> Result<Color, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err("hsl()/hsla() expects 3 or 4 components".to_owned());
    }
    let h = parse_number(&args[0])?;
    let s = parse_number(&args[1])? / 100.0;
    let l = parse_number(&args[2])? / 100.0;
    let (r, g, b) = hsl_to_rgb(h, s, l);
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    Ok(Color::rgba(to_u8(r), to_u8(g), to_u8(b), parse_alpha(args)?))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn named(s: &str) -> Option<Color> {
    let c = match s {
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "navy" => Color::rgb(0, 0, 128),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "yellow" => Color::rgb(255, 255, 0),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
