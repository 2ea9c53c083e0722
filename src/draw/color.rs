//! RGBA color type used for shape styling.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use mapselect::draw::Color;
/// let blue = Color::from_hex("#3388ff").unwrap();
/// assert_eq!(blue.to_hex(), "#3388ff");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Parses a `#rrggbb` or `#rgb` hex string (leading `#` optional).
    ///
    /// Returns `None` for anything else; the alpha component is always 1.0.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
        match digits.len() {
            6 => Some(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
                a: 1.0,
            }),
            3 => {
                let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&doubled)
            }
            _ => None,
        }
    }

    /// Formats the color as lowercase `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Default rectangle stroke (#3388ff).
pub const DEFAULT_STROKE: Color = Color {
    r: 0x33 as f64 / 255.0,
    g: 0x88 as f64 / 255.0,
    b: 1.0,
    a: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#3388ff"), Some(DEFAULT_STROKE));
        assert_eq!(Color::from_hex("fff").map(|c| c.to_hex()), Some("#ffffff".into()));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("").is_none());
    }
}
