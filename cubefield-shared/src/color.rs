use thiserror::Error;

/// Largest packed 24-bit RGB value.
pub const MAX_HEX: u32 = 0xffffff;

/// Linear RGB color with components in [0, 1].
///
/// Colors are written to the framebuffer as-is (no sRGB conversion), so a
/// hex value round-trips to the same on-screen pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("expected 3 or 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        let hex = hex & MAX_HEX;
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| ((c.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xff;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Color from a uniform sample `r` in [0, 1): `floor(0xffffff * r)`.
    pub fn from_unit_random(r: f32) -> Self {
        let r = r.clamp(0.0, 1.0) as f64;
        let hex = (MAX_HEX as f64 * r).floor() as u32;
        Self::from_hex(hex.min(MAX_HEX))
    }

    /// Parse `#rrggbb`, `#rgb`, or either form without the leading `#`.
    pub fn parse_hex_str(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let hex = match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?,
            3 => {
                // #abc expands to #aabbcc
                let short = u32::from_str_radix(digits, 16)
                    .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;
                let r = (short >> 8) & 0xf;
                let g = (short >> 4) & 0xf;
                let b = short & 0xf;
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            n => return Err(ColorParseError::BadLength(n)),
        };

        Ok(Self::from_hex(hex))
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hex packing ──

    #[test]
    fn test_from_hex_white_and_black() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn test_to_hex_preserves_channels() {
        for hex in [0x282828, 0x12ab34, 0xff0000, 0x00ff00, 0x0000ff] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex, "hex {hex:06x}");
        }
    }

    #[test]
    fn test_from_hex_ignores_high_bits() {
        assert_eq!(Color::from_hex(0xff_123456), Color::from_hex(0x123456));
    }

    // ── random ──

    #[test]
    fn test_unit_random_bounds() {
        assert_eq!(Color::from_unit_random(0.0).to_hex(), 0);
        assert!(Color::from_unit_random(0.999_999).to_hex() <= MAX_HEX);
        assert!(Color::from_unit_random(1.0).to_hex() <= MAX_HEX);
    }

    #[test]
    fn test_unit_random_midpoint() {
        // floor(0xffffff * 0.5) = 0x7fffff
        assert_eq!(Color::from_unit_random(0.5).to_hex(), 0x7fffff);
    }

    // ── parsing ──

    #[test]
    fn test_parse_long_form() {
        assert_eq!(Color::parse_hex_str("#ff8000").unwrap().to_hex(), 0xff8000);
        assert_eq!(Color::parse_hex_str("ff8000").unwrap().to_hex(), 0xff8000);
        assert_eq!(Color::parse_hex_str("  #FF8000 ").unwrap().to_hex(), 0xff8000);
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(Color::parse_hex_str("#f80").unwrap().to_hex(), 0xff8800);
        assert_eq!(Color::parse_hex_str("#fff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse_hex_str(""), Err(ColorParseError::Empty));
        assert_eq!(Color::parse_hex_str("#"), Err(ColorParseError::Empty));
        assert_eq!(Color::parse_hex_str("#ffff"), Err(ColorParseError::BadLength(4)));
        assert!(matches!(
            Color::parse_hex_str("#gg0000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            Color::parse_hex_str("+12345"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }
}
