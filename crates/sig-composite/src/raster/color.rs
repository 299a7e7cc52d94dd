//! Ink colors.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// An 8-bit RGB ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up one of the built-in [`SIGNATURE_COLORS`] by name
    /// (case-insensitive, `"dark blue"` and `"dark-blue"` both match).
    pub fn named(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        SIGNATURE_COLORS
            .iter()
            .find(|c| normalize_name(c.name) == wanted)
            .map(|c| c.rgb)
    }

    /// Parse either a hex string or a built-in color name.
    pub fn resolve(input: &str) -> Result<Self, ParseColorError> {
        match Self::named(input) {
            Some(rgb) => Ok(rgb),
            None => input.parse(),
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    ///
    /// ```
    /// use sig_composite::Rgb;
    ///
    /// let blue: Rgb = "#0066cc".parse().unwrap();
    /// assert_eq!(blue, Rgb::new(0x00, 0x66, 0xCC));
    ///
    /// let red: Rgb = "F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// A named ink color offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureColor {
    pub name: &'static str,
    pub rgb: Rgb,
}

/// Built-in ink palette, darkest first.
pub const SIGNATURE_COLORS: [SignatureColor; 7] = [
    SignatureColor {
        name: "Black",
        rgb: Rgb::new(0x00, 0x00, 0x00),
    },
    SignatureColor {
        name: "Blue",
        rgb: Rgb::new(0x00, 0x66, 0xCC),
    },
    SignatureColor {
        name: "Dark Blue",
        rgb: Rgb::new(0x00, 0x33, 0x99),
    },
    SignatureColor {
        name: "Red",
        rgb: Rgb::new(0xCC, 0x00, 0x00),
    },
    SignatureColor {
        name: "Dark Red",
        rgb: Rgb::new(0x99, 0x00, 0x00),
    },
    SignatureColor {
        name: "Green",
        rgb: Rgb::new(0x00, 0x66, 0x00),
    },
    SignatureColor {
        name: "Purple",
        rgb: Rgb::new(0x66, 0x00, 0x99),
    },
];
