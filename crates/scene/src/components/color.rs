use std::fmt;

/// 24-bit RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    pub input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: expected #rrggbb", self.input)
    }
}

impl std::error::Error for ParseColorError {}

impl Color {
    pub const BLACK: Self = Self::from_u32(0x000000);
    pub const GREEN: Self = Self::from_u32(0x00ff00);
    pub const RED: Self = Self::from_u32(0xff0000);
    pub const YELLOW: Self = Self::from_u32(0xffff00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError {
            input: input.to_string(),
        };
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|_| err())?;
        Ok(Self::from_u32(rgb))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#00ff00"), Ok(Color::GREEN));
        assert_eq!(Color::from_hex("FFFF00"), Ok(Color::YELLOW));
        assert_eq!(Color::RED.to_hex(), "#ff0000");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
    }
}
