use std::{fmt, str::FromStr};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let named = match value.to_ascii_lowercase().as_str() {
            "red" => Some(Color::rgb(0xFF, 0x00, 0x00)),
            "blue" => Some(Color::rgb(0x00, 0x00, 0xFF)),
            "green" => Some(Color::rgb(0x00, 0x9D, 0x4E)),
            "black" => Some(Color::rgb(0x00, 0x00, 0x00)),
            "gray" | "grey" => Some(Color::rgb(0xBA, 0xBA, 0xBA)),
            "orange" => Some(Color::rgb(0xE1, 0x6A, 0x2C)),
            "purple" => Some(Color::rgb(0x81, 0x4E, 0xD1)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!(
                "Invalid color '{}': expected #RRGGBB or a color name",
                s
            ));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "#{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue
        )
    }
}
