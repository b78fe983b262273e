// Simple color struct, created from an unsigned 32 representing RRGGBBAA

use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Canvas fill/stroke styles take CSS strings, alpha is applied separately
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const PALETTE: [Color; 3] = [
    Color::from_u32(0xB01607ff),
    Color::from_u32(0x2C2AFFff),
    Color::from_u32(0x2C2AB0ff),
];

pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    PALETTE[rng.gen_range(0, PALETTE.len())]
}
