//! Fixed confetti palette.

/// A named color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub hex:  u32,
}

impl Swatch {
    /// Channels as `[r, g, b]` in `[0, 1]`.
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.hex >> 16) & 0xFF) as f32 / 255.0,
            ((self.hex >>  8) & 0xFF) as f32 / 255.0,
            ( self.hex        & 0xFF) as f32 / 255.0,
        ]
    }
}

pub const PALETTE: [Swatch; 6] = [
    Swatch { name: "green",   hex: 0x008000 },
    Swatch { name: "aqua",    hex: 0x00FFFF },
    Swatch { name: "crimson", hex: 0xDC143C },
    Swatch { name: "hotpink", hex: 0xFF69B4 },
    Swatch { name: "purple",  hex: 0x800080 },
    Swatch { name: "yellow",  hex: 0xFFFF00 },
];

/// Pack `[r, g, b]` in `[0, 1]` into opaque `0xAARRGGBB`.
pub fn rgb_to_argb(rgb: [f32; 3]) -> u32 {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    0xFF000000 | (q(rgb[0]) << 16) | (q(rgb[1]) << 8) | q(rgb[2])
}
