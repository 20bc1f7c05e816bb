//! RGB565 colour encoding and the magnitude heat map.

use crate::{Error, Result};

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const RED: u16 = 0x1F << 11;
pub const GREEN: u16 = 0x3F << 5;
pub const BLUE: u16 = 0x1F;
pub const YELLOW: u16 = RED | GREEN;
pub const CYAN: u16 = GREEN | BLUE;
pub const MAGENTA: u16 = BLUE | RED;

/// Full-scale input to [`map_magnitude_to_colour`].
pub const MAGNITUDE_MAX: u16 = u16::MAX;

/// Width of each of the four heat map bands.
const BAND_SPAN: u32 = (MAGNITUDE_MAX as u32 + 1) / 4;

/// Packs 8-bit scale channels into an RGB565 colour word.
///
/// Each channel keeps only its top 5 (red, blue) or 6 (green) bits of the
/// 8-bit scale. Bits above that range are masked off rather than saturated,
/// so `make_colour(0x100, 0, 0)` is black. Use [`try_make_colour`] to reject
/// such input instead.
#[inline]
pub fn make_colour(r: u32, g: u32, b: u32) -> u16 {
    let r5 = ((r >> 3) & 0x1F) as u16;
    let g6 = ((g >> 2) & 0x3F) as u16;
    let b5 = ((b >> 3) & 0x1F) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Strict variant of [`make_colour`] that fails on channels above 0xFF.
pub fn try_make_colour(r: u32, g: u32, b: u32) -> Result<u16> {
    for (channel, value) in [('R', r), ('G', g), ('B', b)] {
        if value > 0xFF {
            return Err(Error::ChannelRange { channel, value });
        }
    }
    Ok(make_colour(r, g, b))
}

/// Converts an RGB565 colour word back to RGB888.
#[inline]
pub fn colour_to_rgb(colour: u16) -> (u8, u8, u8) {
    let r = ((colour >> 11) & 0x1F) as u8;
    let g = ((colour >> 5) & 0x3F) as u8;
    let b = (colour & 0x1F) as u8;
    // Expand to 8-bit
    let r8 = (r << 3) | (r >> 2);
    let g8 = (g << 2) | (g >> 4);
    let b8 = (b << 3) | (b >> 2);
    (r8, g8, b8)
}

/// Parses a hex colour string (`#RRGGBB` or `RRGGBB`) to RGB565.
pub fn parse_hex_colour(hex: &str) -> Option<u16> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(make_colour(r.into(), g.into(), b.into()))
}

/// Maps a magnitude in `0..=MAGNITUDE_MAX` onto a blue-cyan-green-yellow-red
/// heat scale.
///
/// The input range is split into four equal bands. Within each band one
/// channel ramps linearly while the others are held at zero or full scale:
///
/// | band | from   | to     | ramp        |
/// |------|--------|--------|-------------|
/// | 0    | blue   | cyan   | green rises |
/// | 1    | cyan   | green  | blue falls  |
/// | 2    | green  | yellow | red rises   |
/// | 3    | yellow | red    | green falls |
pub fn map_magnitude_to_colour(mag: u16) -> u16 {
    let mag = u32::from(mag);
    let band = mag / BAND_SPAN;
    // Position within the band scaled to 0..=255
    let t = (mag % BAND_SPAN) * 0xFF / (BAND_SPAN - 1);

    match band {
        0 => make_colour(0, t, 0xFF),
        1 => make_colour(0, 0xFF, 0xFF - t),
        2 => make_colour(t, 0xFF, 0),
        _ => make_colour(0xFF, 0xFF - t, 0),
    }
}
