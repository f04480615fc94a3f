//! Screen regions and the tiling placement algorithm.
//!
//! A `Region` is a screen rectangle assigned to a visible group. The
//! placement algorithm partitions a region into equal slots along its
//! longer axis, one slot per window, with a uniform gap inset between
//! neighbours and the region edges.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Failure to parse a `WxH+X+Y` region token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid region `{0}`, expected `WxH+x+y`")]
pub struct ParseRegionError(pub String);

impl FromStr for Region {
    type Err = ParseRegionError;

    /// Parse the `WxH+X+Y` grammar, e.g. `1920x1080+0+0`.
    ///
    /// Width and height are unsigned; the offsets are signed, so a
    /// region left of the origin reads `1920x1080+-1920+0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRegionError(s.to_string());

        let (width, rest) = s.split_once('x').ok_or_else(err)?;
        let (height, rest) = rest.split_once('+').ok_or_else(err)?;
        let (x, y) = rest.split_once('+').ok_or_else(err)?;

        Ok(Region {
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Compute window placements for `count` windows tiled inside `region`.
///
/// A wide region (width > height) is partitioned into `count` equal-width
/// columns, a tall one into equal-height rows. Slot `i` belongs to the
/// window `i` positions below TOS. Each window is inset `gap / 2` from
/// its slot origin and shrunk by `gap` on the split axis and the full
/// region extent on the other, never below one pixel.
pub fn tile(count: usize, region: Region, gap: u32) -> Vec<Region> {
    if count == 0 {
        return Vec::new();
    }

    let inset = (gap / 2) as i32;
    if region.width > region.height {
        let slot = region.width / count as u32;
        (0..count as u32)
            .map(|i| Region {
                x: region.x + (i * slot) as i32 + inset,
                y: region.y + inset,
                width: slot.saturating_sub(gap).max(1),
                height: region.height.saturating_sub(gap).max(1),
            })
            .collect()
    } else {
        let slot = region.height / count as u32;
        (0..count as u32)
            .map(|i| Region {
                x: region.x + inset,
                y: region.y + (i * slot) as i32 + inset,
                width: region.width.saturating_sub(gap).max(1),
                height: slot.saturating_sub(gap).max(1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
