//! Core types for paneflow.
//!
//! Geometry, color, alignment and input types shared by every module.
//! All coordinates use a bottom-left origin: `(x0, y0)` is the bottom-left
//! corner of a box and `(x1, y1)` the top-right one.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create from 0xRRGGBB integer format.
    ///
    /// ```
    /// use paneflow::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_rgb_int(0x282a36), Rgba::rgb(40, 42, 54));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use paneflow::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert_eq!(Rgba::from_hex("ff000080"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box `(x0, y0)-(x1, y1)`.
///
/// Bottom-left origin. Boxes are half-open: a point on the right or top edge
/// is outside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A box of the given size with its bottom-left corner at the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Half-open containment test: `x0 <= x < x1 && y0 <= y < y1`.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }

    /// The `(lo, hi)` span of this box along an axis.
    #[inline]
    pub fn span(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.x0, self.x1),
            Axis::Vertical => (self.y0, self.y1),
        }
    }

    /// Copy of this box with the span along `axis` replaced.
    pub fn with_span(&self, axis: Axis, lo: f32, hi: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(lo, self.y0, hi, self.y1),
            Axis::Vertical => Self::new(self.x0, lo, self.x1, hi),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Stacking direction of a linear layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal placement of a view's active box inside its allocated box.
///
/// `Left`, `Center` and `Right` give the active box exactly the derived
/// width; `Fill` takes the whole allocated width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left = 1,
    Center = 2,
    Right = 3,
    #[default]
    Fill = 4,
}

/// Vertical placement of a view's active box inside its allocated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Bottom = 1,
    Center = 2,
    Top = 3,
    #[default]
    Fill = 4,
}

/// Axis-independent alignment used by [`crate::view::calc_axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Center,
    End,
    Fill,
}

impl From<HAlign> for Align {
    fn from(value: HAlign) -> Self {
        match value {
            HAlign::Left => Align::Start,
            HAlign::Center => Align::Center,
            HAlign::Right => Align::End,
            HAlign::Fill => Align::Fill,
        }
    }
}

impl From<VAlign> for Align {
    fn from(value: VAlign) -> Self {
        match value {
            VAlign::Bottom => Align::Start,
            VAlign::Center => Align::Center,
            VAlign::Top => Align::End,
            VAlign::Fill => Align::Fill,
        }
    }
}

impl TryFrom<u8> for HAlign {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(HAlign::Left),
            2 => Ok(HAlign::Center),
            3 => Ok(HAlign::Right),
            4 => Ok(HAlign::Fill),
            _ => Err(Error::AlignOutOfRange { axis: "horizontal", code }),
        }
    }
}

impl TryFrom<u8> for VAlign {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(VAlign::Bottom),
            2 => Ok(VAlign::Center),
            3 => Ok(VAlign::Top),
            4 => Ok(VAlign::Fill),
            _ => Err(Error::AlignOutOfRange { axis: "vertical", code }),
        }
    }
}

impl FromStr for HAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(HAlign::Left),
            "center" => Ok(HAlign::Center),
            "right" => Ok(HAlign::Right),
            "fill" => Ok(HAlign::Fill),
            _ => Err(Error::UnknownAlign {
                axis: "horizontal",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for VAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom" => Ok(VAlign::Bottom),
            "center" => Ok(VAlign::Center),
            "top" => Ok(VAlign::Top),
            "fill" => Ok(VAlign::Fill),
            _ => Err(Error::UnknownAlign {
                axis: "vertical",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Input
// =============================================================================

bitflags::bitflags! {
    /// Mouse button mask. A single press carries one bit, a drag may carry
    /// several.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Outcome of delivering an event to a handler or a pane.
///
/// `Handled` stops propagation for that event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    #[default]
    Unhandled,
    Handled,
}

impl EventStatus {
    #[inline]
    pub const fn is_handled(self) -> bool {
        matches!(self, EventStatus::Handled)
    }
}
