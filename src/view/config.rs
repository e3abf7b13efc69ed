//! View configuration.
//!
//! [`ViewConfig`] is the construction-time surface of a view: every attribute
//! may be a literal or an existing [`Slot`](crate::reactive::Slot) to bind
//! live. Attributes left unset fall back to the defaults of the kind of view
//! being built (images center themselves, everything else fills).
//!
//! [`ViewStyle`] is the literal-only subset, loadable from TOML:
//!
//! ```
//! use paneflow::view::ViewStyle;
//! use paneflow::types::{HAlign, Rgba};
//!
//! let style = ViewStyle::from_toml(r##"
//!     min_width = 120
//!     flex_width = false
//!     halign = "center"
//!     background = "#336699"
//! "##).unwrap();
//!
//! assert_eq!(style.min_width, Some(120.0));
//! assert_eq!(style.halign, Some(HAlign::Center));
//! assert_eq!(style.background, Some(Rgba::from_rgb_int(0x336699)));
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::reactive::Prop;
use crate::types::{HAlign, Rgba, VAlign};

/// Construction-time attributes of a view.
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    pub(crate) min_width: Option<Prop<Option<f32>>>,
    pub(crate) min_height: Option<Prop<Option<f32>>>,
    pub(crate) flex_width: Option<Prop<bool>>,
    pub(crate) flex_height: Option<Prop<bool>>,
    pub(crate) halign: Option<Prop<HAlign>>,
    pub(crate) valign: Option<Prop<VAlign>>,
    pub(crate) hidden: Option<Prop<bool>>,
    pub(crate) background: Option<Prop<Option<Rgba>>>,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit minimum width; wins over any content width.
    pub fn min_width(mut self, value: impl Into<Prop<Option<f32>>>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    /// Explicit minimum height; wins over any content height.
    pub fn min_height(mut self, value: impl Into<Prop<Option<f32>>>) -> Self {
        self.min_height = Some(value.into());
        self
    }

    /// Shorthand for `min_width` and `min_height`.
    pub fn min_size(self, width: f32, height: f32) -> Self {
        self.min_width(width).min_height(height)
    }

    /// Whether the parent may grant extra width beyond the derived width.
    pub fn flex_width(mut self, value: impl Into<Prop<bool>>) -> Self {
        self.flex_width = Some(value.into());
        self
    }

    pub fn flex_height(mut self, value: impl Into<Prop<bool>>) -> Self {
        self.flex_height = Some(value.into());
        self
    }

    pub fn halign(mut self, value: impl Into<Prop<HAlign>>) -> Self {
        self.halign = Some(value.into());
        self
    }

    pub fn valign(mut self, value: impl Into<Prop<VAlign>>) -> Self {
        self.valign = Some(value.into());
        self
    }

    pub fn hidden(mut self, value: impl Into<Prop<bool>>) -> Self {
        self.hidden = Some(value.into());
        self
    }

    pub fn background(mut self, value: impl Into<Prop<Option<Rgba>>>) -> Self {
        self.background = Some(value.into());
        self
    }
}

/// Literal view attributes, deserializable from configuration files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewStyle {
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub flex_width: Option<bool>,
    pub flex_height: Option<bool>,
    pub halign: Option<HAlign>,
    pub valign: Option<VAlign>,
    pub hidden: Option<bool>,
    pub background: Option<Rgba>,
}

impl ViewStyle {
    /// Parse a style from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

impl From<ViewStyle> for ViewConfig {
    fn from(style: ViewStyle) -> Self {
        ViewConfig {
            min_width: style.min_width.map(Prop::from),
            min_height: style.min_height.map(Prop::from),
            flex_width: style.flex_width.map(Prop::from),
            flex_height: style.flex_height.map(Prop::from),
            halign: style.halign.map(Prop::from),
            valign: style.valign.map(Prop::from),
            hidden: style.hidden.map(Prop::from),
            background: style.background.map(Prop::from),
        }
    }
}
