// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Style, Transform};

/// A font style.
///
/// `font-style` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::str::FromStr for FontStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "oblique" => Ok(FontStyle::Oblique),
            _ => Err("invalid value"),
        }
    }
}

/// A horizontal text alignment.
///
/// Resolved from the `text-align` property, where `start` and `end`
/// are mapped to `left` and `right`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl std::str::FromStr for TextAlign {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "start" => Ok(TextAlign::Left),
            "center" | "middle" => Ok(TextAlign::Center),
            "right" | "end" => Ok(TextAlign::Right),
            _ => Err("invalid value"),
        }
    }
}

/// A text baseline.
///
/// Resolved from the `alignment-baseline` property.
/// Unset, `auto` and `alphabetic` all resolve to `Bottom`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

impl Default for Baseline {
    fn default() -> Self {
        Self::Bottom
    }
}

impl std::str::FromStr for Baseline {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" | "alphabetic" | "bottom" | "ideographic" | "text-after-edge"
            | "after-edge" => Ok(Baseline::Bottom),
            "middle" | "central" | "mathematical" => Ok(Baseline::Middle),
            "top" | "hanging" | "text-before-edge" | "before-edge" => Ok(Baseline::Top),
            _ => Err("invalid value"),
        }
    }
}

/// A font used to measure and draw a text run.
#[derive(Clone, PartialEq, Debug)]
pub struct Font {
    /// A `font-family` value, as written.
    ///
    /// Can contain a comma-separated list.
    pub family: String,

    /// A font size in user units.
    ///
    /// Never smaller than the minimal font size, see [`Text`].
    pub size: f32,

    /// A numeric font weight in a 1..=1000 range.
    pub weight: u16,

    /// A font style.
    pub style: FontStyle,
}

/// A single run of literal text.
///
/// Produced for each non-empty text content inside a `text` element.
/// `text` and `tspan` elements themselves become groups.
///
/// Fonts smaller than 9 units are drawn with a 9 unit font and
/// scaled down via `transform`, so layout stays stable.
#[derive(Clone, Debug)]
pub struct Text {
    /// Whitespace-collapsed text content.
    pub text: String,

    /// Run start position.
    pub x: f32,

    /// Run baseline position.
    pub y: f32,

    /// A font used to measure the run.
    pub font: Font,

    /// Measured width in user units, including the small font compensation.
    pub width: f32,

    /// Small font compensation scale around `(x, y)`.
    ///
    /// `None` when the font size was not clamped.
    pub transform: Option<Transform>,

    /// Resolved style of the enclosing `text` or `tspan` element.
    pub style: Style,
}
