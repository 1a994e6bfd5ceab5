// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Font;

/// A text width measurer.
///
/// Used to advance the text cursor after each text run.
pub trait TextMeasure: std::fmt::Debug {
    /// Returns the rendered width of `text` drawn with `font`, in user units.
    fn measure(&self, text: &str, font: &Font) -> f32;
}

/// A font-less text measurer.
///
/// Assumes that every character advances by half of the font size.
#[derive(Clone, Copy, Default, Debug)]
pub struct ApproximateTextMeasure;

impl TextMeasure for ApproximateTextMeasure {
    fn measure(&self, text: &str, font: &Font) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }
}

static APPROXIMATE_TEXT_MEASURE: ApproximateTextMeasure = ApproximateTextMeasure;

/// Processing options.
#[derive(Debug)]
pub struct Options<'a> {
    /// Viewport width to use when the root element has no usable `width`.
    ///
    /// Also used as a base for a percentage `width`.
    ///
    /// Default: `None`
    pub width: Option<f32>,

    /// Viewport height to use when the root element has no usable `height`.
    ///
    /// Also used as a base for a percentage `height`.
    ///
    /// Default: `None`
    pub height: Option<f32>,

    /// Do not wrap the tree into a viewBox transform group.
    ///
    /// `Tree::view_box_transform` is still computed.
    ///
    /// Default: false
    pub ignore_view_box: bool,

    /// Do not clip the outermost group to the viewport.
    ///
    /// Default: false
    pub ignore_root_clip: bool,

    /// A default font family.
    ///
    /// Will be used when no `font-family` attribute is set in the SVG.
    ///
    /// Default: Times New Roman
    pub font_family: String,

    /// A default font size.
    ///
    /// Will be used when no `font-size` attribute is set in the SVG.
    ///
    /// Default: 12
    pub font_size: f32,

    /// Specifies how text runs are measured.
    ///
    /// Default: [`ApproximateTextMeasure`]
    pub text_measure: &'a dyn TextMeasure,
}

impl Default for Options<'_> {
    fn default() -> Options<'static> {
        Options {
            width: None,
            height: None,
            ignore_view_box: false,
            ignore_root_clip: false,
            // Default font is user-agent dependent so we can use whichever we like.
            font_family: "Times New Roman".to_owned(),
            font_size: 12.0,
            text_measure: &APPROXIMATE_TEXT_MEASURE,
        }
    }
}
