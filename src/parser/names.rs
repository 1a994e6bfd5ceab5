// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Element names recognized by the converter.
///
/// Anything else is ignored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EId {
    Circle,
    Defs,
    Ellipse,
    G,
    Image,
    Line,
    LinearGradient,
    Path,
    Pattern,
    Polygon,
    Polyline,
    RadialGradient,
    Rect,
    Stop,
    Style,
    Svg,
    Text,
    Tspan,
}

impl EId {
    pub fn from_str(text: &str) -> Option<EId> {
        Some(match text {
            "circle" => EId::Circle,
            "defs" => EId::Defs,
            "ellipse" => EId::Ellipse,
            "g" => EId::G,
            "image" => EId::Image,
            "line" => EId::Line,
            "linearGradient" => EId::LinearGradient,
            "path" => EId::Path,
            "pattern" => EId::Pattern,
            "polygon" => EId::Polygon,
            "polyline" => EId::Polyline,
            "radialGradient" => EId::RadialGradient,
            "rect" => EId::Rect,
            "stop" => EId::Stop,
            "style" => EId::Style,
            "svg" => EId::Svg,
            "text" => EId::Text,
            "tspan" => EId::Tspan,
            _ => return None,
        })
    }

    pub fn to_str(self) -> &'static str {
        match self {
            EId::Circle => "circle",
            EId::Defs => "defs",
            EId::Ellipse => "ellipse",
            EId::G => "g",
            EId::Image => "image",
            EId::Line => "line",
            EId::LinearGradient => "linearGradient",
            EId::Path => "path",
            EId::Pattern => "pattern",
            EId::Polygon => "polygon",
            EId::Polyline => "polyline",
            EId::RadialGradient => "radialGradient",
            EId::Rect => "rect",
            EId::Stop => "stop",
            EId::Style => "style",
            EId::Svg => "svg",
            EId::Text => "text",
            EId::Tspan => "tspan",
        }
    }

    /// Checks that the element produces a paint definition inside `defs`.
    pub fn is_paint_server(self) -> bool {
        matches!(
            self,
            EId::LinearGradient | EId::RadialGradient | EId::Pattern
        )
    }
}

impl std::fmt::Display for EId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Presentation attributes that take part in style resolving.
///
/// Any other attribute is ignored by the style resolver.
pub const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "fill",
    "stroke",
    "stroke-width",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "text-align",
    "alignment-baseline",
];
