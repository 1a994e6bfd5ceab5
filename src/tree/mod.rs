// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod geom;
mod text;

use std::sync::Arc;

pub use strict_num::{self, ApproxEqUlps};
pub use svgtypes;
pub use tiny_skia_path;

pub use self::geom::*;
pub use self::text::*;

/// An RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Constructs a new `Color` from RGBA values.
    #[inline]
    pub fn new_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Constructs a new opaque black `Color`.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgba(0, 0, 0, 255)
    }
}

impl From<svgtypes::Color> for Color {
    fn from(c: svgtypes::Color) -> Self {
        Color::new_rgba(c.red, c.green, c.blue, c.alpha)
    }
}

/// A gradient stop.
///
/// `stop` element in SVG.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stop {
    /// Gradient stop offset.
    ///
    /// `offset` in SVG, clamped to 0..=1.
    pub offset: f32,

    /// Gradient stop color, with `stop-opacity` folded into alpha.
    ///
    /// `stop-color` in SVG.
    pub color: Color,
}

/// A linear gradient.
///
/// `linearGradient` element in SVG.
#[derive(Debug)]
pub struct LinearGradient {
    /// Element's ID.
    ///
    /// Can be empty for a definition that nothing can reference.
    pub id: String,

    #[allow(missing_docs)]
    pub x1: f32,
    #[allow(missing_docs)]
    pub y1: f32,
    #[allow(missing_docs)]
    pub x2: f32,
    #[allow(missing_docs)]
    pub y2: f32,

    /// `gradientTransform` in SVG.
    pub transform: Option<Transform>,

    /// A list of `stop` elements, in document order.
    pub stops: Vec<Stop>,
}

/// A paint style.
///
/// `fill` and `stroke` values in SVG.
#[derive(Clone, Debug)]
pub enum Paint {
    /// `none`.
    None,
    /// A parsed color literal.
    Color(Color),
    /// A reference to a registered linear gradient.
    LinearGradient(Arc<LinearGradient>),
    /// Any other value, passed through as written (like `currentColor`).
    Other(String),
}

impl PartialEq for Paint {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Color(lc), Self::Color(rc)) => lc == rc,
            (Self::LinearGradient(ref lg1), Self::LinearGradient(ref lg2)) => Arc::ptr_eq(lg1, lg2),
            (Self::Other(ref l), Self::Other(ref r)) => l == r,
            _ => false,
        }
    }
}

/// A line cap.
///
/// `stroke-linecap` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl std::str::FromStr for LineCap {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            _ => Err("invalid value"),
        }
    }
}

/// A line join.
///
/// `stroke-linejoin` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LineJoin {
    Miter,
    MiterClip,
    Round,
    Bevel,
}

impl std::str::FromStr for LineJoin {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(LineJoin::Miter),
            "miter-clip" => Ok(LineJoin::MiterClip),
            "round" => Ok(LineJoin::Round),
            "bevel" => Ok(LineJoin::Bevel),
            _ => Err("invalid value"),
        }
    }
}

/// A resolved style record.
///
/// Each field is `None` when no source (inline style, presentation attribute
/// or inherited value) provided a usable value.
#[derive(Clone, Default, Debug)]
pub struct Style {
    /// Resolved `fill`.
    ///
    /// `Some(Paint::None)` is an explicit `none`,
    /// while `None` is either unset or an unresolved `url(#id)`.
    pub fill: Option<Paint>,

    /// Resolved `stroke`. Same rules as `fill`.
    pub stroke: Option<Paint>,

    /// Set once any style layer resolved a stroke other than `none`.
    ///
    /// Never cleared afterwards, even when a higher priority layer sets
    /// `stroke: none`.
    pub has_stroke: bool,

    /// `stroke-width` outside of text.
    pub line_width: Option<f32>,

    /// `stroke-width` inside of text.
    pub text_stroke_width: Option<f32>,

    #[allow(missing_docs)]
    pub opacity: Option<f32>,
    #[allow(missing_docs)]
    pub fill_opacity: Option<f32>,
    #[allow(missing_docs)]
    pub stroke_opacity: Option<f32>,

    /// `stroke-dasharray`, as a plain number list.
    pub dash_array: Option<Vec<f32>>,
    #[allow(missing_docs)]
    pub dash_offset: Option<f32>,
    #[allow(missing_docs)]
    pub line_cap: Option<LineCap>,
    #[allow(missing_docs)]
    pub line_join: Option<LineJoin>,
    #[allow(missing_docs)]
    pub miter_limit: Option<f32>,

    #[allow(missing_docs)]
    pub font_family: Option<String>,
    #[allow(missing_docs)]
    pub font_size: Option<f32>,
    #[allow(missing_docs)]
    pub font_style: Option<FontStyle>,
    /// `font-weight`, as written.
    pub font_weight: Option<String>,
    #[allow(missing_docs)]
    pub text_align: Option<TextAlign>,
    #[allow(missing_docs)]
    pub baseline: Baseline,
}

/// Node's kind.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Node {
    Group(Box<Group>),
    Shape(Box<Shape>),
    Text(Box<Text>),
    Image(Box<Image>),
}

impl Node {
    /// Returns node's ID.
    ///
    /// Text runs never have one.
    pub fn id(&self) -> &str {
        match self {
            Node::Group(ref e) => e.id.as_str(),
            Node::Shape(ref e) => e.id.as_str(),
            Node::Image(ref e) => e.id.as_str(),
            Node::Text(_) => "",
        }
    }

    /// Returns node's resolved style.
    pub fn style(&self) -> &Style {
        match self {
            Node::Group(ref e) => &e.style,
            Node::Shape(ref e) => &e.style,
            Node::Image(ref e) => &e.style,
            Node::Text(ref e) => &e.style,
        }
    }

    /// Returns node's local transform.
    ///
    /// `None` means identity.
    pub fn transform(&self) -> Option<Transform> {
        match self {
            Node::Group(ref e) => e.transform,
            Node::Shape(ref e) => e.transform,
            Node::Image(ref e) => e.transform,
            Node::Text(ref e) => e.transform,
        }
    }
}

/// A group container.
///
/// Produced by `g`, `text` and `tspan` elements, the root `svg` element
/// and the viewBox wrapper.
#[derive(Clone, Default, Debug)]
pub struct Group {
    /// Element's ID.
    ///
    /// Can be empty.
    pub id: String,

    /// Element's local transform.
    pub transform: Option<Transform>,

    /// Resolved style.
    pub style: Style,

    /// A rectangular clip.
    ///
    /// Defined in the coordinate system of the group's parent, so it is
    /// not affected by the group's own `transform`. For the root group
    /// this is the viewport.
    ///
    /// Only the outermost group returned by the parser can have one.
    pub clip: Option<Rect>,

    /// Group's children.
    pub children: Vec<Node>,
}

impl Group {
    /// Checks if the current group has any children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn find_by_id(&self, id: &str) -> Option<&Node> {
        for child in &self.children {
            if !id.is_empty() && child.id() == id {
                return Some(child);
            }

            if let Node::Group(ref g) = child {
                if let Some(n) = g.find_by_id(id) {
                    return Some(n);
                }
            }
        }

        None
    }
}

/// A shape geometry.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum ShapeKind {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
        ry: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Polygon {
        points: Vec<(f32, f32)>,
    },
    Polyline {
        points: Vec<(f32, f32)>,
    },
    /// `None` when `d` is missing, empty or has no drawable segments.
    Path {
        data: Option<Arc<tiny_skia_path::Path>>,
    },
}

/// A drawable shape.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Element's ID.
    ///
    /// Can be empty.
    pub id: String,

    /// Shape's geometry.
    pub kind: ShapeKind,

    /// Element's local transform.
    pub transform: Option<Transform>,

    /// Resolved style.
    pub style: Style,
}

/// A raster or vector image reference.
///
/// `image` element in SVG. Nothing is loaded, `href` is kept as is.
#[derive(Clone, Debug)]
#[allow(missing_docs)]
pub struct Image {
    /// Element's ID.
    ///
    /// Can be empty.
    pub id: String,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// `href` or `xlink:href`.
    pub href: Option<String>,

    /// Element's local transform.
    pub transform: Option<Transform>,

    /// Resolved style.
    pub style: Style,
}

/// A scene tree.
///
/// Created fresh on each parse and fully owned by the caller.
#[derive(Clone, Debug)]
pub struct Tree {
    /// The outermost group.
    ///
    /// Wraps the root `svg` group with a viewBox transform group,
    /// unless disabled via `Options::ignore_view_box`.
    pub root: Group,

    /// Resolved viewport width.
    ///
    /// `None` when neither the document nor `Options` provide one.
    pub width: Option<f32>,

    /// Resolved viewport height.
    ///
    /// `None` when neither the document nor `Options` provide one.
    pub height: Option<f32>,

    /// A declared `viewBox`, if any and well-formed.
    pub view_box: Option<ViewBox>,

    /// A computed viewBox mapping.
    ///
    /// `None` when there is no `viewBox` or no usable viewport size.
    pub view_box_transform: Option<ViewBoxTransform>,
}

impl Tree {
    /// Returns the outermost group.
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Returns a node by ID.
    ///
    /// Performs a depth-first search, so the first match in document order wins.
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.root.find_by_id(id)
    }
}
