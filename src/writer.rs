// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::sync::Arc;

use xmlwriter::XmlWriter;

use crate::parser::EId;
use crate::*;

impl Tree {
    /// Writes the scene tree back to SVG.
    ///
    /// Gradients are written into `defs` and a root clip becomes a `clipPath`.
    /// Unresolved paint is omitted. Text alignment is written as `text-anchor`,
    /// which the parser does not read back.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        convert(self, opt)
    }
}

/// XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct WriteOptions {
    /// Set the coordinates numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    ///
    /// Default: 8
    pub coordinates_precision: u8,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: xmlwriter::Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            coordinates_precision: 8,
            use_single_quote: false,
            indent: xmlwriter::Indent::Spaces(4),
        }
    }
}

fn convert(tree: &Tree, opt: &WriteOptions) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options {
        use_single_quote: opt.use_single_quote,
        indent: opt.indent,
        attributes_indent: xmlwriter::Indent::None,
    });

    xml.start_svg_element(EId::Svg);
    if let Some(width) = tree.width {
        xml.write_num("width", width, opt);
    }
    if let Some(height) = tree.height {
        xml.write_num("height", height, opt);
    }
    if let Some(vb) = tree.view_box {
        xml.write_numbers("viewBox", &[vb.x, vb.y, vb.width, vb.height], opt);
    }
    xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");

    let mut gradients = Vec::new();
    collect_gradients(&tree.root, &mut gradients);

    let clip_id = tree.root.clip.map(|r| (gen_clip_path_id(tree), r));

    if !gradients.is_empty() || clip_id.is_some() {
        xml.start_svg_element(EId::Defs);
        for lg in &gradients {
            write_linear_gradient(lg, opt, &mut xml);
        }

        if let Some((ref id, r)) = clip_id {
            xml.start_element("clipPath");
            xml.write_attribute("id", id);
            xml.start_svg_element(EId::Rect);
            xml.write_num("x", r.x(), opt);
            xml.write_num("y", r.y(), opt);
            xml.write_num("width", r.width(), opt);
            xml.write_num("height", r.height(), opt);
            xml.end_element();
            xml.end_element();
        }

        xml.end_element();
    }

    write_group(
        &tree.root,
        clip_id.as_ref().map(|(id, _)| id.as_str()),
        opt,
        &mut xml,
    );

    xml.end_document()
}

/// Collects unique gradients in the order of their first use.
fn collect_gradients(g: &Group, list: &mut Vec<Arc<LinearGradient>>) {
    push_gradient(&g.style, list);

    for node in &g.children {
        if let Node::Group(ref g) = node {
            collect_gradients(g, list);
        } else {
            push_gradient(node.style(), list);
        }
    }
}

fn push_gradient(style: &Style, list: &mut Vec<Arc<LinearGradient>>) {
    for paint in [&style.fill, &style.stroke] {
        if let Some(Paint::LinearGradient(ref lg)) = paint {
            if !list.iter().any(|other| Arc::ptr_eq(other, lg)) {
                list.push(lg.clone());
            }
        }
    }
}

fn gen_clip_path_id(tree: &Tree) -> String {
    let mut idx = 1;
    loop {
        let id = format!("clipPath{}", idx);
        if tree.node_by_id(&id).is_none() {
            return id;
        }

        idx += 1;
    }
}

fn write_linear_gradient(lg: &LinearGradient, opt: &WriteOptions, xml: &mut XmlWriter) {
    xml.start_svg_element(EId::LinearGradient);
    xml.write_attribute("id", &lg.id);
    xml.write_num("x1", lg.x1, opt);
    xml.write_num("y1", lg.y1, opt);
    xml.write_num("x2", lg.x2, opt);
    xml.write_num("y2", lg.y2, opt);
    xml.write_transform("gradientTransform", lg.transform, opt);

    for stop in &lg.stops {
        xml.start_svg_element(EId::Stop);
        xml.write_num("offset", stop.offset, opt);
        xml.write_color("stop-color", stop.color);
        if stop.color.alpha != u8::MAX {
            xml.write_num("stop-opacity", stop.color.alpha as f32 / 255.0, opt);
        }
        xml.end_element();
    }

    xml.end_element();
}

fn write_group(g: &Group, clip_id: Option<&str>, opt: &WriteOptions, xml: &mut XmlWriter) {
    let has_transform = matches!(g.transform, Some(ts) if !ts.is_identity());

    // `clip-path` is resolved after element's own `transform`,
    // while `Group::clip` is not affected by it.
    if let (Some(id), true) = (clip_id, has_transform) {
        xml.start_svg_element(EId::G);
        xml.write_attribute_fmt("clip-path", format_args!("url(#{})", id));
        write_group(g, None, opt, xml);
        xml.end_element();
        return;
    }

    xml.start_svg_element(EId::G);
    if !g.id.is_empty() {
        xml.write_attribute("id", &g.id);
    }
    xml.write_transform("transform", g.transform, opt);
    if let Some(id) = clip_id {
        xml.write_attribute_fmt("clip-path", format_args!("url(#{})", id));
    }
    xml.write_style(&g.style, opt);

    for node in &g.children {
        write_node(node, opt, xml);
    }

    xml.end_element();
}

fn write_node(node: &Node, opt: &WriteOptions, xml: &mut XmlWriter) {
    match node {
        Node::Group(ref g) => write_group(g, None, opt, xml),
        Node::Shape(ref shape) => write_shape(shape, opt, xml),
        Node::Text(ref text) => write_text(text, opt, xml),
        Node::Image(ref img) => {
            xml.start_svg_element(EId::Image);
            if !img.id.is_empty() {
                xml.write_attribute("id", &img.id);
            }
            xml.write_num("x", img.x, opt);
            xml.write_num("y", img.y, opt);
            xml.write_num("width", img.width, opt);
            xml.write_num("height", img.height, opt);
            if let Some(ref href) = img.href {
                xml.write_attribute("href", href);
            }
            xml.write_transform("transform", img.transform, opt);
            xml.write_style(&img.style, opt);
            xml.end_element();
        }
    }
}

fn write_shape(shape: &Shape, opt: &WriteOptions, xml: &mut XmlWriter) {
    match shape.kind {
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => {
            xml.start_svg_element(EId::Rect);
            xml.write_num("x", x, opt);
            xml.write_num("y", y, opt);
            xml.write_num("width", width, opt);
            xml.write_num("height", height, opt);
            if rx > 0.0 || ry > 0.0 {
                xml.write_num("rx", rx, opt);
                xml.write_num("ry", ry, opt);
            }
        }
        ShapeKind::Circle { cx, cy, r } => {
            xml.start_svg_element(EId::Circle);
            xml.write_num("cx", cx, opt);
            xml.write_num("cy", cy, opt);
            xml.write_num("r", r, opt);
        }
        ShapeKind::Ellipse { cx, cy, rx, ry } => {
            xml.start_svg_element(EId::Ellipse);
            xml.write_num("cx", cx, opt);
            xml.write_num("cy", cy, opt);
            xml.write_num("rx", rx, opt);
            xml.write_num("ry", ry, opt);
        }
        ShapeKind::Line { x1, y1, x2, y2 } => {
            xml.start_svg_element(EId::Line);
            xml.write_num("x1", x1, opt);
            xml.write_num("y1", y1, opt);
            xml.write_num("x2", x2, opt);
            xml.write_num("y2", y2, opt);
        }
        ShapeKind::Polygon { ref points } => {
            xml.start_svg_element(EId::Polygon);
            xml.write_points(points, opt);
        }
        ShapeKind::Polyline { ref points } => {
            xml.start_svg_element(EId::Polyline);
            xml.write_points(points, opt);
        }
        ShapeKind::Path { ref data } => {
            xml.start_svg_element(EId::Path);
            if let Some(ref path) = data {
                xml.write_path_data(path, opt);
            }
        }
    }

    if !shape.id.is_empty() {
        xml.write_attribute("id", &shape.id);
    }
    xml.write_transform("transform", shape.transform, opt);
    xml.write_style(&shape.style, opt);
    xml.end_element();
}

fn write_text(text: &Text, opt: &WriteOptions, xml: &mut XmlWriter) {
    xml.start_svg_element(EId::Text);
    xml.write_num("x", text.x, opt);
    xml.write_num("y", text.y, opt);
    xml.write_transform("transform", text.transform, opt);
    xml.write_attribute("font-family", &text.font.family);
    xml.write_num("font-size", text.font.size, opt);
    if text.font.weight != 400 {
        xml.write_attribute("font-weight", &text.font.weight);
    }
    match text.font.style {
        FontStyle::Normal => {}
        FontStyle::Italic => xml.write_attribute("font-style", "italic"),
        FontStyle::Oblique => xml.write_attribute("font-style", "oblique"),
    }
    xml.write_text(&text.text);
    xml.end_element();
}

trait XmlWriterExt {
    fn start_svg_element(&mut self, id: EId);
    fn write_num(&mut self, name: &str, n: f32, opt: &WriteOptions);
    fn write_numbers(&mut self, name: &str, list: &[f32], opt: &WriteOptions);
    fn write_points(&mut self, points: &[(f32, f32)], opt: &WriteOptions);
    fn write_color(&mut self, name: &str, color: Color);
    fn write_paint(&mut self, name: &str, paint: &Paint);
    fn write_transform(&mut self, name: &str, ts: Option<Transform>, opt: &WriteOptions);
    fn write_path_data(&mut self, path: &tiny_skia_path::Path, opt: &WriteOptions);
    fn write_style(&mut self, style: &Style, opt: &WriteOptions);
}

impl XmlWriterExt for XmlWriter {
    #[inline(never)]
    fn start_svg_element(&mut self, id: EId) {
        self.start_element(id.to_str());
    }

    fn write_num(&mut self, name: &str, n: f32, opt: &WriteOptions) {
        self.write_attribute_raw(name, |buf| write_num(n, buf, opt.coordinates_precision));
    }

    fn write_numbers(&mut self, name: &str, list: &[f32], opt: &WriteOptions) {
        self.write_attribute_raw(name, |buf| {
            for n in list {
                write_num(*n, buf, opt.coordinates_precision);
                buf.push(b' ');
            }

            if !list.is_empty() {
                buf.pop();
            }
        });
    }

    fn write_points(&mut self, points: &[(f32, f32)], opt: &WriteOptions) {
        self.write_attribute_raw("points", |buf| {
            for &(x, y) in points {
                write_num(x, buf, opt.coordinates_precision);
                buf.push(b',');
                write_num(y, buf, opt.coordinates_precision);
                buf.push(b' ');
            }

            if !points.is_empty() {
                buf.pop();
            }
        });
    }

    #[inline(never)]
    fn write_color(&mut self, name: &str, c: Color) {
        static CHARS: &[u8] = b"0123456789abcdef";

        #[inline]
        fn int2hex(n: u8) -> (u8, u8) {
            (CHARS[(n >> 4) as usize], CHARS[(n & 0xf) as usize])
        }

        let (r1, r2) = int2hex(c.red);
        let (g1, g2) = int2hex(c.green);
        let (b1, b2) = int2hex(c.blue);

        self.write_attribute_raw(name, |buf| {
            buf.extend_from_slice(&[b'#', r1, r2, g1, g2, b1, b2])
        });
    }

    fn write_paint(&mut self, name: &str, paint: &Paint) {
        match paint {
            Paint::None => self.write_attribute(name, "none"),
            Paint::Color(c) => self.write_color(name, *c),
            Paint::LinearGradient(ref lg) => {
                self.write_attribute_fmt(name, format_args!("url(#{})", lg.id));
            }
            Paint::Other(ref s) => self.write_attribute(name, s),
        }
    }

    fn write_transform(&mut self, name: &str, ts: Option<Transform>, opt: &WriteOptions) {
        let ts = match ts {
            Some(ts) if !ts.is_identity() => ts,
            _ => return,
        };

        self.write_attribute_raw(name, |buf| {
            buf.extend_from_slice(b"matrix(");
            write_num(ts.sx, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(ts.ky, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(ts.kx, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(ts.sy, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(ts.tx, buf, opt.coordinates_precision);
            buf.push(b' ');
            write_num(ts.ty, buf, opt.coordinates_precision);
            buf.extend_from_slice(b")");
        });
    }

    fn write_path_data(&mut self, path: &tiny_skia_path::Path, opt: &WriteOptions) {
        use tiny_skia_path::PathSegment;

        self.write_attribute_raw("d", |buf| {
            let write_point = |buf: &mut Vec<u8>, p: tiny_skia_path::Point| {
                write_num(p.x, buf, opt.coordinates_precision);
                buf.push(b' ');
                write_num(p.y, buf, opt.coordinates_precision);
                buf.push(b' ');
            };

            for seg in path.segments() {
                match seg {
                    PathSegment::MoveTo(p) => {
                        buf.extend_from_slice(b"M ");
                        write_point(buf, p);
                    }
                    PathSegment::LineTo(p) => {
                        buf.extend_from_slice(b"L ");
                        write_point(buf, p);
                    }
                    PathSegment::QuadTo(p1, p) => {
                        buf.extend_from_slice(b"Q ");
                        write_point(buf, p1);
                        write_point(buf, p);
                    }
                    PathSegment::CubicTo(p1, p2, p) => {
                        buf.extend_from_slice(b"C ");
                        write_point(buf, p1);
                        write_point(buf, p2);
                        write_point(buf, p);
                    }
                    PathSegment::Close => {
                        buf.extend_from_slice(b"Z ");
                    }
                }
            }

            buf.pop();
        });
    }

    fn write_style(&mut self, style: &Style, opt: &WriteOptions) {
        if let Some(ref fill) = style.fill {
            self.write_paint("fill", fill);
        }
        if let Some(ref stroke) = style.stroke {
            self.write_paint("stroke", stroke);
        }

        if let Some(n) = style.line_width.or(style.text_stroke_width) {
            self.write_num("stroke-width", n, opt);
        }

        let opacity = |alpha: Option<u8>, opacity: Option<f32>| match (alpha, opacity) {
            (Some(a), o) if a != u8::MAX => Some(a as f32 / 255.0 * o.unwrap_or(1.0)),
            (_, o) => o,
        };

        let paint_alpha = |paint: &Option<Paint>| match paint {
            Some(Paint::Color(c)) => Some(c.alpha),
            _ => None,
        };

        if let Some(n) = style.opacity {
            self.write_num("opacity", n, opt);
        }
        if let Some(n) = opacity(paint_alpha(&style.fill), style.fill_opacity) {
            self.write_num("fill-opacity", n, opt);
        }
        if let Some(n) = opacity(paint_alpha(&style.stroke), style.stroke_opacity) {
            self.write_num("stroke-opacity", n, opt);
        }

        if let Some(ref list) = style.dash_array {
            if !list.is_empty() {
                self.write_numbers("stroke-dasharray", list, opt);
            }
        }
        if let Some(n) = style.dash_offset {
            self.write_num("stroke-dashoffset", n, opt);
        }

        match style.line_cap {
            None => {}
            Some(LineCap::Butt) => self.write_attribute("stroke-linecap", "butt"),
            Some(LineCap::Round) => self.write_attribute("stroke-linecap", "round"),
            Some(LineCap::Square) => self.write_attribute("stroke-linecap", "square"),
        }

        match style.line_join {
            None => {}
            Some(LineJoin::Miter) => self.write_attribute("stroke-linejoin", "miter"),
            Some(LineJoin::MiterClip) => self.write_attribute("stroke-linejoin", "miter-clip"),
            Some(LineJoin::Round) => self.write_attribute("stroke-linejoin", "round"),
            Some(LineJoin::Bevel) => self.write_attribute("stroke-linejoin", "bevel"),
        }

        if let Some(n) = style.miter_limit {
            self.write_num("stroke-miterlimit", n, opt);
        }

        if let Some(ref family) = style.font_family {
            self.write_attribute("font-family", family);
        }
        if let Some(n) = style.font_size {
            self.write_num("font-size", n, opt);
        }
        match style.font_style {
            None => {}
            Some(FontStyle::Normal) => self.write_attribute("font-style", "normal"),
            Some(FontStyle::Italic) => self.write_attribute("font-style", "italic"),
            Some(FontStyle::Oblique) => self.write_attribute("font-style", "oblique"),
        }
        if let Some(ref weight) = style.font_weight {
            self.write_attribute("font-weight", weight);
        }

        // `text-align` is not an SVG attribute, the closest one is `text-anchor`.
        match style.text_align {
            None => {}
            Some(TextAlign::Left) => self.write_attribute("text-anchor", "start"),
            Some(TextAlign::Center) => self.write_attribute("text-anchor", "middle"),
            Some(TextAlign::Right) => self.write_attribute("text-anchor", "end"),
        }

        match style.baseline {
            Baseline::Bottom => {}
            Baseline::Middle => self.write_attribute("alignment-baseline", "middle"),
            Baseline::Top => self.write_attribute("alignment-baseline", "hanging"),
        }
    }
}

static POW_VEC: &[f32] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
];

fn write_num(num: f32, buf: &mut Vec<u8>, precision: u8) {
    // If number is an integer, it's faster to write it as i32.
    if num.fract().approx_zero_ulps(4) {
        write!(buf, "{}", num as i32).unwrap();
        return;
    }

    // Round numbers up to the specified precision to prevent writing
    // ugly numbers like 29.999999999999996.
    let precision = (precision as usize).min(POW_VEC.len() - 1);
    let v = (num * POW_VEC[precision]).round() / POW_VEC[precision];

    write!(buf, "{}", v).unwrap();
}
