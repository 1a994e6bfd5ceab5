// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use super::names::EId;
use super::units::{convert_user_length, number_attribute};
use crate::ShapeKind;

/// Builds a shape geometry from element's attributes.
///
/// Missing or invalid numbers are zero, so this never fails for
/// a shape element. Returns `None` for non-shape elements.
pub(crate) fn convert(node: roxmltree::Node, tag_name: EId) -> Option<ShapeKind> {
    let kind = match tag_name {
        EId::Rect => convert_rect(node),
        EId::Circle => ShapeKind::Circle {
            cx: convert_user_length(node, "cx", 0.0),
            cy: convert_user_length(node, "cy", 0.0),
            r: convert_user_length(node, "r", 0.0),
        },
        EId::Ellipse => ShapeKind::Ellipse {
            cx: convert_user_length(node, "cx", 0.0),
            cy: convert_user_length(node, "cy", 0.0),
            rx: convert_user_length(node, "rx", 0.0),
            ry: convert_user_length(node, "ry", 0.0),
        },
        EId::Line => ShapeKind::Line {
            x1: convert_user_length(node, "x1", 0.0),
            y1: convert_user_length(node, "y1", 0.0),
            x2: convert_user_length(node, "x2", 0.0),
            y2: convert_user_length(node, "y2", 0.0),
        },
        EId::Polygon => ShapeKind::Polygon {
            points: convert_points(node),
        },
        EId::Polyline => ShapeKind::Polyline {
            points: convert_points(node),
        },
        EId::Path => ShapeKind::Path {
            data: convert_path(node.attribute("d").unwrap_or_default()),
        },
        _ => return None,
    };

    Some(kind)
}

fn convert_rect(node: roxmltree::Node) -> ShapeKind {
    // Negative radii are ignored.
    let radius = |aid| number_attribute(node, aid).filter(|v| !v.is_sign_negative());

    let (rx, ry) = match (radius("rx"), radius("ry")) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    };

    ShapeKind::Rect {
        x: convert_user_length(node, "x", 0.0),
        y: convert_user_length(node, "y", 0.0),
        width: convert_user_length(node, "width", 0.0),
        height: convert_user_length(node, "height", 0.0),
        rx,
        ry,
    }
}

fn convert_points(node: roxmltree::Node) -> Vec<(f32, f32)> {
    node.attribute("points")
        .map(|text| {
            svgtypes::PointsParser::from(text)
                .map(|(x, y)| (x as f32, y as f32))
                .collect()
        })
        .unwrap_or_default()
}

/// Converts path data into a path.
///
/// Parsing stops at the first error, keeping the segments before it.
/// Returns `None` when nothing drawable is left.
pub(crate) fn convert_path(value: &str) -> Option<Arc<tiny_skia_path::Path>> {
    let mut builder = tiny_skia_path::PathBuilder::new();
    for segment in svgtypes::SimplifyingPathParser::from(value) {
        let segment = match segment {
            Ok(v) => v,
            Err(e) => {
                log::debug!("Path data parsing stopped: {}.", e);
                break;
            }
        };

        match segment {
            svgtypes::SimplePathSegment::MoveTo { x, y } => {
                builder.move_to(x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::LineTo { x, y } => {
                builder.line_to(x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(x1 as f32, y1 as f32, x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                builder.cubic_to(
                    x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                );
            }
            svgtypes::SimplePathSegment::ClosePath => {
                builder.close();
            }
        }
    }

    builder.finish().map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_str(text: &str) -> ShapeKind {
        let doc = roxmltree::Document::parse(text).unwrap();
        let node = doc.root_element();
        let tag_name = EId::from_str(node.tag_name().name()).unwrap();
        convert(node, tag_name).unwrap()
    }

    #[test]
    fn rect_defaults() {
        match convert_str("<rect/>") {
            ShapeKind::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                assert_eq!((x, y, width, height, rx, ry), (0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
            }
            k => panic!("unexpected shape: {:?}", k),
        }
    }

    #[test]
    fn rect_single_radius() {
        match convert_str("<rect width='10' height='10' ry='3' rx='-1'/>") {
            ShapeKind::Rect { rx, ry, .. } => assert_eq!((rx, ry), (3.0, 3.0)),
            k => panic!("unexpected shape: {:?}", k),
        }
    }

    #[test]
    fn polyline_points() {
        match convert_str("<polyline points='0,0 10,0 10,10 5'/>") {
            ShapeKind::Polyline { points } => {
                assert_eq!(points, vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
            }
            k => panic!("unexpected shape: {:?}", k),
        }
    }

    #[test]
    fn polygon_compact_points() {
        match convert_str("<polygon points='10-5 20-5 30,40'/>") {
            ShapeKind::Polygon { points } => {
                assert_eq!(points, vec![(10.0, -5.0), (20.0, -5.0), (30.0, 40.0)]);
            }
            k => panic!("unexpected shape: {:?}", k),
        }
    }

    #[test]
    fn path_without_data() {
        match convert_str("<path/>") {
            ShapeKind::Path { data } => assert!(data.is_none()),
            k => panic!("unexpected shape: {:?}", k),
        }
    }

    #[test]
    fn path_stops_on_error() {
        let path = convert_path("M 10 20 L 30 40 L oops").unwrap();
        assert_eq!(path.len(), 2);
    }
}
