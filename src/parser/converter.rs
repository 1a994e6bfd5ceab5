// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::names::EId;
use super::paint_server::{self, Defs};
use super::style::{self, Inheritance, InheritedStyle};
use super::text::{self, TextCursor};
use super::units::parse_number_list;
use super::{image, shapes, transform, units, Error, Options};
use crate::{Group, Node, Rect, Shape, Tree, ViewBox, ViewBoxTransform};

/// Per-parse mutable state.
///
/// Created for each document and dropped once the tree is built.
#[derive(Default, Debug)]
pub(crate) struct Context {
    pub defs: Defs,
    /// Set on entering `defs`, cleared on leaving any `defs`.
    pub define_mode: bool,
    /// Set on entering `text`, cleared on leaving any `text`.
    pub text_mode: bool,
    pub text_cursor: TextCursor,
}

pub(crate) fn convert_doc(doc: &roxmltree::Document, opt: &Options) -> Result<Tree, Error> {
    let svg = doc
        .root()
        .children()
        .find(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case("svg"))
        .ok_or(Error::NoSvgElement)?;

    let mut ctx = Context::default();

    let (style, inherited) = style::resolve(
        svg,
        &InheritedStyle::default(),
        Inheritance::ExplicitOnly,
        false,
        &ctx.defs,
    );

    let mut root = Group {
        id: svg.attribute("id").unwrap_or_default().to_string(),
        transform: transform::resolve(svg, "transform"),
        style,
        clip: None,
        children: Vec::new(),
    };

    convert_children(svg, &inherited, opt, &mut ctx, &mut root);

    let width = units::resolve_viewport_size(svg, "width", opt.width);
    let height = units::resolve_viewport_size(svg, "height", opt.height);
    let view_box = svg.attribute("viewBox").and_then(parse_view_box);

    let view_box_transform = match (view_box, width, height) {
        (Some(vb), Some(w), Some(h)) => ViewBoxTransform::meet(vb, w, h),
        _ => None,
    };

    let mut root = match view_box_transform {
        Some(vbt) if !opt.ignore_view_box => Group {
            transform: Some(vbt.to_transform()),
            children: vec![Node::Group(Box::new(root))],
            ..Group::default()
        },
        _ => root,
    };

    if !opt.ignore_root_clip {
        if let (Some(w), Some(h)) = (width, height) {
            root.clip = Rect::from_xywh(0.0, 0.0, w, h);
        }
    }

    Ok(Tree {
        root,
        width,
        height,
        view_box,
        view_box_transform,
    })
}

fn parse_view_box(value: &str) -> Option<ViewBox> {
    match *parse_number_list(value).as_slice() {
        [x, y, width, height] => Some(ViewBox {
            x,
            y,
            width,
            height,
        }),
        _ => {
            log::debug!("Invalid 'viewBox' value: '{}'. Skipped.", value);
            None
        }
    }
}

fn convert_children(
    parent_node: roxmltree::Node,
    inherited: &InheritedStyle,
    opt: &Options,
    ctx: &mut Context,
    parent: &mut Group,
) {
    for node in parent_node.children() {
        convert_node(node, inherited, opt, ctx, parent);
    }
}

fn convert_node(
    node: roxmltree::Node,
    inherited: &InheritedStyle,
    opt: &Options,
    ctx: &mut Context,
    parent: &mut Group,
) {
    if node.is_text() {
        if ctx.text_mode && !ctx.define_mode {
            let content = node.text().unwrap_or_default();
            if let Some(run) =
                text::convert_run(content, &parent.style, &mut ctx.text_cursor, opt)
            {
                parent.children.push(Node::Text(Box::new(run)));
            }
        }

        return;
    }

    if !node.is_element() {
        return;
    }

    let tag_name = match EId::from_str(node.tag_name().name()) {
        Some(v) => v,
        None => {
            log::debug!("Unknown element '{}'. Skipped.", node.tag_name().name());
            return;
        }
    };

    match tag_name {
        EId::Defs => ctx.define_mode = true,
        EId::Text => ctx.text_mode = true,
        _ => {}
    }

    if ctx.define_mode {
        convert_definition(node, tag_name, inherited, opt, ctx);
    } else {
        convert_element(node, tag_name, inherited, opt, ctx, parent);
    }

    // Modes are flags, not counters. Any closing `defs` or `text` resets them.
    match tag_name {
        EId::Defs => ctx.define_mode = false,
        EId::Text => ctx.text_mode = false,
        _ => {}
    }
}

fn convert_definition(
    node: roxmltree::Node,
    tag_name: EId,
    inherited: &InheritedStyle,
    opt: &Options,
    ctx: &mut Context,
) {
    if tag_name.is_paint_server() {
        paint_server::convert(node, tag_name, &mut ctx.defs);
        return;
    }

    // Nothing inside `defs` is rendered, but it can contain more definitions.
    let mut g = Group::default();
    convert_children(node, inherited, opt, ctx, &mut g);
}

fn convert_element(
    node: roxmltree::Node,
    tag_name: EId,
    inherited: &InheritedStyle,
    opt: &Options,
    ctx: &mut Context,
    parent: &mut Group,
) {
    match tag_name {
        EId::Style => {
            log::warn!("'style' elements are not supported. Skipped.");
            return;
        }
        EId::Svg => {
            log::warn!("Nested 'svg' elements are not supported. Skipped.");
            return;
        }
        EId::LinearGradient | EId::RadialGradient | EId::Pattern | EId::Stop => {
            log::debug!("'{}' outside of 'defs' is ignored.", tag_name);
            return;
        }
        _ => {}
    }

    let (style, child_inherited) =
        style::resolve(node, inherited, Inheritance::Full, ctx.text_mode, &ctx.defs);
    let id = node.attribute("id").unwrap_or_default().to_string();
    let transform = transform::resolve(node, "transform");

    match tag_name {
        EId::G | EId::Text | EId::Tspan => {
            if tag_name == EId::Text {
                ctx.text_cursor = TextCursor::from_text(node);
            } else if tag_name == EId::Tspan && ctx.text_mode {
                ctx.text_cursor.move_to_tspan(node);
            }

            let mut g = Group {
                id,
                transform,
                style,
                clip: None,
                children: Vec::new(),
            };

            convert_children(node, &child_inherited, opt, ctx, &mut g);
            parent.children.push(Node::Group(Box::new(g)));
        }
        EId::Image => {
            let img = image::convert(node, id, transform, style);
            parent.children.push(Node::Image(Box::new(img)));
        }
        _ => {
            if let Some(kind) = shapes::convert(node, tag_name) {
                parent.children.push(Node::Shape(Box::new(Shape {
                    id,
                    kind,
                    transform,
                    style,
                })));
            }
        }
    }
}
