// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use super::names::EId;
use super::{style, transform, units, OptionLog};
use crate::{Color, LinearGradient, Paint, Stop};

/// Paint definitions registered from `defs`, by ID.
#[derive(Default, Debug)]
pub(crate) struct Defs {
    paint: HashMap<String, Paint>,
}

impl Defs {
    /// Registers a paint under `id`.
    ///
    /// Each ID can be registered only once, later definitions are ignored.
    pub fn register(&mut self, id: &str, paint: Paint) {
        if self.paint.contains_key(id) {
            log::warn!("Paint server '{}' is already defined. Skipped.", id);
            return;
        }

        self.paint.insert(id.to_string(), paint);
    }

    /// Resolves a `fill` or `stroke` value.
    ///
    /// A `url(#id)` reference resolves to the registered paint, or to `None`
    /// when nothing is registered under `id`. Any other value is passed through.
    ///
    /// A fallback paint after `url(#id)` is ignored.
    pub fn resolve_paint(&self, value: &str) -> Option<Paint> {
        let value = value.trim();

        match svgtypes::Paint::from_str(value) {
            Ok(svgtypes::Paint::FuncIRI(id, _)) => self
                .paint
                .get(id)
                .cloned()
                .log_none(|| log::debug!("'{}' is not a registered paint server.", id)),
            Ok(svgtypes::Paint::None) => Some(Paint::None),
            Ok(svgtypes::Paint::Color(c)) => Some(Paint::Color(Color::from(c))),
            Ok(_) => Some(Paint::Other(value.to_string())),
            Err(_) => {
                log::debug!("Failed to parse paint '{}'. Passed through.", value);
                Some(Paint::Other(value.to_string()))
            }
        }
    }
}

/// Converts a paint definition element found inside `defs`.
pub(crate) fn convert(node: roxmltree::Node, tag_name: EId, defs: &mut Defs) {
    let paint = match tag_name {
        EId::LinearGradient => convert_linear(node),
        _ => {
            log::warn!("'{}' is not supported. Skipped.", tag_name);
            return;
        }
    };

    let id = node.attribute("id").unwrap_or_default();
    if id.is_empty() {
        log::debug!("'{}' without an ID cannot be referenced.", tag_name);
        return;
    }

    defs.register(id, Paint::LinearGradient(paint));
}

#[inline(never)]
fn convert_linear(node: roxmltree::Node) -> Arc<LinearGradient> {
    Arc::new(LinearGradient {
        id: node.attribute("id").unwrap_or_default().to_string(),
        x1: units::convert_user_length(node, "x1", 0.0),
        y1: units::convert_user_length(node, "y1", 0.0),
        x2: units::convert_user_length(node, "x2", 10.0),
        y2: units::convert_user_length(node, "y2", 0.0),
        transform: transform::resolve(node, "gradientTransform"),
        stops: convert_stops(node),
    })
}

fn convert_stops(grad: roxmltree::Node) -> Vec<Stop> {
    let mut stops = Vec::new();
    for stop in grad.children() {
        if !stop.is_element() || stop.tag_name().name() != EId::Stop.to_str() {
            continue;
        }

        let offset = stop.attribute("offset").map(parse_offset).unwrap_or(0.0);

        let mut color = stop_property(stop, "stop-color")
            .and_then(|v| svgtypes::Color::from_str(v).ok())
            .map(Color::from)
            .unwrap_or_else(Color::black);

        if let Some(opacity) = stop_property(stop, "stop-opacity")
            .and_then(|v| units::parse_number(v, "stop-opacity"))
        {
            let alpha = color.alpha as f32 * opacity.clamp(0.0, 1.0);
            color.alpha = alpha.round() as u8;
        }

        stops.push(Stop { offset, color });
    }

    stops
}

/// Looks up a stop property in the inline style first, then in attributes.
fn stop_property<'a>(stop: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    if let Some(text) = stop.attribute("style") {
        let value = style::inline_declarations(text)
            .filter(|d| d.name == name)
            .last()
            .map(|d| d.value);
        if value.is_some() {
            return value;
        }
    }

    stop.attribute(name)
}

/// Parses a stop `offset`.
///
/// A value with `%` is a percentage, otherwise a bare fraction.
/// Anything unparsable is zero.
fn parse_offset(value: &str) -> f32 {
    let value = value.trim();
    let n = match value.find('%') {
        Some(idx) => value[..idx].trim().parse::<f32>().map(|n| n / 100.0),
        None => value.parse::<f32>(),
    };

    match n {
        Ok(n) if n.is_finite() => n.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn func_iri() {
        let mut defs = Defs::default();
        let red = Paint::Color(Color::new_rgba(255, 0, 0, 255));
        defs.register("g1", red.clone());
        assert_eq!(defs.resolve_paint("url(#g1)"), Some(red.clone()));
        assert_eq!(defs.resolve_paint(" url(#g1) blue "), Some(red));
        assert_eq!(defs.resolve_paint("url(#g2) none"), None);
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("50%"), 0.5);
        assert_eq!(parse_offset("0.25"), 0.25);
        assert_eq!(parse_offset("oops"), 0.0);
        assert_eq!(parse_offset("150%"), 1.0);
    }

    #[test]
    fn pass_through_values() {
        let defs = Defs::default();
        assert_eq!(defs.resolve_paint("none"), Some(Paint::None));
        assert_eq!(
            defs.resolve_paint("#ff0000"),
            Some(Paint::Color(Color::new_rgba(255, 0, 0, 255)))
        );
        assert_eq!(
            defs.resolve_paint("currentColor"),
            Some(Paint::Other("currentColor".to_string()))
        );
        assert_eq!(defs.resolve_paint("url(#missing)"), None);
    }
}
