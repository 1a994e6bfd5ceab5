// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::names::PRESENTATION_ATTRIBUTES;
use super::paint_server::Defs;
use super::units::{self, parse_number_list};
use crate::{Paint, Style};

/// Style properties passed from a parent element to its children.
///
/// Holds the merged property map of the parent, keyed by a lowercase name.
#[derive(Clone, Default, Debug)]
pub(crate) struct InheritedStyle(HashMap<String, String>);

impl InheritedStyle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn insert_if_missing(&mut self, name: &str, value: &str) {
        if !self.0.contains_key(name) {
            self.0.insert(name.to_string(), value.to_string());
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Controls whether inherited properties are resolved into the style record.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Inheritance {
    /// Inline style, then presentation attributes, then inherited properties.
    Full,
    /// Inline style and presentation attributes only.
    ///
    /// Inherited properties are still passed down to children.
    ExplicitOnly,
}

/// Splits an inline `style` attribute into declarations.
///
/// `simplecss` stops at the first invalid declaration, so each `;`-separated
/// chunk is tokenized on its own. An invalid chunk drops only itself.
pub(crate) fn inline_declarations(
    text: &str,
) -> impl Iterator<Item = simplecss::Declaration<'_>> {
    text.split(';').flat_map(simplecss::DeclarationTokenizer::from)
}

/// Resolves element's style.
///
/// Returns the resolved style record and the merged property map
/// that should be passed to children.
pub(crate) fn resolve(
    node: roxmltree::Node,
    parent: &InheritedStyle,
    inheritance: Inheritance,
    text_mode: bool,
    defs: &Defs,
) -> (Style, InheritedStyle) {
    let inline: Vec<(String, &str)> = node
        .attribute("style")
        .map(|text| {
            inline_declarations(text)
                .map(|d| (d.name.to_ascii_lowercase(), d.value.trim()))
                .collect()
        })
        .unwrap_or_default();

    let attributes: Vec<(&str, &str)> = PRESENTATION_ATTRIBUTES
        .iter()
        .filter_map(|aid| node.attribute(*aid).map(|v| (*aid, v.trim())))
        .collect();

    // Highest priority first. The last inline declaration wins.
    let mut merged = InheritedStyle::default();
    for (name, value) in inline.iter().rev() {
        merged.insert_if_missing(name, value);
    }
    for (name, value) in &attributes {
        merged.insert_if_missing(name, value);
    }
    for (name, value) in parent.iter() {
        merged.insert_if_missing(name, value);
    }

    // Lowest priority first, so that later layers override earlier ones.
    let mut resolver = Resolver {
        style: Style::default(),
        text_mode,
        defs,
    };

    if inheritance == Inheritance::Full {
        for (name, value) in parent.iter() {
            resolver.apply(name, value);
        }
    }

    for (name, value) in attributes {
        resolver.apply(name, value);
    }

    for (name, value) in &inline {
        resolver.apply(name, value);
    }

    (resolver.style, merged)
}

struct Resolver<'a> {
    style: Style,
    text_mode: bool,
    defs: &'a Defs,
}

impl Resolver<'_> {
    fn apply(&mut self, name: &str, value: &str) {
        let style = &mut self.style;
        match name {
            "fill" => {
                style.fill = self.defs.resolve_paint(value);
            }
            "stroke" => {
                let paint = self.defs.resolve_paint(value);
                if matches!(paint, Some(ref p) if *p != Paint::None) {
                    style.has_stroke = true;
                }
                style.stroke = paint;
            }
            "stroke-width" => {
                if let Some(n) = units::parse_number(value, name) {
                    if self.text_mode {
                        style.text_stroke_width = Some(n);
                    } else {
                        style.line_width = Some(n);
                    }
                }
            }
            "opacity" => set_number(&mut style.opacity, value, name),
            "fill-opacity" => set_number(&mut style.fill_opacity, value, name),
            "stroke-opacity" => set_number(&mut style.stroke_opacity, value, name),
            "stroke-dashoffset" => set_number(&mut style.dash_offset, value, name),
            "stroke-miterlimit" => set_number(&mut style.miter_limit, value, name),
            "font-size" => set_number(&mut style.font_size, value, name),
            "stroke-dasharray" => {
                style.dash_array = if value == "none" {
                    None
                } else {
                    Some(parse_number_list(value))
                };
            }
            "stroke-linecap" => set_parsed(&mut style.line_cap, value, name),
            "stroke-linejoin" => set_parsed(&mut style.line_join, value, name),
            "font-style" => set_parsed(&mut style.font_style, value, name),
            "text-align" => set_parsed(&mut style.text_align, value, name),
            "alignment-baseline" => {
                let mut baseline = None;
                set_parsed(&mut baseline, value, name);
                if let Some(baseline) = baseline {
                    style.baseline = baseline;
                }
            }
            "font-family" => style.font_family = Some(value.to_string()),
            "font-weight" => style.font_weight = Some(value.to_string()),
            _ => {}
        }
    }
}

fn set_number(field: &mut Option<f32>, value: &str, name: &str) {
    if let Some(n) = units::parse_number(value, name) {
        *field = Some(n);
    }
}

fn set_parsed<T: std::str::FromStr>(field: &mut Option<T>, value: &str, name: &str) {
    match value.parse() {
        Ok(v) => *field = Some(v),
        Err(_) => log::debug!("Invalid '{}' value: '{}'. Skipped.", name, value),
    }
}
