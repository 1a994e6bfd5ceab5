// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::units::first_list_number;
use super::Options;
use crate::{Font, Style, Text, Transform};

/// Fonts smaller than this are measured at this size and scaled down.
pub(crate) const MIN_FONT_SIZE: f32 = 9.0;

/// A text layout cursor.
///
/// Lives for a single `text` subtree.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub(crate) struct TextCursor {
    pub x: f32,
    pub y: f32,
}

impl TextCursor {
    /// Starts a cursor at the `text` element position.
    pub fn from_text(node: roxmltree::Node) -> Self {
        let x = first_list_number(node, "x").unwrap_or(0.0);
        let y = first_list_number(node, "y").unwrap_or(0.0);
        let dx = first_list_number(node, "dx").unwrap_or(0.0);
        let dy = first_list_number(node, "dy").unwrap_or(0.0);
        TextCursor {
            x: x + dx,
            y: y + dy,
        }
    }

    /// Moves the cursor to a `tspan` element position.
    ///
    /// `x` and `y` are absolute and optional, `dx` and `dy` are always applied.
    pub fn move_to_tspan(&mut self, node: roxmltree::Node) {
        if let Some(x) = first_list_number(node, "x") {
            self.x = x;
        }

        if let Some(y) = first_list_number(node, "y") {
            self.y = y;
        }

        self.x += first_list_number(node, "dx").unwrap_or(0.0);
        self.y += first_list_number(node, "dy").unwrap_or(0.0);
    }
}

/// Builds a text run at the cursor and advances the cursor by its width.
///
/// Returns `None` for whitespace-only content.
pub(crate) fn convert_run(
    content: &str,
    style: &Style,
    cursor: &mut TextCursor,
    opt: &Options,
) -> Option<Text> {
    let text = collapse_whitespace(content);
    if text.is_empty() {
        return None;
    }

    let mut font = Font {
        family: style
            .font_family
            .clone()
            .unwrap_or_else(|| opt.font_family.clone()),
        size: style.font_size.unwrap_or(opt.font_size),
        weight: style
            .font_weight
            .as_deref()
            .map(parse_font_weight)
            .unwrap_or(400),
        style: style.font_style.unwrap_or_default(),
    };

    if !(font.size > 0.0) {
        log::debug!("Text run '{}' has an invalid font size. Skipped.", text);
        return None;
    }

    let mut transform = None;
    let mut factor = 1.0;
    if font.size < MIN_FONT_SIZE {
        factor = font.size / MIN_FONT_SIZE;
        font.size = MIN_FONT_SIZE;

        // Scale around the run origin.
        let (x, y) = (cursor.x, cursor.y);
        transform = Some(Transform::from_row(
            factor,
            0.0,
            0.0,
            factor,
            x - x * factor,
            y - y * factor,
        ));
    }

    let width = opt.text_measure.measure(&text, &font) * factor;

    let run = Text {
        text,
        x: cursor.x,
        y: cursor.y,
        font,
        width,
        transform,
        style: style.clone(),
    };

    cursor.x += width;

    Some(run)
}

fn collapse_whitespace(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for word in text.split_ascii_whitespace() {
        if !s.is_empty() {
            s.push(' ');
        }

        s.push_str(word);
    }

    s
}

/// Maps a `font-weight` value to a numeric weight.
///
/// Relative values are resolved against the normal weight.
pub(crate) fn parse_font_weight(value: &str) -> u16 {
    match value.trim() {
        "normal" => 400,
        "bold" | "bolder" => 700,
        "lighter" => 300,
        n => match n.parse::<f32>() {
            Ok(n) if n.is_finite() => n.round().clamp(1.0, 1000.0) as u16,
            _ => {
                log::debug!("Invalid 'font-weight' value: '{}'. Normal is used.", n);
                400
            }
        },
    }
}
