// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{TransformListParser, TransformListToken};
use tiny_skia_path::Transform;

/// Converts a single transform token into a matrix.
///
/// Skew functions are recognized, but not supported and resolve to identity.
fn token_to_transform(token: TransformListToken) -> Transform {
    match token {
        TransformListToken::Matrix { a, b, c, d, e, f } => Transform::from_row(
            a as f32, b as f32, c as f32, d as f32, e as f32, f as f32,
        ),
        TransformListToken::Translate { tx, ty } => {
            Transform::from_translate(tx as f32, ty as f32)
        }
        TransformListToken::Scale { sx, sy } => Transform::from_scale(sx as f32, sy as f32),
        TransformListToken::Rotate { angle } => Transform::from_rotate(angle as f32),
        TransformListToken::SkewX { .. } => {
            log::warn!("'skewX' is not supported. Identity is used instead.");
            Transform::default()
        }
        TransformListToken::SkewY { .. } => {
            log::warn!("'skewY' is not supported. Identity is used instead.");
            Transform::default()
        }
    }
}

/// Parses a transform list into tokens, in source order.
///
/// `svgtypes` stops at the first invalid function, so the list is fed to it
/// one `name(args)` chunk at a time. An unknown or malformed function drops
/// only itself.
fn parse_tokens(text: &str) -> Vec<TransformListToken> {
    let mut tokens = Vec::new();
    for chunk in text.split_inclusive(')') {
        let chunk = chunk.trim_start_matches(|c: char| c == ',' || c.is_ascii_whitespace());
        if chunk.is_empty() {
            continue;
        }

        for token in TransformListParser::from(chunk) {
            match token {
                Ok(v) => tokens.push(v),
                Err(e) => {
                    log::debug!("Invalid transform function '{}': {}. Skipped.", chunk, e);
                    break;
                }
            }
        }
    }

    tokens
}

/// Parses a transform list into a single matrix.
///
/// Functions are collected in source order and then applied right to left,
/// so the leftmost function ends up outermost.
pub fn parse_transform(text: &str) -> Transform {
    let mut ts = Transform::default();
    for token in parse_tokens(text).into_iter().rev() {
        ts = ts.post_concat(token_to_transform(token));
    }

    ts
}

/// Resolves the `transform` attribute of an element.
///
/// Returns `None` when the attribute is not set.
pub(crate) fn resolve(node: roxmltree::Node, aid: &str) -> Option<Transform> {
    node.attribute(aid).map(parse_transform)
}
