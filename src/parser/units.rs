// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};

use super::OptionLog;

/// Parses a single number from a length-like value.
///
/// Only unitless and `px` values are fully supported. Any other unit
/// is logged and its number is used as is.
pub(crate) fn parse_number(value: &str, aid: &str) -> Option<f32> {
    let length = Length::from_str(value.trim())
        .ok()
        .log_none(|| log::debug!("Failed to parse '{}' value: '{}'.", aid, value))?;

    match length.unit {
        Unit::None | Unit::Px => {}
        Unit::Percent => {
            log::warn!(
                "Percentage units are not supported in '{}'. Used as a plain number.",
                aid
            );
        }
        _ => {
            log::warn!(
                "Relative and absolute units are not supported in '{}'. Used as a plain number.",
                aid
            );
        }
    }

    let n = length.number as f32;
    if n.is_finite() {
        Some(n)
    } else {
        None
    }
}

/// Parses a numeric attribute.
pub(crate) fn number_attribute(node: roxmltree::Node, aid: &str) -> Option<f32> {
    parse_number(node.attribute(aid)?, aid)
}

/// Parses a numeric attribute and falls back to `def` when it's missing or invalid.
pub(crate) fn convert_user_length(node: roxmltree::Node, aid: &str, def: f32) -> f32 {
    number_attribute(node, aid).unwrap_or(def)
}

/// Parses a number list, like `stroke-dasharray` or `viewBox`.
///
/// Parsing stops at the first invalid number, keeping the numbers before it.
pub(crate) fn parse_number_list(value: &str) -> Vec<f32> {
    let mut list = Vec::new();
    for n in svgtypes::NumberListParser::from(value) {
        match n {
            Ok(n) if n.is_finite() => list.push(n as f32),
            _ => {
                log::debug!("Invalid number list: '{}'. Truncated.", value);
                break;
            }
        }
    }

    list
}

/// Parses the first number of a list attribute, like text `x` or `dy`.
pub(crate) fn first_list_number(node: roxmltree::Node, aid: &str) -> Option<f32> {
    let n = svgtypes::NumberListParser::from(node.attribute(aid)?)
        .next()?
        .ok()?;
    Some(n as f32).filter(|n| n.is_finite())
}

/// Resolves a root `width` or `height`.
///
/// A percentage is resolved against `fallback`.
/// A missing or invalid value resolves to `fallback`.
pub(crate) fn resolve_viewport_size(
    node: roxmltree::Node,
    aid: &str,
    fallback: Option<f32>,
) -> Option<f32> {
    let value = match node.attribute(aid) {
        Some(v) => v,
        None => return fallback,
    };

    let length = match Length::from_str(value.trim()) {
        Ok(v) => v,
        Err(_) => {
            log::debug!("Failed to parse root '{}': '{}'.", aid, value);
            return fallback;
        }
    };

    let n = length.number as f32;
    match length.unit {
        Unit::Percent => fallback
            .map(|base| base * n / 100.0)
            .log_none(|| log::debug!("Root '{}' is relative and has no fallback.", aid)),
        Unit::None | Unit::Px => Some(n),
        _ => {
            log::warn!(
                "Relative and absolute units are not supported in root '{}'. Used as a plain number.",
                aid
            );
            Some(n)
        }
    }
}
