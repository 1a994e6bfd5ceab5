// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::units::convert_user_length;
use super::XLINK_NS;
use crate::{Image, Style, Transform};

pub(crate) fn convert(
    node: roxmltree::Node,
    id: String,
    transform: Option<Transform>,
    style: Style,
) -> Image {
    let href = node
        .attribute("href")
        .or_else(|| node.attribute((XLINK_NS, "href")))
        .map(str::to_string);

    if href.is_none() {
        log::debug!("Image '{}' has no 'href'.", id);
    }

    Image {
        id,
        x: convert_user_length(node, "x", 0.0),
        y: convert_user_length(node, "y", 0.0),
        width: convert_user_length(node, "width", 0.0),
        height: convert_user_length(node, "height", 0.0),
        href,
        transform,
        style,
    }
}
