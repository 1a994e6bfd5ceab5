// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgscene` converts an [SVG] document into a static tree of drawable nodes.

It is meant for 2D rendering pipelines that already have their own group, shape,
text and image primitives and just want to ingest SVG markup as a display tree.
It is not a complete SVG or CSS engine.

## Features

- Presentation attributes, inline `style` and inherited values are resolved
  into a single style record per node
- `transform` lists are composed into a single matrix
- Linear gradients declared inside `defs` are resolved via `url(#id)`
- Basic shapes keep their own geometry, paths are parsed into absolute segments
- `text` and `tspan` are laid out with a simple running cursor
- `viewBox` is mapped onto the viewport using `xMidYMid meet`
- The resulting tree can be written back to SVG

## Limitations

- `<style>` elements and CSS selectors are ignored
- Percentage and relative units are supported only by the root `width` and `height`
- `skewX`/`skewY` transforms are ignored
- Only linear gradients are supported
- Nothing is loaded from the network or the file system

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod parser;
#[cfg(feature = "text")]
mod text;
mod tree;
mod writer;

pub use parser::*;
#[cfg(feature = "text")]
pub use text::FontdbTextMeasure;
pub use tree::*;
pub use writer::WriteOptions;

#[cfg(feature = "text")]
pub use fontdb;
