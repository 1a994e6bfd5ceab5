// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use strict_num::ApproxEqUlps;
pub use tiny_skia_path::{Rect, Transform};

/// Approximate zero equality comparisons.
pub trait ApproxZeroUlps: ApproxEqUlps {
    /// Checks if the number is approximately zero.
    fn approx_zero_ulps(&self, ulps: <Self::Flt as strict_num::Ulps>::U) -> bool;
}

impl ApproxZeroUlps for f32 {
    fn approx_zero_ulps(&self, ulps: i32) -> bool {
        self.approx_eq_ulps(&0.0, ulps)
    }
}

/// Checks that the current number is > 0.
pub trait IsValidLength {
    /// Checks that the current number is > 0.
    fn is_valid_length(&self) -> bool;
}

impl IsValidLength for f32 {
    #[inline]
    fn is_valid_length(&self) -> bool {
        *self > 0.0 && self.is_finite()
    }
}

/// A declared `viewBox` rectangle.
///
/// Stored exactly as written, so it can have a zero or negative size.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A viewBox to viewport mapping.
///
/// Always a uniform "meet" scale with the viewBox centered
/// inside the viewport (`xMidYMid meet`).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBoxTransform {
    /// Uniform scale factor.
    pub scale: f32,
    /// Horizontal translation, applied after scaling.
    pub tx: f32,
    /// Vertical translation, applied after scaling.
    pub ty: f32,
}

impl ViewBoxTransform {
    /// Computes a mapping of `view_box` onto a `width`x`height` viewport.
    ///
    /// Returns `None` when either rectangle has a non-positive size.
    pub fn meet(view_box: ViewBox, width: f32, height: f32) -> Option<Self> {
        if !(view_box.width.is_valid_length()
            && view_box.height.is_valid_length()
            && width.is_valid_length()
            && height.is_valid_length())
        {
            return None;
        }

        let sx = width / view_box.width;
        let sy = height / view_box.height;
        let scale = sx.min(sy);

        let tx = -view_box.x * scale + (width - view_box.width * scale) / 2.0;
        let ty = -view_box.y * scale + (height - view_box.height * scale) / 2.0;

        Some(ViewBoxTransform { scale, tx, ty })
    }

    /// Converts the mapping into an affine transform.
    pub fn to_transform(&self) -> Transform {
        Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.tx, self.ty)
    }
}
