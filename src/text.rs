// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{parse_font_families, FontFamily};

use crate::{ApproximateTextMeasure, Font, FontStyle, TextMeasure};

/// A text measurer backed by a fonts database.
///
/// Runs are shaped with `rustybuzz` using the best matching face.
/// When no face matches, the run is measured by [`ApproximateTextMeasure`].
pub struct FontdbTextMeasure {
    db: fontdb::Database,
}

impl FontdbTextMeasure {
    /// Creates a new measurer.
    pub fn new(db: fontdb::Database) -> Self {
        FontdbTextMeasure { db }
    }

    /// Returns the underlying database.
    pub fn fontdb(&self) -> &fontdb::Database {
        &self.db
    }

    fn query(&self, font: &Font) -> Option<fontdb::ID> {
        let families = match parse_font_families(&font.family) {
            Ok(v) => v,
            Err(_) => {
                log::debug!("Invalid 'font-family' value: '{}'.", font.family);
                Vec::new()
            }
        };

        let mut name_list = Vec::new();
        for family in &families {
            name_list.push(match family {
                FontFamily::Serif => fontdb::Family::Serif,
                FontFamily::SansSerif => fontdb::Family::SansSerif,
                FontFamily::Cursive => fontdb::Family::Cursive,
                FontFamily::Fantasy => fontdb::Family::Fantasy,
                FontFamily::Monospace => fontdb::Family::Monospace,
                FontFamily::Named(s) => fontdb::Family::Name(s),
            });
        }

        // Use the default font as fallback.
        name_list.push(fontdb::Family::Serif);

        let style = match font.style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        };

        let query = fontdb::Query {
            families: &name_list,
            weight: fontdb::Weight(font.weight),
            stretch: fontdb::Stretch::Normal,
            style,
        };

        let id = self.db.query(&query);
        if id.is_none() {
            log::warn!("No match for '{}' font-family.", font.family);
        }

        id
    }
}

impl std::fmt::Debug for FontdbTextMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FontdbTextMeasure")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl TextMeasure for FontdbTextMeasure {
    fn measure(&self, text: &str, font: &Font) -> f32 {
        let width = self.query(font).and_then(|id| {
            self.db
                .with_face_data(id, |data, face_index| {
                    let face = rustybuzz::Face::from_slice(data, face_index)?;

                    let mut buffer = rustybuzz::UnicodeBuffer::new();
                    buffer.push_str(text);
                    let output = rustybuzz::shape(&face, &[], buffer);

                    let advance: i32 = output.glyph_positions().iter().map(|p| p.x_advance).sum();
                    Some(advance as f32 * font.size / face.units_per_em() as f32)
                })
                .flatten()
        });

        width.unwrap_or_else(|| ApproximateTextMeasure.measure(text, font))
    }
}
