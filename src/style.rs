use umya_spreadsheet::Style;
use umya_spreadsheet::structs::PatternValues;

use crate::model::{CellFormat, Rgb};

/// ARGB for umya, opaque and lowercase.
///
/// umya's `Color::set_argb()` rewrites values that exactly match one of its
/// built-in INDEXED_COLORS (uppercase) into `indexed="n"`, which viewers may
/// resolve against a different palette. Lowercase keeps `rgb="..."` in the
/// file; Excel reads hex case-insensitively.
pub fn argb(color: &Rgb) -> String {
    format!("ff{}", color.hex().to_ascii_lowercase())
}

pub fn to_style(format: &CellFormat) -> Style {
    let mut style = Style::default();

    if format.has_font() {
        let font = style.get_font_mut();
        if format.bold {
            font.set_bold(true);
        }
        if format.italic {
            font.set_italic(true);
        }
        if let Some(size) = format.size {
            font.set_size(size);
        }
        if let Some(color) = &format.color {
            font.get_color_mut().set_argb(argb(color));
        }
    }

    if let Some(fill) = &format.fill {
        let argb = argb(fill);
        let pattern = style.get_fill_mut().get_pattern_fill_mut();
        pattern.set_pattern_type(PatternValues::Solid);
        pattern.get_foreground_color_mut().set_argb(argb.clone());
        pattern.get_background_color_mut().set_argb(argb);
    }

    style
}
