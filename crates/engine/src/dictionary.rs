// Header and default style derivation.
//
// A seed carries normalized colors plus the raw font-weight/style strings;
// recognizing what counts as bold or italic is the compiler's job, so the
// vocabulary lives in exactly one place.

use serde::{Deserialize, Serialize};

use gridport_config::GridTheme;

use crate::color;
use crate::columns::BorderSeed;

/// Pre-compilation form of a dictionary style record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSeed {
    pub font_color: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_align: Option<String>,
    pub background: Option<String>,
    pub border_horizontal: BorderSeed,
    pub border_vertical: BorderSeed,
    /// Banding fill consumed only by the compiler when it synthesizes the
    /// alternate-row record. Not a spreadsheet style property itself.
    pub alternate_background: Option<String>,
    /// Banding font color, same lifecycle as `alternate_background`.
    pub alternate_font_color: Option<String>,
}

/// The two global style seeds every compilation starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDictionary {
    pub header: StyleSeed,
    pub default: StyleSeed,
}

/// Derive the header and default seeds from a theme.
pub fn build_dictionary(theme: &GridTheme) -> StyleDictionary {
    let header_section = &theme.column_header;
    let values = &theme.values;

    let border_horizontal = BorderSeed {
        color: color::normalize(&theme.grid.horizontal.color),
        thickness: Some(theme.grid.horizontal.thickness),
    };
    let border_vertical = BorderSeed {
        color: color::normalize(&theme.grid.vertical.color),
        thickness: Some(theme.grid.vertical.thickness),
    };

    let header = StyleSeed {
        font_color: color::normalize(&header_section.color),
        font_size: Some(header_section.font_size),
        font_family: non_empty(&header_section.font_family),
        font_weight: non_empty(&header_section.font_weight),
        font_style: None,
        text_align: non_empty(&header_section.text_align),
        background: color::normalize(&header_section.background_color),
        border_horizontal: border_horizontal.clone(),
        border_vertical: border_vertical.clone(),
        alternate_background: None,
        alternate_font_color: None,
    };

    let default = StyleSeed {
        font_color: color::normalize(&values.font_color),
        font_size: Some(values.font_size),
        font_family: non_empty(&values.font_family),
        font_weight: non_empty(&values.font_weight),
        font_style: non_empty(&values.font_style),
        text_align: non_empty(&values.text_align),
        background: color::normalize(&values.background_color),
        border_horizontal,
        border_vertical,
        alternate_background: color::normalize(&values.alternate_row_background),
        alternate_font_color: color::normalize(&values.alternate_row_font),
    };

    StyleDictionary { header, default }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_seed_from_column_header_section() {
        let dictionary = build_dictionary(&GridTheme::default());
        let header = &dictionary.header;

        assert_eq!(header.font_color.as_deref(), Some("FF000000"));
        assert_eq!(header.font_size, Some(14.0));
        assert_eq!(header.font_family.as_deref(), Some("Arial"));
        assert_eq!(header.font_weight.as_deref(), Some("bold"));
        assert_eq!(header.text_align.as_deref(), Some("center"));
        assert_eq!(header.background.as_deref(), Some("FFF1F1F1"));
        assert!(header.alternate_background.is_none());
    }

    #[test]
    fn test_default_seed_carries_banding_side_channel() {
        let dictionary = build_dictionary(&GridTheme::default());
        let default = &dictionary.default;

        assert_eq!(default.background.as_deref(), Some("FFFFFFFF"));
        assert_eq!(default.alternate_background.as_deref(), Some("FFF9F9F9"));
        assert_eq!(default.alternate_font_color.as_deref(), Some("FF333333"));
        assert_eq!(default.font_style.as_deref(), Some("normal"));
    }

    #[test]
    fn test_grid_colors_feed_both_seeds() {
        let mut theme = GridTheme::default();
        theme.grid.horizontal.color = "#111111".into();
        theme.grid.vertical.color = "#222222".into();
        theme.grid.vertical.thickness = 2.0;

        let dictionary = build_dictionary(&theme);
        for seed in [&dictionary.header, &dictionary.default] {
            assert_eq!(seed.border_horizontal.color.as_deref(), Some("FF111111"));
            assert_eq!(seed.border_vertical.color.as_deref(), Some("FF222222"));
            assert_eq!(seed.border_vertical.thickness, Some(2.0));
        }
    }

    #[test]
    fn test_bad_colors_normalize_to_absent() {
        let mut theme = GridTheme::default();
        theme.column_header.background_color = "header-gray".into();
        let dictionary = build_dictionary(&theme);
        assert!(dictionary.header.background.is_none());
    }
}
