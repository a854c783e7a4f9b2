// Style list compilation.
//
// Emission order is the stable contract: header, default, alternateRow, then
// col_<id> / col_<id>_alternate per column in declared order. Duplicate
// identifiers are legal; a downstream writer takes the last match. Traversal
// always follows the declared column list, never a map's iteration order.

use crate::columns::{alternate_style_id, column_style_id, BorderSeed, ColumnEntry};
use crate::dictionary::{StyleDictionary, StyleSeed};
use crate::record::{
    AlignmentBlock, BorderBlock, BorderEdge, FillPattern, FontBlock, HorizontalAlignment,
    InteriorBlock, LineStyle, StyleRecord, ALTERNATE_ROW_ID, DEFAULT_BORDER_WEIGHT, DEFAULT_ID,
    HEADER_ID,
};

/// Font weights that render bold, the single source of truth for the
/// font-weight vocabulary.
const BOLD_WEIGHTS: [&str; 3] = ["bold", "700", "bolder"];

/// True for any weight spelling that renders bold.
pub fn is_bold_weight(weight: &str) -> bool {
    BOLD_WEIGHTS.iter().any(|w| weight.eq_ignore_ascii_case(w))
}

/// True for the italic font style, any casing.
pub fn is_italic_style(style: &str) -> bool {
    style.trim().eq_ignore_ascii_case("italic")
}

fn is_underline(style: Option<&str>, explicit: Option<bool>) -> bool {
    explicit.unwrap_or(false)
        || style
            .map(|s| s.trim().eq_ignore_ascii_case("underline"))
            .unwrap_or(false)
}

/// Map a theme alignment string onto the writer's four-way enum. Anything
/// unrecognized lands on Left.
pub fn map_alignment(raw: Option<&str>) -> HorizontalAlignment {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("center") => HorizontalAlignment::Center,
        Some("right") => HorizontalAlignment::Right,
        Some("justify") => HorizontalAlignment::Justify,
        _ => HorizontalAlignment::Left,
    }
}

fn border_edge(seed: &BorderSeed) -> BorderEdge {
    BorderEdge {
        color: seed.color.clone(),
        line_style: LineStyle::Continuous,
        weight: seed.thickness.unwrap_or(DEFAULT_BORDER_WEIGHT),
    }
}

// Top/bottom take the horizontal gridline, left/right the vertical.
fn border_block(horizontal: &BorderSeed, vertical: &BorderSeed) -> BorderBlock {
    let h = border_edge(horizontal);
    let v = border_edge(vertical);
    BorderBlock {
        top: h.clone(),
        bottom: h,
        left: v.clone(),
        right: v,
    }
}

fn solid_fill(color: String) -> InteriorBlock {
    InteriorBlock {
        color,
        pattern: FillPattern::Solid,
    }
}

fn seed_record(id: &str, seed: &StyleSeed) -> StyleRecord {
    StyleRecord {
        id: id.to_string(),
        font: Some(FontBlock {
            color: seed.font_color.clone(),
            size: seed.font_size,
            bold: seed.font_weight.as_deref().map(is_bold_weight).unwrap_or(false),
            italic: seed.font_style.as_deref().map(is_italic_style).unwrap_or(false),
            underline: is_underline(seed.font_style.as_deref(), None),
            family: seed.font_family.clone(),
        }),
        alignment: Some(AlignmentBlock {
            horizontal: map_alignment(seed.text_align.as_deref()),
            wrap_text: false,
            indent: 0,
        }),
        interior: seed.background.clone().map(solid_fill),
        borders: Some(border_block(&seed.border_horizontal, &seed.border_vertical)),
        number_format: None,
    }
}

fn column_record(entry: &ColumnEntry) -> StyleRecord {
    let props = &entry.props;
    StyleRecord {
        id: column_style_id(&entry.column),
        font: Some(FontBlock {
            color: props.font_color.clone(),
            size: props.font_size,
            bold: props.font_weight.as_deref().map(is_bold_weight).unwrap_or(false),
            italic: props.font_style.as_deref().map(is_italic_style).unwrap_or(false),
            underline: is_underline(props.font_style.as_deref(), props.underline),
            family: props.font_family.clone(),
        }),
        alignment: Some(AlignmentBlock {
            horizontal: map_alignment(props.text_align.as_deref()),
            wrap_text: props.wrap_text.unwrap_or(false),
            indent: 0,
        }),
        interior: props.background.clone().map(solid_fill),
        borders: Some(border_block(&props.border_horizontal, &props.border_vertical)),
        number_format: props.number_format.clone(),
    }
}

/// Clone a base record into its banded-row variant: alternate fill, and the
/// alternate font color when one is set.
fn alternate_of(
    base: &StyleRecord,
    id: String,
    fill: &str,
    font_color: Option<&str>,
) -> StyleRecord {
    let mut alternate = base.clone();
    alternate.id = id;
    alternate.interior = Some(solid_fill(fill.to_string()));
    if let (Some(font), Some(color)) = (alternate.font.as_mut(), font_color) {
        font.color = Some(color.to_string());
    }
    alternate
}

/// Compile the ordered style list from the global dictionary and the
/// per-column input.
pub fn compile(dictionary: &StyleDictionary, per_column: &[ColumnEntry]) -> Vec<StyleRecord> {
    let mut records = Vec::with_capacity(3 + per_column.len() * 2);

    for (id, seed) in [
        (HEADER_ID, &dictionary.header),
        (DEFAULT_ID, &dictionary.default),
    ] {
        let record = seed_record(id, seed);
        let alternate = seed.alternate_background.as_deref().map(|fill| {
            alternate_of(
                &record,
                ALTERNATE_ROW_ID.to_string(),
                fill,
                seed.alternate_font_color.as_deref(),
            )
        });
        records.push(record);
        if let Some(alternate) = alternate {
            records.push(alternate);
        }
    }

    for entry in per_column {
        let record = column_record(entry);
        let alternate = entry.props.alternate_background.as_deref().map(|fill| {
            alternate_of(
                &record,
                alternate_style_id(&entry.column),
                fill,
                entry.props.alternate_font_color.as_deref(),
            )
        });
        records.push(record);
        if let Some(alternate) = alternate {
            records.push(alternate);
        }
    }

    records
}
