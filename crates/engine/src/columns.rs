// Per-column style resolution.
//
// Every column gets the same values-section styling by default; callers that
// need true per-column differentiation substitute overrides before invoking
// the compiler. The resolver's only job is to hand the compiler a complete
// property bag for every column, so nothing downstream special-cases a
// missing field.

use serde::{Deserialize, Serialize};

use gridport_config::GridTheme;

use crate::color;

/// One border edge descriptor before compilation: normalized color plus
/// thickness in gridline units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderSeed {
    pub color: Option<String>,
    pub thickness: Option<f64>,
}

/// Loose per-column property bag with every spelling already reconciled and
/// every color already normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnProps {
    pub value: Option<String>,
    pub font_color: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub font_family: Option<String>,
    pub background: Option<String>,
    pub text_align: Option<String>,
    pub vertical_align: Option<String>,
    pub number_format: Option<String>,
    pub wrap_text: Option<bool>,
    pub underline: Option<bool>,
    pub border_horizontal: BorderSeed,
    pub border_vertical: BorderSeed,
    pub alternate_background: Option<String>,
    pub alternate_font_color: Option<String>,
}

/// A raw column identifier paired with its resolved property bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub column: String,
    pub props: ColumnProps,
}

/// Ordered per-column input to the compiler. Order is meaningful and follows
/// the declared column list.
pub type PerColumnInput = Vec<ColumnEntry>;

/// Sanitize a raw column name into a style-identifier token: internal
/// whitespace runs collapse to a single underscore and anything outside
/// `[A-Za-z0-9_-]` is dropped.
///
/// Not injective: "a.b" and "a/b" both sanitize to "ab". Collisions are a
/// documented limitation left to the caller.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            in_space = true;
            continue;
        }
        if in_space {
            out.push('_');
            in_space = false;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out
}

/// Style identifier for a column's base record.
pub fn column_style_id(raw: &str) -> String {
    format!("col_{}", sanitize_identifier(raw))
}

/// Style identifier for a column's alternate-row record.
pub fn alternate_style_id(raw: &str) -> String {
    format!("col_{}_alternate", sanitize_identifier(raw))
}

/// Build the uniform property bag the values section prescribes.
pub fn column_props_from_theme(theme: &GridTheme) -> ColumnProps {
    let values = &theme.values;
    ColumnProps {
        value: None,
        font_color: color::normalize(&values.font_color),
        font_size: Some(values.font_size),
        font_weight: non_empty(&values.font_weight),
        font_style: non_empty(&values.font_style),
        font_family: non_empty(&values.font_family),
        background: color::normalize(&values.background_color),
        text_align: non_empty(&values.text_align),
        vertical_align: None,
        number_format: None,
        wrap_text: None,
        underline: None,
        border_horizontal: BorderSeed {
            color: color::normalize(&theme.grid.horizontal.color),
            thickness: Some(theme.grid.horizontal.thickness),
        },
        border_vertical: BorderSeed {
            color: color::normalize(&theme.grid.vertical.color),
            thickness: Some(theme.grid.vertical.thickness),
        },
        alternate_background: color::normalize(&values.alternate_row_background),
        alternate_font_color: color::normalize(&values.alternate_row_font),
    }
}

/// Resolve a complete property bag for every supplied column.
pub fn resolve_columns(theme: &GridTheme, columns: &[String]) -> PerColumnInput {
    let props = column_props_from_theme(theme);
    columns
        .iter()
        .map(|column| ColumnEntry {
            column: column.clone(),
            props: props.clone(),
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
