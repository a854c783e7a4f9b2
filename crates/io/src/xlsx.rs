// XLSX export: hands compiled style records and raw row data to
// rust_xlsxwriter.
//
// The export is a presentation snapshot. Rows arrive as loose JSON objects
// and every cell is written as text through the cell stringifier; styles are
// resolved by identifier with the last match winning, since the style list
// may legally contain duplicates.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatUnderline, Workbook};
use serde_json::Value;

use gridport_engine::columns::{alternate_style_id, column_style_id};
use gridport_engine::record::{
    BorderEdge, HorizontalAlignment, LineStyle, StyleRecord, ALTERNATE_ROW_ID, DEFAULT_ID,
    HEADER_ID,
};

use crate::payload::cell_text;

/// Options for one export call.
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    pub sheet_name: &'a str,
    /// Header row height in points, typically the theme's columnHeader
    /// height.
    pub header_height: Option<f64>,
}

impl Default for ExportOptions<'_> {
    fn default() -> Self {
        ExportOptions {
            sheet_name: "Exported Data",
            header_height: None,
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    pub rows_exported: usize,
    pub cells_exported: usize,
    /// Distinct style identifiers resolvable from the supplied list.
    pub styles_resolved: usize,
}

impl ExportResult {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        format!(
            "{} row{}, {} cells, {} styles",
            self.rows_exported,
            if self.rows_exported == 1 { "" } else { "s" },
            self.cells_exported,
            self.styles_resolved
        )
    }
}

/// Default header-label resolver: first letter uppercased.
pub fn title_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Write one worksheet of row data styled by the compiled style list.
pub fn export(
    path: &Path,
    columns: &[String],
    header_label: &dyn Fn(&str) -> String,
    rows: &[Value],
    styles: &[StyleRecord],
    options: &ExportOptions,
) -> Result<ExportResult, String> {
    let mut result = ExportResult::default();

    let lookup = StyleLookup::new(styles);
    result.styles_resolved = lookup.len();

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(options.sheet_name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", options.sheet_name, e))?;

    if let Some(height) = options.header_height {
        worksheet
            .set_row_height(0, height)
            .map_err(|e| format!("Failed to set header row height: {}", e))?;
    }

    let header_format = build_format(lookup.get(HEADER_ID));
    for (col_idx, column) in columns.iter().enumerate() {
        worksheet
            .write_with_format(0, col_idx as u16, header_label(column), &header_format)
            .map_err(|e| format!("Failed to write header cell {}: {}", col_idx, e))?;
        result.cells_exported += 1;
    }

    // Formats are fixed per column and row parity; build them once.
    let formats: Vec<(Format, Format)> = columns
        .iter()
        .map(|column| {
            (
                build_format(lookup.cell_record(column, false)),
                build_format(lookup.cell_record(column, true)),
            )
        })
        .collect();

    for (row_idx, row) in rows.iter().enumerate() {
        let banded = row_idx % 2 == 1;
        for (col_idx, column) in columns.iter().enumerate() {
            let text = cell_text(row.get(column.as_str()).unwrap_or(&Value::Null));
            let (base, alternate) = &formats[col_idx];
            let format = if banded { alternate } else { base };
            worksheet
                .write_with_format((row_idx + 1) as u32, col_idx as u16, text.as_str(), format)
                .map_err(|e| {
                    format!("Failed to write cell ({}, {}): {}", row_idx + 1, col_idx, e)
                })?;
            result.cells_exported += 1;
        }
        result.rows_exported += 1;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    Ok(result)
}

/// Identifier index over a style list; later duplicates shadow earlier ones.
struct StyleLookup<'a> {
    by_id: HashMap<&'a str, &'a StyleRecord>,
}

impl<'a> StyleLookup<'a> {
    fn new(styles: &'a [StyleRecord]) -> Self {
        let mut by_id = HashMap::new();
        for record in styles {
            by_id.insert(record.id.as_str(), record);
        }
        StyleLookup { by_id }
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }

    fn get(&self, id: &str) -> Option<&'a StyleRecord> {
        self.by_id.get(id).copied()
    }

    /// Resolve the record for one data cell. Banded rows prefer the column's
    /// alternate record, then the global alternateRow, then the column's
    /// base record, then default.
    fn cell_record(&self, column: &str, banded: bool) -> Option<&'a StyleRecord> {
        if banded {
            self.get(&alternate_style_id(column))
                .or_else(|| self.get(ALTERNATE_ROW_ID))
                .or_else(|| self.get(&column_style_id(column)))
                .or_else(|| self.get(DEFAULT_ID))
        } else {
            self.get(&column_style_id(column))
                .or_else(|| self.get(DEFAULT_ID))
        }
    }
}

/// Build an Excel Format from a style record.
fn build_format(record: Option<&StyleRecord>) -> Format {
    let record = match record {
        Some(record) => record,
        None => return Format::new(),
    };

    let mut format = Format::new();

    if let Some(font) = &record.font {
        if font.bold {
            format = format.set_bold();
        }
        if font.italic {
            format = format.set_italic();
        }
        if font.underline {
            format = format.set_underline(FormatUnderline::Single);
        }
        if let Some(size) = font.size {
            format = format.set_font_size(size);
        }
        if let Some(rgb) = font.color.as_deref().and_then(argb_to_rgb) {
            format = format.set_font_color(Color::RGB(rgb));
        }
        if let Some(family) = &font.family {
            format = format.set_font_name(family);
        }
    }

    if let Some(alignment) = &record.alignment {
        format = match alignment.horizontal {
            HorizontalAlignment::Left => format.set_align(FormatAlign::Left),
            HorizontalAlignment::Center => format.set_align(FormatAlign::Center),
            HorizontalAlignment::Right => format.set_align(FormatAlign::Right),
            HorizontalAlignment::Justify => format.set_align(FormatAlign::Justify),
        };
        if alignment.wrap_text {
            format = format.set_text_wrap();
        }
        if alignment.indent > 0 {
            format = format.set_indent(alignment.indent);
        }
    }

    if let Some(interior) = &record.interior {
        if let Some(rgb) = argb_to_rgb(&interior.color) {
            format = format.set_background_color(Color::RGB(rgb));
        }
    }

    if let Some(borders) = &record.borders {
        let top = edge_to_border(&borders.top);
        if !matches!(top, FormatBorder::None) {
            format = format.set_border_top(top);
            if let Some(rgb) = borders.top.color.as_deref().and_then(argb_to_rgb) {
                format = format.set_border_top_color(Color::RGB(rgb));
            }
        }
        let bottom = edge_to_border(&borders.bottom);
        if !matches!(bottom, FormatBorder::None) {
            format = format.set_border_bottom(bottom);
            if let Some(rgb) = borders.bottom.color.as_deref().and_then(argb_to_rgb) {
                format = format.set_border_bottom_color(Color::RGB(rgb));
            }
        }
        let left = edge_to_border(&borders.left);
        if !matches!(left, FormatBorder::None) {
            format = format.set_border_left(left);
            if let Some(rgb) = borders.left.color.as_deref().and_then(argb_to_rgb) {
                format = format.set_border_left_color(Color::RGB(rgb));
            }
        }
        let right = edge_to_border(&borders.right);
        if !matches!(right, FormatBorder::None) {
            format = format.set_border_right(right);
            if let Some(rgb) = borders.right.color.as_deref().and_then(argb_to_rgb) {
                format = format.set_border_right_color(Color::RGB(rgb));
            }
        }
    }

    if let Some(num_format) = &record.number_format {
        format = format.set_num_format(num_format);
    }

    format
}

/// Map a border edge onto rust_xlsxwriter's border vocabulary. Continuous
/// edges grade by weight; weight 0 drops the edge.
fn edge_to_border(edge: &BorderEdge) -> FormatBorder {
    match edge.line_style {
        LineStyle::Dash => FormatBorder::Dashed,
        LineStyle::Dot => FormatBorder::Dotted,
        LineStyle::Double => FormatBorder::Double,
        LineStyle::Continuous => {
            if edge.weight <= 0.0 {
                FormatBorder::None
            } else if edge.weight < 2.0 {
                FormatBorder::Thin
            } else if edge.weight < 3.0 {
                FormatBorder::Medium
            } else {
                FormatBorder::Thick
            }
        }
    }
}

/// Drop the alpha channel of an 8-digit ARGB string for rust_xlsxwriter,
/// which takes 24-bit RGB.
fn argb_to_rgb(argb: &str) -> Option<u32> {
    if argb.len() != 8 {
        return None;
    }
    u32::from_str_radix(&argb[2..], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridport_config::GridTheme;
    use gridport_engine::columns::resolve_columns;
    use gridport_engine::compile::compile;
    use gridport_engine::dictionary::build_dictionary;
    use serde_json::json;

    fn default_styles(columns: &[String]) -> Vec<StyleRecord> {
        let theme = GridTheme::default();
        compile(&build_dictionary(&theme), &resolve_columns(&theme, columns))
    }

    #[test]
    fn test_title_label() {
        assert_eq!(title_label("email"), "Email");
        assert_eq!(title_label("full name"), "Full name");
        assert_eq!(title_label(""), "");
    }

    #[test]
    fn test_argb_to_rgb() {
        assert_eq!(argb_to_rgb("FFCC0011"), Some(0xCC0011));
        assert_eq!(argb_to_rgb("00FFFFFF"), Some(0xFFFFFF));
        assert_eq!(argb_to_rgb("#FFCC0011"), None);
        assert_eq!(argb_to_rgb("CC0011"), None);
    }

    #[test]
    fn test_edge_to_border_grades_by_weight() {
        let edge = |weight| BorderEdge {
            weight,
            ..Default::default()
        };
        assert!(matches!(edge_to_border(&edge(0.0)), FormatBorder::None));
        assert!(matches!(edge_to_border(&edge(1.0)), FormatBorder::Thin));
        assert!(matches!(edge_to_border(&edge(2.0)), FormatBorder::Medium));
        assert!(matches!(edge_to_border(&edge(3.0)), FormatBorder::Thick));
        assert!(matches!(edge_to_border(&edge(7.0)), FormatBorder::Thick));
    }

    #[test]
    fn test_lookup_last_match_wins() {
        let first = StyleRecord {
            id: "default".to_string(),
            number_format: Some("0".to_string()),
            ..Default::default()
        };
        let second = StyleRecord {
            id: "default".to_string(),
            number_format: Some("0.00".to_string()),
            ..Default::default()
        };

        let styles = vec![first, second];
        let lookup = StyleLookup::new(&styles);
        assert_eq!(lookup.len(), 1);
        assert_eq!(
            lookup.get("default").unwrap().number_format.as_deref(),
            Some("0.00")
        );
    }

    #[test]
    fn test_cell_record_fallback_chain() {
        let columns = vec!["email".to_string()];
        let styles = default_styles(&columns);
        let lookup = StyleLookup::new(&styles);

        assert_eq!(lookup.cell_record("email", false).unwrap().id, "col_email");
        assert_eq!(
            lookup.cell_record("email", true).unwrap().id,
            "col_email_alternate"
        );
        // Unknown column falls back to the global records
        assert_eq!(lookup.cell_record("phone", false).unwrap().id, "default");
        assert_eq!(lookup.cell_record("phone", true).unwrap().id, "alternateRow");
    }

    #[test]
    fn test_export_basic() {
        let columns = vec!["email".to_string(), "country".to_string()];
        let styles = default_styles(&columns);
        let rows = vec![
            json!({"email": "a@example.com", "country": "Egypt"}),
            json!({"email": "b@example.com", "country": {"displayName": "France"}}),
            json!({"email": null, "country": "Peru"}),
        ];

        let temp_dir = tempfile::tempdir().unwrap();
        let export_path = temp_dir.path().join("report.xlsx");

        let result = export(
            &export_path,
            &columns,
            &title_label,
            &rows,
            &styles,
            &ExportOptions {
                header_height: Some(30.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(export_path.exists());
        assert_eq!(result.rows_exported, 3);
        // 2 header cells + 6 data cells
        assert_eq!(result.cells_exported, 8);
        assert_eq!(result.styles_resolved, 7);
        assert_eq!(result.summary(), "3 rows, 8 cells, 7 styles");
    }

    #[test]
    fn test_export_without_styles() {
        let columns = vec!["a".to_string()];
        let rows = vec![json!({"a": 1})];

        let temp_dir = tempfile::tempdir().unwrap();
        let export_path = temp_dir.path().join("plain.xlsx");

        let result = export(
            &export_path,
            &columns,
            &title_label,
            &rows,
            &[],
            &ExportOptions::default(),
        )
        .unwrap();

        assert!(export_path.exists());
        assert_eq!(result.styles_resolved, 0);
        assert_eq!(result.cells_exported, 2);
    }

    #[test]
    fn test_export_missing_fields_write_empty_text() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let styles = default_styles(&columns);
        let rows = vec![json!({"a": "only-a"})];

        let temp_dir = tempfile::tempdir().unwrap();
        let export_path = temp_dir.path().join("sparse.xlsx");

        let result = export(
            &export_path,
            &columns,
            &title_label,
            &rows,
            &styles,
            &ExportOptions::default(),
        )
        .unwrap();
        assert_eq!(result.rows_exported, 1);
        assert_eq!(result.cells_exported, 4);
    }
}
