// Export payload normalization.
//
// The UI hands over a loosely-typed JSON payload: the per-column section may
// arrive structured or as a JSON-encoded string blob, each column's
// sub-document may itself be encoded, and every property answers to several
// key spellings. Everything funnels into the typed per-column input the
// compiler expects; a decode failure for one column degrades to that
// column's base bag and a warning, never an error.

use serde_json::{Map, Value};

use gridport_config::GridTheme;
use gridport_engine::color;
use gridport_engine::columns::{column_props_from_theme, ColumnEntry, ColumnProps, PerColumnInput};

const THEME_KEYS: [&str; 3] = ["theme", "styling", "widgetProperties"];
const PER_COLUMN_KEYS: [&str; 3] = ["dataProperties", "data-properties", "columns"];
const ROW_KEYS: [&str; 3] = ["tableData", "rows", "data"];

/// A payload reduced to the engine's inputs plus the raw rows for the
/// writer. Warnings are for the caller to log; nothing here is fatal.
#[derive(Debug, Default)]
pub struct NormalizedPayload {
    pub theme: GridTheme,
    pub per_column: PerColumnInput,
    pub rows: Vec<Value>,
    pub warnings: Vec<String>,
}

/// Reconcile an arbitrary export payload into a theme, per-column input,
/// and row data.
pub fn normalize_payload(payload: &Value) -> NormalizedPayload {
    let mut warnings = Vec::new();

    let theme = extract_theme(payload, &mut warnings);
    let rows = extract_rows(payload);
    let per_column = extract_per_column(payload, &theme, &rows, &mut warnings);

    NormalizedPayload {
        theme,
        per_column,
        rows,
        warnings,
    }
}

/// Stringify one cell value for the writer.
///
/// Null becomes empty, primitives take their plain string form, objects
/// exposing `displayName` or `name` collapse to that field, and anything
/// else is encoded as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("displayName").or_else(|| map.get("name")) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => serde_json::to_string(value).unwrap_or_else(|_| value.to_string()),
        },
        Value::Array(_) => serde_json::to_string(value).unwrap_or_else(|_| value.to_string()),
    }
}

fn extract_theme(payload: &Value, warnings: &mut Vec<String>) -> GridTheme {
    for key in THEME_KEYS {
        if let Some(section) = payload.get(key) {
            match serde_json::from_value::<GridTheme>(section.clone()) {
                Ok(theme) => return theme,
                Err(e) => {
                    warnings.push(format!("Failed to read theme from '{}': {}", key, e));
                    return GridTheme::default();
                }
            }
        }
    }
    GridTheme::default()
}

fn extract_rows(payload: &Value) -> Vec<Value> {
    for key in ROW_KEYS {
        if let Some(Value::Array(rows)) = payload.get(key) {
            return rows.clone();
        }
    }
    Vec::new()
}

fn extract_per_column(
    payload: &Value,
    theme: &GridTheme,
    rows: &[Value],
    warnings: &mut Vec<String>,
) -> PerColumnInput {
    let section = PER_COLUMN_KEYS.iter().find_map(|k| payload.get(*k));

    // The whole section may be a JSON-encoded string blob.
    let decoded = match section {
        Some(Value::String(blob)) => match serde_json::from_str::<Value>(blob) {
            Ok(value) => Some(value),
            Err(e) => {
                warnings.push(format!("Failed to decode column properties blob: {}", e));
                None
            }
        },
        Some(value) => Some(value.clone()),
        None => None,
    };

    let base = column_props_from_theme(theme);

    match decoded {
        Some(Value::Object(map)) => {
            let mut entries = Vec::with_capacity(map.len());
            for (column, bag) in &map {
                let mut props = base.clone();
                apply_bag(&mut props, bag, column, warnings);
                entries.push(ColumnEntry {
                    column: column.clone(),
                    props,
                });
            }
            entries
        }
        Some(_) => {
            warnings.push("Column properties section is not an object".to_string());
            columns_from_rows(rows, &base)
        }
        None => columns_from_rows(rows, &base),
    }
}

// No usable per-column section: derive the column list from the first row.
fn columns_from_rows(rows: &[Value], base: &ColumnProps) -> PerColumnInput {
    match rows.first() {
        Some(Value::Object(first)) => first
            .keys()
            .map(|column| ColumnEntry {
                column: column.clone(),
                props: base.clone(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Overlay one column's reconciled bag onto its base props. The bag may be
/// a JSON-encoded string; if it cannot be decoded the base props stand.
fn apply_bag(props: &mut ColumnProps, bag: &Value, column: &str, warnings: &mut Vec<String>) {
    let decoded;
    let bag = match bag {
        Value::String(blob) => match serde_json::from_str::<Value>(blob) {
            Ok(value) => {
                decoded = value;
                &decoded
            }
            Err(e) => {
                warnings.push(format!(
                    "Column '{}': failed to decode style sub-document: {}",
                    column, e
                ));
                return;
            }
        },
        other => other,
    };

    let bag = match bag.as_object() {
        Some(map) => map,
        None => {
            warnings.push(format!(
                "Column '{}': style properties are not an object",
                column
            ));
            return;
        }
    };

    if let Some(value) = first_key(bag, &["value"]) {
        props.value = Some(cell_text(value));
    }

    set_color(bag, &["font-color", "fontColor", "color"], &mut props.font_color);
    set_f64(bag, &["font-size", "fontSize", "size"], &mut props.font_size);
    set_string(bag, &["font-weight", "fontWeight"], &mut props.font_weight);
    set_string(bag, &["font-style", "fontStyle"], &mut props.font_style);
    set_string(
        bag,
        &["font-family", "fontFamily", "fontName"],
        &mut props.font_family,
    );
    set_color(
        bag,
        &["background-color", "backgroundColor", "bg"],
        &mut props.background,
    );
    set_string(
        bag,
        &["horizontal-alignment", "horizontalAlignment", "text-align", "textAlign"],
        &mut props.text_align,
    );
    set_string(
        bag,
        &["vertical-alignment", "verticalAlignment", "vertical-align", "verticalAlign"],
        &mut props.vertical_align,
    );
    set_string(
        bag,
        &["number-format", "numberFormat", "format"],
        &mut props.number_format,
    );
    set_bool(bag, &["wrap-text", "wrapText", "wrap"], &mut props.wrap_text);
    set_bool(bag, &["underline"], &mut props.underline);
    set_color(
        bag,
        &[
            "alternateRowBackground",
            "alternate-row-background",
            "alternate_row_background",
        ],
        &mut props.alternate_background,
    );
    set_color(
        bag,
        &[
            "alternateRowFont",
            "alternate-row-font",
            "alternate_row_font",
        ],
        &mut props.alternate_font_color,
    );
}

fn first_key<'a>(bag: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| bag.get(*k))
}

fn set_color(bag: &Map<String, Value>, keys: &[&str], slot: &mut Option<String>) {
    if let Some(value) = first_key(bag, keys) {
        // An unparseable color means "omit the property", not "keep the base".
        *slot = value.as_str().and_then(color::normalize);
    }
}

fn set_string(bag: &Map<String, Value>, keys: &[&str], slot: &mut Option<String>) {
    if let Some(value) = first_key(bag, keys) {
        *slot = value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
}

fn set_f64(bag: &Map<String, Value>, keys: &[&str], slot: &mut Option<f64>) {
    if let Some(value) = first_key(bag, keys) {
        *slot = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
    }
}

fn set_bool(bag: &Map<String, Value>, keys: &[&str], slot: &mut Option<bool>) {
    if let Some(value) = first_key(bag, keys) {
        *slot = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        };
    }
}
