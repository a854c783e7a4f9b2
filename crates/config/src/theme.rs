// Grid theme configuration
// Loaded from JSON; every section has defaults so partial themes parse.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Full theming configuration for a grid export.
///
/// Field names follow the camelCase wire shape the UI sends, so a theme
/// captured from an export payload deserializes directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridTheme {
    pub widget: WidgetSection,
    pub column_header: HeaderSection,
    pub values: ValuesSection,
    pub grid: GridLines,
}

/// Outer widget frame. Carried for payload fidelity; the style compiler
/// itself never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetSection {
    pub background_color: String,
    pub border_color: String,
    pub border_size: f64,
    pub width: f64,
    pub height: f64,
}

/// Column header row styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderSection {
    pub color: String,
    pub background_color: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub text_align: String,
    pub height: f64,
}

/// Data cell styling, including the alternate-row banding pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuesSection {
    pub font_color: String,
    pub background_color: String,
    pub font_style: String,
    pub font_weight: String,
    pub font_size: f64,
    pub font_family: String,
    pub text_align: String,
    pub alternate_row_background: String,
    pub alternate_row_font: String,
}

/// Gridline styling, split by orientation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridLines {
    pub horizontal: GridEdge,
    pub vertical: GridEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridEdge {
    pub color: String,
    pub thickness: f64,
    pub padding: f64,
}

impl Default for WidgetSection {
    fn default() -> Self {
        WidgetSection {
            background_color: "#ffffff".into(),
            border_color: "#000000".into(),
            border_size: 1.0,
            width: 2000.0,
            height: 800.0,
        }
    }
}

impl Default for HeaderSection {
    fn default() -> Self {
        HeaderSection {
            color: "#000000".into(),
            background_color: "#f1f1f1".into(),
            font_size: 14.0,
            font_weight: "bold".into(),
            font_family: "Arial".into(),
            text_align: "center".into(),
            height: 30.0,
        }
    }
}

impl Default for ValuesSection {
    fn default() -> Self {
        ValuesSection {
            font_color: "#000000".into(),
            background_color: "#ffffff".into(),
            font_style: "normal".into(),
            font_weight: "normal".into(),
            font_size: 12.0,
            font_family: "Arial".into(),
            text_align: "left".into(),
            alternate_row_background: "#f9f9f9".into(),
            alternate_row_font: "#333333".into(),
        }
    }
}

impl Default for GridEdge {
    fn default() -> Self {
        GridEdge {
            color: "#cccccc".into(),
            thickness: 1.0,
            padding: 4.0,
        }
    }
}

impl GridTheme {
    /// Parse a theme from a JSON string. Missing sections and fields fall
    /// back to the shipping defaults.
    pub fn from_json_str(json: &str) -> Result<GridTheme, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse theme JSON: {}", e))
    }

    /// Load a theme from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<GridTheme, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file '{}': {}", path.display(), e))?;
        Self::from_json_str(&content)
    }

    /// Directory scanned for user theme files.
    pub fn themes_dir() -> Option<PathBuf> {
        let config_dir = dirs::config_dir()?;
        Some(config_dir.join("gridport").join("themes"))
    }

    /// List theme files available in the themes directory.
    pub fn list_theme_files() -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Some(theme_dir) = Self::themes_dir() {
            if let Ok(entries) = fs::read_dir(&theme_dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().map(|e| e == "json").unwrap_or(false) {
                        files.push(path);
                    }
                }
            }
        }
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_shipping_values() {
        let theme = GridTheme::default();
        assert_eq!(theme.column_header.background_color, "#f1f1f1");
        assert_eq!(theme.column_header.font_weight, "bold");
        assert_eq!(theme.column_header.text_align, "center");
        assert_eq!(theme.values.background_color, "#ffffff");
        assert_eq!(theme.values.alternate_row_background, "#f9f9f9");
        assert_eq!(theme.values.text_align, "left");
        assert_eq!(theme.grid.horizontal.thickness, 1.0);
        assert_eq!(theme.grid.vertical.color, "#cccccc");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let theme = GridTheme::from_json_str(
            r#"{"values": {"fontWeight": "bolder", "fontSize": 16}}"#,
        )
        .unwrap();
        assert_eq!(theme.values.font_weight, "bolder");
        assert_eq!(theme.values.font_size, 16.0);
        // Untouched fields keep their defaults
        assert_eq!(theme.values.font_family, "Arial");
        assert_eq!(theme.column_header.height, 30.0);
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let theme = GridTheme::from_json_str(
            r#"{"columnHeader": {"backgroundColor": "#202020", "textAlign": "right"}}"#,
        )
        .unwrap();
        assert_eq!(theme.column_header.background_color, "#202020");
        assert_eq!(theme.column_header.text_align, "right");
    }

    #[test]
    fn test_round_trip() {
        let theme = GridTheme::default();
        let json = serde_json::to_string(&theme).unwrap();
        let parsed = GridTheme::from_json_str(&json).unwrap();
        assert_eq!(theme, parsed);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GridTheme::from_json_str("{not json").is_err());
        assert!(GridTheme::from_json_str(r#"{"values": {"fontSize": "large"}}"#).is_err());
    }
}
