// Emitted style record types.
//
// A compiled style list is an ordered Vec<StyleRecord>; the writer resolves
// records by identifier, last match winning when duplicates occur. Records
// serialize to the camelCase shape spreadsheet writers key on.

use serde::{Deserialize, Serialize};

/// Identifier of the column header record.
pub const HEADER_ID: &str = "header";
/// Identifier of the base data-cell record.
pub const DEFAULT_ID: &str = "default";
/// Identifier of the banded-row variant of the default record.
pub const ALTERNATE_ROW_ID: &str = "alternateRow";

/// Border weight used when the theme leaves a gridline thickness unset.
pub const DEFAULT_BORDER_WEIGHT: f64 = 3.0;

/// Horizontal text alignment in an emitted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Border line style. The compiler only emits Continuous; the other
/// variants exist for writers that resolve richer records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Continuous,
    Dash,
    Dot,
    Double,
}

/// Interior fill pattern marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillPattern {
    #[default]
    Solid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBlock {
    pub color: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentBlock {
    pub horizontal: HorizontalAlignment,
    pub wrap_text: bool,
    pub indent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteriorBlock {
    pub color: String,
    pub pattern: FillPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderEdge {
    pub color: Option<String>,
    pub line_style: LineStyle,
    pub weight: f64,
}

impl Default for BorderEdge {
    fn default() -> Self {
        BorderEdge {
            color: None,
            line_style: LineStyle::Continuous,
            weight: DEFAULT_BORDER_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderBlock {
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
    pub right: BorderEdge,
}

/// One named bundle of font/alignment/fill/border properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub id: String,
    pub font: Option<FontBlock>,
    pub alignment: Option<AlignmentBlock>,
    pub interior: Option<InteriorBlock>,
    pub borders: Option<BorderBlock>,
    pub number_format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_edge_default_weight() {
        let edge = BorderEdge::default();
        assert_eq!(edge.weight, DEFAULT_BORDER_WEIGHT);
        assert_eq!(edge.line_style, LineStyle::Continuous);
        assert!(edge.color.is_none());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = StyleRecord {
            id: "default".into(),
            number_format: Some("0.00".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"numberFormat\":\"0.00\""));
    }
}
