// Color normalization: every theme color funnels through here before it
// reaches a style record.
//
// The canonical form is an 8-character uppercase ARGB hex string with the
// alpha channel forced opaque. Unrecognized input normalizes to None and the
// caller omits the property; there is no implicit black.

/// Named colors the grid UI exposes, pre-resolved to ARGB.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "FF000000"),
    ("white", "FFFFFFFF"),
    ("red", "FFFF0000"),
    ("green", "FF008000"),
    ("blue", "FF0000FF"),
    ("gray", "FF808080"),
];

/// Normalize a color token to 8-digit uppercase ARGB hex.
///
/// Accepted forms, in match order: bare 8-digit ARGB (pre-resolved,
/// uppercased as-is), `#rgb`, `#rrggbb`, `#aarrggbb`, `rgb(r,g,b)` /
/// `rgba(r,g,b,a)` with the alpha component discarded, and the named colors
/// above (case-insensitive). Anything else returns None.
pub fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Pre-resolved ARGB passes through before any expansion rule can misfire.
    if raw.len() == 8 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(raw.to_ascii_uppercase());
    }

    if let Some(hex) = raw.strip_prefix('#') {
        return normalize_hex(hex);
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        return normalize_rgb_func(&lower);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, argb)| (*argb).to_string())
}

fn normalize_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        8 => Some(hex.to_ascii_uppercase()),
        6 => Some(format!("FF{}", hex.to_ascii_uppercase())),
        3 => {
            // #abc expands nibble-wise to FFAABBCC
            let mut out = String::with_capacity(8);
            out.push_str("FF");
            for c in hex.chars() {
                let c = c.to_ascii_uppercase();
                out.push(c);
                out.push(c);
            }
            Some(out)
        }
        _ => None,
    }
}

fn normalize_rgb_func(input: &str) -> Option<String> {
    let start = input.find('(')?;
    let end = input.find(')')?;
    let parts: Vec<&str> = input[start + 1..end].split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    // Any fourth component (alpha) is ignored; output is always opaque.

    Some(format!("FF{:02X}{:02X}{:02X}", r, g, b))
}

fn parse_channel(s: &str) -> Option<u8> {
    let value: i64 = s.parse().ok()?;
    Some(value.clamp(0, 255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_digit_hex_expands() {
        assert_eq!(normalize("#abc").as_deref(), Some("FFAABBCC"));
        assert_eq!(normalize("#000").as_deref(), Some("FF000000"));
        assert_eq!(normalize("#F0a").as_deref(), Some("FFFF00AA"));
    }

    #[test]
    fn test_six_digit_hex_gets_opaque_alpha() {
        assert_eq!(normalize("#aabbcc").as_deref(), Some("FFAABBCC"));
        assert_eq!(normalize("#f1f1f1").as_deref(), Some("FFF1F1F1"));
    }

    #[test]
    fn test_eight_digit_passes_through_uppercased() {
        assert_eq!(normalize("80ff0000").as_deref(), Some("80FF0000"));
        assert_eq!(normalize("#80ff0000").as_deref(), Some("80FF0000"));
        // Alpha is preserved on passthrough; only new colors force FF.
        assert_eq!(normalize("00000000").as_deref(), Some("00000000"));
    }

    #[test]
    fn test_rgb_function() {
        assert_eq!(normalize("rgb(0,128,255)").as_deref(), Some("FF0080FF"));
        assert_eq!(normalize("rgb( 0 , 128 , 255 )").as_deref(), Some("FF0080FF"));
        assert_eq!(normalize("RGB(255,255,255)").as_deref(), Some("FFFFFFFF"));
    }

    #[test]
    fn test_rgba_alpha_is_discarded() {
        assert_eq!(normalize("rgba(255,0,0,0.5)").as_deref(), Some("FFFF0000"));
        assert_eq!(normalize("rgba(1,2,3,0)").as_deref(), Some("FF010203"));
    }

    #[test]
    fn test_rgb_channels_clamp() {
        assert_eq!(normalize("rgb(300,-5,0)").as_deref(), Some("FFFF0000"));
    }

    #[test]
    fn test_named_colors_case_insensitive() {
        assert_eq!(normalize("black").as_deref(), Some("FF000000"));
        assert_eq!(normalize("WHITE").as_deref(), Some("FFFFFFFF"));
        assert_eq!(normalize("Gray").as_deref(), Some("FF808080"));
        assert_eq!(normalize("green").as_deref(), Some("FF008000"));
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(normalize("not-a-color"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("#ab"), None);
        assert_eq!(normalize("#abcde"), None);
        assert_eq!(normalize("rgb(1,2)"), None);
        assert_eq!(normalize("rgb(a,b,c)"), None);
        assert_eq!(normalize("coral"), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize("  #aabbcc  ").as_deref(), Some("FFAABBCC"));
        assert_eq!(normalize(" blue ").as_deref(), Some("FF0000FF"));
    }

    #[test]
    fn test_idempotent_over_valid_forms() {
        for input in ["#abc", "#aabbcc", "80ff0000", "rgb(0,128,255)", "gray"] {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {}", input);
        }
    }
}
