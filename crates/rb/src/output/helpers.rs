//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Shown in place of any missing field.
pub const PLACEHOLDER: &str = "-";

/// Number of stars in a rating.
const STAR_COUNT: usize = 5;

/// Truncates a string to at most `max_len` characters, ending in "..." when
/// shortened.
///
/// Counts characters rather than bytes so multi-byte titles never split.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Returns the text or the placeholder when absent or blank.
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Formats minutes as "45 min", or the placeholder.
pub fn format_minutes(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) => format!("{m} min"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Number of filled stars for a rating: whole points plus one for a
/// fraction of at least one half, capped at five.
pub fn filled_stars(rating: f64) -> usize {
    if !rating.is_finite() || rating <= 0.0 {
        return 0;
    }
    let whole = rating.floor();
    let filled = whole as usize + usize::from(rating - whole >= 0.5);
    filled.min(STAR_COUNT)
}

/// Formats a rating as five stars, or the placeholder when absent.
pub fn format_stars(rating: Option<f64>, use_colors: bool) -> String {
    let Some(rating) = rating else {
        return PLACEHOLDER.to_string();
    };
    let filled = filled_stars(rating);
    let on = "★".repeat(filled);
    let off = "☆".repeat(STAR_COUNT - filled);
    if use_colors {
        format!("{}{}", on.yellow(), off.dimmed())
    } else {
        format!("{on}{off}")
    }
}

/// Formats a rating with one decimal, or the placeholder.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{r:.1}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Turns a nutrient key like `saturatedFatContent` into "Saturated Fat".
pub fn nutrient_label(key: &str) -> String {
    let base = key.strip_suffix("Content").unwrap_or(key);
    let mut label = String::with_capacity(base.len() + 4);
    for (i, c) in base.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}

/// Pads `styled` to `width` display characters.
///
/// Styled strings carry escape codes that `{:<width$}` would count, so the
/// padding is computed from the plain text.
pub fn pad(styled: &str, plain_len: usize, width: usize) -> String {
    let fill = width.saturating_sub(plain_len);
    format!("{styled}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Apple Pie", 20), "Apple Pie");
        assert_eq!(truncate_str("Apple Pie", 9), "Apple Pie");
        assert_eq!(truncate_str("Apple Pie with Cream", 10), "Apple P...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("Crème brûlée façon maison", 10), "Crème b...");
        assert_eq!(truncate_str("寿司寿司寿司", 5), "寿司...");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Some("Thai")), "Thai");
        assert_eq!(or_placeholder(Some("  ")), "-");
        assert_eq!(or_placeholder(None), "-");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(Some(45)), "45 min");
        assert_eq!(format_minutes(Some(0)), "0 min");
        assert_eq!(format_minutes(None), "-");
    }

    #[test]
    fn test_filled_stars_half_point_rounding() {
        assert_eq!(filled_stars(0.0), 0);
        assert_eq!(filled_stars(3.4), 3);
        assert_eq!(filled_stars(3.5), 4);
        assert_eq!(filled_stars(4.49), 4);
        assert_eq!(filled_stars(4.5), 5);
        assert_eq!(filled_stars(5.0), 5);
        assert_eq!(filled_stars(7.0), 5);
        assert_eq!(filled_stars(-1.0), 0);
        assert_eq!(filled_stars(f64::NAN), 0);
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(Some(3.5), false), "★★★★☆");
        assert_eq!(format_stars(Some(0.2), false), "☆☆☆☆☆");
        assert_eq!(format_stars(None, false), "-");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(4.0)), "4.0");
        assert_eq!(format_rating(Some(4.24)), "4.2");
        assert_eq!(format_rating(Some(4.86)), "4.9");
        assert_eq!(format_rating(None), "-");
    }

    #[test]
    fn test_nutrient_label() {
        assert_eq!(nutrient_label("calories"), "Calories");
        assert_eq!(nutrient_label("saturatedFatContent"), "Saturated Fat");
        assert_eq!(nutrient_label("fiberContent"), "Fiber");
    }

    #[test]
    fn test_pad_ignores_escape_codes() {
        assert_eq!(pad("ab", 2, 5), "ab   ");
        assert_eq!(pad("\u{1b}[33mab\u{1b}[39m", 2, 4), "\u{1b}[33mab\u{1b}[39m  ");
        assert_eq!(pad("abcdef", 6, 4), "abcdef");
    }
}
