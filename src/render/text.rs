//! Text measurement and word wrapping for the built-in Helvetica faces.
//!
//! printpdf's built-in fonts ship no metrics API, so widths are estimated
//! from per-glyph advance classes. Close enough for centering headings and
//! right-aligning table amounts; not intended for justified body text.

const PT_TO_MM: f32 = 0.352_778;

/// Approximate advance width of one character in em units.
fn char_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '\'' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' => 0.89,
        'A'..='Z' | '$' | '%' | '&' | '#' => 0.68,
        _ => 0.54,
    }
}

/// Estimated rendered width of `text` at `font_size` points, in mm.
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let ems: f32 = text.chars().map(char_em).sum();
    ems * font_size * PT_TO_MM
}

/// Greedy word wrap to `max_width` mm at `font_size` points.
///
/// Words longer than a full line are hard-split so a pathological token
/// cannot push text outside its panel.
pub fn wrap(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    let push_word = |lines: &mut Vec<String>, current: &mut String, word: &str| {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width_mm(&candidate, font_size) <= max_width {
            *current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(current));
            }
            *current = word.to_string();
        }
    };

    for word in text.split_whitespace() {
        if text_width_mm(word, font_size) > max_width {
            // Hard-split an oversized token character by character.
            let mut piece = String::new();
            for c in word.chars() {
                piece.push(c);
                if text_width_mm(&piece, font_size) > max_width && piece.chars().count() > 1 {
                    piece.pop();
                    push_word(&mut lines, &mut current, &piece);
                    piece = c.to_string();
                }
            }
            if !piece.is_empty() {
                push_word(&mut lines, &mut current, &piece);
            }
        } else {
            push_word(&mut lines, &mut current, word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_length_and_size() {
        let short = text_width_mm("abc", 10.0);
        let long = text_width_mm("abcdef", 10.0);
        assert!(long > short);
        assert!(text_width_mm("abc", 20.0) > short);
    }

    #[test]
    fn test_width_empty() {
        assert_eq!(text_width_mm("", 10.0), 0.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap("hello world", 100.0, 10.0), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap("needs prop replacement before next survey flight", 40.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0) <= 40.0);
        }
        // No words lost or reordered.
        assert_eq!(
            lines.join(" "),
            "needs prop replacement before next survey flight"
        );
    }

    #[test]
    fn test_wrap_hard_splits_long_token() {
        let token = "x".repeat(200);
        let lines = wrap(&token, 30.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0) <= 30.0);
        }
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("", 30.0, 10.0).is_empty());
        assert!(wrap("   ", 30.0, 10.0).is_empty());
    }
}
