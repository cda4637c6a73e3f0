//! Styled chat lines and the legacy ampersand markup
//!
//! A rendered head is a sequence of [`StyledLine`]s: per row, one colored
//! glyph segment per pixel column, optionally followed by a single text
//! segment parsed from the caller's overlay message.

use crate::raster::Rgb;

/// The solid block glyph used for every pixel, regardless of color
pub const GLYPH: char = '\u{2588}';

/// Text formatting carried by a [`TextSpan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    /// Foreground color; `None` means the channel default
    pub color: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub style: TextStyle,
}

/// One piece of a styled line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A single solid block glyph colored from one source pixel
    Glyph(Rgb),
    /// A run of styled text spans
    Text(Vec<TextSpan>),
}

/// An ordered sequence of segments; pure rendered output, no behavior
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub segments: Vec<Segment>,
}

impl StyledLine {
    /// Number of glyph segments in the line
    pub fn glyph_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Glyph(_)))
            .count()
    }

    /// The text segment, if the line carries one
    pub fn text_segment(&self) -> Option<&[TextSpan]> {
        self.segments.iter().find_map(|s| match s {
            Segment::Text(spans) => Some(spans.as_slice()),
            Segment::Glyph(_) => None,
        })
    }
}

/// Color for a legacy `&0`-`&f` code character, lowercase or uppercase
pub fn legacy_color(code: char) -> Option<Rgb> {
    let rgb = match code.to_ascii_lowercase() {
        '0' => Rgb::new(0x00, 0x00, 0x00),
        '1' => Rgb::new(0x00, 0x00, 0xAA),
        '2' => Rgb::new(0x00, 0xAA, 0x00),
        '3' => Rgb::new(0x00, 0xAA, 0xAA),
        '4' => Rgb::new(0xAA, 0x00, 0x00),
        '5' => Rgb::new(0xAA, 0x00, 0xAA),
        '6' => Rgb::new(0xFF, 0xAA, 0x00),
        '7' => Rgb::new(0xAA, 0xAA, 0xAA),
        '8' => Rgb::new(0x55, 0x55, 0x55),
        '9' => Rgb::new(0x55, 0x55, 0xFF),
        'a' => Rgb::new(0x55, 0xFF, 0x55),
        'b' => Rgb::new(0x55, 0xFF, 0xFF),
        'c' => Rgb::new(0xFF, 0x55, 0x55),
        'd' => Rgb::new(0xFF, 0x55, 0xFF),
        'e' => Rgb::new(0xFF, 0xFF, 0x55),
        'f' => Rgb::new(0xFF, 0xFF, 0xFF),
        _ => return None,
    };
    Some(rgb)
}

/// Parse legacy ampersand-coded text into styled spans.
///
/// `&` followed by a recognized code switches color or formatting until the
/// next code or end of input. Color codes also reset formatting, matching the
/// legacy convention. Unrecognized sequences and a trailing `&` pass through
/// literally. Empty input produces no spans.
pub fn parse_legacy(input: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut style = TextStyle::default();
    let mut chars = input.chars().peekable();

    let flush = |text: &mut String, style: TextStyle, spans: &mut Vec<TextSpan>| {
        if !text.is_empty() {
            spans.push(TextSpan {
                text: std::mem::take(text),
                style,
            });
        }
    };

    while let Some(c) = chars.next() {
        if c != '&' {
            current.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some(code) if legacy_color(code).is_some() => {
                chars.next();
                flush(&mut current, style, &mut spans);
                style = TextStyle {
                    color: legacy_color(code),
                    ..TextStyle::default()
                };
            }
            Some(code) if matches!(code.to_ascii_lowercase(), 'k' | 'l' | 'm' | 'n' | 'o') => {
                chars.next();
                flush(&mut current, style, &mut spans);
                match code.to_ascii_lowercase() {
                    'k' => style.obfuscated = true,
                    'l' => style.bold = true,
                    'm' => style.strikethrough = true,
                    'n' => style.underlined = true,
                    'o' => style.italic = true,
                    _ => unreachable!(),
                }
            }
            Some(code) if code.to_ascii_lowercase() == 'r' => {
                chars.next();
                flush(&mut current, style, &mut spans);
                style = TextStyle::default();
            }
            // Unrecognized code or trailing '&': keep it literal
            _ => current.push('&'),
        }
    }

    flush(&mut current, style, &mut spans);
    spans
}

/// Left-pad `s` with spaces so its leading character sits at
/// `floor((width - len) / 2)`.
///
/// Strings at least `width` long are returned unchanged, not truncated.
pub fn center_text(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }

    let spaces = (width - len) / 2;
    let mut out = String::with_capacity(spaces + s.len());
    for _ in 0..spaces {
        out.push(' ');
    }
    out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_text() {
        let spans = parse_legacy("hello");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "hello");
        assert_eq!(spans[0].style, TextStyle::default());
    }

    #[test]
    fn parse_empty_is_no_spans() {
        assert!(parse_legacy("").is_empty());
    }

    #[test]
    fn parse_color_code() {
        let spans = parse_legacy("&chello");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "hello");
        assert_eq!(spans[0].style.color, Some(Rgb::new(0xFF, 0x55, 0x55)));
    }

    #[test]
    fn parse_color_splits_spans() {
        let spans = parse_legacy("red&cand&fmore");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "red");
        assert_eq!(spans[1].text, "and");
        assert_eq!(spans[1].style.color, Some(Rgb::new(0xFF, 0x55, 0x55)));
        assert_eq!(spans[2].style.color, Some(Rgb::new(0xFF, 0xFF, 0xFF)));
    }

    #[test]
    fn parse_style_codes_accumulate() {
        let spans = parse_legacy("&l&nboth");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].style.bold);
        assert!(spans[0].style.underlined);
    }

    #[test]
    fn parse_color_resets_formatting() {
        let spans = parse_legacy("&l&abright");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].style.bold);
        assert_eq!(spans[0].style.color, Some(Rgb::new(0x55, 0xFF, 0x55)));
    }

    #[test]
    fn parse_reset_code() {
        let spans = parse_legacy("&c&lloud&rquiet");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, "quiet");
        assert_eq!(spans[1].style, TextStyle::default());
    }

    #[test]
    fn parse_uppercase_codes() {
        let spans = parse_legacy("&Chello&L!");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style.color, Some(Rgb::new(0xFF, 0x55, 0x55)));
        assert!(spans[1].style.bold);
    }

    #[test]
    fn parse_unrecognized_code_is_literal() {
        let spans = parse_legacy("100&zpure");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "100&zpure");
    }

    #[test]
    fn parse_trailing_ampersand_is_literal() {
        let spans = parse_legacy("dangling&");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "dangling&");
    }

    #[test]
    fn center_pads_to_half_remainder() {
        // floor((10 - 4) / 2) = 3 leading spaces
        assert_eq!(center_text("text", 10), "   text");
    }

    #[test]
    fn center_odd_remainder_floors() {
        // floor((9 - 4) / 2) = 2
        assert_eq!(center_text("text", 9), "  text");
    }

    #[test]
    fn center_too_long_unchanged() {
        assert_eq!(center_text("longer than that", 10), "longer than that");
    }

    #[test]
    fn center_exact_width_unchanged() {
        assert_eq!(center_text("12345", 5), "12345");
    }

    #[test]
    fn glyph_count_ignores_text() {
        let line = StyledLine {
            segments: vec![
                Segment::Glyph(Rgb::new(1, 2, 3)),
                Segment::Glyph(Rgb::new(4, 5, 6)),
                Segment::Text(parse_legacy("hi")),
            ],
        };
        assert_eq!(line.glyph_count(), 2);
        assert!(line.text_segment().is_some());
    }
}
