//! Bilingual text measurement and word wrap.
//!
//! The contract mixes Arabic (RTL) and Latin (LTR) runs. Widths are
//! estimated from per-glyph heuristics rather than font metrics, which is
//! enough to size section boxes and keep wrapped lines inside the content
//! column. RTL lines are emitted in display order (logical word order
//! reversed), right-aligned.

/// A4 page width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// Horizontal page margin in points.
pub const PAGE_MARGIN: f32 = 50.0;
/// Usable column width for contract text.
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * PAGE_MARGIN;

const LINE_HEIGHT_FACTOR: f32 = 2.0;
const SECTION_PADDING: f32 = 20.0;
const TITLE_EXTRA: f32 = 6.0;

/// One wrapped output line.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Words joined in display order.
    pub text: String,
    /// True when the line should be right-aligned.
    pub rtl: bool,
}

fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}')
}

/// Estimated advance width of one glyph, in fractions of the font size.
fn char_width_factor(c: char) -> f32 {
    if c == ' ' {
        0.3
    } else if is_arabic_char(c) {
        0.72
    } else if c.is_ascii() {
        0.55
    } else {
        0.8
    }
}

/// Estimated rendered width of a string at the given font size.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// A run counts as RTL when it contains any Arabic glyph. Digits and Latin
/// fragments embedded in an Arabic sentence follow the sentence direction.
pub fn is_rtl(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

/// Greedy word wrap in logical order. A single word wider than the column
/// is hard-split so no output line ever exceeds `max_width`.
fn wrap_logical(text: &str, font_size: f32, max_width: f32) -> Vec<Vec<String>> {
    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_width = 0.0f32;
    let space_width = text_width(" ", font_size);

    for word in text.split_whitespace() {
        for piece in split_oversized(word, font_size, max_width) {
            let piece_width = text_width(&piece, font_size);
            let needed = if current.is_empty() {
                piece_width
            } else {
                current_width + space_width + piece_width
            };
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current_width = if current.is_empty() {
                piece_width
            } else {
                current_width + space_width + piece_width
            };
            current.push(piece);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_oversized(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    if text_width(word, font_size) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0f32;
    for c in word.chars() {
        let w = char_width_factor(c) * font_size;
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Wrap a paragraph into display-ready lines.
///
/// RTL paragraphs keep their logical wrap points but each line's words are
/// reversed into display order.
pub fn wrap_paragraph(text: &str, font_size: f32, max_width: f32) -> Vec<WrappedLine> {
    let rtl = is_rtl(text);
    wrap_logical(text, font_size, max_width)
        .into_iter()
        .map(|mut words| {
            if rtl {
                words.reverse();
            }
            WrappedLine {
                text: words.join(" "),
                rtl,
            }
        })
        .collect()
}

/// Height of a titled section box holding `line_count` wrapped lines.
/// Mirrors the canvas sizing of the original renderer: title row, double
/// line height per row, padding above/between/below.
pub fn section_height(line_count: usize, font_size: f32) -> f32 {
    let title_size = font_size + TITLE_EXTRA;
    title_size + line_count as f32 * font_size * LINE_HEIGHT_FACTOR + SECTION_PADDING * 3.0
}
