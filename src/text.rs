//! Inline markup and text metrics.
//!
//! Markup is deliberately small: `**bold**` and `[[highlight]]`, which may nest in
//! either order (`**[[both]]**`). A marker without a partner is kept as literal text.
//!
//! Span offsets are UTF-16 code units, the unit Slides text ranges are counted in.

use unicode_width::UnicodeWidthChar;

/// A styled sub-range of [`StyledText::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Inclusive start, UTF-16 code units.
    pub start: usize,
    /// Exclusive end, UTF-16 code units.
    pub end: usize,
    pub bold: bool,
    pub highlight: bool,
}

/// Plain text with the markup removed plus the spans it described.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub spans: Vec<StyledSpan>,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        StyledText {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.text)
    }
}

pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Open,
    Close,
}

fn scan_markers(s: &str) -> Vec<(usize, Marker)> {
    let bytes = s.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let marker = match (bytes[i], bytes[i + 1]) {
            (b'*', b'*') => Some(Marker::Bold),
            (b'[', b'[') => Some(Marker::Open),
            (b']', b']') => Some(Marker::Close),
            _ => None,
        };
        match marker {
            Some(m) => {
                found.push((i, m));
                i += 2;
            }
            None => i += 1,
        }
    }
    found
}

/// Marks which markers have a partner. Bold markers pair up in order; `[[` pairs
/// with the next `]]`, and a second `[[` before any `]]` orphans the first.
fn pair_markers(markers: &[(usize, Marker)]) -> Vec<bool> {
    let mut matched = vec![false; markers.len()];

    let bold: Vec<usize> = markers
        .iter()
        .enumerate()
        .filter(|(_, (_, m))| *m == Marker::Bold)
        .map(|(k, _)| k)
        .collect();
    for pair in bold.chunks_exact(2) {
        matched[pair[0]] = true;
        matched[pair[1]] = true;
    }

    let mut open: Option<usize> = None;
    for (k, (_, marker)) in markers.iter().enumerate() {
        match marker {
            Marker::Open => open = Some(k),
            Marker::Close => {
                if let Some(start) = open.take() {
                    matched[start] = true;
                    matched[k] = true;
                }
            }
            Marker::Bold => {}
        }
    }
    matched
}

/// Strips markup and records bold/highlight spans.
pub fn parse_markup(input: &str) -> StyledText {
    let markers = scan_markers(input);
    if markers.is_empty() {
        return StyledText::plain(input);
    }
    let matched = pair_markers(&markers);

    let mut text = String::with_capacity(input.len());
    let mut spans = Vec::new();
    let (mut bold, mut highlight) = (false, false);
    let mut cursor = 0;
    let mut offset = 0;
    let mut run_start = 0;

    let mut close_run = |offset: usize, run_start: usize, bold: bool, highlight: bool| {
        if (bold || highlight) && offset > run_start {
            spans.push(StyledSpan {
                start: run_start,
                end: offset,
                bold,
                highlight,
            });
        }
    };

    for ((at, marker), is_matched) in markers.iter().zip(&matched) {
        if !is_matched {
            continue;
        }
        let chunk = &input[cursor..*at];
        text.push_str(chunk);
        offset += utf16_len(chunk);
        close_run(offset, run_start, bold, highlight);
        match marker {
            Marker::Bold => bold = !bold,
            Marker::Open | Marker::Close => highlight = !highlight,
        }
        run_start = offset;
        cursor = at + 2;
    }
    let rest = &input[cursor..];
    text.push_str(rest);
    offset += utf16_len(rest);
    close_run(offset, run_start, bold, highlight);

    StyledText { text, spans }
}

/// The visible text of a marked-up string.
pub fn strip_markup(input: &str) -> String {
    parse_markup(input).text
}

fn char_em(c: char) -> f64 {
    match c {
        ' ' => 0.3,
        'i' | 'l' | 'j' | 't' | 'f' | 'r' | 'I' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' => 0.3,
        c if UnicodeWidthChar::width(c) == Some(2) => 1.0,
        c if c.is_uppercase() => 0.65,
        _ => 0.55,
    }
}

/// Approximate rendered width in points of a single line of text.
pub fn estimate_text_width(text: &str, font_pt: f64) -> f64 {
    text.chars().map(char_em).sum::<f64>() * font_pt
}

/// Approximate number of wrapped lines, honoring explicit newlines.
pub fn estimate_line_count(text: &str, font_pt: f64, width: f64) -> usize {
    text.split('\n')
        .map(|line| {
            if width <= 0.0 {
                return 1;
            }
            let w = estimate_text_width(line, font_pt);
            ((w / width).ceil() as usize).max(1)
        })
        .sum()
}

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Largest size in `[min, max]` (whole points) at which `text` fits the box.
/// Returns `min` when nothing fits.
pub fn fit_font_size(text: &str, width: f64, height: f64, max: f64, min: f64) -> f64 {
    let min = min.min(max);
    let mut size = max.floor();
    while size > min {
        let lines = estimate_line_count(text, size, width) as f64;
        if lines * size * LINE_HEIGHT <= height {
            return size;
        }
        size -= 1.0;
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_spans() {
        let styled = parse_markup("just text");
        assert_eq!(styled.text, "just text");
        assert!(styled.spans.is_empty());
    }

    #[test]
    fn bold_and_highlight_spans() {
        let styled = parse_markup("a **b** [[c]]");
        assert_eq!(styled.text, "a b c");
        assert_eq!(
            styled.spans,
            vec![
                StyledSpan { start: 2, end: 3, bold: true, highlight: false },
                StyledSpan { start: 4, end: 5, bold: false, highlight: true },
            ]
        );
    }

    #[test]
    fn combined_markers_nest() {
        let styled = parse_markup("**[[key]]** point");
        assert_eq!(styled.text, "key point");
        assert_eq!(
            styled.spans,
            vec![StyledSpan { start: 0, end: 3, bold: true, highlight: true }]
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        let styled = parse_markup("**a** and **b");
        assert_eq!(styled.text, "a and **b");
        assert_eq!(styled.spans.len(), 1);

        let styled = parse_markup("[[open only");
        assert_eq!(styled.text, "[[open only");
        assert!(styled.spans.is_empty());

        let styled = parse_markup("close]] only");
        assert_eq!(styled.text, "close]] only");
    }

    #[test]
    fn span_offsets_count_utf16_units() {
        let styled = parse_markup("日本😀 **x**");
        // 日, 本 are one unit each, the emoji is a surrogate pair.
        assert_eq!(styled.spans[0].start, 5);
        assert_eq!(styled.spans[0].end, 6);
        assert_eq!(strip_markup("日本😀 **x**"), "日本😀 x");
    }

    #[test]
    fn width_grows_with_text_and_size() {
        let narrow = estimate_text_width("iii", 10.0);
        let wide = estimate_text_width("MMM", 10.0);
        let cjk = estimate_text_width("漢字字", 10.0);
        assert!(narrow < wide && wide < cjk);
        assert!((estimate_text_width("ab", 20.0) - 2.0 * estimate_text_width("ab", 10.0)).abs() < 1e-9);
    }

    #[test]
    fn supplementary_plane_ideographs_are_full_width() {
        let ext_b = estimate_text_width("\u{20BB7}", 10.0);
        let basic = estimate_text_width("\u{5409}", 10.0);
        assert_eq!(ext_b, basic);
        assert_eq!(basic, 10.0);
        assert_eq!(estimate_text_width("\u{30000}", 10.0), 10.0);
    }

    #[test]
    fn line_count_wraps_and_respects_newlines() {
        assert_eq!(estimate_line_count("a\nb", 10.0, 100.0), 2);
        let long = "word ".repeat(40);
        assert!(estimate_line_count(&long, 12.0, 100.0) > 3);
    }

    #[test]
    fn fit_font_shrinks_long_text() {
        let short = fit_font_size("Hi", 200.0, 50.0, 24.0, 8.0);
        let long = fit_font_size(&"lorem ipsum ".repeat(30), 200.0, 50.0, 24.0, 8.0);
        assert_eq!(short, 24.0);
        assert!(long < short);
        assert!(long >= 8.0);
    }
}
