//! Text layout: greedy line wrapping and top-down pagination.
//!
//! The engine has no real font metrics. Character width is
//! approximated as a fixed fraction of the font size, so line breaks
//! are deterministic but not pixel-exact. Callers accept that trade
//! for a layout that is pure data and fully testable without a PDF
//! library.

/// A4 portrait, in PDF points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

/// Average glyph width as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Gap between the header baseline and the first body line.
const HEADER_CLEARANCE: f32 = 40.0;
/// Leading added below the font size for each body line.
const LINE_LEADING: f32 = 4.0;
/// Cursor positions closer to the bottom margin than this break to a
/// new page.
const OVERFLOW_GUARD: f32 = 20.0;

/// Layout parameters for the generated document.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub header_font_size: f32,
    pub footer_font_size: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 50.0,
            font_size: 12.0,
            header_font_size: 18.0,
            footer_font_size: 9.0,
        }
    }
}

impl LayoutOptions {
    /// Horizontal space available to body lines.
    pub fn body_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

/// A piece of text positioned on a page. Coordinates are PDF user
/// space: origin at the bottom-left corner, y growing upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// One laid-out page: a fixed-size canvas with an optional header,
/// body lines positioned top-down, and a footer stamp.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub header: Option<PlacedText>,
    pub body: Vec<PlacedText>,
    pub footer: Option<PlacedText>,
}

/// How many characters fit on one line under the width model.
pub fn max_chars_per_line(max_width: f32, font_size: f32) -> usize {
    (max_width / (font_size * CHAR_WIDTH_FACTOR)).floor() as usize
}

/// Wrap `text` into lines that fit `max_width` under the approximate
/// width model. Words are never split; a single word wider than the
/// line budget is emitted alone, unbroken.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let budget = max_chars_per_line(max_width, font_size);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + word.chars().count() > budget {
            push_line(&mut line, &mut lines);
        }
        line.push_str(word);
        line.push(' ');
    }
    push_line(&mut line, &mut lines);

    lines
}

fn push_line(line: &mut String, lines: &mut Vec<String>) {
    let trimmed = line.trim_end();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
    line.clear();
}

/// Flow wrapped `lines` onto pages, breaking to a fresh page whenever
/// vertical space runs out.
///
/// The line that triggers an overflow is drawn at the top of the new
/// page, and that page stays current for everything that follows. The
/// header goes on the first page only; the footer is stamped on every
/// page. Always yields at least one page, even with no body lines.
pub fn paginate(lines: &[String], header: &str, footer: &str, opts: &LayoutOptions) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = new_page(opts);
    page.header = Some(PlacedText {
        text: header.to_string(),
        x: opts.margin,
        y: opts.page_height - opts.margin,
        font_size: opts.header_font_size,
    });

    let mut cursor = opts.page_height - opts.margin - HEADER_CLEARANCE;

    for line in lines {
        if cursor < opts.margin + OVERFLOW_GUARD {
            pages.push(std::mem::replace(&mut page, new_page(opts)));
            cursor = opts.page_height - opts.margin;
        }
        page.body.push(PlacedText {
            text: line.clone(),
            x: opts.margin,
            y: cursor,
            font_size: opts.font_size,
        });
        cursor -= opts.font_size + LINE_LEADING;
    }
    pages.push(page);

    for page in &mut pages {
        page.footer = Some(PlacedText {
            text: footer.to_string(),
            x: opts.margin,
            y: opts.margin - OVERFLOW_GUARD,
            font_size: opts.footer_font_size,
        });
    }

    pages
}

fn new_page(opts: &LayoutOptions) -> Page {
    Page {
        width: opts.page_width,
        height: opts.page_height,
        header: None,
        body: Vec::new(),
        footer: None,
    }
}
