/*!
 * Markdown-subset rendering for bot-authored guide text.
 *
 * Only two inline styles are understood, `**bold**` and `_italic_`, plus
 * paragraph breaks on blank lines. Everything else is literal text. The
 * input is trusted plain text, so nothing is HTML-escaped; never feed
 * rendered HTML back through here.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*").unwrap()
});

static ITALIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(.+?)_").unwrap()
});

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Content,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Content
        }
    }
}

/// Whether the renderer currently has an open `<p>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphState {
    #[default]
    Outside,
    Inside,
}

impl ParagraphState {
    pub fn next(self, kind: LineKind) -> Self {
        match (self, kind) {
            (_, LineKind::Content) => ParagraphState::Inside,
            (_, LineKind::Blank) => ParagraphState::Outside,
        }
    }
}

/// Groups lines into `<p>` blocks.
///
/// Consecutive content lines share a paragraph and are separated by `<br/>`;
/// any run of blank lines closes it.
#[derive(Debug, Default)]
pub struct ParagraphBuilder {
    state: ParagraphState,
    current: String,
    paragraphs: Vec<String>,
}

impl ParagraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParagraphState {
        self.state
    }

    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        let kind = LineKind::of(line);

        match (self.state, kind) {
            (ParagraphState::Outside, LineKind::Content) => {
                self.current.push_str("<p>");
                self.current.push_str(line);
            }
            (ParagraphState::Inside, LineKind::Content) => {
                self.current.push_str("<br/>\n");
                self.current.push_str(line);
            }
            (ParagraphState::Inside, LineKind::Blank) => self.close(),
            (ParagraphState::Outside, LineKind::Blank) => {}
        }

        self.state = self.state.next(kind);
    }

    fn close(&mut self) {
        self.current.push_str("</p>");
        self.paragraphs.push(std::mem::take(&mut self.current));
    }

    /// Close any open paragraph and join all paragraphs with newlines
    pub fn finish(mut self) -> String {
        if self.state == ParagraphState::Inside {
            self.close();
        }
        self.paragraphs.join("\n")
    }
}

/// Apply the inline styles to one run of text
pub fn render_inline(text: &str) -> String {
    let bold = BOLD_REGEX.replace_all(text, "<strong>$1</strong>");
    ITALIC_REGEX.replace_all(&bold, "<em>$1</em>").into_owned()
}

/// Render markdown-subset text to HTML paragraphs
pub fn render_markdown_subset(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let styled = render_inline(text);
    let mut builder = ParagraphBuilder::new();
    for line in styled.lines() {
        builder.push_line(line);
    }
    builder.finish()
}

/// Plain-text excerpt for meta descriptions: the first `max_chars` characters
/// with bold markers dropped and line breaks flattened, followed by an ellipsis.
pub fn plain_excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    let mut excerpt = head.replace("**", "").replace(['\r', '\n'], " ");
    excerpt.push('…');
    excerpt
}
