//! HTML minification engine
//!
//! This module provides the whitespace/comment rewriter:
//! - Tokenization into text, tags, comments and preserve regions
//! - Collapsing of every whitespace run in text to a single space
//! - Optional comment stripping
//!
//! Tag markup, preserve regions (`pre`, `textarea`, `script`, `style`)
//! and unterminated trailing markup are copied byte for byte. The engine
//! never fails: anything it cannot classify is passed through.
//!
//! # Module Organization
//!
//! - [`tokenizer`] - State-machine tokenizer producing borrowed [`Token`]s

pub mod tokenizer;

pub use tokenizer::{tokenize, Token, Tokenizer, PRESERVE_TAGS};

/// Options controlling a minification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Emit comments unchanged instead of dropping them
    pub keep_comments: bool,
}

impl MinifyOptions {
    pub fn new(keep_comments: bool) -> Self {
        Self { keep_comments }
    }
}

/// Reusable minifier bound to a set of options
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier {
    options: MinifyOptions,
}

impl HtmlMinifier {
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MinifyOptions {
        self.options
    }

    /// Minify a document
    pub fn minify(&self, document: &str) -> String {
        let mut out = Output::with_capacity(document.len());

        let mut tokens = Tokenizer::new(document).peekable();

        while let Some(token) = tokens.next() {
            match token {
                Token::Text(text) => out.push_collapsed(text),
                Token::Comment(raw) => {
                    // A dropped comment must not glue a stray `<` onto a tag opener
                    let joins_markup = out.ends_with_lt()
                        && tokens
                            .peek()
                            .map(|next| starts_markup(next.as_str()))
                            .unwrap_or(false);
                    if self.options.keep_comments || joins_markup {
                        out.push_verbatim(raw);
                    }
                }
                Token::Tag(raw) | Token::PreserveRegion(raw) | Token::Unterminated(raw) => {
                    out.push_verbatim(raw)
                }
            }
        }

        out.into_string()
    }
}

/// Minify `document`, keeping or stripping comments
///
/// # Examples
///
/// ```
/// use htmlmin::minify::minify;
///
/// let html = "<html>   <body>some text here</body>    </html>";
/// assert_eq!(minify(html, false), "<html> <body>some text here</body> </html>");
/// ```
pub fn minify(document: &str, keep_comments: bool) -> String {
    HtmlMinifier::new(MinifyOptions::new(keep_comments)).minify(document)
}

/// True when `<` followed by `rest` would open a tag or declaration
fn starts_markup(rest: &str) -> bool {
    matches!(
        rest.as_bytes().first(),
        Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!'
    )
}

/// Characters collapsed in text runs
pub fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Output buffer that remembers whether it ends in collapsed whitespace.
///
/// Text on both sides of a dropped comment is merged through this flag, so
/// `a <!-- x --> b` becomes `a b` and a second pass changes nothing.
struct Output {
    buf: String,
    trailing_space: bool,
}

impl Output {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            trailing_space: false,
        }
    }

    fn push_collapsed(&mut self, text: &str) {
        let mut rest = text;
        while !rest.is_empty() {
            match rest.find(is_collapsible_whitespace) {
                Some(0) => {
                    if !self.trailing_space {
                        self.buf.push(' ');
                        self.trailing_space = true;
                    }
                    let run_end = rest
                        .find(|c: char| !is_collapsible_whitespace(c))
                        .unwrap_or(rest.len());
                    rest = &rest[run_end..];
                }
                Some(idx) => {
                    self.buf.push_str(&rest[..idx]);
                    self.trailing_space = false;
                    rest = &rest[idx..];
                }
                None => {
                    self.buf.push_str(rest);
                    self.trailing_space = false;
                    rest = "";
                }
            }
        }
    }

    fn ends_with_lt(&self) -> bool {
        self.buf.ends_with('<')
    }

    fn push_verbatim(&mut self, raw: &str) {
        self.buf.push_str(raw);
        self.trailing_space = false;
    }

    fn into_string(self) -> String {
        self.buf
    }
}
