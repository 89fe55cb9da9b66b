//! Markup tokenizer
//!
//! Single left-to-right pass over the document, driven by an explicit
//! state machine (`Text`, `InTag`, `InComment`, `InPreserveRegion`). Every
//! token borrows its raw slice from the input; the concatenation of all
//! tokens is always the input itself.

/// Elements whose content is whitespace-significant and copied verbatim.
pub const PRESERVE_TAGS: [&str; 4] = ["pre", "textarea", "script", "style"];

/// A classified span of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Characters outside any tag
    Text(&'a str),
    /// Raw tag markup, `<` through the closing `>`
    Tag(&'a str),
    /// Raw comment markup including `<!--` and `-->`
    Comment(&'a str),
    /// Opening `pre`/`textarea`/`script`/`style` tag through its closing tag
    PreserveRegion(&'a str),
    /// Tag, comment or preserve region with no terminator: rest of the document
    Unterminated(&'a str),
}

impl<'a> Token<'a> {
    /// Raw markup of this token, exactly as it appears in the input
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Text(s)
            | Token::Tag(s)
            | Token::Comment(s)
            | Token::PreserveRegion(s)
            | Token::Unterminated(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    InTag,
    InComment,
    /// `start` is the `<` of the opening tag, the cursor sits after its `>`
    InPreserveRegion { start: usize, name: &'static str },
}

/// Iterator over the tokens of a document
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            state: State::Text,
        }
    }

    fn unterminated(&mut self, start: usize) -> Token<'a> {
        self.pos = self.src.len();
        self.state = State::Text;
        Token::Unterminated(&self.src[start..])
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let src = self.src;
        let bytes = src.as_bytes();

        loop {
            let pending_region = matches!(self.state, State::InPreserveRegion { .. });
            if self.pos >= bytes.len() && !pending_region {
                return None;
            }

            match self.state {
                State::Text => {
                    let start = self.pos;
                    let (end, next) =
                        find_markup_start(bytes, start).unwrap_or((bytes.len(), State::Text));
                    self.pos = end;
                    self.state = next;
                    if end > start {
                        return Some(Token::Text(&src[start..end]));
                    }
                }
                State::InComment => {
                    let start = self.pos;
                    return match find(bytes, start + 4, b"-->") {
                        Some(idx) => {
                            self.pos = idx + 3;
                            self.state = State::Text;
                            Some(Token::Comment(&src[start..self.pos]))
                        }
                        None => Some(self.unterminated(start)),
                    };
                }
                State::InTag => {
                    let start = self.pos;
                    let end = match scan_tag_end(bytes, start + 1) {
                        Some(end) => end,
                        None => return Some(self.unterminated(start)),
                    };
                    let raw = &src[start..end];
                    self.pos = end;

                    match opening_tag_name(raw).and_then(preserve_tag) {
                        Some(name) => {
                            // Emitted as a whole once the closing tag is found
                            self.state = State::InPreserveRegion { start, name };
                        }
                        None => {
                            self.state = State::Text;
                            return Some(Token::Tag(raw));
                        }
                    }
                }
                State::InPreserveRegion { start, name } => {
                    return match find_closing_tag(bytes, self.pos, name) {
                        Some(end) => {
                            self.pos = end;
                            self.state = State::Text;
                            Some(Token::PreserveRegion(&src[start..end]))
                        }
                        None => Some(self.unterminated(start)),
                    };
                }
            }
        }
    }
}

/// Convenience wrapper collecting all tokens of `src`
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    Tokenizer::new(src).collect()
}

/// Locate the next `<` that starts a comment or a tag.
///
/// A `<` followed by anything other than a letter, `/` or `!` is plain text.
fn find_markup_start(bytes: &[u8], from: usize) -> Option<(usize, State)> {
    let mut i = from;
    while i < bytes.len() {
        let offset = bytes[i..].iter().position(|&b| b == b'<')?;
        i += offset;

        if bytes[i..].starts_with(b"<!--") {
            return Some((i, State::InComment));
        }
        match bytes.get(i + 1) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!' => {
                return Some((i, State::InTag));
            }
            _ => i += 1,
        }
    }
    None
}

/// Find the end (exclusive) of a tag whose body starts at `from`.
///
/// A quote only opens a quoted region when it begins an attribute value,
/// so `>` inside `title="a > b"` does not end the tag while a stray
/// apostrophe in an unquoted value is ignored.
fn scan_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (i, &b) in bytes.iter().enumerate().skip(from) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }

        match b {
            b'>' => return Some(i + 1),
            b'=' => after_equals = true,
            b'"' | b'\'' if after_equals => {
                quote = Some(b);
                after_equals = false;
            }
            b if is_ascii_space(b) => {}
            _ => after_equals = false,
        }
    }
    None
}

/// Name of an opening tag, `None` for closing tags and `<!...>` declarations
fn opening_tag_name(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix('<')?;
    if body.starts_with('/') || body.starts_with('!') {
        return None;
    }
    let end = body
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    Some(&body[..end])
}

fn preserve_tag(name: &str) -> Option<&'static str> {
    PRESERVE_TAGS
        .iter()
        .find(|tag| name.eq_ignore_ascii_case(tag))
        .copied()
}

/// End (exclusive) of the first `</name ...>` at or after `from`
fn find_closing_tag(bytes: &[u8], from: usize, name: &str) -> Option<usize> {
    let mut i = from;
    while let Some(idx) = find(bytes, i, b"</") {
        let name_start = idx + 2;
        let name_end = name_start + name.len();

        let name_matches = bytes
            .get(name_start..name_end)
            .map(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()))
            .unwrap_or(false);
        let boundary = matches!(bytes.get(name_end), Some(&b) if b == b'>' || b == b'/' || is_ascii_space(b));

        if name_matches && boundary {
            return bytes[name_end..]
                .iter()
                .position(|&b| b == b'>')
                .map(|p| name_end + p + 1);
        }
        i = name_start;
    }
    None
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|p| from + p)
}

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}
