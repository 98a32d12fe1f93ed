use crate::error::ArrayParseError;

#[derive(Clone, Copy)]
enum State {
    /// Expecting an element (or `}` right after `{`).
    Element,
    /// After an element, expecting `,` or `}`.
    Separator,
    Done,
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

fn unexpected(text: &str, position: usize) -> ArrayParseError {
    let found = text[position..].chars().next().unwrap_or('\0');
    ArrayParseError::UnexpectedCharacter { position, found }
}

/// Skip a `[lo:hi]=` dimension decoration, returning the index of the `{`.
fn skip_dimensions(bytes: &[u8]) -> Result<usize, ArrayParseError> {
    let mut idx = 0;
    while bytes.get(idx) == Some(&b'[') {
        idx += 1;
        let start = idx;
        while idx < bytes.len()
            && (bytes[idx].is_ascii_digit() || matches!(bytes[idx], b'-' | b':'))
        {
            idx += 1;
        }
        if idx == start || bytes.get(idx) != Some(&b']') {
            return Err(ArrayParseError::BadDimensions);
        }
        idx += 1;
    }
    if idx > 0 {
        if bytes.get(idx) != Some(&b'=') {
            return Err(ArrayParseError::BadDimensions);
        }
        idx += 1;
    }
    Ok(idx)
}

/// Scan a double-quoted element starting at the opening quote.
fn scan_quoted(text: &str, start: usize) -> Result<(String, usize), ArrayParseError> {
    let bytes = text.as_bytes();
    let mut buf = Vec::new();
    let mut idx = start + 1;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => {
                idx += 1;
                let Some(&escaped) = bytes.get(idx) else {
                    return Err(ArrayParseError::Unterminated);
                };
                buf.push(escaped);
            }
            b'"' => return Ok((String::from_utf8_lossy(&buf).into_owned(), idx + 1)),
            b => buf.push(b),
        }
        idx += 1;
    }
    Err(ArrayParseError::Unterminated)
}

/// Scan an unquoted element; `None` for the `NULL` keyword.
///
/// Escaped bytes are literal: they survive trailing-whitespace trimming, and an element with
/// any escape is never the `NULL` keyword.
fn scan_unquoted(text: &str, start: usize) -> Result<(Option<String>, usize), ArrayParseError> {
    let bytes = text.as_bytes();
    let mut buf = Vec::new();
    // length of `buf` up to and including the last escaped byte
    let mut escaped_len = 0;
    let mut idx = start;
    while idx < bytes.len() {
        match bytes[idx] {
            b',' | b'}' => break,
            b'{' | b'"' => return Err(unexpected(text, idx)),
            b'\\' => {
                idx += 1;
                let Some(&escaped) = bytes.get(idx) else {
                    return Err(ArrayParseError::Unterminated);
                };
                buf.push(escaped);
                escaped_len = buf.len();
            }
            b => buf.push(b),
        }
        idx += 1;
    }
    if idx == bytes.len() {
        return Err(ArrayParseError::Unterminated);
    }

    while buf.len() > escaped_len && buf.last().is_some_and(u8::is_ascii_whitespace) {
        buf.pop();
    }
    if escaped_len == 0 && buf.eq_ignore_ascii_case(b"NULL") {
        Ok((None, idx))
    } else {
        Ok((Some(String::from_utf8_lossy(&buf).into_owned()), idx))
    }
}

/// Split a one-dimensional PostgreSQL array literal into its text elements.
///
/// `{}` yields no elements, unquoted `NULL` yields `None`, and quoted elements keep their
/// content verbatim after backslash unescaping.
pub(crate) fn split_array_literal(text: &str) -> Result<Vec<Option<String>>, ArrayParseError> {
    let text = text.trim();
    let bytes = text.as_bytes();

    let mut idx = skip_dimensions(bytes)?;
    if bytes.get(idx) != Some(&b'{') {
        return Err(ArrayParseError::MissingOpenBrace);
    }
    idx += 1;

    let mut elements = Vec::new();
    let mut state = State::Element;
    loop {
        idx = skip_whitespace(bytes, idx);
        let Some(&b) = bytes.get(idx) else {
            return Err(ArrayParseError::Unterminated);
        };
        match state {
            State::Element => match b {
                b'}' if elements.is_empty() => {
                    state = State::Done;
                    idx += 1;
                }
                b'{' => return Err(ArrayParseError::Nested),
                b'"' => {
                    let (element, next) = scan_quoted(text, idx)?;
                    elements.push(Some(element));
                    state = State::Separator;
                    idx = next;
                }
                b',' | b'}' => return Err(unexpected(text, idx)),
                _ => {
                    let (element, next) = scan_unquoted(text, idx)?;
                    elements.push(element);
                    state = State::Separator;
                    idx = next;
                }
            },
            State::Separator => match b {
                b',' => {
                    state = State::Element;
                    idx += 1;
                }
                b'}' => {
                    state = State::Done;
                    idx += 1;
                }
                _ => return Err(unexpected(text, idx)),
            },
            State::Done => {}
        }
        if matches!(state, State::Done) {
            break;
        }
    }

    if skip_whitespace(bytes, idx) != bytes.len() {
        return Err(ArrayParseError::TrailingInput);
    }
    Ok(elements)
}

/// Parse every non-NULL element with `parse`, failing on the first element it rejects.
pub(crate) fn parse_elements<T>(
    elements: Vec<Option<String>>,
    element_type: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<Option<T>>, ArrayParseError> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .ok_or(ArrayParseError::InvalidElement {
                    index,
                    text,
                    element_type,
                }),
        })
        .collect()
}

pub(crate) fn parse_bool_element(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("t") || text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("f") || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
