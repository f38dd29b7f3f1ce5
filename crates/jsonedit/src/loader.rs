//! Byte-slice JSON loader.
//!
//! Host buffers are length delimited and may carry bytes past the logical end
//! of the JSON text. [`load`] therefore stops at the first structurally
//! complete value and never looks at what follows it. [`load_exact`] is the
//! strict variant used when a whole argument must be one JSON document.
//!
//! Positions are tracked as 1-based line and column, where the column counts
//! characters rather than bytes, so diagnostics point at the offending
//! character of the original text.

use bstr::decode_utf8;

use crate::{
    Map, Value,
    error::{ParseError, SyntaxError},
};

/// Default limit on nested arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Loads the first JSON value in `bytes`, ignoring anything after it.
///
/// ```
/// use jsonedit::{Value, loader};
///
/// let v = loader::load(b"[1,2] and then some").unwrap();
/// assert_eq!(v, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
/// ```
pub fn load(bytes: &[u8]) -> Result<Value, ParseError> {
    load_with_depth(bytes, DEFAULT_MAX_DEPTH)
}

/// [`load`] with an explicit nesting limit.
pub fn load_with_depth(bytes: &[u8], max_depth: usize) -> Result<Value, ParseError> {
    Loader::new(bytes, max_depth).value_at_root()
}

/// Loads `bytes` as exactly one JSON value; only whitespace may follow it.
pub fn load_exact(bytes: &[u8], max_depth: usize) -> Result<Value, ParseError> {
    let mut loader = Loader::new(bytes, max_depth);
    let value = loader.value_at_root()?;
    loader.skip_whitespace();
    match loader.peek() {
        None => Ok(value),
        Some(_) => Err(loader.syntax_error(SyntaxError::TrailingCharacters)),
    }
}

struct Loader<'src> {
    src: &'src [u8],
    pos: usize,
    line: usize,
    column: usize,
    depth: usize,
    max_depth: usize,
}

/// Where a token started, for errors reported after it was consumed.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl<'src> Loader<'src> {
    fn new(src: &'src [u8], max_depth: usize) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
            max_depth,
        }
    }

    fn value_at_root(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        self.value()
    }

    // ------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self) {
        let Some(&b) = self.src.get(self.pos) else {
            return;
        };
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if b & 0xC0 != 0x80 {
            self.column += 1;
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.advance();
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.advance();
            Ok(())
        } else {
            Err(self.invalid_char())
        }
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => self.string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(b't') => self.literal(b"true", Value::Boolean(true)),
            Some(b'f') => self.literal(b"false", Value::Boolean(false)),
            Some(b'n') => self.literal(b"null", Value::Null),
            _ => Err(self.invalid_char()),
        }
    }

    fn literal(&mut self, text: &'static [u8], value: Value) -> Result<Value, ParseError> {
        for &expected in text {
            self.expect(expected)?;
        }
        Ok(value)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.syntax_error(SyntaxError::DepthLimitExceeded(self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.advance();
        let mut map = Map::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.invalid_char());
            }
            let key = self.string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.value()?;
            // Duplicate keys: the last value wins, the first position stays.
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.advance(),
                Some(b'}') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.invalid_char()),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.advance();
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.advance(),
                Some(b']') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.invalid_char()),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.advance();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
                Some(b'"') => {
                    self.advance();
                    return Ok(out);
                }
                Some(b'\\') => {
                    let start = self.mark();
                    self.advance();
                    out.push(self.escape(start)?);
                }
                Some(b) if b < 0x20 => {
                    return Err(self.syntax_error(SyntaxError::ControlCharacterInString(b)));
                }
                Some(b) if b < 0x80 => {
                    out.push(char::from(b));
                    self.advance();
                }
                Some(_) => {
                    let (c, len) = decode_utf8(&self.src[self.pos..]);
                    let Some(c) = c else {
                        return Err(self.syntax_error(SyntaxError::InvalidUtf8));
                    };
                    out.push(c);
                    for _ in 0..len {
                        self.advance();
                    }
                }
            }
        }
    }

    /// Decodes the escape after a backslash found at `start`.
    fn escape(&mut self, start: Mark) -> Result<char, ParseError> {
        let c = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.advance();
                return self.unicode_escape(start);
            }
            Some(b) if b < 0x80 => {
                return Err(self.syntax_error(SyntaxError::InvalidEscape(char::from(b))));
            }
            _ => return Err(self.invalid_char()),
        };
        self.advance();
        Ok(c)
    }

    /// Decodes the hex digits after `\u`, combining a surrogate pair when the
    /// first unit is a high surrogate.
    fn unicode_escape(&mut self, start: Mark) -> Result<char, ParseError> {
        let first = self.hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if self.peek() != Some(b'\\') {
                    return Err(
                        self.error_at(start, SyntaxError::InvalidUnicodeEscapeSequence(first))
                    );
                }
                self.advance();
                self.expect(b'u')?;
                let second = self.hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(
                        self.error_at(start, SyntaxError::InvalidUnicodeEscapeSequence(second))
                    );
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(start, SyntaxError::InvalidUnicodeEscapeSequence(first)));
            }
            code => code,
        };
        char::from_u32(code)
            .ok_or_else(|| self.error_at(start, SyntaxError::InvalidUnicodeEscapeSequence(code)))
    }

    fn hex4(&mut self) -> Result<u32, ParseError> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|b| char::from(b).to_digit(16))
                .ok_or_else(|| self.invalid_char())?;
            code = code * 16 + digit;
            self.advance();
        }
        Ok(code)
    }

    fn digits(&mut self, text: &mut String) -> Result<(), ParseError> {
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.invalid_char());
        }
        while let Some(b @ b'0'..=b'9') = self.peek() {
            text.push(char::from(b));
            self.advance();
        }
        Ok(())
    }

    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.mark();
        let mut text = String::new();
        let mut is_real = false;

        if self.peek() == Some(b'-') {
            text.push('-');
            self.advance();
        }
        match self.peek() {
            Some(b'0') => {
                text.push('0');
                self.advance();
            }
            _ => self.digits(&mut text)?,
        }
        if self.peek() == Some(b'.') {
            is_real = true;
            text.push('.');
            self.advance();
            self.digits(&mut text)?;
        }
        if let Some(b'e' | b'E') = self.peek() {
            is_real = true;
            text.push('e');
            self.advance();
            if let Some(b @ (b'+' | b'-')) = self.peek() {
                text.push(char::from(b));
                self.advance();
            }
            self.digits(&mut text)?;
        }

        if is_real {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Value::Real(n)),
                _ => Err(self.error_at(start, SyntaxError::RealOverflow)),
            }
        } else {
            text.parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.error_at(start, SyntaxError::IntegerOverflow))
        }
    }

    // ------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------

    fn invalid_char(&self) -> ParseError {
        let rest = &self.src[self.pos.min(self.src.len())..];
        let err = match rest.first() {
            None => SyntaxError::UnexpectedEndOfInput,
            Some(&b) if b < 0x80 => SyntaxError::InvalidCharacter(char::from(b)),
            Some(&b) => match decode_utf8(rest) {
                (Some(c), _) => SyntaxError::InvalidCharacter(c),
                (None, _) => SyntaxError::InvalidByte(b),
            },
        };
        self.syntax_error(err)
    }

    fn syntax_error(&self, err: SyntaxError) -> ParseError {
        self.error_at(self.mark(), err)
    }

    fn error_at(&self, mark: Mark, err: SyntaxError) -> ParseError {
        ParseError {
            source: err,
            line: mark.line,
            column: mark.column,
            offset: mark.pos,
        }
    }
}
