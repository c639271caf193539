use crate::token::{Token, TokenKind};
use egg_errors::TokenizerError;
use egg_span::{Location, SourceName};

/// A token together with the raw source text it was scanned from and the
/// 1-based position of its first code unit (§4.1).
#[derive(Clone, Debug, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub raw: String,
    pub line: u32,
    pub column: u32,
}

impl SpannedToken {
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn is_trivia(&self) -> bool {
        self.token.is_trivia()
    }

    pub fn location(&self, source: SourceName) -> Location {
        Location::point(source, self.line, self.column)
    }
}

/// A lexical error paired with the location it was raised at, ready for
/// `TokenizerError::at` once wrapped by the caller.
pub type Spanned<T> = (T, Location);

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
        || matches!(
            c,
            '\u{00A0}'
                | '\u{1680}'
                | '\u{2000}'..='\u{200A}'
                | '\u{202F}'
                | '\u{205F}'
                | '\u{3000}'
        )
}

fn is_line_sep(c: char) -> bool {
    matches!(c, '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Scans a source string into a token stream. One `Tokenizer` is consumed by
/// one `tokenize` call; the pull-style scanning described in §4.1 is
/// flattened here into an eager `Vec` because every later stage (Parser,
/// test harness dumps) wants random access and rewind over the whole stream.
pub struct Tokenizer {
    source: SourceName,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Tokenizer {
    pub fn from_str(source: SourceName, text: &str) -> Self {
        Self { source, chars: text.chars().collect(), pos: 0, line: 1, column: 1 }
    }

    /// Scans the whole source. Fatal to the call: the first lexical error
    /// stops scanning and is returned with its location.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, Spanned<TokenizerError>> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        let eof_line = self.line;
        let eof_col = self.column;
        tokens.push(SpannedToken { token: Token::Eof, raw: String::new(), line: eof_line, column: eof_col });
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        self.column += 1;
        Some(c)
    }

    /// Consumes one line-separator occurrence (CRLF counts as one) and
    /// returns the raw text consumed; resets line/column bookkeeping.
    fn bump_line_separator(&mut self) -> String {
        let c = self.chars[self.pos];
        let mut raw = String::new();
        raw.push(c);
        self.pos += 1;
        if c == '\r' && self.peek() == Some('\n') {
            raw.push('\n');
            self.pos += 1;
        }
        self.line += 1;
        self.column = 1;
        raw
    }

    fn location(&self, line: u32, column: u32) -> Location {
        Location::point(self.source.clone(), line, column)
    }

    fn spanned(&self, token: Token, raw: String, line: u32, column: u32) -> SpannedToken {
        SpannedToken { token, raw, line, column }
    }

    fn next_token(&mut self) -> Result<Option<SpannedToken>, Spanned<TokenizerError>> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let line = self.line;
        let column = self.column;

        if is_line_sep(c) {
            let raw = self.bump_line_separator();
            return Ok(Some(self.spanned(Token::Whitespace("\n".to_string()), raw, line, column)));
        }

        if is_space(c) {
            let mut raw = String::new();
            while let Some(c) = self.peek() {
                if !is_space(c) {
                    break;
                }
                raw.push(c);
                self.bump();
            }
            return Ok(Some(self.spanned(Token::Whitespace(" ".to_string()), raw, line, column)));
        }

        if c == '/' && self.peek_at(1) == Some('/') {
            return self.scan_line_comment(line, column).map(Some);
        }
        if c == '/' && self.peek_at(1) == Some('*') {
            return self.scan_block_comment(line, column).map(Some);
        }

        if is_ident_start(c) {
            return Ok(Some(self.scan_identifier(line, column)));
        }

        if c.is_ascii_digit() {
            return self.scan_number(line, column).map(Some);
        }

        if c == '"' {
            return self.scan_string(line, column).map(Some);
        }

        self.scan_punctuation(line, column).map(Some)
    }

    fn scan_line_comment(&mut self, line: u32, column: u32) -> Result<SpannedToken, Spanned<TokenizerError>> {
        let mut raw = String::from(self.bump().unwrap());
        raw.push(self.bump().unwrap());
        let mut value = String::from("//");
        while let Some(c) = self.peek() {
            if is_line_sep(c) {
                let sep = self.bump_line_separator();
                raw.push_str(&sep);
                value.push('\n');
                break;
            }
            raw.push(c);
            value.push(c);
            self.bump();
        }
        Ok(self.spanned(Token::CommentLine(value), raw, line, column))
    }

    fn scan_block_comment(&mut self, line: u32, column: u32) -> Result<SpannedToken, Spanned<TokenizerError>> {
        let mut raw = String::from(self.bump().unwrap());
        raw.push(self.bump().unwrap());
        let mut value = String::from("/*");
        loop {
            match self.peek() {
                None => return Err((TokenizerError::UnterminatedBlockComment, self.location(line, column))),
                Some('*') if self.peek_at(1) == Some('/') => {
                    raw.push(self.bump().unwrap());
                    raw.push(self.bump().unwrap());
                    value.push_str("*/");
                    break;
                }
                Some(c) if is_line_sep(c) => {
                    let sep = self.bump_line_separator();
                    raw.push_str(&sep);
                    value.push('\n');
                }
                Some(c) => {
                    raw.push(c);
                    value.push(c);
                    self.bump();
                }
            }
        }
        Ok(self.spanned(Token::CommentBlock(value), raw, line, column))
    }

    fn scan_identifier(&mut self, line: u32, column: u32) -> SpannedToken {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            s.push(c);
            self.bump();
        }
        let token = Token::keyword(&s).unwrap_or_else(|| Token::Ident(s.clone()));
        self.spanned(token, s, line, column)
    }

    fn scan_number(&mut self, line: u32, column: u32) -> Result<SpannedToken, Spanned<TokenizerError>> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            s.push(c);
            self.bump();
        }

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            s.push(self.bump().unwrap());
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                s.push(c);
                self.bump();
            }
        }

        if let Some(c) = self.peek() {
            if is_ident_start(c) {
                return Err((TokenizerError::InvalidNumberChar(c), self.location(self.line, self.column)));
            }
        }

        let token = if is_float { Token::Float(s.clone()) } else { Token::Integer(s.clone()) };
        Ok(self.spanned(token, s, line, column))
    }

    fn scan_string(&mut self, line: u32, column: u32) -> Result<SpannedToken, Spanned<TokenizerError>> {
        let mut raw = String::from(self.bump().unwrap());
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err((TokenizerError::UnterminatedString, self.location(line, column))),
                Some('"') => {
                    raw.push(self.bump().unwrap());
                    break;
                }
                Some('\\') => {
                    let esc_line = self.line;
                    let esc_column = self.column;
                    raw.push(self.bump().unwrap());
                    let Some(c) = self.peek() else {
                        return Err((TokenizerError::UnterminatedString, self.location(line, column)));
                    };
                    if is_line_sep(c) {
                        let sep = self.bump_line_separator();
                        raw.push_str(&sep);
                        continue;
                    }
                    self.scan_escape(c, esc_line, esc_column, &mut raw, &mut value)?;
                }
                Some(c) if is_line_sep(c) => {
                    let sep = self.bump_line_separator();
                    raw.push_str(&sep);
                    value.push('\n');
                }
                Some(c) => {
                    raw.push(c);
                    value.push(c);
                    self.bump();
                }
            }
        }
        Ok(self.spanned(Token::Str(value), raw, line, column))
    }

    fn scan_escape(
        &mut self,
        c: char,
        esc_line: u32,
        esc_column: u32,
        raw: &mut String,
        value: &mut String,
    ) -> Result<(), Spanned<TokenizerError>> {
        match c {
            '"' => {
                raw.push(self.bump().unwrap());
                value.push('"');
            }
            '\\' => {
                raw.push(self.bump().unwrap());
                value.push('\\');
            }
            '0' => {
                raw.push(self.bump().unwrap());
                value.push('\0');
            }
            'a' => {
                raw.push(self.bump().unwrap());
                value.push('\u{7}');
            }
            'b' => {
                raw.push(self.bump().unwrap());
                value.push('\u{8}');
            }
            'e' => {
                raw.push(self.bump().unwrap());
                value.push('\u{1B}');
            }
            'f' => {
                raw.push(self.bump().unwrap());
                value.push('\u{C}');
            }
            'n' => {
                raw.push(self.bump().unwrap());
                value.push('\n');
            }
            'r' => {
                raw.push(self.bump().unwrap());
                value.push('\r');
            }
            't' => {
                raw.push(self.bump().unwrap());
                value.push('\t');
            }
            'v' => {
                raw.push(self.bump().unwrap());
                value.push('\u{B}');
            }
            'u' => {
                raw.push(self.bump().unwrap());
                if self.peek() != Some('+') {
                    return Err((TokenizerError::MalformedUnicodeEscape, self.location(esc_line, esc_column)));
                }
                raw.push(self.bump().unwrap());
                let mut hex = String::new();
                while let Some(h) = self.peek() {
                    if !h.is_ascii_hexdigit() {
                        break;
                    }
                    if hex.len() == 6 {
                        return Err((TokenizerError::TooManyHexDigits, self.location(esc_line, esc_column)));
                    }
                    hex.push(h);
                    raw.push(h);
                    self.bump();
                }
                if self.peek() != Some(';') {
                    return Err((TokenizerError::MalformedUnicodeEscape, self.location(esc_line, esc_column)));
                }
                raw.push(self.bump().unwrap());
                if hex.is_empty() {
                    return Err((TokenizerError::EmptyUnicodeEscape, self.location(esc_line, esc_column)));
                }
                let codepoint = u32::from_str_radix(&hex, 16).expect("validated hex digits");
                match char::from_u32(codepoint) {
                    Some(ch) => value.push(ch),
                    None => return Err((TokenizerError::CodepointOutOfRange(codepoint), self.location(esc_line, esc_column))),
                }
            }
            other => return Err((TokenizerError::InvalidEscape(other), self.location(esc_line, esc_column))),
        }
        Ok(())
    }

    fn scan_punctuation(&mut self, line: u32, column: u32) -> Result<SpannedToken, Spanned<TokenizerError>> {
        let c = self.bump().unwrap();
        let (token, raw) = match c {
            '=' => self.maybe_two(c, '=', Token::EqEq, Token::Assign),
            '!' => self.maybe_two(c, '=', Token::NotEq, Token::Not),
            '<' => self.maybe_two(c, '=', Token::LtEq, Token::Lt),
            '>' => self.maybe_two(c, '=', Token::GtEq, Token::Gt),
            '*' => self.maybe_two(c, '=', Token::StarEq, Token::Star),
            '/' => self.maybe_two(c, '=', Token::SlashEq, Token::Slash),
            '%' => self.maybe_two(c, '=', Token::PercentEq, Token::Percent),
            '+' => {
                if self.peek() == Some('+') {
                    self.bump();
                    (Token::PlusPlus, "++".to_string())
                } else if self.peek() == Some('=') {
                    self.bump();
                    (Token::PlusEq, "+=".to_string())
                } else {
                    (Token::Plus, "+".to_string())
                }
            }
            '-' => {
                if self.peek() == Some('-') {
                    self.bump();
                    (Token::MinusMinus, "--".to_string())
                } else if self.peek() == Some('=') {
                    self.bump();
                    (Token::MinusEq, "-=".to_string())
                } else {
                    (Token::Minus, "-".to_string())
                }
            }
            '&' if self.peek() == Some('&') => {
                self.bump();
                (Token::AndAnd, "&&".to_string())
            }
            '|' if self.peek() == Some('|') => {
                self.bump();
                (Token::OrOr, "||".to_string())
            }
            '?' => (Token::Question, "?".to_string()),
            ':' => (Token::Colon, ":".to_string()),
            '(' => (Token::LParen, "(".to_string()),
            ')' => (Token::RParen, ")".to_string()),
            '[' => (Token::LBracket, "[".to_string()),
            ']' => (Token::RBracket, "]".to_string()),
            '{' => (Token::LBrace, "{".to_string()),
            '}' => (Token::RBrace, "}".to_string()),
            ',' => (Token::Comma, ",".to_string()),
            '.' => (Token::Dot, ".".to_string()),
            ';' => (Token::Semi, ";".to_string()),
            other => return Err((TokenizerError::UnexpectedChar(other), self.location(line, column))),
        };
        Ok(self.spanned(token, raw, line, column))
    }

    fn maybe_two(&mut self, first: char, second: char, two: Token, one: Token) -> (Token, String) {
        if self.peek() == Some(second) {
            self.bump();
            (two, format!("{first}{second}"))
        } else {
            (one, first.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn source() -> SourceName {
        Rc::from("test.egg")
    }

    fn kinds(text: &str) -> Vec<Token> {
        Tokenizer::from_str(source(), text)
            .tokenize()
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn tokenizes_hello_world() {
        let tokens = kinds(r#"print("hello");"#);
        assert_eq!(
            tokens,
            vec![
                Token::Ident("print".to_string()),
                Token::LParen,
                Token::Str("hello".to_string()),
                Token::RParen,
                Token::Semi,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_integer_and_float() {
        assert_eq!(kinds("42"), vec![Token::Integer("42".to_string()), Token::Eof]);
        assert_eq!(kinds("3.14"), vec![Token::Float("3.14".to_string()), Token::Eof]);
    }

    #[test]
    fn rejects_identifier_glued_to_number() {
        let err = Tokenizer::from_str(source(), "123abc").tokenize().unwrap_err();
        assert_eq!(err.0, TokenizerError::InvalidNumberChar('a'));
    }

    #[test]
    fn decodes_string_escapes() {
        let tokens = kinds(r#""a\tb\u+48;""#);
        assert_eq!(tokens, vec![Token::Str("a\tbH".to_string()), Token::Eof]);
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = Tokenizer::from_str(source(), "\"abc").tokenize().unwrap_err();
        assert_eq!(err.0, TokenizerError::UnterminatedString);
    }

    #[test]
    fn line_continuation_elides_the_newline() {
        let tokens = kinds("\"a\\\nb\"");
        assert_eq!(tokens, vec![Token::Str("ab".to_string()), Token::Eof]);
    }

    #[test]
    fn collapses_crlf_to_a_single_whitespace_token() {
        let all = Tokenizer::from_str(source(), "a\r\nb").tokenize().unwrap();
        let whitespace_count = all.iter().filter(|t| matches!(t.token, Token::Whitespace(_))).count();
        assert_eq!(whitespace_count, 1);
        assert_eq!(all[1].line, 1);
        assert_eq!(all[2].line, 2);
    }

    #[test]
    fn tracks_line_and_column_of_first_code_unit() {
        let all = Tokenizer::from_str(source(), "x\n  y").tokenize().unwrap();
        let y = all.iter().find(|t| matches!(&t.token, Token::Ident(n) if n == "y")).unwrap();
        assert_eq!((y.line, y.column), (2, 3));
    }

    #[test]
    fn recognises_keywords_distinct_from_identifiers() {
        assert_eq!(kinds("var"), vec![Token::Var, Token::Eof]);
        assert_eq!(kinds("variable"), vec![Token::Ident("variable".to_string()), Token::Eof]);
    }

    #[test]
    fn block_comment_must_be_closed() {
        let err = Tokenizer::from_str(source(), "/* never closed").tokenize().unwrap_err();
        assert_eq!(err.0, TokenizerError::UnterminatedBlockComment);
    }
}
