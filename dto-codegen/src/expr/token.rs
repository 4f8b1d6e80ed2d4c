//! Lexer for C# expression text.

use super::ExprError;

/// A lexed token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or keyword, as written (including a leading `@`).
    Ident(String),
    /// Numeric, string, character literal, as written.
    Literal(String),
    /// Interpolated string, split into raw text and hole source.
    Interpolated {
        prefix: String,
        parts: Vec<RawPart>,
    },
    Punct(&'static str),
}

/// Unparsed piece of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPart {
    /// Text as written, with `{{`/`}}` and escapes untouched.
    Text(String),
    /// Hole contents; `offset` is the byte position of `source` in the
    /// original input.
    Hole {
        source: String,
        offset: usize,
        alignment: Option<String>,
        format: Option<String>,
    },
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("'{}'", name),
            Self::Literal(raw) => format!("literal {}", raw),
            Self::Interpolated { .. } => "interpolated string".to_string(),
            Self::Punct(p) => format!("'{}'", p),
        }
    }
}

/// Multi-character punctuators, longest first.
const PUNCTUATORS: &[&str] = &[
    "=>", "??", "?.", "==", "!=", "<=", ">=", "&&", "||", "<<", "(", ")", "[", "]", "{", "}", ".",
    ",", ":", ";", "?", "!", "~", "+", "-", "*", "/", "%", "<", ">", "&", "|", "^", "=",
];

/// Tokenize expression source. `base` is added to every reported position,
/// so nested sources (interpolation holes) report absolute offsets.
pub fn tokenize(src: &str, base: usize) -> Result<Vec<Token>, ExprError> {
    Lexer { src, pos: 0, base }.run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    base: usize,
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            let Some(c) = self.peek() else { break };
            let start = self.pos;

            let kind = match c {
                '$' | '@' if self.interpolation_prefix().is_some() => self.interpolated()?,
                '@' if self.peek_at(1) == Some('"') => self.verbatim_string()?,
                '"' => self.regular_string()?,
                '\'' => self.char_literal()?,
                c if c.is_ascii_digit() => self.number(),
                '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
                c if c == '@' || c == '_' || c.is_alphabetic() => self.ident()?,
                _ => self.punct()?,
            };

            tokens.push(Token {
                kind,
                start: self.base + start,
                end: self.base + self.pos,
            });
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn abs(&self, pos: usize) -> usize {
        self.base + pos
    }

    fn skip_trivia(&mut self) -> Result<(), ExprError> {
        loop {
            if self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            } else if self.rest().starts_with("//") {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else if self.rest().starts_with("/*") {
                let start = self.pos;
                match self.rest()[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => return Err(ExprError::UnterminatedComment(self.abs(start))),
                }
            } else {
                return Ok(());
            }
        }
    }

    fn ident(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        if self.peek() == Some('@') {
            self.bump();
        }
        match self.peek() {
            Some(c) if c == '_' || c.is_alphabetic() => {}
            Some(c) => return Err(ExprError::UnexpectedChar(c, self.abs(self.pos))),
            None => return Err(ExprError::UnexpectedEnd),
        }
        while self.peek().is_some_and(|c| c == '_' || c.is_alphanumeric()) {
            self.bump();
        }
        Ok(TokenKind::Ident(self.src[start..self.pos].to_string()))
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        let hex_or_bin = self.rest().starts_with("0x")
            || self.rest().starts_with("0X")
            || self.rest().starts_with("0b")
            || self.rest().starts_with("0B");

        if hex_or_bin {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
        } else {
            self.digits();
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
                self.digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let sign = matches!(self.peek_at(1), Some('+' | '-'));
                let digit_at = if sign { 2 } else { 1 };
                if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += digit_at;
                    self.digits();
                }
            }
        }

        // Type suffixes: u, l, ul, lu, f, d, m in any case.
        while matches!(
            self.peek(),
            Some('u' | 'U' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D' | 'm' | 'M')
        ) {
            self.bump();
        }

        TokenKind::Literal(self.src[start..self.pos].to_string())
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
    }

    fn regular_string(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('"') => break,
                Some('\n') | None => return Err(ExprError::UnterminatedString(self.abs(start))),
                Some(_) => {}
            }
        }
        Ok(TokenKind::Literal(self.src[start..self.pos].to_string()))
    }

    fn verbatim_string(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        self.pos += 2;
        loop {
            match self.bump() {
                Some('"') if self.peek() == Some('"') => {
                    self.bump();
                }
                Some('"') => break,
                None => return Err(ExprError::UnterminatedString(self.abs(start))),
                Some(_) => {}
            }
        }
        Ok(TokenKind::Literal(self.src[start..self.pos].to_string()))
    }

    fn char_literal(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('\'') => break,
                Some('\n') | None => return Err(ExprError::UnterminatedString(self.abs(start))),
                Some(_) => {}
            }
        }
        Ok(TokenKind::Literal(self.src[start..self.pos].to_string()))
    }

    /// `$"`, `$@"` or `@$"` at the cursor.
    fn interpolation_prefix(&self) -> Option<&'static str> {
        let rest = self.rest();
        ["$@\"", "@$\"", "$\""]
            .into_iter()
            .find(|p| rest.starts_with(p))
            .map(|p| &p[..p.len() - 1])
    }

    fn interpolated(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.pos;
        let Some(prefix) = self.interpolation_prefix() else {
            return Err(ExprError::UnexpectedEnd);
        };
        let verbatim = prefix.contains('@');
        self.pos += prefix.len() + 1;

        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            let Some(c) = self.bump() else {
                return Err(ExprError::UnterminatedString(self.abs(start)));
            };
            match c {
                '"' if verbatim && self.peek() == Some('"') => {
                    self.bump();
                    text.push_str("\"\"");
                }
                '"' => break,
                '\\' if !verbatim => {
                    text.push('\\');
                    match self.bump() {
                        Some(escaped) => text.push(escaped),
                        None => return Err(ExprError::UnterminatedString(self.abs(start))),
                    }
                }
                '\n' if !verbatim => return Err(ExprError::UnterminatedString(self.abs(start))),
                '{' if self.peek() == Some('{') => {
                    self.bump();
                    text.push_str("{{");
                }
                '}' if self.peek() == Some('}') => {
                    self.bump();
                    text.push_str("}}");
                }
                '{' => {
                    if !text.is_empty() {
                        parts.push(RawPart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(self.hole()?);
                }
                '}' => return Err(ExprError::UnexpectedChar('}', self.abs(self.pos - 1))),
                _ => text.push(c),
            }
        }

        if !text.is_empty() {
            parts.push(RawPart::Text(text));
        }

        Ok(TokenKind::Interpolated {
            prefix: prefix.to_string(),
            parts,
        })
    }

    /// Scan one interpolation hole; the opening `{` is already consumed.
    ///
    /// The first top-level `,` starts the alignment and the first top-level
    /// `:` starts the format string, which runs to the closing `}`.
    fn hole(&mut self) -> Result<RawPart, ExprError> {
        let open = self.pos - 1;
        let expr_start = self.pos;
        let mut depth = 0usize;
        let mut expr_end = None;
        let mut alignment_start = None;

        loop {
            let Some(c) = self.peek() else {
                return Err(ExprError::UnterminatedHole(self.abs(open)));
            };
            match c {
                '"' => {
                    self.regular_string()?;
                    continue;
                }
                '@' if self.peek_at(1) == Some('"') => {
                    self.verbatim_string()?;
                    continue;
                }
                '\'' => {
                    self.char_literal()?;
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                '}' if depth > 0 => depth -= 1,
                '}' | ':' if depth == 0 => break,
                ',' if depth == 0 && alignment_start.is_none() => {
                    expr_end = Some(self.pos);
                    alignment_start = Some(self.pos + 1);
                }
                _ => {}
            }
            self.bump();
        }

        let split = self.pos;
        let source_end = expr_end.unwrap_or(split);
        let source = self.src[expr_start..source_end].to_string();
        let alignment = alignment_start.map(|s| self.src[s..split].trim().to_string());

        let format = if self.peek() == Some(':') {
            self.bump();
            let format_start = self.pos;
            while self.peek().is_some_and(|c| c != '}') {
                self.bump();
            }
            Some(self.src[format_start..self.pos].to_string())
        } else {
            None
        };

        if self.bump() != Some('}') {
            return Err(ExprError::UnterminatedHole(self.abs(open)));
        }

        Ok(RawPart::Hole {
            source,
            offset: self.abs(expr_start),
            alignment,
            format,
        })
    }

    fn punct(&mut self) -> Result<TokenKind, ExprError> {
        let rest = self.rest();
        for p in PUNCTUATORS {
            if rest.starts_with(p) {
                // `a ?.5 : b` is a conditional, not a null-conditional access.
                if *p == "?." && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
                    continue;
                }
                self.pos += p.len();
                return Ok(TokenKind::Punct(p));
            }
        }
        let c = self.peek().ok_or(ExprError::UnexpectedEnd)?;
        Err(ExprError::UnexpectedChar(c, self.abs(self.pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, 0)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    fn lit(s: &str) -> TokenKind {
        TokenKind::Literal(s.to_string())
    }

    #[test]
    fn test_lambda_tokens() {
        assert_eq!(
            kinds("u => u.Age + 10"),
            vec![
                ident("u"),
                TokenKind::Punct("=>"),
                ident("u"),
                TokenKind::Punct("."),
                ident("Age"),
                TokenKind::Punct("+"),
                lit("10"),
            ]
        );
    }

    #[test]
    fn test_numbers_keep_suffixes() {
        assert_eq!(
            kinds("1.5m 0xFF_FF 10UL 1e-3 .5f"),
            vec![lit("1.5m"), lit("0xFF_FF"), lit("10UL"), lit("1e-3"), lit(".5f")]
        );
    }

    #[test]
    fn test_member_access_on_integer_is_not_a_decimal() {
        assert_eq!(
            kinds("1.ToString()"),
            vec![
                lit("1"),
                TokenKind::Punct("."),
                ident("ToString"),
                TokenKind::Punct("("),
                TokenKind::Punct(")"),
            ]
        );
    }

    #[test]
    fn test_strings_and_chars() {
        assert_eq!(
            kinds(r#""a \" b" @"c:\""d" '\'' "#),
            vec![lit(r#""a \" b""#), lit(r#"@"c:\""d""#), lit(r"'\''")]
        );
    }

    #[test]
    fn test_unicode_string_content() {
        assert_eq!(kinds("\" · \""), vec![lit("\" · \"")]);
    }

    #[test]
    fn test_verbatim_identifier() {
        assert_eq!(kinds("@class"), vec![ident("@class")]);
    }

    #[test]
    fn test_null_conditional_and_coalesce() {
        assert_eq!(
            kinds("a?.b ?? c"),
            vec![
                ident("a"),
                TokenKind::Punct("?."),
                ident("b"),
                TokenKind::Punct("??"),
                ident("c"),
            ]
        );
    }

    #[test]
    fn test_conditional_with_leading_dot_number() {
        assert_eq!(
            kinds("a ?.5 : 1"),
            vec![
                ident("a"),
                TokenKind::Punct("?"),
                lit(".5"),
                TokenKind::Punct(":"),
                lit("1"),
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("a /* x */ + // y\n b"),
            vec![ident("a"), TokenKind::Punct("+"), ident("b")]
        );
    }

    #[test]
    fn test_interpolated_string_parts() {
        let tokens = kinds(r#"$"{u.FirstName} · {u.Age,5:D3} {{x}}""#);
        let TokenKind::Interpolated { prefix, parts } = &tokens[0] else {
            panic!("expected interpolated string");
        };
        assert_eq!(prefix, "$");
        assert_eq!(
            parts,
            &vec![
                RawPart::Hole {
                    source: "u.FirstName".to_string(),
                    offset: 3,
                    alignment: None,
                    format: None,
                },
                RawPart::Text(" · ".to_string()),
                RawPart::Hole {
                    source: "u.Age".to_string(),
                    offset: 20,
                    alignment: Some("5".to_string()),
                    format: Some("D3".to_string()),
                },
                RawPart::Text(" {{x}}".to_string()),
            ]
        );
    }

    #[test]
    fn test_interpolated_hole_with_nested_call_and_string() {
        let tokens = kinds(r#"$"{string.Join(", ", u.Tags)}""#);
        let TokenKind::Interpolated { parts, .. } = &tokens[0] else {
            panic!("expected interpolated string");
        };
        assert!(matches!(
            &parts[0],
            RawPart::Hole { source, alignment: None, .. } if source == r#"string.Join(", ", u.Tags)"#
        ));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokenize("\"abc", 0),
            Err(ExprError::UnterminatedString(0))
        );
    }

    #[test]
    fn test_unterminated_hole() {
        assert_eq!(tokenize("$\"{a", 0), Err(ExprError::UnterminatedHole(2)));
    }

    #[test]
    fn test_unexpected_char() {
        assert_eq!(tokenize("a # b", 0), Err(ExprError::UnexpectedChar('#', 2)));
    }

    #[test]
    fn test_positions_are_offset_by_base() {
        let tokens = tokenize("x", 10).unwrap();
        assert_eq!((tokens[0].start, tokens[0].end), (10, 11));
    }
}
