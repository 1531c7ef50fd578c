use thiserror::Error;

use crate::token::{Span, Token, TokenKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("Unterminated block comment at line {line}")]
    UnterminatedBlockComment { line: usize },
    #[error("Unexpected character '{character}' at line {line} column {column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
}

pub type LexResult<T> = Result<T, LexError>;

const TWO_CHAR_OPS: [&str; 7] = ["==", "!=", "<=", ">=", "=>", "&&", "||"];
const SINGLE_CHAR_OPS: &str = "+-*/%=<>!";

fn keyword_kind(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "let" => TokenKind::Let,
        "const" => TokenKind::Const,
        "fn" => TokenKind::Fn,
        "function" => TokenKind::Function,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "import" => TokenKind::Import,
        "as" => TokenKind::As,
        "from" => TokenKind::From,
        "export" => TokenKind::Export,
        "default" => TokenKind::Default,
        "spawn" => TokenKind::Spawn,
        _ => return None,
    };
    Some(kind)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        self.column += 1;
        Some(c)
    }

    fn consume_while<P>(&mut self, keep_predicate: P) -> &'a str
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !keep_predicate(c) {
                break;
            }
            self.consume_char();
        }
        &self.input[start..self.pos]
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    fn unexpected(&self, character: char) -> LexError {
        LexError::UnexpectedCharacter {
            character,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_block_comment(&mut self) -> LexResult<()> {
        let rest = self.rest();
        let Some(end) = rest.find("*/") else {
            return Err(LexError::UnterminatedBlockComment { line: self.line });
        };
        let comment = &rest[..end + 2];
        match comment.rfind('\n') {
            Some(last_newline) => {
                self.line += comment.matches('\n').count();
                self.column = comment[last_newline + 1..].chars().count() + 1;
            }
            None => self.column += comment.chars().count(),
        }
        self.pos += comment.len();
        Ok(())
    }

    /// Scan one token at the cursor, or `None` for skipped text.
    ///
    /// Pattern priority follows the language definition: number, string,
    /// line comment, name/keyword, operator, newline, whitespace,
    /// punctuation. Ordering is what makes `1.5` a single number while
    /// `x.y` stays NAME DOT NAME, and `//` a comment rather than two
    /// division operators.
    fn scan_token(&mut self) -> LexResult<Option<Token>> {
        let span = self.span();
        let Some(ch) = self.peek_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() {
            return Ok(Some(self.scan_number(span)));
        }
        if ch == '"' || ch == '\'' {
            return match self.scan_string(ch, span) {
                Some(token) => Ok(Some(token)),
                // An unterminated quote matches no pattern at all, so the
                // failure is reported on the quote character itself.
                None => Err(self.unexpected(ch)),
            };
        }
        if self.rest().starts_with("//") {
            self.consume_while(|c| c != '\n');
            return Ok(None);
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            let text = self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let kind = keyword_kind(text).unwrap_or_else(|| TokenKind::Name(text.to_string()));
            return Ok(Some(Token::new(kind, span)));
        }
        if let Some(token) = self.scan_operator(span) {
            return Ok(Some(token));
        }
        if ch == '\n' {
            self.consume_char();
            let token = Token::new(TokenKind::Newline, span);
            self.line += 1;
            self.column = 1;
            return Ok(Some(token));
        }
        if ch == ' ' || ch == '\t' {
            self.consume_while(|c| c == ' ' || c == '\t');
            return Ok(None);
        }

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            _ => return Err(self.unexpected(ch)),
        };
        self.consume_char();
        Ok(Some(Token::new(kind, span)))
    }

    fn scan_number(&mut self, span: Span) -> Token {
        let start = self.pos;
        self.consume_while(|c| c.is_ascii_digit());
        // The fractional dot belongs to the number only when a digit
        // follows; `1.foo` stays NUMBER DOT NAME.
        if self.peek_char() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
            self.consume_while(|c| c.is_ascii_digit());
        }
        Token::new(
            TokenKind::Number(self.input[start..self.pos].to_string()),
            span,
        )
    }

    /// Scan a quoted string, decoding escapes. Returns `None` without
    /// moving the cursor when the literal never terminates.
    fn scan_string(&mut self, quote: char, span: Span) -> Option<Token> {
        let rest = self.rest();
        let mut chars = rest.char_indices().skip(1);
        let mut decoded = String::new();
        let mut end = None;
        while let Some((idx, c)) = chars.next() {
            if c == quote {
                end = Some(idx + c.len_utf8());
                break;
            }
            if c == '\\' {
                let (_, escaped) = chars.next()?;
                decoded.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    // `\\`, `\"`, `\'`, and unknown escapes all pass the
                    // escaped character through.
                    other => other,
                });
            } else {
                decoded.push(c);
            }
        }
        let end = end?;
        self.column += rest[..end].chars().count();
        self.pos += end;
        Some(Token::new(TokenKind::Str(decoded), span))
    }

    fn scan_operator(&mut self, span: Span) -> Option<Token> {
        let rest = self.rest();
        for op in TWO_CHAR_OPS {
            if rest.starts_with(op) {
                self.pos += op.len();
                self.column += op.chars().count();
                return Some(Token::new(TokenKind::Op(op.to_string()), span));
            }
        }
        let c = self.peek_char()?;
        if SINGLE_CHAR_OPS.contains(c) {
            self.consume_char();
            return Some(Token::new(TokenKind::Op(c.to_string()), span));
        }
        None
    }
}

pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while lexer.peek_char().is_some() {
        if lexer.rest().starts_with("/*") {
            lexer.skip_block_comment()?;
            continue;
        }
        if let Some(token) = lexer.scan_token()? {
            tokens.push(token);
        }
    }
    tokens.push(Token::new(TokenKind::Eof, lexer.span()));
    Ok(tokens)
}
