//! Lexer for the pattern language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character.

use logos::Logos;

use super::ast::Span;

/// Token kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("|")]
    Pipe,

    #[token("!")]
    Negation,

    #[token(".")]
    Dot,

    #[token("^")]
    Caret,

    #[token("$")]
    Dollar,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Id,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Coalesced unrecognized characters
    Garbage,
    /// Past the last token
    Eof,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace)
    }

    /// Postfix operator tokens.
    #[inline]
    pub fn is_operator(self) -> bool {
        matches!(self, SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question)
    }

    /// Tokens that can begin an atom.
    #[inline]
    pub fn starts_atom(self) -> bool {
        matches!(
            self,
            SyntaxKind::Id
                | SyntaxKind::Negation
                | SyntaxKind::Dot
                | SyntaxKind::Caret
                | SyntaxKind::Dollar
                | SyntaxKind::ParenOpen
        )
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(SyntaxKind::Garbage, start..end));
                }
                tokens.push(Token::new(kind, lexer.span()));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(SyntaxKind::Garbage, start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[token.span.clone()]
}
