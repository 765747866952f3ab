use logos::{Logos, Span, SpannedIter};

use diag::{codes, Diagnostics, ErrorLevel};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f\x0B]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("int")]
    Int,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,

    // Punctuators
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // Multi-char operators (longest match wins over the single-char forms)
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Single-char operators
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Assign,

    // Lone `&` / `|` lex, but the stream reports them as invalid and
    // rewrites them to `Error` so parsing can keep going.
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,

    // Literals and identifiers
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+")]
    IntLit,

    /// Zero-length token at the end of the buffer.
    Eof,

    /// Lex-error marker; the offending byte has been reported and
    /// consumed.
    Error,
}

pub type SpannedToken = (Token, Span);

/// Lazy token stream over a source buffer. One token is produced per
/// call; lexical errors are reported into the shared diagnostics sink
/// and surface as `Token::Error` so the parser can continue.
pub struct Lexer<'src> {
    tokens: SpannedIter<'src, Token>,
    eof: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: Token::lexer(source).spanned(),
            eof: source.len(),
        }
    }

    /// Produce the next token. After the buffer is exhausted every call
    /// returns a zero-length `Eof` at the end position.
    pub fn next_token(&mut self, diag: &mut Diagnostics) -> SpannedToken {
        match self.tokens.next() {
            Some((Ok(Token::Amp), span)) => {
                diag.add(
                    codes::LEX_INVALID_CHARACTER,
                    ErrorLevel::Lexical,
                    span.clone(),
                    "unexpected character '&'",
                    Some("use '&&' for logical AND"),
                );
                (Token::Error, span)
            }
            Some((Ok(Token::Pipe), span)) => {
                diag.add(
                    codes::LEX_INVALID_CHARACTER,
                    ErrorLevel::Lexical,
                    span.clone(),
                    "unexpected character '|'",
                    Some("use '||' for logical OR"),
                );
                (Token::Error, span)
            }
            Some((Ok(token), span)) => (token, span),
            Some((Err(()), span)) => {
                diag.add(
                    codes::LEX_INVALID_CHARACTER,
                    ErrorLevel::Lexical,
                    span.clone(),
                    "unexpected character",
                    Some("remove this character"),
                );
                (Token::Error, span)
            }
            None => (Token::Eof, self.eof..self.eof),
        }
    }
}
