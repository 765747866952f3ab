mod expr;
mod statement;

use logos::Span;

use ast::{Function, Program, Spanned, Stmt};
use diag::{codes, Diagnostics, ErrorLevel};

use crate::lexer::{Lexer, SpannedToken, Token};

/// Recursion cap protecting against pathological nesting.
const MAX_NESTING_DEPTH: usize = 200;
/// Cap on statements collected into a single block.
const MAX_BLOCK_STATEMENTS: usize = 4096;

/// Recursive-descent parser with panic-mode recovery. Holds exactly one
/// token of lookahead in `current`. Errors are reported into the shared
/// diagnostics sink and never abort the parse: a failed production
/// synchronizes to the next `;`, `{`, `}`, or end of input and returns
/// `None`, leaving that subtree absent. The sticky fatal flag keeps such
/// partial trees away from the later phases.
pub struct Parser<'src, 'd> {
    source: &'src str,
    lexer: Lexer<'src>,
    diag: &'d mut Diagnostics,
    current: SpannedToken,
    /// End offset of the last consumed token.
    prev_end: usize,
    /// Monotonic count of consumed tokens; the statement loops compare it
    /// to guarantee forward progress during recovery.
    consumed: usize,
    depth: usize,
}

impl<'src, 'd> Parser<'src, 'd> {
    pub fn new(source: &'src str, diag: &'d mut Diagnostics) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token(diag);
        Self {
            source,
            lexer,
            diag,
            current,
            prev_end: 0,
            consumed: 0,
            depth: 0,
        }
    }

    pub(crate) fn peek(&self) -> Token {
        self.current.0
    }

    pub(crate) fn span(&self) -> Span {
        self.current.1.clone()
    }

    /// Source text of the current token.
    pub(crate) fn text(&self) -> &'src str {
        &self.source[self.current.1.clone()]
    }

    pub(crate) fn advance(&mut self) {
        self.prev_end = self.current.1.end;
        self.current = self.lexer.next_token(self.diag);
        self.consumed += 1;
    }

    /// Consume the next token if it matches.
    pub(crate) fn eat(&mut self, token: Token) -> bool {
        if self.peek() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Report a syntax error at the current token.
    pub(crate) fn error(&mut self, id: u32, message: &str, suggestion: &str) {
        self.diag.add(
            id,
            ErrorLevel::Syntax,
            self.span(),
            message,
            Some(suggestion),
        );
    }

    /// Panic-mode recovery: skip tokens until a synchronization point.
    /// The synchronization token itself is not consumed.
    pub(crate) fn synchronize(&mut self) {
        loop {
            match self.peek() {
                Token::Eof
                | Token::Semicolon
                | Token::OpenBrace
                | Token::CloseBrace => return,
                _ => self.advance(),
            }
        }
    }

    /// Consume `token` or report `id` and synchronize.
    pub(crate) fn expect(
        &mut self,
        token: Token,
        id: u32,
        message: &str,
        suggestion: &str,
    ) -> bool {
        if self.eat(token) {
            return true;
        }
        self.error(id, message, suggestion);
        self.synchronize();
        false
    }

    // --- Top-level ---

    /// Parse a complete translation unit. Returns `None` when the single
    /// function could not be built; diagnostics carry the reasons.
    pub fn parse_program(mut self) -> Option<Program> {
        let function = self.parse_function()?;
        if self.peek() != Token::Eof {
            self.error(
                codes::SYNTAX_UNEXPECTED_TOKEN,
                "expected end of file",
                "remove extra tokens",
            );
        }
        Some(Program { function })
    }

    fn parse_function(&mut self) -> Option<Function> {
        if !self.expect(
            Token::Int,
            codes::SYNTAX_EXPECTED_TOKEN,
            "expected 'int'",
            "add 'int' keyword",
        ) {
            return None;
        }
        if self.peek() != Token::Ident {
            self.error(
                codes::SYNTAX_EXPECTED_TOKEN,
                "expected function name",
                "add a function name",
            );
            self.synchronize();
            return None;
        }
        let name = self.text().to_string();
        let span = self.span();
        self.advance();

        if !self.expect(
            Token::OpenParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected '('",
            "add opening parenthesis",
        ) {
            return None;
        }
        if !self.expect(
            Token::CloseParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected ')'",
            "add closing parenthesis",
        ) {
            return None;
        }
        if !self.expect(
            Token::OpenBrace,
            codes::SYNTAX_MISSING_BRACE,
            "expected '{'",
            "add opening brace",
        ) {
            return None;
        }

        let body = self.parse_statement_list();

        if !self.eat(Token::CloseBrace) {
            self.error(
                codes::SYNTAX_MISSING_BRACE,
                "expected '}'",
                "add closing brace",
            );
        }
        Some(Function { name, span, body })
    }

    /// Parse statements until `}` or end of input. Shared by function
    /// bodies and compound statements. Guarantees forward progress even
    /// when every production fails.
    pub(crate) fn parse_statement_list(&mut self) -> Vec<Spanned<Stmt>> {
        let mut stmts = Vec::new();
        while self.peek() != Token::CloseBrace && self.peek() != Token::Eof {
            if stmts.len() >= MAX_BLOCK_STATEMENTS {
                self.diag.add(
                    codes::CODEGEN_LIMIT_EXCEEDED,
                    ErrorLevel::Codegen,
                    self.span(),
                    "too many statements in one block",
                    None,
                );
                break;
            }
            let before = self.consumed;
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => {
                    // A trailing `;` belongs to the statement that just
                    // failed; consume it silently.
                    if self.peek() == Token::Semicolon {
                        self.advance();
                    } else if self.consumed == before
                        && self.peek() != Token::CloseBrace
                        && self.peek() != Token::Eof
                    {
                        // Recovery made no progress; force one token.
                        self.advance();
                    }
                }
            }
        }
        stmts
    }
}
