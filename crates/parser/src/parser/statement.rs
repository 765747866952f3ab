use super::*;

impl<'src, 'd> Parser<'src, 'd> {
    pub(crate) fn parse_stmt(&mut self) -> Option<Spanned<Stmt>> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.error(
                codes::SYNTAX_MALFORMED_EXPRESSION,
                "nesting too deep",
                "simplify the program",
            );
            self.synchronize();
            return None;
        }
        self.depth += 1;
        let stmt = self.parse_stmt_inner();
        self.depth -= 1;
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Option<Spanned<Stmt>> {
        match self.peek() {
            Token::Return => self.parse_return(),
            Token::Int => self.parse_declaration(),
            Token::If => self.parse_if(),
            Token::While => self.parse_while(),
            Token::OpenBrace => self.parse_compound(),
            Token::Break => self.parse_jump(Stmt::Break),
            Token::Continue => self.parse_jump(Stmt::Continue),
            Token::Do => {
                self.error(
                    codes::SYNTAX_EXPECTED_STATEMENT,
                    "'do' loops are not supported",
                    "use a 'while' loop",
                );
                self.synchronize();
                None
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_return(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance(); // consume `return`
        let expr = self.parse_expression()?;
        if !self.expect(
            Token::Semicolon,
            codes::SYNTAX_MISSING_SEMICOLON,
            "expected ';'",
            "add a semicolon",
        ) {
            return None;
        }
        Some(Spanned::new(Stmt::Return(expr), start..self.prev_end))
    }

    fn parse_declaration(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance(); // consume `int`
        if self.peek() != Token::Ident {
            self.error(
                codes::SYNTAX_EXPECTED_TOKEN,
                "expected variable name",
                "add a variable name",
            );
            self.synchronize();
            return None;
        }
        let name = self.text().to_string();
        self.advance();

        let init = if self.eat(Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        if !self.expect(
            Token::Semicolon,
            codes::SYNTAX_MISSING_SEMICOLON,
            "expected ';'",
            "add a semicolon",
        ) {
            return None;
        }
        Some(Spanned::new(
            Stmt::VarDecl { name, init },
            start..self.prev_end,
        ))
    }

    fn parse_if(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance(); // consume `if`
        if !self.expect(
            Token::OpenParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected '(' after 'if'",
            "add opening parenthesis",
        ) {
            return None;
        }
        let cond = self.parse_expression()?;
        if !self.expect(
            Token::CloseParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected ')'",
            "add closing parenthesis",
        ) {
            return None;
        }
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(Token::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Some(Spanned::new(
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            },
            start..self.prev_end,
        ))
    }

    fn parse_while(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance(); // consume `while`
        if !self.expect(
            Token::OpenParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected '(' after 'while'",
            "add opening parenthesis",
        ) {
            return None;
        }
        let cond = self.parse_expression()?;
        if !self.expect(
            Token::CloseParen,
            codes::SYNTAX_MISSING_PAREN,
            "expected ')'",
            "add closing parenthesis",
        ) {
            return None;
        }
        let body = Box::new(self.parse_stmt()?);
        Some(Spanned::new(
            Stmt::While { cond, body },
            start..self.prev_end,
        ))
    }

    fn parse_compound(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance(); // consume `{`
        let stmts = self.parse_statement_list();
        if !self.eat(Token::CloseBrace) {
            self.error(
                codes::SYNTAX_MISSING_BRACE,
                "expected '}'",
                "add closing brace",
            );
            return None;
        }
        Some(Spanned::new(Stmt::Compound(stmts), start..self.prev_end))
    }

    /// `break;` / `continue;`. The loop-context check happens in
    /// semantic analysis.
    fn parse_jump(&mut self, stmt: Stmt) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        self.advance();
        if !self.expect(
            Token::Semicolon,
            codes::SYNTAX_MISSING_SEMICOLON,
            "expected ';'",
            "add a semicolon",
        ) {
            return None;
        }
        Some(Spanned::new(stmt, start..self.prev_end))
    }

    fn parse_expr_stmt(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.span().start;
        let expr = self.parse_expression()?;
        if !self.expect(
            Token::Semicolon,
            codes::SYNTAX_MISSING_SEMICOLON,
            "expected ';'",
            "add a semicolon",
        ) {
            return None;
        }
        Some(Spanned::new(Stmt::Expr(expr), start..self.prev_end))
    }
}
