use super::*;

use ast::{BinOp, Expr, UnaryOp};

fn binary(op: BinOp, left: Spanned<Expr>, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.start..right.span.end;
    Spanned::new(
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

impl<'src, 'd> Parser<'src, 'd> {
    /// Entry point for expression parsing. Assignment sits at the lowest
    /// precedence level.
    pub(crate) fn parse_expression(&mut self) -> Option<Spanned<Expr>> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.error(
                codes::SYNTAX_MALFORMED_EXPRESSION,
                "expression nesting too deep",
                "simplify the expression",
            );
            self.synchronize();
            return None;
        }
        self.depth += 1;
        let expr = self.parse_assignment();
        self.depth -= 1;
        expr
    }

    // Right-associative: `a = b = c` assigns `c` to both.
    fn parse_assignment(&mut self) -> Option<Spanned<Expr>> {
        let left = self.parse_ternary()?;
        if self.peek() != Token::Assign {
            return Some(left);
        }
        let assign_span = self.span();
        self.advance(); // consume `=`
        let value = self.parse_assignment()?;
        match left.node {
            Expr::Var(name) => {
                let span = left.span.start..value.span.end;
                Some(Spanned::new(
                    Expr::Assign {
                        name,
                        value: Box::new(value),
                    },
                    span,
                ))
            }
            _ => {
                self.diag.add(
                    codes::SEM_INVALID_ASSIGNMENT,
                    ErrorLevel::Semantic,
                    assign_span,
                    "invalid assignment target",
                    Some("assign to a variable"),
                );
                None
            }
        }
    }

    // `cond ? then : else`; the else arm recurses so chains associate to
    // the right.
    fn parse_ternary(&mut self) -> Option<Spanned<Expr>> {
        let cond = self.parse_logical_or()?;
        if !self.eat(Token::Question) {
            return Some(cond);
        }
        let then_expr = self.parse_expression()?;
        if !self.expect(
            Token::Colon,
            codes::SYNTAX_EXPECTED_TOKEN,
            "expected ':'",
            "add ':' to complete the conditional expression",
        ) {
            return None;
        }
        let else_expr = self.parse_ternary()?;
        let span = cond.span.start..else_expr.span.end;
        Some(Spanned::new(
            Expr::Ternary {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    fn parse_logical_or(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_logical_and()?;
        while self.peek() == Token::PipePipe {
            self.advance();
            let right = self.parse_logical_and()?;
            left = binary(BinOp::Or, left, right);
        }
        Some(left)
    }

    fn parse_logical_and(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_equality()?;
        while self.peek() == Token::AmpAmp {
            self.advance();
            let right = self.parse_equality()?;
            left = binary(BinOp::And, left, right);
        }
        Some(left)
    }

    fn parse_equality(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Token::EqEq => BinOp::Eq,
                Token::BangEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_relational(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Token::Lt => BinOp::Lt,
                Token::Gt => BinOp::Gt,
                Token::LtEq => BinOp::Le,
                Token::GtEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_additive(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_multiplicative(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    // Unary operators are right-associative: `!~-x` nests inward.
    fn parse_unary(&mut self) -> Option<Spanned<Expr>> {
        let op = match self.peek() {
            Token::Bang => UnaryOp::Not,
            Token::Tilde => UnaryOp::BitNot,
            Token::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        if self.depth >= MAX_NESTING_DEPTH {
            self.error(
                codes::SYNTAX_MALFORMED_EXPRESSION,
                "expression nesting too deep",
                "simplify the expression",
            );
            self.synchronize();
            return None;
        }
        self.depth += 1;
        let start = self.span().start;
        self.advance();
        let operand = self.parse_unary();
        self.depth -= 1;
        let operand = operand?;
        let span = start..operand.span.end;
        Some(Spanned::new(
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> Option<Spanned<Expr>> {
        let span = self.span();
        match self.peek() {
            Token::IntLit => {
                let value = match self.text().parse::<i32>() {
                    Ok(value) => value,
                    Err(_) => {
                        self.diag.add(
                            codes::LEX_NUMBER_TOO_LARGE,
                            ErrorLevel::Lexical,
                            span,
                            "integer literal too large",
                            Some("use a value that fits in a 32-bit int"),
                        );
                        self.advance();
                        return None;
                    }
                };
                self.advance();
                Some(Spanned::new(Expr::IntLit(value), span))
            }
            Token::Ident => {
                let name = self.text().to_string();
                self.advance();
                Some(Spanned::new(Expr::Var(name), span))
            }
            Token::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                if !self.expect(
                    Token::CloseParen,
                    codes::SYNTAX_MISSING_PAREN,
                    "expected ')'",
                    "add closing parenthesis",
                ) {
                    return None;
                }
                Some(expr)
            }
            _ => {
                self.error(
                    codes::SYNTAX_EXPECTED_EXPRESSION,
                    "expected expression",
                    "add an integer literal, variable, or parenthesized expression",
                );
                self.synchronize();
                None
            }
        }
    }
}
