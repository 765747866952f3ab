/*
 * Copyright (c) 2026. The wacc authors.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Semantic analysis over the syntax tree.
//!
//! A single walk that enforces:
//! - Every variable use and assignment target resolves to a visible
//!   declaration (innermost scope outward)
//! - No redeclaration within the same scope (shadowing in a nested
//!   compound is fine)
//! - `break` / `continue` appear inside a loop
//! - The direct dependent statement of `if`/`else` is not a declaration
//!
//! The walk never stops at the first error; everything it finds lands in
//! the shared diagnostics list, and the fatal flag keeps the later
//! phases from running on an ill-formed tree.

use std::collections::HashSet;

use ast::{Expr, Program, Spanned, Stmt};
use diag::{codes, Diagnostics, ErrorLevel, Span};

pub fn analyze(program: &Program, diag: &mut Diagnostics) {
    let mut analyzer = Analyzer {
        diag,
        scopes: vec![HashSet::new()],
        loop_depth: 0,
    };
    for stmt in &program.function.body {
        analyzer.stmt(stmt);
    }
}

struct Analyzer<'d> {
    diag: &'d mut Diagnostics,
    /// Innermost scope last; lookup walks back to front.
    scopes: Vec<HashSet<String>>,
    loop_depth: usize,
}

impl Analyzer<'_> {
    fn error(&mut self, id: u32, span: Span, message: &str, suggestion: &str) {
        self.diag
            .add(id, ErrorLevel::Semantic, span, message, Some(suggestion));
    }

    fn declared(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name))
    }

    fn declared_in_current(&self, name: &str) -> bool {
        self.scopes.last().unwrap().contains(name)
    }

    fn declare(&mut self, name: &str) {
        self.scopes.last_mut().unwrap().insert(name.to_string());
    }

    fn stmt(&mut self, stmt: &Spanned<Stmt>) {
        match &stmt.node {
            Stmt::Return(expr) => self.expr(expr),

            Stmt::VarDecl { name, init } => {
                if self.declared_in_current(name) {
                    self.error(
                        codes::SEM_REDEFINITION,
                        stmt.span.clone(),
                        "variable redefinition",
                        "use a different variable name",
                    );
                } else {
                    self.declare(name);
                }
                // The name is visible to its own initializer, as in C.
                if let Some(init) = init {
                    self.expr(init);
                }
            }

            Stmt::Expr(expr) => self.expr(expr),

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.dependent(then_branch);
                if let Some(else_branch) = else_branch {
                    self.dependent(else_branch);
                }
            }

            Stmt::While { cond, body } => {
                self.expr(cond);
                self.loop_depth += 1;
                self.stmt(body);
                self.loop_depth -= 1;
            }

            Stmt::Break => {
                if self.loop_depth == 0 {
                    self.error(
                        codes::SEM_BREAK_OUTSIDE_LOOP,
                        stmt.span.clone(),
                        "'break' outside of a loop",
                        "use 'break' only inside a loop body",
                    );
                }
            }

            Stmt::Continue => {
                if self.loop_depth == 0 {
                    self.error(
                        codes::SEM_CONTINUE_OUTSIDE_LOOP,
                        stmt.span.clone(),
                        "'continue' outside of a loop",
                        "use 'continue' only inside a loop body",
                    );
                }
            }

            Stmt::Compound(stmts) => {
                self.scopes.push(HashSet::new());
                for stmt in stmts {
                    self.stmt(stmt);
                }
                self.scopes.pop();
            }
        }
    }

    /// A statement appearing as the direct dependent of `if`/`else`. A
    /// bare declaration there has no usable scope and is rejected; the
    /// check applies to the immediate child only.
    fn dependent(&mut self, stmt: &Spanned<Stmt>) {
        if matches!(stmt.node, Stmt::VarDecl { .. }) {
            self.error(
                codes::SEM_DEPENDENT_DECLARATION,
                stmt.span.clone(),
                "a declaration cannot be used as a dependent statement",
                "use braces {} to create a compound statement",
            );
        }
        self.stmt(stmt);
    }

    fn expr(&mut self, expr: &Spanned<Expr>) {
        match &expr.node {
            Expr::IntLit(_) => {}

            Expr::Var(name) => {
                if !self.declared(name) {
                    self.error(
                        codes::SEM_UNDEFINED_VARIABLE,
                        expr.span.clone(),
                        "undeclared variable",
                        "declare the variable before using it",
                    );
                }
            }

            Expr::Assign { name, value } => {
                if !self.declared(name) {
                    self.error(
                        codes::SEM_UNDEFINED_VARIABLE,
                        expr.span.clone(),
                        "undeclared variable in assignment",
                        "declare the variable before assigning to it",
                    );
                }
                self.expr(value);
            }

            Expr::Unary { operand, .. } => self.expr(operand),

            Expr::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }

            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                self.expr(cond);
                self.expr(then_expr);
                self.expr(else_expr);
            }
        }
    }
}
