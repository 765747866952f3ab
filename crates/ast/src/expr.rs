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

use crate::op::{BinOp, UnaryOp};
use crate::Spanned;

/// Expressions evaluate to exactly one 32-bit signed integer.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Decimal integer literal.
    IntLit(i32),

    /// Reference to a local variable.
    Var(String),

    /// `name = value`; yields the assigned value so chains and embedded
    /// uses work.
    Assign {
        name: String,
        value: Box<Spanned<Expr>>,
    },

    /// `!x`, `~x`, `-x`
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },

    /// Binary operation, including the short-circuiting `&&` and `||`.
    Binary {
        op: BinOp,
        left: Box<Spanned<Expr>>,
        right: Box<Spanned<Expr>>,
    },

    /// `cond ? then_expr : else_expr`
    Ternary {
        cond: Box<Spanned<Expr>>,
        then_expr: Box<Spanned<Expr>>,
        else_expr: Box<Spanned<Expr>>,
    },
}
