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

use crate::{Expr, Spanned};

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `return expr;`
    Return(Spanned<Expr>),

    /// `int name;` or `int name = expr;`
    VarDecl {
        name: String,
        init: Option<Spanned<Expr>>,
    },

    /// Expression used as a statement (e.g. an assignment); its value is
    /// discarded.
    Expr(Spanned<Expr>),

    /// `if (cond) then_branch` with an optional `else else_branch`.
    If {
        cond: Spanned<Expr>,
        then_branch: Box<Spanned<Stmt>>,
        else_branch: Option<Box<Spanned<Stmt>>>,
    },

    /// `while (cond) body`
    While {
        cond: Spanned<Expr>,
        body: Box<Spanned<Stmt>>,
    },

    /// `break;`
    Break,

    /// `continue;`
    Continue,

    /// `{ ... }`; opens a new variable scope.
    Compound(Vec<Spanned<Stmt>>),
}
