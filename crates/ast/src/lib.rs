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

pub mod expr;
pub mod op;
pub mod pretty;
pub mod stmt;

use logos::Span;

pub use expr::Expr;
pub use op::{BinOp, UnaryOp};
pub use stmt::Stmt;

/// Every AST node carries a source span for error reporting.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Top-level translation unit: exactly one function in the current
/// subset.
#[derive(Debug, Clone)]
pub struct Program {
    pub function: Function,
}

/// A parameter-less `int` function with an ordered statement list.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    /// Span of the function name token.
    pub span: Span,
    pub body: Vec<Spanned<Stmt>>,
}
