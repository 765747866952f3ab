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

//! Indented tree dump for `--print-ast`. A debug aid, not a stable
//! interface.

use std::fmt::Write;

use crate::{Expr, Program, Spanned, Stmt};

pub fn program_to_string(program: &Program) -> String {
    let mut out = String::new();
    writeln!(out, "Program").unwrap();
    writeln!(out, "  Function: {}", program.function.name).unwrap();
    for stmt in &program.function.body {
        write_stmt(&mut out, stmt, 2);
    }
    out
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_stmt(out: &mut String, stmt: &Spanned<Stmt>, depth: usize) {
    pad(out, depth);
    match &stmt.node {
        Stmt::Return(expr) => {
            out.push_str("Return\n");
            write_expr(out, expr, depth + 1);
        }
        Stmt::VarDecl { name, init } => {
            writeln!(out, "VarDecl: {}", name).unwrap();
            if let Some(init) = init {
                write_expr(out, init, depth + 1);
            }
        }
        Stmt::Expr(expr) => {
            out.push_str("ExprStmt\n");
            write_expr(out, expr, depth + 1);
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str("If\n");
            write_expr(out, cond, depth + 1);
            pad(out, depth + 1);
            out.push_str("Then\n");
            write_stmt(out, then_branch, depth + 2);
            if let Some(else_branch) = else_branch {
                pad(out, depth + 1);
                out.push_str("Else\n");
                write_stmt(out, else_branch, depth + 2);
            }
        }
        Stmt::While { cond, body } => {
            out.push_str("While\n");
            write_expr(out, cond, depth + 1);
            write_stmt(out, body, depth + 1);
        }
        Stmt::Break => out.push_str("Break\n"),
        Stmt::Continue => out.push_str("Continue\n"),
        Stmt::Compound(stmts) => {
            out.push_str("Compound\n");
            for stmt in stmts {
                write_stmt(out, stmt, depth + 1);
            }
        }
    }
}

fn write_expr(out: &mut String, expr: &Spanned<Expr>, depth: usize) {
    pad(out, depth);
    match &expr.node {
        Expr::IntLit(value) => writeln!(out, "IntLit: {}", value).unwrap(),
        Expr::Var(name) => writeln!(out, "Var: {}", name).unwrap(),
        Expr::Assign { name, value } => {
            writeln!(out, "Assign: {}", name).unwrap();
            write_expr(out, value, depth + 1);
        }
        Expr::Unary { op, operand } => {
            writeln!(out, "Unary: {}", op.symbol()).unwrap();
            write_expr(out, operand, depth + 1);
        }
        Expr::Binary { op, left, right } => {
            writeln!(out, "Binary: {}", op.symbol()).unwrap();
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            out.push_str("Ternary\n");
            write_expr(out, cond, depth + 1);
            write_expr(out, then_expr, depth + 1);
            write_expr(out, else_expr, depth + 1);
        }
    }
}
