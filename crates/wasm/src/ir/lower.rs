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

//! Lowering from the syntax tree to the region IR.
//!
//! The abstract machine is a value stack plus a flat array of `i32`
//! local slots per function. Every expression leaves exactly one value
//! on the stack; every statement leaves zero. `&&` and `||` are not IR
//! opcodes: they are rewritten here into expression-typed `If` regions
//! so short-circuit evaluation falls out of the structured control flow.
//!
//! Runs only after semantic analysis has passed, so name lookups cannot
//! fail.

use std::collections::HashMap;

use ast::{BinOp, Expr, Program, Spanned, Stmt, UnaryOp};
use diag::{codes, Diagnostics, ErrorLevel};

use super::{Inst, IrFunction, IrModule, IrType, RegionArena, RegionId, RegionKind};

/// Cap on local slots per function; the original enforced a similar
/// static limit.
const MAX_LOCAL_SLOTS: u32 = 0xFFFF;

pub fn lower(program: &Program, diag: &mut Diagnostics) -> IrModule {
    let function = Lowerer::new(diag).lower_function(&program.function);
    IrModule {
        functions: vec![function],
    }
}

struct Lowerer<'d> {
    diag: &'d mut Diagnostics,
    regions: RegionArena,
    root: RegionId,
    /// Cursor: the region new instructions append to.
    current: RegionId,
    /// Name → local slot, innermost scope last.
    scopes: Vec<HashMap<String, u32>>,
    next_slot: u32,
}

impl<'d> Lowerer<'d> {
    fn new(diag: &'d mut Diagnostics) -> Self {
        let mut regions = RegionArena::new();
        let root = regions.alloc(RegionKind::Function, None, IrType::I32);
        Self {
            diag,
            regions,
            root,
            current: root,
            scopes: vec![HashMap::new()],
            next_slot: 0,
        }
    }

    fn lower_function(mut self, function: &ast::Function) -> IrFunction {
        for stmt in &function.body {
            self.stmt(stmt);
        }
        IrFunction {
            name: function.name.clone(),
            return_type: IrType::I32,
            local_count: self.next_slot,
            root: self.root,
            regions: self.regions,
        }
    }

    fn emit(&mut self, inst: Inst) {
        self.regions.push(self.current, inst);
    }

    /// Redirect emission into `region` for the duration of `f`.
    fn within(&mut self, region: RegionId, f: impl FnOnce(&mut Self)) {
        let prev = self.current;
        self.current = region;
        f(self);
        self.current = prev;
    }

    /// Allocate a fresh slot and bind the name in the innermost scope.
    /// Shadowing declarations get their own slot.
    fn declare(&mut self, name: &str, span: diag::Span) -> u32 {
        let slot = self.next_slot;
        self.next_slot += 1;
        if self.next_slot == MAX_LOCAL_SLOTS + 1 {
            self.diag.add(
                codes::CODEGEN_LIMIT_EXCEEDED,
                ErrorLevel::Codegen,
                span,
                "too many local variables",
                None,
            );
        }
        self.scopes
            .last_mut()
            .unwrap()
            .insert(name.to_string(), slot);
        slot
    }

    fn lookup(&self, name: &str) -> u32 {
        for scope in self.scopes.iter().rev() {
            if let Some(&slot) = scope.get(name) {
                return slot;
            }
        }
        // semantic analysis resolved every name before lowering runs
        unreachable!("unresolved variable '{}' reached lowering", name)
    }

    /// Allocate an expression-typed `If` region with both branches.
    /// Returns (if, then, else).
    fn alloc_expr_if(&mut self) -> (RegionId, RegionId, RegionId) {
        let then_region = self.regions.alloc(RegionKind::Block, None, IrType::I32);
        let else_region = self.regions.alloc(RegionKind::Block, None, IrType::I32);
        let if_region = self.regions.alloc(
            RegionKind::If {
                then_region,
                else_region: Some(else_region),
            },
            Some(self.current),
            IrType::I32,
        );
        self.regions.set_parent(then_region, if_region);
        self.regions.set_parent(else_region, if_region);
        (if_region, then_region, else_region)
    }

    // ─── Statements: net stack effect zero ───────────────────────────────────

    fn stmt(&mut self, stmt: &Spanned<Stmt>) {
        match &stmt.node {
            Stmt::Return(expr) => {
                self.expr(expr);
                self.emit(Inst::Return);
            }

            Stmt::VarDecl { name, init } => {
                let slot = self.declare(name, stmt.span.clone());
                if let Some(init) = init {
                    self.expr(init);
                    self.emit(Inst::StoreLocal(slot));
                }
            }

            Stmt::Expr(expr) => {
                self.expr(expr);
                self.emit(Inst::Pop);
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let then_region = self.regions.alloc(RegionKind::Block, None, IrType::Void);
                let else_region = else_branch
                    .as_ref()
                    .map(|_| self.regions.alloc(RegionKind::Block, None, IrType::Void));
                let if_region = self.regions.alloc(
                    RegionKind::If {
                        then_region,
                        else_region,
                    },
                    Some(self.current),
                    IrType::Void,
                );
                self.regions.set_parent(then_region, if_region);
                if let Some(else_region) = else_region {
                    self.regions.set_parent(else_region, if_region);
                }

                self.within(if_region, |l| l.expr(cond));
                self.emit(Inst::Region(if_region));
                self.within(then_region, |l| l.stmt(then_branch));
                if let (Some(else_region), Some(else_branch)) = (else_region, else_branch) {
                    self.within(else_region, |l| l.stmt(else_branch));
                }
            }

            Stmt::While { cond, body } => {
                let cond_region = self.regions.alloc(RegionKind::Block, None, IrType::I32);
                let body_region = self.regions.alloc(RegionKind::Block, None, IrType::Void);
                let loop_region = self.regions.alloc(
                    RegionKind::Loop {
                        cond: cond_region,
                        body: body_region,
                        is_do_while: false,
                    },
                    Some(self.current),
                    IrType::Void,
                );
                self.regions.set_parent(cond_region, loop_region);
                self.regions.set_parent(body_region, loop_region);

                self.emit(Inst::Region(loop_region));
                self.within(cond_region, |l| l.expr(cond));
                self.within(body_region, |l| l.stmt(body));
            }

            Stmt::Break => self.emit(Inst::Break),

            Stmt::Continue => self.emit(Inst::Continue),

            Stmt::Compound(stmts) => {
                self.scopes.push(HashMap::new());
                for stmt in stmts {
                    self.stmt(stmt);
                }
                self.scopes.pop();
            }
        }
    }

    // ─── Expressions: net stack effect one ───────────────────────────────────

    fn expr(&mut self, expr: &Spanned<Expr>) {
        match &expr.node {
            Expr::IntLit(value) => self.emit(Inst::ConstInt(*value)),

            Expr::Var(name) => {
                let slot = self.lookup(name);
                self.emit(Inst::LoadLocal(slot));
            }

            Expr::Assign { name, value } => {
                self.expr(value);
                let slot = self.lookup(name);
                // store, then reload so the assignment yields its value
                self.emit(Inst::StoreLocal(slot));
                self.emit(Inst::LoadLocal(slot));
            }

            Expr::Unary { op, operand } => {
                self.expr(operand);
                self.emit(match op {
                    UnaryOp::Neg => Inst::Neg,
                    UnaryOp::Not => Inst::Not,
                    UnaryOp::BitNot => Inst::BitNot,
                });
            }

            Expr::Binary {
                op: BinOp::And,
                left,
                right,
            } => {
                // left && right  ≡  left ? (right != 0) : 0
                let (if_region, then_region, else_region) = self.alloc_expr_if();
                self.within(if_region, |l| l.expr(left));
                self.emit(Inst::Region(if_region));
                self.within(then_region, |l| {
                    l.expr(right);
                    l.emit(Inst::ConstInt(0));
                    l.emit(Inst::Ne);
                });
                self.within(else_region, |l| l.emit(Inst::ConstInt(0)));
            }

            Expr::Binary {
                op: BinOp::Or,
                left,
                right,
            } => {
                // left || right  ≡  left ? 1 : (right != 0)
                let (if_region, then_region, else_region) = self.alloc_expr_if();
                self.within(if_region, |l| l.expr(left));
                self.emit(Inst::Region(if_region));
                self.within(then_region, |l| l.emit(Inst::ConstInt(1)));
                self.within(else_region, |l| {
                    l.expr(right);
                    l.emit(Inst::ConstInt(0));
                    l.emit(Inst::Ne);
                });
            }

            Expr::Binary { op, left, right } => {
                self.expr(left);
                self.expr(right);
                self.emit(match op {
                    BinOp::Add => Inst::Add,
                    BinOp::Sub => Inst::Sub,
                    BinOp::Mul => Inst::Mul,
                    BinOp::Div => Inst::Div,
                    BinOp::Mod => Inst::Mod,
                    BinOp::Eq => Inst::Eq,
                    BinOp::Ne => Inst::Ne,
                    BinOp::Lt => Inst::Lt,
                    BinOp::Le => Inst::Le,
                    BinOp::Gt => Inst::Gt,
                    BinOp::Ge => Inst::Ge,
                    BinOp::And | BinOp::Or => unreachable!("handled above"),
                });
            }

            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                let (if_region, then_region, else_region) = self.alloc_expr_if();
                self.within(if_region, |l| l.expr(cond));
                self.emit(Inst::Region(if_region));
                self.within(then_region, |l| l.expr(then_expr));
                self.within(else_region, |l| l.expr(else_expr));
            }
        }
    }
}
