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

//! Serialization of the region IR into a standalone WASM binary module.
//!
//! Layout: magic + version header, then the type (1), function (3),
//! export (7), and code (10) sections. The one function type is
//! `() -> i32`. Structured control flow maps directly: `If` regions
//! become `if`/`else`/`end` frames, `Loop` regions become the
//! `block { loop { cond; i32.eqz; br_if 1; body; br 0 } }` pattern, and
//! `break`/`continue` become `br` with a depth computed by a static walk
//! up the region parent chain.

pub(crate) mod encode;

use diag::{codes, Diagnostics, ErrorLevel};

use crate::ir::{Inst, IrFunction, IrModule, IrType, RegionId, RegionKind};
use encode::{name, section, sleb, uleb};

pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub const WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

// Section ids
const SECTION_TYPE: u8 = 1;
const SECTION_FUNCTION: u8 = 3;
const SECTION_EXPORT: u8 = 7;
const SECTION_CODE: u8 = 10;

// Type bytes
const TYPE_FUNC: u8 = 0x60;
const TYPE_I32: u8 = 0x7F;
const TYPE_VOID: u8 = 0x40;

const EXPORT_FUNC: u8 = 0x00;

// Opcodes
const OP_BLOCK: u8 = 0x02;
const OP_LOOP: u8 = 0x03;
const OP_IF: u8 = 0x04;
const OP_ELSE: u8 = 0x05;
const OP_END: u8 = 0x0B;
const OP_BR: u8 = 0x0C;
const OP_BR_IF: u8 = 0x0D;
const OP_RETURN: u8 = 0x0F;
const OP_DROP: u8 = 0x1A;
const OP_LOCAL_GET: u8 = 0x20;
const OP_LOCAL_SET: u8 = 0x21;
const OP_I32_CONST: u8 = 0x41;
const OP_I32_EQZ: u8 = 0x45;
const OP_I32_EQ: u8 = 0x46;
const OP_I32_NE: u8 = 0x47;
const OP_I32_LT_S: u8 = 0x48;
const OP_I32_GT_S: u8 = 0x4A;
const OP_I32_LE_S: u8 = 0x4C;
const OP_I32_GE_S: u8 = 0x4E;
const OP_I32_ADD: u8 = 0x6A;
const OP_I32_SUB: u8 = 0x6B;
const OP_I32_MUL: u8 = 0x6C;
const OP_I32_DIV_S: u8 = 0x6D;
const OP_I32_REM_S: u8 = 0x6F;
const OP_I32_XOR: u8 = 0x73;

/// Serialize a whole module. Problems (an unresolvable branch target)
/// surface as codegen diagnostics; the fatal flag then keeps the driver
/// from writing the bytes out.
pub fn emit(module: &IrModule, diag: &mut Diagnostics) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    out.extend_from_slice(&WASM_MAGIC);
    out.extend_from_slice(&WASM_VERSION);
    section(&mut out, SECTION_TYPE, &type_section());
    section(&mut out, SECTION_FUNCTION, &function_section(module));
    section(&mut out, SECTION_EXPORT, &export_section());
    section(&mut out, SECTION_CODE, &code_section(module, diag));
    out
}

/// One function type: `() -> i32`.
fn type_section() -> Vec<u8> {
    let mut payload = Vec::new();
    uleb(&mut payload, 1);
    payload.push(TYPE_FUNC);
    uleb(&mut payload, 0);
    uleb(&mut payload, 1);
    payload.push(TYPE_I32);
    payload
}

fn function_section(module: &IrModule) -> Vec<u8> {
    let mut payload = Vec::new();
    uleb(&mut payload, module.functions.len() as u64);
    for _ in &module.functions {
        uleb(&mut payload, 0); // all functions share type 0
    }
    payload
}

fn export_section() -> Vec<u8> {
    let mut payload = Vec::new();
    uleb(&mut payload, 1);
    // the entry point is exported as "main" whatever its declared name
    name(&mut payload, "main");
    payload.push(EXPORT_FUNC);
    uleb(&mut payload, 0);
    payload
}

fn code_section(module: &IrModule, diag: &mut Diagnostics) -> Vec<u8> {
    let mut payload = Vec::new();
    uleb(&mut payload, module.functions.len() as u64);
    for function in &module.functions {
        let body = FunctionEmitter::new(function, diag).finish();
        uleb(&mut payload, body.len() as u64);
        payload.extend_from_slice(&body);
    }
    payload
}

fn block_type(result: IrType) -> u8 {
    match result {
        IrType::I32 => TYPE_I32,
        IrType::Void => TYPE_VOID,
    }
}

/// Emits one function body: local declarations, the structural stream of
/// the root region, and the implicit `i32.const 0; return` tail guard
/// that satisfies the result type when control reaches the end.
struct FunctionEmitter<'a, 'd> {
    func: &'a IrFunction,
    diag: &'d mut Diagnostics,
    buf: Vec<u8>,
}

impl<'a, 'd> FunctionEmitter<'a, 'd> {
    fn new(func: &'a IrFunction, diag: &'d mut Diagnostics) -> Self {
        Self {
            func,
            diag,
            buf: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.func.local_count > 0 {
            // one group of i32 locals
            uleb(&mut self.buf, 1);
            uleb(&mut self.buf, self.func.local_count as u64);
            self.buf.push(TYPE_I32);
        } else {
            uleb(&mut self.buf, 0);
        }

        self.stream(self.func.root);

        self.buf.push(OP_I32_CONST);
        sleb(&mut self.buf, 0);
        self.buf.push(OP_RETURN);
        self.buf.push(OP_END);
        self.buf
    }

    /// Walk a region's structural stream in order: plain instructions
    /// are encoded in place, embeds recurse into the child region.
    fn stream(&mut self, id: RegionId) {
        let func = self.func;
        for inst in &func.regions.get(id).insts {
            match inst {
                Inst::Region(child) => self.region(*child),
                inst => self.plain(id, inst),
            }
        }
    }

    fn region(&mut self, id: RegionId) {
        let func = self.func;
        let region = func.regions.get(id);
        match &region.kind {
            RegionKind::Function | RegionKind::Block => self.stream(id),

            RegionKind::If {
                then_region,
                else_region,
            } => {
                // condition evaluator lives in the If region's own stream
                self.stream(id);
                self.buf.push(OP_IF);
                self.buf.push(block_type(region.result));
                self.stream(*then_region);
                if let Some(else_region) = else_region {
                    self.buf.push(OP_ELSE);
                    self.stream(*else_region);
                }
                self.buf.push(OP_END);
            }

            RegionKind::Loop {
                cond,
                body,
                is_do_while,
            } => {
                self.buf.push(OP_BLOCK);
                self.buf.push(TYPE_VOID);
                self.buf.push(OP_LOOP);
                self.buf.push(TYPE_VOID);
                if *is_do_while {
                    self.stream(*body);
                    self.stream(*cond);
                } else {
                    self.stream(*cond);
                }
                // exit the outer block when the condition is false
                self.buf.push(OP_I32_EQZ);
                self.buf.push(OP_BR_IF);
                uleb(&mut self.buf, 1);
                if !*is_do_while {
                    self.stream(*body);
                }
                self.buf.push(OP_BR);
                uleb(&mut self.buf, 0);
                self.buf.push(OP_END);
                self.buf.push(OP_END);
            }
        }
    }

    fn plain(&mut self, region: RegionId, inst: &Inst) {
        match inst {
            Inst::ConstInt(value) => {
                self.buf.push(OP_I32_CONST);
                sleb(&mut self.buf, *value as i64);
            }
            Inst::LoadLocal(slot) => {
                self.buf.push(OP_LOCAL_GET);
                uleb(&mut self.buf, *slot as u64);
            }
            Inst::StoreLocal(slot) => {
                self.buf.push(OP_LOCAL_SET);
                uleb(&mut self.buf, *slot as u64);
            }
            Inst::Add => self.buf.push(OP_I32_ADD),
            Inst::Sub => self.buf.push(OP_I32_SUB),
            Inst::Mul => self.buf.push(OP_I32_MUL),
            Inst::Div => self.buf.push(OP_I32_DIV_S),
            Inst::Mod => self.buf.push(OP_I32_REM_S),
            Inst::Eq => self.buf.push(OP_I32_EQ),
            Inst::Ne => self.buf.push(OP_I32_NE),
            Inst::Lt => self.buf.push(OP_I32_LT_S),
            Inst::Le => self.buf.push(OP_I32_LE_S),
            Inst::Gt => self.buf.push(OP_I32_GT_S),
            Inst::Ge => self.buf.push(OP_I32_GE_S),
            Inst::Neg => {
                // x * -1
                self.buf.push(OP_I32_CONST);
                sleb(&mut self.buf, -1);
                self.buf.push(OP_I32_MUL);
            }
            Inst::Not => self.buf.push(OP_I32_EQZ),
            Inst::BitNot => {
                // x ^ -1
                self.buf.push(OP_I32_CONST);
                sleb(&mut self.buf, -1);
                self.buf.push(OP_I32_XOR);
            }
            Inst::Pop => self.buf.push(OP_DROP),
            Inst::Return => self.buf.push(OP_RETURN),
            Inst::Break => {
                let depth = self.branch_depth(region, true);
                self.buf.push(OP_BR);
                uleb(&mut self.buf, depth);
            }
            Inst::Continue => {
                let depth = self.branch_depth(region, false);
                self.buf.push(OP_BR);
                uleb(&mut self.buf, depth);
            }
            Inst::Region(_) => unreachable!("embeds are handled by the stream walk"),
        }
    }

    /// `br` label depth from the region holding the instruction to its
    /// enclosing loop. Each `if` frame crossed on the way up adds one
    /// label; `continue` targets the `loop` frame itself, `break` the
    /// `block` wrapped around it.
    fn branch_depth(&mut self, from: RegionId, is_break: bool) -> u64 {
        let func = self.func;
        let mut depth = 0u64;
        let mut cursor = from;
        while let Some(parent) = func.regions.get(cursor).parent {
            match &func.regions.get(parent).kind {
                RegionKind::If { .. } => depth += 1,
                RegionKind::Loop { body, .. } if *body == cursor => {
                    return if is_break { depth + 1 } else { depth };
                }
                _ => {}
            }
            cursor = parent;
        }
        self.diag.add(
            codes::CODEGEN_UNSUPPORTED_OPERATION,
            ErrorLevel::Codegen,
            0..0,
            "branch without an enclosing loop reached code generation",
            None,
        );
        0
    }
}
