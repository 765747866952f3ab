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

pub mod analyzer;
pub mod emitter;
pub mod ir;

#[cfg(test)]
mod tests;

use ast::Program;
use diag::Diagnostics;

/// Run the backend over a parsed program.
///
/// Phases, each gated on the diagnostics fatal flag:
/// 1. Semantic analysis (scoped symbols, loop-context rules)
/// 2. Lowering to the region IR
/// 3. Serialization to the WASM binary format
///
/// Returns the module bytes, or `None` when any phase reported a fatal
/// diagnostic.
pub fn compile(program: &Program, diag: &mut Diagnostics) -> Option<Vec<u8>> {
    if diag.has_fatal() {
        return None;
    }

    analyzer::analyze(program, diag);
    if diag.has_fatal() {
        return None;
    }

    let module = ir::lower(program, diag);
    if diag.has_fatal() {
        return None;
    }

    let bytes = emitter::emit(&module, diag);
    if diag.has_fatal() {
        return None;
    }
    Some(bytes)
}
