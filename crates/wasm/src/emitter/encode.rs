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

//! Low-level byte writers for the WASM binary format. Counts, indices,
//! and lengths use unsigned LEB128; `i32.const` immediates use the
//! signed form.

/// Unsigned LEB128.
pub(crate) fn uleb(buf: &mut Vec<u8>, value: u64) {
    leb128::write::unsigned(buf, value).unwrap();
}

/// Signed LEB128.
pub(crate) fn sleb(buf: &mut Vec<u8>, value: i64) {
    leb128::write::signed(buf, value).unwrap();
}

/// Length-prefixed UTF-8 name.
pub(crate) fn name(buf: &mut Vec<u8>, text: &str) {
    uleb(buf, text.len() as u64);
    buf.extend_from_slice(text.as_bytes());
}

/// Section frame: id byte, LEB128 payload length, payload.
pub(crate) fn section(out: &mut Vec<u8>, id: u8, payload: &[u8]) {
    out.push(id);
    uleb(out, payload.len() as u64);
    out.extend_from_slice(payload);
}
