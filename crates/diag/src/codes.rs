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

//! Stable diagnostic codes, grouped by phase. Codes with no trigger in
//! the current language subset are still reserved here so they stay
//! stable as the subset grows.

// 1xxx: lexical
pub const LEX_INVALID_CHARACTER: u32 = 1001;
pub const LEX_UNTERMINATED_STRING: u32 = 1002;
pub const LEX_UNTERMINATED_COMMENT: u32 = 1003;
pub const LEX_INVALID_ESCAPE_SEQUENCE: u32 = 1004;
pub const LEX_NUMBER_TOO_LARGE: u32 = 1005;

// 2xxx: syntax
pub const SYNTAX_EXPECTED_TOKEN: u32 = 2001;
pub const SYNTAX_UNEXPECTED_TOKEN: u32 = 2002;
pub const SYNTAX_MISSING_SEMICOLON: u32 = 2003;
pub const SYNTAX_MISSING_BRACE: u32 = 2004;
pub const SYNTAX_MISSING_PAREN: u32 = 2005;
pub const SYNTAX_MALFORMED_EXPRESSION: u32 = 2006;
pub const SYNTAX_EXPECTED_FUNCTION: u32 = 2007;
pub const SYNTAX_EXPECTED_STATEMENT: u32 = 2008;
pub const SYNTAX_EXPECTED_EXPRESSION: u32 = 2009;
pub const SYNTAX_MISSING_OPERATOR: u32 = 2010;

// 3xxx: semantic
pub const SEM_UNDEFINED_VARIABLE: u32 = 3001;
pub const SEM_UNDEFINED_FUNCTION: u32 = 3002;
pub const SEM_TYPE_MISMATCH: u32 = 3003;
pub const SEM_REDEFINITION: u32 = 3004;
pub const SEM_INVALID_ASSIGNMENT: u32 = 3005;
pub const SEM_INVALID_CALL: u32 = 3006;
pub const SEM_BREAK_OUTSIDE_LOOP: u32 = 3007;
pub const SEM_CONTINUE_OUTSIDE_LOOP: u32 = 3008;
pub const SEM_DEPENDENT_DECLARATION: u32 = 3009;

// 4xxx: code generation
pub const CODEGEN_LIMIT_EXCEEDED: u32 = 4001;
pub const CODEGEN_INVALID_MEMORY_ACCESS: u32 = 4002;
pub const CODEGEN_UNSUPPORTED_OPERATION: u32 = 4003;
