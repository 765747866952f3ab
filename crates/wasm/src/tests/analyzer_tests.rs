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

use ast::Program;
use diag::{codes, Diagnostics};

use crate::analyzer;

fn parse(source: &str) -> Program {
    let mut diag = Diagnostics::new();
    let program = parser::Parser::new(source, &mut diag)
        .parse_program()
        .expect("parse failed");
    assert!(
        !diag.has_fatal(),
        "unexpected parse diagnostics:\n{}",
        diag.render(source, "test.c")
    );
    program
}

/// Parse (must succeed) and analyze; returns the analyzer's diagnostics.
fn analyze(source: &str) -> Diagnostics {
    let program = parse(source);
    let mut diag = Diagnostics::new();
    analyzer::analyze(&program, &mut diag);
    diag
}

fn error_codes(diag: &Diagnostics) -> Vec<u32> {
    diag.iter().map(|e| e.id).collect()
}

fn assert_clean(source: &str) {
    let diag = analyze(source);
    assert!(
        !diag.has_fatal(),
        "unexpected diagnostics for {:?}:\n{}",
        source,
        diag.render(source, "test.c")
    );
}

#[test]
fn test_well_formed_program_is_clean() {
    assert_clean(
        "int main() { int a = 3; int b = 4; if (a < b) { a = b; } return a * a + b * b; }",
    );
}

#[test]
fn test_undeclared_variable_use() {
    let source = "int main() { return x; }";
    let diag = analyze(source);
    assert_eq!(error_codes(&diag), vec![codes::SEM_UNDEFINED_VARIABLE]);
    // reported at the `x` token
    let error = diag.iter().next().unwrap();
    assert_eq!(&source[error.span.clone()], "x");
}

#[test]
fn test_undeclared_assignment_target() {
    let diag = analyze("int main() { x = 1; return 0; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_UNDEFINED_VARIABLE]);
}

#[test]
fn test_redefinition_in_same_scope() {
    let diag = analyze("int main() { int x; int x; return x; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_REDEFINITION]);
}

#[test]
fn test_shadowing_in_nested_scope_is_allowed() {
    assert_clean("int main() { int x = 1; { int x = 2; x = 3; } return x; }");
}

#[test]
fn test_outer_variable_visible_in_nested_scope() {
    assert_clean("int main() { int x = 1; { x = 2; } return x; }");
}

#[test]
fn test_inner_variable_not_visible_after_scope_exit() {
    let diag = analyze("int main() { { int y = 1; } return y; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_UNDEFINED_VARIABLE]);
}

#[test]
fn test_initializer_sees_its_own_name() {
    // matches C: the declaration is in scope for its initializer
    assert_clean("int main() { int x = x; return 0; }");
}

#[test]
fn test_break_outside_loop() {
    let diag = analyze("int main() { break; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_BREAK_OUTSIDE_LOOP]);
}

#[test]
fn test_continue_outside_loop() {
    let diag = analyze("int main() { continue; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_CONTINUE_OUTSIDE_LOOP]);
}

#[test]
fn test_break_inside_loop_is_allowed() {
    assert_clean("int main() { while (1) { if (1) break; continue; } return 0; }");
}

#[test]
fn test_break_after_loop_is_rejected() {
    let diag = analyze("int main() { while (0) { } break; return 0; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_BREAK_OUTSIDE_LOOP]);
}

#[test]
fn test_nested_loops_keep_loop_context() {
    assert_clean("int main() { while (1) { while (1) { break; } break; } return 0; }");
}

#[test]
fn test_declaration_as_if_dependent_statement() {
    let diag = analyze("int main() { if (1) int x = 0; return 0; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_DEPENDENT_DECLARATION]);
    let error = diag.iter().next().unwrap();
    assert_eq!(
        error.suggestion.as_deref(),
        Some("use braces {} to create a compound statement")
    );
}

#[test]
fn test_declaration_as_else_dependent_statement() {
    let diag = analyze("int main() { if (1) { } else int x = 0; return 0; }");
    assert_eq!(error_codes(&diag), vec![codes::SEM_DEPENDENT_DECLARATION]);
}

#[test]
fn test_braced_declaration_in_if_is_allowed() {
    assert_clean("int main() { if (1) { int x = 0; } return 0; }");
}

#[test]
fn test_while_body_declaration_is_not_flagged() {
    // the dependent-declaration rule applies to if/else only
    assert_clean("int main() { while (0) int x = 0; return 0; }");
}

#[test]
fn test_all_errors_are_collected() {
    let diag = analyze("int main() { a = 1; return b; }");
    assert_eq!(
        error_codes(&diag),
        vec![codes::SEM_UNDEFINED_VARIABLE, codes::SEM_UNDEFINED_VARIABLE]
    );
}

#[test]
fn test_errors_inside_all_expression_shapes() {
    let diag = analyze("int main() { return (1 ? u : -v) + (w && 1); }");
    assert_eq!(error_codes(&diag).len(), 3);
}
