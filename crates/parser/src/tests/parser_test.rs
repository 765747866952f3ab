use ast::{BinOp, Expr, Program, Stmt, UnaryOp};
use diag::{codes, Diagnostics};

use crate::parser::Parser;

fn parse(source: &str) -> Program {
    let mut diag = Diagnostics::new();
    let program = Parser::new(source, &mut diag)
        .parse_program()
        .expect("parse failed");
    assert!(
        !diag.has_fatal(),
        "unexpected diagnostics:\n{}",
        diag.render(source, "test.c")
    );
    program
}

/// Parse a source expected to fail; returns the collected diagnostics.
fn parse_err(source: &str) -> Diagnostics {
    let mut diag = Diagnostics::new();
    let _ = Parser::new(source, &mut diag).parse_program();
    assert!(diag.has_fatal(), "expected a fatal diagnostic for {:?}", source);
    diag
}

fn error_codes(diag: &Diagnostics) -> Vec<u32> {
    diag.iter().map(|e| e.id).collect()
}

#[test]
fn test_return_constant() {
    let program = parse("int main() { return 42; }");
    assert_eq!(program.function.name, "main");
    assert_eq!(program.function.body.len(), 1);
    match &program.function.body[0].node {
        Stmt::Return(expr) => match &expr.node {
            Expr::IntLit(42) => {}
            other => panic!("expected IntLit(42), got {:?}", other),
        },
        other => panic!("expected Return, got {:?}", other),
    }
}

#[test]
fn test_empty_body() {
    let program = parse("int main() { }");
    assert!(program.function.body.is_empty());
}

#[test]
fn test_arithmetic_precedence() {
    // a*a + b*b parses as (a*a) + (b*b)
    let program = parse("int main() { return a*a + b*b; }");
    match &program.function.body[0].node {
        Stmt::Return(expr) => match &expr.node {
            Expr::Binary { op: BinOp::Add, left, right } => {
                assert!(matches!(left.node, Expr::Binary { op: BinOp::Mul, .. }));
                assert!(matches!(right.node, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected Add, got {:?}", other),
        },
        other => panic!("expected Return, got {:?}", other),
    }
}

#[test]
fn test_relational_binds_tighter_than_logical() {
    // 1 && 2 > 1 parses as 1 && (2 > 1)
    let program = parse("int main() { return 1 && 2 > 1; }");
    match &program.function.body[0].node {
        Stmt::Return(expr) => match &expr.node {
            Expr::Binary { op: BinOp::And, right, .. } => {
                assert!(matches!(right.node, Expr::Binary { op: BinOp::Gt, .. }));
            }
            other => panic!("expected And, got {:?}", other),
        },
        other => panic!("expected Return, got {:?}", other),
    }
}

#[test]
fn test_unary_nesting() {
    // -(~2 + 1): Neg over (BitNot(2) + 1)
    let program = parse("int main() { return -(~2 + 1); }");
    match &program.function.body[0].node {
        Stmt::Return(expr) => match &expr.node {
            Expr::Unary { op: UnaryOp::Neg, operand } => match &operand.node {
                Expr::Binary { op: BinOp::Add, left, .. } => {
                    assert!(matches!(left.node, Expr::Unary { op: UnaryOp::BitNot, .. }));
                }
                other => panic!("expected Add, got {:?}", other),
            },
            other => panic!("expected Neg, got {:?}", other),
        },
        other => panic!("expected Return, got {:?}", other),
    }
}

#[test]
fn test_ternary_right_associative() {
    // 1 ? 2 ? 3 : 4 : 5 nests the inner ternary in the then-arm
    let program = parse("int main() { return 1 ? 2 ? 3 : 4 : 5; }");
    match &program.function.body[0].node {
        Stmt::Return(expr) => match &expr.node {
            Expr::Ternary { then_expr, else_expr, .. } => {
                assert!(matches!(then_expr.node, Expr::Ternary { .. }));
                assert!(matches!(else_expr.node, Expr::IntLit(5)));
            }
            other => panic!("expected Ternary, got {:?}", other),
        },
        other => panic!("expected Return, got {:?}", other),
    }
}

#[test]
fn test_chained_assignment_is_right_associative() {
    let program = parse("int main() { a = b = 1; }");
    match &program.function.body[0].node {
        Stmt::Expr(expr) => match &expr.node {
            Expr::Assign { name, value } => {
                assert_eq!(name, "a");
                assert!(matches!(value.node, Expr::Assign { .. }));
            }
            other => panic!("expected Assign, got {:?}", other),
        },
        other => panic!("expected ExprStmt, got {:?}", other),
    }
}

#[test]
fn test_declarations() {
    let program = parse("int main() { int a; int b = 4; return b; }");
    match &program.function.body[0].node {
        Stmt::VarDecl { name, init } => {
            assert_eq!(name, "a");
            assert!(init.is_none());
        }
        other => panic!("expected VarDecl, got {:?}", other),
    }
    match &program.function.body[1].node {
        Stmt::VarDecl { name, init } => {
            assert_eq!(name, "b");
            assert!(matches!(init.as_ref().unwrap().node, Expr::IntLit(4)));
        }
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_else_binds_to_nearest_if() {
    let program = parse("int main() { if (1) if (2) x = 1; else x = 2; }");
    match &program.function.body[0].node {
        Stmt::If { else_branch, then_branch, .. } => {
            assert!(else_branch.is_none());
            match &then_branch.node {
                Stmt::If { else_branch, .. } => assert!(else_branch.is_some()),
                other => panic!("expected nested If, got {:?}", other),
            }
        }
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_while_with_compound_body() {
    let program = parse("int main() { while (i < 5) { i = i + 1; break; } }");
    match &program.function.body[0].node {
        Stmt::While { body, .. } => match &body.node {
            Stmt::Compound(stmts) => {
                assert_eq!(stmts.len(), 2);
                assert!(matches!(stmts[1].node, Stmt::Break));
            }
            other => panic!("expected Compound, got {:?}", other),
        },
        other => panic!("expected While, got {:?}", other),
    }
}

#[test]
fn test_continue_statement() {
    let program = parse("int main() { while (1) continue; }");
    match &program.function.body[0].node {
        Stmt::While { body, .. } => assert!(matches!(body.node, Stmt::Continue)),
        other => panic!("expected While, got {:?}", other),
    }
}

// ─── Error reporting and recovery ─────────────────────────────────────────────

#[test]
fn test_missing_semicolon_at_closing_brace() {
    let source = "int main() { return 42 }";
    let diag = parse_err(source);
    assert_eq!(error_codes(&diag), vec![codes::SYNTAX_MISSING_SEMICOLON]);
    // reported at the `}` token
    let error = diag.iter().next().unwrap();
    assert_eq!(&source[error.span.clone()], "}");
}

#[test]
fn test_missing_close_paren() {
    let diag = parse_err("int main() { return (1 + 2; }");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_MISSING_PAREN));
}

#[test]
fn test_missing_close_brace() {
    let diag = parse_err("int main() { return 0;");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_MISSING_BRACE));
}

#[test]
fn test_expected_expression() {
    let diag = parse_err("int main() { return ; }");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_EXPECTED_EXPRESSION));
}

#[test]
fn test_invalid_assignment_target() {
    let diag = parse_err("int main() { 1 = 2; }");
    assert!(error_codes(&diag).contains(&codes::SEM_INVALID_ASSIGNMENT));
}

#[test]
fn test_tokens_after_function() {
    let diag = parse_err("int main() { return 0; } int");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_UNEXPECTED_TOKEN));
}

#[test]
fn test_integer_literal_overflow() {
    let diag = parse_err("int main() { return 99999999999; }");
    assert!(error_codes(&diag).contains(&codes::LEX_NUMBER_TOO_LARGE));
    // i32::MIN written as a literal is `-(2147483648)`; the bare digits
    // overflow a positive i32, which the original also rejected
    assert!(parse("int main() { return 2147483647; }")
        .function
        .body
        .len()
        == 1);
}

#[test]
fn test_expected_function_name() {
    let diag = parse_err("int () { return 0; }");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_EXPECTED_TOKEN));
}

#[test]
fn test_do_is_rejected() {
    let diag = parse_err("int main() { do { } while (1); }");
    assert!(error_codes(&diag).contains(&codes::SYNTAX_EXPECTED_STATEMENT));
}

#[test]
fn test_recovery_collects_multiple_errors() {
    let source = "int main() { int a = ; return 0 }";
    let diag = parse_err(source);
    let ids = error_codes(&diag);
    assert!(ids.contains(&codes::SYNTAX_EXPECTED_EXPRESSION));
    assert!(ids.contains(&codes::SYNTAX_MISSING_SEMICOLON));
}

#[test]
fn test_recovery_terminates_on_garbage() {
    let mut diag = Diagnostics::new();
    let _ = Parser::new("int main() { @@ $$ ^^ }", &mut diag).parse_program();
    assert!(diag.has_fatal());

    let mut diag = Diagnostics::new();
    let _ = Parser::new("@@@@", &mut diag).parse_program();
    assert!(diag.has_fatal());
}

#[test]
fn test_deep_nesting_is_bounded() {
    let mut source = String::from("int main() { return ");
    for _ in 0..500 {
        source.push('(');
    }
    source.push('1');
    for _ in 0..500 {
        source.push(')');
    }
    source.push_str("; }");
    let diag = parse_err(&source);
    assert!(error_codes(&diag).contains(&codes::SYNTAX_MALFORMED_EXPRESSION));
}
