//! Parser tests through the public API.
//!
//! These check the tree shapes the evaluator relies on and the exact wording
//! and position of syntax errors.

extern crate jsembed;

use jsembed::parser::ast::{BinaryOperator, LiteralType, NodeKind, NumberLiteralType, ProgramData};
use jsembed::parser::JsParser;
use jsembed::JErrorType;

fn statements(program: &ProgramData) -> Vec<&NodeKind> {
    match &program.root_node().kind {
        NodeKind::Block(s) => s.iter().map(|id| &program.tree.get(*id).kind).collect(),
        other => panic!("program root was {:?}", other),
    }
}

fn syntax_error(source: &str) -> (String, usize, usize) {
    let err = JsParser::parse_to_ast_from_str(source).unwrap_err();
    assert!(
        matches!(err.kind, JErrorType::SyntaxError(_)),
        "expected a syntax error, got {:?}",
        err
    );
    (err.message().to_string(), err.line(), err.column())
}

// ============================================================================
// Shapes
// ============================================================================

mod shape_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_program_is_empty_block() {
        let program = JsParser::parse_to_ast_from_str("  // nothing here\n").unwrap();
        assert!(statements(&program).is_empty());
    }

    #[test]
    fn test_statement_kinds() {
        let program = JsParser::parse_to_ast_from_str(
            "var a = 1; if (a) { a = 2; } while (a < 3) a++; for (;;) break; return; ;",
        )
        .unwrap();
        let kinds = statements(&program);
        assert_eq!(kinds.len(), 6);
        assert!(matches!(kinds[0], NodeKind::VarDeclare { .. }));
        assert!(matches!(kinds[1], NodeKind::If { false_branch: None, .. }));
        assert!(matches!(kinds[2], NodeKind::Loop(l) if !l.is_do_loop && l.initialiser.is_none()));
        assert!(matches!(kinds[3], NodeKind::Loop(l) if l.condition.is_none() && l.iterator.is_none()));
        assert!(matches!(kinds[4], NodeKind::Return(None)));
        assert!(matches!(kinds[5], NodeKind::Empty));
    }

    #[test]
    fn test_do_loop_is_flagged() {
        let program = JsParser::parse_to_ast_from_str("do { x++; } while (x < 10);").unwrap();
        assert!(matches!(statements(&program)[0], NodeKind::Loop(l) if l.is_do_loop));
    }

    #[test]
    fn test_number_literals() {
        for (source, expected) in [
            ("42", NumberLiteralType::IntegerLiteral(42)),
            ("0x1F", NumberLiteralType::IntegerLiteral(31)),
            ("017", NumberLiteralType::IntegerLiteral(15)),
            ("0", NumberLiteralType::IntegerLiteral(0)),
            ("2.5", NumberLiteralType::FloatLiteral(2.5)),
            (".5", NumberLiteralType::FloatLiteral(0.5)),
            ("1e3", NumberLiteralType::FloatLiteral(1000.0)),
        ] {
            let program = JsParser::parse_expression_from_str(source).unwrap();
            match &program.root_node().kind {
                NodeKind::Literal(LiteralType::NumberLiteral(n)) => assert_eq!(n, &expected, "{}", source),
                other => panic!("{} parsed as {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_string_escapes() {
        let program = JsParser::parse_expression_from_str(r#"'it\'s\t"ok"\n'"#).unwrap();
        match &program.root_node().kind {
            NodeKind::Literal(LiteralType::StringLiteral(s)) => assert_eq!(s, "it's\t\"ok\"\n"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unary_minus_is_subtraction_from_zero() {
        let program = JsParser::parse_expression_from_str("-x").unwrap();
        match &program.root_node().kind {
            NodeKind::Binary { operator: BinaryOperator::Subtract, left, .. } => {
                assert!(matches!(
                    program.tree.get(*left).kind,
                    NodeKind::Literal(LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(0)))
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_comparison_binds_looser_than_shift() {
        let program = JsParser::parse_expression_from_str("1 << 2 < 8").unwrap();
        assert!(matches!(
            program.root_node().kind,
            NodeKind::Binary { operator: BinaryOperator::LessThan, .. }
        ));
    }

    #[test]
    fn test_call_and_member_suffixes_chain() {
        let program = JsParser::parse_expression_from_str("a.b[0](1, 2).c").unwrap();
        let NodeKind::DotAccess { parent, property } = &program.root_node().kind else {
            panic!("root was {:?}", program.root_node().kind);
        };
        assert_eq!(property, "c");
        match &program.tree.get(*parent).kind {
            NodeKind::FunctionCall { callee, arguments } => {
                assert_eq!(arguments.len(), 2);
                assert!(matches!(program.tree.get(*callee).kind, NodeKind::Subscript { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_accepts_string_keys() {
        let program = JsParser::parse_expression_from_str("{ a: 1, 'b c': 2 }").unwrap();
        match &program.root_node().kind {
            NodeKind::ObjectLiteral(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["a", "b c"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_new_without_arguments() {
        let program = JsParser::parse_expression_from_str("new Thing").unwrap();
        match &program.root_node().kind {
            NodeKind::New { class_path, arguments } => {
                assert_eq!(class_path, &vec!["Thing".to_string()]);
                assert!(arguments.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

mod error_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_identifier_after_var() {
        assert_eq!(
            syntax_error("var = 1;"),
            ("Found '=' when expecting identifier".to_string(), 1, 5)
        );
    }

    #[test]
    fn test_missing_close_paren() {
        assert_eq!(
            syntax_error("if (a { }"),
            ("Found '{' when expecting ')'".to_string(), 1, 7)
        );
    }

    #[test]
    fn test_unclosed_block() {
        let (message, _, _) = syntax_error("{ a = 1;");
        assert_eq!(message, "Found eof when expecting '}'");
    }

    #[test]
    fn test_missing_expression_is_reported_on_second_line() {
        assert_eq!(
            syntax_error("var a = 1;\nvar b = ;"),
            ("Found ';' when expecting an expression.".to_string(), 2, 9)
        );
    }

    #[test]
    fn test_tokenizer_errors() {
        assert_eq!(syntax_error("'abc").0, "Unexpected end-of-input in string constant");
        assert_eq!(syntax_error("a = 1; /* open").0, "Unterminated '/*' comment");
        assert_eq!(syntax_error("a = #;").0, "Unexpected character '#' in source");
        assert_eq!(syntax_error("a = 09;").0, "Decimal digit in octal constant");
    }

    #[test]
    fn test_error_display_includes_position() {
        let err = JsParser::parse_to_ast_from_str("x = (1 + 2;").unwrap_err();
        assert_eq!(err.to_string(), "Line 1, column 11: Found ';' when expecting ')'");
    }
}
