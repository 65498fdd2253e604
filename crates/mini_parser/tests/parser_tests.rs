//! Parser integration tests.
//!
//! Verifies that the derivation engine builds the canonical AST from Mini
//! source and rejects invalid input with the contractual diagnostics.

use mini_ast::node::*;
use mini_diagnostics::{DiagnosticCollection, DiagnosticKind};
use mini_parser::Parser;
use mini_scanner::tokenize;

/// Helper: parse source text into its top-level statements.
fn parse(source: &str) -> Vec<Statement> {
    let tokens = tokenize(source).expect("source should lex");
    Parser::new(tokens).parse().expect("source should parse")
}

/// Helper: parse source text expecting failure.
fn parse_err(source: &str) -> DiagnosticCollection {
    let tokens = tokenize(source).expect("source should lex");
    Parser::new(tokens)
        .parse()
        .expect_err("source should not parse")
}

/// Helper: the initializer of a source's single declaration.
fn initializer_of(source: &str) -> Expression {
    match parse(source).remove(0) {
        Statement::Variable(variable) => variable.initializer,
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_empty_source_is_an_empty_program() {
    assert_eq!(parse(""), vec![]);
    assert_eq!(parse("  -- just a comment\n"), vec![]);
}

#[test]
fn test_top_level_return_statement() {
    assert_eq!(
        parse("return x + 1;"),
        vec![Statement::Return(Return {
            expression: Expression::arithmetic(
                ArithmeticOperator::Plus,
                Expression::symbol("x"),
                Expression::number(1.0),
            ),
        })]
    );
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_declaration_without_initializer() {
    assert_eq!(
        parse("int x;"),
        vec![Statement::Variable(Variable {
            name: SymbolPrimitive::new("x"),
            initializer: Expression::nil(),
            type_annotation: Type::simple("int"),
        })]
    );
}

#[test]
fn test_declaration_with_initializer() {
    assert_eq!(
        parse("int x := 42;"),
        vec![Statement::Variable(Variable {
            name: SymbolPrimitive::new("x"),
            initializer: Expression::number(42.0),
            type_annotation: Type::simple("int"),
        })]
    );
}

#[test]
fn test_declarations_keep_source_order() {
    let statements = parse("int a;\nint b;\nint c;");
    let names: Vec<&str> = statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Variable(v) => v.name.name.as_str(),
            other => panic!("expected declarations, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_list_type_declaration() {
    assert_eq!(
        parse("int[] xs;"),
        vec![Statement::Variable(Variable {
            name: SymbolPrimitive::new("xs"),
            initializer: Expression::nil(),
            type_annotation: Type::list(Type::simple("int")),
        })]
    );
}

#[test]
fn test_nested_list_type() {
    assert_eq!(
        parse("int[][] grid;"),
        vec![Statement::Variable(Variable {
            name: SymbolPrimitive::new("grid"),
            initializer: Expression::nil(),
            type_annotation: Type::list(Type::list(Type::simple("int"))),
        })]
    );
}

// ============================================================================
// Expressions: associativity and precedence
// ============================================================================

#[test]
fn test_subtraction_is_left_associative() {
    // (1 - 2) - 3, not 1 - (2 - 3)
    assert_eq!(
        initializer_of("int x := 1 - 2 - 3;"),
        Expression::arithmetic(
            ArithmeticOperator::Minus,
            Expression::arithmetic(
                ArithmeticOperator::Minus,
                Expression::number(1.0),
                Expression::number(2.0),
            ),
            Expression::number(3.0),
        )
    );
}

#[test]
fn test_division_is_left_associative() {
    assert_eq!(
        initializer_of("int x := 8 / 4 / 2;"),
        Expression::arithmetic(
            ArithmeticOperator::Divide,
            Expression::arithmetic(
                ArithmeticOperator::Divide,
                Expression::number(8.0),
                Expression::number(4.0),
            ),
            Expression::number(2.0),
        )
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    // 1 + (2 * 3)
    assert_eq!(
        initializer_of("int x := 1 + 2 * 3;"),
        Expression::arithmetic(
            ArithmeticOperator::Plus,
            Expression::number(1.0),
            Expression::arithmetic(
                ArithmeticOperator::Multiply,
                Expression::number(2.0),
                Expression::number(3.0),
            ),
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        initializer_of("int x := (1 + 2) * 3;"),
        Expression::arithmetic(
            ArithmeticOperator::Multiply,
            Expression::arithmetic(
                ArithmeticOperator::Plus,
                Expression::number(1.0),
                Expression::number(2.0),
            ),
            Expression::number(3.0),
        )
    );
}

#[test]
fn test_mixed_chain_folds_left() {
    // ((a - b) + c)
    assert_eq!(
        initializer_of("int x := a - b + c;"),
        Expression::arithmetic(
            ArithmeticOperator::Plus,
            Expression::arithmetic(
                ArithmeticOperator::Minus,
                Expression::symbol("a"),
                Expression::symbol("b"),
            ),
            Expression::symbol("c"),
        )
    );
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn test_primitive_initializers() {
    assert_eq!(
        initializer_of("string s := \"hi\";"),
        Expression::string("hi")
    );
    assert_eq!(initializer_of("char c := 'a';"), Expression::char('a'));
    assert_eq!(initializer_of("bool b := True;"), Expression::boolean(true));
    assert_eq!(
        initializer_of("bool b := False;"),
        Expression::boolean(false)
    );
    assert_eq!(initializer_of("int n := 0xFF;"), Expression::number(255.0));
}

#[test]
fn test_list_literal() {
    assert_eq!(
        initializer_of("int[] xs := [1, 2, 3 + 4];"),
        Expression::list(vec![
            Expression::number(1.0),
            Expression::number(2.0),
            Expression::arithmetic(
                ArithmeticOperator::Plus,
                Expression::number(3.0),
                Expression::number(4.0),
            ),
        ])
    );
}

#[test]
fn test_empty_list_literal() {
    assert_eq!(initializer_of("int[] xs := [];"), Expression::list(vec![]));
}

// ============================================================================
// Control statements
// ============================================================================

#[test]
fn test_if_else() {
    assert_eq!(
        parse("if(a != b) { c := a + b; } else { c := a * 2; };"),
        vec![Statement::If(If {
            condition: Expression::comparison(
                ComparisonOperator::NotEqual,
                Expression::symbol("a"),
                Expression::symbol("b"),
            ),
            then_branch: Sequence::new(vec![Statement::Assignment(Assignment {
                target: SymbolPrimitive::new("c"),
                expression: Expression::arithmetic(
                    ArithmeticOperator::Plus,
                    Expression::symbol("a"),
                    Expression::symbol("b"),
                ),
            })]),
            else_branch: Sequence::new(vec![Statement::Assignment(Assignment {
                target: SymbolPrimitive::new("c"),
                expression: Expression::arithmetic(
                    ArithmeticOperator::Multiply,
                    Expression::symbol("a"),
                    Expression::number(2.0),
                ),
            })]),
        })]
    );
}

#[test]
fn test_if_without_else_has_empty_branch() {
    let statements = parse("if(a == b) { return a; };");
    match &statements[0] {
        Statement::If(node) => {
            assert_eq!(node.then_branch.statements.len(), 1);
            assert_eq!(node.else_branch, Sequence::empty());
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_while_loop() {
    assert_eq!(
        parse("while(a < 10) { a := a + 1; };"),
        vec![Statement::While(While {
            condition: Expression::comparison(
                ComparisonOperator::LessThan,
                Expression::symbol("a"),
                Expression::number(10.0),
            ),
            body: Sequence::new(vec![Statement::Assignment(Assignment {
                target: SymbolPrimitive::new("a"),
                expression: Expression::arithmetic(
                    ArithmeticOperator::Plus,
                    Expression::symbol("a"),
                    Expression::number(1.0),
                ),
            })]),
        })]
    );
}

#[test]
fn test_every_comparison_operator() {
    let cases = [
        ("==", ComparisonOperator::Equal),
        ("!=", ComparisonOperator::NotEqual),
        ("<", ComparisonOperator::LessThan),
        ("<=", ComparisonOperator::LessEqual),
        (">", ComparisonOperator::GreaterThan),
        (">=", ComparisonOperator::GreaterEqual),
    ];
    for (text, operator) in cases {
        let source = format!("if(a {} b) {{ }};", text);
        match &parse(&source)[0] {
            Statement::If(node) => assert_eq!(
                node.condition,
                Expression::comparison(operator, Expression::symbol("a"), Expression::symbol("b")),
                "operator: {}",
                text
            ),
            other => panic!("expected an if statement, got {:?}", other),
        }
    }
}

#[test]
fn test_bare_expression_condition() {
    match &parse("if(ready) { };")[0] {
        Statement::If(node) => assert_eq!(node.condition, Expression::symbol("ready")),
        other => panic!("expected an if statement, got {:?}", other),
    }
}

// ============================================================================
// Function declarations
// ============================================================================

#[test]
fn test_function_desugars_into_signature_and_procedure() {
    let source = "int add(int x, int y) {\n  int result := x + y;\n  return result;\n};";
    assert_eq!(
        parse(source),
        vec![
            Statement::TypeSignature(TypeSignature {
                name: SymbolPrimitive::new("add"),
                type_annotation: ParameterizedType {
                    parameter_types: vec![Type::simple("int"), Type::simple("int")],
                    return_type: Box::new(Type::simple("int")),
                    args: vec![],
                },
            }),
            Statement::Procedure(Procedure {
                name: SymbolPrimitive::new("add"),
                equations: vec![Equation {
                    patterns: vec![
                        Pattern::VariablePattern(VariablePattern {
                            symbol: SymbolPrimitive::new("x"),
                        }),
                        Pattern::VariablePattern(VariablePattern {
                            symbol: SymbolPrimitive::new("y"),
                        }),
                    ],
                    body: UnguardedBody {
                        sequence: Sequence::new(vec![
                            Statement::Variable(Variable {
                                name: SymbolPrimitive::new("result"),
                                initializer: Expression::arithmetic(
                                    ArithmeticOperator::Plus,
                                    Expression::symbol("x"),
                                    Expression::symbol("y"),
                                ),
                                type_annotation: Type::simple("int"),
                            }),
                            Statement::Return(Return {
                                expression: Expression::symbol("result"),
                            }),
                        ]),
                    },
                }],
            }),
        ]
    );
}

#[test]
fn test_function_without_parameters() {
    let statements = parse("int zero() { return 0; };");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::TypeSignature(node) => {
            assert!(node.type_annotation.parameter_types.is_empty());
        }
        other => panic!("expected a type signature, got {:?}", other),
    }
    match &statements[1] {
        Statement::Procedure(node) => {
            assert_eq!(node.equations.len(), 1);
            assert!(node.equations[0].patterns.is_empty());
        }
        other => panic!("expected a procedure, got {:?}", other),
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_parsing_twice_is_deterministic() {
    let source = "int x := 1 + 2 * 3;\nwhile(x > 0) { x := x - 1; };";
    assert_eq!(parse(source), parse(source));
}

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn test_missing_identifier_names_the_semicolon() {
    let diagnostics = parse_err("int ;");
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.diagnostics()[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert_eq!(
        diagnostic.message_text,
        "Unexpected 'semicolon' token ';' at line 1 col 5."
    );
}

#[test]
fn test_missing_initializer_expression() {
    let diagnostics = parse_err("int x := ;");
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "Unexpected 'semicolon' token ';' at line 1 col 10."
    );
}

#[test]
fn test_missing_terminator_names_end_of_input() {
    let diagnostics = parse_err("int x := 1");
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "Unexpected 'eof' token '' at line 1 col 11."
    );
}

#[test]
fn test_unbalanced_parenthesis() {
    let diagnostics = parse_err("int x := (1 + 2;");
    assert_eq!(diagnostics.diagnostics()[0].kind, DiagnosticKind::Syntax);
}
