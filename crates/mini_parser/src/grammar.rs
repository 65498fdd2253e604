//! The Mini grammar.
//!
//! One production table plus the semantic actions that build catalog nodes.
//! Precedence is structural: `addition` layers over `multiplication` layers
//! over `primary`. Operator chains are collected through tail productions
//! and folded to the left, which keeps `a - b - c` as `(a - b) - c` without
//! a left-recursive rule.
//!
//! `while` is matched as a literal identifier rather than a keyword: the
//! reserved set is exactly `return`, `if`, `else`.

use crate::parser::{Grammar, Production, SemanticValue, Symbol};
use mini_ast::node::*;
use mini_scanner::{Token, TokenKind};

const fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

const fn n(name: &'static str) -> Symbol {
    Symbol::Nonterminal(name)
}

macro_rules! production {
    ($lhs:literal := [$($symbol:expr),* $(,)?] => $action:ident) => {
        Production {
            lhs: $lhs,
            rhs: &[$($symbol),*],
            action: $action,
        }
    };
}

/// The `:=` dialect grammar. Read-only, initialized once, shared by every
/// parser instance.
pub static MINI_GRAMMAR: Grammar = Grammar {
    start: "program",
    productions: &[
        production!("program" := [n("statementList"), t(TokenKind::EndOfInputToken)] => act_id),
        production!("statementList" := [] => act_empty_statements),
        production!("statementList" := [n("statement"), n("statementList")] => act_statement_list),
        // Every statement form is `;`-terminated, braced or not.
        production!("statement" := [n("declaration"), t(TokenKind::SemicolonToken)] => act_id),
        production!("statement" := [n("assignment"), t(TokenKind::SemicolonToken)] => act_id),
        production!("statement" := [n("ifStatement"), t(TokenKind::SemicolonToken)] => act_id),
        production!("statement" := [n("whileStatement"), t(TokenKind::SemicolonToken)] => act_id),
        production!("statement" := [n("returnStatement"), t(TokenKind::SemicolonToken)] => act_id),
        production!("statement" := [n("functionDeclaration"), t(TokenKind::SemicolonToken)] => act_id),
        production!("declaration" := [n("type"), t(TokenKind::Identifier), n("initializerOpt")] => act_declaration),
        production!("initializerOpt" := [] => act_nil_initializer),
        production!("initializerOpt" := [t(TokenKind::ColonEqualsToken), n("expression")] => act_initializer),
        production!("assignment" := [t(TokenKind::Identifier), t(TokenKind::ColonEqualsToken), n("expression")] => act_assignment),
        production!("ifStatement" := [
            t(TokenKind::IfKeyword),
            t(TokenKind::OpenParenToken),
            n("condition"),
            t(TokenKind::CloseParenToken),
            n("block"),
            n("elseOpt"),
        ] => act_if),
        production!("elseOpt" := [] => act_empty_sequence),
        production!("elseOpt" := [t(TokenKind::ElseKeyword), n("block")] => act_else),
        production!("whileStatement" := [
            Symbol::Literal(TokenKind::Identifier, "while"),
            t(TokenKind::OpenParenToken),
            n("condition"),
            t(TokenKind::CloseParenToken),
            n("block"),
        ] => act_while),
        production!("returnStatement" := [t(TokenKind::ReturnKeyword), n("expression")] => act_return),
        production!("block" := [t(TokenKind::OpenBraceToken), n("statementList"), t(TokenKind::CloseBraceToken)] => act_block),
        // Comparisons only appear as condition heads; initializer
        // expressions stay pure arithmetic.
        production!("condition" := [n("expression")] => act_id),
        production!("condition" := [n("expression"), n("comparisonOperator"), n("expression")] => act_comparison),
        production!("comparisonOperator" := [t(TokenKind::EqualsEqualsToken)] => act_id),
        production!("comparisonOperator" := [t(TokenKind::ExclamationEqualsToken)] => act_id),
        production!("comparisonOperator" := [t(TokenKind::LessThanToken)] => act_id),
        production!("comparisonOperator" := [t(TokenKind::LessThanEqualsToken)] => act_id),
        production!("comparisonOperator" := [t(TokenKind::GreaterThanToken)] => act_id),
        production!("comparisonOperator" := [t(TokenKind::GreaterThanEqualsToken)] => act_id),
        production!("functionDeclaration" := [
            n("type"),
            t(TokenKind::Identifier),
            t(TokenKind::OpenParenToken),
            n("parametersOpt"),
            t(TokenKind::CloseParenToken),
            t(TokenKind::OpenBraceToken),
            n("statementList"),
            t(TokenKind::CloseBraceToken),
        ] => act_function_declaration),
        production!("parametersOpt" := [] => act_empty_parameters),
        production!("parametersOpt" := [n("parameters")] => act_id),
        production!("parameters" := [n("parameter"), n("parametersTail")] => act_parameter_list),
        production!("parametersTail" := [] => act_empty_parameters),
        production!("parametersTail" := [t(TokenKind::CommaToken), n("parameter"), n("parametersTail")] => act_parameter_list_tail),
        production!("parameter" := [n("type"), t(TokenKind::Identifier)] => act_parameter),
        production!("type" := [t(TokenKind::Identifier), n("typeSuffixes")] => act_type),
        production!("typeSuffixes" := [] => act_no_type_suffix),
        production!("typeSuffixes" := [t(TokenKind::OpenBracketToken), t(TokenKind::CloseBracketToken), n("typeSuffixes")] => act_type_suffix),
        production!("expression" := [n("addition")] => act_id),
        production!("addition" := [n("multiplication"), n("additionTail")] => act_binary_chain),
        production!("additionTail" := [] => act_empty_chain),
        production!("additionTail" := [t(TokenKind::PlusToken), n("multiplication"), n("additionTail")] => act_chain),
        production!("additionTail" := [t(TokenKind::MinusToken), n("multiplication"), n("additionTail")] => act_chain),
        production!("multiplication" := [n("primary"), n("multiplicationTail")] => act_binary_chain),
        production!("multiplicationTail" := [] => act_empty_chain),
        production!("multiplicationTail" := [t(TokenKind::AsteriskToken), n("primary"), n("multiplicationTail")] => act_chain),
        production!("multiplicationTail" := [t(TokenKind::SlashToken), n("primary"), n("multiplicationTail")] => act_chain),
        production!("primary" := [t(TokenKind::Identifier)] => act_symbol),
        production!("primary" := [t(TokenKind::OpenParenToken), n("expression"), t(TokenKind::CloseParenToken)] => act_parenthesized),
        production!("primary" := [n("primitive")] => act_id),
        production!("primitive" := [t(TokenKind::NumberLiteral)] => act_number),
        production!("primitive" := [t(TokenKind::CharLiteral)] => act_char),
        production!("primitive" := [t(TokenKind::StringLiteral)] => act_string),
        production!("primitive" := [t(TokenKind::BooleanLiteral)] => act_boolean),
        production!("primitive" := [n("listLiteral")] => act_id),
        production!("listLiteral" := [t(TokenKind::OpenBracketToken), n("elementsOpt"), t(TokenKind::CloseBracketToken)] => act_list),
        production!("elementsOpt" := [] => act_empty_elements),
        production!("elementsOpt" := [n("elements")] => act_id),
        production!("elements" := [n("expression"), n("elementsTail")] => act_element_list),
        production!("elementsTail" := [] => act_empty_elements),
        production!("elementsTail" := [t(TokenKind::CommaToken), n("expression"), n("elementsTail")] => act_element_list_tail),
    ],
};

// ============================================================================
// Semantic actions
// ============================================================================

/// Move a production's matched values into a fixed-size array. A mismatch is
/// a grammar-table bug, never an input error.
fn unpack<const N: usize>(values: Vec<SemanticValue>) -> [SemanticValue; N] {
    match values.try_into() {
        Ok(array) => array,
        Err(values) => unreachable!(
            "grammar action expected {} matched symbols, got {}",
            N,
            values.len()
        ),
    }
}

fn arithmetic_operator(token: &Token) -> ArithmeticOperator {
    match token.kind {
        TokenKind::PlusToken => ArithmeticOperator::Plus,
        TokenKind::MinusToken => ArithmeticOperator::Minus,
        TokenKind::AsteriskToken => ArithmeticOperator::Multiply,
        TokenKind::SlashToken => ArithmeticOperator::Divide,
        kind => unreachable!("not an arithmetic operator token: {:?}", kind),
    }
}

fn comparison_operator(token: &Token) -> ComparisonOperator {
    match token.kind {
        TokenKind::EqualsEqualsToken => ComparisonOperator::Equal,
        TokenKind::ExclamationEqualsToken => ComparisonOperator::NotEqual,
        TokenKind::LessThanToken => ComparisonOperator::LessThan,
        TokenKind::LessThanEqualsToken => ComparisonOperator::LessEqual,
        TokenKind::GreaterThanToken => ComparisonOperator::GreaterThan,
        TokenKind::GreaterThanEqualsToken => ComparisonOperator::GreaterEqual,
        kind => unreachable!("not a comparison operator token: {:?}", kind),
    }
}

fn symbol_of(token: Token) -> SymbolPrimitive {
    SymbolPrimitive::new(token.value)
}

/// Pass the first matched value through.
fn act_id(mut values: Vec<SemanticValue>) -> SemanticValue {
    values.remove(0)
}

fn act_empty_statements(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Stmts(Vec::new())
}

fn act_statement_list(values: Vec<SemanticValue>) -> SemanticValue {
    let [statement, rest] = unpack(values);
    let mut statements = statement.into_stmts();
    statements.extend(rest.into_stmts());
    SemanticValue::Stmts(statements)
}

fn act_declaration(values: Vec<SemanticValue>) -> SemanticValue {
    let [type_annotation, name, initializer] = unpack(values);
    SemanticValue::Stmts(vec![Statement::Variable(Variable {
        name: symbol_of(name.into_token()),
        initializer: initializer.into_expr(),
        type_annotation: type_annotation.into_type(),
    })])
}

fn act_nil_initializer(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Expr(Expression::nil())
}

fn act_initializer(values: Vec<SemanticValue>) -> SemanticValue {
    let [_assign, expression] = unpack(values);
    expression
}

fn act_assignment(values: Vec<SemanticValue>) -> SemanticValue {
    let [target, _assign, expression] = unpack(values);
    SemanticValue::Stmts(vec![Statement::Assignment(Assignment {
        target: symbol_of(target.into_token()),
        expression: expression.into_expr(),
    })])
}

fn act_if(values: Vec<SemanticValue>) -> SemanticValue {
    let [_if, _open, condition, _close, then_branch, else_branch] = unpack(values);
    SemanticValue::Stmts(vec![Statement::If(If {
        condition: condition.into_expr(),
        then_branch: then_branch.into_seq(),
        else_branch: else_branch.into_seq(),
    })])
}

fn act_empty_sequence(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Seq(Sequence::empty())
}

fn act_else(values: Vec<SemanticValue>) -> SemanticValue {
    let [_else, block] = unpack(values);
    block
}

fn act_while(values: Vec<SemanticValue>) -> SemanticValue {
    let [_while, _open, condition, _close, body] = unpack(values);
    SemanticValue::Stmts(vec![Statement::While(While {
        condition: condition.into_expr(),
        body: body.into_seq(),
    })])
}

fn act_return(values: Vec<SemanticValue>) -> SemanticValue {
    let [_return, expression] = unpack(values);
    SemanticValue::Stmts(vec![Statement::Return(Return {
        expression: expression.into_expr(),
    })])
}

fn act_block(values: Vec<SemanticValue>) -> SemanticValue {
    let [_open, statements, _close] = unpack(values);
    SemanticValue::Seq(Sequence::new(statements.into_stmts()))
}

fn act_comparison(values: Vec<SemanticValue>) -> SemanticValue {
    let [left, operator, right] = unpack(values);
    SemanticValue::Expr(Expression::comparison(
        comparison_operator(&operator.into_token()),
        left.into_expr(),
        right.into_expr(),
    ))
}

fn act_function_declaration(values: Vec<SemanticValue>) -> SemanticValue {
    let [return_type, name, _open, parameters, _close, _open_brace, body, _close_brace] =
        unpack(values);
    let name = symbol_of(name.into_token());
    let parameters = parameters.into_params();

    let parameter_types = parameters.iter().map(|(ty, _)| ty.clone()).collect();
    let signature = TypeSignature {
        name: name.clone(),
        type_annotation: ParameterizedType {
            parameter_types,
            return_type: Box::new(return_type.into_type()),
            args: Vec::new(),
        },
    };

    let patterns = parameters
        .into_iter()
        .map(|(_, symbol)| Pattern::VariablePattern(VariablePattern { symbol }))
        .collect();
    let procedure = Procedure {
        name,
        equations: vec![Equation {
            patterns,
            body: UnguardedBody {
                sequence: Sequence::new(body.into_stmts()),
            },
        }],
    };

    SemanticValue::Stmts(vec![
        Statement::TypeSignature(signature),
        Statement::Procedure(procedure),
    ])
}

fn act_empty_parameters(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Params(Vec::new())
}

fn act_parameter_list(values: Vec<SemanticValue>) -> SemanticValue {
    let [parameter, rest] = unpack(values);
    let mut parameters = parameter.into_params();
    parameters.extend(rest.into_params());
    SemanticValue::Params(parameters)
}

fn act_parameter_list_tail(values: Vec<SemanticValue>) -> SemanticValue {
    let [_comma, parameter, rest] = unpack(values);
    let mut parameters = parameter.into_params();
    parameters.extend(rest.into_params());
    SemanticValue::Params(parameters)
}

fn act_parameter(values: Vec<SemanticValue>) -> SemanticValue {
    let [ty, name] = unpack(values);
    SemanticValue::Params(vec![(ty.into_type(), symbol_of(name.into_token()))])
}

fn act_type(values: Vec<SemanticValue>) -> SemanticValue {
    let [name, suffixes] = unpack(values);
    let mut ty = Type::simple(name.into_token().value);
    for _ in 0..suffixes.into_nat() {
        ty = Type::list(ty);
    }
    SemanticValue::TypeNode(ty)
}

fn act_no_type_suffix(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Nat(0)
}

fn act_type_suffix(values: Vec<SemanticValue>) -> SemanticValue {
    let [_open, _close, rest] = unpack(values);
    SemanticValue::Nat(rest.into_nat() + 1)
}

fn act_binary_chain(values: Vec<SemanticValue>) -> SemanticValue {
    let [first, chain] = unpack(values);
    let expression = chain.into_chain().into_iter().fold(
        first.into_expr(),
        |left, (operator, right)| {
            Expression::arithmetic(arithmetic_operator(&operator), left, right)
        },
    );
    SemanticValue::Expr(expression)
}

fn act_empty_chain(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Chain(Vec::new())
}

fn act_chain(values: Vec<SemanticValue>) -> SemanticValue {
    let [operator, operand, rest] = unpack(values);
    let mut chain = vec![(operator.into_token(), operand.into_expr())];
    chain.extend(rest.into_chain());
    SemanticValue::Chain(chain)
}

fn act_symbol(values: Vec<SemanticValue>) -> SemanticValue {
    let [name] = unpack(values);
    SemanticValue::Expr(Expression::SymbolPrimitive(symbol_of(name.into_token())))
}

fn act_parenthesized(values: Vec<SemanticValue>) -> SemanticValue {
    let [_open, expression, _close] = unpack(values);
    expression
}

fn act_number(values: Vec<SemanticValue>) -> SemanticValue {
    let [token] = unpack(values);
    SemanticValue::Expr(Expression::number(token.into_token().numeric_value()))
}

fn act_char(values: Vec<SemanticValue>) -> SemanticValue {
    let [token] = unpack(values);
    let token = token.into_token();
    match token.value.chars().next() {
        Some(value) => SemanticValue::Expr(Expression::char(value)),
        None => unreachable!("char token without a decoded character"),
    }
}

fn act_string(values: Vec<SemanticValue>) -> SemanticValue {
    let [token] = unpack(values);
    SemanticValue::Expr(Expression::string(token.into_token().value))
}

fn act_boolean(values: Vec<SemanticValue>) -> SemanticValue {
    let [token] = unpack(values);
    SemanticValue::Expr(Expression::boolean(token.into_token().value == "True"))
}

fn act_list(values: Vec<SemanticValue>) -> SemanticValue {
    let [_open, elements, _close] = unpack(values);
    SemanticValue::Expr(Expression::list(elements.into_exprs()))
}

fn act_empty_elements(_values: Vec<SemanticValue>) -> SemanticValue {
    SemanticValue::Exprs(Vec::new())
}

fn act_element_list(values: Vec<SemanticValue>) -> SemanticValue {
    let [element, rest] = unpack(values);
    let mut elements = vec![element.into_expr()];
    elements.extend(rest.into_exprs());
    SemanticValue::Exprs(elements)
}

fn act_element_list_tail(values: Vec<SemanticValue>) -> SemanticValue {
    let [_comma, element, rest] = unpack(values);
    let mut elements = vec![element.into_expr()];
    elements.extend(rest.into_exprs());
    SemanticValue::Exprs(elements)
}
