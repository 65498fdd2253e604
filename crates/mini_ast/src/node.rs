//! AST node definitions for the Mini front end.
//!
//! One struct per node kind, grouped into sum types per syntactic category
//! so downstream visitors are checked for exhaustive handling. Construction
//! is the only lifecycle event: nodes are never mutated after the parser
//! hands them to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Operators
// ============================================================================

/// Arithmetic operator tags. The serialized names (`"Plus"`, `"Minus"`,
/// `"Multiply"`, `"Divide"`) are part of the cross-front-end contract and
/// must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ArithmeticOperator::Plus => "Plus",
            ArithmeticOperator::Minus => "Minus",
            ArithmeticOperator::Multiply => "Multiply",
            ArithmeticOperator::Divide => "Divide",
        };
        write!(f, "{}", tag)
    }
}

/// Comparison operator tags, same contract as [`ArithmeticOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ComparisonOperator::Equal => "Equal",
            ComparisonOperator::NotEqual => "NotEqual",
            ComparisonOperator::LessThan => "LessThan",
            ComparisonOperator::LessEqual => "LessEqual",
            ComparisonOperator::GreaterThan => "GreaterThan",
            ComparisonOperator::GreaterEqual => "GreaterEqual",
        };
        write!(f, "{}", tag)
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// A reference to a named entity (variable, procedure name, type name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPrimitive {
    pub name: String,
}

impl SymbolPrimitive {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A numeric literal. All radixes collapse to one numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberPrimitive {
    pub value: f64,
}

/// A string literal with escapes already decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringPrimitive {
    pub value: String,
}

/// A character literal with its escape already decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharPrimitive {
    pub value: char,
}

/// A boolean literal (`True` or `False`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanPrimitive {
    pub value: bool,
}

/// The "declared but not yet assigned" placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NilPrimitive;

/// A list literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPrimitive {
    pub elements: Vec<Expression>,
}

// ============================================================================
// Expressions
// ============================================================================

/// A binary arithmetic node. Chains associate to the left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticBinaryOperation {
    pub operator: ArithmeticOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// A binary comparison node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOperation {
    pub operator: ComparisonOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    SymbolPrimitive(SymbolPrimitive),
    NumberPrimitive(NumberPrimitive),
    StringPrimitive(StringPrimitive),
    CharPrimitive(CharPrimitive),
    BooleanPrimitive(BooleanPrimitive),
    NilPrimitive(NilPrimitive),
    ListPrimitive(ListPrimitive),
    ArithmeticBinaryOperation(ArithmeticBinaryOperation),
    ComparisonOperation(ComparisonOperation),
}

impl Expression {
    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::SymbolPrimitive(SymbolPrimitive::new(name))
    }

    pub fn number(value: f64) -> Self {
        Expression::NumberPrimitive(NumberPrimitive { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringPrimitive(StringPrimitive {
            value: value.into(),
        })
    }

    pub fn char(value: char) -> Self {
        Expression::CharPrimitive(CharPrimitive { value })
    }

    pub fn boolean(value: bool) -> Self {
        Expression::BooleanPrimitive(BooleanPrimitive { value })
    }

    pub fn nil() -> Self {
        Expression::NilPrimitive(NilPrimitive)
    }

    pub fn list(elements: Vec<Expression>) -> Self {
        Expression::ListPrimitive(ListPrimitive { elements })
    }

    pub fn arithmetic(operator: ArithmeticOperator, left: Expression, right: Expression) -> Self {
        Expression::ArithmeticBinaryOperation(ArithmeticBinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn comparison(operator: ComparisonOperator, left: Expression, right: Expression) -> Self {
        Expression::ComparisonOperation(ComparisonOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

// ============================================================================
// Types
// ============================================================================

/// A named type, e.g. `int`. `args` carries type arguments; this grammar
/// never produces any, but the catalog shape reserves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleType {
    pub name: String,
    pub args: Vec<Type>,
}

/// A function type: curried parameter types and a return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterizedType {
    pub parameter_types: Vec<Type>,
    pub return_type: Box<Type>,
    pub args: Vec<Type>,
}

/// A homogeneous list type, e.g. `int[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListType {
    pub element_type: Box<Type>,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    SimpleType(SimpleType),
    ParameterizedType(ParameterizedType),
    ListType(ListType),
}

impl Type {
    pub fn simple(name: impl Into<String>) -> Self {
        Type::SimpleType(SimpleType {
            name: name.into(),
            args: Vec::new(),
        })
    }

    pub fn list(element_type: Type) -> Self {
        Type::ListType(ListType {
            element_type: Box::new(element_type),
            args: Vec::new(),
        })
    }

    pub fn parameterized(parameter_types: Vec<Type>, return_type: Type) -> Self {
        Type::ParameterizedType(ParameterizedType {
            parameter_types,
            return_type: Box::new(return_type),
            args: Vec::new(),
        })
    }
}

// ============================================================================
// Statements and declarations
// ============================================================================

/// A variable declaration. A declaration without initializer carries a
/// [`NilPrimitive`] in `initializer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: SymbolPrimitive,
    pub initializer: Expression,
    pub type_annotation: Type,
}

/// An assignment to an already-declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: SymbolPrimitive,
    pub expression: Expression,
}

/// An `if` statement. A missing `else` is an empty [`Sequence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    pub condition: Expression,
    pub then_branch: Sequence,
    pub else_branch: Sequence,
}

/// A `while` loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct While {
    pub condition: Expression,
    pub body: Sequence,
}

/// A `return` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    pub expression: Expression,
}

/// An ordered statement sequence, used for blocks and procedure bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub statements: Vec<Statement>,
}

impl Sequence {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn empty() -> Self {
        Self {
            statements: Vec::new(),
        }
    }
}

// ============================================================================
// Procedure shape
// ============================================================================

/// A formal parameter bound by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariablePattern {
    pub symbol: SymbolPrimitive,
}

/// Parameter patterns. This grammar only binds plain variables; the sum type
/// is the dispatch point for richer pattern kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    VariablePattern(VariablePattern),
}

/// A procedure body with no boolean guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnguardedBody {
    pub sequence: Sequence,
}

/// One clause of a procedure: parameter patterns plus a body. This grammar
/// always emits exactly one equation per procedure; multiple equations are
/// the shape for pattern dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub patterns: Vec<Pattern>,
    pub body: UnguardedBody,
}

/// A named procedure owning one or more equations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: SymbolPrimitive,
    pub equations: Vec<Equation>,
}

/// The declared type of a procedure, emitted alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSignature {
    pub name: SymbolPrimitive,
    pub type_annotation: ParameterizedType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Variable(Variable),
    Assignment(Assignment),
    If(If),
    While(While),
    Return(Return),
    TypeSignature(TypeSignature),
    Procedure(Procedure),
}
