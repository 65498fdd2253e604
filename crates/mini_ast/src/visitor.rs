//! AST visitor trait for traversing the node catalog.
//!
//! Implement [`AstVisitor`] to perform operations on each node kind. Default
//! implementations walk into children, so an implementation only overrides
//! the kinds it cares about. The match arms are exhaustive by construction:
//! adding a node kind breaks this module until the walk handles it.

use crate::node::*;

pub trait AstVisitor {
    fn visit_program(&mut self, statements: &[Statement]) {
        for stmt in statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Variable(n) => self.visit_variable(n),
            Statement::Assignment(n) => self.visit_assignment(n),
            Statement::If(n) => self.visit_if(n),
            Statement::While(n) => self.visit_while(n),
            Statement::Return(n) => self.visit_return(n),
            Statement::TypeSignature(n) => self.visit_type_signature(n),
            Statement::Procedure(n) => self.visit_procedure(n),
        }
    }

    // -- Statements --

    fn visit_variable(&mut self, node: &Variable) {
        self.visit_symbol(&node.name);
        self.visit_type(&node.type_annotation);
        self.visit_expression(&node.initializer);
    }

    fn visit_assignment(&mut self, node: &Assignment) {
        self.visit_symbol(&node.target);
        self.visit_expression(&node.expression);
    }

    fn visit_if(&mut self, node: &If) {
        self.visit_expression(&node.condition);
        self.visit_sequence(&node.then_branch);
        self.visit_sequence(&node.else_branch);
    }

    fn visit_while(&mut self, node: &While) {
        self.visit_expression(&node.condition);
        self.visit_sequence(&node.body);
    }

    fn visit_return(&mut self, node: &Return) {
        self.visit_expression(&node.expression);
    }

    fn visit_sequence(&mut self, node: &Sequence) {
        for stmt in &node.statements {
            self.visit_statement(stmt);
        }
    }

    // -- Procedure shape --

    fn visit_type_signature(&mut self, node: &TypeSignature) {
        self.visit_symbol(&node.name);
        for param in &node.type_annotation.parameter_types {
            self.visit_type(param);
        }
        self.visit_type(&node.type_annotation.return_type);
    }

    fn visit_procedure(&mut self, node: &Procedure) {
        self.visit_symbol(&node.name);
        for equation in &node.equations {
            self.visit_equation(equation);
        }
    }

    fn visit_equation(&mut self, node: &Equation) {
        for pattern in &node.patterns {
            self.visit_pattern(pattern);
        }
        self.visit_sequence(&node.body.sequence);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::VariablePattern(n) => self.visit_symbol(&n.symbol),
        }
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::SymbolPrimitive(n) => self.visit_symbol(n),
            Expression::NumberPrimitive(_)
            | Expression::StringPrimitive(_)
            | Expression::CharPrimitive(_)
            | Expression::BooleanPrimitive(_)
            | Expression::NilPrimitive(_) => {}
            Expression::ListPrimitive(n) => {
                for element in &n.elements {
                    self.visit_expression(element);
                }
            }
            Expression::ArithmeticBinaryOperation(n) => {
                self.visit_expression(&n.left);
                self.visit_expression(&n.right);
            }
            Expression::ComparisonOperation(n) => {
                self.visit_expression(&n.left);
                self.visit_expression(&n.right);
            }
        }
    }

    fn visit_symbol(&mut self, _node: &SymbolPrimitive) {}

    // -- Types --

    fn visit_type(&mut self, ty: &Type) {
        match ty {
            Type::SimpleType(n) => {
                for arg in &n.args {
                    self.visit_type(arg);
                }
            }
            Type::ParameterizedType(n) => {
                for param in &n.parameter_types {
                    self.visit_type(param);
                }
                self.visit_type(&n.return_type);
                for arg in &n.args {
                    self.visit_type(arg);
                }
            }
            Type::ListType(n) => {
                self.visit_type(&n.element_type);
                for arg in &n.args {
                    self.visit_type(arg);
                }
            }
        }
    }
}
