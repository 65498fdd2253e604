//! The derivation engine.
//!
//! A top-down interpreter over a grammar table that computes every complete
//! derivation of a token stream. Parsing succeeds only when exactly one
//! derivation exists: zero derivations report the furthest token any
//! terminal match failed on, and two or more report the derivation count
//! instead of silently picking one.

use mini_ast::node::{Expression, Sequence, Statement, SymbolPrimitive, Type};
use mini_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use mini_scanner::{Token, TokenKind};
use rustc_hash::FxHashMap;

/// Maximum nonterminal nesting depth. Exceeding it fails the parse instead
/// of overflowing the stack; callers bound input size for latency anyway.
const MAX_RECURSION_DEPTH: u32 = 1024;

/// A grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Matches a single token of the given kind.
    Terminal(TokenKind),
    /// Matches a token of the given kind with exactly this text. Used for
    /// words the grammar gives meaning to without reserving them (`while`).
    Literal(TokenKind, &'static str),
    /// Matches a derivation of the named nonterminal.
    Nonterminal(&'static str),
}

/// The value a semantic action computes from its production's matched
/// symbols. Terminals contribute their token; nonterminals contribute the
/// value of their own action.
#[derive(Debug, Clone)]
pub enum SemanticValue {
    Token(Token),
    Expr(Expression),
    Exprs(Vec<Expression>),
    Stmts(Vec<Statement>),
    Seq(Sequence),
    TypeNode(Type),
    Params(Vec<(Type, SymbolPrimitive)>),
    Chain(Vec<(Token, Expression)>),
    Nat(usize),
}

impl SemanticValue {
    pub fn into_token(self) -> Token {
        match self {
            SemanticValue::Token(token) => token,
            other => unreachable!("grammar action expected a token, got {:?}", other),
        }
    }

    pub fn into_expr(self) -> Expression {
        match self {
            SemanticValue::Expr(expr) => expr,
            other => unreachable!("grammar action expected an expression, got {:?}", other),
        }
    }

    pub fn into_exprs(self) -> Vec<Expression> {
        match self {
            SemanticValue::Exprs(exprs) => exprs,
            other => unreachable!("grammar action expected an expression list, got {:?}", other),
        }
    }

    pub fn into_stmts(self) -> Vec<Statement> {
        match self {
            SemanticValue::Stmts(stmts) => stmts,
            other => unreachable!("grammar action expected statements, got {:?}", other),
        }
    }

    pub fn into_seq(self) -> Sequence {
        match self {
            SemanticValue::Seq(seq) => seq,
            other => unreachable!("grammar action expected a sequence, got {:?}", other),
        }
    }

    pub fn into_type(self) -> Type {
        match self {
            SemanticValue::TypeNode(ty) => ty,
            other => unreachable!("grammar action expected a type, got {:?}", other),
        }
    }

    pub fn into_params(self) -> Vec<(Type, SymbolPrimitive)> {
        match self {
            SemanticValue::Params(params) => params,
            other => unreachable!("grammar action expected parameters, got {:?}", other),
        }
    }

    pub fn into_chain(self) -> Vec<(Token, Expression)> {
        match self {
            SemanticValue::Chain(chain) => chain,
            other => unreachable!("grammar action expected an operator chain, got {:?}", other),
        }
    }

    pub fn into_nat(self) -> usize {
        match self {
            SemanticValue::Nat(n) => n,
            other => unreachable!("grammar action expected a count, got {:?}", other),
        }
    }
}

/// A semantic action: builds the production's value from its matched symbols.
pub type Action = fn(Vec<SemanticValue>) -> SemanticValue;

/// One production of a grammar.
pub struct Production {
    pub lhs: &'static str,
    pub rhs: &'static [Symbol],
    pub action: Action,
}

/// A grammar: a start symbol and a production table. Shipped grammars are
/// process-wide statics, initialized once and never mutated.
pub struct Grammar {
    pub start: &'static str,
    pub productions: &'static [Production],
}

/// The parser enumerates derivations of a token stream against a grammar.
///
/// Each instance is scoped to one parse call: it owns its token stream and
/// failure tracking, and shares nothing with other calls except the
/// read-only grammar.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    tokens: Vec<Token>,
    /// Production indices grouped by left-hand side.
    by_lhs: FxHashMap<&'static str, Vec<usize>>,
    /// The furthest token position any terminal match failed on.
    furthest: usize,
    /// Whether the depth guard pruned any derivation.
    depth_exceeded: bool,
}

impl Parser<'static> {
    /// Create a parser over the shipped Mini grammar.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_grammar(&crate::grammar::MINI_GRAMMAR, tokens)
    }
}

impl<'g> Parser<'g> {
    /// Create a parser over an explicit grammar table.
    pub fn with_grammar(grammar: &'g Grammar, tokens: Vec<Token>) -> Self {
        let mut by_lhs: FxHashMap<&'static str, Vec<usize>> = FxHashMap::default();
        for (index, production) in grammar.productions.iter().enumerate() {
            by_lhs.entry(production.lhs).or_default().push(index);
        }
        Self {
            grammar,
            tokens,
            by_lhs,
            furthest: 0,
            depth_exceeded: false,
        }
    }

    /// Parse the token stream, enforcing the single-derivation contract.
    ///
    /// The stream must be non-empty and end with the end-of-input sentinel,
    /// as produced by the scanner.
    pub fn parse(mut self) -> Result<Vec<Statement>, DiagnosticCollection> {
        assert!(
            matches!(
                self.tokens.last(),
                Some(token) if token.kind == TokenKind::EndOfInputToken
            ),
            "token stream must end with the end-of-input token"
        );

        let mut derivations = self.derive(self.grammar.start, 0, 0);
        derivations.retain(|(_, end)| *end == self.tokens.len());

        let mut diagnostics = DiagnosticCollection::new();
        match derivations.len() {
            0 => {
                if self.depth_exceeded {
                    diagnostics.add(Diagnostic::new(&messages::RECURSION_LIMIT_EXCEEDED, &[]));
                } else {
                    let token = self.furthest_token();
                    diagnostics.add(Diagnostic::at(
                        token.position,
                        &messages::UNEXPECTED_TOKEN,
                        &[
                            token.kind.description(),
                            &token.value,
                            &token.position.line.to_string(),
                            &token.position.column.to_string(),
                        ],
                    ));
                }
                Err(diagnostics)
            }
            1 => match derivations.pop() {
                Some((value, _)) => Ok(value.into_stmts()),
                None => unreachable!("derivation vanished between len check and pop"),
            },
            count => {
                diagnostics.add(Diagnostic::new(
                    &messages::AMBIGUOUS_PARSE,
                    &[&count.to_string()],
                ));
                Err(diagnostics)
            }
        }
    }

    /// All derivations of `name` starting at `pos`: the semantic value of
    /// each together with the position it consumed up to.
    fn derive(
        &mut self,
        name: &'static str,
        pos: usize,
        depth: u32,
    ) -> Vec<(SemanticValue, usize)> {
        if depth > MAX_RECURSION_DEPTH {
            self.depth_exceeded = true;
            return Vec::new();
        }
        let indices = match self.by_lhs.get(name) {
            Some(indices) => indices.clone(),
            None => unreachable!("grammar references undefined nonterminal '{}'", name),
        };

        let mut results = Vec::new();
        for index in indices {
            let production = &self.grammar.productions[index];
            let rhs = production.rhs;
            let action = production.action;
            for (values, end) in self.match_sequence(rhs, pos, depth) {
                results.push((action(values), end));
            }
        }
        results
    }

    /// Match a production body. Every alternative continuation is kept, so
    /// the result is the full set of (values, end) states.
    fn match_sequence(
        &mut self,
        rhs: &[Symbol],
        pos: usize,
        depth: u32,
    ) -> Vec<(Vec<SemanticValue>, usize)> {
        let mut states: Vec<(Vec<SemanticValue>, usize)> = vec![(Vec::new(), pos)];
        for symbol in rhs {
            let mut next_states = Vec::new();
            for (values, at) in states {
                match *symbol {
                    Symbol::Terminal(kind) => {
                        if at < self.tokens.len() && self.tokens[at].kind == kind {
                            let mut values = values;
                            values.push(SemanticValue::Token(self.tokens[at].clone()));
                            next_states.push((values, at + 1));
                        } else {
                            self.note_failure(at);
                        }
                    }
                    Symbol::Literal(kind, text) => {
                        if at < self.tokens.len()
                            && self.tokens[at].kind == kind
                            && self.tokens[at].value == text
                        {
                            let mut values = values;
                            values.push(SemanticValue::Token(self.tokens[at].clone()));
                            next_states.push((values, at + 1));
                        } else {
                            self.note_failure(at);
                        }
                    }
                    Symbol::Nonterminal(name) => {
                        for (value, end) in self.derive(name, at, depth + 1) {
                            let mut values = values.clone();
                            values.push(value);
                            next_states.push((values, end));
                        }
                    }
                }
            }
            states = next_states;
            if states.is_empty() {
                break;
            }
        }
        states
    }

    fn note_failure(&mut self, pos: usize) {
        if pos > self.furthest {
            self.furthest = pos;
        }
    }

    fn furthest_token(&self) -> &Token {
        let index = self.furthest.min(self.tokens.len() - 1);
        &self.tokens[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_core::text::Position;
    use mini_diagnostics::DiagnosticKind;

    fn eof_terminated(kinds: &[TokenKind]) -> Vec<Token> {
        let mut tokens: Vec<Token> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                Token::new(
                    *kind,
                    kind.fixed_text().unwrap_or("1").to_string(),
                    Position::new(1, i as u32 + 1),
                )
            })
            .collect();
        tokens.push(Token::new(
            TokenKind::EndOfInputToken,
            String::new(),
            Position::new(1, kinds.len() as u32 + 1),
        ));
        tokens
    }

    fn pass_through(mut values: Vec<SemanticValue>) -> SemanticValue {
        values.remove(0)
    }

    fn empty_stmts(_values: Vec<SemanticValue>) -> SemanticValue {
        SemanticValue::Stmts(Vec::new())
    }

    /// `value := number` twice over: every number admits two derivations.
    static AMBIGUOUS_GRAMMAR: Grammar = Grammar {
        start: "start",
        productions: &[
            Production {
                lhs: "start",
                rhs: &[
                    Symbol::Nonterminal("value"),
                    Symbol::Terminal(TokenKind::EndOfInputToken),
                ],
                action: pass_through,
            },
            Production {
                lhs: "value",
                rhs: &[Symbol::Terminal(TokenKind::NumberLiteral)],
                action: empty_stmts,
            },
            Production {
                lhs: "value",
                rhs: &[Symbol::Terminal(TokenKind::NumberLiteral)],
                action: empty_stmts,
            },
        ],
    };

    #[test]
    fn test_ambiguous_grammar_is_rejected_with_count() {
        let tokens = eof_terminated(&[TokenKind::NumberLiteral]);
        let parser = Parser::with_grammar(&AMBIGUOUS_GRAMMAR, tokens);
        let diagnostics = parser.parse().unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::Ambiguity);
        assert_eq!(
            diagnostic.message_text,
            "Ambiguous parse: 2 derivations produced for the same input."
        );
    }

    #[test]
    fn test_unambiguous_prefix_still_fails_on_trailing_input() {
        // A number followed by a stray semicolon matches no complete derivation.
        let tokens = eof_terminated(&[TokenKind::NumberLiteral, TokenKind::SemicolonToken]);
        let parser = Parser::with_grammar(&AMBIGUOUS_GRAMMAR, tokens);
        let diagnostics = parser.parse().unwrap_err();
        assert_eq!(diagnostics.diagnostics()[0].kind, DiagnosticKind::Syntax);
        assert_eq!(
            diagnostics.diagnostics()[0].message_text,
            "Unexpected 'semicolon' token ';' at line 1 col 2."
        );
    }
}
