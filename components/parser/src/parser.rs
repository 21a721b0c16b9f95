//! Recursive descent parser for MiniJava
//!
//! The parser pulls one token at a time from the [`Scanner`], recognises the
//! grammar below and, as a side effect, records every declaration in the
//! [`SymbolTable`]:
//!
//! ```text
//! Prog          -> {ClassDecl} MainClass
//! MainClass     -> 'final' 'class' id '{' 'public' 'static' 'void' 'main'
//!                  '(' 'String' '[' ']' id ')' '{' SeqOfStatements '}' '}'
//! ClassDecl     -> 'class' id ( '{' VarDecl MethodDecl '}'
//!                              | 'extends' id '{' VarDecl MethodDecl '}' )
//! VarDecl       -> 'final' Type id '=' num ';' VarDecl
//!                | Type IdentifierList ';' VarDecl | ε
//! IdentifierList-> id (IdentifierList | ',' id IdentifierList) | ε
//! Type          -> 'int' | 'boolean' | 'real' | 'void' | 'String'
//! MethodDecl    -> 'public' Type id '(' FormalList ')' '{' VarDecl
//!                  SeqOfStatements 'return' Expr ';' '}' MethodDecl | ε
//! FormalList    -> Type id FormalRest | ε
//! FormalRest    -> ',' Type id FormalRest | ε
//! SeqOfStatements -> (Statement ';' StatTail) | ε
//! StatTail      -> (Statement ';' StatTail) | ε
//! Statement     -> AssignStat | IOStat
//! AssignStat    -> id '=' Expr
//! IOStat        -> ε
//! Expr          -> Relation | ε
//! Relation      -> SimpleExpr
//! SimpleExpr    -> Term MoreTerm
//! MoreTerm      -> Addop Term MoreTerm | ε
//! Term          -> Factor MoreFactor
//! MoreFactor    -> Mulop Factor MoreFactor | ε
//! Factor        -> id | num | '(' Expr ')' | '!' Factor | Addop Factor
//!                | 'true' | 'false'
//! ```
//!
//! The right-recursive list productions are driven by loops. The first
//! mismatch ends the parse; there is no error recovery.

use crate::error::*;
use crate::lexer::{Scanner, Token, TokenKind};
use crate::symbol_table::{ConstValue, DumpSink, EntryId, SymbolTable, VarType};
use core_types::CompileError;
use tracing::debug;

/// Scope depth of top-level declarations.
pub const TOP_LEVEL_DEPTH: usize = 1;

/// Running layout of one frame (class members or a method's parameters
/// and locals).
#[derive(Debug, Default)]
struct Frame {
    offset: usize,
    size: usize,
    variable_names: Vec<String>,
}

impl Frame {
    /// Reserve room for one declared item, returning its offset.
    fn allocate(&mut self, name: &str, var_type: VarType) -> usize {
        let offset = self.offset;
        let size = var_type.size();
        self.offset += size;
        self.size += size;
        self.variable_names.push(name.to_string());
        offset
    }
}

/// MiniJava parser
pub struct Parser<S = Vec<String>> {
    scanner: Scanner,
    table: SymbolTable,
    depth: usize,
    sink: S,
}

impl Parser<Vec<String>> {
    /// Create a new parser that collects scope dumps in memory
    pub fn new(source: &str) -> Self {
        Self::with_sink(source, Vec::new())
    }
}

impl<S: DumpSink> Parser<S> {
    /// Create a new parser that writes scope dumps to `sink`.
    ///
    /// The scanner is primed with the first token.
    pub fn with_sink(source: &str, sink: S) -> Self {
        let mut scanner = Scanner::new(source);
        scanner.next_token();
        Self {
            scanner,
            table: SymbolTable::new(),
            depth: TOP_LEVEL_DEPTH,
            sink,
        }
    }

    /// Parse the whole program.
    ///
    /// On success the top-level scope is dumped but kept, so the caller can
    /// still inspect it through [`Parser::symbol_table`].
    pub fn parse(&mut self) -> Result<(), CompileError> {
        self.parse_program()?;
        self.dump_depth(TOP_LEVEL_DEPTH);
        Ok(())
    }

    /// The symbol table as it stands.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Current scope depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The dump sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the parser, returning the dump sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // Prog -> {ClassDecl} MainClass
    fn parse_program(&mut self) -> Result<(), CompileError> {
        while self.check(TokenKind::Class) {
            self.parse_class_declaration()?;
        }
        self.parse_main_class()?;
        self.expect(TokenKind::Eof)?;
        Ok(())
    }

    fn parse_main_class(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Final)?;
        self.expect(TokenKind::Class)?;
        let (class_id, _) = self.declare(TokenKind::Identifier)?;

        self.open_scope();
        self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::Public)?;
        self.expect(TokenKind::Static)?;
        let return_type = VarType::from_token(self.expect(TokenKind::Void)?.kind);
        let (method_id, method_name) = self.declare(TokenKind::Main)?;

        self.open_scope();
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::StringType)?;
        self.expect(TokenKind::LBracket)?;
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;
        self.parse_seq_of_statements()?;
        self.expect(TokenKind::RBrace)?;

        self.table
            .set_function(method_id, 0, return_type, Vec::new())?;
        self.close_scope();

        self.expect(TokenKind::RBrace)?;
        self.table
            .set_class(class_id, 0, vec![method_name], Vec::new())?;
        self.close_scope();
        Ok(())
    }

    fn parse_class_declaration(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Class)?;
        let (class_id, class_name) = self.declare(TokenKind::Identifier)?;

        let next = self.current().kind;
        match next {
            TokenKind::LBrace => {}
            TokenKind::Extends => {
                self.advance();
                self.expect(TokenKind::Identifier)?;
            }
            _ => {
                return Err(structural_error(
                    format!("Missing class body for '{}'", class_name),
                    Some(self.current().position()),
                ))
            }
        }

        self.open_scope();
        self.expect(TokenKind::LBrace)?;

        let mut members = Frame::default();
        self.parse_var_declarations(&mut members)?;
        let method_names = self.parse_method_declarations()?;

        self.expect(TokenKind::RBrace)?;
        self.table.set_class(
            class_id,
            members.size,
            method_names,
            members.variable_names,
        )?;
        self.close_scope();
        Ok(())
    }

    // VarDecl -> 'final' Type id '=' num ';' VarDecl | Type IdentifierList ';' VarDecl | ε
    fn parse_var_declarations(&mut self, frame: &mut Frame) -> Result<(), CompileError> {
        loop {
            let kind = self.current().kind;
            match kind {
                TokenKind::Final => self.parse_constant_declaration(frame)?,
                kind if kind.is_type() => self.parse_variable_declaration(frame)?,
                _ => return Ok(()),
            }
        }
    }

    fn parse_constant_declaration(&mut self, frame: &mut Frame) -> Result<(), CompileError> {
        self.expect(TokenKind::Final)?;
        let const_type = self.parse_type()?;
        let (id, name) = self.declare(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;
        let literal = self.expect(TokenKind::Number)?;
        self.expect(TokenKind::Semicolon)?;

        let value = const_value(&literal)?;
        let offset = frame.allocate(&name, const_type);
        self.table
            .set_constant(id, const_type, offset, const_type.size(), value)
    }

    fn parse_variable_declaration(&mut self, frame: &mut Frame) -> Result<(), CompileError> {
        let var_type = self.parse_type()?;

        // IdentifierList: at least one name, then names optionally comma-separated
        self.declare_variable(frame, var_type)?;
        loop {
            let kind = self.current().kind;
            match kind {
                TokenKind::Identifier => self.declare_variable(frame, var_type)?,
                TokenKind::Comma => {
                    self.advance();
                    self.declare_variable(frame, var_type)?;
                }
                _ => break,
            }
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn declare_variable(&mut self, frame: &mut Frame, var_type: VarType) -> Result<(), CompileError> {
        let (id, name) = self.declare(TokenKind::Identifier)?;
        let offset = frame.allocate(&name, var_type);
        self.table.set_variable(id, var_type, offset, var_type.size())
    }

    fn parse_type(&mut self) -> Result<VarType, CompileError> {
        let token = self.current();
        if !token.kind.is_type() {
            return Err(syntax_error(
                format!("Type declaration expected, found {}", token.kind),
                Some(token.position()),
            ));
        }
        let var_type = VarType::from_token(token.kind);
        self.advance();
        Ok(var_type)
    }

    // MethodDecl -> 'public' Type id '(' FormalList ')' '{' VarDecl
    //               SeqOfStatements 'return' Expr ';' '}' MethodDecl | ε
    fn parse_method_declarations(&mut self) -> Result<Vec<String>, CompileError> {
        let mut method_names = Vec::new();

        while self.check(TokenKind::Public) {
            self.advance();
            let return_type = self.parse_type()?;
            let (method_id, name) = self.declare(TokenKind::Identifier)?;
            method_names.push(name);

            self.open_scope();
            self.expect(TokenKind::LParen)?;
            let mut frame = Frame::default();
            let param_types = self.parse_formal_list(&mut frame)?;
            self.expect(TokenKind::RParen)?;
            self.expect(TokenKind::LBrace)?;

            self.parse_var_declarations(&mut frame)?;
            self.parse_seq_of_statements()?;
            self.expect(TokenKind::Return)?;
            self.parse_expression()?;
            self.expect(TokenKind::Semicolon)?;
            self.expect(TokenKind::RBrace)?;

            self.table
                .set_function(method_id, frame.size, return_type, param_types)?;
            self.close_scope();
        }

        Ok(method_names)
    }

    // FormalList -> Type id FormalRest | ε
    // FormalRest -> ',' Type id FormalRest | ε
    fn parse_formal_list(&mut self, frame: &mut Frame) -> Result<Vec<VarType>, CompileError> {
        let mut param_types = Vec::new();
        if !self.current().kind.is_type() {
            return Ok(param_types);
        }

        loop {
            let var_type = self.parse_type()?;
            self.declare_variable(frame, var_type)?;
            param_types.push(var_type);

            if !self.check(TokenKind::Comma) {
                return Ok(param_types);
            }
            self.advance();
        }
    }

    // SeqOfStatements -> Statement ';' StatTail | ε
    fn parse_seq_of_statements(&mut self) -> Result<(), CompileError> {
        while self.check(TokenKind::Identifier) {
            self.parse_statement()?;
            self.expect(TokenKind::Semicolon)?;
        }
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<(), CompileError> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Identifier => self.parse_assign_statement(),
            // IOStat is empty
            _ => Ok(()),
        }
    }

    fn parse_assign_statement(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;
        self.parse_expression()
    }

    // Expr -> Relation | ε
    fn parse_expression(&mut self) -> Result<(), CompileError> {
        if starts_expression(self.current().kind) {
            self.parse_relation()
        } else {
            Ok(())
        }
    }

    fn parse_relation(&mut self) -> Result<(), CompileError> {
        self.parse_simple_expression()
    }

    // SimpleExpr -> Term MoreTerm
    fn parse_simple_expression(&mut self) -> Result<(), CompileError> {
        self.parse_term()?;
        while self.check(TokenKind::AddOp) {
            self.advance();
            self.parse_term()?;
        }
        Ok(())
    }

    // Term -> Factor MoreFactor
    fn parse_term(&mut self) -> Result<(), CompileError> {
        self.parse_factor()?;
        while self.check(TokenKind::MulOp) {
            self.advance();
            self.parse_factor()?;
        }
        Ok(())
    }

    // Factor -> '!' Factor | Addop Factor | primary
    fn parse_factor(&mut self) -> Result<(), CompileError> {
        // Prefix operators are consumed iteratively, then one primary follows.
        while matches!(self.current().kind, TokenKind::Not | TokenKind::AddOp) {
            self.advance();
        }

        let kind = self.current().kind;
        match kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(())
            }
            TokenKind::LParen => {
                self.advance();
                self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(())
            }
            other => Err(syntax_error(
                format!("Expected expression, found {}", other),
                Some(self.current().position()),
            )),
        }
    }

    /// Consume an identifier-like token and insert it at the current depth,
    /// rejecting a name already declared at this depth.
    fn declare(&mut self, kind: TokenKind) -> Result<(EntryId, String), CompileError> {
        let token = self.expect(kind)?;

        if let Some(existing) = self.table.lookup(&token.lexeme) {
            if existing.depth == self.depth {
                return Err(duplicate_identifier(&token.lexeme, Some(token.position())));
            }
        }

        let id = self.table.insert(&token.lexeme, token.kind, self.depth);
        Ok((id, token.lexeme))
    }

    fn open_scope(&mut self) {
        self.depth += 1;
        debug!(depth = self.depth, "open scope");
    }

    fn close_scope(&mut self) {
        debug!(depth = self.depth, "close scope");
        self.dump_depth(self.depth);
        self.table.delete_depth(self.depth);
        self.depth -= 1;
    }

    fn dump_depth(&mut self, depth: usize) {
        self.sink.write_line(&format!("-- depth {} --", depth));
        self.table.write(depth, &mut self.sink);
    }

    fn current(&self) -> &Token {
        self.scanner.token()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) {
        self.scanner.next_token();
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        let token = self.scanner.token();
        if token.kind != kind {
            return Err(unexpected_token(kind, token.kind, Some(token.position())));
        }
        let token = token.clone();
        self.advance();
        Ok(token)
    }
}

fn starts_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::LParen
            | TokenKind::Not
            | TokenKind::AddOp
            | TokenKind::True
            | TokenKind::False
    )
}

fn const_value(token: &Token) -> Result<ConstValue, CompileError> {
    match (token.value, token.value_r) {
        (Some(value), _) => Ok(ConstValue::Int(value)),
        (None, Some(value)) => Ok(ConstValue::Real(value)),
        (None, None) => Err(internal_error(format!(
            "Number token '{}' carries no value",
            token.lexeme
        ))),
    }
}
