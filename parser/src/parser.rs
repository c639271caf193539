use crate::cst::*;
use egg_errors::ParserError;
use egg_lexer::{SpannedToken, Token, Tokenizer};
use egg_span::{Location, SourceName};

/// Recursive-descent parser over a flat token stream (§4.2). Whitespace and
/// comment tokens are dropped up front; the parser only ever sees the
/// grammar-relevant tokens, plus a trailing `Eof`.
pub struct Parser {
    source: SourceName,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

type PResult<T> = Result<T, (ParserError, Location)>;

impl Parser {
    pub fn from_str(source: SourceName, text: &str) -> Result<Self, (egg_errors::TokenizerError, Location)> {
        let tokens = Tokenizer::from_str(source.clone(), text)
            .tokenize()?
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect();
        Ok(Self { source, tokens, pos: 0 })
    }

    /// Parses a complete program: a non-empty sequence of statements (§4.2,
    /// §6). Empty input is reported at the source prefix.
    pub fn parse_module(&mut self) -> PResult<Cst> {
        if self.tokens.len() <= 1 {
            return Err((ParserError::EmptyInput, self.location_at(0)));
        }
        let start = self.location_at(0);
        let mut statements = Vec::new();
        while !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        let end = self.current().location(self.source.clone());
        Ok(Cst::Module(statements, start.span(&end)))
    }

    fn current(&self) -> &SpannedToken {
        &self.tokens[self.pos]
    }

    fn token(&self) -> &Token {
        &self.current().token
    }

    fn at_eof(&self) -> bool {
        matches!(self.token(), Token::Eof)
    }

    fn location_here(&self) -> Location {
        self.current().location(self.source.clone())
    }

    fn location_at(&self, idx: usize) -> Location {
        self.tokens
            .get(idx)
            .unwrap_or_else(|| self.tokens.last().unwrap())
            .location(self.source.clone())
    }

    fn prev_location(&self) -> Location {
        self.tokens[self.pos.saturating_sub(1)].location(self.source.clone())
    }

    fn bump(&mut self) -> Token {
        let tok = self.current().token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, token: &Token) -> bool {
        self.token() == token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> PResult<()> {
        if self.check(&token) {
            self.bump();
            Ok(())
        } else if self.at_eof() {
            Err((ParserError::unexpected_eof(token.to_string()), self.location_here()))
        } else {
            let found = self.token().to_string();
            let loc = self.location_here();
            self.bump();
            Err((ParserError::unexpected(token.to_string(), found), loc))
        }
    }

    fn unexpected<T>(&self, expected: &str) -> PResult<T> {
        if self.at_eof() {
            Err((ParserError::unexpected_eof(expected), self.location_here()))
        } else {
            Err((ParserError::unexpected(expected, self.token().to_string()), self.location_here()))
        }
    }

    fn eat_ident(&mut self) -> Option<(String, Location)> {
        if let Token::Ident(name) = self.token().clone() {
            let loc = self.location_here();
            self.bump();
            Some((name, loc))
        } else {
            None
        }
    }

    fn expect_ident(&mut self) -> PResult<(String, Location)> {
        self.eat_ident().ok_or(()).or_else(|_| self.unexpected("identifier"))
    }

    fn type_base_for(token: &Token) -> Option<TypeBase> {
        Some(match token {
            Token::Void => TypeBase::Void,
            Token::BoolType => TypeBase::Bool,
            Token::IntType => TypeBase::Int,
            Token::FloatType => TypeBase::Float,
            Token::StringType => TypeBase::String,
            Token::ObjectType => TypeBase::Object,
            Token::AnyType => TypeBase::Any,
            Token::Var => TypeBase::Var,
            _ => return None,
        })
    }

    fn at_type_start(&self) -> bool {
        Parser::type_base_for(self.token()).is_some()
    }

    /// `void|bool|int|float|string|object|any|var` with an optional `?`.
    fn parse_type(&mut self) -> PResult<TypeCst> {
        let start = self.location_here();
        let Some(base) = Parser::type_base_for(self.token()) else {
            return self.unexpected("type");
        };
        self.bump();
        let nullable = self.eat(&Token::Question);
        let location = if nullable { start.span(&self.prev_location()) } else { start };
        Ok(TypeCst { base, nullable, location })
    }

    // ---- statements --------------------------------------------------

    pub fn parse_statement(&mut self) -> PResult<Cst> {
        match self.token() {
            Token::LBrace => self.parse_block(),
            Token::If => self.parse_if(),
            Token::For => self.parse_for(),
            Token::Foreach => self.parse_foreach(),
            Token::While => self.parse_while(),
            Token::Return => self.parse_return(),
            Token::Try => self.parse_try(),
            Token::Assert => self.parse_assert(),
            _ if self.at_type_start() && self.looks_like_declaration() => self.parse_declaration(),
            _ => self.parse_assignment_or_expr_statement(),
        }
    }

    /// A type-starting token begins a declaration only if it's immediately
    /// followed by `ident =` (variable) or `ident (` (function); otherwise
    /// it's being used as a manifestation expression (e.g. `string(x)`).
    fn looks_like_declaration(&self) -> bool {
        let mut idx = self.pos + 1;
        if matches!(self.tokens.get(idx).map(|t| &t.token), Some(Token::Question)) {
            idx += 1;
        }
        matches!(self.tokens.get(idx).map(|t| &t.token), Some(Token::Ident(_)))
    }

    fn parse_block(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) && !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        self.expect(Token::RBrace)?;
        Ok(Cst::Block(statements, start.span(&self.prev_location())))
    }

    fn parse_declaration(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        let ty = self.parse_type()?;
        let (name, _) = self.expect_ident()?;
        if self.check(&Token::LParen) {
            return self.parse_function(start, ty, name);
        }
        self.expect(Token::Assign)?;
        let init = self.parse_expression()?;
        self.expect(Token::Semi)?;
        let location = start.span(&self.prev_location());
        Ok(Cst::VarDecl { ty, name, init: Box::new(init), location })
    }

    fn parse_function(&mut self, start: Location, ret: TypeCst, name: String) -> PResult<Cst> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                let p_start = self.location_here();
                let ty = self.parse_type()?;
                let (pname, _) = self.expect_ident()?;
                params.push(Param { ty, name: pname, location: p_start.span(&self.prev_location()) });
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        let body = self.parse_block()?;
        let location = start.span(&self.prev_location());
        Ok(Cst::FuncDecl { name, params, ret, body: Box::new(body), location })
    }

    fn parse_guard_head(&mut self) -> PResult<(TypeCst, String, Cst)> {
        let ty = self.parse_type()?;
        let (name, _) = self.expect_ident()?;
        self.expect(Token::Assign)?;
        let source = self.parse_expression()?;
        Ok((ty, name, source))
    }

    fn parse_if(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let is_guard = self.at_type_start();
        let node = if is_guard {
            let (ty, name, source) = self.parse_guard_head()?;
            self.expect(Token::RParen)?;
            let then_branch = self.parse_statement()?;
            let else_branch = self.parse_else()?;
            Cst::IfGuard {
                ty,
                name,
                source: Box::new(source),
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
                location: start.clone(),
            }
        } else {
            let cond = self.parse_expression()?;
            self.expect(Token::RParen)?;
            let then_branch = self.parse_statement()?;
            let else_branch = self.parse_else()?;
            Cst::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
                location: start.clone(),
            }
        };
        Ok(self.relocate(node, start))
    }

    fn parse_else(&mut self) -> PResult<Option<Cst>> {
        if self.eat(&Token::Else) {
            Ok(Some(self.parse_statement()?))
        } else {
            Ok(None)
        }
    }

    fn relocate(&self, node: Cst, start: Location) -> Cst {
        let full = start.span(&self.prev_location());
        match node {
            Cst::If { cond, then_branch, else_branch, .. } => Cst::If { cond, then_branch, else_branch, location: full },
            Cst::IfGuard { ty, name, source, then_branch, else_branch, .. } => {
                Cst::IfGuard { ty, name, source, then_branch, else_branch, location: full }
            }
            other => other,
        }
    }

    fn parse_for(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::For)?;
        self.expect(Token::LParen)?;
        let init = if self.check(&Token::Semi) {
            None
        } else {
            Some(Box::new(self.parse_for_clause()?))
        };
        self.expect(Token::Semi)?;
        let cond = if self.check(&Token::Semi) { None } else { Some(Box::new(self.parse_expression()?)) };
        self.expect(Token::Semi)?;
        let advance = if self.check(&Token::RParen) { None } else { Some(Box::new(self.parse_for_clause()?)) };
        self.expect(Token::RParen)?;
        let body = self.parse_statement()?;
        let location = start.span(&self.prev_location());
        Ok(Cst::For { init, cond, advance, body: Box::new(body), location })
    }

    /// A `for`-header clause: either a bare declaration/assignment/nudge
    /// without its own terminating `;`, used for init and advance.
    fn parse_for_clause(&mut self) -> PResult<Cst> {
        if self.at_type_start() && self.looks_like_declaration() {
            let start = self.location_here();
            let ty = self.parse_type()?;
            let (name, _) = self.expect_ident()?;
            self.expect(Token::Assign)?;
            let init = self.parse_expression()?;
            let location = start.span(&self.prev_location());
            return Ok(Cst::VarDecl { ty, name, init: Box::new(init), location });
        }
        self.parse_assignment_or_nudge_unterminated()
    }

    fn parse_foreach(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::Foreach)?;
        self.expect(Token::LParen)?;
        let ty = self.parse_type()?;
        let (name, _) = self.expect_ident()?;
        self.expect(Token::In)?;
        let source = self.parse_expression()?;
        self.expect(Token::RParen)?;
        let body = self.parse_statement()?;
        let location = start.span(&self.prev_location());
        Ok(Cst::Foreach { ty, name, source: Box::new(source), body: Box::new(body), location })
    }

    fn parse_while(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let is_guard = self.at_type_start();
        let node = if is_guard {
            let (ty, name, source) = self.parse_guard_head()?;
            self.expect(Token::RParen)?;
            let body = self.parse_statement()?;
            Cst::WhileGuard { ty, name, source: Box::new(source), body: Box::new(body), location: start.clone() }
        } else {
            let cond = self.parse_expression()?;
            self.expect(Token::RParen)?;
            let body = self.parse_statement()?;
            Cst::While { cond: Box::new(cond), body: Box::new(body), location: start.clone() }
        };
        let full = start.span(&self.prev_location());
        Ok(match node {
            Cst::While { cond, body, .. } => Cst::While { cond, body, location: full },
            Cst::WhileGuard { ty, name, source, body, .. } => Cst::WhileGuard { ty, name, source, body, location: full },
            other => other,
        })
    }

    fn parse_return(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::Return)?;
        let value = if self.check(&Token::Semi) { None } else { Some(Box::new(self.parse_expression()?)) };
        self.expect(Token::Semi)?;
        Ok(Cst::Return(value, start.span(&self.prev_location())))
    }

    fn parse_assert(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::Assert)?;
        self.expect(Token::LParen)?;
        let expr = self.parse_expression()?;
        self.expect(Token::RParen)?;
        self.expect(Token::Semi)?;
        Ok(Cst::Assert(Box::new(expr), start.span(&self.prev_location())))
    }

    fn parse_try(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        self.expect(Token::Try)?;
        let try_block = self.parse_block()?;
        let mut catches = Vec::new();
        while self.check(&Token::Catch) {
            let c_start = self.location_here();
            self.bump();
            self.expect(Token::LParen)?;
            let ty = self.parse_type()?;
            let (name, _) = self.expect_ident()?;
            self.expect(Token::RParen)?;
            let body = self.parse_block()?;
            catches.push(CatchClause { ty, name, body: Box::new(body), location: c_start.span(&self.prev_location()) });
        }
        let finally_block = if self.eat(&Token::Finally) { Some(Box::new(self.parse_block()?)) } else { None };
        let location = start.span(&self.prev_location());
        Ok(Cst::Try { try_block: Box::new(try_block), catches, finally_block, location })
    }

    fn parse_assignment_or_expr_statement(&mut self) -> PResult<Cst> {
        let node = self.parse_assignment_or_nudge_unterminated()?;
        self.expect(Token::Semi)?;
        Ok(node)
    }

    /// Parses one of: assignment (`=`/compound), nudge (`++`/`--`), or a
    /// bare expression statement — without consuming the trailing `;`, so
    /// `for`-header clauses can reuse it.
    fn parse_assignment_or_nudge_unterminated(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        let expr = self.parse_expression()?;
        let op = match self.token() {
            Token::Assign => Some(AssignOp::Assign),
            Token::PlusEq => Some(AssignOp::AddAssign),
            Token::MinusEq => Some(AssignOp::SubAssign),
            Token::StarEq => Some(AssignOp::MulAssign),
            Token::SlashEq => Some(AssignOp::DivAssign),
            Token::PercentEq => Some(AssignOp::RemAssign),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let value = self.parse_expression()?;
            let location = start.span(&self.prev_location());
            return Ok(Cst::Assign { target: Box::new(expr), op, value: Box::new(value), location });
        }
        let nudge = match self.token() {
            Token::PlusPlus => Some(NudgeOp::Increment),
            Token::MinusMinus => Some(NudgeOp::Decrement),
            _ => None,
        };
        if let Some(op) = nudge {
            self.bump();
            let location = start.span(&self.prev_location());
            return Ok(Cst::Nudge { target: Box::new(expr), op, location });
        }
        let location = start.span(&self.prev_location());
        Ok(Cst::ExprStatement(Box::new(expr), location))
    }

    // ---- expressions ---------------------------------------------------

    pub fn parse_expression(&mut self) -> PResult<Cst> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        let cond = self.parse_or()?;
        if self.eat(&Token::Question) {
            let then_value = self.parse_ternary()?;
            self.expect(Token::Colon)?;
            let else_value = self.parse_ternary()?;
            let location = start.span(&self.prev_location());
            return Ok(Cst::Ternary(Box::new(cond), Box::new(then_value), Box::new(else_value), location));
        }
        Ok(cond)
    }

    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> PResult<Cst>,
        ops: &[(Token, BinaryOp)],
    ) -> PResult<Cst> {
        let start = self.location_here();
        let mut left = next(self)?;
        loop {
            let Some((_, op)) = ops.iter().find(|(tok, _)| self.check(tok)) else {
                break;
            };
            self.bump();
            let right = next(self)?;
            let location = start.span(&self.prev_location());
            left = Cst::Binary(*op, Box::new(left), Box::new(right), location);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> PResult<Cst> {
        self.parse_binary_level(Self::parse_and, &[(Token::OrOr, BinaryOp::Or)])
    }

    fn parse_and(&mut self) -> PResult<Cst> {
        self.parse_binary_level(Self::parse_equality, &[(Token::AndAnd, BinaryOp::And)])
    }

    fn parse_equality(&mut self) -> PResult<Cst> {
        self.parse_binary_level(
            Self::parse_relational,
            &[(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::NotEq)],
        )
    }

    fn parse_relational(&mut self) -> PResult<Cst> {
        self.parse_binary_level(
            Self::parse_additive,
            &[
                (Token::LtEq, BinaryOp::LtEq),
                (Token::GtEq, BinaryOp::GtEq),
                (Token::Lt, BinaryOp::Lt),
                (Token::Gt, BinaryOp::Gt),
            ],
        )
    }

    fn parse_additive(&mut self) -> PResult<Cst> {
        self.parse_binary_level(Self::parse_multiplicative, &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)])
    }

    fn parse_multiplicative(&mut self) -> PResult<Cst> {
        self.parse_binary_level(
            Self::parse_unary,
            &[(Token::Star, BinaryOp::Mul), (Token::Slash, BinaryOp::Div), (Token::Percent, BinaryOp::Rem)],
        )
    }

    fn parse_unary(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        if self.eat(&Token::Minus) {
            let operand = self.parse_unary()?;
            return Ok(Cst::Unary(UnaryOp::Neg, Box::new(operand), start.span(&self.prev_location())));
        }
        if self.eat(&Token::Not) {
            let operand = self.parse_unary()?;
            return Ok(Cst::Unary(UnaryOp::Not, Box::new(operand), start.span(&self.prev_location())));
        }
        self.parse_postfix()
    }

    /// Like [`Self::parse_expression`], but relabels a bare "expression"
    /// failure as "function argument" — callers parsing a call's argument
    /// list want that more specific wording in the diagnostic.
    fn parse_call_argument(&mut self) -> PResult<Cst> {
        self.parse_expression().map_err(|(err, loc)| {
            let relabelled = match err {
                ParserError::UnexpectedEof { expected } if expected == "expression" => {
                    ParserError::unexpected_eof("function argument")
                }
                ParserError::Unexpected { expected, found } if expected == "expression" => {
                    ParserError::unexpected("function argument", found)
                }
                other => other,
            };
            (relabelled, loc)
        })
    }

    fn parse_postfix(&mut self) -> PResult<Cst> {
        let start = self.location_here();
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&Token::Dot) {
                let (name, _) = self.expect_ident()?;
                let location = start.span(&self.prev_location());
                expr = Cst::Property(Box::new(expr), name, location);
            } else if self.eat(&Token::LBracket) {
                let index = self.parse_expression()?;
                self.expect(Token::RBracket)?;
                let location = start.span(&self.prev_location());
                expr = Cst::Index(Box::new(expr), Box::new(index), location);
            } else if self.eat(&Token::LParen) {
                let mut args = Vec::new();
                if !self.check(&Token::RParen) {
                    loop {
                        args.push(self.parse_call_argument()?);
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                }
                self.expect(Token::RParen)?;
                let location = start.span(&self.prev_location());
                expr = Cst::Call(Box::new(expr), args, location);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> PResult<Cst> {
        let loc = self.location_here();
        match self.token().clone() {
            Token::Integer(digits) => {
                self.bump();
                Ok(Cst::IntLit(digits, loc))
            }
            Token::Float(digits) => {
                self.bump();
                Ok(Cst::FloatLit(digits, loc))
            }
            Token::Str(value) => {
                self.bump();
                Ok(Cst::StringLit(value, loc))
            }
            Token::Null => {
                self.bump();
                Ok(Cst::Null(loc))
            }
            Token::True => {
                self.bump();
                Ok(Cst::True(loc))
            }
            Token::False => {
                self.bump();
                Ok(Cst::False(loc))
            }
            Token::Ident(name) => {
                self.bump();
                Ok(Cst::Ident(name, loc))
            }
            // A type keyword used in expression position names a manifestation
            // (e.g. `string`, `object`, `type`) rather than beginning a
            // declaration; `looks_like_declaration` already routed the
            // declaration case away from here.
            Token::StringType => {
                self.bump();
                Ok(Cst::Ident("string".to_string(), loc))
            }
            Token::ObjectType => {
                self.bump();
                Ok(Cst::Ident("object".to_string(), loc))
            }
            Token::AnyType => {
                self.bump();
                Ok(Cst::Ident("any".to_string(), loc))
            }
            Token::LParen => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => {
                self.bump();
                let mut elements = Vec::new();
                if !self.check(&Token::RBracket) {
                    loop {
                        elements.push(self.parse_expression()?);
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                }
                self.expect(Token::RBracket)?;
                Ok(Cst::ArrayLit(elements, loc.span(&self.prev_location())))
            }
            Token::LBrace => {
                self.bump();
                let mut entries = Vec::new();
                if !self.check(&Token::RBrace) {
                    loop {
                        let key = match self.token().clone() {
                            Token::Ident(name) => {
                                self.bump();
                                ObjectKey::Ident(name)
                            }
                            Token::Str(value) => {
                                self.bump();
                                ObjectKey::String(value)
                            }
                            _ => return self.unexpected("object key"),
                        };
                        self.expect(Token::Colon)?;
                        let value = self.parse_expression()?;
                        entries.push((key, value));
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                }
                self.expect(Token::RBrace)?;
                Ok(Cst::ObjectLit(entries, loc.span(&self.prev_location())))
            }
            _ => self.unexpected("expression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn parse(text: &str) -> Cst {
        Parser::from_str(Rc::from("test.egg"), text).unwrap().parse_module().unwrap()
    }

    #[test]
    fn parses_hello_world() {
        let module = parse(r#"print("hello");"#);
        match module {
            Cst::Module(stmts, _) => {
                assert_eq!(stmts.len(), 1);
                assert!(matches!(stmts[0], Cst::ExprStatement(_, _)));
            }
            _ => panic!("expected module"),
        }
    }

    #[test]
    fn parses_variable_declaration_and_assignment() {
        let module = parse("int x = 1; x = x + 1;");
        match module {
            Cst::Module(stmts, _) => {
                assert!(matches!(stmts[0], Cst::VarDecl { .. }));
                assert!(matches!(stmts[1], Cst::Assign { .. }));
            }
            _ => panic!("expected module"),
        }
    }

    #[test]
    fn ternary_is_right_associative() {
        let module = parse("var x = true ? 1 : false ? 2 : 3;");
        let Cst::Module(stmts, _) = module else { panic!() };
        let Cst::VarDecl { init, .. } = &stmts[0] else { panic!() };
        match init.as_ref() {
            Cst::Ternary(_, _, else_branch, _) => {
                assert!(matches!(else_branch.as_ref(), Cst::Ternary(_, _, _, _)));
            }
            other => panic!("expected ternary, got {other:?}"),
        }
    }

    #[test]
    fn parses_c_style_for_loop() {
        let module = parse("for (int i = 0; i < 10; i++) { print(i); }");
        let Cst::Module(stmts, _) = module else { panic!() };
        assert!(matches!(stmts[0], Cst::For { .. }));
    }

    #[test]
    fn parses_try_catch_finally() {
        let module = parse("try { assert(false); } catch (object e) { print(e); } finally { print(1); }");
        let Cst::Module(stmts, _) = module else { panic!() };
        let Cst::Try { catches, finally_block, .. } = &stmts[0] else { panic!() };
        assert_eq!(catches.len(), 1);
        assert!(finally_block.is_some());
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = Parser::from_str(Rc::from("test.egg"), "").unwrap().parse_module().unwrap_err();
        assert_eq!(err.0, ParserError::EmptyInput);
    }

    #[test]
    fn reports_expected_but_got_eof() {
        let err = Parser::from_str(Rc::from("test.egg"), "print(1").unwrap().parse_module().unwrap_err();
        assert!(matches!(err.0, ParserError::UnexpectedEof { .. }));
    }

    #[test]
    fn postfix_chains_property_index_and_call() {
        let module = parse("x.y[0](1, 2);");
        let Cst::Module(stmts, _) = module else { panic!() };
        let Cst::ExprStatement(expr, _) = &stmts[0] else { panic!() };
        assert!(matches!(expr.as_ref(), Cst::Call(_, _, _)));
    }
}
