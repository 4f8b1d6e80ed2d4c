//! Recursive-descent parser following C# operator precedence.

use super::ast::{Arg, Expr, InterpolatedPart, Lambda, Param, TypeTestOp, UnaryOp};
use super::token::{RawPart, Token, TokenKind, tokenize};
use super::ExprError;

type Result<T> = std::result::Result<T, ExprError>;

/// Binary operator levels, loosest first. `??` and `?:` sit above these.
const LEVELS: &[&[&str]] = &[
    &["||"],
    &["&&"],
    &["|"],
    &["^"],
    &["&"],
    &["==", "!="],
    &["<", ">", "<=", ">="],
    &["<<", ">>"],
    &["+", "-"],
    &["*", "/", "%"],
];

const RELATIONAL: usize = 6;
const SHIFT: usize = 7;

const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "nint", "nuint",
    "object", "sbyte", "short", "string", "uint", "ulong", "ushort",
];

/// Parse a complete expression.
pub fn parse_expression(src: &str) -> Result<Expr> {
    parse_at(src, 0)
}

fn parse_at(src: &str, base: usize) -> Result<Expr> {
    let mut parser = Parser::new(tokenize(src, base)?);
    if parser.at_end() {
        return Err(ExprError::EmptyBody);
    }
    let expr = parser.expression()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Parse a member body down to its lambda.
///
/// Accepts the lambda itself, an expression-bodied form (`=> u => ...`),
/// an initializer (`= u => ...`), or a block whose only statement is
/// `return <lambda>;`. A trailing `;` is allowed.
pub fn parse_lambda_body(src: &str) -> Result<Lambda> {
    let mut parser = Parser::new(tokenize(src, 0)?);
    if parser.at_end() {
        return Err(ExprError::EmptyBody);
    }

    if !parser.eat_punct("=>") {
        parser.eat_punct("=");
    }

    let expr = if parser.eat_punct("{") {
        parser.expect_keyword("return")?;
        let expr = parser.expression()?;
        parser.expect_punct(";")?;
        parser.expect_punct("}")?;
        expr
    } else {
        let expr = parser.expression()?;
        parser.eat_punct(";");
        expr
    };
    parser.expect_end()?;

    let mut expr = expr;
    while let Expr::Paren(inner) = expr {
        expr = *inner;
    }
    match expr {
        Expr::Lambda(lambda) => Ok(lambda),
        _ => Err(ExprError::NotALambda),
    }
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek_at(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.peek_at(0)
    }

    fn is_punct_at(&self, n: usize, p: &str) -> bool {
        matches!(self.peek_at(n), Some(TokenKind::Punct(q)) if *q == p)
    }

    fn is_punct(&self, p: &str) -> bool {
        self.is_punct_at(0, p)
    }

    fn is_keyword_at(&self, n: usize, kw: &str) -> bool {
        matches!(self.peek_at(n), Some(TokenKind::Ident(name)) if name == kw)
    }

    /// Tokens `n` and `n + 1` touch with no whitespace between them.
    fn adjacent(&self, n: usize) -> bool {
        match (self.tokens.get(self.pos + n), self.tokens.get(self.pos + n + 1)) {
            (Some(a), Some(b)) => a.end == b.start,
            _ => false,
        }
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.is_punct(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> Result<()> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if self.is_keyword_at(0, kw) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> ExprError {
        match self.tokens.get(self.pos) {
            Some(token) => ExprError::UnexpectedToken {
                found: token.kind.describe(),
                pos: token.start,
            },
            None => ExprError::UnexpectedEnd,
        }
    }

    pub(crate) fn expression(&mut self) -> Result<Expr> {
        if let Some(lambda) = self.try_lambda()? {
            return Ok(Expr::Lambda(lambda));
        }
        self.conditional()
    }

    fn try_lambda(&mut self) -> Result<Option<Lambda>> {
        let params = if let Some(TokenKind::Ident(name)) = self.peek()
            && self.is_punct_at(1, "=>")
        {
            let params = vec![Param {
                ty: None,
                name: name.clone(),
            }];
            self.pos += 2;
            params
        } else if self.is_punct("(") {
            let Some(close) = self.matching_close(self.pos) else {
                return Ok(None);
            };
            if !matches!(
                self.tokens.get(close + 1).map(|t| &t.kind),
                Some(TokenKind::Punct("=>"))
            ) {
                return Ok(None);
            }
            let params = self.lambda_params(self.pos + 1, close)?;
            self.pos = close + 2;
            params
        } else {
            return Ok(None);
        };

        if self.is_punct("{") {
            // Statement lambdas cannot appear in expression trees.
            return Err(self.unexpected());
        }

        let body = self.expression()?;
        Ok(Some(Lambda {
            params,
            body: Box::new(body),
        }))
    }

    /// Index of the bracket closing the one at `open`.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::Punct("(" | "[" | "{") => depth += 1,
                TokenKind::Punct(")" | "]" | "}") => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Parameters in `tokens[start..end]`, e.g. `x`, `User u, int n`.
    fn lambda_params(&self, start: usize, end: usize) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        if start == end {
            return Ok(params);
        }

        let mut group: Vec<&Token> = Vec::new();
        let mut depth = 0usize;
        for token in &self.tokens[start..=end] {
            let boundary = token.start == self.tokens[end].start
                || (depth == 0 && token.kind == TokenKind::Punct(","));
            if boundary {
                params.push(param_from_tokens(&group)?);
                group.clear();
                continue;
            }
            match token.kind {
                TokenKind::Punct("<" | "(" | "[") => depth += 1,
                TokenKind::Punct(">" | ")" | "]") => depth = depth.saturating_sub(1),
                _ => {}
            }
            group.push(token);
        }

        Ok(params)
    }

    fn conditional(&mut self) -> Result<Expr> {
        let condition = self.coalesce()?;
        if !self.eat_punct("?") {
            return Ok(condition);
        }
        let then = self.expression()?;
        self.expect_punct(":")?;
        let otherwise = self.expression()?;
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn coalesce(&mut self) -> Result<Expr> {
        let lhs = self.binary(0)?;
        if !self.eat_punct("??") {
            return Ok(lhs);
        }
        let rhs = if let Some(lambda) = self.try_lambda()? {
            Expr::Lambda(lambda)
        } else {
            self.coalesce()?
        };
        Ok(Expr::Binary {
            op: "??",
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn binary(&mut self, level: usize) -> Result<Expr> {
        if level == LEVELS.len() {
            return self.unary();
        }

        let mut lhs = self.binary(level + 1)?;
        loop {
            if level == RELATIONAL
                && let Some(op) = self.type_test_op()
            {
                let ty = self.type_name(false)?;
                lhs = Expr::TypeTest {
                    expr: Box::new(lhs),
                    op,
                    ty,
                };
                continue;
            }

            let Some(op) = self.binary_op(level) else {
                break;
            };
            let rhs = self.binary(level + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn binary_op(&mut self, level: usize) -> Option<&'static str> {
        // `>>` is lexed as two `>` so generic argument lists can close.
        if level == SHIFT && self.is_punct(">") && self.is_punct_at(1, ">") && self.adjacent(0) {
            self.pos += 2;
            return Some(">>");
        }
        if level == RELATIONAL && self.is_punct(">") && self.is_punct_at(1, ">") && self.adjacent(0)
        {
            return None;
        }

        match self.peek() {
            Some(TokenKind::Punct(p)) if LEVELS[level].contains(p) => {
                let op = *p;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn type_test_op(&mut self) -> Option<TypeTestOp> {
        let op = if self.is_keyword_at(0, "as") {
            TypeTestOp::As
        } else if self.is_keyword_at(0, "is") && self.is_keyword_at(1, "not") {
            self.pos += 1;
            TypeTestOp::IsNot
        } else if self.is_keyword_at(0, "is") {
            TypeTestOp::Is
        } else {
            return None;
        };
        self.pos += 1;
        Some(op)
    }

    fn unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            Some(TokenKind::Punct("!")) => UnaryOp::Not,
            Some(TokenKind::Punct("-")) => UnaryOp::Negate,
            Some(TokenKind::Punct("+")) => UnaryOp::Plus,
            Some(TokenKind::Punct("~")) => UnaryOp::Complement,
            _ => {
                if self.is_punct("(")
                    && let Some(cast) = self.try_cast()?
                {
                    return Ok(cast);
                }
                return self.postfix();
            }
        };
        self.pos += 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(self.unary()?),
        })
    }

    /// `(T)x`, decided the way C# disambiguates casts from parenthesized
    /// expressions.
    fn try_cast(&mut self) -> Result<Option<Expr>> {
        let start = self.pos;
        self.pos += 1;

        let ty = match self.type_name(true) {
            Ok(ty) if self.is_punct(")") => ty,
            _ => {
                self.pos = start;
                return Ok(None);
            }
        };
        self.pos += 1;

        let predefined = PREDEFINED_TYPES.contains(&ty.trim_end_matches('?'));
        let is_cast = match self.peek() {
            Some(TokenKind::Ident(name)) => !matches!(name.as_str(), "is" | "as"),
            Some(TokenKind::Literal(_) | TokenKind::Interpolated { .. }) => true,
            Some(TokenKind::Punct("(" | "~" | "!")) => true,
            Some(TokenKind::Punct("-" | "+")) => predefined,
            _ => false,
        };

        if !is_cast {
            self.pos = start;
            return Ok(None);
        }

        let expr = self.unary()?;
        Ok(Some(Expr::Cast {
            ty,
            expr: Box::new(expr),
        }))
    }

    fn postfix(&mut self) -> Result<Expr> {
        let mut expr = self.atom()?;

        loop {
            if self.eat_punct(".") {
                let name = self.ident()?;
                expr = Expr::Member {
                    target: Box::new(expr),
                    name,
                    conditional: false,
                };
            } else if self.eat_punct("?.") {
                let name = self.ident()?;
                expr = Expr::Member {
                    target: Box::new(expr),
                    name,
                    conditional: true,
                };
            } else if self.is_punct("(") {
                let args = self.arguments("(", ")", ":")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.is_punct("[") {
                let args = self.arguments("[", "]", ":")?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    args,
                    conditional: false,
                };
            } else if self.is_punct("?") && self.is_punct_at(1, "[") && self.adjacent(0) {
                self.pos += 1;
                let args = self.arguments("[", "]", ":")?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    args,
                    conditional: true,
                };
            } else if self.eat_punct("!") {
                expr = Expr::Unary {
                    op: UnaryOp::NullForgiving,
                    operand: Box::new(expr),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma-separated entries between `open` and `close`. An entry
    /// `name <separator> value` is named.
    fn arguments(&mut self, open: &str, close: &str, separator: &str) -> Result<Vec<Arg>> {
        self.expect_punct(open)?;
        let mut args = Vec::new();
        if self.eat_punct(close) {
            return Ok(args);
        }

        loop {
            let name = match self.peek() {
                Some(TokenKind::Ident(name))
                    if self.is_punct_at(1, separator) && !self.is_punct_at(2, separator) =>
                {
                    let name = name.clone();
                    self.pos += 2;
                    Some(name)
                }
                _ => None,
            };
            let value = self.expression()?;
            args.push(Arg { name, value });

            if self.eat_punct(close) {
                return Ok(args);
            }
            self.expect_punct(",")?;
            // Trailing comma in initializers.
            if close == "}" && self.eat_punct(close) {
                return Ok(args);
            }
        }
    }

    fn atom(&mut self) -> Result<Expr> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(ExprError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Ident(name) => match name.as_str() {
                "new" => self.new_expr(),
                "true" | "false" | "null" => {
                    self.pos += 1;
                    Ok(Expr::Literal(name))
                }
                "typeof" | "default" | "sizeof" if self.is_punct_at(1, "(") => {
                    self.pos += 2;
                    let ty = self.type_name(true)?;
                    self.expect_punct(")")?;
                    Ok(Expr::TypeOperator { keyword: name, ty })
                }
                "global" if self.is_punct_at(1, ":") && self.is_punct_at(2, ":") => {
                    self.pos += 3;
                    let name = self.ident()?;
                    Ok(Expr::Ident(format!("global::{}", name)))
                }
                _ => {
                    self.pos += 1;
                    Ok(Expr::Ident(name))
                }
            },
            TokenKind::Literal(raw) => {
                self.pos += 1;
                Ok(Expr::Literal(raw))
            }
            TokenKind::Interpolated { prefix, parts } => {
                self.pos += 1;
                let parts = parts
                    .into_iter()
                    .map(|part| match part {
                        RawPart::Text(text) => Ok(InterpolatedPart::Text(text)),
                        RawPart::Hole {
                            source,
                            offset,
                            alignment,
                            format,
                        } => Ok(InterpolatedPart::Hole {
                            expr: parse_at(&source, offset)?,
                            alignment,
                            format,
                        }),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Expr::Interpolated { prefix, parts })
            }
            TokenKind::Punct("(") => {
                self.pos += 1;
                let inner = self.expression()?;
                self.expect_punct(")")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            TokenKind::Punct(_) => Err(self.unexpected()),
        }
    }

    fn new_expr(&mut self) -> Result<Expr> {
        self.pos += 1;

        let ty = if self.is_punct("{") {
            String::new()
        } else {
            self.type_name(true)?
        };
        let args = if self.is_punct("(") {
            Some(self.arguments("(", ")", ":")?)
        } else {
            None
        };
        let initializer = if self.is_punct("{") {
            Some(self.arguments("{", "}", "=")?)
        } else {
            None
        };

        if args.is_none() && initializer.is_none() {
            return Err(self.unexpected());
        }

        Ok(Expr::New {
            ty,
            args,
            initializer,
        })
    }

    /// A type name: qualified identifier, generic arguments, `?` and `[]`.
    fn type_name(&mut self, allow_nullable: bool) -> Result<String> {
        let mut out = String::new();

        if self.is_keyword_at(0, "global") && self.is_punct_at(1, ":") && self.is_punct_at(2, ":")
        {
            self.pos += 3;
            out.push_str("global::");
        }

        out.push_str(&self.ident()?);
        while self.is_punct(".") && matches!(self.peek_at(1), Some(TokenKind::Ident(_))) {
            self.pos += 1;
            out.push('.');
            out.push_str(&self.ident()?);
        }

        if self.eat_punct("<") {
            out.push('<');
            loop {
                out.push_str(&self.type_name(true)?);
                if self.eat_punct(",") {
                    out.push_str(", ");
                } else {
                    break;
                }
            }
            self.expect_punct(">")?;
            out.push('>');
        }

        if allow_nullable
            && self.is_punct("?")
            && matches!(
                self.peek_at(1),
                Some(TokenKind::Ident(_) | TokenKind::Punct(")" | ">" | "," | "(" | "[" | "{"))
            )
        {
            self.pos += 1;
            out.push('?');
        }

        while self.is_punct("[") && self.is_punct_at(1, "]") {
            self.pos += 2;
            out.push_str("[]");
        }

        Ok(out)
    }
}

fn param_from_tokens(tokens: &[&Token]) -> Result<Param> {
    let Some((last, rest)) = tokens.split_last() else {
        return Err(ExprError::UnexpectedEnd);
    };
    let TokenKind::Ident(name) = &last.kind else {
        return Err(ExprError::UnexpectedToken {
            found: last.kind.describe(),
            pos: last.start,
        });
    };

    let ty = if rest.is_empty() {
        None
    } else {
        let mut ty = String::new();
        let mut previous_ident = false;
        for token in rest {
            match &token.kind {
                TokenKind::Ident(part) => {
                    if previous_ident {
                        ty.push(' ');
                    }
                    ty.push_str(part);
                    previous_ident = true;
                }
                TokenKind::Punct(",") => {
                    ty.push_str(", ");
                    previous_ident = false;
                }
                TokenKind::Punct(p) => {
                    ty.push_str(p);
                    previous_ident = false;
                }
                other => {
                    return Err(ExprError::UnexpectedToken {
                        found: other.describe(),
                        pos: token.start,
                    });
                }
            }
        }
        Some(ty)
    };

    Ok(Param {
        ty,
        name: name.clone(),
    })
}
