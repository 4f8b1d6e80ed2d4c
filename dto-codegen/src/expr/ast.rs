//! Syntax tree for the supported C# expression subset.
//!
//! Literals, type names and operator spellings are stored exactly as
//! written, so printing a tree reproduces its source modulo whitespace.

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier or keyword-like name (`this`, `base`, `default`).
    Ident(String),
    /// Number, string, character, `true`, `false` or `null`.
    Literal(String),
    Interpolated {
        prefix: String,
        parts: Vec<InterpolatedPart>,
    },
    Member {
        target: Box<Expr>,
        name: String,
        conditional: bool,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Arg>,
    },
    Index {
        target: Box<Expr>,
        args: Vec<Arg>,
        conditional: bool,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: &'static str,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `x is T`, `x is not T`, `x as T`.
    TypeTest {
        expr: Box<Expr>,
        op: TypeTestOp,
        ty: String,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Cast {
        ty: String,
        expr: Box<Expr>,
    },
    /// `typeof(T)`, `default(T)` or `sizeof(T)`; the operand is a type,
    /// never a value.
    TypeOperator {
        keyword: String,
        ty: String,
    },
    Paren(Box<Expr>),
    New {
        ty: String,
        args: Option<Vec<Arg>>,
        /// Object or collection initializer; named entries are
        /// `Member = value` assignments.
        initializer: Option<Vec<Arg>>,
    },
    Lambda(Lambda),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    Complement,
    /// Postfix `!`.
    NullForgiving,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Not | Self::NullForgiving => "!",
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Complement => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTestOp {
    Is,
    IsNot,
    As,
}

impl TypeTestOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::As => "as",
        }
    }
}

/// Invocation, indexer or initializer entry, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolatedPart {
    /// Raw text, braces already doubled.
    Text(String),
    Hole {
        expr: Expr,
        alignment: Option<String>,
        format: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<Param>,
    pub body: Box<Expr>,
}

impl Lambda {
    /// Whether a parameter named `name` shadows outer references.
    pub fn binds(&self, name: &str) -> bool {
        self.params
            .iter()
            .any(|p| same_identifier(&p.name, name))
    }
}

impl Expr {
    /// Direct subexpressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        fn values(args: &[Arg]) -> impl Iterator<Item = &Expr> {
            args.iter().map(|arg| &arg.value)
        }

        match self {
            Self::Ident(_) | Self::Literal(_) | Self::TypeOperator { .. } => Vec::new(),
            Self::Interpolated { parts, .. } => parts
                .iter()
                .filter_map(|part| match part {
                    InterpolatedPart::Text(_) => None,
                    InterpolatedPart::Hole { expr, .. } => Some(expr),
                })
                .collect(),
            Self::Member { target, .. } => vec![target.as_ref()],
            Self::Call { callee, args } => {
                let mut out = vec![callee.as_ref()];
                out.extend(values(args));
                out
            }
            Self::Index { target, args, .. } => {
                let mut out = vec![target.as_ref()];
                out.extend(values(args));
                out
            }
            Self::Unary { operand, .. } => vec![operand.as_ref()],
            Self::Binary { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            Self::TypeTest { expr, .. } | Self::Cast { expr, .. } => vec![expr.as_ref()],
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => vec![condition.as_ref(), then.as_ref(), otherwise.as_ref()],
            Self::Paren(inner) => vec![inner.as_ref()],
            Self::New {
                args, initializer, ..
            } => args
                .iter()
                .chain(initializer.iter())
                .flat_map(|args| values(args))
                .collect(),
            Self::Lambda(lambda) => vec![lambda.body.as_ref()],
        }
    }
}

/// C# treats `@x` and `x` as the same identifier.
pub fn same_identifier(a: &str, b: &str) -> bool {
    a.strip_prefix('@').unwrap_or(a) == b.strip_prefix('@').unwrap_or(b)
}
