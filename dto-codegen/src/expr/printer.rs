//! Stable pretty-printer.
//!
//! Binary, conditional and lambda operators get single spaces, everything
//! else is printed tight. Parentheses appear only where the source had them.

use std::fmt;

use super::ast::{Arg, Expr, InterpolatedPart, Lambda, Param, UnaryOp};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Literal(raw) => f.write_str(raw),
            Self::Interpolated { prefix, parts } => {
                write!(f, "{}\"", prefix)?;
                for part in parts {
                    write!(f, "{}", part)?;
                }
                f.write_str("\"")
            }
            Self::Member {
                target,
                name,
                conditional,
            } => {
                let dot = if *conditional { "?." } else { "." };
                write!(f, "{}{}{}", target, dot, name)
            }
            Self::Call { callee, args } => write!(f, "{}({})", callee, ArgList(args, ": ")),
            Self::Index {
                target,
                args,
                conditional,
            } => {
                let q = if *conditional { "?" } else { "" };
                write!(f, "{}{}[{}]", target, q, ArgList(args, ": "))
            }
            Self::Unary {
                op: UnaryOp::NullForgiving,
                operand,
            } => write!(f, "{}!", operand),
            Self::Unary { op, operand } => {
                let operand = operand.to_string();
                // `- -x` must not print as the decrement operator.
                let space = matches!(
                    (op, operand.chars().next()),
                    (UnaryOp::Negate, Some('-')) | (UnaryOp::Plus, Some('+'))
                );
                let sep = if space { " " } else { "" };
                write!(f, "{}{}{}", op.as_str(), sep, operand)
            }
            Self::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Self::TypeTest { expr, op, ty } => write!(f, "{} {} {}", expr, op.as_str(), ty),
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => write!(f, "{} ? {} : {}", condition, then, otherwise),
            Self::Cast { ty, expr } => write!(f, "({}){}", ty, expr),
            Self::TypeOperator { keyword, ty } => write!(f, "{}({})", keyword, ty),
            Self::Paren(inner) => write!(f, "({})", inner),
            Self::New {
                ty,
                args,
                initializer,
            } => {
                f.write_str("new")?;
                if !ty.is_empty() {
                    write!(f, " {}", ty)?;
                }
                if let Some(args) = args {
                    write!(f, "({})", ArgList(args, ": "))?;
                }
                match initializer.as_deref() {
                    Some([]) => f.write_str(" { }")?,
                    Some(entries) => write!(f, " {{ {} }}", ArgList(entries, " = "))?,
                    None => {}
                }
                Ok(())
            }
            Self::Lambda(lambda) => write!(f, "{}", lambda),
        }
    }
}

impl fmt::Display for InterpolatedPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Hole {
                expr,
                alignment,
                format,
            } => {
                write!(f, "{{{}", expr)?;
                if let Some(alignment) = alignment {
                    write!(f, ",{}", alignment)?;
                }
                if let Some(format) = format {
                    write!(f, ":{}", format)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params.as_slice() {
            [Param { ty: None, name }] => write!(f, "{} => {}", name, self.body),
            params => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(ty) = &param.ty {
                        write!(f, "{} ", ty)?;
                    }
                    f.write_str(&param.name)?;
                }
                write!(f, ") => {}", self.body)
            }
        }
    }
}

/// Comma-separated entries; named entries use `separator` between name and value.
struct ArgList<'a>(&'a [Arg], &'static str);

impl fmt::Display for ArgList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(name) = &arg.name {
                write!(f, "{}{}", name, self.1)?;
            }
            write!(f, "{}", arg.value)?;
        }
        Ok(())
    }
}
