//! Parameter substitution over the expression tree.
//!
//! Only free identifier occurrences are touched. Member names after `.`
//! or `?.`, argument and initializer names, type names and literal text
//! are never identifiers in this sense.

use super::ast::{Arg, Expr, InterpolatedPart, Lambda, same_identifier};

/// Replace every free occurrence of the identifier `from` with `to`.
pub fn rename_parameter(expr: &Expr, from: &str, to: &str) -> Expr {
    let rename = |e: &Expr| Box::new(rename_parameter(e, from, to));
    let rename_args = |args: &[Arg]| -> Vec<Arg> {
        args.iter()
            .map(|arg| Arg {
                name: arg.name.clone(),
                value: rename_parameter(&arg.value, from, to),
            })
            .collect()
    };

    match expr {
        Expr::Ident(name) if same_identifier(name, from) => Expr::Ident(to.to_string()),
        Expr::Ident(_) | Expr::Literal(_) | Expr::TypeOperator { .. } => expr.clone(),
        Expr::Interpolated { prefix, parts } => Expr::Interpolated {
            prefix: prefix.clone(),
            parts: parts
                .iter()
                .map(|part| match part {
                    InterpolatedPart::Text(text) => InterpolatedPart::Text(text.clone()),
                    InterpolatedPart::Hole {
                        expr,
                        alignment,
                        format,
                    } => InterpolatedPart::Hole {
                        expr: rename_parameter(expr, from, to),
                        alignment: alignment.clone(),
                        format: format.clone(),
                    },
                })
                .collect(),
        },
        Expr::Member {
            target,
            name,
            conditional,
        } => Expr::Member {
            target: rename(target),
            name: name.clone(),
            conditional: *conditional,
        },
        Expr::Call { callee, args } => Expr::Call {
            callee: rename(callee),
            args: rename_args(args),
        },
        Expr::Index {
            target,
            args,
            conditional,
        } => Expr::Index {
            target: rename(target),
            args: rename_args(args),
            conditional: *conditional,
        },
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: rename(operand),
        },
        Expr::Binary { op, lhs, rhs } => Expr::Binary {
            op: *op,
            lhs: rename(lhs),
            rhs: rename(rhs),
        },
        Expr::TypeTest { expr, op, ty } => Expr::TypeTest {
            expr: rename(expr),
            op: *op,
            ty: ty.clone(),
        },
        Expr::Conditional {
            condition,
            then,
            otherwise,
        } => Expr::Conditional {
            condition: rename(condition),
            then: rename(then),
            otherwise: rename(otherwise),
        },
        Expr::Cast { ty, expr } => Expr::Cast {
            ty: ty.clone(),
            expr: rename(expr),
        },
        Expr::Paren(inner) => Expr::Paren(rename(inner)),
        Expr::New {
            ty,
            args,
            initializer,
        } => Expr::New {
            ty: ty.clone(),
            args: args.as_deref().map(rename_args),
            initializer: initializer.as_deref().map(rename_args),
        },
        // A nested lambda binding the same name shadows it.
        Expr::Lambda(lambda) if lambda.binds(from) => expr.clone(),
        Expr::Lambda(lambda) => Expr::Lambda(Lambda {
            params: lambda.params.clone(),
            body: rename(&lambda.body),
        }),
    }
}

/// Whether `name` occurs free anywhere in `expr`.
pub fn references(expr: &Expr, name: &str) -> bool {
    let any_arg = |args: &[Arg]| args.iter().any(|arg| references(&arg.value, name));

    match expr {
        Expr::Ident(ident) => same_identifier(ident, name),
        Expr::Literal(_) | Expr::TypeOperator { .. } => false,
        Expr::Interpolated { parts, .. } => parts.iter().any(|part| match part {
            InterpolatedPart::Text(_) => false,
            InterpolatedPart::Hole { expr, .. } => references(expr, name),
        }),
        Expr::Member { target, .. } => references(target, name),
        Expr::Call { callee, args } => references(callee, name) || any_arg(args),
        Expr::Index { target, args, .. } => references(target, name) || any_arg(args),
        Expr::Unary { operand, .. } => references(operand, name),
        Expr::Binary { lhs, rhs, .. } => references(lhs, name) || references(rhs, name),
        Expr::TypeTest { expr, .. } | Expr::Cast { expr, .. } => references(expr, name),
        Expr::Conditional {
            condition,
            then,
            otherwise,
        } => {
            references(condition, name) || references(then, name) || references(otherwise, name)
        }
        Expr::Paren(inner) => references(inner, name),
        Expr::New {
            args, initializer, ..
        } => args.as_deref().is_some_and(any_arg) || initializer.as_deref().is_some_and(any_arg),
        Expr::Lambda(lambda) => !lambda.binds(name) && references(&lambda.body, name),
    }
}

/// Whether renaming the free identifier `from` to `to` would move one of
/// its occurrences under a nested lambda that itself binds `to`.
pub fn captured_by_rename(expr: &Expr, from: &str, to: &str) -> bool {
    match expr {
        Expr::Lambda(lambda) if lambda.binds(from) => false,
        Expr::Lambda(lambda) if lambda.binds(to) => references(&lambda.body, from),
        _ => expr
            .children()
            .into_iter()
            .any(|child| captured_by_rename(child, from, to)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse_expression;

    fn renamed(src: &str, from: &str) -> String {
        rename_parameter(&parse_expression(src).unwrap(), from, "entity").to_string()
    }

    #[test]
    fn test_renames_free_identifiers() {
        assert_eq!(
            renamed("u.FirstName + \" · \" + u.LastName", "u"),
            "entity.FirstName + \" · \" + entity.LastName"
        );
    }

    #[test]
    fn test_member_names_untouched() {
        assert_eq!(renamed("u.u + x.u", "u"), "entity.u + x.u");
        assert_eq!(renamed("a?.u", "u"), "a?.u");
    }

    #[test]
    fn test_verbatim_identifier_matches() {
        assert_eq!(renamed("@u.Age", "u"), "entity.Age");
        assert_eq!(renamed("u.Age", "@u"), "entity.Age");
    }

    #[test]
    fn test_named_arguments_and_initializers_untouched() {
        assert_eq!(renamed("F(u: u)", "u"), "F(u: entity)");
        assert_eq!(
            renamed("new Pair { u = u.Age }", "u"),
            "new Pair { u = entity.Age }"
        );
    }

    #[test]
    fn test_string_literals_untouched() {
        assert_eq!(renamed("\"u\" + u", "u"), "\"u\" + entity");
    }

    #[test]
    fn test_interpolation_holes_renamed() {
        assert_eq!(
            renamed("$\"{u.FirstName} u {u.Age:D2}\"", "u"),
            "$\"{entity.FirstName} u {entity.Age:D2}\""
        );
    }

    #[test]
    fn test_nested_lambda_shadowing() {
        assert_eq!(
            renamed("u.Orders.Sum(u => u.Total)", "u"),
            "entity.Orders.Sum(u => u.Total)"
        );
        assert_eq!(
            renamed("u.Orders.Where(o => o.Owner == u.Id)", "u"),
            "entity.Orders.Where(o => o.Owner == entity.Id)"
        );
    }

    #[test]
    fn test_type_operands_untouched() {
        assert_eq!(
            renamed("typeof(u) == u.GetType() ? default(u) : u", "u"),
            "typeof(u) == entity.GetType() ? default(u) : entity"
        );
    }

    #[test]
    fn test_captured_by_rename() {
        let capturing = parse_expression("u.Items.Where(entity => entity.Owner == u.Id)").unwrap();
        assert!(captured_by_rename(&capturing, "u", "entity"));

        let harmless = parse_expression("u.Items.Where(entity => entity.Owner > 0)").unwrap();
        assert!(!captured_by_rename(&harmless, "u", "entity"));

        let shadowed = parse_expression("u.Items.Select(u => u.Items.Where(entity => entity == u))").unwrap();
        assert!(!captured_by_rename(&shadowed, "u", "entity"));

        let nested = parse_expression("u.A.Select(x => x.B.Where(entity => entity.C == u.D))").unwrap();
        assert!(captured_by_rename(&nested, "u", "entity"));
    }

    #[test]
    fn test_references() {
        let expr = parse_expression("entity.Age + items.Count(entity => entity.X)").unwrap();
        assert!(references(&expr, "entity"));
        assert!(references(&expr, "items"));
        assert!(!references(&expr, "Age"));

        let shadowed = parse_expression("items.Count(entity => entity.X)").unwrap();
        assert!(!references(&shadowed, "entity"));
    }
}
