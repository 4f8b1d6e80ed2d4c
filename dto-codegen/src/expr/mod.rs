//! C# expression handling for virtual properties.
//!
//! A member body such as `u => u.FirstName + " " + u.LastName` is lexed,
//! parsed into a small AST, has its single lambda parameter renamed to the
//! canonical identifier and is printed back as text that can be spliced
//! into generated code:
//!
//! ```
//! use dtogen_codegen::expr::normalize_lambda;
//!
//! let body = normalize_lambda("u => u.FirstName + \" \" + u.LastName", "entity").unwrap();
//! assert_eq!(body, "entity.FirstName + \" \" + entity.LastName");
//! ```

mod ast;
mod error;
mod parser;
mod printer;
mod rewrite;
mod token;

pub use ast::{
    Arg, Expr, InterpolatedPart, Lambda, Param, TypeTestOp, UnaryOp, same_identifier,
};
pub use error::ExprError;
pub use parser::{parse_expression, parse_lambda_body};
pub use rewrite::{captured_by_rename, references, rename_parameter};

/// Name every virtual-property expression refers to its source entity by.
pub const CANONICAL_PARAMETER: &str = "entity";

/// Parse a single-parameter lambda body and return its body text with the
/// parameter renamed to `parameter`.
pub fn normalize_lambda(body: &str, parameter: &str) -> Result<String, ExprError> {
    let lambda = parse_lambda_body(body)?;
    let [param] = lambda.params.as_slice() else {
        return Err(ExprError::ParameterCount(lambda.params.len()));
    };

    if !same_identifier(&param.name, parameter)
        && (references(&lambda.body, parameter)
            || captured_by_rename(&lambda.body, &param.name, parameter))
    {
        return Err(ExprError::Capture(parameter.to_string()));
    }

    let text = rename_parameter(&lambda.body, &param.name, parameter).to_string();
    if text.trim().is_empty() {
        return Err(ExprError::EmptyBody);
    }
    Ok(text)
}
