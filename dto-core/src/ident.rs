//! Identifier helpers for emitted C# code.

/// Reserved C# keywords that need an `@` prefix to be used as identifiers.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

/// Check whether a name is a reserved C# keyword.
pub fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Check whether a name is a syntactically valid C# identifier.
///
/// Accepts a leading `@` verbatim prefix. Keywords are valid only when
/// prefixed.
pub fn is_valid_identifier(name: &str) -> bool {
    let (verbatim, bare) = match name.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    let mut chars = bare.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }

    verbatim || !is_csharp_keyword(bare)
}

/// Prefix a keyword with `@` so it can be used as an identifier.
pub fn escape_identifier(name: &str) -> String {
    if is_csharp_keyword(name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Join a namespace and a type name; the global namespace is empty.
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
