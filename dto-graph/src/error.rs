use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Snapshot errors are boxed; they carry the whole source text.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The snapshot text being parsed, shared by every error raised against it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    fn source_code(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Wrap a TOML syntax or shape error, keeping its span when it has one.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            span: source.span().map(SourceSpan::from),
            src: self.source_code(),
            source,
        })
    }

    pub fn duplicate_type_error(&self, name: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::DuplicateType {
            src: self.source_code(),
            span,
            name: name.into(),
        })
    }

    /// `context` names what the identifier was used as, e.g. `member in 'User'`.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.source_code(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn inheritance_cycle_error(&self, name: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::InheritanceCycle {
            src: self.source_code(),
            span,
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("export a symbol snapshot from the host toolchain first"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse symbol snapshot")]
    #[diagnostic(code(dtogen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("type '{name}' is declared more than once")]
    #[diagnostic(
        code(dtogen::duplicate_type),
        help("each qualified type name may appear only once in a snapshot")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicate declaration")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(dtogen::invalid_identifier),
        help(
            "use letters, digits and underscores, starting with a letter or underscore; prefix keywords with '@'"
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("type '{name}' inherits from itself")]
    #[diagnostic(
        code(dtogen::inheritance_cycle),
        help("break the cycle in the 'base' chain")
    )]
    InheritanceCycle {
        #[source_code]
        src: NamedSource<String>,
        #[label("cycle starts here")]
        span: Option<SourceSpan>,
        name: String,
    },
}
