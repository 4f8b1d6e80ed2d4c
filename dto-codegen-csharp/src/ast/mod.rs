//! C# syntax nodes for generating transfer types.
//!
//! These provide a high-level API for constructing the handful of C#
//! declarations a transfer type needs, rendered through [`Renderable`].
//!
//! [`Renderable`]: dtogen_codegen::builder::Renderable

mod class;
mod init;
mod methods;
mod property;

pub use class::{Class, Namespace};
pub use init::ObjectInit;
pub use methods::{Method, Param};
pub use property::Property;
