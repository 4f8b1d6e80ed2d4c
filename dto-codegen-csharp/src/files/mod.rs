//! Generated units.

mod dto_unit;

pub use dto_unit::{DtoUnit, GENERATED_HEADER};
