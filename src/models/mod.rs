pub mod field;

pub use self::field::{Model, VALUE_PROPERTY};
