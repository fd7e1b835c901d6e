mod field;
mod form;
mod list;

pub use crate::field::*;
pub use crate::form::*;
pub use crate::list::*;
