mod fetch;
mod parse;

pub use fetch::*;
pub use parse::*;
