mod aggregate;
mod query;
mod root;

pub use aggregate::*;
pub use query::*;
pub use root::*;
