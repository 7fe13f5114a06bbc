mod query;
mod root;
mod slug;
mod taxonomy;

pub use query::*;
pub use root::*;
pub use slug::slugify;
pub use taxonomy::*;
