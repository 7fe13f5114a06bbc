pub mod otp;
mod query;
pub(crate) mod repository;
mod root;
mod signup;

pub use query::*;
pub use root::*;
pub use signup::*;
