mod otp;
mod service;
pub(crate) mod template;

pub use otp::*;
pub use service::*;
