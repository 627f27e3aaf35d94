pub mod limiter;
pub mod mail;
pub mod utils;
