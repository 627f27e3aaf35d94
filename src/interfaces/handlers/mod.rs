pub mod contact_me;
pub mod json_error;
pub mod system;
