pub mod args;
pub mod handlers;
