//! Appender implementations

pub mod console;
pub mod file;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::RotatingFileAppender;

pub use crate::core::Appender;
