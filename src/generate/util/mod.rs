pub mod disk;
pub mod prompt;
pub mod resolve;
