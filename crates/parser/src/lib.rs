pub mod lexer;
pub mod parser;

#[cfg(test)]
mod tests;

pub use lexer::{Lexer, SpannedToken, Token};
pub use parser::Parser;
