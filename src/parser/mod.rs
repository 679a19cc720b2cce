mod api;
pub mod ast;
pub mod lexer;
pub mod token;

pub use api::JsParser;
