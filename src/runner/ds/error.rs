use thiserror::Error;

use crate::parser::ast::Meta;

/// Kind of failure, carrying its description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JErrorType {
    #[error("{0}")]
    SyntaxError(String),
    #[error("{0}")]
    TypeError(String),
    #[error("{0}")]
    ReferenceError(String),
    #[error("{0}")]
    RangeError(String),
    #[error("{0}")]
    TimeoutError(String),
}

impl JErrorType {
    pub fn message(&self) -> &str {
        match self {
            JErrorType::SyntaxError(m)
            | JErrorType::TypeError(m)
            | JErrorType::ReferenceError(m)
            | JErrorType::RangeError(m)
            | JErrorType::TimeoutError(m) => m,
        }
    }

    pub fn at(self, meta: &Meta) -> JsError {
        JsError {
            kind: self,
            location: meta.clone(),
        }
    }
}

/// Located error. Renders as `Line L, column C: <message>`.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{}: {}", position(.location), .kind)]
pub struct JsError {
    pub kind: JErrorType,
    pub location: Meta,
}

fn position(meta: &Meta) -> String {
    let (line, column) = meta.line_and_column();
    format!("Line {}, column {}", line, column)
}

impl JsError {
    pub fn message(&self) -> &str {
        self.kind.message()
    }

    pub fn line(&self) -> usize {
        self.location.line_and_column().0
    }

    pub fn column(&self) -> usize {
        self.location.line_and_column().1
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, JErrorType::TimeoutError(_))
    }

    /// Same kind, with the rendered location folded into the message. Used
    /// when a native re-raises an error from a nested script.
    pub fn into_native_error(self) -> JErrorType {
        let message = self.to_string();
        match self.kind {
            JErrorType::SyntaxError(_) => JErrorType::SyntaxError(message),
            JErrorType::TypeError(_) => JErrorType::TypeError(message),
            JErrorType::ReferenceError(_) => JErrorType::ReferenceError(message),
            JErrorType::RangeError(_) => JErrorType::RangeError(message),
            JErrorType::TimeoutError(_) => JErrorType::TimeoutError(message),
        }
    }
}
