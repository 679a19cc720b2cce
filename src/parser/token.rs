use std::collections::HashSet;
use std::fmt;

use super::ast::{LiteralType, Meta};

lazy_static! {
    pub static ref KEYWORDS: HashSet<&'static str> = [
        "var", "if", "else", "do", "null", "while", "for", "break", "continue", "undefined",
        "function", "return", "true", "false", "new", "typeof", "instanceof", "Infinity", "try",
        "catch", "throw", "const", "let", "import", "await", "debugger", "switch", "default",
        "with", "yield", "in", "extends", "export", "finally", "super", "this", "enum",
        "implements", "interface", "package", "private", "protected", "public", "static",
        "volatile", "abstract", "float", "synchronized", "boolean", "goto", "int", "long",
        "native", "short", "transient",
    ]
    .iter()
    .cloned()
    .collect();
    pub static ref MIN_KEYWORD_LENGTH: usize = KEYWORDS.iter().map(|k| k.len()).min().unwrap_or(0);
    pub static ref MAX_KEYWORD_LENGTH: usize = KEYWORDS.iter().map(|k| k.len()).max().unwrap_or(0);
    /// Longest operators first, so a prefix scan yields the longest match.
    pub static ref OPERATORS: Vec<&'static str> = {
        let mut ops = vec![
            ";", ".", ",", "(", ")", "{", "}", "[", "]", ":", "?", "===", "==", "=", "!==", "!=",
            "!", "+=", "++", "+", "-=", "--", "-", "*=", "*", "/=", "/", "%=", "%", "^=", "^",
            "&=", "&&", "&", "|=", "||", "|", "<<=", "<=", "<<", "<", ">>>", ">>=", ">>", ">=",
            ">",
        ];
        ops.sort_by(|a, b| b.len().cmp(&a.len()));
        ops
    };
}

pub fn lookup_keyword(word: &str) -> Option<&'static str> {
    if word.len() < *MIN_KEYWORD_LENGTH || word.len() > *MAX_KEYWORD_LENGTH {
        return None;
    }
    KEYWORDS.get(word).copied()
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Keyword(&'static str),
    Identifier(String),
    Literal(LiteralType),
    Operator(&'static str),
    Eof,
}

impl TokenType {
    /// Name used in "Found X when expecting Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenType::Keyword(k) => format!("'{}'", k),
            TokenType::Operator(o) => format!("'{}'", o),
            TokenType::Identifier(_) => "identifier".to_string(),
            TokenType::Literal(_) => "literal".to_string(),
            TokenType::Eof => "eof".to_string(),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub meta: Meta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_length_bounds() {
        assert_eq!(*MIN_KEYWORD_LENGTH, 2);
        assert_eq!(*MAX_KEYWORD_LENGTH, 12);
        assert_eq!(lookup_keyword("synchronized"), Some("synchronized"));
        assert_eq!(lookup_keyword("synchronizedx"), None);
        assert_eq!(lookup_keyword("x"), None);
    }

    #[test]
    fn operators_are_longest_first() {
        let pos = |op: &str| OPERATORS.iter().position(|o| *o == op).unwrap();
        assert!(pos(">>>") < pos(">>="));
        assert!(pos(">>=") < pos(">>"));
        assert!(pos(">>") < pos(">"));
        assert!(pos("===") < pos("=="));
    }
}
