use std::rc::Rc;

use pest::Parser;
use pest_derive::Parser;

use super::ast::{LiteralType, Meta, NumberLiteralType};
use super::token::{lookup_keyword, Token, TokenType, OPERATORS};
use crate::runner::ds::error::{JErrorType, JsError};

#[derive(Parser)]
#[grammar = "parser/lexical_grammar.pest"] // relative to src
pub struct LexicalGrammar;

/// Produces one token at a time from a script. Every grammar rule is tried
/// against the current position and the position only moves once a rule has
/// matched, so a failed numeric attempt leaves nothing behind.
pub struct Tokenizer {
    script: Rc<str>,
    position: usize,
}

impl Tokenizer {
    pub fn new(script: Rc<str>) -> Self {
        Tokenizer {
            script,
            position: 0,
        }
    }

    pub fn script(&self) -> &Rc<str> {
        &self.script
    }

    /// Offset just past the last token produced.
    pub fn position(&self) -> usize {
        self.position
    }

    fn meta(&self) -> Meta {
        Meta::new(self.script.clone(), self.position)
    }

    fn error(&self, message: &str) -> JsError {
        JErrorType::SyntaxError(message.to_string()).at(&self.meta())
    }

    fn remaining(&self) -> &str {
        &self.script[self.position..]
    }

    /// Length of the match of `rule` anchored at the current position.
    fn match_len(&self, rule: Rule) -> Option<usize> {
        LexicalGrammar::parse(rule, self.remaining())
            .ok()
            .and_then(|mut pairs| pairs.next())
            .map(|pair| pair.as_span().end())
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), JsError> {
        if let Some(len) = self.match_len(Rule::skippable) {
            self.position += len;
        }
        if self.remaining().starts_with("/*") {
            return Err(self.error("Unterminated '/*' comment"));
        }
        Ok(())
    }

    pub fn next_token(&mut self) -> Result<Token, JsError> {
        self.skip_whitespace_and_comments()?;
        let meta = self.meta();
        let token_type = self.read_token_type()?;
        Ok(Token { token_type, meta })
    }

    fn read_token_type(&mut self) -> Result<TokenType, JsError> {
        let first = match self.remaining().chars().next() {
            None => return Ok(TokenType::Eof),
            Some(c) => c,
        };

        if let Some(len) = self.match_len(Rule::identifier) {
            let word = &self.script[self.position..self.position + len];
            let token_type = match lookup_keyword(word) {
                Some(keyword) => TokenType::Keyword(keyword),
                None => TokenType::Identifier(word.to_string()),
            };
            self.position += len;
            return Ok(token_type);
        }

        if first.is_ascii_digit() {
            return match self.read_numeric_literal()? {
                Some(n) => Ok(TokenType::Literal(LiteralType::NumberLiteral(n))),
                None => Err(self.error("Syntax error in numeric constant")),
            };
        }

        if first == '"' || first == '\'' {
            return Ok(TokenType::Literal(LiteralType::StringLiteral(
                self.read_string_literal()?,
            )));
        }

        if first == '.' {
            if let Some(n) = self.read_float_literal()? {
                return Ok(TokenType::Literal(LiteralType::NumberLiteral(n)));
            }
        }

        let rest = self.remaining();
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.position += op.len();
            return Ok(TokenType::Operator(*op));
        }

        Err(self.error(&format!("Unexpected character '{}' in source", first)))
    }

    fn read_numeric_literal(&mut self) -> Result<Option<NumberLiteralType>, JsError> {
        if let Some(len) = self.match_len(Rule::hex_literal) {
            let digits = &self.script[self.position + 2..self.position + len];
            self.position += len;
            return Ok(Some(NumberLiteralType::IntegerLiteral(fold_digits(
                digits, 16,
            ))));
        }
        if let Some(n) = self.read_float_literal()? {
            return Ok(Some(n));
        }
        if let Some(len) = self.match_len(Rule::octal_literal) {
            let after = self.script[self.position + len..].chars().next();
            if after.map_or(false, |c| c.is_ascii_digit()) {
                let err_meta = Meta::new(self.script.clone(), self.position + len);
                return Err(
                    JErrorType::SyntaxError("Decimal digit in octal constant".to_string())
                        .at(&err_meta),
                );
            }
            let digits = &self.script[self.position + 1..self.position + len];
            self.position += len;
            return Ok(Some(NumberLiteralType::IntegerLiteral(fold_digits(
                digits, 8,
            ))));
        }
        if let Some(len) = self.match_len(Rule::decimal_literal) {
            let digits = &self.script[self.position..self.position + len];
            self.position += len;
            return Ok(Some(NumberLiteralType::IntegerLiteral(fold_digits(
                digits, 10,
            ))));
        }
        Ok(None)
    }

    fn read_float_literal(&mut self) -> Result<Option<NumberLiteralType>, JsError> {
        let len = match self.match_len(Rule::float_literal) {
            Some(len) => len,
            None => return Ok(None),
        };
        let text = &self.script[self.position..self.position + len];
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error("Syntax error in numeric constant"))?;
        self.position += len;
        Ok(Some(NumberLiteralType::FloatLiteral(value)))
    }

    fn read_string_literal(&mut self) -> Result<String, JsError> {
        let (len, body) = {
            let pair = LexicalGrammar::parse(Rule::string_literal, self.remaining())
                .ok()
                .and_then(|mut pairs| pairs.next());
            match pair {
                Some(pair) => {
                    let len = pair.as_span().end();
                    let body = pair
                        .into_inner()
                        .next()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default();
                    (len, body)
                }
                None => {
                    return Err(self.error("Unexpected end-of-input in string constant"));
                }
            }
        };
        let value = unescape(&body).map_err(|m| self.error(&m))?;
        self.position += len;
        Ok(value)
    }
}

/// Accumulates digits into an `i64`, wrapping on overflow.
fn fold_digits(digits: &str, radix: u32) -> i64 {
    digits.chars().fold(0i64, |acc, c| {
        acc.wrapping_mul(radix as i64)
            .wrapping_add(c.to_digit(radix).unwrap_or(0) as i64)
    })
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{C}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = if hex.len() == 4 {
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    None
                };
                match code {
                    Some(code) => out.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                    None => return Err("Invalid unicode escape in string constant".to_string()),
                }
            }
            Some(other) => out.push(other),
            None => return Err("Unexpected end-of-input in string constant".to_string()),
        }
    }
    Ok(out)
}
