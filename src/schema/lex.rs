use peg::str::LineCol;

use super::ast::PrimitiveKind;
use super::error::SchemaError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Type,
    Interface,
    Primitive(PrimitiveKind),
    Identifier(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// `[]` written without whitespace; `[ ]` lexes as two brackets.
    ArraySuffix,
    Question,
    Comma,
    Colon,
    Equals,
}

impl Token {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Token::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Lexer output, consumed directly by the schema grammar as its input type.
#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    positions: Vec<LineCol>,
    end: LineCol,
}

impl TokenStream {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl peg::Parse for TokenStream {
    type PositionRepr = LineCol;

    fn start(&self) -> usize {
        0
    }

    fn is_eof(&self, position: usize) -> bool {
        position >= self.tokens.len()
    }

    fn position_repr(&self, position: usize) -> LineCol {
        self.positions.get(position).copied().unwrap_or(self.end)
    }
}

impl<'input> peg::ParseElem<'input> for TokenStream {
    type Element = &'input Token;

    fn parse_elem(&'input self, position: usize) -> peg::RuleResult<&'input Token> {
        match self.tokens.get(position) {
            Some(token) => peg::RuleResult::Matched(position + 1, token),
            None => peg::RuleResult::Failed,
        }
    }
}

pub struct Lexeme {
    pub offset: usize,
    pub token: Token,
}

peg::parser! {

    grammar schema_lexer() for str {

        rule word_char() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']

        rule primitive() -> PrimitiveKind =
            "boolean" { PrimitiveKind::Boolean }
            / "integer" { PrimitiveKind::Integer }
            / "float" { PrimitiveKind::Float }
            / "number" { PrimitiveKind::Number }
            / "string" { PrimitiveKind::String }

        rule keyword() -> Token =
            "type" !word_char() { Token::Type }
            / "interface" !word_char() { Token::Interface }
            / k:primitive() !word_char() { Token::Primitive(k) }

        rule identifier() -> Token =
            s:$(['a'..='z' | 'A'..='Z' | '_' | '$'] word_char()*) {
                Token::Identifier(s.to_string())
            }

        rule punctuation() -> Token =
            "[]" { Token::ArraySuffix }
            / "{" { Token::LBrace }
            / "}" { Token::RBrace }
            / "[" { Token::LBracket }
            / "]" { Token::RBracket }
            / "?" { Token::Question }
            / "," { Token::Comma }
            / ":" { Token::Colon }
            / "=" { Token::Equals }

        rule lexeme() -> Lexeme =
            offset:position!() token:(keyword() / identifier() / punctuation()) {
                Lexeme { offset, token }
            }

        pub rule lexemes() -> Vec<Lexeme> =
            _ l:(lexeme() ** _) _ { l }

        rule _() = quiet!{[' ' | '\r' | '\n' | '\t']*}
    }
}

/// 1-based line and character column of a byte offset, counted the way peg reports `str` positions.
fn line_col(text: &str, offset: usize) -> LineCol {
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;

    LineCol {
        line,
        column,
        offset,
    }
}

/// Deepest object nesting accepted; the grammar and the value walk both recurse per level.
pub const MAX_NESTING: usize = 128;

fn check_nesting(tokens: &[Token], positions: &[LineCol]) -> Result<(), SchemaError> {
    let mut depth = 0usize;

    for (token, position) in tokens.iter().zip(positions) {
        match token {
            Token::LBrace => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(SchemaError::Syntax {
                        message: format!(
                            "objects may not be nested more than {MAX_NESTING} levels deep"
                        ),
                        line: position.line,
                        column: position.column,
                    });
                }
            }
            Token::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Ok(())
}

pub fn tokenize(text: &str) -> Result<TokenStream, SchemaError> {
    let lexemes = schema_lexer::lexemes(text).map_err(|e| {
        let message = match text[e.location.offset..].chars().next() {
            Some(c) => format!("unexpected character `{c}`"),
            None => "unexpected end of input".to_string(),
        };
        SchemaError::Lex {
            message,
            line: e.location.line,
            column: e.location.column,
        }
    })?;

    let (positions, tokens): (Vec<LineCol>, Vec<Token>) = lexemes
        .into_iter()
        .map(|l| (line_col(text, l.offset), l.token))
        .unzip();

    check_nesting(&tokens, &positions)?;

    Ok(TokenStream {
        tokens,
        positions,
        end: line_col(text, text.len()),
    })
}
