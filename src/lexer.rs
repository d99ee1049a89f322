use crate::ast::{ArithOp, Token, TokenKind};
use crate::error::{CompileError, CompileResult};
use crate::profile::Profile;

/// What the pending word is being read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferMode {
    None,
    Number,
    Identifier,
}

/// Single-pass tokenizer shared by both profiles.
///
/// Characters accumulate in a buffer until a split character (whitespace,
/// parentheses and, for formulas, `+ - * / ,`) ends the word. The word is
/// then emitted as a keyword, number or identifier, and the split character is
/// classified on its own.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    profile: Profile,
    buffer: String,
    buffer_start: usize,
    mode: BufferMode,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str, profile: Profile) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            profile,
            buffer: String::new(),
            buffer_start: 0,
            mode: BufferMode::None,
            tokens: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Scans the whole input and returns its tokens.
    pub fn tokenize(mut self) -> CompileResult<Vec<Token>> {
        while let Some(ch) = self.current_char() {
            if self.profile.is_split_char(ch) {
                self.flush()?;
                self.classify_split(ch);
            } else {
                self.accumulate(ch)?;
            }
            self.advance();
        }
        self.flush()?;

        log::trace!("tokenized {} characters into {} tokens", self.input.len(), self.tokens.len());
        Ok(self.tokens)
    }

    fn accumulate(&mut self, ch: char) -> CompileResult<()> {
        let invalid = CompileError::InvalidCharacter {
            character: ch,
            position: self.position,
        };

        match self.mode {
            BufferMode::None => {
                self.mode = if ch.is_ascii_digit() || ch == '.' {
                    BufferMode::Number
                } else if is_identifier_char(ch) {
                    BufferMode::Identifier
                } else {
                    return Err(invalid);
                };
                self.buffer_start = self.position;
            }
            BufferMode::Number => {
                let repeated_dot = ch == '.' && self.buffer.contains('.');
                if !(ch.is_ascii_digit() || ch == '.') || repeated_dot {
                    return Err(invalid);
                }
            }
            BufferMode::Identifier => {
                if !is_identifier_char(ch) {
                    return Err(invalid);
                }
            }
        }

        self.buffer.push(ch);
        Ok(())
    }

    /// Emits the pending word, if any.
    fn flush(&mut self) -> CompileResult<()> {
        if self.mode == BufferMode::None {
            return Ok(());
        }

        let word = std::mem::take(&mut self.buffer);
        let kind = if let Some(keyword) = self.profile.keyword(&word) {
            keyword
        } else if self.mode == BufferMode::Number {
            let value = word.parse::<f64>().map_err(|_| CompileError::InvalidCharacter {
                character: word.chars().next().unwrap_or('.'),
                position: self.buffer_start,
            })?;
            TokenKind::Number(value)
        } else {
            TokenKind::Identifier(word)
        };

        self.tokens.push(Token::new(kind, self.buffer_start));
        self.mode = BufferMode::None;
        Ok(())
    }

    fn classify_split(&mut self, ch: char) {
        let kind = match ch {
            '(' => TokenKind::Grouping { open: true },
            ')' => TokenKind::Grouping { open: false },
            ',' => TokenKind::Separator,
            _ => match ArithOp::from_char(ch) {
                Some(op) => TokenKind::Operator(op),
                // whitespace
                None => return,
            },
        };
        self.tokens.push(Token::new(kind, self.position));
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.'
}

/// Tokenizes `input` under `profile`.
pub fn tokenize(input: &str, profile: Profile) -> CompileResult<Vec<Token>> {
    Lexer::new(input, profile).tokenize()
}

#[test]
fn test_keywords() {
    use crate::ast::LogicalOp;

    let tokens = tokenize("not and or", Profile::Boolean).unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Not,
            TokenKind::Logical(LogicalOp::And),
            TokenKind::Logical(LogicalOp::Or),
        ]
    );
}

#[test]
fn test_formula() {
    let tokens = tokenize("Max(a, 2.5)", Profile::Arithmetic).unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier("Max".to_string()),
            TokenKind::Grouping { open: true },
            TokenKind::Identifier("a".to_string()),
            TokenKind::Separator,
            TokenKind::Number(2.5),
            TokenKind::Grouping { open: false },
        ]
    );
}
