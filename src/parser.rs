//! Shunting-yard conversion from infix tokens to reverse Polish notation.

use crate::ast::{ArithOp, Token, TokenKind};
use crate::error::{CompileError, CompileResult};
use crate::profile::Profile;
use crate::registry::FunctionRegistry;

/// Infix-to-RPN converter.
///
/// Operators wait on an explicit stack until something that binds less
/// tightly arrives. Two details differ from the textbook algorithm:
///
/// - An operator only pops entries whose priority is *strictly* higher, so a
///   chain of equal-priority operators groups to the right: `1 - 2 - 3` is
///   emitted as `1 2 3 - -`, i.e. `1 - (2 - 3)`.
/// - Prefix operators are always pushed and leave the stack when their group
///   closes or the input ends. `not` has the lowest priority, so it covers
///   everything up to the end of its enclosing group: `not A and B` is
///   `not (A and B)`.
///
/// Function names wait on the stack like operators; their arguments are laid
/// out flat in the output and the name follows them once the closing
/// parenthesis is reached.
///
/// # Example
///
/// ```
/// use shunt::ast::tokens::render;
/// use shunt::lexer::tokenize;
/// use shunt::parser::Parser;
/// use shunt::profile::Profile;
/// use shunt::registry::FunctionRegistry;
///
/// let tokens = tokenize("Max(1, 2) * 3", Profile::Arithmetic).unwrap();
/// let rpn = Parser::new(Profile::Arithmetic)
///     .with_functions(FunctionRegistry::shared())
///     .to_rpn(&tokens)
///     .unwrap();
/// assert_eq!(render(&rpn), "1 2 Max 3 *");
/// ```
pub struct Parser<'a> {
    profile: Profile,
    functions: Option<&'a FunctionRegistry>,
}

impl<'a> Parser<'a> {
    pub fn new(profile: Profile) -> Self {
        Parser {
            profile,
            functions: None,
        }
    }

    /// Names in `functions` are treated as calls rather than variables.
    pub fn with_functions(mut self, functions: &'a FunctionRegistry) -> Self {
        self.functions = Some(functions);
        self
    }

    fn is_function(&self, name: &str) -> bool {
        self.functions.is_some_and(|f| f.contains(name))
    }

    /// Reorders `tokens` into reverse Polish notation.
    ///
    /// # Errors
    ///
    /// - `InvalidNodeCount` for unbalanced parentheses, a comma outside an
    ///   argument list, a call whose argument count differs from its arity, or
    ///   two operands with no operator between them
    /// - `UnknownFunction` for an unregistered name followed by `(`
    /// - `UnsupportedToken` for a token this profile cannot prioritize
    pub fn to_rpn(&self, tokens: &[Token]) -> CompileResult<Vec<Token>> {
        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Token> = Vec::new();
        // One entry per open `(`; `Some` when the group is a call's argument list.
        let mut groups: Vec<Option<CallFrame>> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let previous = index.checked_sub(1).map(|i| &tokens[i].kind);
            log::trace!("rpn: {} (stack depth {})", token, stack.len());

            if previous.is_some_and(|p| self.ends_operand(p)) && starts_operand(&token.kind) {
                return Err(CompileError::node_count(
                    format!("missing operator before '{}'", token),
                    Some(token.position),
                ));
            }

            match &token.kind {
                TokenKind::Number(_) => output.push(token.clone()),

                TokenKind::Identifier(name) => {
                    if self.is_function(name) {
                        stack.push(token.clone());
                    } else if self.profile == Profile::Arithmetic
                        && tokens.get(index + 1).is_some_and(Token::is_open)
                    {
                        return Err(CompileError::UnknownFunction {
                            name: name.clone(),
                            position: token.position,
                        });
                    } else {
                        output.push(token.clone());
                    }
                }

                TokenKind::Grouping { open: true } => {
                    groups.push(self.open_call(previous, stack.last()));
                    stack.push(token.clone());
                }

                TokenKind::Grouping { open: false } => {
                    self.close_group(token, &mut stack, &mut output)?;
                    if let Some(Some(call)) = groups.pop() {
                        let empty = matches!(previous, Some(TokenKind::Grouping { open: true }));
                        call.check(if empty { 0 } else { call.separators + 1 })?;
                    }
                }

                TokenKind::Separator => {
                    match groups.last_mut() {
                        Some(Some(call)) => call.separators += 1,
                        _ => {
                            return Err(CompileError::node_count(
                                "',' outside of an argument list",
                                Some(token.position),
                            ));
                        }
                    }
                    self.lay_out_argument(token, &mut stack, &mut output)?;
                }

                TokenKind::Operator(ArithOp::Minus) if is_prefix_position(previous) => {
                    stack.push(Token::new(TokenKind::Negate, token.position));
                }

                TokenKind::Operator(_) | TokenKind::Logical(_) => {
                    let incoming = self.profile.priority(token)?;
                    while let Some(top) = stack.last() {
                        if self.profile.priority(top)? > incoming {
                            output.extend(stack.pop());
                        } else {
                            break;
                        }
                    }
                    stack.push(token.clone());
                }

                TokenKind::Not | TokenKind::Negate => {
                    // Rejects a `not` in a formula and vice versa.
                    self.profile.priority(token)?;
                    stack.push(token.clone());
                }
            }
        }

        while let Some(top) = stack.pop() {
            if top.is_open() {
                return Err(CompileError::node_count("unclosed '('", Some(top.position)));
            }
            output.push(top);
        }

        log::debug!("converted {} tokens to {} rpn tokens", tokens.len(), output.len());
        Ok(output)
    }

    /// Starts tracking a call when `(` directly follows a function name.
    fn open_call(&self, previous: Option<&TokenKind>, top: Option<&Token>) -> Option<CallFrame> {
        let Some(TokenKind::Identifier(name)) = previous else {
            return None;
        };
        let top = top.filter(|t| matches!(&t.kind, TokenKind::Identifier(n) if n == name))?;
        let arity = self.functions?.arity(name)?;
        Some(CallFrame {
            name: name.clone(),
            position: top.position,
            arity,
            separators: 0,
        })
    }

    /// True when `kind` completes an operand, so another operand cannot follow.
    fn ends_operand(&self, kind: &TokenKind) -> bool {
        match kind {
            TokenKind::Number(_) | TokenKind::Grouping { open: false } => true,
            TokenKind::Identifier(name) => !self.is_function(name),
            _ => false,
        }
    }

    /// Handles `)`: emits everything down to the matching `(`, then the prefix
    /// operator or function name waiting in front of the group.
    fn close_group(
        &self,
        token: &Token,
        stack: &mut Vec<Token>,
        output: &mut Vec<Token>,
    ) -> CompileResult<()> {
        loop {
            match stack.pop() {
                None => {
                    return Err(CompileError::node_count(
                        "unmatched ')'",
                        Some(token.position),
                    ));
                }
                Some(top) if top.is_open() => break,
                Some(top) => output.push(top),
            }
        }

        let pending = stack.last().is_some_and(|top| {
            top.is_unary() || matches!(&top.kind, TokenKind::Identifier(name) if self.is_function(name))
        });
        if pending {
            output.extend(stack.pop());
        }
        Ok(())
    }

    /// Handles `,`: emits the finished argument and leaves the call's `(` on the stack.
    fn lay_out_argument(
        &self,
        token: &Token,
        stack: &mut Vec<Token>,
        output: &mut Vec<Token>,
    ) -> CompileResult<()> {
        loop {
            match stack.last() {
                None => {
                    return Err(CompileError::node_count(
                        "',' outside of an argument list",
                        Some(token.position),
                    ));
                }
                Some(top) if top.is_open() => return Ok(()),
                Some(_) => output.extend(stack.pop()),
            }
        }
    }
}

/// An open function call and the commas seen directly inside it.
struct CallFrame {
    name: String,
    position: usize,
    arity: usize,
    separators: usize,
}

impl CallFrame {
    fn check(&self, args: usize) -> CompileResult<()> {
        if args == self.arity {
            return Ok(());
        }
        Err(CompileError::node_count(
            format!("'{}' takes {} arguments but got {}", self.name, self.arity, args),
            Some(self.position),
        ))
    }
}

fn starts_operand(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number(_)
            | TokenKind::Identifier(_)
            | TokenKind::Grouping { open: true }
            | TokenKind::Not
    )
}

/// A minus is a prefix operator when nothing it could subtract from precedes it.
fn is_prefix_position(previous: Option<&TokenKind>) -> bool {
    match previous {
        None => true,
        Some(kind) => matches!(
            kind,
            TokenKind::Grouping { open: true }
                | TokenKind::Separator
                | TokenKind::Operator(_)
                | TokenKind::Negate
        ),
    }
}

/// Tokenizes `input` and converts it to RPN, using the built-in functions for
/// the arithmetic profile.
pub fn to_rpn(input: &str, profile: Profile) -> CompileResult<Vec<Token>> {
    let tokens = crate::lexer::tokenize(input, profile)?;
    let parser = match profile {
        Profile::Arithmetic => Parser::new(profile).with_functions(FunctionRegistry::shared()),
        Profile::Boolean => Parser::new(profile),
    };
    parser.to_rpn(&tokens)
}
