//! Expression parser.
//!
//! Parses the token stream of the expression tokenizer by recursive
//! descent and emits a flat postfix instruction list for the stack
//! evaluator. Operator precedence, loosest first:
//!
//! ```text
//! OR
//! XOR
//! AND
//! =  <>  !=  <  <=  >  >=  LIKE  IN  IS
//! <<  >>
//! +  -
//! *  /  %
//! NOT  unary -  unary +
//! literals, variables, calls, parentheses
//! ```
//!
//! Function existence is checked here, so a call to an unregistered
//! function fails at compile time. Variable references are collected but
//! not resolved; resolution happens at evaluation time.

use tokex_lex::{Token, TokenType};

use crate::errors::{ExpressionError, ExpressionResult};
use crate::functions::FunctionCollection;
use crate::tokenizer::ExpressionTokenizer;
use crate::variant::Variant;

/// A unary stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Negate,
    /// Logical not.
    Not,
}

/// A binary stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `=` and `IS`
    Equal,
    /// `<>` and `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    More,
    /// `>=`
    MoreOrEqual,
    /// `LIKE`
    Like,
    /// `IN`
    In,
}

/// One postfix instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a literal value.
    PushConstant(Variant),
    /// Push the current value of a variable.
    PushVariable(String),
    /// Pop `arity` arguments and call a function.
    CallFunction {
        /// The function name as written.
        name: String,
        /// Number of arguments on the stack.
        arity: usize,
    },
    /// Pop one value, push the operation result.
    Unary(UnaryOp),
    /// Pop two values, push the operation result.
    Binary(BinaryOp),
}

/// A compiled expression: instructions plus the referenced variable names.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    instructions: Vec<Instruction>,
    variables: Vec<String>,
}

impl ParsedExpression {
    /// The postfix instruction list.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Names of all variables the expression references, in first-use
    /// order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Decomposes into instructions and variable names.
    pub fn into_parts(self) -> (Vec<Instruction>, Vec<String>) {
        (self.instructions, self.variables)
    }
}

/// Compiles an expression against a function collection.
pub fn parse(
    expression: &str,
    functions: &FunctionCollection,
) -> ExpressionResult<ParsedExpression> {
    let tokens = ExpressionTokenizer::new().tokenize(expression);
    let mut parser = Parser {
        tokens,
        index: 0,
        functions,
        instructions: Vec::new(),
        variables: Vec::new(),
    };
    parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        if token.token_type() == TokenType::Symbol && token.value() == ")" {
            return Err(ExpressionError::UnmatchedParenthesis);
        }
        return Err(ExpressionError::SyntaxError(token.value().to_string()));
    }
    Ok(ParsedExpression {
        instructions: parser.instructions,
        variables: parser.variables,
    })
}

struct Parser<'a> {
    tokens: Vec<Token>,
    index: usize,
    functions: &'a FunctionCollection,
    instructions: Vec<Instruction>,
    variables: Vec<String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn is_symbol(&self, symbol: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.token_type() == TokenType::Symbol && t.value() == symbol)
    }

    fn take_symbol(&mut self, symbol: &str) -> bool {
        if self.is_symbol(symbol) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| {
            t.token_type() == TokenType::Keyword && t.value().eq_ignore_ascii_case(keyword)
        })
    }

    fn take_keyword(&mut self, keyword: &str) -> bool {
        if self.is_keyword(keyword) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn record_variable(&mut self, name: &str) {
        if !self.variables.iter().any(|v| v.eq_ignore_ascii_case(name)) {
            self.variables.push(name.to_string());
        }
    }

    fn parse_expression(&mut self) -> ExpressionResult<()> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ExpressionResult<()> {
        self.parse_xor()?;
        while self.take_keyword("OR") {
            self.parse_xor()?;
            self.instructions.push(Instruction::Binary(BinaryOp::Or));
        }
        Ok(())
    }

    fn parse_xor(&mut self) -> ExpressionResult<()> {
        self.parse_and()?;
        while self.take_keyword("XOR") {
            self.parse_and()?;
            self.instructions.push(Instruction::Binary(BinaryOp::Xor));
        }
        Ok(())
    }

    fn parse_and(&mut self) -> ExpressionResult<()> {
        self.parse_relational()?;
        while self.take_keyword("AND") {
            self.parse_relational()?;
            self.instructions.push(Instruction::Binary(BinaryOp::And));
        }
        Ok(())
    }

    fn parse_relational(&mut self) -> ExpressionResult<()> {
        self.parse_shift()?;
        loop {
            let (op, negated) = if self.take_symbol("=") {
                (BinaryOp::Equal, false)
            } else if self.take_symbol("<>") || self.take_symbol("!=") {
                (BinaryOp::NotEqual, false)
            } else if self.take_symbol("<=") {
                (BinaryOp::LessOrEqual, false)
            } else if self.take_symbol(">=") {
                (BinaryOp::MoreOrEqual, false)
            } else if self.take_symbol("<") {
                (BinaryOp::Less, false)
            } else if self.take_symbol(">") {
                (BinaryOp::More, false)
            } else if self.take_keyword("LIKE") {
                (BinaryOp::Like, false)
            } else if self.take_keyword("IN") {
                (BinaryOp::In, false)
            } else if self.is_keyword("IS") {
                self.index += 1;
                if self.take_keyword("NOT") {
                    (BinaryOp::NotEqual, false)
                } else {
                    (BinaryOp::Equal, false)
                }
            } else if self.is_keyword("NOT") {
                // NOT LIKE / NOT IN; a bare NOT here belongs to the
                // operand, so leave it alone.
                let next = self.tokens.get(self.index + 1);
                let follows = next.is_some_and(|t| {
                    t.token_type() == TokenType::Keyword
                        && (t.value().eq_ignore_ascii_case("LIKE")
                            || t.value().eq_ignore_ascii_case("IN"))
                });
                if !follows {
                    break;
                }
                self.index += 1;
                if self.take_keyword("LIKE") {
                    (BinaryOp::Like, true)
                } else {
                    self.index += 1;
                    (BinaryOp::In, true)
                }
            } else {
                break;
            };

            self.parse_shift()?;
            self.instructions.push(Instruction::Binary(op));
            if negated {
                self.instructions.push(Instruction::Unary(UnaryOp::Not));
            }
        }
        Ok(())
    }

    fn parse_shift(&mut self) -> ExpressionResult<()> {
        self.parse_additive()?;
        loop {
            let op = if self.take_symbol("<<") {
                BinaryOp::ShiftLeft
            } else if self.take_symbol(">>") {
                BinaryOp::ShiftRight
            } else {
                break;
            };
            self.parse_additive()?;
            self.instructions.push(Instruction::Binary(op));
        }
        Ok(())
    }

    fn parse_additive(&mut self) -> ExpressionResult<()> {
        self.parse_multiplicative()?;
        loop {
            let op = if self.take_symbol("+") {
                BinaryOp::Add
            } else if self.take_symbol("-") {
                BinaryOp::Subtract
            } else {
                break;
            };
            self.parse_multiplicative()?;
            self.instructions.push(Instruction::Binary(op));
        }
        Ok(())
    }

    fn parse_multiplicative(&mut self) -> ExpressionResult<()> {
        self.parse_unary()?;
        loop {
            let op = if self.take_symbol("*") {
                BinaryOp::Multiply
            } else if self.take_symbol("/") {
                BinaryOp::Divide
            } else if self.take_symbol("%") {
                BinaryOp::Modulo
            } else {
                break;
            };
            self.parse_unary()?;
            self.instructions.push(Instruction::Binary(op));
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> ExpressionResult<()> {
        if self.take_keyword("NOT") {
            self.parse_unary()?;
            self.instructions.push(Instruction::Unary(UnaryOp::Not));
        } else if self.take_symbol("-") {
            self.parse_unary()?;
            self.instructions.push(Instruction::Unary(UnaryOp::Negate));
        } else if self.take_symbol("+") {
            self.parse_unary()?;
        } else {
            self.parse_primary()?;
        }
        Ok(())
    }

    fn parse_primary(&mut self) -> ExpressionResult<()> {
        let Some(token) = self.peek() else {
            return Err(ExpressionError::UnexpectedEnd);
        };
        let value = token.value().to_string();

        match token.token_type() {
            TokenType::Integer | TokenType::Number => {
                self.index += 1;
                let constant = parse_integer_literal(&value)?;
                self.instructions.push(Instruction::PushConstant(constant));
            },
            TokenType::Float => {
                self.index += 1;
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| ExpressionError::SyntaxError(value.clone()))?;
                self.instructions
                    .push(Instruction::PushConstant(Variant::Double(parsed)));
            },
            TokenType::HexDecimal => {
                self.index += 1;
                let digits = value
                    .get(2..)
                    .ok_or_else(|| ExpressionError::SyntaxError(value.clone()))?;
                let parsed = i64::from_str_radix(digits, 16)
                    .map_err(|_| ExpressionError::SyntaxError(value.clone()))?;
                let constant = match i32::try_from(parsed) {
                    Ok(small) => Variant::Integer(small),
                    Err(_) => Variant::Long(parsed),
                };
                self.instructions.push(Instruction::PushConstant(constant));
            },
            TokenType::Quoted => {
                self.index += 1;
                self.instructions
                    .push(Instruction::PushConstant(Variant::String(value)));
            },
            TokenType::Keyword => {
                self.index += 1;
                let constant = match value.to_ascii_uppercase().as_str() {
                    "NULL" => Variant::Null,
                    "TRUE" => Variant::Boolean(true),
                    "FALSE" => Variant::Boolean(false),
                    _ => return Err(ExpressionError::SyntaxError(value)),
                };
                self.instructions.push(Instruction::PushConstant(constant));
            },
            TokenType::Word => {
                self.index += 1;
                if self.is_symbol("(") {
                    self.parse_call(value)?;
                } else {
                    self.record_variable(&value);
                    self.instructions.push(Instruction::PushVariable(value));
                }
            },
            TokenType::Symbol if value == "(" => {
                self.index += 1;
                self.parse_expression()?;
                if !self.take_symbol(")") {
                    return Err(ExpressionError::UnmatchedParenthesis);
                }
            },
            TokenType::Symbol if value == ")" => {
                return Err(ExpressionError::UnmatchedParenthesis);
            },
            _ => return Err(ExpressionError::SyntaxError(value)),
        }
        Ok(())
    }

    fn parse_call(&mut self, name: String) -> ExpressionResult<()> {
        if !self.functions.contains(&name) {
            return Err(ExpressionError::UnknownFunction(name));
        }
        self.take_symbol("(");

        let mut arity = 0;
        if !self.take_symbol(")") {
            loop {
                // An argument slot must hold an expression.
                if self.is_symbol(",") || self.is_symbol(")") {
                    return Err(ExpressionError::MalformedArguments(name));
                }
                self.parse_expression()?;
                arity += 1;
                if self.take_symbol(",") {
                    continue;
                }
                if self.take_symbol(")") {
                    break;
                }
                return match self.peek() {
                    Some(token) => {
                        Err(ExpressionError::SyntaxError(token.value().to_string()))
                    },
                    None => Err(ExpressionError::UnmatchedParenthesis),
                };
            }
        }

        self.instructions
            .push(Instruction::CallFunction { name, arity });
        Ok(())
    }
}

fn parse_integer_literal(value: &str) -> ExpressionResult<Variant> {
    if let Ok(small) = value.parse::<i32>() {
        return Ok(Variant::Integer(small));
    }
    if let Ok(wide) = value.parse::<i64>() {
        return Ok(Variant::Long(wide));
    }
    value
        .parse::<f64>()
        .map(Variant::Double)
        .map_err(|_| ExpressionError::SyntaxError(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::default_function_collection;

    fn compile(expression: &str) -> ExpressionResult<ParsedExpression> {
        parse(expression, &default_function_collection())
    }

    #[test]
    fn test_precedence_of_multiplication() {
        let parsed = compile("1 + 2 * 3").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[
                Instruction::PushConstant(Variant::Integer(1)),
                Instruction::PushConstant(Variant::Integer(2)),
                Instruction::PushConstant(Variant::Integer(3)),
                Instruction::Binary(BinaryOp::Multiply),
                Instruction::Binary(BinaryOp::Add),
            ]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let parsed = compile("(1 + 2) * 3").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[
                Instruction::PushConstant(Variant::Integer(1)),
                Instruction::PushConstant(Variant::Integer(2)),
                Instruction::Binary(BinaryOp::Add),
                Instruction::PushConstant(Variant::Integer(3)),
                Instruction::Binary(BinaryOp::Multiply),
            ]
        );
    }

    #[test]
    fn test_keyword_constants() {
        let parsed = compile("NULL").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::Null)]
        );
        let parsed = compile("true").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::Boolean(true))]
        );
    }

    #[test]
    fn test_unary_binds_tighter_than_and() {
        let parsed = compile("NOT TRUE AND FALSE").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[
                Instruction::PushConstant(Variant::Boolean(true)),
                Instruction::Unary(UnaryOp::Not),
                Instruction::PushConstant(Variant::Boolean(false)),
                Instruction::Binary(BinaryOp::And),
            ]
        );
    }

    #[test]
    fn test_is_and_is_not() {
        let parsed = compile("x IS NULL").unwrap();
        assert_eq!(
            parsed.instructions().last(),
            Some(&Instruction::Binary(BinaryOp::Equal))
        );
        let parsed = compile("x IS NOT NULL").unwrap();
        assert_eq!(
            parsed.instructions().last(),
            Some(&Instruction::Binary(BinaryOp::NotEqual))
        );
    }

    #[test]
    fn test_not_like_and_not_in() {
        let parsed = compile("name NOT LIKE 'a%'").unwrap();
        let tail = &parsed.instructions()[parsed.instructions().len() - 2..];
        assert_eq!(
            tail,
            &[
                Instruction::Binary(BinaryOp::Like),
                Instruction::Unary(UnaryOp::Not),
            ]
        );
    }

    #[test]
    fn test_function_call() {
        let parsed = compile("MAX(1, 2, x)").unwrap();
        assert_eq!(
            parsed.instructions().last(),
            Some(&Instruction::CallFunction {
                name: "MAX".to_string(),
                arity: 3,
            })
        );
        assert_eq!(parsed.variables(), ["x"]);
    }

    #[test]
    fn test_zero_argument_call() {
        let parsed = compile("NOW()").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::CallFunction {
                name: "NOW".to_string(),
                arity: 0,
            }]
        );
    }

    #[test]
    fn test_unknown_function_fails_at_compile_time() {
        let err = compile("NOSUCH(1)").unwrap_err();
        assert_eq!(err, ExpressionError::UnknownFunction("NOSUCH".to_string()));
    }

    #[test]
    fn test_variable_names_are_collected_once() {
        let parsed = compile("x + X * y").unwrap();
        assert_eq!(parsed.variables(), ["x", "y"]);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(compile("").unwrap_err(), ExpressionError::UnexpectedEnd);
    }

    #[test]
    fn test_trailing_garbage() {
        assert_eq!(
            compile("1 2").unwrap_err(),
            ExpressionError::SyntaxError("2".to_string())
        );
    }

    #[test]
    fn test_unmatched_parentheses() {
        assert_eq!(
            compile("(1 + 2").unwrap_err(),
            ExpressionError::UnmatchedParenthesis
        );
        assert_eq!(
            compile("1 + 2)").unwrap_err(),
            ExpressionError::UnmatchedParenthesis
        );
    }

    #[test]
    fn test_malformed_argument_list() {
        assert_eq!(
            compile("MAX(1,,2)").unwrap_err(),
            ExpressionError::MalformedArguments("MAX".to_string())
        );
        assert_eq!(
            compile("MAX(,1)").unwrap_err(),
            ExpressionError::MalformedArguments("MAX".to_string())
        );
    }

    #[test]
    fn test_literal_forms() {
        let parsed = compile("0x10").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::Integer(16))]
        );
        let parsed = compile("2.5e2").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::Double(250.0))]
        );
        let parsed = compile("9999999999").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::Long(9_999_999_999))]
        );
    }

    #[test]
    fn test_quoted_literal_is_a_string_constant() {
        let parsed = compile("'it''s'").unwrap();
        assert_eq!(
            parsed.instructions(),
            &[Instruction::PushConstant(Variant::String("it's".to_string()))]
        );
    }
}
