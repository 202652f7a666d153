//! Error types for expression compilation and evaluation.
//!
//! Every failure surfaces as a single [`ExpressionError`] describing
//! exactly one root cause. The machine-readable [`code`](ExpressionError::code)
//! distinguishes the category, satisfying the workspace-wide
//! [`CodedError`] contract.

use thiserror::Error;
use tokex_util::CodedError;

use crate::variant::VariantType;

/// An error from expression compilation or evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// The expression ended where more input was required.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A token that does not fit the grammar at its position.
    #[error("syntax error near '{0}'")]
    SyntaxError(String),

    /// An opening parenthesis without a matching close, or vice versa.
    #[error("unmatched parenthesis in expression")]
    UnmatchedParenthesis,

    /// An argument position in a call that holds no expression.
    #[error("malformed argument list in call to '{0}'")]
    MalformedArguments(String),

    /// A call to a function the function collection does not know.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A reference to a variable the variable collection does not know.
    #[error("variable '{0}' is not defined")]
    UnknownVariable(String),

    /// A binary operation applied to types it does not support.
    #[error("operation '{op}' is not supported for {left} and {right}")]
    UnsupportedOperation {
        /// The attempted operation.
        op: &'static str,
        /// Type of the left operand.
        left: VariantType,
        /// Type of the right operand.
        right: VariantType,
    },

    /// A unary operation applied to a type it does not support.
    #[error("operation '{op}' is not supported for {operand}")]
    UnsupportedUnary {
        /// The attempted operation.
        op: &'static str,
        /// Type of the operand.
        operand: VariantType,
    },

    /// A value that cannot be converted to the requested type.
    #[error("cannot convert '{from}' to {to}")]
    ConversionFailed {
        /// Display form of the source value.
        from: String,
        /// The requested target type.
        to: VariantType,
    },

    /// Integer or modulo division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic that overflowed.
    #[error("integer overflow in '{0}'")]
    Overflow(&'static str),

    /// A function invoked with the wrong number of arguments.
    #[error("function '{name}' expects {expected} arguments, got {actual}")]
    ArityMismatch {
        /// The function name.
        name: String,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        actual: usize,
    },

    /// A function body reported a failure of its own.
    #[error("function '{name}' failed: {message}")]
    FunctionFailed {
        /// The function name.
        name: String,
        /// The failure description.
        message: String,
    },

    /// The stack machine finished with a shape other than one result.
    #[error("expression evaluation left the stack out of balance")]
    StackInconsistency,
}

impl ExpressionError {
    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedEnd => "UNEXPECTED_END",
            Self::SyntaxError(_) => "SYNTAX_ERROR",
            Self::UnmatchedParenthesis => "UNMATCHED_PARENTHESIS",
            Self::MalformedArguments(_) => "MALFORMED_ARGUMENTS",
            Self::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            Self::UnknownVariable(_) => "UNKNOWN_VARIABLE",
            Self::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            Self::UnsupportedUnary { .. } => "UNSUPPORTED_OPERATION",
            Self::ConversionFailed { .. } => "CONVERSION_FAILED",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Overflow(_) => "OVERFLOW",
            Self::ArityMismatch { .. } => "ARITY_MISMATCH",
            Self::FunctionFailed { .. } => "FUNCTION_FAILED",
            Self::StackInconsistency => "INTERNAL",
        }
    }
}

impl CodedError for ExpressionError {
    fn code(&self) -> &'static str {
        self.code()
    }
}

/// Result alias used throughout the crate.
pub type ExpressionResult<T> = Result<T, ExpressionError>;
