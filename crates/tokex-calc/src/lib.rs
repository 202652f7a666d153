//! tokex-calc - An Expression Calculator over Dynamic Values
//!
//! This crate compiles and evaluates SQL-flavored expressions such as
//! `price * (1 + rate)` or `name LIKE 'A%' AND total > 100`. Expressions
//! are lexed with the [`tokex-lex`](tokex_lex) framework, parsed into a
//! postfix instruction list, and evaluated by a small stack machine over
//! dynamically typed [`Variant`] values.
//!
//! # Overview
//!
//! - [`Variant`] is the value model: integers, floats, strings, booleans,
//!   timestamps, durations, arrays and opaque objects, all behind one tag.
//! - [`variant::ops::VariantOperations`] defines arithmetic, logic,
//!   comparison and conversion with numeric promotion; the default
//!   implementation never concatenates in `+` and never lets `Null`
//!   slide through arithmetic.
//! - [`ExpressionCalculator`] compiles an expression once and evaluates
//!   it repeatedly against its own or an external [`VariableCollection`].
//! - [`FunctionCollection`] holds the callable functions; the
//!   [standard set](default_function_collection) covers numeric helpers,
//!   conversion, `IF`, `NOW` and `ARRAY`.
//!
//! # Example
//!
//! ```
//! use tokex_calc::{ExpressionCalculator, Variant};
//!
//! let mut calculator = ExpressionCalculator::new(
//!     "IF(total > limit, 'over', 'under')",
//! ).unwrap();
//! calculator.set_variable("total", Variant::from(120));
//! calculator.set_variable("limit", Variant::from(100));
//! assert_eq!(calculator.evaluate().unwrap(), Variant::from("over"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod calculator;
pub mod errors;
pub mod functions;
pub mod parser;
pub mod tokenizer;
pub mod variables;
pub mod variant;

pub use calculator::ExpressionCalculator;
pub use errors::{ExpressionError, ExpressionResult};
pub use functions::{
    default_function_collection, DelegatedFunction, Function, FunctionCollection,
};
pub use variables::{Variable, VariableCollection};
pub use variant::{Variant, VariantType};

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_end_to_end_arithmetic() {
        let result = ExpressionCalculator::new("2 + 2 * 2").unwrap().evaluate();
        assert_eq!(result.unwrap(), Variant::Integer(6));
    }

    #[test]
    fn test_string_operand_is_numeric_in_addition() {
        // '+' computes; it never concatenates.
        let result = ExpressionCalculator::new("'2' + 3").unwrap().evaluate();
        assert_eq!(result.unwrap(), Variant::Integer(5));
    }

    #[test]
    fn test_keyword_case_insensitivity() {
        let result = ExpressionCalculator::new("not true and false")
            .unwrap()
            .evaluate();
        assert_eq!(result.unwrap(), Variant::Boolean(false));
    }

    #[test]
    fn test_quoted_identifier_bypasses_keywords() {
        let mut calculator = ExpressionCalculator::new("\"AND\" + 1").unwrap();
        calculator.set_variable("AND", Variant::from(41));
        assert_eq!(calculator.evaluate().unwrap(), Variant::Integer(42));
    }

    #[test]
    fn test_custom_function_registration() {
        let mut functions = default_function_collection();
        functions.add(Rc::new(DelegatedFunction::new("TWICE", |args, ops| {
            ops.add(&args[0], &args[0])
        })));
        let calculator = ExpressionCalculator::with_functions("TWICE(21)", functions).unwrap();
        assert_eq!(calculator.evaluate().unwrap(), Variant::Integer(42));
    }

    #[test]
    fn test_comments_inside_expressions() {
        let result = ExpressionCalculator::new("1 /* one */ + 2 // two")
            .unwrap()
            .evaluate();
        assert_eq!(result.unwrap(), Variant::Integer(3));
    }

    #[test]
    fn test_report_of_all_referenced_variables() {
        let calculator =
            ExpressionCalculator::new("a + b * SUM(c, a)").unwrap();
        let names: Vec<_> = calculator
            .variables()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
