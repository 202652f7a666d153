//! The expression calculator.

use tracing::debug;

use crate::errors::{ExpressionError, ExpressionResult};
use crate::functions::{default_function_collection, FunctionCollection};
use crate::parser::{self, BinaryOp, Instruction, UnaryOp};
use crate::variables::VariableCollection;
use crate::variant::ops::{DefaultVariantOperations, VariantOperations};
use crate::variant::Variant;

/// A compiled, reusable expression.
///
/// Compilation parses the expression once, verifies every called function
/// exists, and registers every referenced variable with a `Null` value.
/// The calculator can then be evaluated any number of times, with its own
/// variables or with an external collection per call.
///
/// # Example
///
/// ```
/// use tokex_calc::{ExpressionCalculator, Variant};
///
/// let mut calculator = ExpressionCalculator::new("price * (100 + rate) / 100").unwrap();
/// calculator.set_variable("price", Variant::from(200));
/// calculator.set_variable("rate", Variant::from(10));
/// let result = calculator.evaluate().unwrap();
/// assert_eq!(result, Variant::from(220));
/// ```
pub struct ExpressionCalculator {
    expression: String,
    instructions: Vec<Instruction>,
    variables: VariableCollection,
    functions: FunctionCollection,
    operations: Box<dyn VariantOperations>,
}

impl ExpressionCalculator {
    /// Compiles an expression against the standard function set.
    pub fn new(expression: &str) -> ExpressionResult<Self> {
        Self::with_functions(expression, default_function_collection())
    }

    /// Compiles an expression against a caller-provided function set.
    pub fn with_functions(
        expression: &str,
        functions: FunctionCollection,
    ) -> ExpressionResult<Self> {
        let parsed = parser::parse(expression, &functions)?;
        let (instructions, names) = parsed.into_parts();

        let mut variables = VariableCollection::new();
        for name in &names {
            variables.locate(name);
        }

        debug!(
            expression,
            instructions = instructions.len(),
            variables = variables.len(),
            "compiled expression"
        );

        Ok(Self {
            expression: expression.to_string(),
            instructions,
            variables,
            functions,
            operations: Box::new(DefaultVariantOperations::new()),
        })
    }

    /// The source text this calculator was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The variables the expression references. Every referenced name is
    /// present, initially `Null`.
    pub fn variables(&self) -> &VariableCollection {
        &self.variables
    }

    /// Mutable access to the calculator's own variables.
    pub fn variables_mut(&mut self) -> &mut VariableCollection {
        &mut self.variables
    }

    /// Sets one of the calculator's own variables.
    pub fn set_variable(&mut self, name: &str, value: Variant) {
        self.variables.set(name, value);
    }

    /// Replaces the variant operation set.
    pub fn set_operations(&mut self, operations: Box<dyn VariantOperations>) {
        self.operations = operations;
    }

    /// Evaluates with the calculator's own variables.
    pub fn evaluate(&self) -> ExpressionResult<Variant> {
        self.evaluate_with(&self.variables)
    }

    /// Evaluates with an external variable collection. Referenced names
    /// missing from the collection are evaluation errors.
    pub fn evaluate_with(&self, variables: &VariableCollection) -> ExpressionResult<Variant> {
        let mut stack: Vec<Variant> = Vec::new();
        let ops = self.operations.as_ref();

        for instruction in &self.instructions {
            match instruction {
                Instruction::PushConstant(value) => stack.push(value.clone()),
                Instruction::PushVariable(name) => {
                    let variable = variables
                        .find(name)
                        .ok_or_else(|| ExpressionError::UnknownVariable(name.clone()))?;
                    stack.push(variable.value().clone());
                },
                Instruction::CallFunction { name, arity } => {
                    if stack.len() < *arity {
                        return Err(ExpressionError::StackInconsistency);
                    }
                    let args = stack.split_off(stack.len() - arity);
                    let function = self
                        .functions
                        .find(name)
                        .ok_or_else(|| ExpressionError::UnknownFunction(name.clone()))?;
                    stack.push(function.calculate(&args, ops)?);
                },
                Instruction::Unary(op) => {
                    let value = pop(&mut stack)?;
                    let result = match op {
                        UnaryOp::Negate => ops.negative(&value)?,
                        UnaryOp::Not => ops.not(&value)?,
                    };
                    stack.push(result);
                },
                Instruction::Binary(op) => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    let result = match op {
                        BinaryOp::Add => ops.add(&left, &right)?,
                        BinaryOp::Subtract => ops.subtract(&left, &right)?,
                        BinaryOp::Multiply => ops.multiply(&left, &right)?,
                        BinaryOp::Divide => ops.divide(&left, &right)?,
                        BinaryOp::Modulo => ops.modulo(&left, &right)?,
                        BinaryOp::And => ops.and(&left, &right)?,
                        BinaryOp::Or => ops.or(&left, &right)?,
                        BinaryOp::Xor => ops.xor(&left, &right)?,
                        BinaryOp::ShiftLeft => ops.shift_left(&left, &right)?,
                        BinaryOp::ShiftRight => ops.shift_right(&left, &right)?,
                        BinaryOp::Equal => ops.equal(&left, &right)?,
                        BinaryOp::NotEqual => ops.not_equal(&left, &right)?,
                        BinaryOp::Less => ops.less(&left, &right)?,
                        BinaryOp::LessOrEqual => ops.less_or_equal(&left, &right)?,
                        BinaryOp::More => ops.more(&left, &right)?,
                        BinaryOp::MoreOrEqual => ops.more_or_equal(&left, &right)?,
                        BinaryOp::Like => ops.like(&left, &right)?,
                        BinaryOp::In => ops.is_in(&left, &right)?,
                    };
                    stack.push(result);
                },
            }
        }

        let result = pop(&mut stack)?;
        if !stack.is_empty() {
            return Err(ExpressionError::StackInconsistency);
        }
        debug!(expression = self.expression.as_str(), ?result, "evaluated expression");
        Ok(result)
    }
}

fn pop(stack: &mut Vec<Variant>) -> ExpressionResult<Variant> {
    stack.pop().ok_or(ExpressionError::StackInconsistency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> ExpressionResult<Variant> {
        ExpressionCalculator::new(expression)?.evaluate()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1 + 2 * 3").unwrap(), Variant::Integer(7));
        assert_eq!(eval("(1 + 2) * 3").unwrap(), Variant::Integer(9));
        assert_eq!(eval("7 % 3").unwrap(), Variant::Integer(1));
        assert_eq!(eval("-2 + 5").unwrap(), Variant::Integer(3));
    }

    #[test]
    fn test_boolean_logic() {
        assert_eq!(eval("NOT TRUE AND FALSE").unwrap(), Variant::Boolean(false));
        assert_eq!(eval("TRUE OR FALSE").unwrap(), Variant::Boolean(true));
        assert_eq!(eval("TRUE XOR TRUE").unwrap(), Variant::Boolean(false));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval("'a' = 'a'").unwrap(), Variant::Boolean(true));
        assert_eq!(eval("1 < 2").unwrap(), Variant::Boolean(true));
        assert_eq!(eval("2 <> 2").unwrap(), Variant::Boolean(false));
        assert_eq!(eval("3 >= 3").unwrap(), Variant::Boolean(true));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(eval("1 << 4").unwrap(), Variant::Integer(16));
        assert_eq!(eval("16 >> 2").unwrap(), Variant::Integer(4));
    }

    #[test]
    fn test_like_and_in() {
        assert_eq!(eval("'hello' LIKE 'h%'").unwrap(), Variant::Boolean(true));
        assert_eq!(
            eval("2 IN ARRAY(1, 2, 3)").unwrap(),
            Variant::Boolean(true)
        );
        assert_eq!(
            eval("'x' NOT IN ARRAY('a', 'b')").unwrap(),
            Variant::Boolean(true)
        );
    }

    #[test]
    fn test_variables_start_as_null() {
        let calculator = ExpressionCalculator::new("x + 1").unwrap();
        assert_eq!(
            calculator.variables().find("x").unwrap().value(),
            &Variant::Null
        );
        // Null in arithmetic is an evaluation error, not a silent zero.
        assert!(calculator.evaluate().is_err());
    }

    #[test]
    fn test_variable_assignment() {
        let mut calculator = ExpressionCalculator::new("x * y").unwrap();
        calculator.set_variable("x", Variant::from(6));
        calculator.set_variable("Y", Variant::from(7));
        assert_eq!(calculator.evaluate().unwrap(), Variant::Integer(42));
    }

    #[test]
    fn test_evaluate_with_external_variables() {
        let calculator = ExpressionCalculator::new("n > 10").unwrap();
        let mut variables = VariableCollection::new();
        variables.set("n", Variant::from(15));
        assert_eq!(
            calculator.evaluate_with(&variables).unwrap(),
            Variant::Boolean(true)
        );

        let empty = VariableCollection::new();
        assert_eq!(
            calculator.evaluate_with(&empty).unwrap_err(),
            ExpressionError::UnknownVariable("n".to_string())
        );
    }

    #[test]
    fn test_functions_in_expressions() {
        assert_eq!(eval("MAX(1, 2 * 3, 4)").unwrap(), Variant::Integer(6));
        assert_eq!(
            eval("IF(2 > 1, 'yes', 'no')").unwrap(),
            Variant::String("yes".to_string())
        );
        assert_eq!(eval("ABS(1 - 4)").unwrap(), Variant::Integer(3));
    }

    #[test]
    fn test_compile_errors_surface_before_evaluation() {
        assert_eq!(
            ExpressionCalculator::new("BOGUS(1)").err(),
            Some(ExpressionError::UnknownFunction("BOGUS".to_string()))
        );
        assert_eq!(
            ExpressionCalculator::new("1 +").err(),
            Some(ExpressionError::UnexpectedEnd)
        );
    }

    #[test]
    fn test_evaluation_errors() {
        assert_eq!(eval("1 / 0").unwrap_err(), ExpressionError::DivisionByZero);
        assert!(eval("TRUE + 1").is_err());
    }

    #[test]
    fn test_is_null_checks() {
        assert_eq!(eval("NULL IS NULL").unwrap(), Variant::Boolean(true));
        assert_eq!(eval("1 IS NOT NULL").unwrap(), Variant::Boolean(true));
    }

    #[test]
    fn test_reuse_across_evaluations() {
        let mut calculator = ExpressionCalculator::new("x + 1").unwrap();
        for n in 0..3 {
            calculator.set_variable("x", Variant::from(n));
            assert_eq!(calculator.evaluate().unwrap(), Variant::Integer(n + 1));
        }
    }
}
