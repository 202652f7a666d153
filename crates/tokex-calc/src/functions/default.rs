//! The standard function set.

use std::rc::Rc;

use chrono::Utc;

use crate::errors::{ExpressionError, ExpressionResult};
use crate::functions::{DelegatedFunction, FunctionCollection};
use crate::variant::ops::VariantOperations;
use crate::variant::{Variant, VariantType};

fn expect_args(name: &str, args: &[Variant], expected: usize) -> ExpressionResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ExpressionError::ArityMismatch {
            name: name.to_string(),
            expected,
            actual: args.len(),
        })
    }
}

fn expect_at_least(name: &str, args: &[Variant], expected: usize) -> ExpressionResult<()> {
    if args.len() >= expected {
        Ok(())
    } else {
        Err(ExpressionError::ArityMismatch {
            name: name.to_string(),
            expected,
            actual: args.len(),
        })
    }
}

fn to_double(value: &Variant, operations: &dyn VariantOperations) -> ExpressionResult<f64> {
    match operations.convert(value, VariantType::Double)? {
        Variant::Double(v) => Ok(v),
        other => Err(ExpressionError::ConversionFailed {
            from: other.to_string(),
            to: VariantType::Double,
        }),
    }
}

/// Builds the collection of standard functions.
///
/// The set covers numeric helpers (`ABS`, `MIN`, `MAX`, `SUM`, `ROUND`,
/// `FLOOR`, `CEIL`, `SQRT`), the conditional `IF`, value tests (`EMPTY`),
/// the clock (`NOW`), conversions (`STRING`, `INTEGER`, `DOUBLE`) and the
/// `ARRAY` constructor.
pub fn default_function_collection() -> FunctionCollection {
    let mut functions = FunctionCollection::new();

    functions.add(Rc::new(DelegatedFunction::new("ABS", |args, ops| {
        expect_args("ABS", args, 1)?;
        match ops.less(&args[0], &Variant::Integer(0))? {
            Variant::Boolean(true) => ops.negative(&args[0]),
            _ => Ok(args[0].clone()),
        }
    })));

    functions.add(Rc::new(DelegatedFunction::new("MIN", |args, ops| {
        expect_at_least("MIN", args, 1)?;
        let mut best = args[0].clone();
        for arg in &args[1..] {
            if let Variant::Boolean(true) = ops.less(arg, &best)? {
                best = arg.clone();
            }
        }
        Ok(best)
    })));

    functions.add(Rc::new(DelegatedFunction::new("MAX", |args, ops| {
        expect_at_least("MAX", args, 1)?;
        let mut best = args[0].clone();
        for arg in &args[1..] {
            if let Variant::Boolean(true) = ops.more(arg, &best)? {
                best = arg.clone();
            }
        }
        Ok(best)
    })));

    functions.add(Rc::new(DelegatedFunction::new("SUM", |args, ops| {
        expect_at_least("SUM", args, 1)?;
        let mut total = args[0].clone();
        for arg in &args[1..] {
            total = ops.add(&total, arg)?;
        }
        Ok(total)
    })));

    functions.add(Rc::new(DelegatedFunction::new("IF", |args, ops| {
        expect_args("IF", args, 3)?;
        match ops.convert(&args[0], VariantType::Boolean)? {
            Variant::Boolean(true) => Ok(args[1].clone()),
            _ => Ok(args[2].clone()),
        }
    })));

    functions.add(Rc::new(DelegatedFunction::new("ROUND", |args, ops| {
        expect_args("ROUND", args, 1)?;
        Ok(Variant::Double(to_double(&args[0], ops)?.round()))
    })));

    functions.add(Rc::new(DelegatedFunction::new("FLOOR", |args, ops| {
        expect_args("FLOOR", args, 1)?;
        Ok(Variant::Double(to_double(&args[0], ops)?.floor()))
    })));

    functions.add(Rc::new(DelegatedFunction::new("CEIL", |args, ops| {
        expect_args("CEIL", args, 1)?;
        Ok(Variant::Double(to_double(&args[0], ops)?.ceil()))
    })));

    functions.add(Rc::new(DelegatedFunction::new("SQRT", |args, ops| {
        expect_args("SQRT", args, 1)?;
        let value = to_double(&args[0], ops)?;
        if value < 0.0 {
            return Err(ExpressionError::FunctionFailed {
                name: "SQRT".to_string(),
                message: "square root of a negative number".to_string(),
            });
        }
        Ok(Variant::Double(value.sqrt()))
    })));

    functions.add(Rc::new(DelegatedFunction::new("EMPTY", |args, _ops| {
        expect_args("EMPTY", args, 1)?;
        let empty = match &args[0] {
            Variant::Null => true,
            Variant::String(v) => v.is_empty(),
            Variant::Array(v) => v.is_empty(),
            _ => false,
        };
        Ok(Variant::Boolean(empty))
    })));

    functions.add(Rc::new(DelegatedFunction::new("NOW", |args, _ops| {
        expect_args("NOW", args, 0)?;
        Ok(Variant::DateTime(Utc::now()))
    })));

    functions.add(Rc::new(DelegatedFunction::new("STRING", |args, ops| {
        expect_args("STRING", args, 1)?;
        ops.convert(&args[0], VariantType::String)
    })));

    functions.add(Rc::new(DelegatedFunction::new("INTEGER", |args, ops| {
        expect_args("INTEGER", args, 1)?;
        ops.convert(&args[0], VariantType::Integer)
    })));

    functions.add(Rc::new(DelegatedFunction::new("DOUBLE", |args, ops| {
        expect_args("DOUBLE", args, 1)?;
        ops.convert(&args[0], VariantType::Double)
    })));

    functions.add(Rc::new(DelegatedFunction::new("ARRAY", |args, _ops| {
        Ok(Variant::Array(args.to_vec()))
    })));

    functions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::ops::DefaultVariantOperations;

    fn call(name: &str, args: &[Variant]) -> ExpressionResult<Variant> {
        let functions = default_function_collection();
        let ops = DefaultVariantOperations::new();
        functions
            .find(name)
            .expect("standard function")
            .calculate(args, &ops)
    }

    #[test]
    fn test_abs_preserves_the_numeric_tag() {
        assert_eq!(call("ABS", &[Variant::from(-5)]).unwrap(), Variant::from(5));
        assert_eq!(call("ABS", &[Variant::from(-1.5)]).unwrap(), Variant::from(1.5));
        assert_eq!(call("ABS", &[Variant::from(3)]).unwrap(), Variant::from(3));
    }

    #[test]
    fn test_min_max_sum() {
        let args = [Variant::from(3), Variant::from(1), Variant::from(2)];
        assert_eq!(call("MIN", &args).unwrap(), Variant::from(1));
        assert_eq!(call("MAX", &args).unwrap(), Variant::from(3));
        assert_eq!(call("SUM", &args).unwrap(), Variant::from(6));
    }

    #[test]
    fn test_if_converts_its_condition() {
        let args = [Variant::from(true), Variant::from(1), Variant::from(2)];
        assert_eq!(call("IF", &args).unwrap(), Variant::from(1));
        let args = [Variant::from(0), Variant::from(1), Variant::from(2)];
        assert_eq!(call("IF", &args).unwrap(), Variant::from(2));
    }

    #[test]
    fn test_rounding_family() {
        assert_eq!(call("ROUND", &[Variant::from(1.5)]).unwrap(), Variant::from(2.0));
        assert_eq!(call("FLOOR", &[Variant::from(1.9)]).unwrap(), Variant::from(1.0));
        assert_eq!(call("CEIL", &[Variant::from(1.1)]).unwrap(), Variant::from(2.0));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(call("SQRT", &[Variant::from(9)]).unwrap(), Variant::from(3.0));
        let err = call("SQRT", &[Variant::from(-1)]).unwrap_err();
        assert_eq!(err.code(), "FUNCTION_FAILED");
    }

    #[test]
    fn test_empty() {
        assert_eq!(call("EMPTY", &[Variant::Null]).unwrap(), Variant::from(true));
        assert_eq!(call("EMPTY", &[Variant::from("")]).unwrap(), Variant::from(true));
        assert_eq!(call("EMPTY", &[Variant::from("x")]).unwrap(), Variant::from(false));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(call("STRING", &[Variant::from(42)]).unwrap(), Variant::from("42"));
        assert_eq!(call("INTEGER", &[Variant::from("7")]).unwrap(), Variant::from(7));
        assert_eq!(call("DOUBLE", &[Variant::from(1)]).unwrap(), Variant::from(1.0));
    }

    #[test]
    fn test_array_constructor() {
        let result = call("ARRAY", &[Variant::from(1), Variant::from("a")]).unwrap();
        assert_eq!(
            result,
            Variant::Array(vec![Variant::from(1), Variant::from("a")])
        );
    }

    #[test]
    fn test_arity_is_checked() {
        let err = call("ABS", &[]).unwrap_err();
        assert_eq!(err.code(), "ARITY_MISMATCH");
        let err = call("IF", &[Variant::from(true)]).unwrap_err();
        assert_eq!(err.code(), "ARITY_MISMATCH");
    }
}
