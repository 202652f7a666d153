//! Callable functions for expression evaluation.
//!
//! A function receives its already-evaluated arguments plus the variant
//! operation set of the calling calculator, so its body applies the same
//! coercion rules as the expression around it. Function names are matched
//! case-insensitively.

mod default;

pub use default::default_function_collection;

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::ExpressionResult;
use crate::variant::ops::VariantOperations;
use crate::variant::Variant;

/// A function callable from an expression.
pub trait Function {
    /// The name the function is called by.
    fn name(&self) -> &str;

    /// Computes the function result from evaluated arguments.
    fn calculate(
        &self,
        args: &[Variant],
        operations: &dyn VariantOperations,
    ) -> ExpressionResult<Variant>;
}

/// Body signature for [`DelegatedFunction`].
pub type FunctionBody = dyn Fn(&[Variant], &dyn VariantOperations) -> ExpressionResult<Variant>;

/// A function defined by a closure.
///
/// # Example
///
/// ```
/// use tokex_calc::{DelegatedFunction, Function, Variant};
/// use tokex_calc::variant::ops::DefaultVariantOperations;
///
/// let double = DelegatedFunction::new("DOUBLE", |args, ops| {
///     ops.add(&args[0], &args[0])
/// });
/// let ops = DefaultVariantOperations::new();
/// let result = double.calculate(&[Variant::from(21)], &ops).unwrap();
/// assert_eq!(result, Variant::from(42));
/// ```
pub struct DelegatedFunction {
    name: String,
    body: Box<FunctionBody>,
}

impl DelegatedFunction {
    /// Creates a function from a name and a closure.
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&[Variant], &dyn VariantOperations) -> ExpressionResult<Variant> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl Function for DelegatedFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(
        &self,
        args: &[Variant],
        operations: &dyn VariantOperations,
    ) -> ExpressionResult<Variant> {
        (self.body)(args, operations)
    }
}

/// A collection of functions with case-insensitive name lookup.
#[derive(Default)]
pub struct FunctionCollection {
    functions: FxHashMap<String, Rc<dyn Function>>,
}

impl FunctionCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// True when no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registers a function, replacing any same-named one.
    pub fn add(&mut self, function: Rc<dyn Function>) {
        self.functions
            .insert(function.name().to_ascii_uppercase(), function);
    }

    /// Finds a function by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&Rc<dyn Function>> {
        self.functions.get(&name.to_ascii_uppercase())
    }

    /// True if a function with the name exists, ignoring ASCII case.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_ascii_uppercase())
    }

    /// Removes a function by name.
    pub fn remove(&mut self, name: &str) {
        self.functions.remove(&name.to_ascii_uppercase());
    }

    /// Removes all functions.
    pub fn clear(&mut self) {
        self.functions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::ops::DefaultVariantOperations;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut functions = FunctionCollection::new();
        functions.add(Rc::new(DelegatedFunction::new("Sum", |_, _| {
            Ok(Variant::Null)
        })));
        assert!(functions.contains("SUM"));
        assert!(functions.contains("sum"));
        assert!(!functions.contains("avg"));
    }

    #[test]
    fn test_replacement_by_name() {
        let mut functions = FunctionCollection::new();
        functions.add(Rc::new(DelegatedFunction::new("F", |_, _| {
            Ok(Variant::from(1))
        })));
        functions.add(Rc::new(DelegatedFunction::new("f", |_, _| {
            Ok(Variant::from(2))
        })));
        assert_eq!(functions.len(), 1);
        let ops = DefaultVariantOperations::new();
        let result = functions.find("F").unwrap().calculate(&[], &ops).unwrap();
        assert_eq!(result, Variant::from(2));
    }
}
