//! Named variables for expression evaluation.

use crate::variant::Variant;

/// A named, mutable expression variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: Variant,
}

impl Variable {
    /// Creates a variable with a value.
    pub fn new(name: impl Into<String>, value: Variant) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The variable name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    pub fn value(&self) -> &Variant {
        &self.value
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: Variant) {
        self.value = value;
    }
}

/// A collection of variables with case-insensitive name lookup.
///
/// Insertion order is preserved, which keeps diagnostics and iteration
/// deterministic.
///
/// # Example
///
/// ```
/// use tokex_calc::{VariableCollection, Variant};
///
/// let mut variables = VariableCollection::new();
/// variables.set("Rate", Variant::from(0.5));
/// assert_eq!(variables.find("RATE").map(|v| v.value().clone()), Some(Variant::from(0.5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableCollection {
    variables: Vec<Variable>,
}

impl VariableCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when no variables are registered.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Finds a variable by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.variables
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Finds a variable mutably by name, ignoring ASCII case.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Adds a variable. A variable with the same name (any casing) is
    /// replaced.
    pub fn add(&mut self, variable: Variable) {
        match self.find_mut(variable.name()) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    /// Sets a variable's value, creating it when missing.
    pub fn set(&mut self, name: &str, value: Variant) {
        match self.find_mut(name) {
            Some(variable) => variable.set_value(value),
            None => self.variables.push(Variable::new(name, value)),
        }
    }

    /// Returns the variable with the given name, registering it with a
    /// `Null` value first when missing.
    pub fn locate(&mut self, name: &str) -> &mut Variable {
        if self.find(name).is_none() {
            self.variables.push(Variable::new(name, Variant::Null));
        }
        let index = self
            .variables
            .iter()
            .position(|v| v.name.eq_ignore_ascii_case(name))
            .unwrap_or(self.variables.len() - 1);
        &mut self.variables[index]
    }

    /// Removes all variables.
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Iterates the variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut variables = VariableCollection::new();
        variables.set("Total", Variant::from(10));
        assert!(variables.find("TOTAL").is_some());
        assert!(variables.find("total").is_some());
        assert!(variables.find("other").is_none());
    }

    #[test]
    fn test_set_replaces_value_not_name() {
        let mut variables = VariableCollection::new();
        variables.set("Total", Variant::from(1));
        variables.set("TOTAL", Variant::from(2));
        assert_eq!(variables.len(), 1);
        let variable = variables.find("total").unwrap();
        assert_eq!(variable.name(), "Total");
        assert_eq!(variable.value(), &Variant::from(2));
    }

    #[test]
    fn test_locate_creates_null_variable() {
        let mut variables = VariableCollection::new();
        assert_eq!(variables.locate("x").value(), &Variant::Null);
        assert_eq!(variables.len(), 1);
        variables.locate("x").set_value(Variant::from(5));
        assert_eq!(variables.len(), 1);
        assert_eq!(variables.find("x").unwrap().value(), &Variant::from(5));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut variables = VariableCollection::new();
        variables.set("b", Variant::from(1));
        variables.set("a", Variant::from(2));
        let names: Vec<_> = variables.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
