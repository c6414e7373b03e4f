//! Block-scope tracking for the line transpiler.
//!
//! The converter scans a Postman test script top to bottom and needs to know,
//! at every line, which blocks are still open. `ScopeStack` is that single
//! piece of cross-line state: a plain LIFO of `Scope` tags, one instance per
//! script conversion.

/// The kind of block a line opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// A `pm.test(...)` block that maps to a real `client.test` block.
    Test,
    /// A `pm.test(...)` block declared while another test was already open.
    /// The target dialect cannot nest tests, so this one is demoted to a log
    /// statement and its closing line is suppressed.
    EmbeddedTest,
    /// A `.forEach(...)` iteration block.
    Iteration,
    /// An `if (...)` block.
    Condition,
    /// A `function ... {` declaration.
    Function,
}

/// Ordered stack of currently open scopes. Top = most recently opened.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

/// One indentation unit of converted output.
pub const INDENT_UNIT: &str = "    ";

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Removes and returns the top scope. Popping an empty stack is a no-op
    /// that returns `None`; malformed input degrades instead of failing.
    pub fn pop(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    pub fn peek(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// True if a test scope is open anywhere on the stack, not only on top.
    /// A test can be buried under iteration/condition scopes while new
    /// `pm.test` declarations are still being evaluated against it.
    pub fn contains_test(&self) -> bool {
        self.scopes
            .iter()
            .any(|s| matches!(s, Scope::Test | Scope::EmbeddedTest))
    }

    /// One indentation unit per open scope; empty at depth 0.
    pub fn indentation(&self) -> String {
        INDENT_UNIT.repeat(self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_on_empty_stack_is_a_noop() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.indentation(), "");
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::Test);
        stack.push(Scope::Iteration);
        assert_eq!(stack.peek(), Some(&Scope::Iteration));
        assert_eq!(stack.pop(), Some(Scope::Iteration));
        assert_eq!(stack.pop(), Some(Scope::Test));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn contains_test_sees_buried_test_scopes() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::Test);
        stack.push(Scope::Iteration);
        stack.push(Scope::Condition);
        assert!(stack.contains_test());

        let mut no_test = ScopeStack::new();
        no_test.push(Scope::Iteration);
        no_test.push(Scope::Function);
        assert!(!no_test.contains_test());
    }

    #[test]
    fn embedded_test_counts_as_test() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::EmbeddedTest);
        assert!(stack.contains_test());
    }

    #[test]
    fn indentation_tracks_depth() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::Test);
        assert_eq!(stack.indentation(), INDENT_UNIT);
        stack.push(Scope::Iteration);
        assert_eq!(stack.indentation(), INDENT_UNIT.repeat(2));
        stack.pop();
        assert_eq!(stack.indentation(), INDENT_UNIT);
    }
}
