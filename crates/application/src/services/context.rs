use rootwalk_domain::{DomainError, DomainName};

/// Names currently being resolved, outermost first.
///
/// Alias chasing and nameserver lookups push the name they start on and pop
/// it when done, so a name that reappears while still on the stack is a loop.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    stack: Vec<DomainName>,
    max_depth: usize,
}

impl ResolutionContext {
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
        }
    }

    pub fn enter(&mut self, name: &DomainName) -> Result<(), DomainError> {
        if self.stack.contains(name) {
            return Err(DomainError::AliasLoop {
                name: name.to_string(),
            });
        }
        // The top-level name does not count towards the limit.
        if self.stack.len() > self.max_depth {
            return Err(DomainError::AliasDepthExceeded {
                limit: self.max_depth,
            });
        }
        self.stack.push(name.clone());
        Ok(())
    }

    pub fn leave(&mut self) {
        self.stack.pop();
    }

    /// Nested lookups below the top-level name.
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }
}
