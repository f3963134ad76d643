use std::collections::HashMap;

/// What a declared name refers to, as far as the analyzer is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A `var` declaration or a function parameter; assignable.
    Var,
    /// A `const` declaration, including desugared `func name`.
    Const,
    /// A loop induction variable. Updated by the loop itself, never by the
    /// program.
    Name,
    /// A built-in type token or host function.
    Builtin,
}

impl SymbolKind {
    /// Returns `true` if the program may assign to a symbol of this kind.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Var)
    }
}

/// The symbols declared in one lexical scope.
///
/// Flags are copied from the parent on entry unless the scope is a loop or
/// function body, which set them itself.
#[derive(Debug, Clone)]
pub struct ScopeSymbolTable {
    /// Human-readable scope label, used in traces.
    pub identifier:  &'static str,
    /// Nesting depth; the global scope is level 0.
    pub level:       usize,
    /// Whether `break`/`continue` are allowed here.
    pub in_loop:     bool,
    /// Whether `return` is allowed here.
    pub in_function: bool,
    symbols:         HashMap<String, SymbolKind>,
}

impl ScopeSymbolTable {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(identifier: &'static str, level: usize, in_loop: bool, in_function: bool) -> Self {
        Self { identifier,
               level,
               in_loop,
               in_function,
               symbols: HashMap::new() }
    }

    /// Declares `name` in this scope.
    ///
    /// # Returns
    /// `false` if the name was already declared here; the existing symbol is
    /// kept.
    pub fn insert(&mut self, name: &str, kind: SymbolKind) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(name.to_string(), kind);
        true
    }

    /// Looks `name` up in this scope only.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).copied()
    }
}

impl std::fmt::Display for ScopeSymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.symbols.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));

        write!(f, "<{},{}>", self.identifier, self.level)?;
        for (name, kind) in names {
            write!(f, " {name}:{kind:?}")?;
        }
        Ok(())
    }
}
