/// The semantic analysis pass.
///
/// Walks the AST with a stack of scopes and reports the first scoping
/// violation as a `SemanticError`.
pub mod core;

/// Scope symbol tables.
pub mod scope;
