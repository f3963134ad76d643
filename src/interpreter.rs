/// The semantic analyzer checks scoping rules before execution.
///
/// The analyzer walks the AST with a stack of symbol tables. It never
/// evaluates anything; it only rejects programs that would misuse names or
/// control statements.
///
/// # Responsibilities
/// - Reports names used before declaration and names declared twice in one
///   scope.
/// - Rejects writes to constants, loop variables and built-ins.
/// - Rejects `break`/`continue` outside loops and `return` outside functions.
pub mod analyzer;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST statement by statement, keeping variables in
/// a chain of activation records. Statements report how they finished through
/// a `Flow` value, which is how `break`, `continue` and `return` travel
/// outward.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements.
/// - Manages activation records for blocks, loops and function calls.
/// - Reports runtime errors such as type mismatches or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a keyword, identifier, literal, operator or delimiter.
/// This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Handles numeric and string literals, escapes and comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens one at a time, holding a single token of
/// lookahead, and constructs the program tree by recursive descent.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Applies operator precedence and associativity.
/// - Reports the first grammar violation with its position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values scripts compute with: null, booleans,
/// integers, floats, strings, lists, maps, host objects, type tokens and
/// functions. It also provides truthiness, equality and printing.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversions and equality across variants.
/// - Defines map keys and function values.
pub mod value;
