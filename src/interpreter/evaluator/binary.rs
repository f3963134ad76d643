/// Operator dispatch.
///
/// Holds the operator table, the short-circuit logic of `and` and `or`, and
/// the rewriting of `!=`, `>=` and `>` into negated complements.
pub mod core;

/// Arithmetic operators: `+ - * / % **`.
///
/// Integer arithmetic is checked; `/` and `%` on integers round toward
/// negative infinity.
pub mod arithmetic;

/// Bitwise operators on integers: `& | ^ << >>`.
pub mod bitwise;

/// Equality, ordering, membership and identity: `== < <= in is`.
pub mod comparison;
