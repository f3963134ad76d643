/// The `Value` enum and its conversions, truthiness, equality and display.
pub mod core;
/// Function values: script closures and native host functions.
pub mod function;
/// Map values.
///
/// Defines `MapKey`, the restricted set of hashable keys, and `MapValue`, an
/// insertion-ordered map whose key order is cached until the key set
/// changes.
pub mod map_value;
