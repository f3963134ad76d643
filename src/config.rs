/// Settings injected into the analyzer and the interpreter.
///
/// Both phases log through the `log` facade; the tracing flags only decide
/// whether the high-volume `trace!` records are produced at all. Installing a
/// logger and choosing its level is left to the embedding program.
///
/// # Example
/// ```
/// use toylang::config::Config;
///
/// let config = Config { trace_calls: true,
///                       ..Config::default() };
///
/// assert!(!config.trace_scopes);
/// assert_eq!(config.max_call_depth, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Log every scope and activation record entered or left, and every
    /// symbol declared.
    pub trace_scopes:   bool,
    /// Log every function call with its arguments and result.
    pub trace_calls:    bool,
    /// How many script function calls may be in progress at once.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { trace_scopes:   false,
               trace_calls:    false,
               max_call_depth: 1000, }
    }
}
