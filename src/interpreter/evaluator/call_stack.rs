use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
};

use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// What kind of construct an activation record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The global record.
    Program,
    /// A `{ ... }` block.
    Block,
    /// One execution of a loop statement.
    Loop,
    /// One call of a script function.
    Function,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Program => "PROGRAM",
            Self::Block => "BLOCK",
            Self::Loop => "LOOP",
            Self::Function => "FUNCTION",
        };
        write!(f, "{name}")
    }
}

/// A variable slot.
#[derive(Debug, Clone)]
struct Binding {
    value:    Value,
    constant: bool,
}

/// A frame of variable bindings.
///
/// `outer` links to the lexically enclosing record and keeps it alive, so a
/// closure that holds a record also holds everything it can see.
#[derive(Debug)]
pub struct ActivationRecord {
    /// Label used when the stack is printed.
    pub name:  String,
    /// The construct the record was created for.
    pub kind:  RecordKind,
    /// Depth on the call stack; the global record is level 1.
    pub level: usize,
    members:   HashMap<String, Binding>,
    outer:     Option<RecordRef>,
}

impl ActivationRecord {
    fn new(name: impl Into<String>, kind: RecordKind, level: usize, outer: Option<RecordRef>) -> Self {
        Self { name: name.into(),
               kind,
               level,
               members: HashMap::new(),
               outer }
    }

    /// Returns the value bound to `name` in this record only.
    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.members.get(name).map(|binding| binding.value.clone())
    }

    /// Binds `name` as a constant, replacing any previous binding.
    pub(crate) fn bind_builtin(&mut self, name: &str, value: Value) {
        self.members.insert(name.to_string(), Binding { value, constant: true });
    }
}

impl fmt::Display for ActivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} {}", self.level, self.kind, self.name)?;
        let mut names: Vec<_> = self.members.keys().collect();
        names.sort();
        for name in names {
            if let Some(binding) = self.members.get(name) {
                let marker = if binding.constant { "const " } else { "" };
                writeln!(f, "    {marker}{name:<10} = {}", binding.value.repr())?;
            }
        }
        Ok(())
    }
}

pub type RecordRef = Rc<RefCell<ActivationRecord>>;

/// The chain of live activation records.
///
/// The bottom record is the global one and is never popped; the top record
/// is the current one.
#[derive(Debug)]
pub struct CallStack {
    records: Vec<RecordRef>,
    calls:   usize,
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

impl CallStack {
    /// Creates a stack holding only an empty global record.
    #[must_use]
    pub fn new() -> Self {
        let global = ActivationRecord::new("global", RecordKind::Program, 1, None);
        Self { records: vec![Rc::new(RefCell::new(global))],
               calls:   0, }
    }

    /// Returns the global record.
    #[must_use]
    pub fn global(&self) -> &RecordRef {
        &self.records[0]
    }

    /// Returns the current (top) record.
    #[must_use]
    pub fn current(&self) -> &RecordRef {
        let last = self.records.len() - 1;
        &self.records[last]
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of script function calls in progress.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    /// Pushes a new record whose lookups continue in `outer`.
    pub fn push(&mut self, name: impl Into<String>, kind: RecordKind, outer: RecordRef) {
        if kind == RecordKind::Function {
            self.calls += 1;
        }
        let record = ActivationRecord::new(name, kind, self.records.len() + 1, Some(outer));
        self.records.push(Rc::new(RefCell::new(record)));
    }

    /// Pops the current record. The global record is never popped.
    pub fn pop(&mut self) {
        if self.records.len() > 1
           && let Some(record) = self.records.pop()
           && record.borrow().kind == RecordKind::Function
        {
            self.calls = self.calls.saturating_sub(1);
        }
    }

    /// Pops every record above the global one.
    pub fn unwind(&mut self) {
        self.records.truncate(1);
        self.calls = 0;
    }

    /// Binds `name` in the current record.
    ///
    /// # Errors
    /// `DuplicateDeclared` if the current record already binds `name`.
    pub fn declare(&self, name: &str, value: Value, constant: bool, pos: Position) -> EvalResult<()> {
        let mut record = self.current().borrow_mut();
        if record.members.contains_key(name) {
            return Err(InterpreterError::DuplicateDeclared { name: name.to_string(),
                                                             pos });
        }
        record.members.insert(name.to_string(), Binding { value, constant });
        Ok(())
    }

    /// Looks `name` up, starting at the current record and following
    /// `outer` links.
    ///
    /// # Errors
    /// `NameNotDeclared` if no record on the chain binds `name`.
    pub fn get(&self, name: &str, pos: Position) -> EvalResult<Value> {
        let mut record = Some(Rc::clone(self.current()));
        while let Some(current) = record {
            let current = current.borrow();
            if let Some(binding) = current.members.get(name) {
                return Ok(binding.value.clone());
            }
            record = current.outer.clone();
        }
        Err(InterpreterError::NameNotDeclared { name: name.to_string(),
                                                pos })
    }

    /// Rebinds an existing `name`, found the same way as [`CallStack::get`].
    ///
    /// Constant bindings are only written when `forced` is set; the loops use
    /// this to advance their induction variables.
    ///
    /// # Errors
    /// - `NameNotDeclared` if the name is not bound.
    /// - `NotAssignable` if the binding is constant and `forced` is unset.
    pub fn set(&self, name: &str, value: Value, forced: bool, pos: Position) -> EvalResult<()> {
        let mut record = Some(Rc::clone(self.current()));
        while let Some(current) = record {
            let mut current = current.borrow_mut();
            if let Some(binding) = current.members.get_mut(name) {
                if binding.constant && !forced {
                    return Err(InterpreterError::NotAssignable { name: name.to_string(),
                                                                 pos });
                }
                binding.value = value;
                return Ok(());
            }
            record = current.outer.clone();
        }
        Err(InterpreterError::NameNotDeclared { name: name.to_string(),
                                                pos })
    }
}

impl fmt::Display for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CALL STACK")?;
        for record in self.records.iter().rev() {
            write!(f, "{}", record.borrow())?;
        }
        Ok(())
    }
}
