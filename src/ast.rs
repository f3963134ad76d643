use std::rc::Rc;

/// A location in the source text.
///
/// Both fields are 1-based. The column is counted in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number in the source code.
    pub line:   usize,
    /// Column number in the source code.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed program: the top-level sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements in source order. Empty statements (`;`) are dropped.
    pub stats: Vec<Stat>,
}

/// An identifier occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    /// The identifier text.
    pub identifier: String,
    /// Where the identifier appears.
    pub pos:        Position,
}

/// A function literal `func (a, b, ...rest) { ... }`.
///
/// Function definitions are shared between the tree and the runtime function
/// values created from them, hence they live behind an `Rc` in [`Expr`].
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    /// Declared parameter names.
    pub params: Vec<Name>,
    /// Optional trailing `...name` parameter collecting surplus arguments.
    pub vararg: Option<Name>,
    /// Statements of the function body.
    pub body:   Vec<Stat>,
    /// Position of the `func` keyword.
    pub pos:    Position,
}

/// An abstract syntax tree (AST) node representing a statement.
///
/// Each variant owns its children and carries the position used when an
/// error has to be reported for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat {
    /// `{ stat* }`
    Block {
        /// Statements inside the block.
        stats: Vec<Self>,
        /// Position of the opening brace.
        pos:   Position,
    },
    /// `var a, b = 1, 2` or `const c = 3`.
    VarDecl {
        /// Declared names.
        names:    Vec<Name>,
        /// Initializers; missing ones default to `null`.
        exprs:    Vec<Expr>,
        /// Whether the declaration used `const`.
        constant: bool,
        /// Position of the `var`/`const` keyword.
        pos:      Position,
    },
    /// `if c1: s1 elif c2: s2 else: s3`.
    ///
    /// `else` is stored as a trailing `true` condition, so `conds` and
    /// `stats` always have the same length.
    If {
        /// Branch conditions.
        conds: Vec<Expr>,
        /// Branch bodies, one per condition.
        stats: Vec<Self>,
        /// Position of the `if` keyword.
        pos:   Position,
    },
    /// `switch e case a: s1 case b: s2 default: s3`.
    Switch {
        /// The scrutinee.
        expr:    Expr,
        /// Case expressions.
        cases:   Vec<Expr>,
        /// Case bodies, one per case expression.
        stats:   Vec<Self>,
        /// Body run when no case matched.
        default: Option<Box<Self>>,
        /// Position of the `switch` keyword.
        pos:     Position,
    },
    /// `repeat stat until cond`.
    Repeat {
        /// Loop body.
        stat: Box<Self>,
        /// Exit condition, checked after each iteration.
        cond: Expr,
        /// Position of the `repeat` keyword.
        pos:  Position,
    },
    /// `while cond: stat`.
    While {
        /// Loop condition.
        cond: Expr,
        /// Loop body.
        stat: Box<Self>,
        /// Position of the `while` keyword.
        pos:  Position,
    },
    /// `for i is start, stop, step: stat`.
    ForLoop {
        /// Induction variable.
        var:   Name,
        /// First value.
        start: Expr,
        /// Last value (inclusive).
        stop:  Expr,
        /// Optional increment, `1` when absent.
        step:  Option<Expr>,
        /// Loop body.
        stat:  Box<Self>,
        /// Position of the `for` keyword.
        pos:   Position,
    },
    /// `for k, v in expr: stat`.
    ForEach {
        /// First bound name (element, or key/index when `value` is present).
        key:   Name,
        /// Optional second bound name.
        value: Option<Name>,
        /// The iterated expression.
        expr:  Expr,
        /// Loop body.
        stat:  Box<Self>,
        /// Position of the `for` keyword.
        pos:   Position,
    },
    /// `break`
    Break {
        /// Position of the keyword.
        pos: Position,
    },
    /// `continue`
    Continue {
        /// Position of the keyword.
        pos: Position,
    },
    /// `return expr?`
    Return {
        /// Returned expression; `null` when absent.
        expr: Option<Expr>,
        /// Position of the keyword.
        pos:  Position,
    },
    /// `a, b[0] = x, y`
    Assign {
        /// Assignment targets (names or access chains).
        targets: Vec<Expr>,
        /// Assigned expressions.
        exprs:   Vec<Expr>,
        /// Position of the `=`.
        pos:     Position,
    },
    /// `a += x`
    CompoundAssign {
        /// The operator applied between the old value and `expr`.
        op:     BinaryOperator,
        /// Assignment target.
        target: Expr,
        /// Right-hand side.
        expr:   Expr,
        /// Position of the operator.
        pos:    Position,
    },
    /// A function call used as a statement.
    Call {
        /// The call expression (always [`Expr::FuncCall`]).
        call: Expr,
        /// Position of the statement.
        pos:  Position,
    },
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A function literal.
    FuncDef(Rc<FuncDef>),
    /// `callee(args)`
    FuncCall {
        /// Expression producing the called value.
        callee: Box<Self>,
        /// Argument expressions.
        args:   Vec<Self>,
        /// Position of the opening parenthesis.
        pos:    Position,
    },
    /// `cond ? then : otherwise`
    Select {
        /// Condition.
        cond:      Box<Self>,
        /// Value when the condition holds.
        then:      Box<Self>,
        /// Value otherwise.
        otherwise: Box<Self>,
        /// Position of the `?`.
        pos:       Position,
    },
    /// A binary operation.
    BinOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Position of the operator.
        pos:   Position,
    },
    /// A unary operation.
    UniOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Position of the operator.
        pos:  Position,
    },
    /// `[a, b, c]`
    ListCtor {
        /// Element expressions.
        exprs: Vec<Self>,
        /// Position of `[`.
        pos:   Position,
    },
    /// `{k1: v1, k2: v2}`
    MapCtor {
        /// Key expressions.
        keys:   Vec<Self>,
        /// Value expressions, one per key.
        values: Vec<Self>,
        /// Position of `{`.
        pos:    Position,
    },
    /// `{a, b, c}`
    SetCtor {
        /// Element expressions.
        exprs: Vec<Self>,
        /// Position of `{`.
        pos:   Position,
    },
    /// `expr[key]` or `expr.key`
    Access {
        /// The container expression.
        expr: Box<Self>,
        /// The key; for dot access a string literal.
        key:  Box<Self>,
        /// Whether the access was written with a dot.
        dot:  bool,
        /// Position of `[` or `.`.
        pos:  Position,
    },
    /// A reference to a variable.
    Name(Name),
    /// A numeric literal.
    Num {
        /// The literal value.
        value: NumLiteral,
        /// Position of the literal.
        pos:   Position,
    },
    /// A string literal.
    Str {
        /// The unescaped contents.
        value: String,
        /// Position of the literal.
        pos:   Position,
    },
    /// `true` or `false`.
    Bool {
        /// The literal value.
        value: bool,
        /// Position of the literal.
        pos:   Position,
    },
    /// `null`
    Null {
        /// Position of the literal.
        pos: Position,
    },
}

/// A numeric literal, keeping the integer/float distinction of the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumLiteral {
    /// An integer literal such as `42`.
    Int(i64),
    /// A float literal such as `2.5`.
    Float(f64),
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use toylang::ast::{Expr, Position};
    ///
    /// let expr = Expr::Null { pos: Position::new(3, 7) };
    ///
    /// assert_eq!(expr.position(), Position::new(3, 7));
    /// ```
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::FuncDef(def) => def.pos,
            Self::Name(name) => name.pos,
            Self::FuncCall { pos, .. }
            | Self::Select { pos, .. }
            | Self::BinOp { pos, .. }
            | Self::UniOp { pos, .. }
            | Self::ListCtor { pos, .. }
            | Self::MapCtor { pos, .. }
            | Self::SetCtor { pos, .. }
            | Self::Access { pos, .. }
            | Self::Num { pos, .. }
            | Self::Str { pos, .. }
            | Self::Bool { pos, .. }
            | Self::Null { pos } => *pos,
        }
    }

    /// Returns `true` if the expression may appear on the left of `=`.
    #[must_use]
    pub const fn is_lvalue(&self) -> bool {
        matches!(self, Self::Name(_) | Self::Access { .. })
    }
}

impl Stat {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Block { pos, .. }
            | Self::VarDecl { pos, .. }
            | Self::If { pos, .. }
            | Self::Switch { pos, .. }
            | Self::Repeat { pos, .. }
            | Self::While { pos, .. }
            | Self::ForLoop { pos, .. }
            | Self::ForEach { pos, .. }
            | Self::Break { pos }
            | Self::Continue { pos }
            | Self::Return { pos, .. }
            | Self::Assign { pos, .. }
            | Self::CompoundAssign { pos, .. }
            | Self::Call { pos, .. } => *pos,
        }
    }
}

/// Represents a binary operator.
///
/// `NotEqual`, `GreaterEqual` and `Greater` are kept in the tree as written;
/// the evaluator rewrites them to their complements when it applies them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Logical or (`or`)
    Or,
    /// Logical and (`and`)
    And,
    /// Membership (`in`)
    In,
    /// Type test or identity (`is`)
    Is,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Bitwise and (`&`)
    BitAnd,
    /// Shift left (`<<`)
    Shl,
    /// Shift right (`>>`)
    Shr,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Numeric identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`not x`).
    Not,
    /// Length (`#x`).
    Len,
    /// Bitwise NOT (`~x`).
    BitNot,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, In, Is, Less,
            LessEqual, Mod, Mul, NotEqual, Or, Pow, Shl, Shr, Sub,
        };
        let operator = match self {
            Or => "or",
            And => "and",
            In => "in",
            Is => "is",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            Shl => "<<",
            Shr => ">>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "not",
            Self::Len => "#",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}
