use std::fmt;
use std::rc::Rc;

use crate::position::Span;

/// A prefix or postfix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    /// Identity (`+x`).
    Pos,
    /// Negation (`-x`).
    Neg,
    /// Plus-or-minus (`±x`), yielding a two-element list.
    PlusMinus,
    /// Minus-or-plus (`∓x`), the reversed list.
    MinusPlus,
    /// Square root (`√x`).
    Sqrt,
    /// Cube root (`∛x`).
    Cbrt,
    /// Fourth root (`∜x`).
    FourthRoot,
    /// Summation over a list (`∑xs`).
    Sum,
    /// Product over a list (`∏xs`).
    Product,
    /// Logical NOT (`not x`).
    Not,
    /// Factorial (postfix `x!`).
    Factorial,
    /// Degrees-to-radians (postfix `x°`).
    Degrees,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::PlusMinus => "±",
            Self::MinusPlus => "∓",
            Self::Sqrt => "√",
            Self::Cbrt => "∛",
            Self::FourthRoot => "∜",
            Self::Sum => "∑",
            Self::Product => "∏",
            Self::Not => "not",
            Self::Factorial => "!",
            Self::Degrees => "°",
        };
        write!(f, "{op}")
    }
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Plus-or-minus (`±`), yielding a two-element list.
    PlusMinus,
    /// Minus-or-plus (`∓`), the reversed list.
    MinusPlus,
    /// Multiplication (`*`).
    Mul,
    /// Dot product (`∙`).
    Dot,
    /// Cross product (`×`); multiplication for scalars.
    Cross,
    /// Division (`/`).
    Div,
    /// Remainder (`%`).
    Rem,
    /// Exponentiation (`^`), right-associative.
    Pow,
    /// Range construction or re-stepping (`:`).
    Range,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
    /// Logical AND (`and`).
    And,
    /// Logical OR (`or`).
    Or,
    /// Membership (`in`).
    In,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::PlusMinus => "±",
            Self::MinusPlus => "∓",
            Self::Mul => "*",
            Self::Dot => "∙",
            Self::Cross => "×",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
            Self::Range => ":",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::In => "in",
        };
        write!(f, "{op}")
    }
}

/// An assignment operator applied to an identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignOp {
    /// Plain assignment (`=`).
    Set,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Rem,
    /// `^=`
    Pow,
    /// `++`, with an implicit right operand of `1`.
    Inc,
    /// `--`, with an implicit right operand of `1`.
    Dec,
}

impl AssignOp {
    /// The binary operator a compound assignment evaluates, if any.
    #[must_use]
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Set => None,
            Self::Add | Self::Inc => Some(BinaryOp::Add),
            Self::Sub | Self::Dec => Some(BinaryOp::Sub),
            Self::Mul => Some(BinaryOp::Mul),
            Self::Div => Some(BinaryOp::Div),
            Self::Rem => Some(BinaryOp::Rem),
            Self::Pow => Some(BinaryOp::Pow),
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Set => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Rem => "%=",
            Self::Pow => "^=",
            Self::Inc => "++",
            Self::Dec => "--",
        };
        write!(f, "{op}")
    }
}

/// A bracket-pair unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupOp {
    /// Absolute value (`|x|`).
    Abs,
    /// Floor (`⌊x⌋`).
    Floor,
    /// Ceiling (`⌈x⌉`).
    Ceil,
}

impl fmt::Display for GroupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Abs => "| |",
            Self::Floor => "⌊ ⌋",
            Self::Ceil => "⌈ ⌉",
        };
        write!(f, "{op}")
    }
}

/// One piece of a string literal: either literal text or an expression
/// spliced in with `{expr}`.
#[derive(Debug, Clone, PartialEq)]
pub enum StrPiece {
    Literal(String),
    Expr(Node),
}

/// An abstract syntax tree node.
///
/// One variant per syntax construct; each carries the span of the source text
/// it was parsed from. Nodes are produced once by the parser and never
/// mutated, so loop and function bodies can be walked repeatedly.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric literal.
    Number { value: f64, span: Span },
    /// A boolean literal.
    Boolean { value: bool, span: Span },
    /// A string literal, possibly holding interpolated expressions.
    Str { pieces: Vec<StrPiece>, span: Span },
    /// A list literal (`[a, b, c]`).
    List { items: Vec<Node>, span: Span },
    /// A vector literal (`⟨x, y, z⟩`).
    Vector { components: Vec<Node>, span: Span },
    /// A matrix literal (`[[a, b], [c, d]]`).
    Matrix { rows: Vec<Vec<Node>>, span: Span },
    /// A reference to a name.
    Identifier { name: String, span: Span },
    /// `let name = expr`; always introduces a binding in the current scope.
    Declaration {
        name: String,
        value: Box<Node>,
        span: Span,
    },
    /// `name = expr`, a compound form, or `name++` / `name--`; overwrites the
    /// nearest enclosing binding.
    Assignment {
        name: String,
        op: AssignOp,
        value: Option<Box<Node>>,
        span: Span,
    },
    /// A prefix or postfix unary operation.
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
        span: Span,
    },
    /// A binary operation.
    Binary {
        lhs: Box<Node>,
        op: BinaryOp,
        rhs: Box<Node>,
        span: Span,
    },
    /// A bracket-pair operation (`|x|`, `⌊x⌋`, `⌈x⌉`).
    Grouping {
        op: GroupOp,
        operand: Box<Node>,
        span: Span,
    },
    /// `if cond: body` with an optional `else` arm.
    If {
        condition: Box<Node>,
        body: Box<Node>,
        else_body: Option<Box<Node>>,
        span: Span,
    },
    /// `for x in iterable: body`.
    For {
        binding: String,
        iterable: Box<Node>,
        body: Box<Node>,
        span: Span,
    },
    /// `while cond: body`.
    While {
        condition: Box<Node>,
        body: Box<Node>,
        span: Span,
    },
    /// `loop: body`; exits only via `return`.
    Loop { body: Box<Node>, span: Span },
    /// A function definition, in block form (`fn f(x) { ... }`), arrow form
    /// (`fn f(x) -> expr`), or equation form (`f(x) = expr`).
    FuncDef {
        name: String,
        params: Vec<String>,
        body: Rc<Node>,
        span: Span,
    },
    /// A call of a named function.
    FuncCall {
        name: String,
        name_span: Span,
        args: Vec<Node>,
        span: Span,
    },
    /// `return expr?`.
    Return {
        value: Option<Box<Node>>,
        span: Span,
    },
    /// `await expr`.
    Await { operand: Box<Node>, span: Span },
    /// A trailing `[prop]` access.
    PropAccess {
        target: Box<Node>,
        prop: Box<Node>,
        span: Span,
    },
    /// `import name`.
    Import { module: String, span: Span },
    /// A sequence of statements: a `{ ... }` body or a whole program.
    Block { statements: Vec<Node>, span: Span },
}

impl Node {
    /// The source span this node was parsed from.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Number { span, .. }
            | Self::Boolean { span, .. }
            | Self::Str { span, .. }
            | Self::List { span, .. }
            | Self::Vector { span, .. }
            | Self::Matrix { span, .. }
            | Self::Identifier { span, .. }
            | Self::Declaration { span, .. }
            | Self::Assignment { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Grouping { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::Loop { span, .. }
            | Self::FuncDef { span, .. }
            | Self::FuncCall { span, .. }
            | Self::Return { span, .. }
            | Self::Await { span, .. }
            | Self::PropAccess { span, .. }
            | Self::Import { span, .. }
            | Self::Block { span, .. } => *span,
        }
    }
}
