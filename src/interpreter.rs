/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with its byte span. String literals arrive pre-split into literal
/// text and interpolated token runs, and superscript glyph runs arrive
/// re-lexed in their plain forms with remapped spans.
///
/// # Responsibilities
/// - Converts the input character stream into `(Token, Span)` pairs.
/// - Handles numeric and string literals, identifiers, operators, and the
///   Unicode operator glyphs.
/// - Reports lexical errors for illegal characters and unterminated
///   strings or interpolations.
pub mod lexer;

/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST representing the syntactic structure of statements and
/// expressions. It is a hand-written recursive-descent precedence ladder.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes with spans.
/// - Validates grammar, reporting the first error with its location.
/// - Handles implicit multiplication, superscript exponents, and the
///   equation form of function definitions.
pub mod parser;

/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST depth-first, applying operators through
/// the value model, managing the scope chain, and threading early returns
/// explicitly through a `Flow` result.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles declarations, assignment, functions, control flow, `await`,
///   and `import`.
/// - Reports runtime errors with the span of the failing construct.
pub mod evaluator;

/// The value module defines the runtime data types for evaluation.
///
/// This module declares all value kinds used during execution: numbers,
/// booleans, strings, complex numbers, lists, vectors, matrices, ranges,
/// functions, futures, and the `none` sentinel, together with their
/// operator dispatch.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements per-kind operator behavior and display formatting.
/// - Rejects unsupported operator/kind pairings with descriptive errors.
pub mod value;

/// The scope module implements the lexical environment chain.
///
/// Scopes are shared, reference-counted frames; functions keep a handle to
/// their defining frame so closures outlive it.
///
/// # Responsibilities
/// - Declares bindings in the current frame and resolves names outwards.
/// - Distinguishes declaration (shadowing) from assignment (overwriting).
pub mod scope;

/// The modules module hosts the importable standard modules.
///
/// `std`, `physics`, and `fs` are built here as flat lists of named values;
/// `import` copies a module's exports into the importing scope.
///
/// # Responsibilities
/// - Defines each module's constants and builtin functions.
/// - Gates modules with ambient authority behind the safe-mode flag.
pub mod modules;
