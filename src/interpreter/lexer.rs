use logos::Logos;

use crate::error::LexError;
use crate::position::Span;

/// Superscript glyphs the lexer recognizes, paired index-for-index with
/// [`NORMAL`]. There is no superscript `q` or `Q`, and several uppercase
/// letters share their lowercase glyph.
const SUPERSCRIPT: &str =
    "ᵃᵇᶜᵈᵉᶠᵍʰⁱʲᵏˡᵐⁿᵒᵖʳˢᵗᵘᵛʷˣʸᶻᴬᴮᴰᴱᴳᴴᴵᴶᴷᴸᴹᴺᴼᴾᴿᵀᵁⱽᵂ⁰¹²³⁴⁵⁶⁷⁸⁹⁺⁻⁼⁽⁾";
/// The plain forms of [`SUPERSCRIPT`].
const NORMAL: &str = "abcdefghijklmnoprstuvwxyzABDEGHIJKLMNOPRTUVW0123456789+-=()";

/// One piece of a string literal at the token level: literal text, or the
/// token run of a `{expr}` interpolation with spans already remapped into
/// the outer source's byte coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum StrFragment {
    Literal(String),
    Tokens(Vec<(Token, Span)>),
}

/// Intermediate lexing failure, widened to a spanned [`LexError`] by [`lex`].
///
/// Logos reports an unmatched character as the `Default` variant; callbacks
/// that already know the precise error wrap it in `Full`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No token pattern matched at the current position.
    #[default]
    Illegal,
    /// A callback built the error, span and all.
    Full(LexError),
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
#[logos(extras = usize)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, or `1_000`.
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?", parse_number)]
    #[regex(r"\.[0-9][0-9_]*", parse_number)]
    Number(f64),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// String literal tokens, already split into literal text and
    /// interpolated `{expr}` token runs.
    #[token("\"", lex_string)]
    Str(Vec<StrFragment>),
    /// A run of superscript glyphs such as `²` or `ˣ⁺¹`, re-lexed in their
    /// plain forms. The parser treats a trailing run as an exponent.
    #[regex(
        r"[ᵃᵇᶜᵈᵉᶠᵍʰⁱʲᵏˡᵐⁿᵒᵖʳˢᵗᵘᵛʷˣʸᶻᴬᴮᴰᴱᴳᴴᴵᴶᴷᴸᴹᴺᴼᴾᴿᵀᵁⱽᵂ⁰¹²³⁴⁵⁶⁷⁸⁹⁺⁻⁼⁽⁾]+",
        lex_superscript
    )]
    Superscript(Vec<(Token, Span)>),
    /// `let`
    #[token("let")]
    Let,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `loop`
    #[token("loop")]
    Loop,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// `await`
    #[token("await")]
    Await,
    /// `import`
    #[token("import")]
    Import,
    /// `in`
    #[token("in")]
    In,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; names such as `x`, `area`, `π`, or `∞`.
    #[regex(r"[A-Za-z_∞\p{Greek}][A-Za-z0-9_∞\p{Greek}]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `->`
    #[token("->")]
    Arrow,
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<=`
    #[token("<=")]
    LessEq,
    /// `>=`
    #[token(">=")]
    GreaterEq,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+=`
    #[token("+=")]
    PlusEq,
    /// `-=`
    #[token("-=")]
    MinusEq,
    /// `*=`
    #[token("*=")]
    StarEq,
    /// `/=`
    #[token("/=")]
    SlashEq,
    /// `%=`
    #[token("%=")]
    PercentEq,
    /// `^=`
    #[token("^=")]
    CaretEq,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `±`
    #[token("±")]
    PlusMinus,
    /// `∓`
    #[token("∓")]
    MinusPlus,
    /// `*`
    #[token("*")]
    Star,
    /// `∙`
    #[token("∙")]
    Dot,
    /// `×`
    #[token("×")]
    Cross,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `√`
    #[token("√")]
    Sqrt,
    /// `∛`
    #[token("∛")]
    Cbrt,
    /// `∜`
    #[token("∜")]
    FourthRoot,
    /// `∑`
    #[token("∑")]
    Sum,
    /// `∏`
    #[token("∏")]
    Product,
    /// `!`
    #[token("!")]
    Bang,
    /// `°`
    #[token("°")]
    Degree,
    /// `=`
    #[token("=")]
    Equals,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `⟨`
    #[token("⟨")]
    LAngle,
    /// `⟩`
    #[token("⟩")]
    RAngle,
    /// `|`
    #[token("|")]
    Pipe,
    /// `⌊`
    #[token("⌊")]
    LFloor,
    /// `⌋`
    #[token("⌋")]
    RFloor,
    /// `⌈`
    #[token("⌈")]
    LCeil,
    /// `⌉`
    #[token("⌉")]
    RCeil,
    /// Statement separator: a newline or `;`.
    #[token("\n")]
    #[token(";")]
    Separator,
    /// End of input; appended once by [`lex`], never matched from text.
    Eof,
}

/// Scans a whole source text into tokens.
///
/// Whitespace is skipped; newlines and `;` become [`Token::Separator`]. The
/// returned stream always ends with a zero-width [`Token::Eof`]. Spans are
/// byte ranges into `source`, including the spans nested inside string
/// interpolations and superscript runs.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// - `Ok(tokens)`: Every token paired with its span.
///
/// # Errors
/// - [`LexError`]: On the first illegal character, unterminated string, or
///   unterminated interpolation.
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    lex_at(source, 0)
}

/// Scans `source` as if it started at absolute byte offset `base`, so the
/// nested runs inside strings and superscripts report outer coordinates.
fn lex_at(source: &str, base: usize) -> Result<Vec<(Token, Span)>, LexError> {
    let mut lexer = Token::lexer_with_extras(source, base);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = Span::new(base + lexer.span().start, base + lexer.span().end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(LexErrorKind::Full(error)) => return Err(error),
            Err(LexErrorKind::Illegal) => {
                let ch = lexer.slice().chars().next().unwrap_or('\0');
                return Err(LexError::IllegalCharacter { ch, span });
            }
        }
    }
    let end = Span::new(base + source.len(), base + source.len());
    tokens.push((Token::Eof, end));
    Ok(tokens)
}

/// Parses a numeric literal from the current token slice, ignoring `_`
/// separators.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    let digits: String = lex.slice().chars().filter(|&c| c != '_').collect();
    digits.parse().ok()
}

/// Scans the body of a string literal, starting just after the opening `"`.
///
/// Handles `\\`, `\n`, `\r`, `\t` escapes (any other escaped character
/// stands for itself, so `\"` and `\{` suppress their special meaning) and
/// `{expr}` interpolations, whose contents are lexed recursively with spans
/// remapped into the outer source.
///
/// # Parameters
/// - `lex`: The Logos lexer, positioned on the opening quote.
///
/// # Returns
/// - `Ok(fragments)`: The literal and interpolated pieces, in order.
///
/// # Errors
/// - `LexErrorKind::Full`: If the string or an interpolation never closes,
///   or an interpolation fails to lex.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<Vec<StrFragment>, LexErrorKind> {
    let start = lex.extras + lex.span().start;
    let base = lex.extras + lex.span().end;
    let rest = lex.remainder();

    let mut fragments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while let Some(ch) = rest[i..].chars().next() {
        i += ch.len_utf8();
        match ch {
            '"' => {
                lex.bump(i);
                if !literal.is_empty() || fragments.is_empty() {
                    fragments.push(StrFragment::Literal(literal));
                }
                return Ok(fragments);
            }
            '\\' => {
                let Some(escaped) = rest[i..].chars().next() else {
                    break;
                };
                i += escaped.len_utf8();
                literal.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    other => other,
                });
            }
            '{' => {
                if !literal.is_empty() {
                    fragments.push(StrFragment::Literal(std::mem::take(&mut literal)));
                }
                let Some(len) = interpolation_len(&rest[i..]) else {
                    let span = Span::new(base + i - 1, base + rest.len());
                    return Err(LexErrorKind::Full(LexError::UnterminatedInterpolation {
                        span,
                    }));
                };
                let inner = &rest[i..i + len];
                let tokens = lex_at(inner, base + i).map_err(LexErrorKind::Full)?;
                fragments.push(StrFragment::Tokens(tokens));
                i += len + 1;
            }
            _ => literal.push(ch),
        }
    }

    let span = Span::new(start, base + rest.len());
    Err(LexErrorKind::Full(LexError::UnterminatedString { span }))
}

/// The byte length of the interpolation body starting at the beginning of
/// `text` (just after the `{`), up to its matching `}`. Counts brace depth,
/// so nested `{ ... }` blocks inside the expression are fine.
fn interpolation_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Translates a run of superscript glyphs to its plain form and re-lexes it
/// so that, for example, `²` carries the same tokens as `2`.
///
/// Glyph widths vary between two and three bytes, so each re-lexed span is
/// remapped through a byte-offset table back into the outer source.
///
/// # Parameters
/// - `lex`: The Logos lexer, positioned on the glyph run.
///
/// # Returns
/// - `Ok(tokens)`: The plain-form token run, outer spans attached.
///
/// # Errors
/// - `LexErrorKind::Illegal`: If the plain form fails to lex.
fn lex_superscript(lex: &logos::Lexer<Token>) -> Result<Vec<(Token, Span)>, LexErrorKind> {
    let base = lex.extras + lex.span().start;
    let run = lex.slice();

    let mut plain = String::new();
    let mut offsets = Vec::with_capacity(run.chars().count() + 1);
    for (i, ch) in run.char_indices() {
        offsets.push(i);
        plain.push(to_normal(ch));
    }
    offsets.push(run.len());

    let tokens = match lex_at(&plain, 0) {
        Ok(tokens) => tokens,
        Err(_) => return Err(LexErrorKind::Illegal),
    };
    Ok(tokens
        .into_iter()
        .map(|(token, span)| {
            let span = Span::new(base + offsets[span.start], base + offsets[span.end]);
            (token, span)
        })
        .collect())
}

/// The plain form of a superscript glyph; characters outside the table pass
/// through unchanged.
fn to_normal(ch: char) -> char {
    SUPERSCRIPT
        .chars()
        .zip(NORMAL.chars())
        .find(|&(sup, _)| sup == ch)
        .map_or(ch, |(_, normal)| normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(source: &str) -> Vec<(Token, Span)> {
        lex(source).unwrap()
    }

    #[test]
    fn numbers_allow_separators_and_leading_dot() {
        let tokens = ok("1_000 .5");
        assert_eq!(tokens[0].0, Token::Number(1000.0));
        assert_eq!(tokens[1].0, Token::Number(0.5));
        assert_eq!(tokens[2].0, Token::Eof);
    }

    #[test]
    fn spans_are_byte_ranges() {
        let tokens = ok("let x = 12");
        assert_eq!(tokens[0], (Token::Let, Span::new(0, 3)));
        assert_eq!(tokens[1], (Token::Identifier("x".into()), Span::new(4, 5)));
        assert_eq!(tokens[2], (Token::Equals, Span::new(6, 7)));
        assert_eq!(tokens[3], (Token::Number(12.0), Span::new(8, 10)));
        assert_eq!(tokens[4], (Token::Eof, Span::new(10, 10)));
    }

    #[test]
    fn spans_tile_the_source() {
        let source = "let θ = 45°\nlet v = ⟨1, 2⟩ ∙ ⟨3, 4⟩; v ± √2";
        let rebuilt: String = ok(source)
            .iter()
            .filter(|(token, _)| *token != Token::Eof)
            .map(|(_, span)| &source[span.start..span.end])
            .collect();
        let unskipped: String = source
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '\t' | '\r' | '\x0c'))
            .collect();
        assert_eq!(rebuilt, unskipped);
    }

    #[test]
    fn keywords_beat_identifiers() {
        let tokens = ok("for forge in inner");
        assert_eq!(tokens[0].0, Token::For);
        assert_eq!(tokens[1].0, Token::Identifier("forge".into()));
        assert_eq!(tokens[2].0, Token::In);
        assert_eq!(tokens[3].0, Token::Identifier("inner".into()));
    }

    #[test]
    fn greek_and_infinity_are_identifiers() {
        let tokens = ok("π + ∞");
        assert_eq!(tokens[0].0, Token::Identifier("π".into()));
        assert_eq!(tokens[1].0, Token::Plus);
        assert_eq!(tokens[2].0, Token::Identifier("∞".into()));
    }

    #[test]
    fn flat_string_is_one_literal_fragment() {
        let tokens = ok(r#""hi\nthere""#);
        let Token::Str(fragments) = &tokens[0].0 else {
            panic!("expected a string token");
        };
        assert_eq!(fragments, &[StrFragment::Literal("hi\nthere".into())]);
        assert_eq!(tokens[0].1, Span::new(0, 11));
    }

    #[test]
    fn interpolation_spans_use_outer_coordinates() {
        let tokens = ok(r#""a{x + 1}b""#);
        let Token::Str(fragments) = &tokens[0].0 else {
            panic!("expected a string token");
        };
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], StrFragment::Literal("a".into()));
        let StrFragment::Tokens(inner) = &fragments[1] else {
            panic!("expected an interpolated fragment");
        };
        assert_eq!(inner[0], (Token::Identifier("x".into()), Span::new(3, 4)));
        assert_eq!(inner[1], (Token::Plus, Span::new(5, 6)));
        assert_eq!(inner[2], (Token::Number(1.0), Span::new(7, 8)));
        assert_eq!(inner[3], (Token::Eof, Span::new(8, 8)));
        assert_eq!(fragments[2], StrFragment::Literal("b".into()));
    }

    #[test]
    fn unterminated_string_reports_the_opening_quote() {
        let error = lex("\"oops").unwrap_err();
        assert_eq!(
            error,
            LexError::UnterminatedString {
                span: Span::new(0, 5)
            }
        );
    }

    #[test]
    fn superscript_run_relexes_with_remapped_spans() {
        let tokens = ok("x²");
        assert_eq!(tokens[0].0, Token::Identifier("x".into()));
        let Token::Superscript(inner) = &tokens[1].0 else {
            panic!("expected a superscript token");
        };
        // '²' is 2 bytes, right after the 1-byte 'x'
        assert_eq!(inner[0], (Token::Number(2.0), Span::new(1, 3)));
    }

    #[test]
    fn superscript_expressions_translate_glyph_by_glyph() {
        let tokens = ok("eⁿ⁺¹");
        let Token::Superscript(inner) = &tokens[1].0 else {
            panic!("expected a superscript token");
        };
        assert_eq!(inner[0].0, Token::Identifier("n".into()));
        assert_eq!(inner[1].0, Token::Plus);
        assert_eq!(inner[2].0, Token::Number(1.0));
    }

    #[test]
    fn illegal_character_is_reported_with_its_span() {
        let error = lex("1 + $").unwrap_err();
        assert_eq!(
            error,
            LexError::IllegalCharacter {
                ch: '$',
                span: Span::new(4, 5)
            }
        );
    }
}
