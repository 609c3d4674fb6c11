pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to look ahead past whitespace.
///
/// Spans of the returned tokens are measured in characters, not bytes, so that they can be
/// reported directly.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    // spans only grow, so the byte to char conversion can resume where it left off
    let (mut byte_pos, mut char_pos) = (0, 0);
    let mut to_char = |offset: usize| {
        char_pos += input[byte_pos..offset].chars().count();
        byte_pos = offset;
        char_pos
    };

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let start = to_char(span.start);
        let end = to_char(span.end);
        tokens.push(Token {
            span: start..end,
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2.5",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "2.5"),
            ],
        );
    }

    #[test]
    fn number_forms() {
        compare_tokens(
            ".5*1e3-2.5e-3+4.E+2",
            [
                (TokenKind::Float, ".5"),
                (TokenKind::Mul, "*"),
                (TokenKind::Float, "1e3"),
                (TokenKind::Sub, "-"),
                (TokenKind::Float, "2.5e-3"),
                (TokenKind::Add, "+"),
                (TokenKind::Float, "4.E+2"),
            ],
        );
    }

    #[test]
    fn functions_and_variables() {
        compare_tokens(
            "ctg(x)^exp y",
            [
                (TokenKind::Cot, "ctg"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Var, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Exp, "^"),
                (TokenKind::ExpFn, "exp"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Var, "y"),
            ],
        );
    }

    #[test]
    fn unknown_symbols() {
        compare_tokens(
            "sinh z",
            [
                (TokenKind::Sin, "sin"),
                (TokenKind::Symbol, "h"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "z"),
            ],
        );
    }

    #[test]
    fn spans_count_characters() {
        let tokens = tokenize_complete("π + x");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..1, 1..2, 2..3, 3..4, 4..5]);
        assert_eq!(tokens[0].kind, TokenKind::Symbol);
        assert_eq!(tokens[4].kind, TokenKind::Var);
    }
}
