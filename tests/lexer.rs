use toylang::{
    ast::Position,
    error::LexerError,
    interpreter::lexer::{Token, TokenStream},
    tokenize,
};

fn tokens(src: &str) -> Vec<Token> {
    match tokenize(src) {
        Ok(tokens) => tokens.into_iter().map(|(token, _)| token).collect(),
        Err(e) => panic!("Lexing failed: {e}\n{src}"),
    }
}

fn positions(src: &str) -> Vec<(usize, usize)> {
    match tokenize(src) {
        Ok(tokens) => tokens.into_iter()
                            .map(|(_, pos)| (pos.line, pos.column))
                            .collect(),
        Err(e) => panic!("Lexing failed: {e}\n{src}"),
    }
}

fn lex_err(src: &str) -> LexerError {
    match tokenize(src) {
        Ok(tokens) => panic!("Lexing succeeded but was expected to fail:\n{src}\n{tokens:?}"),
        Err(e) => e,
    }
}

#[test]
fn longest_operator_wins() {
    assert_eq!(tokens("** **= * *= ... < <= << <<= > >= >> >>="),
               vec![Token::StarStar,
                    Token::StarStarAssign,
                    Token::Star,
                    Token::StarAssign,
                    Token::Ellipsis,
                    Token::Less,
                    Token::LessEqual,
                    Token::Shl,
                    Token::ShlAssign,
                    Token::Greater,
                    Token::GreaterEqual,
                    Token::Shr,
                    Token::ShrAssign,
                    Token::Eof]);
    assert_eq!(tokens("a.b"),
               vec![Token::Identifier("a".into()), Token::Dot, Token::Identifier("b".into()), Token::Eof]);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(tokens("var variable is island null nullable"),
               vec![Token::Var,
                    Token::Identifier("variable".into()),
                    Token::Is,
                    Token::Identifier("island".into()),
                    Token::Null,
                    Token::Identifier("nullable".into()),
                    Token::Eof]);
}

#[test]
fn number_literals() {
    assert_eq!(tokens("42 3.25 2.5e3 1.0E-2 7"),
               vec![Token::Int(42),
                    Token::Float(3.25),
                    Token::Float(2500.0),
                    Token::Float(0.01),
                    Token::Int(7),
                    Token::Eof]);
    assert_eq!(tokens("9223372036854775807"), vec![Token::Int(i64::MAX), Token::Eof]);

    let err = lex_err("x = 9223372036854775808");
    assert_eq!(err,
               LexerError::IntegerTooLarge { literal: "9223372036854775808".to_string(),
                                             pos:     Position::new(1, 5), });
}

#[test]
fn string_literals_and_escapes() {
    assert_eq!(tokens(r#""a\tb\n" 'it\'s' `x\`y`"#),
               vec![Token::Str("a\tb\n".into()),
                    Token::Str("it's".into()),
                    Token::Str("x`y".into()),
                    Token::Eof]);
    assert_eq!(tokens("\"héllo\""), vec![Token::Str("héllo".into()), Token::Eof]);
    assert_eq!(tokens("`two\r\nlines`"), vec![Token::Str("two\nlines".into()), Token::Eof]);
}

#[test]
fn string_errors_point_at_the_opening_quote() {
    let err = lex_err("var s = \"abc");
    assert_eq!(err, LexerError::UnterminatedString { pos: Position::new(1, 9) });

    let err = lex_err("  'line\nbreak'");
    assert_eq!(err, LexerError::UnterminatedString { pos: Position::new(1, 3) });

    let err = lex_err("x = \"bad \\q\"");
    assert_eq!(err,
               LexerError::UnsupportedEscape { ch:  'q',
                                               pos: Position::new(1, 5), });
}

#[test]
fn unrecognized_characters() {
    let err = lex_err("a = 1\nb = $");
    assert_eq!(err,
               LexerError::UnrecognizedChar { ch:  '$',
                                              pos: Position::new(2, 5), });
    assert_eq!(err.to_string(), "LexerError: 2:5: unrecognized char `$`");

    let err = lex_err("x ! y");
    assert!(matches!(err, LexerError::UnrecognizedChar { ch: '!', .. }));
}

#[test]
fn comments_are_skipped() {
    assert_eq!(tokens("a // rest of line\nb /* block\n comment */ c /* unterminated"),
               vec![Token::Identifier("a".into()),
                    Token::Identifier("b".into()),
                    Token::Identifier("c".into()),
                    Token::Eof]);
}

#[test]
fn positions_track_lines_and_columns() {
    assert_eq!(positions("var x\n  = 10"), vec![(1, 1), (1, 5), (2, 3), (2, 5), (2, 7)]);
    assert_eq!(positions("`a\nb` c"), vec![(1, 1), (2, 4), (2, 5)]);
    assert_eq!(positions("/* x\n\n */ y"), vec![(3, 5), (3, 6)]);
    assert_eq!(positions("\"é\" z"), vec![(1, 1), (1, 5), (1, 6)]);
}

#[test]
fn end_of_input_repeats() {
    let mut stream = TokenStream::new("x");

    assert_eq!(stream.next_token().unwrap().0, Token::Identifier("x".into()));
    for _ in 0..3 {
        assert_eq!(stream.next_token().unwrap(), (Token::Eof, Position::new(1, 2)));
    }
}
