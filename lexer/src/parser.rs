use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::anychar,
    combinator::{map, recognize, verify},
    IResult,
};

use crate::{Token, TokenKind};

pub fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

pub fn word(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(take_while1(char::is_alphabetic), |w: &str| (word_kind(w), w))(input)
}

pub fn int(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(take_while1(|c: char| c.is_ascii_digit()), |d: &str| {
        (TokenKind::Int, d)
    })(input)
}

/// Any single character that isn't whitespace. Only reached once `word` and
/// `int` have failed.
pub fn punct(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(
        recognize(verify(anychar, |c: &char| !c.is_whitespace())),
        |p: &str| (TokenKind::Punct, p),
    )(input)
}

pub fn token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((word, int, punct))(input)
}

/// Scan the full input into untagged tokens.
pub fn scan(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rem = text;
    loop {
        let after_space = match whitespace(rem) {
            Ok((after, _)) => after,
            Err(_) => break,
        };
        if after_space.is_empty() {
            break;
        }
        match token(after_space) {
            Ok((next, (kind, matched))) => {
                let start = text.len() - after_space.len();
                tokens.push(Token::new(start, start + matched.len(), matched, kind));
                rem = next;
            }
            Err(_) => break,
        }
    }
    tokens
}

fn word_kind(word: &str) -> TokenKind {
    if word.chars().all(is_cyrillic) {
        TokenKind::Russian
    } else if word.chars().all(|c| c.is_ascii_alphabetic()) {
        TokenKind::Latin
    } else {
        TokenKind::Other
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{052F}')
}
