//! A small date grammar exercising the combinators end to end, plus the
//! matching policies callers rely on.
//!
//! date  = day , [ "." ] , month , year ;
//! day   = 1..31 ;
//! month = month-name | 1..12 ;
//! year  = 1000..2100 , [ "г" , [ "." ] ] ;

use lexer::{tokenize, Lexicon, Token};
use pretty_assertions::assert_eq;
use rules::predicate::{eq, in_caseless, kind, range};
use rules::{
    literal, or_, reference, rule, FieldSpec, Grammar, InterpretError, Record, Rule, Schema,
    Span, TokenKind, Value,
};

const MONTHS: [&str; 3] = ["января", "февраля", "марта"];

fn toks(input: &str) -> Vec<Token> {
    tokenize(input, &Lexicon::new())
}

fn date_schema() -> Schema {
    Schema::new("Date")
        .with_field(FieldSpec::text("day").required())
        .with_field(FieldSpec::text("month").required())
        .with_field(FieldSpec::text("year"))
}

fn date_grammar(schema: &Schema) -> (Grammar, Rule) {
    let mut grammar = Grammar::new();
    grammar.define("day", literal(range(1, 31))).unwrap();
    grammar
        .define(
            "month",
            or_(vec![literal(in_caseless(MONTHS)), literal(range(1, 12))]),
        )
        .unwrap();
    grammar
        .define(
            "year",
            rule(vec![
                literal(range(1000, 2100)).interpretation(schema.field("year").unwrap()),
                rule(vec![literal(eq("г")), literal(eq(".")).optional()]).optional(),
            ]),
        )
        .unwrap();
    grammar.validate().unwrap();

    let date = rule(vec![
        reference("day").interpretation(schema.field("day").unwrap()),
        literal(eq(".")).optional(),
        reference("month").interpretation(schema.field("month").unwrap()),
        literal(eq(".")).optional(),
        reference("year").optional(),
    ])
    .interpretation(schema.binding());
    (grammar, date)
}

fn date(day: &str, month: &str, year: Option<&str>) -> Record {
    let mut record = Record::empty(&date_schema());
    record.set("day", Value::Text(day.to_owned()));
    record.set("month", Value::Text(month.to_owned()));
    if let Some(year) = year {
        record.set("year", Value::Text(year.to_owned()));
    }
    record
}

#[test]
fn dates() {
    struct TestCase {
        input: &'static str,
        expected: Vec<Record>,
    }

    let tests = vec![
        TestCase {
            input: "защита 12 марта 2009 г. в 14",
            expected: vec![date("12", "марта", Some("2009"))],
        },
        TestCase {
            input: "с 1.02.1999 по 3 Января",
            expected: vec![date("1", "02", Some("1999")), date("3", "Января", None)],
        },
        TestCase {
            input: "32 марта, 40 13",
            expected: vec![],
        },
        TestCase {
            input: "",
            expected: vec![],
        },
    ];

    let schema = date_schema();
    let (grammar, date) = date_grammar(&schema);
    for test in tests {
        let tokens = toks(test.input);
        let got: Vec<Record> = grammar
            .find_all(&date, &tokens)
            .map(|m| m.fact().unwrap())
            .collect();
        assert_eq!(test.expected, got, "input: {}", test.input);
    }
}

#[test]
fn repeat_is_greedy_without_backtracking() {
    let tokens = toks("1 2 3 x");
    let grammar = Grammar::new();
    let digits = literal(kind(TokenKind::Int)).repeatable();

    let spans: Vec<Span> = grammar.find_all(&digits, &tokens).map(|m| m.span()).collect();
    assert_eq!(spans, vec![Span::new(0, 3)]);

    // The repeat keeps the last digit, so the trailing digit never matches.
    let then_digit = rule(vec![digits.clone(), literal(kind(TokenKind::Int))]);
    assert!(grammar.match_at(&then_digit, &tokens, 0).is_none());
    assert_eq!(grammar.find_all(&then_digit, &tokens).count(), 0);
}

#[test]
fn alternative_prefers_first_branch() {
    let tokens = toks("доктор наук");
    let grammar = Grammar::new();
    let short = literal(eq("доктор"));
    let long = rule(vec![literal(eq("доктор")), literal(eq("наук"))]);

    let first_short = or_(vec![short.clone(), long.clone()]);
    let first_long = or_(vec![long, short]);
    let span = |r: &Rule| grammar.match_at(r, &tokens, 0).map(|m| m.span());
    assert_eq!(span(&first_short), Some(Span::new(0, 1)));
    assert_eq!(span(&first_long), Some(Span::new(0, 2)));
}

#[test]
fn nested_facts() {
    let inner = Schema::new("Code")
        .with_field(FieldSpec::text("major"))
        .with_field(FieldSpec::text("minor"));
    let outer = Schema::new("Entry")
        .with_field(FieldSpec::text("label").normalized())
        .with_field(FieldSpec::nested("code"));

    let code = rule(vec![
        literal(kind(TokenKind::Int)).interpretation(inner.field("major").unwrap()),
        literal(eq(".")),
        literal(kind(TokenKind::Int)).interpretation(inner.field("minor").unwrap()),
    ])
    .interpretation(inner.binding());
    let mut grammar = Grammar::new();
    grammar.define("code", code).unwrap();

    let entry = rule(vec![
        literal(kind(TokenKind::Russian))
            .repeatable()
            .interpretation(outer.field("label").unwrap()),
        reference("code")
            .optional()
            .interpretation(outer.field("code").unwrap()),
    ])
    .interpretation(outer.binding());

    let tokens = toks("Шифр Статьи 05.13 Раздел");
    let records: Vec<Record> = grammar
        .find_all(&entry, &tokens)
        .map(|m| m.fact().unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.text("label"), Some("шифр статьи"));
    let code = first.record("code").unwrap();
    assert_eq!(code.name(), "Code");
    assert_eq!(code.text("major"), Some("05"));
    assert_eq!(code.text("minor"), Some("13"));

    assert_eq!(records[1].text("label"), Some("раздел"));
    assert!(records[1].get("code").is_absent());
}

#[test]
fn missing_required_field_is_reported() {
    let schema = Schema::new("Pair")
        .with_field(FieldSpec::text("left").required())
        .with_field(FieldSpec::text("right").required());
    let pair = rule(vec![
        literal(kind(TokenKind::Int)).interpretation(schema.field("left").unwrap()),
        literal(eq(":")),
        literal(kind(TokenKind::Int)),
    ])
    .interpretation(schema.binding());

    let grammar = Grammar::new();
    let tokens = toks("1:2");
    let m = grammar.find_all(&pair, &tokens).next().unwrap();
    assert_eq!(m.text(), "1:2");
    assert_eq!(
        m.fact(),
        Err(InterpretError::MissingRequiredField {
            fact: "Pair".to_owned(),
            field: "right".to_owned(),
        })
    );
}

#[test]
fn find_all_is_restartable() {
    let tokens = toks("a 1 b 2");
    let grammar = Grammar::new();
    let int = literal(kind(TokenKind::Int));
    let first: Vec<Span> = grammar.find_all(&int, &tokens).map(|m| m.span()).collect();
    let second: Vec<Span> = grammar.find_all(&int, &tokens).map(|m| m.span()).collect();
    assert_eq!(first, vec![Span::new(1, 2), Span::new(3, 4)]);
    assert_eq!(first, second);
}
