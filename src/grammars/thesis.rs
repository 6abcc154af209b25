use derive::Fact;
use lexer::TokenKind;
use rules::predicate::{dictionary, eq, in_, in_caseless, kind, normalized};
use rules::{literal, not_, or_, reference, rule, Grammar, GrammarError, Rule};

use super::{fact, field, HYPHEN, QUOTE};

#[derive(Debug, Clone, PartialEq, Eq, Fact)]
pub struct Speciality {
    /// Dotted code such as `05.13.18`.
    pub code: Option<String>,
    pub hyphen: Option<String>,
    pub name: String,
}

impl Speciality {
    /// `code hyphen name`, dropping missing parts.
    pub fn label(&self) -> String {
        match (&self.code, &self.hyphen) {
            (Some(code), Some(hyphen)) => format!("{} {} {}", code, hyphen, self.name),
            (Some(code), None) => format!("{} {}", code, self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Fact)]
pub struct Branch {
    #[fact(normalized)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Fact)]
pub struct AcademicDegree {
    #[fact(normalized)]
    pub degree: String,
    pub branch: Branch,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Fact)]
pub struct Thesis {
    pub kind: Option<String>,
    pub title: String,
    pub speciality: Option<Speciality>,
    pub degree: Option<AcademicDegree>,
}

const SPECIALITY: &str = "speciality";
const ACADEMIC_DEGREE: &str = "academic_degree";

const KINDS: [&str; 3] = ["кандидатский", "докторский", "магистерский"];
const DIRECTIONS: [&str; 2] = ["направление", "специальность"];
const DEGREE_WORDS: [&str; 2] = ["кандидата", "доктора"];
/// The search for a degree never crosses these.
const SENTENCE_ENDS: [&str; 2] = [".", ";"];
const SCIENCES: &str = "наук";

/// [ code , [ hyphen ] ] , ( quote , { - quote }1.. @ name , quote | { - ( "." | ";" ) }1.. @ name )
fn speciality() -> Result<Rule, GrammarError> {
    let int = || literal(kind(TokenKind::Int)).repeatable();
    let code = rule(vec![
        rule(vec![int(), literal(eq(".")), int(), literal(eq(".")), int()])
            .interpretation(field::<Speciality>("code")?),
        reference(HYPHEN)
            .optional()
            .interpretation(field::<Speciality>("hyphen")?),
    ]);
    let quoted_name = rule(vec![
        reference(QUOTE),
        not_(reference(QUOTE))
            .repeatable()
            .interpretation(field::<Speciality>("name")?),
        reference(QUOTE),
    ]);
    let bare_name = not_(literal(in_(SENTENCE_ENDS)))
        .repeatable()
        .interpretation(field::<Speciality>("name")?);

    Ok(rule(vec![code.optional(), or_(vec![quoted_name, bare_name])])
        .interpretation(fact::<Speciality>()))
}

/// ( degree , { - "наук" }1.. @ Branch , "наук" ) @ AcademicDegree
fn academic_degree() -> Result<Rule, GrammarError> {
    let degree = or_(vec![
        literal(normalized("кандидат")),
        literal(normalized("доктор")),
    ]);
    let branch = not_(literal(eq(SCIENCES)))
        .repeatable()
        .interpretation(field::<Branch>("name")?)
        .interpretation(fact::<Branch>());

    Ok(rule(vec![
        degree.interpretation(field::<AcademicDegree>("degree")?),
        branch.interpretation(field::<AcademicDegree>("branch")?),
        literal(eq(SCIENCES)).interpretation(field::<AcademicDegree>("suffix")?),
    ])
    .interpretation(fact::<AcademicDegree>()))
}

/// Defines the shared speciality and degree rules in `grammar` and returns
/// the thesis rule:
///
/// thesis = ( [ kind ] @ kind , "диссертация" , title ) @ Thesis ,
///          [ [ { - ( degree-word | "." | ";" ) } , academic_degree @ degree ] ,
///            "по" , direction , speciality @ speciality ]
pub fn thesis(grammar: &mut Grammar) -> Result<Rule, GrammarError> {
    grammar.define(SPECIALITY, speciality()?)?;
    grammar.define(ACADEMIC_DEGREE, academic_degree()?)?;

    let title = rule(vec![
        not_(reference(QUOTE)).repeatable().optional(),
        reference(QUOTE),
        not_(reference(QUOTE))
            .repeatable()
            .interpretation(field::<Thesis>("title")?),
        reference(QUOTE),
    ]);
    let name = rule(vec![
        literal(dictionary(KINDS))
            .optional()
            .interpretation(field::<Thesis>("kind")?),
        literal(normalized("диссертация")),
        title,
    ])
    .interpretation(fact::<Thesis>());

    let degree = rule(vec![
        not_(literal(in_caseless(DEGREE_WORDS).or(in_(SENTENCE_ENDS)))).repeat(0, None),
        reference(ACADEMIC_DEGREE).interpretation(field::<Thesis>("degree")?),
    ]);
    let speciality = rule(vec![
        degree.optional(),
        literal(eq("по")),
        literal(dictionary(DIRECTIONS)),
        reference(SPECIALITY).interpretation(field::<Thesis>("speciality")?),
    ]);

    Ok(rule(vec![name, speciality.optional()]).interpretation(fact::<Thesis>()))
}
