use indexmap::IndexMap;
use log::debug;
use winnow::prelude::*;
use winnow::ascii::{multispace0, multispace1, till_line_ending};
use winnow::combinator::{alt, opt, preceded};
use winnow::token::{take, take_till, take_while};

use crate::erd_ast::*;

/// Entities keyed by name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEntities {
    pub entities: IndexMap<String, Entity>,
    /// Names whose block was replaced by a later block of the same name,
    /// once per replacement.
    pub overwritten: Vec<String>,
}

pub fn parse_entities(input: &str) -> ParsedEntities {
    let mut parsed = ParsedEntities::default();
    let mut rest = input;

    while !rest.is_empty() {
        let mut attempt = rest;
        match entity_block(&mut attempt) {
            Ok((name, body)) => {
                let entity = Entity {
                    name: name.to_string(),
                    attributes: parse_attributes(body),
                };
                debug!(entity = name, attributes = entity.attributes.len(); "Parsed entity block");
                // Replacing keeps the slot of the first block with that name.
                if parsed.entities.insert(entity.name.clone(), entity).is_some() {
                    parsed.overwritten.push(name.to_string());
                }
                rest = attempt;
            }
            Err(_) => {
                let step = rest.chars().next().map_or(1, char::len_utf8);
                rest = &rest[step..];
            }
        }
    }

    parsed
}

/// `entity Name { body }` or `class Name { body }`; the body may span lines
/// but cannot contain `}`.
fn entity_block<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    keyword.parse_next(input)?;
    multispace1.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    multispace0.parse_next(input)?;
    "{".parse_next(input)?;
    let body = take_till(0.., '}').parse_next(input)?;
    "}".parse_next(input)?;
    Ok((name, body))
}

fn keyword<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    alt((
        take(6usize).verify(|s: &str| s.eq_ignore_ascii_case("entity")),
        take(5usize).verify(|s: &str| s.eq_ignore_ascii_case("class")),
    ))
    .parse_next(input)
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., is_word_char).parse_next(input)
}

/// Attributes of one entity body, in declaration order. Never fails:
/// lines that do not yield a name are dropped.
pub fn parse_attributes(body: &str) -> Vec<Attribute> {
    body.lines().filter_map(parse_attribute_line).collect()
}

pub fn parse_attribute_line(line: &str) -> Option<Attribute> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return None;
    }

    let mut input = line;
    let (name, declared_type) = attribute_line(&mut input).ok()?;

    let name = name
        .trim()
        .trim_start_matches(['+', '-', '#', '*'])
        .trim();
    if name.is_empty() {
        return None;
    }

    let declared_type = declared_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_ATTRIBUTE_TYPE);

    Some(Attribute::new(name, declared_type))
}

/// `name` or `name : Type`, split on the first colon.
fn attribute_line<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, Option<&'s str>)> {
    let name = take_till(0.., ':').parse_next(input)?;
    let declared_type = opt(preceded(':', till_line_ending)).parse_next(input)?;
    Ok((name, declared_type))
}
