use log::debug;
use winnow::prelude::*;
use winnow::ascii::{space0, till_line_ending};
use winnow::combinator::{opt, preceded};
use winnow::stream::Stream;
use winnow::token::take_while;

use crate::entity_parser::is_word_char;
use crate::erd_ast::*;

fn is_marker_char(c: char) -> bool {
    matches!(c, '<' | '>' | '|' | 'o' | '{' | '}')
}

/// Every relationship line of the document, in source order.
pub fn parse_relations(input: &str) -> Vec<RawRelation> {
    input.lines().filter_map(parse_relation_line).collect()
}

/// Tokenizes one line, trying each tier in turn. Lines that are blank,
/// commented out, lack `--`, or name fewer than two identifiers yield `None`.
pub fn parse_relation_line(line: &str) -> Option<RawRelation> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || !line.contains("--") {
        return None;
    }

    let relation = strict_relation(line)
        .or_else(|| split_relation(line))
        .or_else(|| bare_relation(line))?;
    debug!(
        left = relation.left.as_str(),
        right = relation.right.as_str(),
        tier:? = relation.tier;
        "Tokenized relation line"
    );
    Some(relation)
}

/// Tier 1: `Left<markers>--<markers>Right[: label]`, markers glued to both names.
pub fn strict_relation(line: &str) -> Option<RawRelation> {
    strict_line.parse(line.trim()).ok()
}

fn strict_line(input: &mut &str) -> winnow::Result<RawRelation> {
    let left = identifier.parse_next(input)?;
    let left_marker = take_while(0.., is_marker_char).parse_next(input)?;
    take_while(2.., '-').parse_next(input)?;
    let right_marker = leading_marker.parse_next(input)?;
    let right = identifier.parse_next(input)?;
    let label = opt(label).parse_next(input)?;

    Ok(RawRelation {
        left: left.to_string(),
        left_marker: left_marker.to_string(),
        right: right.to_string(),
        right_marker: right_marker.to_string(),
        label,
        tier: Tier::Strict,
    })
}

/// Tier 2: split at the first `--` and match `Left [markers]` and
/// `[markers] Right [: label]` separately, so whitespace may surround markers.
pub fn split_relation(line: &str) -> Option<RawRelation> {
    let (left_fragment, right_fragment) = line.split_once("--")?;
    let (left, left_marker) = left_fragment_line.parse(left_fragment.trim()).ok()?;
    // Longer dash runs (`---o{`) continue the connector.
    let right_fragment = right_fragment.trim_start_matches('-').trim();
    let (right_marker, right, label) = right_fragment_line.parse(right_fragment).ok()?;

    Some(RawRelation {
        left: left.to_string(),
        left_marker: left_marker.to_string(),
        right: right.to_string(),
        right_marker: right_marker.to_string(),
        label,
        tier: Tier::SplitOnDashes,
    })
}

fn left_fragment_line<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    let name = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let marker = take_while(0.., is_marker_char).parse_next(input)?;
    Ok((name, marker))
}

fn right_fragment_line<'s>(
    input: &mut &'s str,
) -> winnow::Result<(&'s str, &'s str, Option<String>)> {
    let marker = leading_marker.parse_next(input)?;
    space0.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    let label = opt(label).parse_next(input)?;
    Ok((marker, name, label))
}

/// Tier 3: the first two words of the line, with no markers and no label.
pub fn bare_relation(line: &str) -> Option<RawRelation> {
    let mut words = line.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty());
    let left = words.next()?;
    let right = words.next()?;

    Some(RawRelation {
        left: left.to_string(),
        left_marker: String::new(),
        right: right.to_string(),
        right_marker: String::new(),
        label: None,
        tier: Tier::BareIdentifiers,
    })
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., is_word_char).parse_next(input)
}

/// Marker characters in front of an identifier. `o` doubles as a word
/// character, so trailing `o`s that run straight into a name stay with the
/// name: `--order` is a bare connector followed by `order`.
fn leading_marker<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    let text: &'s str = *input;
    let run = text.find(|c: char| !is_marker_char(c)).unwrap_or(text.len());
    let len = if text[run..].starts_with(is_word_char) {
        text[..run].trim_end_matches('o').len()
    } else {
        run
    };
    Ok(input.next_slice(len))
}

fn label(input: &mut &str) -> winnow::Result<String> {
    let text = preceded((space0, ':', space0), till_line_ending).parse_next(input)?;
    Ok(text.trim().to_string())
}
