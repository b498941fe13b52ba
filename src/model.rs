use std::fmt;

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::entity_parser::ParsedEntities;
use crate::erd_ast::*;

/// What to do with a relation naming an entity that has no block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Keep the relation and report it.
    #[default]
    Keep,
    /// Drop the relation and report it.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    DuplicateEntity {
        name: String,
    },
    DanglingReference {
        relation: ResolvedRelation,
        missing: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateEntity { name } => {
                write!(f, "entity `{name}` is defined more than once, the last block wins")
            }
            Warning::DanglingReference { relation, missing } => {
                write!(f, "relation `{relation}` references undefined entity `{missing}`")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub entities: IndexMap<String, Entity>,
    pub relations: Vec<ResolvedRelation>,
    pub warnings: Vec<Warning>,
}

impl Model {
    /// Relations the given entity takes part in, in source order.
    pub fn relations_of<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a ResolvedRelation> {
        self.relations.iter().filter(move |r| r.involves(entity))
    }

    pub fn overwritten_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::DuplicateEntity { .. }))
            .count()
    }

    pub fn dangling(&self) -> impl Iterator<Item = (&ResolvedRelation, &str)> {
        self.warnings.iter().filter_map(|w| match w {
            Warning::DanglingReference { relation, missing } => Some((relation, missing.as_str())),
            Warning::DuplicateEntity { .. } => None,
        })
    }
}

pub fn assemble(
    parsed: ParsedEntities,
    relations: Vec<ResolvedRelation>,
    policy: DanglingPolicy,
) -> Model {
    let ParsedEntities {
        entities,
        overwritten,
    } = parsed;

    let mut warnings: Vec<Warning> = overwritten
        .into_iter()
        .map(|name| Warning::DuplicateEntity { name })
        .collect();

    let mut kept = Vec::with_capacity(relations.len());
    for relation in relations {
        let mut missing: Vec<String> = relation
            .names()
            .into_iter()
            .filter(|name| !entities.contains_key(*name))
            .map(str::to_string)
            .collect();
        // A self-reference to an undefined entity is reported once.
        missing.dedup();
        let dangling = !missing.is_empty();
        for name in missing {
            warnings.push(Warning::DanglingReference {
                relation: relation.clone(),
                missing: name,
            });
        }
        if !dangling || policy == DanglingPolicy::Keep {
            kept.push(relation);
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    Model {
        entities,
        relations: kept,
        warnings,
    }
}
