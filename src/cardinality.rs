use crate::erd_ast::*;

/// Reads the cardinality one side of a connector expresses. `|` wins over a
/// crow's foot, so `}|` (one or many) still counts as one.
pub fn classify(marker: &str) -> Cardinality {
    if marker.contains('|') {
        Cardinality::One
    } else if marker.contains(['{', '}']) {
        Cardinality::Many
    } else {
        Cardinality::Unknown
    }
}

/// Picks the relationship kind and the owning side. Anything undecided falls
/// back to one-to-many with the left entity as the "one".
pub fn resolve(
    left_card: Cardinality,
    right_card: Cardinality,
    left: &str,
    right: &str,
) -> ResolvedRelation {
    use Cardinality::*;

    let (left, right) = (left.to_string(), right.to_string());
    match (left_card, right_card) {
        (One, Many) => ResolvedRelation::OneToMany {
            one: left,
            many: right,
        },
        (Many, One) => ResolvedRelation::OneToMany {
            one: right,
            many: left,
        },
        (One, One) => ResolvedRelation::OneToOne { a: left, b: right },
        (Many, Many) => ResolvedRelation::ManyToMany { a: left, b: right },
        _ => ResolvedRelation::OneToMany {
            one: left,
            many: right,
        },
    }
}

pub fn resolve_relation(raw: &RawRelation) -> ResolvedRelation {
    resolve(
        classify(&raw.left_marker),
        classify(&raw.right_marker),
        &raw.left,
        &raw.right,
    )
}
