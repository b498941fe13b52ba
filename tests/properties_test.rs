use erdgen::cardinality::{classify, resolve};
use erdgen::erd_ast::*;
use erdgen::entity_parser::parse_entities;
use proptest::prelude::*;

fn cardinality_strategy() -> impl Strategy<Value = Cardinality> {
    prop_oneof![
        Just(Cardinality::One),
        Just(Cardinality::Many),
        Just(Cardinality::Unknown),
    ]
}

fn entity_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,10}"
}

fn relation_strategy() -> impl Strategy<Value = ResolvedRelation> {
    (entity_name_strategy(), entity_name_strategy(), 0..3u8).prop_map(|(a, b, kind)| match kind {
        0 => ResolvedRelation::OneToMany { one: a, many: b },
        1 => ResolvedRelation::OneToOne { a, b },
        _ => ResolvedRelation::ManyToMany { a, b },
    })
}

proptest! {
    #[test]
    fn classify_follows_marker_chars(marker in "[<>|o{}\\- a-z]{0,8}") {
        let expected = if marker.contains('|') {
            Cardinality::One
        } else if marker.contains('{') || marker.contains('}') {
            Cardinality::Many
        } else {
            Cardinality::Unknown
        };
        prop_assert_eq!(classify(&marker), expected);
    }

    #[test]
    fn resolve_is_total(
        left in cardinality_strategy(),
        right in cardinality_strategy(),
        a in entity_name_strategy(),
        b in entity_name_strategy(),
    ) {
        let relation = resolve(left, right, &a, &b);
        let expected = match (left, right) {
            (Cardinality::Many, Cardinality::One) => ResolvedRelation::OneToMany { one: b.clone(), many: a.clone() },
            (Cardinality::One, Cardinality::One) => ResolvedRelation::OneToOne { a: a.clone(), b: b.clone() },
            (Cardinality::Many, Cardinality::Many) => ResolvedRelation::ManyToMany { a: a.clone(), b: b.clone() },
            _ => ResolvedRelation::OneToMany { one: a.clone(), many: b.clone() },
        };
        prop_assert_eq!(relation, expected);
    }

    #[test]
    fn canonical_form_reparses(relations in prop::collection::vec(relation_strategy(), 0..8)) {
        let text: String = relations.iter().map(|r| format!("{r}\n")).collect();
        let model = erdgen::parse(&text);
        prop_assert_eq!(&model.relations, &relations);

        let again: String = model.relations.iter().map(|r| format!("{r}\n")).collect();
        prop_assert_eq!(erdgen::parse(&again).relations, model.relations);
    }

    #[test]
    fn single_attribute_entity(
        name in entity_name_strategy(),
        attr in "[a-z][A-Za-z0-9_]{0,10}",
        declared in "[A-Za-z][A-Za-z0-9_]{0,10}",
    ) {
        let parsed = parse_entities(&format!("entity {name} {{ {attr} : {declared} }}"));
        prop_assert_eq!(parsed.entities.len(), 1);
        prop_assert_eq!(
            &parsed.entities[name.as_str()].attributes,
            &vec![Attribute::new(attr, declared)]
        );
    }

    #[test]
    fn parse_never_panics(lines in prop::collection::vec("[A-Za-z_ |o{}<>:\\-]{0,30}", 0..10)) {
        let text = lines.join("\n");
        let first = erdgen::parse(&text);
        prop_assert_eq!(erdgen::parse(&text), first);
    }
}
