use erdgen::erd_ast::*;
use erdgen::{DanglingPolicy, Warning};
use pretty_assertions::assert_eq;

fn one_to_many(one: &str, many: &str) -> ResolvedRelation {
    ResolvedRelation::OneToMany {
        one: one.into(),
        many: many.into(),
    }
}

// =============================================================================
// Entities
// =============================================================================

#[test]
fn spec_entity_with_typed_attributes() {
    let model = erdgen::parse("entity Author { id: long \n name: String }");
    let author = &model.entities["Author"];
    assert_eq!(
        author.attributes,
        vec![Attribute::new("id", "long"), Attribute::new("name", "String")]
    );
}

#[test]
fn spec_entity_untyped_attribute_is_string() {
    let model = erdgen::parse("class Tag {\n  label\n}\n");
    assert_eq!(model.entities["Tag"].attributes, vec![Attribute::new("label", "String")]);
}

#[test]
fn spec_entity_plantuml_document() {
    let input = "\
@startuml
' shop model
entity Customer {
  +id : long
  *email : String
  -- loyalty --
  points : int
}

class Order {
  #id : long
  total : double
}

Customer ||--o{ Order : places
@enduml
";
    let model = erdgen::parse(input);
    assert_eq!(
        model.entities["Customer"].attributes,
        vec![
            Attribute::new("id", "long"),
            Attribute::new("email", "String"),
            Attribute::new("loyalty --", "String"),
            Attribute::new("points", "int"),
        ]
    );
    assert_eq!(model.entities["Order"].attributes.len(), 2);
    assert_eq!(model.relations[0], one_to_many("Customer", "Order"));
}

#[test]
fn spec_duplicate_entity_last_wins() {
    let input = "\
entity Customer {
  name
}
entity Customer {
  email : String
}
";
    let model = erdgen::parse(input);
    assert_eq!(
        model.entities["Customer"].attributes,
        vec![Attribute::new("email", "String")]
    );
    assert_eq!(model.overwritten_count(), 1);
    assert_eq!(
        model.warnings,
        vec![Warning::DuplicateEntity {
            name: "Customer".into()
        }]
    );
}

// =============================================================================
// Relations
// =============================================================================

#[test]
fn spec_relation_one_to_many() {
    let model = erdgen::parse("Author ||--o{ Book");
    assert_eq!(model.relations, vec![one_to_many("Author", "Book")]);
}

#[test]
fn spec_relation_many_to_many() {
    let model = erdgen::parse("Author }o--o{ Book");
    assert_eq!(
        model.relations,
        vec![ResolvedRelation::ManyToMany {
            a: "Author".into(),
            b: "Book".into()
        }]
    );
}

#[test]
fn spec_relation_without_markers_defaults() {
    let model = erdgen::parse("Author -- Book");
    assert_eq!(model.relations, vec![one_to_many("Author", "Book")]);
}

#[test]
fn spec_relation_many_on_left_swaps_owner() {
    let model = erdgen::parse("LineItem }|..|| Order\nLineItem }o--|| Order : belongs to\n");
    assert_eq!(model.relations, vec![one_to_many("Order", "LineItem")]);
}

#[test]
fn spec_relation_one_to_one() {
    let model = erdgen::parse("User |o--|| Profile");
    assert_eq!(
        model.relations,
        vec![ResolvedRelation::OneToOne {
            a: "User".into(),
            b: "Profile".into()
        }]
    );
}

#[test]
fn spec_relation_glued_markers() {
    let model = erdgen::parse("Author||--o{Book\nBook}o--o{Tag\n");
    assert_eq!(
        model.relations,
        vec![
            one_to_many("Author", "Book"),
            ResolvedRelation::ManyToMany {
                a: "Book".into(),
                b: "Tag".into()
            },
        ]
    );
}

#[test]
fn spec_relation_malformed_lines_skipped() {
    let input = "\
// Author ||--o{ Book
--
Author --
   
Author ||--o{ Book
";
    let model = erdgen::parse(input);
    assert_eq!(model.relations, vec![one_to_many("Author", "Book")]);
}

#[test]
fn spec_relation_order_preserved() {
    let input = "C ||--o{ D\nA ||--o{ B\nB }o--o{ C\n";
    let model = erdgen::parse(input);
    let kinds: Vec<&str> = model.relations.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["OneToMany", "OneToMany", "ManyToMany"]);
    assert_eq!(model.relations[0].names(), ["C", "D"]);
}

// =============================================================================
// Assembly
// =============================================================================

#[test]
fn spec_dangling_reference_reported() {
    let input = "entity Author {}\nAuthor ||--o{ Book\n";
    let model = erdgen::parse(input);
    assert_eq!(model.relations.len(), 1);
    assert_eq!(
        model.warnings,
        vec![Warning::DanglingReference {
            relation: one_to_many("Author", "Book"),
            missing: "Book".into(),
        }]
    );
}

#[test]
fn spec_dangling_reference_dropped() {
    let input = "entity Author {}\nentity Book {}\nAuthor ||--o{ Book\nAuthor ||--o{ Ghost\n";
    let model = erdgen::parse_with_policy(input, DanglingPolicy::Drop);
    assert_eq!(model.relations, vec![one_to_many("Author", "Book")]);
    assert_eq!(model.dangling().count(), 1);
}
