pub mod cardinality;
pub mod config;
pub mod entity_parser;
pub mod erd_ast;
pub mod error;
pub mod generator;
pub mod java_renderer;
pub mod model;
pub mod relation_parser;
pub mod summary;
pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use model::{DanglingPolicy, Model, Warning};

pub fn parse(input: &str) -> Model {
    parse_with_policy(input, DanglingPolicy::Keep)
}

/// Parses entities and relations from the whole document and assembles the
/// model. Never fails; problems end up in [`Model::warnings`].
pub fn parse_with_policy(input: &str, policy: DanglingPolicy) -> Model {
    let entities = entity_parser::parse_entities(input);
    let relations = relation_parser::parse_relations(input)
        .iter()
        .map(cardinality::resolve_relation)
        .collect();
    model::assemble(entities, relations, policy)
}

pub fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the diagram at `input` and writes the generated project.
pub fn run(input: &Path, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    info!(input = input.display().to_string(); "Processing diagram");
    let source = read_source(input)?;
    let model = parse_with_policy(&source, config.dangling);
    generator::generate(&model, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erd_ast::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_entities_and_relations() {
        let model = parse(
            "\
entity Author {
  id: long
  name: String
}
entity Book {
  id: long
  title
}
Author ||--o{ Book : writes
",
        );
        assert_eq!(model.entities.len(), 2);
        assert_eq!(
            model.relations,
            vec![ResolvedRelation::OneToMany {
                one: "Author".into(),
                many: "Book".into()
            }]
        );
        assert!(model.warnings.is_empty());
    }

    #[test]
    fn parse_empty_input() {
        let model = parse("");
        assert!(model.entities.is_empty());
        assert!(model.relations.is_empty());
    }

    #[test]
    fn parse_with_drop_policy() {
        let model = parse_with_policy("entity A {}\nA ||--o{ B\n", DanglingPolicy::Drop);
        assert!(model.relations.is_empty());
        assert_eq!(model.dangling().count(), 1);
    }

    #[test]
    fn read_missing_source() {
        let err = read_source(Path::new("definitely/not/here.puml")).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert!(err.to_string().contains("input file not found"), "got: {err}");
    }
}
