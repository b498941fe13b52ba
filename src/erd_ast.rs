use std::fmt;

/// Type assigned to an attribute declared without `: Type`.
pub const DEFAULT_ATTRIBUTE_TYPE: &str = "String";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub declared_type: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// Which tokenizer tier produced a relation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `Left||--o{Right`, markers glued to both identifiers.
    Strict,
    /// Line split at its first `--`, each half matched on its own.
    SplitOnDashes,
    /// First two words of the line, no markers.
    BareIdentifiers,
}

/// One relationship line before its markers are classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelation {
    pub left: String,
    pub left_marker: String,
    pub right: String,
    pub right_marker: String,
    pub label: Option<String>,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    Many,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedRelation {
    OneToMany { one: String, many: String },
    OneToOne { a: String, b: String },
    ManyToMany { a: String, b: String },
}

impl ResolvedRelation {
    /// Both referenced entity names.
    pub fn names(&self) -> [&str; 2] {
        match self {
            ResolvedRelation::OneToMany { one, many } => [one, many],
            ResolvedRelation::OneToOne { a, b } | ResolvedRelation::ManyToMany { a, b } => [a, b],
        }
    }

    pub fn involves(&self, entity: &str) -> bool {
        self.names().contains(&entity)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedRelation::OneToMany { .. } => "OneToMany",
            ResolvedRelation::OneToOne { .. } => "OneToOne",
            ResolvedRelation::ManyToMany { .. } => "ManyToMany",
        }
    }
}

/// Canonical crow's-foot form; parsing it back yields the same relation.
impl fmt::Display for ResolvedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedRelation::OneToMany { one, many } => write!(f, "{one} ||--o{{ {many}"),
            ResolvedRelation::OneToOne { a, b } => write!(f, "{a} ||--|| {b}"),
            ResolvedRelation::ManyToMany { a, b } => write!(f, "{a} }}o--o{{ {b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_id_is_case_insensitive() {
        assert!(Attribute::new("ID", "long").is_id());
        assert!(Attribute::new("id", "long").is_id());
        assert!(!Attribute::new("identifier", "long").is_id());
    }

    #[test]
    fn canonical_form() {
        let rel = ResolvedRelation::OneToMany {
            one: "Author".into(),
            many: "Book".into(),
        };
        assert_eq!(rel.to_string(), "Author ||--o{ Book");
        let rel = ResolvedRelation::ManyToMany {
            a: "Author".into(),
            b: "Book".into(),
        };
        assert_eq!(rel.to_string(), "Author }o--o{ Book");
    }

    #[test]
    fn involves_checks_both_sides() {
        let rel = ResolvedRelation::OneToOne {
            a: "User".into(),
            b: "Profile".into(),
        };
        assert!(rel.involves("User"));
        assert!(rel.involves("Profile"));
        assert!(!rel.involves("Order"));
    }
}
