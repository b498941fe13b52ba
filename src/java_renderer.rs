use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::erd_ast::*;
use crate::model::Model;
use crate::templates::{Templates, fill};

const BUILTIN_TYPES: [(&str, &str); 7] = [
    ("string", "String"),
    ("int", "Integer"),
    ("integer", "Integer"),
    ("long", "Long"),
    ("double", "Double"),
    ("float", "Float"),
    ("boolean", "Boolean"),
];

/// A generated file, path relative to the output root.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

pub fn render_project(
    model: &Model,
    config: &GeneratorConfig,
    templates: &Templates,
) -> Vec<RenderedFile> {
    let java_root = PathBuf::from("src/main/java").join(config.package_path());
    let mut files = Vec::new();

    for entity in model.entities.values() {
        files.push(RenderedFile {
            path: java_root.join("entities").join(format!("{}.java", entity.name)),
            contents: render_entity(entity, model, config, &templates.entity),
        });
    }
    for name in model.entities.keys() {
        files.push(RenderedFile {
            path: java_root
                .join("repositories")
                .join(format!("{name}Repository.java")),
            contents: render_repository(name, config, &templates.repository),
        });
    }
    for name in model.entities.keys() {
        files.push(RenderedFile {
            path: java_root.join("resources").join(format!("{name}Resource.java")),
            contents: render_resource(name, config, &templates.resource),
        });
    }

    let artifact_id = config.artifact_id();
    files.push(RenderedFile {
        path: PathBuf::from("pom.xml"),
        contents: fill(
            &templates.pom,
            &[
                ("group_id", config.base_package.as_str()),
                ("artifact_id", artifact_id.as_str()),
            ],
        ),
    });
    files.push(RenderedFile {
        path: PathBuf::from("src/main/resources/application.properties"),
        contents: templates.application_properties.clone(),
    });
    files.push(RenderedFile {
        path: PathBuf::from("README.md"),
        contents: fill(&templates.readme, &[("artifact_id", artifact_id.as_str())]),
    });

    files
}

pub fn render_entity(
    entity: &Entity,
    model: &Model,
    config: &GeneratorConfig,
    template: &str,
) -> String {
    let mut fields = Vec::new();
    let mut accessors = Vec::new();

    if !entity.attributes.iter().any(Attribute::is_id) {
        fields.push(id_field());
        accessors.push(id_accessors());
    }
    for attr in &entity.attributes {
        if attr.is_id() {
            fields.push(id_field());
            accessors.push(id_accessors());
            continue;
        }
        let java = java_type(&attr.declared_type, config);
        let name = &attr.name;
        let cap = upper_first(name);
        fields.push(format!("    private {java} {name};"));
        accessors.push(format!(
            "    public {java} get{cap}() {{ return {name}; }}\n    public void set{cap}({java} {name}) {{ this.{name} = {name}; }}"
        ));
    }

    let mut relation_fields = Vec::new();
    let mut relation_methods = Vec::new();
    for relation in model.relations_of(&entity.name) {
        for (field, methods) in relation_members(&entity.name, relation) {
            relation_fields.push(field);
            relation_methods.push(methods);
        }
    }

    let mut imports = String::new();
    if !relation_fields.is_empty() {
        imports.push_str("import com.fasterxml.jackson.annotation.JsonIgnore;\n");
    }
    if relation_fields.iter().any(|f| f.contains("Set<")) {
        imports.push_str("import java.util.HashSet;\nimport java.util.Set;\n");
    }

    fill(
        template,
        &[
            ("package", config.base_package.as_str()),
            ("imports", imports.as_str()),
            ("table_name", to_snake(&entity.name).as_str()),
            ("class_name", entity.name.as_str()),
            ("fields", section(&fields, "\n").as_str()),
            ("relation_fields", section(&relation_fields, "\n\n").as_str()),
            ("accessors", section(&accessors, "\n\n").as_str()),
            ("relation_methods", section(&relation_methods, "\n\n").as_str()),
        ],
    )
}

fn section(blocks: &[String], separator: &str) -> String {
    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join(separator))
    }
}

fn id_field() -> String {
    "    @Id\n    @GeneratedValue\n    private Long id;".to_string()
}

fn id_accessors() -> String {
    "    public Long getId() { return id; }\n    public void setId(Long id) { this.id = id; }"
        .to_string()
}

/// Field and accessor blocks `entity` gets from one relation. A self
/// relation renders both ends only where their field names differ.
fn relation_members(entity: &str, relation: &ResolvedRelation) -> Vec<(String, String)> {
    let mut members = Vec::new();
    match relation {
        ResolvedRelation::OneToMany { one, many } => {
            if one == entity {
                members.push(one_to_many_inverse(entity, many));
            }
            if many == entity {
                members.push(many_to_one_owner(entity, one));
            }
        }
        ResolvedRelation::OneToOne { a, b } => {
            if a == entity {
                members.push(one_to_one_owner(b));
            } else if b == entity {
                members.push(one_to_one_inverse(a, b));
            }
        }
        ResolvedRelation::ManyToMany { a, b } => {
            if a == entity {
                members.push(many_to_many_owner(a, b));
            } else if b == entity {
                members.push(many_to_many_inverse(a, b));
            }
        }
    }
    members
}

fn one_to_many_inverse(one: &str, many: &str) -> (String, String) {
    let field = collection_field(many);
    let cap = upper_first(&field);
    let field_block = format!(
        "    @JsonIgnore
    @OneToMany(mappedBy = \"{mapped_by}\")
    private Set<{many}> {field} = new HashSet<>();",
        mapped_by = lower_first(one),
    );
    let methods = format!(
        "    public Set<{many}> get{cap}() {{ return {field}; }}
    public void set{cap}(Set<{many}> items) {{ this.{field} = items; }}

    public void add{many}({many} item) {{
        item.set{one}(this);
    }}

    public void remove{many}({many} item) {{
        item.set{one}(null);
    }}"
    );
    (field_block, methods)
}

fn many_to_one_owner(many: &str, one: &str) -> (String, String) {
    let field = lower_first(one);
    let inverse_getter = format!("get{}", upper_first(&collection_field(many)));
    let field_block = format!(
        "    @JsonIgnore
    @ManyToOne
    @JoinColumn(name = \"{column}_id\")
    private {one} {field};",
        column = to_snake(one),
    );
    let methods = format!(
        "    public {one} get{one}() {{ return {field}; }}

    public void set{one}({one} {field}) {{
        if (this.{field} != null) {{
            this.{field}.{inverse_getter}().remove(this);
        }}
        this.{field} = {field};
        if ({field} != null) {{
            {field}.{inverse_getter}().add(this);
        }}
    }}"
    );
    (field_block, methods)
}

fn one_to_one_owner(b: &str) -> (String, String) {
    let field = lower_first(b);
    let cap = upper_first(&field);
    let field_block = format!(
        "    @JsonIgnore
    @OneToOne
    @JoinColumn(name = \"{column}_id\")
    private {b} {field};",
        column = to_snake(b),
    );
    (field_block, plain_accessors(b, &field, &cap))
}

fn one_to_one_inverse(a: &str, b: &str) -> (String, String) {
    let field = lower_first(a);
    let cap = upper_first(&field);
    let field_block = format!(
        "    @JsonIgnore
    @OneToOne(mappedBy = \"{mapped_by}\")
    private {a} {field};",
        mapped_by = lower_first(b),
    );
    (field_block, plain_accessors(a, &field, &cap))
}

fn many_to_many_owner(a: &str, b: &str) -> (String, String) {
    let field = collection_field(b);
    let cap = upper_first(&field);
    let inverse_getter = format!("get{}", upper_first(&collection_field(a)));
    let (table_a, table_b) = (to_snake(a), to_snake(b));
    let field_block = format!(
        "    @JsonIgnore
    @ManyToMany
    @JoinTable(
        name = \"{table_a}_{table_b}\",
        joinColumns = @JoinColumn(name = \"{table_a}_id\"),
        inverseJoinColumns = @JoinColumn(name = \"{table_b}_id\")
    )
    private Set<{b}> {field} = new HashSet<>();"
    );
    let methods = format!(
        "    public Set<{b}> get{cap}() {{ return {field}; }}
    public void set{cap}(Set<{b}> items) {{ this.{field} = items; }}

    public void add{b}({b} item) {{
        {field}.add(item);
        item.{inverse_getter}().add(this);
    }}

    public void remove{b}({b} item) {{
        {field}.remove(item);
        item.{inverse_getter}().remove(this);
    }}"
    );
    (field_block, methods)
}

fn many_to_many_inverse(a: &str, b: &str) -> (String, String) {
    let field = collection_field(a);
    let cap = upper_first(&field);
    let field_block = format!(
        "    @JsonIgnore
    @ManyToMany(mappedBy = \"{mapped_by}\")
    private Set<{a}> {field} = new HashSet<>();",
        mapped_by = collection_field(b),
    );
    let methods = format!(
        "    public Set<{a}> get{cap}() {{ return {field}; }}
    public void set{cap}(Set<{a}> items) {{ this.{field} = items; }}"
    );
    (field_block, methods)
}

fn plain_accessors(java: &str, field: &str, cap: &str) -> String {
    format!(
        "    public {java} get{cap}() {{ return {field}; }}
    public void set{cap}({java} {field}) {{ this.{field} = {field}; }}"
    )
}

pub fn render_repository(entity: &str, config: &GeneratorConfig, template: &str) -> String {
    fill(
        template,
        &[("package", config.base_package.as_str()), ("entity", entity)],
    )
}

pub fn render_resource(entity: &str, config: &GeneratorConfig, template: &str) -> String {
    fill(
        template,
        &[
            ("package", config.base_package.as_str()),
            ("entity", entity),
            ("path", format!("{}s", to_snake(entity)).as_str()),
        ],
    )
}

/// Maps a declared attribute type to a Java type, case-insensitively.
/// Configured mappings win over the built-in ones; unknown types pass through.
pub fn java_type(declared: &str, config: &GeneratorConfig) -> String {
    let key = declared.to_lowercase();
    if let Some(mapped) = config.types.get(&key) {
        return mapped.clone();
    }
    BUILTIN_TYPES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or_else(|| declared.to_string(), |(_, java)| java.to_string())
}

fn collection_field(entity: &str) -> String {
    format!("{}s", lower_first(entity))
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `OrderItem` -> `order_item`, `HTTPLog` -> `http_log`.
pub fn to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}
