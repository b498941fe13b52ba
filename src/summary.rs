use unicode_width::UnicodeWidthStr;

use crate::model::Model;

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pads `s` with spaces to `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Plain-text listing of a model: entities with attributes, resolved
/// relations, then warnings.
pub fn render(model: &Model) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Entities ({})", model.entities.len()));
    for entity in model.entities.values() {
        lines.push(format!("  {}", entity.name));
        let name_width = entity
            .attributes
            .iter()
            .map(|a| display_width(&a.name))
            .max()
            .unwrap_or(0);
        for attr in &entity.attributes {
            lines.push(format!(
                "    {} : {}",
                pad_right(&attr.name, name_width),
                attr.declared_type
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Relations ({})", model.relations.len()));
    let kind_width = model
        .relations
        .iter()
        .map(|r| r.kind().len())
        .max()
        .unwrap_or(0);
    for relation in &model.relations {
        lines.push(format!("  {}  {relation}", pad_right(relation.kind(), kind_width)));
    }

    if !model.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!("Warnings ({})", model.warnings.len()));
        for warning in &model.warnings {
            lines.push(format!("  {warning}"));
        }
    }

    lines.join("\n")
}
