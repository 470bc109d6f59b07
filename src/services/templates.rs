// src/services/templates.rs
use crate::models::{Alignment, LayoutStructure, SectionName, Spacing, TemplateName};

/// Static description of one layout template.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub spacing: Spacing,
    pub alignment: Alignment,
    pub sections: &'static [&'static str],
    pub animations: &'static [&'static str],
}

pub const ELEGANT: Template = Template {
    name: "elegant",
    spacing: Spacing::Lg,
    alignment: Alignment::Center,
    sections: &["hero", "features", "gallery", "cta"],
    animations: &["fade", "slide"],
};

pub const MODERN: Template = Template {
    name: "modern",
    spacing: Spacing::Md,
    alignment: Alignment::Start,
    sections: &["hero", "products", "testimonials", "contact"],
    animations: &["scale", "rotate"],
};

pub const MINIMAL: Template = Template {
    name: "minimal",
    spacing: Spacing::Sm,
    alignment: Alignment::Center,
    sections: &["hero", "showcase", "about", "cta"],
    animations: &["fade"],
};

impl Template {
    /// Catalog entry for a template name. Custom names have no entry.
    pub fn lookup(name: &TemplateName) -> Option<&'static Template> {
        match name {
            TemplateName::Elegant => Some(&ELEGANT),
            TemplateName::Modern => Some(&MODERN),
            TemplateName::Minimal => Some(&MINIMAL),
            TemplateName::Custom(_) => None,
        }
    }

    pub fn section_names(&self) -> Vec<SectionName> {
        self.sections.iter().map(|s| SectionName::from(*s)).collect()
    }

    /// The template's full, unrandomized structure.
    pub fn structure(&self) -> LayoutStructure {
        LayoutStructure {
            spacing: self.spacing,
            alignment: self.alignment,
            sections: self.section_names(),
            animations: self.animations.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Full structure for a template name, the default structure for custom names.
pub fn create_layout_structure(name: &TemplateName) -> LayoutStructure {
    Template::lookup(name)
        .map(Template::structure)
        .unwrap_or_default()
}

/// Map a free-text style prompt onto a template. First match wins.
pub fn select_template(prompt: &str) -> TemplateName {
    let prompt = prompt.to_lowercase();
    if prompt.contains("elegant") || prompt.contains("luxury") {
        TemplateName::Elegant
    } else if prompt.contains("modern") || prompt.contains("tech") {
        TemplateName::Modern
    } else {
        TemplateName::Minimal
    }
}
