// src/services/scene.rs
//
// Fixed lookup tables for the 3D scene: per-section element defaults and
// per-template camera and environment presets.
use crate::models::{
    CameraSettings, ColorGrading, EnvironmentSettings, Material, Palette, PostProcessing,
    Rotation, SectionName, TemplateName, Vec3,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Accent,
    Background,
}

impl PaletteSlot {
    pub fn pick<'a>(&self, palette: &'a Palette) -> &'a str {
        match self {
            PaletteSlot::Primary => &palette.primary,
            PaletteSlot::Secondary => &palette.secondary,
            PaletteSlot::Accent => &palette.accent,
            PaletteSlot::Background => &palette.background,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProfile {
    pub kind: &'static str,
    pub position: Vec3,
    pub color: PaletteSlot,
    pub scale: f64,
    pub rotation: Rotation,
    pub material: Material,
    pub interactive: bool,
    pub animation: &'static str,
}

const fn material(roughness: f64, metallic: f64, emissive: f64) -> Material {
    Material {
        roughness,
        metallic,
        emissive,
    }
}

/// Element defaults for a known section, `None` for custom sections.
pub fn section_profile(section: &SectionName) -> Option<SectionProfile> {
    let profile = match section {
        SectionName::Hero => SectionProfile {
            kind: "banner",
            position: Vec3::new(0.0, 0.0, 50.0),
            color: PaletteSlot::Accent,
            scale: 1.2,
            rotation: Rotation::new(0.0, 0.0, 0.0),
            material: material(0.2, 0.8, 0.1),
            interactive: true,
            animation: "float",
        },
        SectionName::Features => SectionProfile {
            kind: "panel_group",
            position: Vec3::new(100.0, 50.0, 30.0),
            color: PaletteSlot::Primary,
            scale: 0.9,
            rotation: Rotation::new(15.0, 0.0, 0.0),
            material: material(0.5, 0.3, 0.0),
            interactive: true,
            animation: "rotate",
        },
        SectionName::Gallery => SectionProfile {
            kind: "carousel",
            position: Vec3::new(-100.0, 50.0, 20.0),
            color: PaletteSlot::Secondary,
            scale: 1.0,
            rotation: Rotation::new(0.0, 30.0, 0.0),
            material: material(0.3, 0.2, 0.0),
            interactive: true,
            animation: "slide",
        },
        SectionName::Products => SectionProfile {
            kind: "grid",
            position: Vec3::new(0.0, 100.0, 0.0),
            color: PaletteSlot::Secondary,
            scale: 1.0,
            rotation: Rotation::new(0.0, 0.0, 0.0),
            material: material(0.4, 0.5, 0.0),
            interactive: true,
            animation: "scale",
        },
        SectionName::Testimonials => SectionProfile {
            kind: "quote_cards",
            position: Vec3::new(150.0, -50.0, 10.0),
            color: PaletteSlot::Background,
            scale: 0.8,
            rotation: Rotation::new(0.0, -15.0, 0.0),
            material: material(0.7, 0.1, 0.0),
            interactive: true,
            animation: "fade",
        },
        SectionName::Cta => SectionProfile {
            kind: "button",
            position: Vec3::new(0.0, 150.0, 40.0),
            color: PaletteSlot::Accent,
            scale: 1.1,
            rotation: Rotation::new(0.0, 0.0, 0.0),
            material: material(0.1, 0.9, 0.3),
            interactive: true,
            animation: "pulse",
        },
        SectionName::About => SectionProfile {
            kind: "text_panel",
            position: Vec3::new(-150.0, -50.0, 10.0),
            color: PaletteSlot::Primary,
            scale: 0.9,
            rotation: Rotation::new(0.0, 15.0, 0.0),
            material: material(0.6, 0.2, 0.0),
            interactive: false,
            animation: "fade",
        },
        SectionName::Contact => SectionProfile {
            kind: "form",
            position: Vec3::new(50.0, 150.0, 10.0),
            color: PaletteSlot::Background,
            scale: 0.9,
            rotation: Rotation::new(0.0, 0.0, 0.0),
            material: material(0.5, 0.3, 0.0),
            interactive: true,
            animation: "slide",
        },
        SectionName::Showcase => SectionProfile {
            kind: "showcase",
            position: Vec3::new(0.0, -100.0, 20.0),
            color: PaletteSlot::Secondary,
            scale: 1.2,
            rotation: Rotation::new(0.0, 0.0, 0.0),
            material: material(0.3, 0.7, 0.1),
            interactive: true,
            animation: "rotate",
        },
        SectionName::Other(_) => return None,
    };
    Some(profile)
}

/// Generic element for a section outside the table, offset along x by index.
pub fn generic_profile(index: usize) -> SectionProfile {
    SectionProfile {
        kind: "",
        position: Vec3::new(index as f64 * 100.0, 0.0, 0.0),
        color: PaletteSlot::Primary,
        scale: 1.0,
        rotation: Rotation::new(0.0, 0.0, 0.0),
        material: material(0.5, 0.5, 0.0),
        interactive: false,
        animation: "none",
    }
}

pub fn is_interactive(section: &SectionName) -> bool {
    section_profile(section).is_some_and(|p| p.interactive)
}

pub fn camera_preset(template: &TemplateName) -> CameraSettings {
    let (position, rotation, field_of_view, depth_of_field) = match template {
        TemplateName::Elegant => (
            Vec3::new(0.0, -250.0, 150.0),
            Rotation::new(-15.0, 0.0, 0.0),
            60.0,
            true,
        ),
        TemplateName::Modern => (
            Vec3::new(100.0, -200.0, 100.0),
            Rotation::new(-10.0, -15.0, 0.0),
            75.0,
            false,
        ),
        TemplateName::Minimal => (
            Vec3::new(0.0, -180.0, 80.0),
            Rotation::new(-5.0, 0.0, 0.0),
            65.0,
            true,
        ),
        TemplateName::Custom(_) => (
            Vec3::new(0.0, -200.0, 100.0),
            Rotation::new(-10.0, 0.0, 0.0),
            70.0,
            false,
        ),
    };
    CameraSettings {
        position,
        rotation,
        field_of_view,
        depth_of_field,
    }
}

pub fn environment_preset(template: &TemplateName) -> EnvironmentSettings {
    let (kind, ambient_light, skylight_intensity, reflections, post_processing) = match template
    {
        TemplateName::Elegant => (
            "studio",
            0.3,
            1.2,
            true,
            PostProcessing {
                bloom: 0.3,
                ambient_occlusion: 0.5,
                color_grading: ColorGrading::Warm,
            },
        ),
        TemplateName::Modern => (
            "tech_showroom",
            0.2,
            1.0,
            true,
            PostProcessing {
                bloom: 0.5,
                ambient_occlusion: 0.3,
                color_grading: ColorGrading::Cool,
            },
        ),
        TemplateName::Minimal => (
            "neutral",
            0.4,
            0.8,
            false,
            PostProcessing {
                bloom: 0.1,
                ambient_occlusion: 0.2,
                color_grading: ColorGrading::Neutral,
            },
        ),
        TemplateName::Custom(_) => (
            "showroom",
            0.3,
            1.0,
            true,
            PostProcessing {
                bloom: 0.3,
                ambient_occlusion: 0.3,
                color_grading: ColorGrading::Neutral,
            },
        ),
    };
    EnvironmentSettings {
        kind: kind.to_string(),
        ambient_light,
        skylight_intensity,
        reflections,
        post_processing,
    }
}
