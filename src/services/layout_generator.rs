// src/services/layout_generator.rs
use crate::models::*;
use crate::services::ai_personalizer::{AiPersonalizer, analyze_product_image};
use crate::services::palette::derive_palette;
use crate::services::scene::{self, SectionProfile};
use crate::services::templates::{create_layout_structure, select_template};
use log::{debug, info};
use rand::Rng;

const BODY_FONT: &str = "Arial";

/// Builds 2D layouts and expands them into 3D preview scenes.
#[derive(Clone, Default)]
pub struct LayoutGenerator {
    personalizer: AiPersonalizer,
}

impl LayoutGenerator {
    pub fn new(personalizer: AiPersonalizer) -> Self {
        Self { personalizer }
    }

    pub fn personalizer(&self) -> &AiPersonalizer {
        &self.personalizer
    }

    /// Generate a layout using the thread-local random source.
    pub fn generate_layout(&self, brand_color: &str, font: &str, style_prompt: &str) -> Layout {
        self.generate_layout_with_rng(brand_color, font, style_prompt, &mut rand::thread_rng())
    }

    /// Generate a layout drawing section and animation picks from `rng`.
    ///
    /// Sections are sampled with replacement, so the result may repeat or
    /// omit template sections. `hero` always leads when the template has one.
    pub fn generate_layout_with_rng<R: Rng + ?Sized>(
        &self,
        brand_color: &str,
        font: &str,
        style_prompt: &str,
        rng: &mut R,
    ) -> Layout {
        let template_name = select_template(style_prompt);
        let colors = derive_palette(brand_color);
        debug!("Style prompt {:?} selected template {}", style_prompt, template_name);

        let mut structure = create_layout_structure(&template_name);
        structure.sections = randomize_sections(std::mem::take(&mut structure.sections), rng);
        structure.animations = pick(&structure.animations, rng).into_iter().collect();

        Layout {
            template: template_name,
            colors,
            typography: Typography {
                primary_font: font.to_string(),
                heading_font: font.to_string(),
                body_font: BODY_FONT.to_string(),
            },
            layout: structure,
            quantum_enhanced: false,
        }
    }

    /// Expand a layout into a 3D scene. With image features the scene is
    /// personalized; `brand_analysis` is echoed into the metadata.
    pub async fn generate_3d_preview_data(
        &self,
        layout: &Layout,
        image_features: Option<&ImageFeatures>,
        brand_analysis: Option<&BrandAnalysis>,
    ) -> PreviewData {
        let mut preview = synthesize_scene(layout);
        preview.metadata.brand_analysis = brand_analysis.cloned();

        if let Some(features) = image_features {
            let analysis = analyze_product_image(features);
            info!(
                "Personalizing {} preview: {:?} palette, {:?} complexity",
                layout.template, analysis.color_temperature, analysis.visual_complexity
            );
            self.personalizer.personalize(&mut preview, &analysis).await;
        }

        preview
    }
}

fn pick<T: Clone, R: Rng + ?Sized>(options: &[T], rng: &mut R) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    Some(options[rng.gen_range(0..options.len())].clone())
}

fn randomize_sections<R: Rng + ?Sized>(
    mut sections: Vec<SectionName>,
    rng: &mut R,
) -> Vec<SectionName> {
    let mut ordered = Vec::with_capacity(4);
    let draws = match sections.iter().position(|s| *s == SectionName::Hero) {
        Some(hero) => {
            ordered.push(sections.remove(hero));
            3
        }
        None => 4,
    };

    for _ in 0..draws.min(sections.len()) {
        if let Some(section) = pick(&sections, rng) {
            ordered.push(section);
        }
    }
    ordered
}

fn element_for(section: &SectionName, index: usize, layout: &Layout) -> Element {
    let (kind, profile): (String, SectionProfile) = match scene::section_profile(section) {
        Some(profile) => (profile.kind.to_string(), profile),
        None => (section.to_string(), scene::generic_profile(index)),
    };

    let i = index as f64;
    let mut position = profile.position;
    match layout.template {
        TemplateName::Elegant => {
            position.y += i * 80.0;
            position.z += 10.0;
        }
        TemplateName::Minimal => {
            position.x = i * 70.0;
            position.y = i * 20.0;
        }
        TemplateName::Modern | TemplateName::Custom(_) => {}
    }

    Element {
        kind,
        position,
        color: profile.color.pick(&layout.colors).to_string(),
        scale: profile.scale,
        rotation: profile.rotation,
        material: profile.material,
        interactive: profile.interactive,
        animation: profile.animation.to_string(),
    }
}

fn clickable_hotspot(section: &SectionName, index: usize) -> Hotspot {
    Hotspot::Clickable(ClickableHotspot {
        id: format!("{}_{}", section, index),
        kind: HotspotKind::Clickable,
        target_element: section.clone(),
        actions: vec![
            HotspotAction::new("highlight").duration(0.5).intensity(1.2),
            HotspotAction::new("zoom").target(section.as_str()).duration(1.0),
        ],
    })
}

/// Out-and-back camera move over ten seconds.
fn camera_path(camera: &CameraSettings) -> Vec<CameraKeyframe> {
    let origin = CameraKeyframe {
        position: camera.position,
        rotation: camera.rotation,
        time: 0.0,
    };
    let swing = CameraKeyframe {
        position: Vec3::new(
            camera.position.x + 50.0,
            camera.position.y - 50.0,
            camera.position.z + 20.0,
        ),
        rotation: Rotation::new(camera.rotation.pitch - 5.0, camera.rotation.yaw + 10.0, 0.0),
        time: 5.0,
    };
    let back = CameraKeyframe {
        time: 10.0,
        ..origin.clone()
    };
    vec![origin, swing, back]
}

/// The unpersonalized 3D scene for a layout.
pub fn synthesize_scene(layout: &Layout) -> PreviewData {
    let sections = &layout.layout.sections;

    let elements = sections
        .iter()
        .enumerate()
        .map(|(i, section)| element_for(section, i, layout))
        .collect();

    let interactive_elements = sections
        .iter()
        .enumerate()
        .filter(|(_, section)| scene::is_interactive(section))
        .map(|(i, section)| clickable_hotspot(section, i))
        .collect();

    let camera = scene::camera_preset(&layout.template);
    let environment = scene::environment_preset(&layout.template);

    let lighting = Lighting {
        main_light: DirectionalLight {
            kind: "directional".to_string(),
            intensity: 1.2,
            color: layout.colors.primary.clone(),
            direction: Vec3::new(-0.5, -0.7, -0.5),
        },
        fill_light: PointLight {
            kind: "point".to_string(),
            intensity: 0.7,
            color: layout.colors.secondary.clone(),
            position: Vec3::new(200.0, 100.0, 150.0),
            attenuation: 1.5,
        },
        ambient: environment.ambient_light,
    };

    let animations = SceneAnimations {
        camera_path: camera_path(&camera),
        element_animations: ElementAnimation {
            kind: layout
                .layout
                .animations
                .first()
                .cloned()
                .unwrap_or_else(|| "none".to_string()),
            duration: 1.5,
            looped: true,
            ease: "cubic-bezier(0.42, 0, 0.58, 1)".to_string(),
        },
    };

    PreviewData {
        elements,
        camera_position: camera.position,
        camera,
        lighting,
        environment,
        interactive_elements,
        animations,
        ui_elements: layout.clone(),
        metadata: PreviewMetadata {
            version: "2.0".to_string(),
            template: layout.template.clone(),
            quantum_enhanced: layout.quantum_enhanced,
            generated_timestamp: chrono::Utc::now(),
            image_analysis: None,
            brand_analysis: None,
            style_description: None,
            ai_enhanced: false,
        },
        ai_suggestions: None,
    }
}
