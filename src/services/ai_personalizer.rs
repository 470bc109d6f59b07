// src/services/ai_personalizer.rs
use crate::errors::HoloBrandError;
use crate::models::*;
use crate::services::llm_service::TextGenerator;
use crate::services::palette::parse_hex;
use log::{debug, warn};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::sync::Arc;

/// Scale a brightness or contrast reading into [0, 1]. Readings above 1 are
/// assumed to be on the 0-255 scale. This is a heuristic; an extractor that
/// reports 0-1 values and a very dark 0-255 image are indistinguishable.
pub fn normalize_unit(value: f64) -> f64 {
    if value > 1.0 { value / 255.0 } else { value }
}

pub fn analyze_product_image(features: &ImageFeatures) -> ImageAnalysis {
    ImageAnalysis {
        color_temperature: color_temperature(&features.dominant_colors),
        visual_complexity: visual_complexity(features.brightness, features.contrast),
        suggested_category: suggest_product_category(
            &features.dominant_colors,
            features.brightness,
            features.contrast,
        )
        .to_string(),
        color_analysis: analyze_color_palette(&features.dominant_colors),
    }
}

/// Warm if more colours lean red than blue, cool if the reverse, neutral on
/// a tie. Colours that are not `#rrggbb` are ignored.
pub fn color_temperature(colors: &[String]) -> ColorTemperature {
    let (mut warm, mut cool) = (0usize, 0usize);
    for color in colors {
        let Some((r, _, b)) = color.strip_prefix('#').and_then(parse_hex) else {
            continue;
        };
        if r > b {
            warm += 1;
        } else {
            cool += 1;
        }
    }

    match warm.cmp(&cool) {
        std::cmp::Ordering::Greater => ColorTemperature::Warm,
        std::cmp::Ordering::Less => ColorTemperature::Cool,
        std::cmp::Ordering::Equal => ColorTemperature::Neutral,
    }
}

pub fn visual_complexity(brightness: f64, contrast: f64) -> VisualComplexity {
    let score = normalize_unit(contrast) * 0.7 + (1.0 - normalize_unit(brightness)) * 0.3;
    if score < 0.3 {
        VisualComplexity::Simple
    } else if score < 0.6 {
        VisualComplexity::Moderate
    } else {
        VisualComplexity::Complex
    }
}

pub fn suggest_product_category(colors: &[String], brightness: f64, contrast: f64) -> &'static str {
    let brightness = normalize_unit(brightness);
    let temperature = color_temperature(colors);

    if brightness > 0.7 && temperature == ColorTemperature::Cool {
        "electronics"
    } else if brightness < 0.4 && normalize_unit(contrast) > 0.6 {
        "luxury"
    } else if temperature == ColorTemperature::Warm && brightness > 0.5 {
        "fashion"
    } else {
        "general"
    }
}

pub fn analyze_color_palette(colors: &[String]) -> ColorAnalysis {
    if colors.is_empty() {
        return ColorAnalysis {
            harmony: Harmony::Unknown,
            palette_type: PaletteType::Unknown,
            count: 0,
        };
    }

    let distinct: HashSet<&String> = colors.iter().collect();
    let palette_type = if distinct.len() == 1 {
        PaletteType::Monochromatic
    } else {
        match colors.len() {
            2 => PaletteType::Complementary,
            3 => PaletteType::Triadic,
            _ => PaletteType::Diverse,
        }
    };

    let harmony = match palette_type {
        PaletteType::Monochromatic | PaletteType::Complementary => Harmony::Harmonious,
        _ => Harmony::Complex,
    };

    ColorAnalysis {
        harmony,
        palette_type,
        count: colors.len(),
    }
}

// ---------------------------------------------------------------------------
// Template-styled hotspots
// ---------------------------------------------------------------------------

struct HeroStyle {
    style: &'static str,
    z_offset: f64,
    duration_multiplier: f64,
}

struct CarouselStyle {
    style: &'static str,
    z_offset: f64,
    spacing: f64,
}

struct CtaStyle {
    style: &'static str,
    z_offset: f64,
}

struct HotspotStyles {
    hero: HeroStyle,
    products: CarouselStyle,
    cta: CtaStyle,
}

const ELEGANT_STYLES: HotspotStyles = HotspotStyles {
    hero: HeroStyle { style: "fade", z_offset: 80.0, duration_multiplier: 1.2 },
    products: CarouselStyle { style: "smooth", z_offset: 30.0, spacing: 120.0 },
    cta: CtaStyle { style: "floating", z_offset: 50.0 },
};

const MODERN_STYLES: HotspotStyles = HotspotStyles {
    hero: HeroStyle { style: "dynamic", z_offset: 80.0, duration_multiplier: 1.0 },
    products: CarouselStyle { style: "interactive", z_offset: 40.0, spacing: 100.0 },
    cta: CtaStyle { style: "pulse", z_offset: 20.0 },
};

const MINIMAL_STYLES: HotspotStyles = HotspotStyles {
    hero: HeroStyle { style: "simple", z_offset: 60.0, duration_multiplier: 0.8 },
    products: CarouselStyle { style: "basic", z_offset: 25.0, spacing: 80.0 },
    cta: CtaStyle { style: "clean", z_offset: 35.0 },
};

fn hotspot_styles(template: &TemplateName) -> &'static HotspotStyles {
    match template {
        TemplateName::Elegant => &ELEGANT_STYLES,
        TemplateName::Minimal => &MINIMAL_STYLES,
        TemplateName::Modern | TemplateName::Custom(_) => &MODERN_STYLES,
    }
}

const CTA_POSITION: Vec3 = Vec3::new(0.0, 150.0, 40.0);

/// Base position of the `index`-th of `total` sections for a template.
pub fn section_position(template: &TemplateName, index: usize, total: usize) -> Vec3 {
    let i = index as f64;
    let n = total as f64;
    match template {
        TemplateName::Elegant => {
            // Ascending half circle.
            let angle = i / n * PI;
            let radius = 150.0;
            Vec3::new(radius * angle.cos(), 80.0 + i * 30.0, radius * angle.sin() * 0.5)
        }
        TemplateName::Minimal => {
            let grid = n.sqrt().ceil() as usize;
            let (row, col) = (index / grid, index % grid);
            let spacing = 120.0;
            Vec3::new(
                (col as f64 - grid as f64 / 2.0) * spacing,
                50.0 + row as f64 * spacing / 2.0,
                0.0,
            )
        }
        TemplateName::Modern | TemplateName::Custom(_) => {
            if index == 0 {
                return Vec3::new(0.0, 0.0, 70.0);
            }
            // Outward spiral.
            let angle = i / n * 2.0 * PI;
            let radius = 100.0 + i * 10.0;
            Vec3::new(radius * angle.cos(), 60.0 + i * 25.0, radius * angle.sin() * 0.5)
        }
    }
}

fn animation(entry: &str, idle: &str, exit: &str) -> HotspotAnimation {
    HotspotAnimation {
        entry: entry.to_string(),
        idle: idle.to_string(),
        exit: exit.to_string(),
    }
}

/// Template-styled hotspots for hero, product/gallery and cta sections.
/// Other sections are skipped; a layout without sections yields nothing.
pub fn generate_interactive_elements(layout: &Layout) -> Vec<Hotspot> {
    let sections = &layout.layout.sections;
    let styles = hotspot_styles(&layout.template);
    let total = sections.len();

    sections
        .iter()
        .enumerate()
        .filter_map(|(i, section)| {
            let base = section_position(&layout.template, i, total);
            let hotspot = match section {
                SectionName::Hero => {
                    let hero = &styles.hero;
                    let m = hero.duration_multiplier;
                    StyledHotspot {
                        id: format!("hero_{}", i),
                        kind: HotspotKind::Spotlight,
                        target: section.clone(),
                        style: hero.style.to_string(),
                        z_offset: hero.z_offset,
                        duration_multiplier: Some(m),
                        spacing: None,
                        actions: vec![
                            HotspotAction::new("zoom").duration(1.0 * m),
                            HotspotAction::new("highlight").duration(0.5 * m),
                            HotspotAction::new("parallax").intensity(0.3),
                            HotspotAction::new("show_details").content("hero_content".to_string()),
                        ],
                        position: Vec3::new(base.x, base.y, hero.z_offset),
                        animation: animation("fade_in", "float", "fade_out"),
                    }
                }
                SectionName::Products | SectionName::Gallery => {
                    let products = &styles.products;
                    StyledHotspot {
                        id: format!("{}_{}", section, i),
                        kind: HotspotKind::Carousel,
                        target: section.clone(),
                        style: products.style.to_string(),
                        z_offset: products.z_offset,
                        duration_multiplier: None,
                        spacing: Some(products.spacing),
                        actions: vec![
                            HotspotAction::new("rotate").duration(1.5),
                            HotspotAction::new("zoom_hover").scale(1.1),
                            HotspotAction::new("show_details").content(format!("{}_content", section)),
                        ],
                        position: Vec3::new(
                            base.x + i as f64 * products.spacing,
                            base.y,
                            products.z_offset,
                        ),
                        animation: animation("slide_in", "rotate_slow", "slide_out"),
                    }
                }
                SectionName::Cta => StyledHotspot {
                    id: format!("cta_{}", i),
                    kind: HotspotKind::Button,
                    target: section.clone(),
                    style: styles.cta.style.to_string(),
                    z_offset: styles.cta.z_offset,
                    duration_multiplier: None,
                    spacing: None,
                    actions: vec![
                        HotspotAction::new("click").duration(0.3),
                        HotspotAction::new("pulse").intensity(0.5),
                        HotspotAction::new("show_details").content("cta_content".to_string()),
                    ],
                    position: CTA_POSITION,
                    animation: animation("bounce_in", "pulse", "bounce_out"),
                },
                _ => return None,
            };
            Some(Hotspot::Styled(hotspot))
        })
        .collect()
}

fn suggestion(kind: SuggestionKind, text: &str, priority: Priority) -> Suggestion {
    Suggestion {
        kind,
        suggestion: text.to_string(),
        priority,
    }
}

/// Static best-practice advice: missing essential sections plus two 3D
/// enhancements per built-in template.
pub fn suggest_layout_improvements(layout: &Layout) -> Vec<Suggestion> {
    let sections = &layout.layout.sections;
    let mut suggestions: Vec<Suggestion> = [SectionName::Hero, SectionName::Cta]
        .iter()
        .filter(|essential| !sections.contains(essential))
        .map(|essential| {
            suggestion(
                SuggestionKind::Layout,
                &format!("Add a {} section for better conversion", essential),
                Priority::High,
            )
        })
        .collect();

    let enhancements: &[(&str, Priority)] = match layout.template {
        TemplateName::Elegant => &[
            ("Add subtle particle effects for luxury feel", Priority::Medium),
            ("Increase material reflectivity for premium appearance", Priority::Medium),
        ],
        TemplateName::Modern => &[
            ("Add tech-inspired holographic elements", Priority::High),
            ("Use animated wireframes for background elements", Priority::Medium),
        ],
        TemplateName::Minimal => &[
            ("Simplify materials with flat shading", Priority::High),
            ("Use subtle depth changes instead of complex animations", Priority::Medium),
        ],
        TemplateName::Custom(_) => &[],
    };
    suggestions.extend(
        enhancements
            .iter()
            .map(|(text, priority)| suggestion(SuggestionKind::ThreeD, text, *priority)),
    );

    suggestions
}

/// Pull the suggestion object out of a free-form model reply.
pub fn parse_ai_suggestions(reply: &str) -> Value {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return json!({ "raw": reply });
    };
    if end < start {
        return json!({ "raw": reply });
    }

    match serde_json::from_str::<Value>(&reply[start..=end]) {
        Ok(parsed) => parsed.get("suggestions").cloned().unwrap_or_else(|| json!({})),
        Err(e) => {
            warn!("Error parsing AI suggestions: {}", e);
            json!({
                "error": "Failed to parse AI suggestions",
                "raw": reply
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Personalization
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct AiPersonalizer {
    text_generator: Option<Arc<dyn TextGenerator>>,
}

impl AiPersonalizer {
    pub fn new(text_generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { text_generator }
    }

    pub fn has_text_generation(&self) -> bool {
        self.text_generator.is_some()
    }

    /// Apply image-driven adjustments and, when text generation is
    /// available, attach a style description.
    pub async fn enhance_3d_layout(
        &self,
        preview: &mut PreviewData,
        image_analysis: Option<&ImageAnalysis>,
    ) {
        if let Some(analysis) = image_analysis {
            apply_image_analysis(preview, analysis);
        }

        if let Some(description) = self.style_description(&preview.metadata.template).await {
            preview.metadata.style_description = Some(description);
            preview.metadata.ai_enhanced = true;
        }
    }

    /// Full personalization pass run when image features are available.
    pub async fn personalize(&self, preview: &mut PreviewData, image_analysis: &ImageAnalysis) {
        preview.metadata.image_analysis = Some(image_analysis.clone());
        self.enhance_3d_layout(preview, Some(image_analysis)).await;

        let hotspots = generate_interactive_elements(&preview.ui_elements);
        debug!("Adding {} template-styled hotspots", hotspots.len());
        preview.interactive_elements.extend(hotspots);

        preview.ai_suggestions = Some(suggest_layout_improvements(&preview.ui_elements));
        preview.metadata.ai_enhanced = true;
    }

    async fn style_description(&self, template: &TemplateName) -> Option<String> {
        let generator = self.text_generator.as_ref()?;
        let prompt = format!(
            "Describe a {} style 3D layout for an eCommerce website in 3-4 sentences.",
            template
        );
        match generator
            .generate_text("You are a UI/UX design expert.", &prompt, 150, 0.7)
            .await
        {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                warn!("Style description unavailable: {}", e);
                None
            }
        }
    }

    /// Free-form layout advice from the text generator, `None` when the
    /// generator is absent or fails.
    pub async fn ai_layout_suggestions(
        &self,
        layout: &Layout,
        style_prompt: &str,
        image_features: Option<&ImageFeatures>,
    ) -> Option<Value> {
        let generator = self.text_generator.as_ref()?;
        let prompt = match suggestion_prompt(layout, style_prompt, image_features) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("AI layout suggestions skipped: {}", e);
                return None;
            }
        };

        match generator
            .generate_text(
                "You are a UI/UX expert specializing in eCommerce layouts.",
                &prompt,
                500,
                0.7,
            )
            .await
        {
            Ok(reply) => Some(parse_ai_suggestions(&reply)),
            Err(e) => {
                warn!("AI layout suggestions unavailable: {}", e);
                None
            }
        }
    }
}

fn suggestion_prompt(
    layout: &Layout,
    style_prompt: &str,
    image_features: Option<&ImageFeatures>,
) -> Result<String, HoloBrandError> {
    let layout_json = serde_json::to_string_pretty(layout)
        .map_err(|e| HoloBrandError::Serialization(format!("Layout could not be encoded: {}", e)))?;

    let mut prompt = format!(
        "Enhance this eCommerce UI layout based on the style: '{}'.\n\nCurrent layout data:\n{}\n",
        style_prompt, layout_json
    );
    if let Some(features) = image_features {
        prompt.push_str(&format!(
            "\nProduct image features:\n- Dominant colors: {}\n- Brightness: {}\n- Contrast: {}\n",
            features.dominant_colors.join(", "),
            features.brightness,
            features.contrast
        ));
    }
    prompt.push_str(
        "\nPlease provide specific suggestions to enhance this layout in JSON format with the following structure:\n\
         {\"suggestions\": {\"layout\": [...], \"colors\": [...], \"typography\": [...], \"spacing\": [...]}}\n",
    );
    Ok(prompt)
}

fn apply_image_analysis(preview: &mut PreviewData, analysis: &ImageAnalysis) {
    match analysis.color_temperature {
        ColorTemperature::Warm => {
            preview.environment.post_processing.color_grading = ColorGrading::Warm
        }
        ColorTemperature::Cool => {
            preview.environment.post_processing.color_grading = ColorGrading::Cool
        }
        ColorTemperature::Neutral => {}
    }

    match analysis.visual_complexity {
        VisualComplexity::Simple => preview.camera.field_of_view = 65.0,
        VisualComplexity::Complex => {
            preview.camera.field_of_view = 55.0;
            preview.camera.depth_of_field = true;
        }
        VisualComplexity::Moderate => {}
    }
}
