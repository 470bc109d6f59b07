// src/services/brand_style.rs
use crate::models::{
    BrandAnalysis, BrandLevels, ImageFeatures, LayoutRecommendations, Level, StyleScores,
    TemplateName,
};
use crate::services::ai_personalizer::normalize_unit;

const KEYWORD_BOOST: f64 = 0.3;

const ELEGANT_KEYWORDS: &[&str] = &["symmetry", "minimal", "luxury"];
const MODERN_KEYWORDS: &[&str] = &["asymmetric", "bold", "dynamic"];
const MINIMAL_KEYWORDS: &[&str] = &["clean", "simple", "spacious"];

fn level(score: f64) -> Level {
    if score > 0.6 {
        Level::High
    } else if score > 0.4 {
        Level::Medium
    } else {
        Level::Low
    }
}

fn boost(prompt: &str, keywords: &[&str]) -> f64 {
    if keywords.iter().any(|k| prompt.contains(k)) {
        KEYWORD_BOOST
    } else {
        0.0
    }
}

/// Score each built-in template against image statistics and the prompt.
pub fn analyze_brand_style(features: &ImageFeatures, style_prompt: &str) -> BrandAnalysis {
    let brightness = normalize_unit(features.brightness);
    let contrast = normalize_unit(features.contrast);
    let prompt = style_prompt.to_lowercase();

    let scores = StyleScores {
        elegant: brightness * 0.7 + contrast * 0.3 + boost(&prompt, ELEGANT_KEYWORDS),
        modern: contrast * 0.6 + brightness * 0.4 + boost(&prompt, MODERN_KEYWORDS),
        minimal: (1.0 - contrast) * 0.8 + brightness * 0.2 + boost(&prompt, MINIMAL_KEYWORDS),
    };

    // Ties go to the earlier template.
    let recommended_style = if scores.elegant >= scores.modern && scores.elegant >= scores.minimal {
        TemplateName::Elegant
    } else if scores.modern >= scores.minimal {
        TemplateName::Modern
    } else {
        TemplateName::Minimal
    };

    BrandAnalysis {
        recommended_style,
        style_scores: scores,
        analysis: BrandLevels {
            brightness_level: level(brightness),
            contrast_level: level(contrast),
        },
    }
}

pub fn generate_layout_recommendations(analysis: &BrandAnalysis) -> LayoutRecommendations {
    let (layout_type, animation_type) = match analysis.recommended_style {
        TemplateName::Elegant => ("centered", "fade"),
        TemplateName::Modern => ("asymmetric", "slide"),
        _ => ("grid", "none"),
    };
    let spacing = if analysis.recommended_style == TemplateName::Minimal {
        "large"
    } else {
        "medium"
    };

    LayoutRecommendations {
        layout_type: layout_type.to_string(),
        spacing: spacing.to_string(),
        animation_type: animation_type.to_string(),
        suggested_elements: ["hero_section", "product_showcase", "features_grid", "call_to_action"]
            .iter()
            .map(|e| e.to_string())
            .collect(),
    }
}
