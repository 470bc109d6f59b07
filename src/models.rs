// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Name of a layout template. Names outside the built-in catalog are kept
/// verbatim so that hand-built layouts survive a round trip through the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateName {
    Elegant,
    #[default]
    Modern,
    Minimal,
    Custom(String),
}

impl TemplateName {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateName::Elegant => "elegant",
            TemplateName::Modern => "modern",
            TemplateName::Minimal => "minimal",
            TemplateName::Custom(name) => name,
        }
    }
}

impl From<String> for TemplateName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "elegant" => TemplateName::Elegant,
            "modern" => TemplateName::Modern,
            "minimal" => TemplateName::Minimal,
            _ => TemplateName::Custom(name),
        }
    }
}

impl From<&str> for TemplateName {
    fn from(name: &str) -> Self {
        TemplateName::from(name.to_string())
    }
}

impl From<TemplateName> for String {
    fn from(name: TemplateName) -> Self {
        match name {
            TemplateName::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page section. Unknown names are carried as `Other` and rendered with
/// generic defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionName {
    Hero,
    Features,
    Gallery,
    Cta,
    Products,
    Testimonials,
    Contact,
    About,
    Showcase,
    Other(String),
}

impl SectionName {
    pub fn as_str(&self) -> &str {
        match self {
            SectionName::Hero => "hero",
            SectionName::Features => "features",
            SectionName::Gallery => "gallery",
            SectionName::Cta => "cta",
            SectionName::Products => "products",
            SectionName::Testimonials => "testimonials",
            SectionName::Contact => "contact",
            SectionName::About => "about",
            SectionName::Showcase => "showcase",
            SectionName::Other(name) => name,
        }
    }
}

impl From<String> for SectionName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "hero" => SectionName::Hero,
            "features" => SectionName::Features,
            "gallery" => SectionName::Gallery,
            "cta" => SectionName::Cta,
            "products" => SectionName::Products,
            "testimonials" => SectionName::Testimonials,
            "contact" => SectionName::Contact,
            "about" => SectionName::About,
            "showcase" => SectionName::Showcase,
            _ => SectionName::Other(name),
        }
    }
}

impl From<&str> for SectionName {
    fn from(name: &str) -> Self {
        SectionName::from(name.to_string())
    }
}

impl From<SectionName> for String {
    fn from(name: SectionName) -> Self {
        match name {
            SectionName::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Center,
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub primary_font: String,
    pub heading_font: String,
    pub body_font: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            primary_font: "Arial".to_string(),
            heading_font: "Arial".to_string(),
            body_font: "Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStructure {
    pub spacing: Spacing,
    pub alignment: Alignment,
    pub sections: Vec<SectionName>,
    pub animations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub template: TemplateName,
    pub colors: Palette,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub layout: LayoutStructure,
    #[serde(default)]
    pub quantum_enhanced: bool,
}

// ---------------------------------------------------------------------------
// Image analysis
// ---------------------------------------------------------------------------

/// Aggregate statistics of a product image. Brightness and contrast may be on
/// a 0-1 or a 0-255 scale depending on the extractor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFeatures {
    pub dominant_colors: Vec<String>,
    pub brightness: f64,
    pub contrast: f64,
    pub dimensions: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTemperature {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualComplexity {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Harmonious,
    Complex,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Monochromatic,
    Complementary,
    Triadic,
    Diverse,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub harmony: Harmony,
    pub palette_type: PaletteType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub color_temperature: ColorTemperature,
    pub visual_complexity: VisualComplexity,
    pub suggested_category: String,
    pub color_analysis: ColorAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleScores {
    pub elegant: f64,
    pub modern: f64,
    pub minimal: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandLevels {
    pub brightness_level: Level,
    pub contrast_level: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAnalysis {
    pub recommended_style: TemplateName,
    pub style_scores: StyleScores,
    pub analysis: BrandLevels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecommendations {
    pub layout_type: String,
    pub spacing: String,
    pub animation_type: String,
    pub suggested_elements: Vec<String>,
}

// ---------------------------------------------------------------------------
// 3D preview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotation {
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub roughness: f64,
    pub metallic: f64,
    pub emissive: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Vec3,
    pub color: String,
    pub scale: f64,
    pub rotation: Rotation,
    pub material: Material,
    pub interactive: bool,
    pub animation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: Vec3,
    pub rotation: Rotation,
    pub field_of_view: f64,
    pub depth_of_field: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGrading {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProcessing {
    pub bloom: f64,
    pub ambient_occlusion: f64,
    pub color_grading: ColorGrading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub ambient_light: f64,
    pub skylight_intensity: f64,
    pub reflections: bool,
    pub post_processing: PostProcessing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    #[serde(rename = "type")]
    pub kind: String,
    pub intensity: f64,
    pub color: String,
    pub direction: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    #[serde(rename = "type")]
    pub kind: String,
    pub intensity: f64,
    pub color: String,
    pub position: Vec3,
    pub attenuation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub main_light: DirectionalLight,
    pub fill_light: PointLight,
    pub ambient: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    Clickable,
    Spotlight,
    Carousel,
    Button,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotspotAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl HotspotAction {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotAnimation {
    pub entry: String,
    pub idle: String,
    pub exit: String,
}

/// Hotspot emitted by the scene synthesizer for every interactive section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickableHotspot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub target_element: SectionName,
    pub actions: Vec<HotspotAction>,
}

/// Hotspot emitted by the personalization layer, styled per template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledHotspot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub target: SectionName,
    pub style: String,
    pub z_offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    pub actions: Vec<HotspotAction>,
    pub position: Vec3,
    pub animation: HotspotAnimation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hotspot {
    Styled(StyledHotspot),
    Clickable(ClickableHotspot),
}

impl Hotspot {
    pub fn id(&self) -> &str {
        match self {
            Hotspot::Styled(h) => &h.id,
            Hotspot::Clickable(h) => &h.id,
        }
    }

    pub fn kind(&self) -> HotspotKind {
        match self {
            Hotspot::Styled(h) => h.kind,
            Hotspot::Clickable(h) => h.kind,
        }
    }

    pub fn actions(&self) -> &[HotspotAction] {
        match self {
            Hotspot::Styled(h) => &h.actions,
            Hotspot::Clickable(h) => &h.actions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    pub position: Vec3,
    pub rotation: Rotation,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAnimation {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: f64,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub ease: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAnimations {
    pub camera_path: Vec<CameraKeyframe>,
    pub element_animations: ElementAnimation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    #[serde(rename = "layout")]
    Layout,
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub suggestion: String,
    pub priority: Priority,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewMetadata {
    pub version: String,
    pub template: TemplateName,
    pub quantum_enhanced: bool,
    pub generated_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<ImageAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_analysis: Option<BrandAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ai_enhanced: bool,
}

/// Scene description handed to the external 3D viewer. Field names are the
/// wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    #[serde(rename = "3d_elements")]
    pub elements: Vec<Element>,
    pub camera: CameraSettings,
    pub camera_position: Vec3,
    pub lighting: Lighting,
    pub environment: EnvironmentSettings,
    pub interactive_elements: Vec<Hotspot>,
    pub animations: SceneAnimations,
    pub ui_elements: Layout,
    pub metadata: PreviewMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<Suggestion>>,
}
