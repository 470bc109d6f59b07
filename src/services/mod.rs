// src/services/mod.rs
pub mod ai_personalizer;
pub mod brand_style;
pub mod image_processor;
pub mod layout_generator;
pub mod llm_service;
pub mod palette;
pub mod scene;
pub mod templates;

pub use ai_personalizer::AiPersonalizer;
pub use image_processor::{FeatureExtractor, ImageProcessor};
pub use layout_generator::LayoutGenerator;
pub use llm_service::{LLMService, TextGenerator};
