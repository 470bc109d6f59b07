// src/lib.rs
use log::warn;
use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::{
    AiPersonalizer, FeatureExtractor, ImageProcessor, LLMService, LayoutGenerator, TextGenerator,
};

#[derive(Clone)]
pub struct AppState {
    pub layout_generator: Arc<LayoutGenerator>,
    pub feature_extractor: Arc<dyn FeatureExtractor>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        layout_generator: LayoutGenerator,
        feature_extractor: Arc<dyn FeatureExtractor>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            layout_generator: Arc::new(layout_generator),
            feature_extractor,
            max_upload_bytes,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let text_generator = config.openai_api_key.as_ref().and_then(|key| {
            let service =
                LLMService::new(key.clone(), config.openai_model.clone(), config.openai_timeout);
            match service {
                Ok(service) => Some(Arc::new(service) as Arc<dyn TextGenerator>),
                Err(e) => {
                    warn!("Text generation disabled: {}", e);
                    None
                }
            }
        });

        Self::new(
            LayoutGenerator::new(AiPersonalizer::new(text_generator)),
            Arc::new(ImageProcessor::new()),
            config.max_upload_bytes,
        )
    }
}
