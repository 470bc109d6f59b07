// src/handlers.rs
use crate::services::ai_personalizer::{
    analyze_product_image, generate_interactive_elements, suggest_layout_improvements,
};
use crate::services::brand_style::{analyze_brand_style, generate_layout_recommendations};
use crate::{AppState, errors::HoloBrandError, models::*};
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use base64::{Engine as _, engine::general_purpose};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use log::{debug, info, warn};
use serde::Deserialize;
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let json_config = web::JsonConfig::default()
        .limit(state.max_upload_bytes)
        .error_handler(|err, _req| HoloBrandError::Validation(err.to_string()).into());

    cfg.app_data(web::Data::new(state.clone()))
        .app_data(json_config)
        .service(
            web::scope("/api/v1")
                .route("/generate-layout", web::post().to(generate_layout))
                .route("/3d-preview", web::post().to(preview_3d))
                .route("/analyze-image", web::post().to(analyze_image))
                .route("/interactive-elements", web::post().to(interactive_elements))
                .route("/layout-suggestions", web::post().to(layout_suggestions))
                .route("/ai-suggestions", web::post().to(ai_suggestions))
                .route("/brand-analysis", web::post().to(brand_analysis)),
        )
        .route("/health", web::get().to(health_check));
}

fn default_brand_color() -> String {
    "#000000".to_string()
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_style_prompt() -> String {
    "modern".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateLayoutRequest {
    #[serde(default = "default_brand_color")]
    pub brand_color: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_style_prompt")]
    pub style_prompt: String,
}

pub async fn generate_layout(
    data: web::Data<AppState>,
    body: web::Json<GenerateLayoutRequest>,
) -> Result<HttpResponse, Error> {
    let request = body.into_inner();
    let layout =
        data.layout_generator
            .generate_layout(&request.brand_color, &request.font, &request.style_prompt);

    info!(
        "Generated {} layout with {} sections",
        layout.template,
        layout.layout.sections.len()
    );

    Ok(HttpResponse::Ok().json(&layout))
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub layout: Layout,
    #[serde(default)]
    pub image_features: Option<ImageFeatures>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub brand_analysis: Option<BrandAnalysis>,
}

fn decode_image(encoded: &str) -> Result<Vec<u8>, HoloBrandError> {
    // Accept bare base64 as well as data URLs.
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, d)| d).unwrap_or(rest),
        None => encoded,
    };
    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| HoloBrandError::Validation(format!("Invalid base64 image: {}", e)))
}

/// Decode and measure on the blocking pool, off the async worker.
async fn extract_off_thread(
    data: &AppState,
    bytes: Vec<u8>,
) -> Result<ImageFeatures, HoloBrandError> {
    let extractor = data.feature_extractor.clone();
    web::block(move || extractor.extract_features(&bytes))
        .await
        .map_err(|e| HoloBrandError::ImageProcessing(format!("Feature extraction aborted: {}", e)))?
}

pub async fn preview_3d(
    data: web::Data<AppState>,
    body: web::Json<PreviewRequest>,
) -> Result<HttpResponse, Error> {
    let request = body.into_inner();
    let mut features = request.image_features;
    let mut brand = request.brand_analysis;

    if features.is_none() {
        if let Some(encoded) = request.image_base64.as_deref() {
            let extracted = match decode_image(encoded) {
                Ok(bytes) => extract_off_thread(&data, bytes).await,
                Err(e) => Err(e),
            };
            match extracted {
                Ok(extracted) => {
                    if brand.is_none() {
                        brand = Some(analyze_brand_style(
                            &extracted,
                            request.layout.template.as_str(),
                        ));
                    }
                    features = Some(extracted);
                }
                Err(e) => warn!("Image feature extraction failed, continuing without: {}", e),
            }
        }
    }

    let preview = data
        .layout_generator
        .generate_3d_preview_data(&request.layout, features.as_ref(), brand.as_ref())
        .await;

    info!(
        "Built {} preview: {} elements, {} hotspots, ai_enhanced={}",
        preview.metadata.template,
        preview.elements.len(),
        preview.interactive_elements.len(),
        preview.metadata.ai_enhanced
    );

    Ok(HttpResponse::Ok().json(&preview))
}

pub async fn analyze_image(
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut style_prompt = String::new();

    while let Some(mut field) = payload.try_next().await? {
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.try_next().await? {
            if buffer.len() + chunk.len() > data.max_upload_bytes {
                return Err(HoloBrandError::Validation(format!(
                    "File too large. Maximum size is {} bytes",
                    data.max_upload_bytes
                ))
                .into());
            }
            buffer.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "image" | "file" => image_data = Some(buffer.to_vec()),
            "style_prompt" => style_prompt = String::from_utf8_lossy(&buffer).into_owned(),
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let image_data = image_data.ok_or_else(|| {
        HoloBrandError::Validation("No file uploaded. Please provide an image file.".to_string())
    })?;

    let image_len = image_data.len();
    let features = extract_off_thread(&data, image_data).await?;
    let analysis = analyze_product_image(&features);
    let brand = analyze_brand_style(&features, &style_prompt);
    let image_id = Uuid::new_v4();

    info!(
        "Analyzed image {} ({} bytes): {:?}, {:?}",
        image_id,
        image_len,
        analysis.color_temperature,
        analysis.visual_complexity
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "image_id": image_id,
        "features": features,
        "analysis": analysis,
        "brand_analysis": brand
    })))
}

pub async fn interactive_elements(body: web::Json<Layout>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(generate_interactive_elements(&body)))
}

pub async fn layout_suggestions(body: web::Json<Layout>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(suggest_layout_improvements(&body)))
}

#[derive(Debug, Deserialize)]
pub struct AiSuggestionsRequest {
    pub layout: Layout,
    #[serde(default)]
    pub style_prompt: String,
    #[serde(default)]
    pub image_features: Option<ImageFeatures>,
}

pub async fn ai_suggestions(
    data: web::Data<AppState>,
    body: web::Json<AiSuggestionsRequest>,
) -> Result<HttpResponse, Error> {
    let request = body.into_inner();
    let suggestions = data
        .layout_generator
        .personalizer()
        .ai_layout_suggestions(
            &request.layout,
            &request.style_prompt,
            request.image_features.as_ref(),
        )
        .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "layout": request.layout,
        "ai_suggestions": suggestions
    })))
}

#[derive(Debug, Deserialize)]
pub struct BrandAnalysisRequest {
    pub image_features: ImageFeatures,
    #[serde(default)]
    pub style_prompt: String,
}

pub async fn brand_analysis(body: web::Json<BrandAnalysisRequest>) -> Result<HttpResponse, Error> {
    let analysis = analyze_brand_style(&body.image_features, &body.style_prompt);
    let recommendations = generate_layout_recommendations(&analysis);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "brand_analysis": analysis,
        "recommendations": recommendations
    })))
}

pub async fn health_check(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "holobrand",
        "version": env!("CARGO_PKG_VERSION"),
        "ai_text_generation": data.layout_generator.personalizer().has_text_generation()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_urls_and_bare_base64_decode() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(
            decode_image("***"),
            Err(HoloBrandError::Validation(_))
        ));
    }
}
