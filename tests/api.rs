// tests/api.rs
use actix_web::{App, http::StatusCode, test};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use holobrand::errors::HoloBrandError;
use holobrand::models::ImageFeatures;
use holobrand::services::{AiPersonalizer, FeatureExtractor, LayoutGenerator, TextGenerator};
use holobrand::{AppState, handlers};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

struct FixedFeatures;

impl FeatureExtractor for FixedFeatures {
    fn extract_features(&self, data: &[u8]) -> Result<ImageFeatures, HoloBrandError> {
        if data.is_empty() {
            return Err(HoloBrandError::ImageProcessing("empty image".to_string()));
        }
        Ok(ImageFeatures {
            dominant_colors: vec!["#0000ff".to_string(), "#2040ff".to_string()],
            brightness: 200.0,
            contrast: 30.0,
            dimensions: vec![512, 512, 3],
        })
    }
}

/// Remembers which thread ran the extraction.
#[derive(Default)]
struct ThreadRecorder {
    seen: Mutex<Option<ThreadId>>,
}

impl FeatureExtractor for ThreadRecorder {
    fn extract_features(&self, data: &[u8]) -> Result<ImageFeatures, HoloBrandError> {
        *self.seen.lock().unwrap() = Some(thread::current().id());
        FixedFeatures.extract_features(data)
    }
}

struct CannedText;

#[async_trait]
impl TextGenerator for CannedText {
    async fn generate_text(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, HoloBrandError> {
        if user_prompt.starts_with("Describe") {
            Ok("Clean lines and cool light.".to_string())
        } else {
            Ok("{\"suggestions\": {\"spacing\": [\"Add air between sections\"]}}".to_string())
        }
    }
}

fn state(text_generator: Option<Arc<dyn TextGenerator>>) -> AppState {
    AppState::new(
        LayoutGenerator::new(AiPersonalizer::new(text_generator)),
        Arc::new(FixedFeatures),
        1024 * 1024,
    )
}

fn sample_layout() -> Value {
    json!({
        "template": "modern",
        "colors": {
            "primary": "#ff0000",
            "secondary": "#00ffff",
            "accent": "#cc0000",
            "background": "#f2dada"
        },
        "typography": {"primary_font": "Arial", "heading_font": "Arial", "body_font": "Arial"},
        "layout": {
            "spacing": "md",
            "alignment": "start",
            "sections": ["hero", "products", "testimonials", "contact"],
            "animations": ["rotate"]
        }
    })
}

macro_rules! app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(App::new().configure(|cfg| handlers::configure(cfg, &state))).await
    }};
}

#[actix_web::test]
async fn health_reports_text_generation() {
    let app = app!(state(None));
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ai_text_generation"], false);
}

#[actix_web::test]
async fn generate_layout_end_to_end() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/generate-layout")
        .set_json(json!({"brand_color": "#ff0000", "font": "Arial", "style_prompt": "modern"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["template"], "modern");
    assert_eq!(body["colors"]["primary"], "#ff0000");
    assert_eq!(body["colors"]["secondary"], "#00ffff");
    assert_eq!(body["typography"]["primary_font"], "Arial");
    assert_eq!(body["layout"]["alignment"], "start");
    assert_eq!(body["layout"]["sections"][0], "hero");
}

#[actix_web::test]
async fn generate_layout_uses_defaults() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/generate-layout")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["template"], "modern");
    assert_eq!(body["colors"]["primary"], "#000000");
}

#[actix_web::test]
async fn preview_without_image_is_not_enhanced() {
    let app = app!(state(Some(Arc::new(CannedText))));
    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({"layout": sample_layout()}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["3d_elements"].as_array().unwrap().len(), 4);
    assert_eq!(body["camera_position"], json!({"x": 100.0, "y": -200.0, "z": 100.0}));
    assert_eq!(body["interactive_elements"].as_array().unwrap().len(), 4);
    assert_eq!(body["animations"]["camera_path"].as_array().unwrap().len(), 3);
    assert!(body["metadata"].get("ai_enhanced").is_none());
    assert!(body.get("ai_suggestions").is_none());
}

#[actix_web::test]
async fn preview_with_features_is_personalized() {
    let app = app!(state(Some(Arc::new(CannedText))));
    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({
            "layout": sample_layout(),
            "image_features": {
                "dominant_colors": ["#0000ff", "#00ff00"],
                "brightness": 200,
                "contrast": 30
            }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["metadata"]["ai_enhanced"], true);
    assert_eq!(body["metadata"]["style_description"], "Clean lines and cool light.");
    assert_eq!(body["metadata"]["image_analysis"]["color_temperature"], "cool");
    assert_eq!(body["environment"]["post_processing"]["color_grading"], "cool");
    assert_eq!(body["camera"]["field_of_view"], 65.0);
    // 4 clickable hotspots plus hero and products styled ones.
    assert_eq!(body["interactive_elements"].as_array().unwrap().len(), 6);
    assert_eq!(body["ai_suggestions"][0]["suggestion"], "Add a cta section for better conversion");
}

#[actix_web::test]
async fn preview_extracts_features_from_base64_image() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({
            "layout": sample_layout(),
            "image_base64": general_purpose::STANDARD.encode(b"png bytes")
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["metadata"]["ai_enhanced"], true);
    assert_eq!(body["metadata"]["brand_analysis"]["analysis"]["brightness_level"], "high");
    assert!(body["metadata"].get("style_description").is_none());
}

#[actix_web::test]
async fn preview_survives_extraction_failure() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({"layout": sample_layout(), "image_base64": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["metadata"].get("ai_enhanced").is_none());
    assert_eq!(body["3d_elements"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn preview_rejects_layout_without_colors() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({"layout": {"template": "modern"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    assert!(body["message"].as_str().unwrap().contains("colors"));
}

#[actix_web::test]
async fn interactive_elements_for_layout() {
    let app = app!(state(None));
    let mut layout = sample_layout();
    layout["layout"]["sections"] = json!(["hero", "products", "gallery", "cta"]);

    let req = test::TestRequest::post()
        .uri("/api/v1/interactive-elements")
        .set_json(&layout)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let hotspots = body.as_array().unwrap();

    assert_eq!(hotspots.len(), 4);
    assert_eq!(hotspots[0]["type"], "spotlight");
    assert_eq!(hotspots[0]["position"], json!({"x": 0.0, "y": 0.0, "z": 80.0}));
    assert_eq!(hotspots[3]["type"], "button");
    assert_eq!(hotspots[3]["position"], json!({"x": 0.0, "y": 150.0, "z": 40.0}));
}

#[actix_web::test]
async fn interactive_elements_without_sections_is_empty() {
    let app = app!(state(None));
    let mut layout = sample_layout();
    layout.as_object_mut().unwrap().remove("layout");

    let req = test::TestRequest::post()
        .uri("/api/v1/interactive-elements")
        .set_json(&layout)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn layout_suggestions_for_layout() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/layout-suggestions")
        .set_json(sample_layout())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let suggestions = body.as_array().unwrap();

    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0]["type"], "layout");
    assert_eq!(suggestions[0]["priority"], "high");
    assert_eq!(suggestions[1]["type"], "3d");
}

#[actix_web::test]
async fn ai_suggestions_with_and_without_generator() {
    let offline = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/ai-suggestions")
        .set_json(json!({"layout": sample_layout(), "style_prompt": "modern"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&offline, req).await;
    assert!(body["ai_suggestions"].is_null());
    assert_eq!(body["layout"]["template"], "modern");

    let online = app!(state(Some(Arc::new(CannedText))));
    let req = test::TestRequest::post()
        .uri("/api/v1/ai-suggestions")
        .set_json(json!({"layout": sample_layout(), "style_prompt": "modern"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&online, req).await;
    assert_eq!(body["ai_suggestions"]["spacing"][0], "Add air between sections");
}

#[actix_web::test]
async fn brand_analysis_recommends_layout() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/v1/brand-analysis")
        .set_json(json!({
            "image_features": {"brightness": 200, "contrast": 50},
            "style_prompt": "elegant luxury"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["brand_analysis"]["recommended_style"], "elegant");
    assert_eq!(body["recommendations"]["layout_type"], "centered");
}

#[actix_web::test]
async fn analyze_image_accepts_multipart_upload() {
    let app = app!(state(None));
    let boundary = "holobrand-boundary";
    let payload = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"style_prompt\"\r\n\r\nclean\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"p.png\"\r\n\
         Content-Type: image/png\r\n\r\npng bytes\r\n--{b}--\r\n",
        b = boundary
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/analyze-image")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["image_id"].is_string());
    assert_eq!(body["analysis"]["color_temperature"], "cool");
    assert_eq!(body["analysis"]["visual_complexity"], "simple");
    assert_eq!(body["analysis"]["suggested_category"], "electronics");
    assert_eq!(body["features"]["dominant_colors"][0], "#0000ff");
}

#[actix_web::test]
async fn analyze_image_requires_a_file() {
    let app = app!(state(None));
    let boundary = "holobrand-boundary";
    let payload = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"style_prompt\"\r\n\r\nclean\r\n--{b}--\r\n",
        b = boundary
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/analyze-image")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn extraction_runs_off_the_request_thread() {
    let recorder = Arc::new(ThreadRecorder::default());
    let extractor: Arc<dyn FeatureExtractor> = recorder.clone();
    let app = app!(AppState::new(LayoutGenerator::default(), extractor, 1024 * 1024));

    let req = test::TestRequest::post()
        .uri("/api/v1/3d-preview")
        .set_json(json!({
            "layout": sample_layout(),
            "image_base64": general_purpose::STANDARD.encode(b"png bytes")
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["metadata"]["ai_enhanced"], true);

    let seen = recorder.seen.lock().unwrap().expect("extractor was not called");
    assert_ne!(seen, thread::current().id());
}
