//! HTTP handlers for the form page and the JSON API.

use crate::error::ApiError;
use crate::model::{predict_observation, PredictionView};
use crate::page::{format_values, Outcome, PageView, FIELD_LABELS, MODEL_MISSING_MESSAGE};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::{Form, Json};
use classifier_facade::{ClassifierError, ErrorKind};
use data_facade::{find_preset, FeatureVector, Preset, FEATURE_COLUMNS, FEATURE_COUNT, PRESETS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub preset: Option<String>,
}

/// Unknown or absent ids fall back to manual input.
fn resolve_preset(id: Option<&str>) -> &'static Preset {
    id.and_then(find_preset).unwrap_or(&PRESETS[0])
}

fn unavailable(error: &ClassifierError) -> Outcome {
    if error.kind() == ErrorKind::MissingResource {
        Outcome::Unavailable(MODEL_MISSING_MESSAGE.to_string())
    } else {
        Outcome::Unavailable(error.to_string())
    }
}

/// Form fields in model order, plus the parsed observation when every
/// field holds a finite number.
pub fn parse_form(
    fields: &HashMap<String, String>,
) -> ([String; FEATURE_COUNT], Result<FeatureVector, String>) {
    let values: [String; FEATURE_COUNT] = std::array::from_fn(|i| {
        fields
            .get(FEATURE_COLUMNS[i])
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    });

    let mut parsed = [0.0; FEATURE_COUNT];
    for (i, raw) in values.iter().enumerate() {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => parsed[i] = v,
            _ => {
                return (
                    values.clone(),
                    Err(format!("Invalid input: {} must be a finite number", FIELD_LABELS[i])),
                )
            }
        }
    }
    (values, Ok(FeatureVector::new(parsed)))
}

/// `GET /` renders the form, optionally pre-filled from a preset.
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let page = PageView::for_preset(resolve_preset(query.preset.as_deref()));
    let page = match state.model.get().await {
        Ok(_) => page,
        Err(e) => page.with_outcome(unavailable(&e)),
    };
    Html(page.render())
}

/// `POST /predict` classifies the submitted form.
pub async fn predict_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let page = PageView::for_preset(resolve_preset(fields.get("preset").map(String::as_str)));

    if let Err(e) = state.model.get().await {
        return Html(page.with_outcome(unavailable(&e)).render());
    }

    let (values, parsed) = parse_form(&fields);
    let page = page.with_values(values);
    let outcome = match parsed {
        Err(message) => Outcome::Rejected(message),
        Ok(features) => match predict_observation(&state.model, &features).await {
            Ok(view) => Outcome::Classified(view),
            Err(e) if e.kind() == ErrorKind::MissingResource => unavailable(&e),
            Err(e) => Outcome::Rejected(e.to_string()),
        },
    };
    Html(page.with_outcome(outcome).render())
}

/// `GET /api/v1/presets`
pub async fn presets() -> Json<Vec<Preset>> {
    Json(PRESETS.to_vec())
}

/// Body of `POST /api/v1/predict`: a preset id or 11 values in model order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    Preset { preset: String },
    Features { features: Vec<f64> },
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub features: FeatureVector,
    #[serde(flatten)]
    pub prediction: PredictionView,
}

/// `POST /api/v1/predict`
pub async fn predict_api(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    state.model.get().await?;

    let features = match request {
        PredictRequest::Preset { preset } => {
            find_preset(&preset)
                .ok_or_else(|| ApiError::unprocessable(format!("Unknown preset '{}'", preset)))?
                .features
        }
        PredictRequest::Features { features } => FeatureVector::from_slice(&features)
            .map_err(|e| ApiError::unprocessable(e.to_string()))?,
    };

    let prediction = predict_observation(&state.model, &features).await?;
    Ok(Json(PredictResponse {
        features,
        prediction,
    }))
}

/// Liveness probe.
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: ready once the model artifact loads.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.model.get().await {
        Ok(model) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "version": env!("CARGO_PKG_VERSION"),
                "model": model.name(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "not_ready",
                "version": env!("CARGO_PKG_VERSION"),
                "reason": e.to_string(),
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_form_complete() {
        let mut pairs: Vec<(&str, &str)> = FEATURE_COLUMNS.iter().map(|c| (*c, "1.5")).collect();
        pairs[0] = ("koi_period", " 289.86 ");
        let (values, parsed) = parse_form(&fields(&pairs));
        assert_eq!(values[0], "289.86");
        let features = parsed.unwrap();
        assert_eq!(features.get("koi_period"), Some(289.86));
        assert_eq!(features.get("koi_kepmag"), Some(1.5));
    }

    #[test]
    fn test_parse_form_rejects_text_and_nan() {
        let mut pairs: Vec<(&str, &str)> = FEATURE_COLUMNS.iter().map(|c| (*c, "1")).collect();
        pairs[2] = ("koi_depth", "deep");
        let (values, parsed) = parse_form(&fields(&pairs));
        assert_eq!(values[2], "deep");
        assert!(parsed.unwrap_err().contains("Depth (PPM)"));

        pairs[2] = ("koi_depth", "NaN");
        assert!(parse_form(&fields(&pairs)).1.is_err());
    }

    #[test]
    fn test_parse_form_missing_field() {
        let (_, parsed) = parse_form(&fields(&[("koi_period", "1")]));
        assert!(parsed.unwrap_err().contains("Duration (Hours)"));
    }

    #[test]
    fn test_resolve_preset_fallback() {
        assert_eq!(resolve_preset(Some("kepler-186f")).id, "kepler-186f");
        assert_eq!(resolve_preset(Some("unknown")).id, "manual");
        assert_eq!(resolve_preset(None).id, "manual");
    }

    #[test]
    fn test_predict_request_shapes() {
        let preset: PredictRequest = serde_json::from_str(r#"{"preset":"kepler-22b"}"#).unwrap();
        assert!(matches!(preset, PredictRequest::Preset { .. }));
        let features: PredictRequest = serde_json::from_str(r#"{"features":[1,2,3]}"#).unwrap();
        assert!(matches!(features, PredictRequest::Features { features } if features.len() == 3));
    }

    #[test]
    fn test_format_values_round_trip() {
        let preset = find_preset("false-positive").unwrap();
        let values = format_values(&preset.features);
        let map: HashMap<String, String> = FEATURE_COLUMNS
            .iter()
            .zip(values.iter())
            .map(|(c, v)| (c.to_string(), v.clone()))
            .collect();
        assert_eq!(parse_form(&map).1.unwrap(), preset.features);
    }
}
