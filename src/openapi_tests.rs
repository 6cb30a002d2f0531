use crate::schemas::ApiDoc;
use utoipa::OpenApi;
use utoipa::openapi::{RefOr, schema::Schema};

fn object_properties(name: &str) -> Vec<String> {
    let openapi = ApiDoc::openapi();
    let components = openapi.components.as_ref().unwrap();
    match components.schemas.get(name) {
        Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
        _ => panic!("{} should be an object schema", name),
    }
}

#[test]
fn test_openapi_schema_generation() {
    let openapi = ApiDoc::openapi();

    assert!(openapi.components.is_some());
    let components = openapi.components.as_ref().unwrap();

    for name in ["ErrorResponse", "HealthResponse", "TrafficFeatures", "PredictionResponse", "TrafficSample"] {
        assert!(components.schemas.contains_key(name), "missing schema {}", name);
    }

    let json_result = serde_json::to_string(&openapi);
    assert!(json_result.is_ok());
}

#[test]
fn test_prediction_schemas_match_wire_contract() {
    let request = object_properties("TrafficFeatures");
    assert!(request.contains(&"traffic_speed".to_string()));
    assert!(request.contains(&"density".to_string()));
    assert!(request.contains(&"temperature".to_string()));

    let response = object_properties("PredictionResponse");
    assert!(response.contains(&"predicted_congestion_level".to_string()));
    assert!(response.contains(&"predicted_class".to_string()));
    assert!(response.contains(&"congestion_label".to_string()));
}

#[test]
fn test_error_response_schema_structure() {
    let properties = object_properties("ErrorResponse");
    assert!(properties.contains(&"error".to_string()));
    assert!(properties.contains(&"code".to_string()));
    assert!(properties.contains(&"success".to_string()));
}

#[test]
fn test_health_response_schema_structure() {
    let properties = object_properties("HealthResponse");
    assert!(properties.contains(&"status".to_string()));
    assert!(properties.contains(&"version".to_string()));
    assert!(properties.contains(&"traffic_api".to_string()));
}

#[test]
fn test_paths_are_documented() {
    let openapi = ApiDoc::openapi();
    let paths = &openapi.paths.paths;

    assert!(paths.contains_key("/health"));
    assert!(paths.contains_key("/predict"));
    assert!(paths.contains_key("/api/v1/traffic"));
}
