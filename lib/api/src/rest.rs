use actix_cors::Cors;
use actix_web::{error, web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use polarx_core::{
    evaluate, parse_display_name, Alienation, MeasureKind, MeasureResult, MeasureSpec,
    ParamDefault, ParamValue,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Default maximum JSON body size, in bytes
pub const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024;

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted JSON body size, in bytes
    pub json_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

#[derive(Deserialize)]
struct ComputeRequest {
    x: Vec<f64>,
    weights: Vec<f64>,
    #[serde(default)]
    measures: Vec<MeasureSpec>,
}

#[derive(Serialize)]
struct ComputeResponse {
    measures: Vec<MeasureResult>,
}

#[derive(Serialize)]
struct MeasureTypeInfo {
    #[serde(rename = "type")]
    kind: &'static str,
    label: &'static str,
    params: Vec<ParamInfo>,
}

#[derive(Serialize)]
struct ParamInfo {
    key: &'static str,
    label: &'static str,
    default: ParamValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<&'static str>>,
}

#[derive(Deserialize)]
struct ParseNameRequest {
    name: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(config: ServerConfig) -> std::io::Result<()> {
        let json_limit = config.json_limit;

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .configure(|cfg| RestApi::configure(cfg, json_limit))
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
    }

    /// Register the routes and JSON settings on an app
    pub fn configure(cfg: &mut web::ServiceConfig, json_limit: usize) {
        cfg.app_data(json_config(json_limit))
            .route("/compute", web::post().to(compute))
            .route("/alienation-functions", web::get().to(alienation_functions))
            .route("/measure-types", web::get().to(measure_types))
            .route("/measures/parse", web::post().to(parse_measure_name));
    }
}

/// JSON extractor settings; decoding failures answer 400 with `{"error": ...}`
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req: &HttpRequest| {
            let message = err.to_string();
            warn!(error = %message, "Rejected request body");
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": message
                })),
            )
            .into()
        })
}

async fn compute(req: web::Json<ComputeRequest>) -> ActixResult<HttpResponse> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "compute",
        %request_id,
        points = req.x.len(),
        measures = req.measures.len()
    );
    let _guard = span.enter();

    let results = evaluate(&req.x, &req.weights, &req.measures);
    let failed = results.iter().filter(|r| !r.is_ok()).count();
    info!(failed, "Computed measures");

    Ok(HttpResponse::Ok().json(ComputeResponse { measures: results }))
}

async fn alienation_functions() -> ActixResult<HttpResponse> {
    let keys: Vec<&'static str> = Alienation::keys().collect();
    Ok(HttpResponse::Ok().json(keys))
}

async fn measure_types() -> ActixResult<HttpResponse> {
    let catalogue: Vec<MeasureTypeInfo> = MeasureKind::ALL
        .iter()
        .map(|kind| MeasureTypeInfo {
            kind: kind.tag(),
            label: kind.label(),
            params: kind
                .params()
                .iter()
                .map(|param| match param.default {
                    ParamDefault::Number(n) => ParamInfo {
                        key: param.key,
                        label: param.key,
                        default: ParamValue::Number(n),
                        options: None,
                    },
                    ParamDefault::Alienation(a) => ParamInfo {
                        key: param.key,
                        label: param.key,
                        default: ParamValue::from(a.key()),
                        options: Some(Alienation::keys().collect()),
                    },
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(catalogue))
}

async fn parse_measure_name(req: web::Json<ParseNameRequest>) -> ActixResult<HttpResponse> {
    match parse_display_name(&req.name) {
        Some(spec) => Ok(HttpResponse::Ok().json(spec)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unrecognized measure name: {}", req.name)
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    macro_rules! app {
        () => {
            test::init_service(
                App::new().configure(|cfg| RestApi::configure(cfg, DEFAULT_JSON_LIMIT)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_compute() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/compute")
            .set_json(json!({
                "x": [0, 1, 2, 3, 4],
                "weights": [0.1, 0.2, 0.4, 0.2, 0.1],
                "measures": [
                    {"type": "EstebanRay", "params": {"alpha": 0.8}},
                    {"type": "GeneralizedER", "params": {"alpha": 0.8, "alienation": "d^2"}},
                    {"type": "Unknown", "params": {}}
                ]
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        let measures = body["measures"].as_array().unwrap();
        assert_eq!(measures.len(), 3);

        assert_eq!(measures[0]["name"], "ER(0.8)");
        assert!(measures[0]["value"].is_f64());
        assert!(measures[0]["error"].is_null());

        assert_eq!(measures[1]["name"], "GER(0.8,d^2)");
        assert!(measures[1]["value"].is_f64());

        assert_eq!(measures[2]["name"], "Unknown");
        assert!(measures[2]["value"].is_null());
        assert_eq!(measures[2]["error"], "Unknown measure type: Unknown");
    }

    #[actix_web::test]
    async fn test_compute_params_optional() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/compute")
            .set_json(json!({
                "x": [0, 1],
                "weights": [1, 1],
                "measures": [{"type": "BiPol"}, {"type": "MEC", "params": {"beta": "1"}}]
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["measures"][0]["name"], "BiPol");
        assert_eq!(body["measures"][1]["name"], "MEC(2.0,1.0)");
        assert!(body["measures"][1]["value"].is_f64());
    }

    #[actix_web::test]
    async fn test_compute_malformed_body() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/compute")
            .set_json(json!({"x": "not a list", "weights": []}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_alienation_functions() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/alienation-functions")
            .to_request();

        let keys: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            keys,
            vec!["d", "d^2", "d^3", "d+d^2", "d+2d^2", "exp(d)-1", "exp(2d)-1"]
        );
    }

    #[actix_web::test]
    async fn test_measure_types() {
        let app = app!();
        let req = test::TestRequest::get().uri("/measure-types").to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        let types = body.as_array().unwrap();
        assert_eq!(types.len(), 10);

        let gmec = types
            .iter()
            .find(|t| t["type"] == "GeneralizedMEC")
            .unwrap();
        assert_eq!(gmec["label"], "Generalized MEC");
        assert_eq!(gmec["params"][0]["default"], 2.0);
        assert_eq!(gmec["params"][1]["default"], "d");
        assert_eq!(gmec["params"][1]["options"].as_array().unwrap().len(), 7);

        let bipol = types.iter().find(|t| t["type"] == "BiPol").unwrap();
        assert!(bipol["params"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_parse_measure_name() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/measures/parse")
            .set_json(json!({"name": "MEC(2.0,1.15)N"}))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "MECNormalized");
        assert_eq!(body["params"]["alpha"], 2.0);
        assert_eq!(body["params"]["beta"], 1.15);

        let req = test::TestRequest::post()
            .uri("/measures/parse")
            .set_json(json!({"name": "Gini"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
