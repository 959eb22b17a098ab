//! Application state and router assembly.
//!
//! The model and credential store are built once here and injected into the
//! handlers through `AppState`; nothing else holds global state.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::auth::{auth_router, AuthService, SqliteCredentialStore};
use crate::config::Config;
use crate::services::PredictionService;
use crate::{api, database, middleware};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub predictions: PredictionService,
}

impl AppState {
    /// Loads the model, opens the database and seeds the default user.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let model = adapters::load_model(&config.model_path)?;

        let pool = database::create_pool(&config.database_url).await?;
        database::init_schema(&pool).await?;

        let store = SqliteCredentialStore::new(pool);
        store
            .seed_default_user()
            .await
            .map_err(|e| AppError::Seed(e.to_string()))?;

        Ok(Self {
            auth: AuthService::new(Arc::new(store)),
            predictions: PredictionService::new(model),
        })
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn root_handler() -> &'static str {
    "Employee Churn Prediction Backend is Running!"
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health))
        .merge(auth_router())
        .merge(api::prediction::routes::prediction_router());

    middleware::apply(routes, config).with_state(state)
}

/// Startup errors. All of them are fatal.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Failed to load model: {0}")]
    Model(#[from] adapters::AdapterError),

    #[error("Database initialization failed: {0}")]
    Database(#[from] database::DbError),

    #[error("Failed to seed default user: {0}")]
    Seed(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::predictor::tests::ScriptedModel;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// State backed by in-memory SQLite and a model that returns `labels`.
    pub(crate) async fn test_state(labels: Vec<i64>) -> AppState {
        let store = SqliteCredentialStore::new(database::test_pool().await);
        store.seed_default_user().await.unwrap();
        AppState {
            auth: AuthService::new(Arc::new(store)),
            predictions: PredictionService::new(Arc::new(ScriptedModel::new(labels))),
        }
    }

    fn sample_model_path() -> String {
        format!("{}/../model/model.json", env!("CARGO_MANIFEST_DIR"))
    }

    #[tokio::test]
    async fn builds_state_from_config() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            model_path: sample_model_path(),
            ..Config::default()
        };
        let state = AppState::new(&config).await.unwrap();

        let result = state.predictions.predict_one(&Default::default()).unwrap();
        assert!(matches!(
            result.prediction,
            crate::services::data_aggregator::PredictionOutcome::Stay
                | crate::services::data_aggregator::PredictionOutcome::Leave
        ));

        let creds = crate::auth::Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };
        assert!(state.auth.login(&creds).await.is_ok());
    }

    #[tokio::test]
    async fn missing_model_is_fatal() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            model_path: "/nonexistent/model.json".to_string(),
            ..Config::default()
        };
        assert!(matches!(AppState::new(&config).await, Err(AppError::Model(_))));
    }

    #[tokio::test]
    async fn schema_mismatch_is_fatal() {
        let path = std::env::temp_dir().join(format!("churn-model-{}.json", std::process::id()));
        let artifact = json!({
            "kind": "logistic_regression",
            "feature_names": ["salary"],
            "coefficients": [0, 0, 0, 0, 0, 0, 0, 0, 0],
            "intercept": 0
        });
        std::fs::write(&path, artifact.to_string()).unwrap();

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            model_path: path.display().to_string(),
            ..Config::default()
        };
        let result = AppState::new(&config).await;
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(AppError::Model(adapters::AdapterError::SchemaMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn root_and_health_respond() {
        assert_eq!(root_handler().await, "Employee Churn Prediction Backend is Running!");
        assert_eq!(health().await.0.status, "ok");
    }

    async fn app(labels: Vec<i64>) -> Router {
        router(test_state(labels).await, &Config::default())
    }

    async fn send(app: Router, method: Method, uri: &str, body: impl Into<Body>) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn split(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        (status, serde_json::from_slice(&body_bytes(response).await).unwrap())
    }

    #[tokio::test]
    async fn root_over_http() {
        let response = send(app(vec![]).await, Method::GET, "/", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await,
            b"Employee Churn Prediction Backend is Running!"
        );

        let (status, body) = split(send(app(vec![]).await, Method::GET, "/health", "").await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn login_over_http() {
        let good = json!({ "username": "admin", "password": "admin123" }).to_string();
        let (status, body) =
            split(send(app(vec![]).await, Method::POST, "/login", good).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "token": "valid-user-session" }));

        let bad = json!({ "username": "admin", "password": "nope" }).to_string();
        let (status, body) =
            split(send(app(vec![]).await, Method::POST, "/login", bad).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn register_then_login_over_http() {
        let app = app(vec![]).await;
        let creds = json!({ "username": "maria", "password": "s3cret" }).to_string();

        let (status, body) =
            split(send(app.clone(), Method::POST, "/register", creds.clone()).await).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["message"].is_string());

        let (status, _) =
            split(send(app.clone(), Method::POST, "/register", creds.clone()).await).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = split(send(app, Method::POST, "/login", creds).await).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn predict_over_http() {
        let record = json!({ "Departments": "sales", "salary": "low", "number_project": 6 });
        let response = send(app(vec![1]).await, Method::POST, "/predict", record.to_string()).await;
        let (status, body) = split(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "prediction": "Employee will leave" }));

        // No body at all scores the all-defaults record.
        let (status, body) =
            split(send(app(vec![0]).await, Method::POST, "/predict", Body::empty()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "prediction": "Employee will stay" }));
    }

    #[tokio::test]
    async fn predict_batch_over_http() {
        let records = json!([{ "salary": "high" }, { "salary": "low" }]).to_string();
        let response = send(app(vec![0, 1]).await, Method::POST, "/predict-batch", records).await;
        let (status, body) = split(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "summary": {
                    "total_employees": 2,
                    "will_leave": 1,
                    "will_stay": 1,
                    "attrition_rate_percent": 50.0
                },
                "predictions": ["Employee will stay", "Employee will leave"]
            })
        );

        let (status, body) =
            split(send(app(vec![]).await, Method::POST, "/predict-batch", "[]").await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_uses_error_envelope() {
        for uri in ["/login", "/register", "/predict", "/predict-batch"] {
            let (status, body) = split(send(app(vec![]).await, Method::POST, uri, "{").await).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(
                body["error"]
                    .as_str()
                    .is_some_and(|msg| msg.starts_with("Request body is not valid JSON")),
                "{uri}: {body}"
            );
        }
    }

    #[tokio::test]
    async fn routes_enforce_methods() {
        let cases = [
            (Method::GET, "/predict"),
            (Method::GET, "/predict-batch"),
            (Method::GET, "/login"),
            (Method::PUT, "/register"),
            (Method::POST, "/"),
            (Method::DELETE, "/health"),
        ];
        for (method, uri) in cases {
            let response = send(app(vec![]).await, method.clone(), uri, Body::empty()).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        }

        let response = send(app(vec![]).await, Method::GET, "/nowhere", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::ORIGIN, "https://hr.example.com")
            .body(Body::from("{}"))
            .unwrap();
        let response = app(vec![0]).await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/predict-batch")
            .header(header::ORIGIN, "https://hr.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app(vec![]).await.oneshot(preflight).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn cors_echoes_configured_origin() {
        let config = Config {
            cors_allow_origin: Some("https://hr.example.com".to_string()),
            ..Config::default()
        };
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://hr.example.com")
            .body(Body::empty())
            .unwrap();
        let response = router(test_state(vec![]).await, &config)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://hr.example.com"
        );
    }

    #[tokio::test]
    async fn large_batch_is_not_capped() {
        const COUNT: usize = 40_000;
        let record = json!({
            "number_project": 3,
            "average_montly_hours": 160,
            "time_spend_company": 3,
            "Departments": "sales",
            "salary": "medium"
        });
        let body = Value::Array(vec![record; COUNT]).to_string();
        assert!(body.len() > 2 * 1024 * 1024, "batch is only {} bytes", body.len());

        let labels = (0..COUNT as i64).map(|i| i % 4 / 3).collect();
        let response = send(app(labels).await, Method::POST, "/predict-batch", body).await;
        let (status, body) = split(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["total_employees"], COUNT);
        assert_eq!(body["summary"]["will_leave"], COUNT / 4);
        assert_eq!(body["summary"]["attrition_rate_percent"], 25.0);
        assert_eq!(body["predictions"].as_array().map(Vec::len), Some(COUNT));
    }

    #[tokio::test]
    async fn configured_body_cap_rejects_with_error_envelope() {
        let config = Config {
            max_body_bytes: Some(64),
            ..Config::default()
        };
        let body = Value::Array(vec![json!({ "salary": "low" }); 10]).to_string();
        assert!(body.len() > 64);

        let app = router(test_state(vec![]).await, &config);
        let (status, body) = split(send(app, Method::POST, "/predict-batch", body).await).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string(), "{body}");
    }
}
