//! End-to-end tests of [`TurbineApi`] against the real router served on a
//! loopback port.

use std::path::PathBuf;
use std::sync::Arc;

use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::SeedableRng;
use turbine_api::auth::tokens::TokenRegistry;
use turbine_api::config::{CorsOrigins, ServerConfig};
use turbine_api::router::build_app_router;
use turbine_api::state::AppState;
use turbine_client::api::{ClientError, TurbineApi};
use turbine_client::forecast::seven_day_series;
use turbine_client::summary::BatchStats;
use turbine_core::classifier::{ClassProbabilities, Classifier, InferenceError, ModelDetails};
use turbine_core::features::FeatureVector;
use turbine_core::fields::SensorField;
use turbine_core::model::{ModelHandle, ModelMetadata};
use turbine_core::reading::SensorReading;
use turbine_core::risk::RiskLevel;

const TOKEN: &str = "client-test-token";

/// High risk above 20 m/s of wind, low otherwise.
struct WindThreshold;

impl Classifier for WindThreshold {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let p = if features.get(SensorField::WindSpeed) > 20.0 {
            0.8
        } else {
            0.1
        };
        Ok(ClassProbabilities::from_failure(p))
    }

    fn details(&self) -> ModelDetails {
        ModelDetails {
            kind: "WindThreshold".into(),
            features: SensorField::names().iter().map(|s| s.to_string()).collect(),
            n_features: 5,
            n_estimators: None,
            classes: vec![0, 1],
        }
    }
}

/// Serve the app on an ephemeral port and return its `/api` base URL.
async fn spawn_server(model: Option<ModelHandle>) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        model_path: PathBuf::from("unused.json"),
        tokens: TokenRegistry::parse(&format!("technician:{TOKEN}")).unwrap(),
    };
    let app = build_app_router(AppState::new(config, model));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn model() -> Option<ModelHandle> {
    Some(ModelHandle::new(
        Arc::new(WindThreshold),
        ModelMetadata::default(),
    ))
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let api = TurbineApi::new(spawn_server(model()).await, TOKEN);

    let health = api.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert_eq!(health.endpoints_available.len(), 5);
}

#[tokio::test]
async fn single_prediction_round_trip() {
    let api = TurbineApi::new(spawn_server(model()).await, TOKEN);
    let reading = SensorReading::new(25.0, 3.0, 20.0, 900.0, 0).unwrap();

    let report = api.predict(&reading).await.unwrap();
    assert_eq!(report.prediction.risk_level, RiskLevel::High);
    assert!(report.prediction.will_fail);
    assert_eq!(report.recommendations.len(), 3);
}

#[tokio::test]
async fn seven_day_batch_round_trip() {
    let api = TurbineApi::new(spawn_server(model()).await, TOKEN);
    let base = SensorReading::new(5.0, 3.0, 20.0, 900.0, 1).unwrap();
    let series = seven_day_series("WIND-9", &base, &mut StdRng::seed_from_u64(3)).unwrap();

    let report = api.batch_predict(&series).await.unwrap();
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.successful, 7);
    assert!(report.errors.is_none());
    assert_eq!(report.predictions[6].turbine_id, "WIND-9_D7");

    let stats = BatchStats::from_items(&report.predictions);
    assert_eq!(stats.low, 7);
    assert_eq!(stats.predicted_failures, 0);
}

#[tokio::test]
async fn model_info_lists_features() {
    let api = TurbineApi::new(spawn_server(model()).await, TOKEN);

    let info = api.model_info().await.unwrap();
    assert_eq!(info.input_features.len(), 5);
    assert!(!info.limitations.is_empty());
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let api = TurbineApi::new(spawn_server(model()).await, "wrong");

    assert_matches!(api.model_info().await, Err(ClientError::Unauthorized));
}

#[tokio::test]
async fn degraded_server_is_an_api_error() {
    let api = TurbineApi::new(spawn_server(None).await, TOKEN);
    let reading = SensorReading::new(5.0, 3.0, 20.0, 900.0, 0).unwrap();

    assert_matches!(
        api.predict(&reading).await,
        Err(ClientError::Api { status: 503, .. })
    );
}
