use axum::{routing::post, Json, Router};
use catalog_service::config::{CatalogConfig, IdentityConfig};
use catalog_service::services::MongoDb;
use catalog_service::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use uuid::Uuid;

/// Token the stub identity provider accepts.
pub const TEST_TOKEN: &str = "valid-test-token";
/// Identity the stub attaches to TEST_TOKEN.
pub const TEST_USER_EMAIL: &str = "viewer@example.com";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

/// Spawn a stub identity provider on a random port.
///
/// It accepts exactly [`TEST_TOKEN`] and marks everything else inactive,
/// standing in for the external verification service.
pub async fn spawn_identity_stub() -> String {
    async fn introspect(Json(body): Json<Value>) -> Json<Value> {
        let token = body["token"].as_str().unwrap_or_default();
        if token == TEST_TOKEN {
            Json(json!({
                "active": true,
                "sub": "user-123",
                "email": TEST_USER_EMAIL,
            }))
        } else {
            Json(json!({ "active": false }))
        }
    }

    let router = Router::new().route("/introspect", post(introspect));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind identity stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

pub fn identity_stub_config(url: String) -> IdentityConfig {
    IdentityConfig {
        url,
        service_key: Secret::new("test-service-key".to_string()),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let identity_url = spawn_identity_stub().await;
        let db_name = format!("catalog_test_{}", Uuid::new_v4());

        let mut config = CatalogConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();
        config.identity = identity_stub_config(identity_url);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    /// Insert a movie fixture directly, returning its generated id as hex.
    pub async fn seed_movie(&self, movie: Value) -> String {
        let document =
            mongodb::bson::to_document(&movie).expect("Movie fixture must be a JSON object");
        let result = self
            .db
            .movies()
            .insert_one(document, None)
            .await
            .expect("Failed to seed movie");
        result
            .inserted_id
            .as_object_id()
            .expect("Seeded movie id should be an ObjectId")
            .to_hex()
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
