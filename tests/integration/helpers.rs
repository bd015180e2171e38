//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use chrono::{Duration, NaiveDate, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use roomhub_core::config::{AppConfig, AuthConfig, DatabaseConfig};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database
    /// is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("ROOMHUB_TEST_DATABASE_URL") else {
            eprintln!("ROOMHUB_TEST_DATABASE_URL not set; skipping");
            return None;
        };

        let config = AppConfig {
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                ..AuthConfig::default()
            },
            server: Default::default(),
            logging: Default::default(),
        };

        let db = roomhub_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        roomhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = roomhub_api::app::build_state(config, db_pool.clone());
        let router = roomhub_api::build_app(state);

        Some(Self { router, db_pool })
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        for table in ["bookings", "rooms", "users"] {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user directly and return their ID
    pub async fn create_test_user(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hasher = roomhub_auth::password::PasswordHasher::new();
        let hash = hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5::user_role)",
        )
        .bind(id)
        .bind(username)
        .bind(format!("{username}@test.com"))
        .bind(&hash)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a test room directly and return its ID
    pub async fn create_test_room(&self, number: i32, price_per_day: &str, capacity: i32) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO rooms (id, number, price_per_day, capacity) \
             VALUES ($1, $2, $3::numeric, $4)",
        )
        .bind(id)
        .bind(number)
        .bind(price_per_day)
        .bind(capacity)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test room");

        id
    }

    /// Insert a booking directly, bypassing the API (used to seed
    /// bookings the API would refuse, e.g. already-started stays).
    pub async fn insert_booking(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO bookings (id, user_id, room_id, start_date, end_date, cost) \
             VALUES ($1, $2, $3, $4, $5, 0)",
        )
        .bind(id)
        .bind(user_id)
        .bind(room_id)
        .bind(start_date)
        .bind(end_date)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert test booking");

        id
    }

    /// Login and return a JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// A date `days` days from today (UTC).
pub fn days_from_now(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}
