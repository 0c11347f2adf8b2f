// Expense Tracker - REST API with Axum
//
// Routes under /api plus a banner at /. Every response goes through the
// CORS middleware; any OPTIONS request stops there with 204.

use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::categories::{self, Category};
use crate::error::Result;
use crate::expense::{Expense, ExpenseInput};
use crate::ocr::{self, OcrResponse};
use crate::store::ExpenseStore;

pub const SERVICE_NAME: &str = "expense-tracker-backend";

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str =
    "Origin, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ExpenseStore,
}

impl AppState {
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: &'static [Category],
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Service banner
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Expense Tracker API",
        version: crate::VERSION,
        status: "running",
    })
}

/// GET /api/health - Health check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        service: SERVICE_NAME,
        version: crate::VERSION,
    })
}

/// GET /api/expenses - All expenses with count
async fn list_expenses(State(state): State<AppState>) -> Json<ExpenseList> {
    let expenses = state.store.list();
    let count = expenses.len();
    Json(ExpenseList { expenses, count })
}

/// Decode a JSON body whatever its Content-Type header says
fn bind_expense(body: &[u8]) -> Result<ExpenseInput> {
    Ok(serde_json::from_slice(body)?)
}

/// POST /api/expenses - Create an expense
async fn create_expense(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>)> {
    let input = bind_expense(&body)?;
    let expense = state.store.create(input);
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/expenses/:id - One expense
async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Expense>> {
    state.store.get(&id).map(Json)
}

/// PUT /api/expenses/:id - Replace an expense
async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Expense>> {
    let input = bind_expense(&body)?;
    state.store.update(&id, input).map(Json)
}

/// DELETE /api/expenses/:id - Remove an expense
async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.store.delete(&id)?;
    Ok(Json(MessageResponse {
        message: "Expense deleted",
    }))
}

/// POST /api/ocr - Receipt processing placeholder
async fn process_receipt() -> Json<OcrResponse> {
    Json(ocr::process_receipt(Utc::now()))
}

/// GET /api/categories - Category table
async fn list_categories() -> Json<CategoryList> {
    let categories = categories::all();
    Json(CategoryList {
        categories,
        count: categories.len(),
    })
}

// ============================================================================
// Middleware
// ============================================================================

/// Unsupported method on a known path is treated as an unknown route
async fn method_not_allowed() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Adds CORS headers to every response and answers OPTIONS directly
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route("/ocr", post(process_receipt))
        .route("/categories", get(list_categories))
        .method_not_allowed_fallback(method_not_allowed);

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, ExpenseStore) {
        let store = ExpenseStore::with_seed();
        (router(AppState::new(store.clone())), store)
    }

    async fn send(app: Router, request: axum::http::Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Expense Tracker API", "version": "1.0.0", "status": "running"})
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "expense-tracker-backend");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_list_expenses() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/expenses")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["expenses"][0]["merchant"], "Starbucks");
        assert_eq!(body["expenses"][1]["amount"], 45.0);
    }

    #[tokio::test]
    async fn test_create_expense() {
        let (app, store) = app();
        let request = json_request(
            Method::POST,
            "/api/expenses",
            json!({"id": "abc", "amount": 12.0, "category": "Shopping", "merchant": "Target"}),
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "3");
        assert_eq!(body["merchant"], "Target");
        assert_eq!(body["description"], "");
        assert_eq!(store.count(), 3);
    }

    #[tokio::test]
    async fn test_create_expense_bad_json() {
        let (app, store) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(store.count(), 2);
    }

    #[tokio::test]
    async fn test_create_expense_wrong_type() {
        let (app, _) = app();
        let request = json_request(Method::POST, "/api/expenses", json!({"amount": "ten"}));
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_expense_ignores_content_type() {
        let (app, store) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(r#"{"amount": 1.0}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["amount"], 1.0);
        assert_eq!(store.count(), 3);
    }

    #[tokio::test]
    async fn test_create_expense_without_content_type() {
        let (app, _) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .body(Body::from(r#"{"merchant": "Target"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["merchant"], "Target");
    }

    #[tokio::test]
    async fn test_create_expense_empty_body() {
        let (app, _) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_expense_null_fields() {
        let (app, _) = app();
        let request = json_request(
            Method::POST,
            "/api/expenses",
            json!({"amount": null, "merchant": "X", "description": null}),
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["amount"], 0.0);
        assert_eq!(body["merchant"], "X");
        assert_eq!(body["description"], "");
    }

    #[tokio::test]
    async fn test_get_expense() {
        let (app, _) = app();
        let (status, body) = send(app.clone(), get_request("/api/expenses/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["merchant"], "Uber");

        let (status, body) = send(app, get_request("/api/expenses/7")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Expense not found"}));
    }

    #[tokio::test]
    async fn test_update_expense() {
        let (app, store) = app();
        let request = json_request(
            Method::PUT,
            "/api/expenses/1",
            json!({"id": "77", "amount": 3.5, "merchant": "Peet's"}),
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "1");
        assert_eq!(body["amount"], 3.5);
        assert_eq!(store.get("1").unwrap().merchant, "Peet's");
    }

    #[tokio::test]
    async fn test_update_without_date_stores_zero_date() {
        let (app, store) = app();
        let request = json_request(Method::PUT, "/api/expenses/1", json!({"amount": 2.0}));
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "0001-01-01T00:00:00Z");
        assert_eq!(body["merchant"], "");
        assert_eq!(store.get("1").unwrap().date, crate::expense::zero_date());
    }

    #[tokio::test]
    async fn test_update_expense_not_found() {
        let (app, _) = app();
        let request = json_request(Method::PUT, "/api/expenses/9", json!({"amount": 1.0}));
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Expense not found");
    }

    #[tokio::test]
    async fn test_update_bad_body_checked_before_lookup() {
        let (app, _) = app();
        let request = json_request(Method::PUT, "/api/expenses/9", json!({"amount": []}));
        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let (app, store) = app();
        let request = axum::http::Request::builder()
            .method(Method::DELETE)
            .uri("/api/expenses/1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app.clone(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Expense deleted"}));
        assert_eq!(store.count(), 1);

        let request = axum::http::Request::builder()
            .method(Method::DELETE)
            .uri("/api/expenses/1")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ocr_stub() {
        let (app, _) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/ocr")
            .body(Body::from("binary receipt bytes"))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Receipt processing endpoint");
        assert_eq!(body["data"]["merchant"], "Sample Store");
        assert_eq!(body["data"]["items"][0], json!({"name": "Item 1", "price": 15.99}));
    }

    #[tokio::test]
    async fn test_categories() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/categories")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 10);
        assert_eq!(body["categories"][1]["name"], "Transportation");
        assert_eq!(body["categories"][9]["icon"], "ellipsis-h");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_found() {
        let (app, store) = app();
        let request = json_request(Method::PATCH, "/api/expenses", json!({"amount": 1.0}));
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(store.count(), 2);

        let request = json_request(Method::PATCH, "/api/expenses/1", json!({"amount": 1.0}));
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_on_responses() {
        let (app, _) = app();
        let response = app.oneshot(get_request("/api/expenses/404")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let (app, store) = app();
        let request = axum::http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/expenses/1")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(store.count(), 2);
    }
}
