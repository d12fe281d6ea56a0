use axum::extract::Json;
use serde_json::{json, Value};

pub async fn check() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Server is running" }))
}

#[test]
fn reports_ok() {
    use tokio_test::block_on;

    let Json(body) = block_on(check());
    assert_eq!(body["status"], "OK");
}
