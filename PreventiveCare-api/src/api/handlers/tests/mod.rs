// Handler tests drive the full router with tower's oneshot

mod health_test;
mod screenings_test;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Datelike, Local};
use serde_json::Value;
use tower::ServiceExt;

/// Send one request and return the status with the JSON body (`Null` when empty)
pub(super) async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// Date of birth that makes the patient exactly `age` today
pub(super) fn born_years_ago(age: i32) -> String {
    let today = Local::now().date_naive();
    format!("{:04}-01-01", today.year() - age)
}

/// Wire form of a 30-year-old woman with no risk factors
pub(super) fn thirty_year_old_woman() -> Value {
    serde_json::json!({
        "dateOfBirth": born_years_ago(30),
        "sexAtBirth": "female",
        "anatomyPresent": ["cervix", "uterus"],
        "smokingStatus": "never",
        "alcoholFrequency": "never",
        "conditions": [],
        "familyHistory": [],
        "heightInches": 65,
        "weightLbs": 140,
        "lastCervicalScreening": "never",
        "lastBloodPressure": "within_1_year",
        "sexuallyActive": false
    })
}
