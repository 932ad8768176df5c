#[cfg(test)]
mod screenings_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::handlers::tests::{born_years_ago, send, thirty_year_old_woman};
    use crate::api::routes::tests::create_test_app;

    #[tokio::test]
    async fn test_evaluate_screenings() {
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/screenings",
            Some(thirty_year_old_woman()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], 30);
        assert_eq!(body["bmi"], 23.3);
        assert_eq!(body["total"], 5);

        let ids: Vec<&str> = body["screenings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["cervical", "hiv", "depression", "hepatitis_c", "blood_pressure"]);

        let cervical = &body["screenings"][0];
        assert_eq!(cervical["status"], "due_now");
        assert_eq!(cervical["name"], "Cervical Cancer Screening");
        assert_eq!(cervical["frequency"], "Every 5 years");
    }

    #[tokio::test]
    async fn test_evaluate_grouped_screenings() {
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/screenings/grouped",
            Some(thirty_year_old_woman()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counts"]["dueNow"], 3);
        assert_eq!(body["counts"]["dueSoon"], 1);
        assert_eq!(body["counts"]["upToDate"], 1);
        assert_eq!(body["counts"]["notApplicable"], 0);
        assert_eq!(body["groups"]["upToDate"][0]["id"], "blood_pressure");
        assert_eq!(body["groups"]["dueSoon"][0]["id"], "hepatitis_c");
    }

    #[tokio::test]
    async fn test_empty_profile_has_no_screenings() {
        let (status, body) = send(create_test_app(), "POST", "/api/v1/screenings", Some(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], 0);
        assert_eq!(body["total"], 0);
        assert_eq!(body["screenings"], json!([]));
    }

    #[tokio::test]
    async fn test_lung_cancer_not_applicable_over_http() {
        let quit_year = chrono::Datelike::year(&chrono::Local::now().date_naive()) - 20;
        let profile = json!({
            "dateOfBirth": born_years_ago(60),
            "smokingStatus": "former",
            "smokingYears": 20,
            "packsPerDay": 1,
            "quitYear": quit_year
        });

        let (status, body) = send(create_test_app(), "POST", "/api/v1/screenings", Some(profile)).await;
        assert_eq!(status, StatusCode::OK);

        let screenings = body["screenings"].as_array().unwrap();
        let lung = screenings.iter().find(|item| item["id"] == "lung_cancer").unwrap();
        assert_eq!(lung["status"], "not_applicable");
        assert_eq!(screenings.last().unwrap()["id"], "lung_cancer");
    }

    #[tokio::test]
    async fn test_unknown_enum_values_are_accepted() {
        let profile = json!({
            "dateOfBirth": born_years_ago(40),
            "sexAtBirth": "prefer_not_to_say",
            "lastDepressionScreening": "sometime"
        });

        let (status, body) = send(create_test_app(), "POST", "/api/v1/screenings", Some(profile)).await;
        assert_eq!(status, StatusCode::OK);

        let depression = body["screenings"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["id"] == "depression")
            .cloned()
            .unwrap();
        assert_eq!(depression["status"], "due_now");
    }

    #[tokio::test]
    async fn test_null_lists_and_fractional_partner_count_are_accepted() {
        let profile = json!({
            "dateOfBirth": born_years_ago(22),
            "sexuallyActive": true,
            "partnersLast12Months": 2.0,
            "conditions": null,
            "familyHistory": null,
            "preferredAppointmentTimes": null
        });

        let (status, body) = send(create_test_app(), "POST", "/api/v1/screenings", Some(profile)).await;
        assert_eq!(status, StatusCode::OK);

        let screenings = body["screenings"].as_array().unwrap();
        assert!(screenings.iter().any(|item| item["id"] == "sti"));
        assert!(!screenings.iter().any(|item| item["id"] == "hepatitis_b"));
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_is_bad_request() {
        let (status, body) = send(
            create_test_app(),
            "POST",
            "/api/v1/screenings",
            Some(json!({ "conditions": 42 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_body_is_bad_request() {
        let (status, body) = send(create_test_app(), "POST", "/api/v1/screenings/grouped", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
