use crate::helpers::{spawn_app, WALDEN_ID};

#[tokio::test]
async fn get_book_matches_a_uuid_id_whatever_its_casing() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!(
            "{}/books/6F2A9F1E-8A31-4DE2-9C3D-0B2A4BAFC9D1",
            &app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let book: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(book["title"], "Moby-Dick");
}

#[tokio::test]
async fn get_book_matches_a_legacy_raw_string_id() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let book: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(book["title"], "Walden");
}

#[tokio::test]
async fn get_book_returns_404_with_a_json_error_for_an_unknown_id() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books/does-not-exist", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["error"], "No book found for id does-not-exist");
}
