use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::helpers::{spawn_app, WALDEN_ID};

#[tokio::test]
async fn download_book_returns_the_raw_file_as_an_attachment() {
    let app = spawn_app().await;
    app.seed_book_file(
        "walden.txt",
        "In wildness is the preservation of the world.",
    );

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/download", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("Missing Content-Type header")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("text/plain"));

    let content_disposition = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .expect("Missing Content-Disposition header")
        .to_str()
        .unwrap()
        .to_owned();
    assert_eq!(content_disposition, "attachment; filename=\"walden.txt\"");

    let body = response.text().await.expect("Failed to read body");
    assert_eq!(body, "In wildness is the preservation of the world.");
}

#[tokio::test]
async fn download_book_returns_404_for_an_unknown_id() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books/unknown/download", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn download_book_returns_500_when_the_file_cannot_be_read() {
    let app = spawn_app().await;
    // A directory where the file should be: the read fails with an
    // I/O error that is not a NotFound
    std::fs::create_dir(app.books_dir.join("walden.txt"))
        .expect("Failed to create the blocking directory");

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/download", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["error"], "Failed to read the book file");
}

#[tokio::test]
async fn download_book_returns_404_when_the_file_is_missing_from_the_store() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/download", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}
