use serde_json::json;

use crate::helpers::{spawn_app, spawn_app_with_catalog, MOBY_DICK_ID, WALDEN_ID};

#[tokio::test]
async fn read_book_returns_segmented_content() {
    let app = spawn_app().await;
    app.seed_book_file(
        "moby_dick.txt",
        "LOOMINGS\n\nCall me Ishmael.\n\n[image:whale.png]",
    );

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/content", &app.address, MOBY_DICK_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["id"], MOBY_DICK_ID);
    assert_eq!(body["title"], "Moby-Dick");
    assert_eq!(body["author"], "Herman Melville");

    // "LOOMINGS" matches the known chapter "Loomings" case-insensitively,
    // so the stored anchor id is reused
    assert_eq!(
        body["blocks"],
        json!([
            { "type": "chapter", "title": "LOOMINGS", "anchorId": "loomings" },
            { "type": "paragraph", "text": "Call me Ishmael." },
            { "type": "image", "url": "whale.png" },
        ])
    );
    assert_eq!(
        body["chapters"],
        json!([{ "title": "LOOMINGS", "anchorId": "loomings" }])
    );
    assert_eq!(
        body["content"],
        "<h2>LOOMINGS</h2>\n<p>Call me Ishmael.</p>\n<img src=\"whale.png\" alt=\"image\" />"
    );
}

#[tokio::test]
async fn read_book_derives_an_anchor_id_when_the_known_chapter_has_none() {
    let catalog = json!([
        {
            "id": "anchorless-1",
            "title": "Night Watches",
            "author": "E. Calloway",
            "fileName": "night_watches.txt",
            "chapters": [
                { "title": "A Stormy Night" }
            ]
        }
    ]);
    let app = spawn_app_with_catalog(catalog).await;
    app.seed_book_file("night_watches.txt", "A STORMY NIGHT\n\nThe wind rose.");

    let body: serde_json::Value = reqwest::Client::new()
        .get(&format!("{}/books/anchorless-1/content", &app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse body");

    // No stored anchor id on the known chapter, so one is derived from it
    assert_eq!(
        body["blocks"][0],
        json!({ "type": "chapter", "title": "A STORMY NIGHT", "anchorId": "a-stormy-night" })
    );
    assert_eq!(
        body["chapters"],
        json!([{ "title": "A STORMY NIGHT", "anchorId": "a-stormy-night" }])
    );
}

#[tokio::test]
async fn read_book_returns_placeholder_content_for_an_empty_file() {
    let app = spawn_app().await;
    app.seed_book_file("walden.txt", "   \n \n ");

    let body: serde_json::Value = reqwest::Client::new()
        .get(&format!("{}/books/{}/content", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse body");

    assert_eq!(body["blocks"], json!([]));
    assert_eq!(body["chapters"], json!([]));
    assert_eq!(body["content"], "No content available.");
}

#[tokio::test]
async fn read_book_returns_404_for_an_unknown_id() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books/unknown/content", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["error"], "No book found for id unknown");
}

#[tokio::test]
async fn read_book_returns_500_when_the_file_cannot_be_read() {
    let app = spawn_app().await;
    // A directory where the file should be: the read fails with an
    // I/O error that is not a NotFound
    std::fs::create_dir(app.books_dir.join("walden.txt"))
        .expect("Failed to create the blocking directory");

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/content", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["error"], "Failed to read the book file");
}

#[tokio::test]
async fn read_book_returns_404_when_the_file_is_missing_from_the_store() {
    let app = spawn_app().await;
    // No file seeded for walden.txt

    let response = reqwest::Client::new()
        .get(&format!("{}/books/{}/content", &app.address, WALDEN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(
        body["error"],
        "The book file walden.txt is missing from the store"
    );
}
