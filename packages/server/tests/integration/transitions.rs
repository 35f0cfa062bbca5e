use common::Stage;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn full_lifecycle_preserves_bytes() {
    let app = TestApp::spawn().await;
    let bytes = b"\xff\xd8\xff\xe0 pretend jpeg".to_vec();

    let res = app.upload_image("foo.jpg", bytes.clone()).await;
    assert_eq!(res.status, 200);

    let res = app.post(&routes::copy_for_editing("foo.jpg")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image"], "edited_foo.jpg");
    assert_eq!(app.get(routes::GALLERY).await.names(), vec!["edited_foo.jpg"]);
    assert_eq!(app.get(routes::ORIGINAL).await.names(), vec!["foo.jpg"]);

    let res = app.post(&routes::move_to_edited("edited_foo.jpg")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(app.get(routes::GALLERY).await.names().is_empty());
    assert_eq!(app.get(routes::EDITED).await.names(), vec!["edited_foo.jpg"]);

    let res = app.post(&routes::move_to_complete("edited_foo.jpg")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image"], "foo.jpg");
    assert!(app.get(routes::EDITED).await.names().is_empty());
    assert_eq!(app.get(routes::COMPLETE).await.names(), vec!["foo.jpg"]);

    assert_eq!(app.read(Stage::Complete, "foo.jpg").unwrap(), bytes);
    assert_eq!(app.read(Stage::Original, "foo.jpg").unwrap(), bytes);
}

#[tokio::test]
async fn move_back_returns_edited_image_to_gallery() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_foo.jpg", b"x");

    let res = app.post(&routes::move_back_for_editing("edited_foo.jpg")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], 200);
    assert_eq!(app.get(routes::GALLERY).await.names(), vec!["edited_foo.jpg"]);
    assert!(app.get(routes::EDITED).await.names().is_empty());
}

#[tokio::test]
async fn missing_source_is_rejected_and_destination_untouched() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Complete, "bar.jpg", b"already done");

    let res = app.post(&routes::move_to_complete("bar.jpg")).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "SOURCE_MISSING");
    assert_eq!(app.read(Stage::Complete, "bar.jpg").unwrap(), b"already done");
}

#[tokio::test]
async fn copy_of_missing_original_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.post(&routes::copy_for_editing("nothing.jpg")).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "SOURCE_MISSING");
    assert!(app.get(routes::GALLERY).await.names().is_empty());
}

#[tokio::test]
async fn occupied_destination_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Original, "foo.jpg", b"fresh");
    app.seed(Stage::Gallery, "edited_foo.jpg", b"work in progress");

    let res = app.post(&routes::copy_for_editing("foo.jpg")).await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");
    assert_eq!(
        app.read(Stage::Gallery, "edited_foo.jpg").unwrap(),
        b"work in progress"
    );
}

#[tokio::test]
async fn concurrent_moves_of_one_image_succeed_once() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"x");
    let path = routes::move_to_edited("edited_foo.jpg");

    let (a, b, c) = tokio::join!(app.post(&path), app.post(&path), app.post(&path));

    let ok = [a.status, b.status, c.status]
        .iter()
        .filter(|s| **s == 200)
        .count();
    assert_eq!(ok, 1);
    assert_eq!(app.get(routes::EDITED).await.names(), vec!["edited_foo.jpg"]);
    assert!(app.get(routes::GALLERY).await.names().is_empty());
}

#[tokio::test]
async fn transition_rejects_invalid_name() {
    let app = TestApp::spawn().await;

    let res = app.post(&routes::move_to_edited("%2Ehidden.jpg")).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn sentinel_cannot_be_moved_out_of_edited() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "images_edited.txt", b"marker");

    for path in [
        routes::move_back_for_editing("images_edited.txt"),
        routes::move_to_complete("images_edited.txt"),
    ] {
        let res = app.post(&path).await;
        assert_eq!(res.status, 400, "{path}: {}", res.text);
        assert_eq!(res.body["code"], "SOURCE_MISSING");
    }

    assert_eq!(app.read(Stage::Edited, "images_edited.txt").unwrap(), b"marker");
    assert!(app.read(Stage::Gallery, "images_edited.txt").is_none());
    assert!(app.read(Stage::Complete, "images_edited.txt").is_none());
}

#[tokio::test]
async fn completing_into_a_reserved_name_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_images_edited.txt", b"x");

    let res = app.post(&routes::move_to_complete("edited_images_edited.txt")).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.read(Stage::Edited, "edited_images_edited.txt").is_some());
    assert!(app.read(Stage::Complete, "images_edited.txt").is_none());
}
