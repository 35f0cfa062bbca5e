use common::Stage;

use crate::common::{CORRUPT_IMAGE, TestApp, routes};

#[tokio::test]
async fn reads_gallery_metadata_in_requested_language() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"1234");

    let res = app.get(&routes::metadata("edited_foo.jpg", "de")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["data"]["FileName"], "edited_foo.jpg");
    assert_eq!(res.body["data"]["Language"], "de");
    assert_eq!(res.body["data"]["FileSize"], "4");
}

#[tokio::test]
async fn missing_language_falls_back_to_default() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"x");

    let res = app.get(&routes::metadata_default_lang("edited_foo.jpg")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["data"]["Language"], "en");
}

#[tokio::test]
async fn reads_edited_metadata_from_edited_stage_only() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_foo.jpg", b"x");

    let res = app.get(&routes::metadata_edited("edited_foo.jpg", "en")).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let res = app.get(&routes::metadata("edited_foo.jpg", "en")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn metadata_of_missing_image_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::metadata("ghost.jpg", "en")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn sentinel_file_is_not_an_image() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "images_edited.txt", b"");

    let res = app.get(&routes::metadata_edited("images_edited.txt", "en")).await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn invalid_language_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"x");

    let res = app.get(&routes::metadata("edited_foo.jpg", "-overwrite_original")).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn tool_failure_is_reported() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "broken.jpg", CORRUPT_IMAGE);

    let res = app.get(&routes::metadata("broken.jpg", "en")).await;

    assert_eq!(res.status, 500);
    assert_eq!(res.body["code"], "EXTERNAL_TOOL_ERROR");
    assert!(res.body["message"].as_str().unwrap().contains("File format error"));
}

#[tokio::test]
async fn delete_all_metadata_returns_tool_report() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"x");

    let res = app.post(&routes::delete_all_metadata("edited_foo.jpg")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["body"], "1 image files updated");
    assert_eq!(
        *app.tool.stripped.lock().unwrap(),
        vec!["edited_foo.jpg".to_string()]
    );
}

#[tokio::test]
async fn delete_all_metadata_of_missing_image_never_runs_tool() {
    let app = TestApp::spawn().await;

    let res = app.post(&routes::delete_all_metadata("ghost.jpg")).await;

    assert_eq!(res.status, 404);
    assert!(app.tool.stripped.lock().unwrap().is_empty());
}
