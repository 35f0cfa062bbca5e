use common::Stage;
use gallery::{GalleryApi, GalleryError, HttpGalleryApi};

use crate::common::TestApp;

fn client_for(app: &TestApp) -> HttpGalleryApi {
    HttpGalleryApi::new(&format!("http://{}", app.addr)).expect("valid base URL")
}

#[tokio::test]
async fn lists_edited_images() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_b.jpg", b"b");
    app.seed(Stage::Edited, "edited_a.jpg", b"a");
    app.seed(Stage::Gallery, "edited_c.jpg", b"c");

    let names = client_for(&app).list_edited().await.unwrap();

    assert_eq!(names, vec!["edited_a.jpg", "edited_b.jpg"]);
}

#[tokio::test]
async fn reads_edited_metadata() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "my photo.jpg", b"1234");

    let metadata = client_for(&app)
        .edited_metadata("my photo.jpg", "de")
        .await
        .unwrap();

    assert_eq!(metadata["FileName"], "my photo.jpg");
    assert_eq!(metadata["Language"], "de");
    assert_eq!(metadata["FileSize"], "4");
}

#[tokio::test]
async fn moves_image_back_for_editing() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_a.jpg", b"a");
    let api = client_for(&app);

    api.move_back_for_editing("edited_a.jpg").await.unwrap();

    assert!(api.list_edited().await.unwrap().is_empty());
    assert_eq!(app.read(Stage::Gallery, "edited_a.jpg").unwrap(), b"a");
}

#[tokio::test]
async fn missing_source_decodes_error_body() {
    let app = TestApp::spawn().await;

    let err = client_for(&app)
        .move_back_for_editing("ghost.jpg")
        .await
        .unwrap_err();

    match err {
        GalleryError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, "SOURCE_MISSING");
            assert!(message.contains("ghost.jpg"), "{message}");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_metadata_is_not_found() {
    let app = TestApp::spawn().await;

    let err = client_for(&app)
        .edited_metadata("ghost.jpg", "en")
        .await
        .unwrap_err();

    assert!(
        matches!(err, GalleryError::Api { status: 404, ref code, .. } if code == "NOT_FOUND"),
        "{err:?}"
    );
}
