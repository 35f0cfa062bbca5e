use common::Stage;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn listings_are_empty_on_a_fresh_root() {
    let app = TestApp::spawn().await;

    for route in [routes::GALLERY, routes::EDITED, routes::ORIGINAL, routes::COMPLETE] {
        let res = app.get(route).await;
        assert_eq!(res.status, 200, "{route}: {}", res.text);
        assert!(res.names().is_empty(), "{route} should be empty");
    }
}

#[tokio::test]
async fn listing_is_sorted_and_hides_sentinel_and_dotfiles() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Edited, "edited_b.jpg", b"b");
    app.seed(Stage::Edited, "edited_a.jpg", b"a");
    app.seed(Stage::Edited, "images_edited.txt", b"");
    app.seed(Stage::Edited, ".c1a7.partial", b"junk");
    std::fs::create_dir(app.stage_dir(Stage::Edited).join("nested")).unwrap();

    let res = app.get(routes::EDITED).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.names(), vec!["edited_a.jpg", "edited_b.jpg"]);
}

#[tokio::test]
async fn upload_lands_in_original_stage() {
    let app = TestApp::spawn().await;

    let res = app.upload_image("foo.jpg", b"jpeg bytes".to_vec()).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.text, "foo.jpg");
    assert_eq!(app.read(Stage::Original, "foo.jpg").unwrap(), b"jpeg bytes");
    assert_eq!(app.get(routes::ORIGINAL).await.names(), vec!["foo.jpg"]);
    assert!(app.get(routes::GALLERY).await.names().is_empty());
}

#[tokio::test]
async fn upload_replaces_an_existing_original() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Original, "foo.jpg", b"old");

    let res = app.upload_image("foo.jpg", b"new".to_vec()).await;

    assert_eq!(res.status, 200);
    assert_eq!(app.read(Stage::Original, "foo.jpg").unwrap(), b"new");
}

#[tokio::test]
async fn upload_without_image_field_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload("photo", "foo.jpg", b"x".to_vec()).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.read(Stage::Original, "foo.jpg").is_none());
}

#[tokio::test]
async fn upload_with_traversal_filename_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload_image("../escape.jpg", b"x".to_vec()).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.get(routes::ORIGINAL).await.names().is_empty());
}

#[tokio::test]
async fn upload_over_the_limit_leaves_nothing_behind() {
    let app = TestApp::spawn_with_upload_limit(1024).await;

    let res = app.upload_image("big.jpg", vec![0u8; 8 * 1024]).await;

    assert_eq!(res.status, 413, "{}", res.text);
    assert!(app.read(Stage::Original, "big.jpg").is_none());
    let leftovers: Vec<_> = std::fs::read_dir(app.stage_dir(Stage::Original))
        .unwrap()
        .collect();
    assert!(leftovers.is_empty(), "scratch files left: {leftovers:?}");
}

#[tokio::test]
async fn delete_removes_gallery_image() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "edited_foo.jpg", b"x");

    let res = app.delete(&routes::delete_image("edited_foo.jpg")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(app.read(Stage::Gallery, "edited_foo.jpg").is_none());
    assert!(app.get(routes::GALLERY).await.names().is_empty());
}

#[tokio::test]
async fn delete_of_missing_image_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.delete(&routes::delete_image("ghost.jpg")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_only_touches_the_gallery_stage() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Original, "foo.jpg", b"x");

    let res = app.delete(&routes::delete_image("foo.jpg")).await;

    assert_eq!(res.status, 404);
    assert!(app.read(Stage::Original, "foo.jpg").is_some());
}

#[tokio::test]
async fn encoded_separator_in_name_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Original, "foo.jpg", b"x");

    let res = app.delete(&routes::delete_image("..%2Fimages_original%2Ffoo.jpg")).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.read(Stage::Original, "foo.jpg").is_some());
}

#[tokio::test]
async fn hidden_gallery_file_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, "images_edited.txt", b"marker");

    let res = app.delete(&routes::delete_image("images_edited.txt")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert!(app.read(Stage::Gallery, "images_edited.txt").is_some());
}

#[tokio::test]
async fn upload_under_reserved_name_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload_image("images_edited.txt", b"x".to_vec()).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    let entries = std::fs::read_dir(app.stage_dir(Stage::Original)).unwrap().count();
    assert_eq!(entries, 0);
}

#[tokio::test]
async fn upload_filename_is_stored_without_padding() {
    let app = TestApp::spawn().await;

    let res = app.upload_image("  foo.jpg ", b"x".to_vec()).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.text, "foo.jpg");
    assert_eq!(app.get(routes::ORIGINAL).await.names(), vec!["foo.jpg"]);
}

#[tokio::test]
async fn listed_name_with_leading_space_is_addressable() {
    let app = TestApp::spawn().await;
    app.seed(Stage::Gallery, " a.jpg", b"x");
    app.seed(Stage::Gallery, "a.jpg", b"y");

    let listed = app.get(routes::GALLERY).await.names();
    assert_eq!(listed, vec![" a.jpg", "a.jpg"]);

    let res = app.delete(&routes::delete_image("%20a.jpg")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(app.get(routes::GALLERY).await.names(), vec!["a.jpg"]);
}
