//! Remote documents and stylesheets against a mock HTTP server

mod common;

use kodegen_tools_critical::{
    AssetDescriptor, CriticalConfig, check_exists, load_document, load_stylesheet,
};
use std::time::Duration;

use common::{create_asset_mocks, create_test_dir, create_test_html, setup_mock_server, test_url};

#[tokio::test]
async fn remote_document_stylesheets_become_absolute_urls() {
    let mut server = setup_mock_server().await;
    let html = create_test_html("Remote", &["../css/site.css"]);
    let (_doc_get, _doc_head) = create_asset_mocks(&mut server, "/blog/index.html", "text/html", &html).await;
    let (_css_get, _css_head) = create_asset_mocks(
        &mut server,
        "/css/site.css",
        "text/css",
        ".a{background:url(../img/a.png)}.b{background:url(/fonts/b.woff)}",
    )
    .await;

    let dir = create_test_dir().unwrap();
    let config = CriticalConfig::builder().cwd(dir.path()).build().unwrap();

    let document = load_document(&test_url(&server, "/blog/index.html"), &config)
        .await
        .unwrap();
    assert!(document.is_remote());
    assert_eq!(document.virtual_path(), Some("/blog/index.html"));
    assert_eq!(
        document.css(),
        format!(
            ".a{{background:url({})}}.b{{background:url({})}}",
            test_url(&server, "/img/a.png"),
            test_url(&server, "/fonts/b.woff")
        )
    );
}

#[tokio::test]
async fn unresolvable_remote_stylesheet_is_empty_unless_strict() {
    let server = setup_mock_server().await;
    let missing = test_url(&server, "/missing.css");
    let dir = create_test_dir().unwrap();
    let document = AssetDescriptor::from_html("<html></html>", dir.path());

    let lenient = CriticalConfig::builder().cwd(dir.path()).build().unwrap();
    let stylesheet = load_stylesheet(&document, &missing, &lenient).await.unwrap();
    assert!(stylesheet.is_null());

    let strict = CriticalConfig::builder()
        .cwd(dir.path())
        .strict(true)
        .build()
        .unwrap();
    let err = load_stylesheet(&document, &missing, &strict).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn credentials_and_agent_are_sent() {
    let mut server = setup_mock_server().await;
    let mock = server
        .mock("GET", "/private.html")
        .match_header("authorization", "Basic dXNlcjpwdw==")
        .match_header("user-agent", "critical-tests")
        .with_status(200)
        .with_body("<html><head></head></html>")
        .create_async()
        .await;

    let config = CriticalConfig::builder()
        .user("user")
        .pass("pw")
        .user_agent("critical-tests")
        .build()
        .unwrap();

    let document = load_document(&test_url(&server, "/private.html"), &config)
        .await
        .unwrap();
    assert_eq!(document.text(), "<html><head></head></html>");
    mock.assert_async().await;
}

#[tokio::test]
async fn existence_probe_uses_head_by_default() {
    let mut server = setup_mock_server().await;
    let head = server
        .mock("HEAD", "/exists.css")
        .with_status(200)
        .create_async()
        .await;
    let _gone = server
        .mock("HEAD", "/gone.css")
        .with_status(404)
        .create_async()
        .await;
    let config = CriticalConfig::builder().build().unwrap();

    assert!(check_exists(&test_url(&server, "/exists.css").into(), &config).await);
    assert!(!check_exists(&test_url(&server, "/gone.css").into(), &config).await);
    head.assert_async().await;
}

#[tokio::test]
async fn configured_probe_method_is_used() {
    let mut server = setup_mock_server().await;
    let get = server
        .mock("GET", "/only-get.css")
        .with_status(200)
        .with_body("a{}")
        .create_async()
        .await;
    let config = CriticalConfig::builder()
        .probe_method(reqwest::Method::GET)
        .build()
        .unwrap();

    assert!(check_exists(&test_url(&server, "/only-get.css").into(), &config).await);
    get.assert_async().await;
}

#[tokio::test]
async fn error_status_body_is_used_for_documents() {
    let mut server = setup_mock_server().await;
    let _not_found = server
        .mock("GET", "/404.html")
        .with_status(404)
        .with_body("<html><body>not found</body></html>")
        .create_async()
        .await;

    let config = CriticalConfig::builder().build().unwrap();

    let document = load_document(&test_url(&server, "/404.html"), &config)
        .await
        .unwrap();
    assert_eq!(document.text(), "<html><body>not found</body></html>");
}

#[tokio::test]
async fn protocol_relative_reference_falls_back_to_http() {
    let mut server = setup_mock_server().await;
    let (_get, _head) = create_asset_mocks(&mut server, "/pr.css", "text/css", ".pr{}").await;
    let reference = test_url(&server, "/pr.css").replacen("http:", "", 1);
    assert!(reference.starts_with("//"));

    let dir = create_test_dir().unwrap();
    let config = CriticalConfig::builder()
        .cwd(dir.path())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let document = AssetDescriptor::from_html("<html></html>", dir.path());

    let stylesheet = load_stylesheet(&document, &reference, &config).await.unwrap();
    assert_eq!(stylesheet.text(), ".pr{}");
    assert_eq!(stylesheet.virtual_path(), Some(reference.as_str()));
}
