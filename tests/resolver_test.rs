//! Resolution against search paths and stylesheet virtual paths

mod common;

use kodegen_tools_critical::{
    AssetError, build_search_paths, load_document, load_stylesheet, resolve_reference,
};

use common::{config_in, create_test_dir, create_test_html, slash_path, write_project};

#[tokio::test]
async fn missing_reference_without_search_paths_is_file_not_found() {
    let dir = create_test_dir().unwrap();
    let config = config_in(dir.path());

    let err = resolve_reference("does/not/exist.css", &[], &config)
        .await
        .unwrap_err();
    match err {
        AssetError::FileNotFound {
            reference,
            search_paths,
        } => {
            assert_eq!(reference, "does/not/exist.css");
            assert!(search_paths.is_empty());
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn stylesheet_virtual_path_drops_the_query() {
    let dir = create_test_dir().unwrap();
    let html = create_test_html("Query", &["css/a.css?x=1"]);
    write_project(dir.path(), &[
        ("project/index.html", html.as_bytes()),
        ("project/css/a.css", b".a{color:red}"),
    ])
    .unwrap();
    let config = config_in(dir.path());

    let document = load_document("project/index.html", &config).await.unwrap();
    assert_eq!(document.virtual_path(), Some("/index.html"));

    let stylesheet = load_stylesheet(&document, "css/a.css?x=1", &config)
        .await
        .unwrap();
    assert_eq!(stylesheet.virtual_path(), Some("/css/a.css"));
    assert_eq!(stylesheet.path(), Some("css/a.css?x=1"));
    assert_eq!(
        stylesheet.location(),
        Some(format!("{}/project/css/a.css", slash_path(dir.path())).as_str())
    );
}

#[tokio::test]
async fn failure_lists_every_search_path() {
    let dir = create_test_dir().unwrap();
    let html = create_test_html("Missing", &["css/missing.css"]);
    write_project(dir.path(), &[("site/index.html", html.as_bytes())]).unwrap();
    let config = config_in(dir.path());

    let err = load_document("site/index.html", &config).await.unwrap_err();
    let search_paths = err.search_paths().expect("lookup failure");
    assert!(search_paths.contains(&format!("{}/site", slash_path(dir.path()))));
    assert!(search_paths.contains(&slash_path(dir.path())));
}

#[tokio::test]
async fn asset_paths_are_searched() {
    let dir = create_test_dir().unwrap();
    let html = create_test_html("Assets", &["/theme.css"]);
    write_project(dir.path(), &[
        ("pages/index.html", html.as_bytes()),
        ("vendor/theme/theme.css", b"h1{margin:0}"),
    ])
    .unwrap();
    let config = kodegen_tools_critical::CriticalConfig::builder()
        .cwd(dir.path())
        .asset_paths(["vendor/theme"])
        .build()
        .unwrap();

    let document = load_document("pages/index.html", &config).await.unwrap();
    let search_paths = build_search_paths(&document, &"/theme.css".into(), &config, true).await;
    assert!(search_paths.contains(&"vendor/theme".to_string()));
    assert_eq!(document.css(), "h1{margin:0}");
}
