use super::*;

const MANIFEST: &str = r#"{
    "index.js": { "file": "assets/index-4f2a.js", "css": ["assets/index-77b1.css"] },
    "admin.js": { "file": "assets/admin-0c3d.js" }
}"#;

fn production() -> Vite {
    Vite::from_manifest_bytes(MANIFEST.as_bytes()).expect("manifest")
}

// =============================================================================
// PRODUCTION
// =============================================================================

#[test]
fn production_asset_links_css_then_script() {
    let tags = production().asset("index.js").expect("entry");
    assert_eq!(
        tags,
        "<link rel=\"stylesheet\" href=\"/assets/index-77b1.css\" />\n\
         <script type=\"module\" src=\"/assets/index-4f2a.js\"></script>"
    );
}

#[test]
fn production_entry_without_css_is_script_only() {
    let tags = production().asset("admin.js").expect("entry");
    assert_eq!(tags, r#"<script type="module" src="/assets/admin-0c3d.js"></script>"#);
}

#[test]
fn production_unknown_entry_is_none() {
    assert!(production().asset("missing.js").is_none());
}

#[test]
fn production_version_is_sha256_of_manifest() {
    let vite = production();
    let version = vite.version().expect("version");
    assert_eq!(version.len(), 64);
    assert!(version.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(Some(version), production().version());
}

#[test]
fn different_manifests_have_different_versions() {
    let other = Vite::from_manifest_bytes(br#"{"index.js":{"file":"assets/index-9999.js"}}"#).expect("manifest");
    assert_ne!(production().version(), other.version());
}

#[test]
fn malformed_manifest_is_rejected() {
    let err = Vite::from_manifest_bytes(b"{not json").unwrap_err();
    assert!(matches!(err, ViteError::InvalidManifest(_)));
}

#[test]
fn production_reads_manifest_from_dist() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("manifest.json"), MANIFEST).expect("write manifest");
    let vite = Vite::production(dir.path()).expect("load");
    assert_eq!(vite, production());
}

#[test]
fn production_missing_manifest_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Vite::production(dir.path()).unwrap_err();
    assert!(matches!(err, ViteError::BuildManifestNotFound { .. }));
}

// =============================================================================
// DEVELOPMENT
// =============================================================================

#[test]
fn development_asset_points_at_dev_server() {
    let vite = Vite::Development { dev_server: "http://[::1]:5173".to_owned() };
    assert_eq!(
        vite.asset("index.js").as_deref(),
        Some(r#"<script type="module" src="http://[::1]:5173/index.js"></script>"#)
    );
    assert_eq!(vite.version(), None);
    assert_eq!(vite.dev_server(), Some("http://[::1]:5173"));
}

#[tokio::test]
async fn development_reads_bridge_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bridge = BridgeFile::in_dir(dir.path());
    bridge.write("http://127.0.0.1:5173/").expect("write");

    let vite = Vite::development(&bridge, Duration::ZERO, Duration::from_millis(1)).await.expect("dev");

    assert_eq!(vite.dev_server(), Some("http://127.0.0.1:5173"));
}

#[tokio::test]
async fn development_times_out_without_bridge_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bridge = BridgeFile::in_dir(dir.path());

    let err = Vite::development(&bridge, Duration::from_millis(20), Duration::from_millis(5)).await.unwrap_err();

    assert!(matches!(err, ViteError::DevServerNotFound { .. }));
}

#[tokio::test]
async fn development_waits_for_late_bridge_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bridge = BridgeFile::in_dir(dir.path());
    let writer = bridge.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        writer.write("http://localhost:5173").expect("late write");
    });

    let vite = Vite::development(&bridge, Duration::from_secs(5), Duration::from_millis(5)).await.expect("dev");

    assert_eq!(vite.dev_server(), Some("http://localhost:5173"));
}

#[tokio::test]
async fn load_dispatches_on_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("manifest.json"), MANIFEST).expect("write manifest");
    let config = FrontendConfig {
        mode: FrontendMode::Production,
        dist_dir: dir.path().to_path_buf(),
        entry: "index.js".to_owned(),
        dev_wait: Duration::ZERO,
    };

    let vite = Vite::load(&config).await.expect("load");

    assert!(vite.version().is_some());
}
