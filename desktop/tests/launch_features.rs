//! Both launchers are client-only: no fullstack server features in their
//! manifests.

const MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
const WEB_MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../web/Cargo.toml"));

#[test]
fn launchers_declare_no_server_feature() {
    for (name, manifest) in [("desktop", MANIFEST), ("web", WEB_MANIFEST)] {
        assert!(
            !manifest.contains("dioxus/server"),
            "{name} manifest still enables dioxus/server"
        );
    }
}

#[test]
fn desktop_feature_is_on_by_default() {
    assert!(MANIFEST.contains("default = [\"desktop\"]"));
    assert!(MANIFEST.contains("desktop = [\"dioxus/desktop\"]"));
}
