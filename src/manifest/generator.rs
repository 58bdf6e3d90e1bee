//! Canonical default content for each manifest kind.

use super::{
    BuildManifest, ImagesConfig, ManifestKind, PageMap, RequiredServerFiles, RoutesManifest,
    ServerConfig,
};
use crate::error::{ReconcileError, Result};

/// Default `required-server-files.json` record.
#[must_use]
pub fn required_server_files() -> RequiredServerFiles {
    RequiredServerFiles {
        version: 1,
        config: ServerConfig {
            dist_dir: ".next".to_string(),
            compress: true,
            powered_by_header: true,
            generate_etags: true,
            trailing_slash: false,
            images: ImagesConfig { unoptimized: true },
            experimental: serde_json::Map::new(),
        },
        files: Vec::new(),
        ignore: Vec::new(),
    }
}

/// Default `routes-manifest.json` record.
#[must_use]
pub fn routes_manifest() -> RoutesManifest {
    RoutesManifest {
        version: 3,
        pages404: true,
        base_path: String::new(),
        redirects: Vec::new(),
        headers: Vec::new(),
        dynamic_routes: Vec::new(),
        static_routes: Vec::new(),
        data_routes: Vec::new(),
    }
}

/// Default `build-manifest.json` record.
#[must_use]
pub fn build_manifest() -> BuildManifest {
    BuildManifest {
        polyfill_files: Vec::new(),
        dev_files: Vec::new(),
        amp_dev_files: Vec::new(),
        low_priority_files: Vec::new(),
        root_main_files: Vec::new(),
        pages: PageMap::new(),
        amp_first_pages: Vec::new(),
    }
}

/// Produces the default payload for `kind` as a JSON value.
///
/// Pure and deterministic: every call returns an equal value.
///
/// # Errors
///
/// Returns [`ReconcileError::Render`] if the record cannot be serialized.
pub fn generate(kind: ManifestKind) -> Result<serde_json::Value> {
    let value = match kind {
        ManifestKind::RequiredServerFiles => serde_json::to_value(required_server_files()),
        ManifestKind::RoutesManifest => serde_json::to_value(routes_manifest()),
        ManifestKind::BuildManifest => serde_json::to_value(build_manifest()),
    };
    value.map_err(|source| ReconcileError::Render { kind, source })
}

/// Renders the default payload for `kind` as pretty-printed JSON text with a
/// trailing newline.
///
/// # Errors
///
/// Returns [`ReconcileError::Render`] if the record cannot be serialized.
pub fn render(kind: ManifestKind) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&generate(kind)?)
        .map_err(|source| ReconcileError::Render { kind, source })?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_server_files_shape() {
        let value = generate(ManifestKind::RequiredServerFiles).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["files"], json!([]));
        assert_eq!(value["ignore"], json!([]));
        assert_eq!(value["config"]["distDir"], ".next");
        assert_eq!(value["config"]["images"]["unoptimized"], true);
    }

    #[test]
    fn routes_manifest_matches_hosting_layout() {
        assert_eq!(
            generate(ManifestKind::RoutesManifest).unwrap(),
            json!({
                "version": 3,
                "pages404": true,
                "basePath": "",
                "redirects": [],
                "headers": [],
                "dynamicRoutes": [],
                "staticRoutes": [],
                "dataRoutes": []
            })
        );
    }

    #[test]
    fn build_manifest_always_lists_app_and_index() {
        let value = generate(ManifestKind::BuildManifest).unwrap();
        let pages = value["pages"].as_object().unwrap();
        assert!(pages.contains_key("/_app"));
        assert!(pages.contains_key("/"));
        assert_eq!(value["ampFirstPages"], json!([]));
    }

    #[test]
    fn render_preserves_field_order() {
        let text = render(ManifestKind::BuildManifest).unwrap();
        let polyfill = text.find("polyfillFiles").unwrap();
        let pages = text.find("\"pages\"").unwrap();
        let amp_first = text.find("ampFirstPages").unwrap();
        assert!(polyfill < pages && pages < amp_first);
        assert!(text.find("\"/_app\"").unwrap() < text.find("\"/\"").unwrap());
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn every_kind_renders_an_object() {
        for kind in ManifestKind::ALL {
            let text = render(kind).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert!(value.is_object(), "{kind}");
            assert_eq!(value, generate(kind).unwrap());
        }
    }

    #[test]
    fn render_is_deterministic() {
        for kind in ManifestKind::ALL {
            assert_eq!(render(kind).unwrap(), render(kind).unwrap());
        }
    }
}
