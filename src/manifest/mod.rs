//! Manifest kinds and the placeholder records written for each.
//!
//! The hosting runtime only checks that these files exist with the expected
//! top-level shape, so every record here is a fixed default rather than
//! something derived from real build output.

pub mod generator;

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use generator::{generate, render};

/// One of the three manifest files the hosting platform expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// `required-server-files.json`
    RequiredServerFiles,
    /// `routes-manifest.json`
    RoutesManifest,
    /// `build-manifest.json`
    BuildManifest,
}

impl ManifestKind {
    /// Every kind, in write order.
    pub const ALL: [Self; 3] = [Self::RequiredServerFiles, Self::RoutesManifest, Self::BuildManifest];

    /// File name the manifest is written under.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::RequiredServerFiles => "required-server-files.json",
            Self::RoutesManifest => "routes-manifest.json",
            Self::BuildManifest => "build-manifest.json",
        }
    }

    /// Kebab-case name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.file_name().trim_end_matches(".json")
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ManifestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stem = s.trim().trim_end_matches(".json");
        Self::ALL.into_iter().find(|kind| kind.name() == stem).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
            format!("unknown manifest kind '{s}' (expected one of: {})", known.join(", "))
        })
    }
}

/// Contents of `required-server-files.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredServerFiles {
    /// Always 1.
    pub version: u32,
    /// Subset of the Next.js config the server runtime reads back.
    pub config: ServerConfig,
    /// Files the server bundle needs at runtime.
    pub files: Vec<String>,
    /// Globs excluded from the server bundle.
    pub ignore: Vec<String>,
}

/// Nested config flags carried by [`RequiredServerFiles`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Build output directory.
    pub dist_dir: String,
    /// Whether responses are gzip-compressed.
    pub compress: bool,
    /// Whether the `X-Powered-By` header is sent.
    pub powered_by_header: bool,
    /// Whether ETags are generated.
    pub generate_etags: bool,
    /// Whether routes carry a trailing slash.
    pub trailing_slash: bool,
    /// Image optimizer settings.
    pub images: ImagesConfig,
    /// Experimental flags, always empty.
    pub experimental: serde_json::Map<String, serde_json::Value>,
}

/// Image optimizer settings inside [`ServerConfig`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagesConfig {
    /// Static hosting cannot run the optimizer.
    pub unoptimized: bool,
}

/// Contents of `routes-manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesManifest {
    /// Always 3.
    pub version: u32,
    /// Whether a custom 404 page exists.
    pub pages404: bool,
    /// Path prefix the app is mounted under.
    pub base_path: String,
    /// Redirect rules.
    pub redirects: Vec<serde_json::Value>,
    /// Header rules.
    pub headers: Vec<serde_json::Value>,
    /// Dynamic route patterns.
    pub dynamic_routes: Vec<serde_json::Value>,
    /// Static route patterns.
    pub static_routes: Vec<serde_json::Value>,
    /// Data route patterns.
    pub data_routes: Vec<serde_json::Value>,
}

/// Contents of `build-manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    /// Polyfill chunks.
    pub polyfill_files: Vec<String>,
    /// Development-only chunks.
    pub dev_files: Vec<String>,
    /// AMP development chunks.
    pub amp_dev_files: Vec<String>,
    /// Low-priority chunks.
    pub low_priority_files: Vec<String>,
    /// Root main chunks.
    pub root_main_files: Vec<String>,
    /// Route to chunk list.
    pub pages: PageMap,
    /// Pages served AMP-first.
    pub amp_first_pages: Vec<String>,
}

/// Ordered route → chunk list map.
///
/// Serializes as a JSON object in route order. Constructed only through
/// [`PageMap::new`], which seeds the `"/_app"` and `"/"` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMap(Vec<(String, Vec<String>)>);

/// Routes every build manifest lists, even when the build produced none.
pub const REQUIRED_PAGES: [&str; 2] = ["/_app", "/"];

impl PageMap {
    /// Creates a map holding the required routes with empty chunk lists.
    #[must_use]
    pub fn new() -> Self {
        Self(REQUIRED_PAGES.iter().map(|route| ((*route).to_string(), Vec::new())).collect())
    }
}

impl Default for PageMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for PageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (route, chunks) in &self.0 {
            map.serialize_entry(route, chunks)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_distinct() {
        let names: Vec<&str> = ManifestKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec!["required-server-files.json", "routes-manifest.json", "build-manifest.json"]
        );
    }

    #[test]
    fn parses_name_and_file_name() {
        assert_eq!("routes-manifest".parse::<ManifestKind>(), Ok(ManifestKind::RoutesManifest));
        assert_eq!("build-manifest.json".parse::<ManifestKind>(), Ok(ManifestKind::BuildManifest));
        assert_eq!(ManifestKind::RequiredServerFiles.to_string(), "required-server-files");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "prerender-manifest".parse::<ManifestKind>().unwrap_err();
        assert!(err.contains("expected one of"));
    }

    #[test]
    fn page_map_serializes_in_insertion_order() {
        let json = serde_json::to_string(&PageMap::new()).unwrap();
        assert_eq!(json, r#"{"/_app":[],"/":[]}"#);
    }
}
