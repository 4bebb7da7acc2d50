//! Version catalog client
//!
//! Queries `<api-url>/<version>` and picks the download URL for a
//! platform/product pair out of the decoded response.
//!
//! ```json
//! {
//!   "version": "6.1",
//!   "permalink": "https://ffbinaries.com/api/v1/version/6.1",
//!   "bin": {
//!     "linux-64": { "ffmpeg": "https://.../ffmpeg-6.1-linux-64.zip", "ffprobe": "..." }
//!   }
//! }
//! ```

use crate::core::output;
use crate::error::FetchError;
use crate::platform::PlatformKey;
use crate::product::Product;
use serde::Deserialize;
use std::collections::HashMap;

/// Tag used when the caller does not ask for a specific release
pub(crate) const LATEST: &str = "latest";

/// Download locations for one platform. Missing and empty fields both mean
/// "not published".
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BinarySet {
    #[serde(default)]
    pub ffmpeg: Option<String>,
    #[serde(default)]
    pub ffprobe: Option<String>,
    #[serde(default)]
    pub ffplay: Option<String>,
}

impl BinarySet {
    pub fn get(&self, product: Product) -> Option<&str> {
        let url = match product {
            Product::FFmpeg => &self.ffmpeg,
            Product::FFprobe => &self.ffprobe,
            Product::FFplay => &self.ffplay,
        };
        url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// Decoded catalog response for one release.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogEntry {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub permalink: String,
    pub bin: HashMap<String, BinarySet>,
}

impl CatalogEntry {
    /// Download URL for `product` on `platform`.
    ///
    /// A platform missing from `bin` and a product missing from a platform's
    /// set are reported as different errors.
    pub fn download_url(
        &self,
        platform: PlatformKey,
        product: Product,
    ) -> Result<&str, FetchError> {
        let binaries = self
            .bin
            .get(platform.as_str())
            .ok_or_else(|| FetchError::PlatformNotOffered {
                platform: platform.to_string(),
                version: self.version.clone(),
            })?;

        binaries
            .get(product)
            .ok_or_else(|| FetchError::BinaryNotFound {
                product: product.to_string(),
                platform: platform.to_string(),
            })
    }
}

/// Normalize a caller-supplied version tag; empty means latest.
pub(crate) fn normalize_version(version: &str) -> &str {
    let version = version.trim();
    if version.is_empty() { LATEST } else { version }
}

/// Build the catalog URL for a version tag.
pub(crate) fn catalog_url(api_url: &str, version: &str) -> String {
    format!(
        "{}/{}",
        api_url.trim_end_matches('/'),
        normalize_version(version)
    )
}

/// Fetch and decode the catalog entry for `version` (empty = latest).
pub(crate) fn fetch_catalog(
    agent: &ureq::Agent,
    api_url: &str,
    version: &str,
) -> Result<CatalogEntry, FetchError> {
    let url = catalog_url(api_url, version);
    output::detail(&format!("querying {}", url));

    let body = agent
        .get(&url)
        .call()
        .map_err(|e| FetchError::from_ureq(&url, e))?
        .into_string()
        .map_err(|e| FetchError::Body {
            url: url.clone(),
            source: e,
        })?;

    serde_json::from_str(&body).map_err(|e| FetchError::Decode { url, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> CatalogEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version(""), "latest");
        assert_eq!(normalize_version("   "), "latest");
        assert_eq!(normalize_version("6.1"), "6.1");
        assert_eq!(normalize_version("latest"), "latest");
    }

    #[test]
    fn test_catalog_url_trims_trailing_slash() {
        assert_eq!(
            catalog_url("https://ffbinaries.com/api/v1/version/", ""),
            "https://ffbinaries.com/api/v1/version/latest"
        );
        assert_eq!(
            catalog_url("http://localhost:8080/v", "4.4.1"),
            "http://localhost:8080/v/4.4.1"
        );
    }

    #[test]
    fn test_decode_full_response() {
        let catalog = entry(
            r#"{
                "version": "6.1",
                "permalink": "https://ffbinaries.com/api/v1/version/6.1",
                "bin": {
                    "windows-64": {"ffmpeg": "http://x/w-ffmpeg.zip", "ffprobe": "http://x/w-ffprobe.zip"},
                    "linux-64": {"ffmpeg": "http://x/l-ffmpeg.zip", "ffplay": "http://x/l-ffplay.zip"},
                    "linux-armhf": {"ffmpeg": "http://x/arm.zip"}
                }
            }"#,
        );
        assert_eq!(catalog.version, "6.1");
        assert_eq!(catalog.bin.len(), 3);
        assert_eq!(
            catalog
                .download_url(PlatformKey::Windows64, Product::FFprobe)
                .unwrap(),
            "http://x/w-ffprobe.zip"
        );
        assert_eq!(
            catalog
                .download_url(PlatformKey::Linux64, Product::FFplay)
                .unwrap(),
            "http://x/l-ffplay.zip"
        );
    }

    #[test]
    fn test_decode_without_permalink() {
        let catalog = entry(r#"{"version":"6.1","bin":{"linux-64":{"ffmpeg":"http://x/ffmpeg.zip"}}}"#);
        assert_eq!(
            catalog
                .download_url(PlatformKey::Linux64, Product::FFmpeg)
                .unwrap(),
            "http://x/ffmpeg.zip"
        );
    }

    #[test]
    fn test_empty_product_is_absence_error() {
        let catalog = entry(r#"{"version":"6.1","bin":{"linux-64":{"ffmpeg":"http://x/ffmpeg.zip","ffprobe":""}}}"#);
        let err = catalog
            .download_url(PlatformKey::Linux64, Product::FFprobe)
            .unwrap_err();
        assert!(
            matches!(err, FetchError::BinaryNotFound { ref product, ref platform }
                if product == "ffprobe" && platform == "linux-64"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_missing_product_field_is_absence_error() {
        let catalog = entry(r#"{"version":"6.1","bin":{"osx-64":{"ffmpeg":"http://x/ffmpeg.zip"}}}"#);
        let err = catalog
            .download_url(PlatformKey::Osx64, Product::FFprobe)
            .unwrap_err();
        assert!(matches!(err, FetchError::BinaryNotFound { .. }));
    }

    #[test]
    fn test_missing_platform_differs_from_missing_product() {
        let catalog = entry(r#"{"version":"6.1","bin":{"linux-64":{"ffmpeg":"http://x/ffmpeg.zip","ffprobe":""}}}"#);

        let platform_err = catalog
            .download_url(PlatformKey::Osx64, Product::FFmpeg)
            .unwrap_err();
        let product_err = catalog
            .download_url(PlatformKey::Linux64, Product::FFprobe)
            .unwrap_err();

        assert!(matches!(platform_err, FetchError::PlatformNotOffered { .. }));
        assert!(platform_err.to_string().contains("osx-64"));
        assert!(platform_err.to_string().contains("not offered"));
        assert_ne!(platform_err.to_string(), product_err.to_string());
    }

    #[test]
    fn test_missing_bin_fails_to_decode() {
        assert!(serde_json::from_str::<CatalogEntry>(r#"{"version":"6.1"}"#).is_err());
    }

    // ==================== Mocked HTTP tests ====================

    mod mock_tests {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn api_url(server: &MockServer) -> String {
            format!("{}/api/v1/version", server.uri())
        }

        #[tokio::test]
        async fn test_fetch_catalog_specific_version() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/api/v1/version/6.1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "version": "6.1",
                    "permalink": "https://ffbinaries.com/api/v1/version/6.1",
                    "bin": {"linux-64": {"ffmpeg": "http://x/ffmpeg.zip"}}
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let catalog = fetch_catalog(&agent, &api_url(&mock_server), "6.1").unwrap();

            assert_eq!(catalog.version, "6.1");
            assert!(catalog.bin.contains_key("linux-64"));
        }

        #[tokio::test]
        async fn test_fetch_catalog_empty_version_requests_latest() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/api/v1/version/latest"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "version": "7.0",
                    "bin": {}
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let catalog = fetch_catalog(&agent, &api_url(&mock_server), "").unwrap();

            assert_eq!(catalog.version, "7.0");
            assert!(catalog.bin.is_empty());
        }

        #[tokio::test]
        async fn test_fetch_catalog_service_unavailable() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let err = fetch_catalog(&agent, &api_url(&mock_server), "6.1").unwrap_err();

            assert!(
                matches!(err, FetchError::BadStatus { code: 503, .. }),
                "got {err:?}"
            );
            assert!(err.to_string().contains("503"));
        }

        #[tokio::test]
        async fn test_fetch_catalog_unknown_version_404() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/api/v1/version/0.0"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let err = fetch_catalog(&agent, &api_url(&mock_server), "0.0").unwrap_err();

            assert!(err.to_string().starts_with("bad status: 404"));
        }

        #[tokio::test]
        async fn test_fetch_catalog_malformed_body() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let err = fetch_catalog(&agent, &api_url(&mock_server), "").unwrap_err();

            assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
        }

        #[tokio::test]
        async fn test_fetch_catalog_schema_drift() {
            let mock_server = MockServer::start().await;

            // `bin` renamed upstream
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "version": "6.1",
                    "binaries": {"linux-64": {"ffmpeg": "http://x/ffmpeg.zip"}}
                })))
                .mount(&mock_server)
                .await;

            let agent = ureq::Agent::new();
            let err = fetch_catalog(&agent, &api_url(&mock_server), "6.1").unwrap_err();

            assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
        }
    }

    #[test]
    fn test_fetch_catalog_connection_refused() {
        // Port 1 is reserved; nothing listens there.
        let agent = ureq::Agent::new();
        let err = fetch_catalog(&agent, "http://127.0.0.1:1/api", "6.1").unwrap_err();
        assert!(matches!(err, FetchError::Connect { .. }), "got {err:?}");
        // The io cause stays in the source chain, not in the message.
        assert!(!err.to_string().contains("refused"), "got {err}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
