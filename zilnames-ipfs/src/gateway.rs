//! Gateway rewriting for content-addressed URLs.
//!
//! `ipfs://<cid>[/path][?query]` becomes `<gateway>/<cid>[/path][?query]`.
//! Anything that does not parse as an `ipfs:` URL with a plausible CID is
//! returned untouched, so normalization never fails and is idempotent.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use zilnames_core::constants::{DEFAULT_IPFS_GATEWAY, IPFS_SCHEME};
use zilnames_core::error::{Result, ZilnamesError};

/// Gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsConfig {
    /// Base URL that CIDs are appended to (e.g. "https://ipfs.io/ipfs")
    pub gateway_url: String,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_IPFS_GATEWAY.into(),
        }
    }
}

impl IpfsConfig {
    /// Creates a config for a custom gateway.
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
        }
    }
}

/// A parsed `ipfs://` reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpfsPath<'a> {
    /// Content identifier
    pub cid: &'a str,
    /// Everything after the CID, including the leading `/`, `?` or `#`
    pub suffix: &'a str,
}

/// Returns true if `raw` is an `ipfs:` URL.
pub fn is_ipfs_url(raw: &str) -> bool {
    Url::parse(raw.trim()).is_ok_and(|url| url.scheme() == IPFS_SCHEME)
}

/// Splits an `ipfs://` URL into CID and suffix.
///
/// Accepts the legacy `ipfs://ipfs/<cid>` spelling. Returns `None` for any
/// other scheme or when the CID is not alphanumeric.
pub fn parse_ipfs_url(raw: &str) -> Option<IpfsPath<'_>> {
    let raw = raw.trim();
    if !is_ipfs_url(raw) {
        return None;
    }

    // Url lower-cases the scheme, so strip the prefix case-insensitively.
    let prefix_len = "ipfs://".len();
    if !raw
        .get(..prefix_len)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("ipfs://"))
    {
        return None;
    }
    let rest = &raw[prefix_len..];
    let rest = rest.strip_prefix("ipfs/").unwrap_or(rest);

    let end = rest.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let (cid, suffix) = rest.split_at(end);

    if cid.is_empty() || !cid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(IpfsPath { cid, suffix })
}

/// Rewrites `ipfs://` URLs against a configured gateway.
#[derive(Clone, Debug)]
pub struct IpfsGateway {
    base: String,
}

impl IpfsGateway {
    /// Creates a gateway with the default public base URL.
    pub fn new() -> Self {
        Self {
            base: DEFAULT_IPFS_GATEWAY.into(),
        }
    }

    /// Creates a gateway from configuration.
    ///
    /// # Errors
    /// `ConfigError` unless the base URL is an absolute `http(s)` URL.
    pub fn with_config(config: &IpfsConfig) -> Result<Self> {
        let url = Url::parse(&config.gateway_url)
            .map_err(|e| ZilnamesError::ConfigError(format!("invalid IPFS gateway URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ZilnamesError::ConfigError(format!(
                "IPFS gateway must be http(s), got {}",
                url.scheme()
            )));
        }

        Ok(Self {
            base: config.gateway_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Rewrites `raw` if it is an `ipfs://` URL, otherwise returns it as-is.
    pub fn normalize(&self, raw: &str) -> String {
        match parse_ipfs_url(raw) {
            Some(IpfsPath { cid, suffix }) => {
                let url = format!("{}/{}{}", self.base, cid, suffix);
                debug!(raw, %url, "Rewrote IPFS URL to gateway");
                url
            }
            None => raw.to_string(),
        }
    }
}

impl Default for IpfsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
    const CID_V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    #[test]
    fn test_rewrites_cid_with_path() {
        let gateway = IpfsGateway::new();
        let url = gateway.normalize(&format!("ipfs://{CID_V1}/image.png"));
        assert_eq!(url, format!("https://ipfs.io/ipfs/{CID_V1}/image.png"));
        assert!(url.ends_with(&format!("/{CID_V1}/image.png")));
    }

    #[test]
    fn test_rewrites_bare_cid_v0_preserving_case() {
        let gateway = IpfsGateway::new();
        assert_eq!(
            gateway.normalize(&format!("ipfs://{CID_V0}")),
            format!("https://ipfs.io/ipfs/{CID_V0}")
        );
    }

    #[test]
    fn test_legacy_double_prefix() {
        let gateway = IpfsGateway::new();
        assert_eq!(
            gateway.normalize(&format!("ipfs://ipfs/{CID_V0}/a.gif")),
            format!("https://ipfs.io/ipfs/{CID_V0}/a.gif")
        );
    }

    #[test]
    fn test_keeps_query() {
        let gateway = IpfsGateway::new();
        assert_eq!(
            gateway.normalize(&format!("ipfs://{CID_V1}?filename=a.png")),
            format!("https://ipfs.io/ipfs/{CID_V1}?filename=a.png")
        );
    }

    #[test_case("https://example.com/avatar.png" ; "https")]
    #[test_case("http://example.com/a.png" ; "http")]
    #[test_case("data:image/png;base64,AAAA" ; "data uri")]
    #[test_case("eip155:1/erc721:0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb/0" ; "nft uri")]
    #[test_case("not a url at all" ; "garbage")]
    #[test_case("ipfs://" ; "empty cid")]
    #[test_case("ipfs://bad!cid/x" ; "non alphanumeric cid")]
    #[test_case("" ; "empty")]
    fn test_pass_through(raw: &str) {
        assert_eq!(IpfsGateway::new().normalize(raw), raw);
    }

    #[test]
    fn test_custom_gateway_trailing_slash() {
        let gateway = IpfsGateway::with_config(&IpfsConfig::new("https://gw.example/ipfs/")).unwrap();
        assert_eq!(gateway.base_url(), "https://gw.example/ipfs");
        assert_eq!(
            gateway.normalize(&format!("ipfs://{CID_V1}")),
            format!("https://gw.example/ipfs/{CID_V1}")
        );
    }

    #[test]
    fn test_gateway_must_be_http() {
        assert!(IpfsGateway::with_config(&IpfsConfig::new("ipfs://gateway")).is_err());
        assert!(IpfsGateway::with_config(&IpfsConfig::new("not a url")).is_err());
    }

    #[test]
    fn test_is_ipfs_url() {
        assert!(is_ipfs_url(&format!("ipfs://{CID_V1}")));
        assert!(!is_ipfs_url("https://ipfs.io/ipfs/x"));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in ".{0,64}") {
            let gateway = IpfsGateway::new();
            let once = gateway.normalize(&raw);
            prop_assert_eq!(gateway.normalize(&once), once);
        }

        #[test]
        fn prop_ipfs_urls_are_idempotent(cid in "[a-zA-Z0-9]{1,59}", path in "(/[a-z0-9.]{1,12}){0,3}") {
            let gateway = IpfsGateway::new();
            let once = gateway.normalize(&format!("ipfs://{cid}{path}"));
            prop_assert_eq!(gateway.normalize(&once), once.clone());
            prop_assert!(once.starts_with("https://ipfs.io/ipfs/"));
        }
    }
}
