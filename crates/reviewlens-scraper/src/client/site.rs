//! URL construction for the retail site.

use reqwest::Url;

use crate::error::ScraperError;

/// Builds absolute URLs for one site origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ScraperError> {
        let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", base.scheme()),
            });
        }
        Ok(Self { base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The search endpoint for `query`, form-encoded (`iphone 15` → `q=iphone+15`).
    #[must_use]
    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.base.join("/search").unwrap_or_else(|_| self.base.clone());
        url.query_pairs_mut().clear().append_pair("q", query);
        url
    }

    /// Resolves an `href` scraped from a page into an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the href cannot be joined onto
    /// the site origin.
    pub fn resolve(&self, href: &str) -> Result<Url, ScraperError> {
        self.base
            .join(href.trim())
            .map_err(|e| ScraperError::InvalidUrl {
                url: href.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_form_encodes_query() {
        let site = SiteUrls::new("https://www.flipkart.com").unwrap();
        assert_eq!(
            site.search_url("iphone 15").as_str(),
            "https://www.flipkart.com/search?q=iphone+15"
        );
    }

    #[test]
    fn search_url_escapes_reserved_characters() {
        let site = SiteUrls::new("https://www.flipkart.com").unwrap();
        assert_eq!(
            site.search_url("a&b=c").as_str(),
            "https://www.flipkart.com/search?q=a%26b%3Dc"
        );
    }

    #[test]
    fn resolve_relative_href() {
        let site = SiteUrls::new("https://www.flipkart.com").unwrap();
        let url = site
            .resolve("/apple-iphone-15/product-reviews/itm1?pid=X&marketplace=FLIPKART")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.flipkart.com/apple-iphone-15/product-reviews/itm1?pid=X&marketplace=FLIPKART"
        );
    }

    #[test]
    fn resolve_keeps_absolute_href() {
        let site = SiteUrls::new("https://www.flipkart.com").unwrap();
        let url = site.resolve("https://example.com/p/1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/p/1");
    }

    #[test]
    fn base_with_port_is_kept() {
        let site = SiteUrls::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            site.search_url("x").as_str(),
            "http://127.0.0.1:8080/search?q=x"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        let err = SiteUrls::new("ftp://example.com").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidUrl { .. }),
            "expected InvalidUrl, got: {err:?}"
        );
    }

    #[test]
    fn rejects_relative_base() {
        assert!(SiteUrls::new("www.flipkart.com").is_err());
    }
}
