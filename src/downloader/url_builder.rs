use crate::constants::{FILE_QUERY_PARAM, TOKEN_QUERY_PARAM};
use crate::errors::AppResult;
use url::Url;

/// Builds the download URL for a database code.
///
/// The token and code are appended as `token` and `file` query parameters,
/// after any query the base URL already carries.
///
/// # Errors
///
/// Returns `UrlError` if `base_url` cannot be parsed.
///
/// # Example
///
/// ```
/// use ip2location_downloader::downloader::build_download_url;
///
/// let url = build_download_url("https://www.ip2location.com/download", "abc", "DB1").unwrap();
/// assert_eq!(url.as_str(), "https://www.ip2location.com/download?token=abc&file=DB1");
/// ```
pub fn build_download_url(base_url: &str, token: &str, db_code: &str) -> AppResult<Url> {
    let mut url = Url::parse(base_url)?;
    url.query_pairs_mut()
        .append_pair(TOKEN_QUERY_PARAM, token)
        .append_pair(FILE_QUERY_PARAM, db_code);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn embeds_token_and_code() {
        let url = build_download_url("https://example.com/download", "T0K3N", "DB11LITEBIN")
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("token".to_string(), "T0K3N".to_string()),
                ("file".to_string(), "DB11LITEBIN".to_string()),
            ]
        );
        assert_eq!(url.path(), "/download");
    }

    #[test]
    fn keeps_existing_query() {
        let url = build_download_url("http://localhost:1234/dl?mirror=eu", "t", "PX2BIN").unwrap();
        assert_eq!(url.query(), Some("mirror=eu&token=t&file=PX2BIN"));
    }

    #[test]
    fn rejects_unparsable_base() {
        let err = build_download_url("not a url", "t", "DB1").unwrap_err();
        assert!(matches!(err, AppError::UrlError(_)));
    }
}
