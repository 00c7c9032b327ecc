//! URL helpers for building endpoint templates.

use url::Url;

use crate::SwaggerError;

// Relative bases are resolved against this origin, which is then dropped again.
const PLACEHOLDER_ORIGIN: &str = "http://placeholder.invalid";

/// Trailing slash appended to generated endpoints, or nothing when the REST
/// framework accepts URLs without one.
pub fn trailing_slash_or_none(allow_missing_slash: bool) -> &'static str {
    if allow_missing_slash {
        ""
    } else {
        "/"
    }
}

/// Joins `path` onto `base`, treating `base` as a directory even when it has
/// no trailing slash. An empty base means the root.
///
/// Relative bases stay relative: `urljoin_forced("/api", "v1")` is `/api/v1`.
pub fn urljoin_forced(base: &str, path: &str) -> Result<String, SwaggerError> {
    let base = if base.is_empty() { "/" } else { base };
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };

    let invalid = |e: url::ParseError| {
        SwaggerError::server_error(&format!("cannot join '{}' onto '{}': {}", path, base, e))
    };

    match Url::parse(&base) {
        Ok(absolute) => Ok(absolute.join(path).map_err(invalid)?.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let origin = Url::parse(PLACEHOLDER_ORIGIN).map_err(invalid)?;
            let joined = origin
                .join(&base)
                .and_then(|b| b.join(path))
                .map_err(invalid)?;

            let mut out = joined.path().to_string();
            if let Some(query) = joined.query() {
                out.push('?');
                out.push_str(query);
            }
            Ok(out)
        }
        Err(e) => Err(invalid(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_follows_setting() {
        assert_eq!(trailing_slash_or_none(false), "/");
        assert_eq!(trailing_slash_or_none(true), "");
    }

    #[test]
    fn forces_directory_base() {
        assert_eq!(urljoin_forced("/api", "v1").unwrap(), "/api/v1");
        assert_eq!(urljoin_forced("/api/", "v1/").unwrap(), "/api/v1/");
        assert_eq!(urljoin_forced("", "entry").unwrap(), "/entry");
    }

    #[test]
    fn absolute_path_replaces_base() {
        assert_eq!(urljoin_forced("/api/v1", "/other/").unwrap(), "/other/");
    }

    #[test]
    fn keeps_absolute_bases_absolute() {
        assert_eq!(
            urljoin_forced("https://example.com/api", "v1/").unwrap(),
            "https://example.com/api/v1/"
        );
    }
}
