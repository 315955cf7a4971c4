//! Callback URL building.
//!
//! Callback URLs may be absolute (`https://app.example/callback`) or
//! relative to the application root (`/callback`). Relative ones stay
//! relative and keep their fragment; other relative forms (`callback`,
//! `//host/callback`) are rejected.

use url::Url;
use warden_core::ClientError;

/// Base used to resolve relative URLs while editing their query string.
const RELATIVE_BASE: &str = "http://localhost";

/// Append query parameters to `base`, keeping any parameters it already has.
pub fn append_query(base: &str, pairs: &[(&str, &str)]) -> Result<String, ClientError> {
    if pairs.is_empty() {
        return Ok(base.to_owned());
    }
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(pairs);
            Ok(url.into())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if !base.starts_with('/') || base.starts_with("//") {
                return Err(ClientError::Config(format!(
                    "relative url `{base}` must start with a single `/`"
                )));
            }
            let mut url = Url::parse(RELATIVE_BASE)?.join(base)?;
            url.query_pairs_mut().extend_pairs(pairs);
            let mut relative = url.path().to_owned();
            if let Some(query) = url.query() {
                relative.push('?');
                relative.push_str(query);
            }
            if let Some(fragment) = url.fragment() {
                relative.push('#');
                relative.push_str(fragment);
            }
            Ok(relative)
        }
        Err(e) => Err(e.into()),
    }
}
