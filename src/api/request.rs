//! URL construction for API requests

use crate::error::Result;
use url::Url;

/// Join `path` onto the API root and append every non-empty parameter
/// as a percent-encoded query pair.
pub fn build_url(base: &Url, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let root = base.as_str().trim_end_matches('/');
    let mut url = Url::parse(&format!("{}{}", root, path))?;

    let present: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    if !present.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in present {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}
