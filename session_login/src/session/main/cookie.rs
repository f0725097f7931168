use http::header::{COOKIE, HeaderMap};

use crate::session::errors::SessionError;

/// Find the value of cookie `cookie_name` in the request headers
///
/// Every `Cookie` header is searched, since HTTP/2 clients may split cookies
/// across several headers.
pub fn get_session_id_from_headers<'a>(
    headers: &'a HeaderMap,
    cookie_name: &str,
) -> Result<Option<&'a str>, SessionError> {
    let mut cookie_headers = headers.get_all(COOKIE).iter().peekable();
    if cookie_headers.peek().is_none() {
        tracing::debug!("No cookie header found");
        return Ok(None);
    }

    for cookie_header in cookie_headers {
        let cookie_str = cookie_header.to_str().map_err(|e| {
            tracing::error!("Invalid cookie header: {}", e);
            SessionError::HeaderError("Invalid cookie header".to_string())
        })?;

        let found = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
            let mut parts = s.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) if k == cookie_name && !v.is_empty() => Some(v),
                _ => None,
            }
        });

        if found.is_some() {
            return Ok(found);
        }
    }

    tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    Ok(None)
}
