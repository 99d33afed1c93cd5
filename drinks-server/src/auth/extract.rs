use super::AuthError;

/// Pulls the bearer token out of a raw `Authorization` header value.
///
/// The header must consist of exactly two whitespace-separated parts,
/// the first being `Bearer` in any casing. The token itself is returned
/// verbatim; no decoding happens at this stage.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let mut parts = header.split_whitespace();

    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader(
            "Authorization header must start with Bearer".to_string(),
        ));
    }

    let token = parts
        .next()
        .ok_or_else(|| AuthError::MalformedHeader("Token not found".to_string()))?;

    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader(
            "Authorization header must be Bearer token".to_string(),
        ));
    }

    Ok(token)
}
