/// Page size used when the caller gives none or an unusable one.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page a caller may request.
pub const MAX_LIMIT: u64 = 100;

/// Resolve raw `limit`/`offset` query values.
///
/// Missing, unparsable or negative values fall back to the defaults
/// (20 and 0); `limit` is capped at [`MAX_LIMIT`].
pub fn validate_pagination(limit: Option<&str>, offset: Option<&str>) -> (u64, u64) {
    let limit = parse_non_negative(limit)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);
    let offset = parse_non_negative(offset).unwrap_or(0);
    (limit, offset)
}

fn parse_non_negative(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .map(|v| v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(validate_pagination(None, None), (20, 0));
    }

    #[test]
    fn garbage_and_negative_fall_back() {
        assert_eq!(validate_pagination(Some("abc"), Some("-3")), (20, 0));
        assert_eq!(validate_pagination(Some("-1"), Some("x")), (20, 0));
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(validate_pagination(Some("1000"), Some("5")), (100, 5));
        assert_eq!(validate_pagination(Some("0"), None), (0, 0));
    }
}
