use uuid::Uuid;

/// Whether `s` is a UUID in its canonical hyphenated form.
///
/// Identifiers the API hands out are always hyphenated, so the simple,
/// braced and URN forms `Uuid::parse_str` also accepts are treated as
/// labels instead.
pub fn is_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::parse_str(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated() {
        assert!(is_uuid("11111111-1111-1111-1111-111111111111"));
        assert!(is_uuid("9C0D1CFA-2B9A-4E8C-A6E6-0F4E0B6D9A6B"));
    }

    #[test]
    fn rejects_other_forms() {
        assert!(!is_uuid("ubuntu_focal"));
        assert!(!is_uuid("11111111111111111111111111111111"));
        assert!(!is_uuid("{11111111-1111-1111-1111-111111111111}"));
        assert!(!is_uuid(""));
    }
}
