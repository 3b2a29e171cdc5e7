use urlencoding::encode;

/// Encode a value used as a single path segment (IPv6 addresses contain `:`).
pub fn encode_path_segment(value: &str) -> String {
    encode(value.trim()).into_owned()
}
