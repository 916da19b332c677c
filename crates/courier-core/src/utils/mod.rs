//! Utility functions

use percent_encoding::percent_decode_str;

/// Decode an object key as it appears in an S3 event notification.
///
/// Keys are form-encoded: `+` stands for a space and everything else is
/// percent-encoded. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_percent_sequences() {
        assert_eq!(decode_object_key("a%20b.jpg"), "a b.jpg");
        assert_eq!(decode_object_key("img%2F1.png"), "img/1.png");
        assert_eq!(decode_object_key("plain/key.png"), "plain/key.png");
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode_object_key("my+holiday+photo.jpg"), "my holiday photo.jpg");
        assert_eq!(decode_object_key("a%2Bb.jpg"), "a+b.jpg");
    }

    #[test]
    fn test_decode_unicode() {
        assert_eq!(decode_object_key("caf%C3%A9.png"), "café.png");
        assert_eq!(decode_object_key("bad%FF.png"), "bad\u{FFFD}.png");
    }
}
