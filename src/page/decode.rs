// src/page/decode.rs
// =============================================================================
// Converts page bodies to UTF-8.
//
// Where the encoding comes from, first match wins:
// 1. A byte order mark at the start of the body
// 2. The charset parameter of the Content-Type header
// 3. A <meta charset="..."> declaration in the document
// 4. UTF-8
//
// A header naming a charset we don't know is an error. Malformed byte
// sequences are replaced with U+FFFD rather than failing the page.
// =============================================================================

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use scraper::{Html, Selector};

use crate::error::DecodeError;

/// True if the content type describes text (`text/html`, `text/plain`, ...).
pub fn is_textual(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text")
}

/// Decodes `body` to a UTF-8 string using its declared encoding.
pub fn decode(body: &[u8], content_type: &str) -> Result<String, DecodeError> {
    let encoding = match Encoding::for_bom(body) {
        Some((encoding, _)) => encoding,
        None => match header_charset(content_type) {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or(DecodeError::UnsupportedEncoding(label))?,
            None => meta_charset(body).unwrap_or(UTF_8),
        },
    };

    // decode() strips the BOM itself
    let (text, _, _) = encoding.decode(body);
    Ok(text.into_owned())
}

fn header_charset(content_type: &str) -> Option<String> {
    let mime: Mime = content_type.trim().parse().ok()?;
    mime.get_param(mime::CHARSET)
        .map(|charset| charset.as_str().to_string())
}

// Only the head of the document is looked at, like browsers do
const META_PRESCAN_BYTES: usize = 1024;

fn meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_PRESCAN_BYTES)];
    let document = Html::parse_document(&String::from_utf8_lossy(head));

    let charset = Selector::parse("meta[charset]").ok()?;
    if let Some(encoding) = document
        .select(&charset)
        .filter_map(|meta| meta.value().attr("charset"))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
    {
        return Some(encoding);
    }

    // <meta http-equiv="Content-Type" content="text/html; charset=gbk">
    let http_equiv = Selector::parse("meta[content]").ok()?;
    document
        .select(&http_equiv)
        .filter_map(|meta| meta.value().attr("content"))
        .filter_map(header_charset)
        .find_map(|label| Encoding::for_label(label.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html; charset=utf-8"));
        assert!(is_textual("TEXT/PLAIN"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual("application/octet-stream"));
        assert!(!is_textual(""));
    }

    #[test]
    fn test_plain_utf8() {
        let text = decode("héllo".as_bytes(), "text/html").unwrap();
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_header_charset() {
        // "中文" in GBK
        let body = [0xd6, 0xd0, 0xce, 0xc4];
        let text = decode(&body, "text/html; charset=gbk").unwrap();
        assert_eq!(text, "中文");
    }

    #[test]
    fn test_latin1_header() {
        let body = [b'c', b'a', b'f', 0xe9];
        let text = decode(&body, "text/plain; charset=ISO-8859-1").unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_meta_charset() {
        let mut body = b"<html><head><meta charset=\"gbk\"></head><body>".to_vec();
        body.extend_from_slice(&[0xd6, 0xd0, 0xce, 0xc4]);
        body.extend_from_slice(b"</body></html>");

        let text = decode(&body, "text/html").unwrap();
        assert!(text.contains("中文"));
    }

    #[test]
    fn test_meta_http_equiv() {
        let mut body =
            b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=gbk\"></head><body>"
                .to_vec();
        body.extend_from_slice(&[0xd6, 0xd0, 0xce, 0xc4]);

        let text = decode(&body, "text/html").unwrap();
        assert!(text.contains("中文"));
    }

    #[test]
    fn test_bom_beats_header() {
        let mut body = vec![0xef, 0xbb, 0xbf];
        body.extend_from_slice("中文".as_bytes());

        let text = decode(&body, "text/html; charset=gbk").unwrap();
        assert_eq!(text, "中文");
    }

    #[test]
    fn test_unknown_charset_is_an_error() {
        let err = decode(b"hello", "text/html; charset=klingon").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedEncoding(label) if label == "klingon"));
    }

    #[test]
    fn test_malformed_bytes_are_replaced() {
        let text = decode(&[b'a', 0xff, b'b'], "text/plain; charset=utf-8").unwrap();
        assert_eq!(text, "a\u{fffd}b");
    }
}
