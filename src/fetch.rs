use std::sync::OnceLock;
use std::time::Duration;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::error::NetworkError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36";

/// How far into the body to look for a `<meta charset>` declaration.
const META_SCAN_BYTES: usize = 16 * 1024;

/// Download the page at `url` and return its body. Any non-2xx status is an error.
pub fn fetch_html(url: &str, timeout: Duration) -> Result<String, NetworkError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .no_proxy()
        .build()
        .map_err(NetworkError::Client)?;

    info!("Fetching {}", url);
    let response = client.get(url).send().map_err(|source| NetworkError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            url: url.to_string(),
            status,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().map_err(|source| NetworkError::Body {
        url: url.to_string(),
        source,
    })?;

    let body = decode_body(&bytes, content_type.as_deref());
    debug!(status = status.as_u16(), bytes = bytes.len(), "Fetched page");
    Ok(body)
}

/// Decode with the header charset, else `<meta charset>`, else a guess from the bytes.
/// A byte-order mark wins over all three.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(bytes))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!("Body had bytes invalid in {}", used.name());
    } else {
        debug!("Decoded body as {}", used.name());
    }
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)"#).unwrap()
    });

    let head = &bytes[..bytes.len().min(META_SCAN_BYTES)];
    let label = re.captures(head)?.get(1)?.as_bytes();
    let encoding = Encoding::for_label(label)?;
    // A UTF-16 label in an ASCII-compatible document is always wrong.
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}
