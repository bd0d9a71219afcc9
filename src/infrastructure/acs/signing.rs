//! HMAC-SHA256 request signing for the provider REST API

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const DATE_HEADER: &str = "x-ms-date";
pub const CONTENT_HASH_HEADER: &str = "x-ms-content-sha256";

/// Headers that authenticate one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub content_hash: String,
    pub authorization: String,
}

#[derive(Clone)]
pub struct RequestSigner {
    key: Vec<u8>,
}

impl RequestSigner {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    pub fn sign(
        &self,
        method: &str,
        path_and_query: &str,
        host: &str,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> SignedHeaders {
        let date = http_date(now);
        let content_hash = STANDARD.encode(Sha256::digest(body));
        let string_to_sign = format!(
            "{}\n{}\n{};{};{}",
            method.to_ascii_uppercase(),
            path_and_query,
            date,
            host,
            content_hash
        );

        // HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC key length");
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        SignedHeaders {
            authorization: format!(
                "HMAC-SHA256 SignedHeaders={};host;{}&Signature={}",
                DATE_HEADER, CONTENT_HASH_HEADER, signature
            ),
            date,
            content_hash,
        }
    }
}

/// RFC 1123 date as used in HTTP headers
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
