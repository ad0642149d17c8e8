//! OAuth 1.0a 请求签名（HMAC-SHA1）
//!
//! 存在 token 时，Flickr 请求带上 `oauth_*` 参数，才能看到私有相册。

use crate::error::FlickrError;
use crate::models::OAuthToken;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved 字符之外全部编码
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// 计算签名
///
/// # 参数
/// - `http_method`: 大写的 HTTP 方法
/// - `base_url`: 不含查询串的请求地址
/// - `params`: 全部查询参数（不含 `oauth_signature`）
/// - `consumer_secret` / `token_secret`: 签名密钥的两部分
pub fn signature(
    http_method: &str,
    base_url: &str,
    params: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, FlickrError> {
    let mut pairs: Vec<(String, String)> = params.iter().map(|(k, v)| (encode(k), encode(v))).collect();
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    let base_string = format!("{}&{}&{}", http_method, encode(base_url), encode(&normalized));
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| FlickrError::SigningFailed(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// 给 GET 请求的查询参数追加 `oauth_*` 字段和签名
pub fn sign_get(
    params: &mut Vec<(String, String)>,
    base_url: &str,
    consumer_key: &str,
    consumer_secret: &str,
    token: &OAuthToken,
) -> Result<(), FlickrError> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    params.extend([
        ("oauth_consumer_key".to_string(), consumer_key.to_string()),
        ("oauth_token".to_string(), token.token.clone()),
        ("oauth_nonce".to_string(), nonce),
        ("oauth_timestamp".to_string(), chrono::Utc::now().timestamp().to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]);

    let sig = signature("GET", base_url, params, consumer_secret, &token.secret)?;
    params.push(("oauth_signature".to_string(), sig));
    Ok(())
}
