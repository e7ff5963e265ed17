//! Webhook HMAC 签名验证

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// 验证支付方 webhook 的 HMAC-SHA256 签名
///
/// 签名负载为 `"{timestamp}.{raw_body}"`，签名以 hex 编码放在
/// `x-signature` 头 (可带 `sha256=` 前缀)，Unix 秒时间戳放在
/// `x-timestamp` 头。时间戳偏差超过容差窗口的请求按重放拒绝。
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_header: &str,
    timestamp_header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> Result<(), &'static str> {
    if signature_header.is_empty() || timestamp_header.is_empty() {
        return Err("Missing signature headers");
    }

    // 重放窗口先于签名比较，过期请求不做 HMAC 运算
    let ts: i64 = timestamp_header.parse().map_err(|_| "Invalid timestamp")?;
    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > tolerance_secs {
        return Err("Webhook timestamp outside tolerance window");
    }

    let signature = signature_header
        .strip_prefix("sha256=")
        .unwrap_or(signature_header);

    let signed_payload = format!("{timestamp_header}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(signed_payload.as_bytes());

    // Decode hex signature and use constant-time comparison via hmac::verify_slice
    let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")?;

    Ok(())
}
