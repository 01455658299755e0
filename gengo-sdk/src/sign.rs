use gengo_sdk_common::helper::{sign_hmac_sha1_hex, unix_timestamp};

/// 请求签名：`api_sig = hex(HMAC-SHA1(private_key, ts))`
///
/// `ts`为十进制的Unix时间戳(秒)，需要和`api_sig`一起发送
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub api_sig: String,
    pub ts: String,
}

impl Signature {
    /// 使用当前时间签名
    pub fn new(private_key: &str) -> Self {
        Self::at(private_key, unix_timestamp())
    }

    pub fn at(private_key: &str, ts: i64) -> Self {
        let ts = ts.to_string();
        Self {
            api_sig: sign_hmac_sha1_hex(private_key, &ts),
            ts,
        }
    }
}
