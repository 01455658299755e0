use crate::Error;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::Value;
use sha1::Sha1;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// 当前的Unix时间戳，单位为秒
pub fn unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// HMAC-SHA1，输出小写hex字符串
pub fn sign_hmac_sha1_hex(secret: &str, str_to_sign: &str) -> String {
    type HmacSha1 = Hmac<Sha1>;
    // HMAC对key的长度没有要求，这里不会失败
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(str_to_sign.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 非2xx并且body无法识别时的错误，保留原始body
pub fn request_failed_error(status: reqwest::StatusCode, body: &[u8]) -> Error {
    Error::RequestAPIFailed {
        status: status.to_string(),
        message: String::from_utf8_lossy(body).into_owned(),
    }
}

/// 把请求参数序列化为`BTreeMap<String, String>`
///
/// 传入的query需要是一个to_value后为`Value::Object`的类型，规则：
/// - `None`(null) 的字段直接跳过
/// - bool 转为 `1`/`0`
/// - 数组用`,`拼接，例如 `[1, 2, 3]` -> `"1,2,3"`
/// - 不支持嵌套的object
pub fn to_query_map(query: impl Serialize) -> Result<BTreeMap<String, String>, Error> {
    let v = serde_json::to_value(query)
        .map_err(|e| Error::Common(format!("serialize query params failed: {e}")))?;
    let Value::Object(map) = v else {
        return Err(Error::Common(
            "query params must be serialized as an object".to_owned(),
        ));
    };

    let mut res = BTreeMap::new();
    for (k, val) in &map {
        if let Some(s) = flatten_value(k, val)? {
            res.insert(k.to_owned(), s);
        }
    }
    Ok(res)
}

fn flatten_value(key: &str, v: &Value) -> Result<Option<String>, Error> {
    let s = match v {
        Value::Null => return Ok(None),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => {
            let mut items = Vec::with_capacity(arr.len());
            for item in arr {
                if let Some(s) = flatten_value(key, item)? {
                    items.push(s);
                }
            }
            items.join(",")
        }
        Value::Object(_) => {
            return Err(Error::Common(format!(
                "query param `{key}` can not be a nested object"
            )));
        }
    };
    Ok(Some(s))
}
