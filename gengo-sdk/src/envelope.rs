//! 所有接口统一的响应结构
//!
//! ```json
//! {"opstat": "ok", "response": {...}}
//! {"opstat": "error", "err": {"code": 1100, "msg": "..."}}
//! ```

use crate::Error;
use gengo_sdk_common::helper::request_failed_error;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Opstat {
    Ok,
    Error,
}

/// `opstat`为`error`时的`err`字段
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    // code有时候是字符串
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Envelope {
    pub opstat: Opstat,
    pub response: Option<Value>,
    pub err: Option<ApiError>,
}

impl Envelope {
    /// body不是envelope的时候：http状态码非2xx返回`RequestAPIFailed`，否则返回`Json`错误
    pub fn parse(status: StatusCode, body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice::<Envelope>(body).map_err(|source| {
            if status.is_success() {
                Error::Json {
                    source,
                    body: String::from_utf8_lossy(body).into_owned(),
                }
            } else {
                request_failed_error(status, body).into()
            }
        })
    }

    pub fn into_response(self) -> Result<Option<Value>, Error> {
        match self.opstat {
            Opstat::Ok => Ok(self.response),
            Opstat::Error => {
                let err = self.err.unwrap_or_default();
                Err(Error::Api {
                    code: err.code,
                    msg: err.msg,
                })
            }
        }
    }
}

pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, Error> {
    let value = Envelope::parse(status, body)?
        .into_response()?
        .ok_or_else(|| Error::Common("`response` is missing in the ok envelope".to_owned()))?;

    serde_json::from_value(value).map_err(|source| Error::Json {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// 只检查opstat，忽略`response`
pub(crate) fn decode_empty(status: StatusCode, body: &[u8]) -> Result<(), Error> {
    Envelope::parse(status, body)?.into_response().map(|_| ())
}
