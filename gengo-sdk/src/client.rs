use crate::Error;
use crate::envelope::{Envelope, decode_empty, decode_response};
use crate::sign::Signature;
use bon::bon;
use bytes::Bytes;
use gengo_sdk_common::helper::{request_failed_error, to_query_map};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

pub(crate) const API_URL: &str = "https://api.gengo.com/v2/";
pub(crate) const SANDBOX_URL: &str = "https://api.sandbox.gengo.com/v2/";

// 签名相关的参数，不允许被可选参数覆盖
const RESERVED_PARAMS: [&str; 4] = ["api_key", "api_sig", "ts", "data"];

pub(crate) type Params = BTreeMap<String, String>;

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"******")
            .finish()
    }
}

/// 可以从toml等配置文件反序列化得到
///
/// ```toml
/// public_key = "xxx"
/// private_key = "xxx"
/// sandbox = true
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(default)]
    pub sandbox: bool,
    /// 覆盖默认的api地址
    #[serde(default)]
    pub base_url: Option<String>,
}

/// 是否需要`api_sig`和`ts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Signed,
    Unsigned,
}

pub struct Client {
    credentials: Credentials,
    base_url: Url,
    http_client: reqwest::Client,
}

#[bon]
impl Client {
    #[builder(on(String, into))]
    pub fn new(
        public_key: String,
        private_key: String,
        /// 使用sandbox环境
        #[builder(default)]
        sandbox: bool,
        /// 优先于`sandbox`
        base_url: Option<Url>,
        http_client: Option<reqwest::Client>,
    ) -> Self {
        let base_url = base_url
            .map(with_trailing_slash)
            .unwrap_or_else(|| default_base_url(sandbox));
        Self {
            credentials: Credentials::new(public_key, private_key),
            base_url,
            http_client: http_client.unwrap_or_default(),
        }
    }
}

impl Client {
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| Error::Common(format!("invalid base_url: {e}")))?;

        Ok(Client::builder()
            .public_key(config.credentials.public_key)
            .private_key(config.credentials.private_key)
            .sandbox(config.sandbox)
            .maybe_base_url(base_url)
            .build())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// 任意需要签名的GET接口，返回`response`字段的原始json
    pub async fn get_value<T: Serialize>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<serde_json::Value, Error> {
        let params = to_query_map(params)?;
        self.get(endpoint, Auth::Signed, &params).await
    }
}

fn default_base_url(sandbox: bool) -> Url {
    let url = if sandbox { SANDBOX_URL } else { API_URL };
    Url::parse(url).expect("built-in base url is valid")
}

// Url::join 只有在path以`/`结尾时才会追加，否则会替换最后一段
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

//region transport
impl Client {
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| Error::Common(format!("invalid endpoint `{endpoint}`: {e}")))
    }

    /// GET/DELETE: 参数都在query里
    pub(crate) fn query_url(
        &self,
        endpoint: &str,
        auth: Auth,
        params: &Params,
    ) -> Result<Url, Error> {
        let mut url = self.endpoint_url(endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.credentials.public_key);
            if auth == Auth::Signed {
                let sig = Signature::new(&self.credentials.private_key);
                pairs.append_pair("api_sig", &sig.api_sig);
                pairs.append_pair("ts", &sig.ts);
            }
            for (k, v) in params {
                if RESERVED_PARAMS.contains(&k.as_str()) {
                    continue;
                }
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// POST/PUT: form body，payload序列化为json放在`data`字段
    pub(crate) fn form_body<T: Serialize + ?Sized>(
        &self,
        data: &T,
    ) -> Result<Vec<(&'static str, String)>, Error> {
        let data = serde_json::to_string(data)
            .map_err(|e| Error::Common(format!("serialize request data failed: {e}")))?;
        let sig = Signature::new(&self.credentials.private_key);
        Ok(vec![
            ("api_key", self.credentials.public_key.clone()),
            ("api_sig", sig.api_sig),
            ("ts", sig.ts),
            ("data", data),
        ])
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<(StatusCode, Bytes), Error> {
        let resp = req
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok((status, body))
    }

    async fn send_query(
        &self,
        method: Method,
        endpoint: &str,
        auth: Auth,
        params: &Params,
    ) -> Result<(StatusCode, Bytes), Error> {
        let url = self.query_url(endpoint, auth, params)?;
        debug!(%method, endpoint, "gengo request");
        self.execute(self.http_client.request(method, url)).await
    }

    async fn send_form<T: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        data: &T,
    ) -> Result<(StatusCode, Bytes), Error> {
        let url = self.endpoint_url(endpoint)?;
        let form = self.form_body(data)?;
        debug!(%method, endpoint, "gengo request");
        self.execute(self.http_client.request(method, url).form(&form))
            .await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        auth: Auth,
        params: &Params,
    ) -> Result<T, Error> {
        let (status, body) = self.send_query(Method::GET, endpoint, auth, params).await?;
        decode_response(status, &body).inspect_err(|e| log_failure(endpoint, e))
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        let (status, body) = self
            .send_query(Method::DELETE, endpoint, Auth::Signed, &Params::new())
            .await?;
        decode_empty(status, &body).inspect_err(|e| log_failure(endpoint, e))
    }

    pub(crate) async fn post<T: DeserializeOwned, D: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &D,
    ) -> Result<T, Error> {
        let (status, body) = self.send_form(Method::POST, endpoint, data).await?;
        decode_response(status, &body).inspect_err(|e| log_failure(endpoint, e))
    }

    pub(crate) async fn post_empty<D: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &D,
    ) -> Result<(), Error> {
        let (status, body) = self.send_form(Method::POST, endpoint, data).await?;
        decode_empty(status, &body).inspect_err(|e| log_failure(endpoint, e))
    }

    pub(crate) async fn put_empty<D: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &D,
    ) -> Result<(), Error> {
        let (status, body) = self.send_form(Method::PUT, endpoint, data).await?;
        decode_empty(status, &body).inspect_err(|e| log_failure(endpoint, e))
    }

    /// 返回二进制内容(比如预览图片)，接口返回错误的envelope时仍然转为`Error::Api`
    pub(crate) async fn get_bytes(&self, endpoint: &str) -> Result<Bytes, Error> {
        let url = self.query_url(endpoint, Auth::Signed, &Params::new())?;
        debug!(method = %Method::GET, endpoint, "gengo request");
        let resp = self.http_client.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        check_binary_body(status, &body).inspect_err(|e| log_failure(endpoint, e))?;
        Ok(body)
    }
}

// 2xx时body只有是envelope才检查opstat；非2xx时body不是错误的envelope就是`RequestAPIFailed`
fn check_binary_body(status: StatusCode, body: &[u8]) -> Result<(), Error> {
    if status.is_success() {
        return match serde_json::from_slice::<Envelope>(body) {
            Ok(envelope) => envelope.into_response().map(|_| ()),
            Err(_) => Ok(()),
        };
    }

    decode_empty(status, body)?;
    Err(request_failed_error(status, body).into())
}

fn log_failure(endpoint: &str, e: &Error) {
    match e {
        Error::Api { code, msg } => {
            warn!(endpoint, code, msg = msg.as_str(), "gengo api returned an error")
        }
        _ => warn!(endpoint, error = %e, "gengo request failed"),
    }
}
//endregion
