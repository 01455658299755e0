#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// 接口返回了`opstat: "error"`
    #[error("gengo api error: code: {code}, message: {msg}")]
    Api { code: i64, msg: String },
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    #[error("parse response json error: {source}, response text: {body}")]
    Json {
        source: serde_json::Error,
        body: String,
    },
    #[error("error: {0}")]
    Common(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Gengo返回的错误码，只有`Error::Api`才有
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<gengo_sdk_common::Error> for Error {
    fn from(e: gengo_sdk_common::Error) -> Self {
        match e {
            gengo_sdk_common::Error::Common(msg) => Error::Common(msg),
            gengo_sdk_common::Error::RequestAPIFailed { status, message } => {
                Error::RequestAPIFailed { status, message }
            }
            gengo_sdk_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
