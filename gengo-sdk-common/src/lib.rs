//! Gengo SDK 的公共工具：签名、参数序列化、错误处理

mod error;
pub mod helper;

pub use error::Error;
