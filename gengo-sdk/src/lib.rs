#![doc = include_str!("../README.md")]

mod client;
mod envelope;
mod error;
mod sign;

mod account;
mod job;
mod jobs;
mod service;

pub use client::{Client, Config, Credentials};
pub use envelope::{ApiError, Envelope, Opstat};
pub use error::Error;
pub use sign::Signature;

pub use account::*;
pub use job::*;
pub use jobs::*;
pub use service::*;
