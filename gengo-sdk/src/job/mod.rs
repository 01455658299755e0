//! 单个job相关的接口：查询、创建、删除、修改状态、评论、修改记录、反馈和预览

mod comment;
mod revision;
mod types_rs;

pub use types_rs::*;

use crate::Error;
use crate::client::{Auth, Client};
use bon::Builder;
use bytes::Bytes;
use gengo_sdk_common::helper::to_query_map;
use serde::Serialize;
use std::path::Path;

// region    --- get job
#[derive(Builder, Serialize)]
pub struct GetJob<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    job_id: u64,
    /// 是否返回机翻的结果
    pre_mt: Option<bool>,
}

impl GetJob<'_> {
    pub async fn send(&self) -> Result<Job, Error> {
        let params = to_query_map(self)?;
        let res: JobResp = self
            .client
            .get(&job_endpoint(self.job_id), Auth::Signed, &params)
            .await?;
        Ok(res.job)
    }
}
// endregion --- get job

pub(crate) fn job_endpoint(job_id: u64) -> String {
    format!("translate/job/{job_id}")
}

impl Client {
    /// 查询单个job
    pub fn job(&self, job_id: u64) -> GetJobBuilder<'_> {
        GetJob::builder(self, job_id)
    }

    /// 提交一个新的翻译job
    pub async fn post_job(&self, payload: &JobPayload) -> Result<Job, Error> {
        let res: JobResp = self
            .post("translate/job", &PostJobData { job: payload })
            .await?;
        Ok(res.job)
    }

    /// 取消job，只有还没有被译者接手的job可以取消
    pub async fn delete_job(&self, job_id: u64) -> Result<(), Error> {
        self.delete(&job_endpoint(job_id)).await
    }

    /// 修改job状态：revise / approve / reject
    pub async fn update_job(
        &self,
        job_id: u64,
        action: impl Into<JobAction>,
    ) -> Result<(), Error> {
        let action = action.into();
        if let JobAction::Approve(ApproveAction {
            rating: Some(rating),
            ..
        }) = &action
        {
            if !(1..=5).contains(rating) {
                return Err(Error::Common(format!(
                    "rating must be between 1 and 5, got {rating}"
                )));
            }
        }

        self.put_empty(&job_endpoint(job_id), &action).await
    }

    pub async fn revise_job(&self, job_id: u64, comment: &str) -> Result<(), Error> {
        self.update_job(job_id, ReviseAction::new(comment)).await
    }

    pub async fn approve_job(&self, job_id: u64, action: ApproveAction) -> Result<(), Error> {
        self.update_job(job_id, action).await
    }

    pub async fn reject_job(&self, job_id: u64, action: RejectAction) -> Result<(), Error> {
        self.update_job(job_id, action).await
    }

    /// 译文预览图片(jpeg)
    pub async fn job_preview(&self, job_id: u64) -> Result<Bytes, Error> {
        self.get_bytes(&format!("{}/preview", job_endpoint(job_id)))
            .await
    }

    /// 下载预览图片并写入文件
    pub async fn save_job_preview(
        &self,
        job_id: u64,
        path: impl AsRef<Path>,
    ) -> Result<(), Error> {
        let bytes = self.job_preview(job_id).await?;
        tokio::fs::write(path, &bytes).await?;
        Ok(())
    }
}
