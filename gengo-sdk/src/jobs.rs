//! 批量job相关的接口

use crate::Error;
use crate::client::{Auth, Client, Params};
use crate::job::{Job, JobPayload, JobStatus};
use bon::Builder;
use gengo_sdk_common::helper::to_query_map;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{BoolFromInt, DisplayFromStr, PickFirst, serde_as};

//region types
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct JobSummary {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub job_id: u64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub ctime: Option<i64>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct JobsGroup {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub group_id: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub ctime: Option<i64>,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

/// 批量提交的结果，`jobs`的结构随提交方式变化，保留原始json
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct PostJobsResponse {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub jobs: Value,
}

/// 多个job，用于批量提交和报价
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Debug, Clone)]
pub struct JobArray {
    pub jobs: Vec<JobPayload>,
    /// 作为一个group提交，译者会一起翻译
    #[serde_as(as = "Option<BoolFromInt>")]
    pub as_group: Option<bool>,
}

impl JobArray {
    pub(crate) fn check_not_empty(&self) -> Result<(), Error> {
        if self.jobs.is_empty() {
            return Err(Error::Common("jobs can not be empty".to_owned()));
        }
        Ok(())
    }
}

impl From<Vec<JobPayload>> for JobArray {
    fn from(jobs: Vec<JobPayload>) -> Self {
        Self {
            jobs,
            as_group: None,
        }
    }
}

#[derive(Deserialize)]
struct JobsResp {
    #[serde(default)]
    jobs: Vec<Job>,
}
//endregion

//region list jobs
/// 最近的job列表，默认返回最近的10个
#[derive(Builder, Serialize)]
pub struct ListJobs<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    status: Option<JobStatus>,
    /// Unix时间戳，只返回在此之后创建的job
    timestamp_after: Option<i64>,
    /// 最多200
    count: Option<u32>,
}

impl ListJobs<'_> {
    pub async fn send(&self) -> Result<Vec<JobSummary>, Error> {
        let params = to_query_map(self)?;
        self.client
            .get("translate/jobs", Auth::Signed, &params)
            .await
    }
}
//endregion

impl Client {
    pub fn jobs(&self) -> ListJobsBuilder<'_> {
        ListJobs::builder(self)
    }

    /// 一次查询多个job
    pub async fn jobs_by_ids(&self, job_ids: &[u64]) -> Result<Vec<Job>, Error> {
        if job_ids.is_empty() {
            return Err(Error::Common("job_ids can not be empty".to_owned()));
        }

        let ids = job_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let res: JobsResp = self
            .get(&format!("translate/jobs/{ids}"), Auth::Signed, &Params::new())
            .await?;
        Ok(res.jobs)
    }

    /// 以group方式提交的job
    pub async fn jobs_group(&self, group_id: u64) -> Result<JobsGroup, Error> {
        self.get(
            &format!("translate/jobs/group/{group_id}"),
            Auth::Signed,
            &Params::new(),
        )
        .await
    }

    /// 批量提交job
    pub async fn post_jobs(&self, jobs: &JobArray) -> Result<PostJobsResponse, Error> {
        jobs.check_not_empty()?;
        self.post("translate/jobs", jobs).await
    }
}
