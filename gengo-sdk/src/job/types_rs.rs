use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::{BoolFromInt, DisplayFromStr, PickFirst, serde_as};

//region enums
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Machine,
    Standard,
    Pro,
    Ultra,
    #[serde(other, skip_serializing)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Available,
    Pending,
    Reviewable,
    Revising,
    Approved,
    Rejected,
    Canceled,
    Held,
    #[serde(other, skip_serializing)]
    Unknown,
}
//endregion

//region job
/// 接口返回的job，接口对数字字段的类型不固定，有时是字符串
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Job {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub job_id: u64,
    pub lc_src: String,
    pub lc_tgt: String,
    pub tier: Tier,
    pub status: JobStatus,
    pub body_src: Option<String>,
    pub body_tgt: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub unit_count: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub credits: Option<f64>,
    pub currency: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub eta: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub ctime: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub auto_approve: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub mt: Option<i64>,
    pub slug: Option<String>,
    pub callback_url: Option<String>,
    pub captcha_url: Option<String>,
    pub preview_url: Option<String>,
    pub custom_data: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct JobResp {
    pub(crate) job: Job,
}

/// 新建job时提交的内容
///
/// ```
/// use gengo_sdk::{JobPayload, Tier};
///
/// let payload = JobPayload::builder()
///     .body_src("Hello")
///     .lc_src("en")
///     .lc_tgt("ja")
///     .tier(Tier::Standard)
///     .auto_approve(true)
///     .build();
/// ```
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Debug, Clone)]
#[builder(on(String, into))]
pub struct JobPayload {
    pub body_src: String,
    pub lc_src: String,
    pub lc_tgt: String,
    pub tier: Tier,
    /// 不检查是否和之前的job重复
    #[serde_as(as = "Option<BoolFromInt>")]
    pub force: Option<bool>,
    /// 给译者的说明
    pub comment: Option<String>,
    #[serde_as(as = "Option<BoolFromInt>")]
    pub use_preferred: Option<bool>,
    pub callback_url: Option<String>,
    #[serde_as(as = "Option<BoolFromInt>")]
    pub auto_approve: Option<bool>,
    pub custom_data: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct PostJobData<'a> {
    pub(crate) job: &'a JobPayload,
}
//endregion

//region job action
/// 修改job状态(PUT translate/job/{id})，序列化后以`action`字段区分
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum JobAction {
    Revise(ReviseAction),
    Approve(ApproveAction),
    Reject(RejectAction),
}

/// 要求译者修改
#[derive(Serialize, Debug, Clone)]
pub struct ReviseAction {
    pub comment: String,
}

impl ReviseAction {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Debug, Clone, Default)]
#[builder(on(String, into))]
pub struct ApproveAction {
    /// 1-5
    pub rating: Option<u8>,
    pub for_translator: Option<String>,
    pub for_gengo: Option<String>,
    /// 是否允许公开反馈
    #[serde_as(as = "Option<BoolFromInt>")]
    pub public: Option<bool>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    Quality,
    Incomplete,
    Other,
}

/// 拒绝之后的处理：重新排队或者取消
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FollowUp {
    Requeue,
    Cancel,
}

#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Debug, Clone)]
#[builder(on(String, into))]
pub struct RejectAction {
    pub reason: RejectReason,
    pub comment: String,
    /// job里`captcha_url`图片上的文字
    pub captcha: String,
    pub follow_up: Option<FollowUp>,
}

impl From<ReviseAction> for JobAction {
    fn from(a: ReviseAction) -> Self {
        JobAction::Revise(a)
    }
}

impl From<ApproveAction> for JobAction {
    fn from(a: ApproveAction) -> Self {
        JobAction::Approve(a)
    }
}

impl From<RejectAction> for JobAction {
    fn from(a: RejectAction) -> Self {
        JobAction::Reject(a)
    }
}
//endregion

//region comment
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Comment {
    pub author: String,
    pub body: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub ctime: i64,
}

#[derive(Deserialize)]
pub(crate) struct CommentsResp {
    #[serde(default)]
    pub(crate) thread: Vec<Comment>,
}

#[derive(Serialize)]
pub(crate) struct PostCommentData<'a> {
    pub(crate) body: &'a str,
}
//endregion

//region revision
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct RevisionSummary {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rev_id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub ctime: i64,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Revisions {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub job_id: u64,
    #[serde(default)]
    pub revisions: Vec<RevisionSummary>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Revision {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub ctime: i64,
    pub body_tgt: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct RevisionResp {
    pub(crate) revision: Revision,
}
//endregion

//region feedback
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Feedback {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rating: f64,
    pub for_translator: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct FeedbackResp {
    pub(crate) feedback: Feedback,
}
//endregion
