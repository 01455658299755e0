use super::job_endpoint;
use super::types_rs::{Feedback, FeedbackResp, Revision, RevisionResp, Revisions};
use crate::Error;
use crate::client::{Auth, Client, Params};

impl Client {
    /// job的所有修改记录
    pub async fn job_revisions(&self, job_id: u64) -> Result<Revisions, Error> {
        let endpoint = format!("{}/revisions", job_endpoint(job_id));
        self.get(&endpoint, Auth::Signed, &Params::new()).await
    }

    /// 某一次修改的译文
    pub async fn job_revision(&self, job_id: u64, revision_id: u64) -> Result<Revision, Error> {
        let endpoint = format!("{}/revision/{revision_id}", job_endpoint(job_id));
        let res: RevisionResp = self.get(&endpoint, Auth::Signed, &Params::new()).await?;
        Ok(res.revision)
    }

    /// approve时提交的反馈
    pub async fn job_feedback(&self, job_id: u64) -> Result<Feedback, Error> {
        let endpoint = format!("{}/feedback", job_endpoint(job_id));
        let res: FeedbackResp = self.get(&endpoint, Auth::Signed, &Params::new()).await?;
        Ok(res.feedback)
    }
}
