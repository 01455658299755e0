use super::job_endpoint;
use super::types_rs::{Comment, CommentsResp, PostCommentData};
use crate::Error;
use crate::client::{Auth, Client, Params};

impl Client {
    /// job的评论列表，按时间顺序
    pub async fn job_comments(&self, job_id: u64) -> Result<Vec<Comment>, Error> {
        let endpoint = format!("{}/comments", job_endpoint(job_id));
        let res: CommentsResp = self.get(&endpoint, Auth::Signed, &Params::new()).await?;
        Ok(res.thread)
    }

    /// 给译者留言
    pub async fn post_job_comment(&self, job_id: u64, body: &str) -> Result<(), Error> {
        if body.trim().is_empty() {
            return Err(Error::Common("comment body can not be empty".to_owned()));
        }

        let endpoint = format!("{}/comment", job_endpoint(job_id));
        self.post_empty(&endpoint, &PostCommentData { body }).await
    }
}
