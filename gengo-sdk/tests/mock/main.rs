use gengo_sdk::*;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;

fn get_client(server: &MockServer) -> Client {
    Client::builder()
        .public_key("pub")
        .private_key("priv")
        .base_url(Url::parse(&server.url("/v2/")).unwrap())
        .build()
}

#[tokio::test]
async fn account_stats_is_signed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/account/stats")
                .header("accept", "application/json")
                .query_param("api_key", "pub")
                .query_param_exists("api_sig")
                .query_param_exists("ts");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"user_since": 1234567890, "credits_spent": "1023.31", "currency": "USD"}
            }));
        })
        .await;

    let stats = get_client(&server).account_stats().await.unwrap();
    mock.assert_async().await;
    assert_eq!(stats.user_since, 1234567890);
    assert_eq!(stats.credits_spent, 1023.31);
    assert_eq!(stats.currency, "USD");
}

#[tokio::test]
async fn error_envelope_is_uniform_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/account/balance");
            then.status(200).json_body(json!({
                "opstat": "error",
                "err": {"code": 1150, "msg": "api_key is invalid"}
            }));
        })
        .await;

    let err = get_client(&server).account_balance().await.unwrap_err();
    match err {
        Error::Api { code, msg } => {
            assert_eq!(code, 1150);
            assert_eq!(msg, "api_key is invalid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/account/balance");
            then.status(503).body("service unavailable");
        })
        .await;

    let err = get_client(&server).account_balance().await.unwrap_err();
    assert!(matches!(err, Error::RequestAPIFailed { ref message, .. } if message == "service unavailable"));
}

#[tokio::test]
async fn languages_are_not_signed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/service/languages")
                .query_param("api_key", "pub");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": [
                    {"language": "English", "lc": "en", "localized_name": "English", "unit_type": "word"},
                    {"language": "Japanese", "lc": "ja", "localized_name": "日本語", "unit_type": "character"}
                ]
            }));
        })
        .await;

    let languages = get_client(&server).languages().await.unwrap();
    mock.assert_async().await;
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1].unit_type, "character");
}

#[tokio::test]
async fn language_pairs_filter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/service/language_pairs")
                .query_param("lc_src", "de");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": [
                    {"lc_src": "de", "lc_tgt": "en", "tier": "standard", "unit_price": "0.0500", "currency": "USD"}
                ]
            }));
        })
        .await;

    let pairs = get_client(&server)
        .language_pairs()
        .lc_src("de")
        .build()
        .send()
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(pairs[0].unit_price, 0.05);
}

#[tokio::test]
async fn get_job_with_pre_mt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/job/384985")
                .query_param("pre_mt", "1")
                .query_param_exists("api_sig");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"job": {
                    "job_id": "384985",
                    "lc_src": "en",
                    "lc_tgt": "ja",
                    "tier": "standard",
                    "status": "reviewable",
                    "body_src": "Hello",
                    "body_tgt": "こんにちは",
                    "unit_count": "1",
                    "credits": "0.05",
                    "eta": -1,
                    "ctime": 1313475693
                }}
            }));
        })
        .await;

    let job = get_client(&server)
        .job(384985)
        .pre_mt(true)
        .build()
        .send()
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(job.job_id, 384985);
    assert_eq!(job.status, JobStatus::Reviewable);
    assert_eq!(job.body_tgt.as_deref(), Some("こんにちは"));
    assert_eq!(job.eta, Some(-1));
}

#[tokio::test]
async fn post_job_sends_form_data() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/translate/job")
                .header("content-type", "application/x-www-form-urlencoded")
                .form_urlencoded_tuple("api_key", "pub")
                .form_urlencoded_tuple_exists("api_sig")
                .form_urlencoded_tuple_exists("ts")
                .form_urlencoded_tuple(
                    "data",
                    r#"{"job":{"body_src":"Hello","lc_src":"en","lc_tgt":"ja","tier":"standard","auto_approve":1}}"#,
                );
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"job": {
                    "job_id": 1, "lc_src": "en", "lc_tgt": "ja", "tier": "standard", "status": "available"
                }}
            }));
        })
        .await;

    let payload = JobPayload::builder()
        .body_src("Hello")
        .lc_src("en")
        .lc_tgt("ja")
        .tier(Tier::Standard)
        .auto_approve(true)
        .build();
    let job = get_client(&server).post_job(&payload).await.unwrap();
    mock.assert_async().await;
    assert_eq!(job.job_id, 1);
    assert_eq!(job.status, JobStatus::Available);
}

#[tokio::test]
async fn delete_job_ignores_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/v2/translate/job/7")
                .query_param_exists("api_sig");
            then.status(200).json_body(json!({"opstat": "ok", "response": {}}));
        })
        .await;

    get_client(&server).delete_job(7).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn reject_job_puts_action() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/v2/translate/job/7")
                .form_urlencoded_tuple(
                    "data",
                    r#"{"action":"reject","reason":"quality","comment":"bad","captcha":"XYZ","follow_up":"cancel"}"#,
                );
            then.status(200).json_body(json!({"opstat": "ok"}));
        })
        .await;

    let action = RejectAction::builder()
        .reason(RejectReason::Quality)
        .comment("bad")
        .captcha("XYZ")
        .follow_up(FollowUp::Cancel)
        .build();
    get_client(&server).reject_job(7, action).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn approve_job_puts_action() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/v2/translate/job/7")
                .header("accept", "application/json")
                .form_urlencoded_tuple("api_key", "pub")
                .form_urlencoded_tuple_exists("api_sig")
                .form_urlencoded_tuple(
                    "data",
                    r#"{"action":"approve","rating":5,"for_translator":"thanks","public":1}"#,
                );
            then.status(200).json_body(json!({"opstat": "ok", "response": {}}));
        })
        .await;

    let action = ApproveAction::builder()
        .rating(5)
        .for_translator("thanks")
        .public(true)
        .build();
    let client = get_client(&server);
    client.approve_job(7, action.clone()).await.unwrap();
    client.update_job(7, action).await.unwrap();
    mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn revise_job_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/v2/translate/job/7");
            then.status(200).json_body(json!({
                "opstat": "error",
                "err": {"code": "2500", "msg": "job is not reviewable"}
            }));
        })
        .await;

    let err = get_client(&server)
        .revise_job(7, "please fix")
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(2500));
}

#[tokio::test]
async fn comments_round() {
    let server = MockServer::start_async().await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/translate/job/7/comment")
                .form_urlencoded_tuple("data", r#"{"body":"thanks"}"#);
            then.status(200).json_body(json!({"opstat": "ok"}));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/7/comments");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"thread": [
                    {"author": "customer", "body": "thanks", "ctime": "1313475693"}
                ]}
            }));
        })
        .await;

    let client = get_client(&server);
    client.post_job_comment(7, "thanks").await.unwrap();
    let thread = client.job_comments(7).await.unwrap();
    post.assert_async().await;
    list.assert_async().await;
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].ctime, 1313475693);

    assert!(matches!(
        client.post_job_comment(7, "  ").await,
        Err(Error::Common(_))
    ));
}

#[tokio::test]
async fn revisions_and_feedback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/7/revisions");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"job_id": "7", "revisions": [{"rev_id": "3", "ctime": 1313475693}]}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/7/revision/3");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"revision": {"ctime": 1313475693, "body_tgt": "revised"}}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/7/feedback");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"feedback": {"rating": "4.0", "for_translator": "good"}}
            }));
        })
        .await;

    let client = get_client(&server);
    let revisions = client.job_revisions(7).await.unwrap();
    assert_eq!(revisions.job_id, 7);
    let rev_id = revisions.revisions[0].rev_id;
    let revision = client.job_revision(7, rev_id).await.unwrap();
    assert_eq!(revision.body_tgt.as_deref(), Some("revised"));
    let feedback = client.job_feedback(7).await.unwrap();
    assert_eq!(feedback.rating, 4.0);
}

#[tokio::test]
async fn jobs_list_and_by_ids() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/jobs")
                .query_param("status", "approved")
                .query_param("timestamp_after", "1313475693");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": [{"job_id": "1", "ctime": 1313475700}, {"job_id": 2, "ctime": "1313475800"}]
            }));
        })
        .await;
    let by_ids = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/jobs/1,2");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"jobs": [
                    {"job_id": "1", "lc_src": "en", "lc_tgt": "ja", "tier": "pro", "status": "approved"},
                    {"job_id": "2", "lc_src": "en", "lc_tgt": "de", "tier": "pro", "status": "approved"}
                ]}
            }));
        })
        .await;

    let client = get_client(&server);
    let summaries = client
        .jobs()
        .status(JobStatus::Approved)
        .timestamp_after(1313475693)
        .build()
        .send()
        .await
        .unwrap();
    list.assert_async().await;
    let ids: Vec<u64> = summaries.iter().map(|j| j.job_id).collect();
    assert_eq!(ids, [1, 2]);

    let jobs = client.jobs_by_ids(&ids).await.unwrap();
    by_ids.assert_async().await;
    assert_eq!(jobs[1].lc_tgt, "de");

    assert!(matches!(
        client.jobs_by_ids(&[]).await,
        Err(Error::Common(_))
    ));
}

#[tokio::test]
async fn post_jobs_and_quote() {
    let server = MockServer::start_async().await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/translate/jobs")
                .form_urlencoded_tuple(
                    "data",
                    r#"{"jobs":[{"body_src":"a","lc_src":"en","lc_tgt":"ja","tier":"machine"}],"as_group":1}"#,
                );
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"group_id": "12", "jobs": [{"job_1": {"job_id": "1"}}]}
            }));
        })
        .await;
    let quote = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/translate/service/quote");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"jobs": {"job_1": {"unit_count": 1, "credits": "0", "eta": 0, "currency": "USD"}}}
            }));
        })
        .await;
    let group = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/jobs/group/12");
            then.status(200).json_body(json!({
                "opstat": "ok",
                "response": {"group_id": 12, "jobs": [{"job_id": "1"}]}
            }));
        })
        .await;

    let payload = JobPayload::builder()
        .body_src("a")
        .lc_src("en")
        .lc_tgt("ja")
        .tier(Tier::Machine)
        .build();
    let array = JobArray::builder()
        .jobs(vec![payload])
        .as_group(true)
        .build();

    let client = get_client(&server);
    let posted = client.post_jobs(&array).await.unwrap();
    post.assert_async().await;
    assert_eq!(posted.group_id, Some(12));

    let q = client.quote(&array).await.unwrap();
    quote.assert_async().await;
    assert_eq!(q.jobs[0].credits, 0.0);

    let g = client.jobs_group(12).await.unwrap();
    group.assert_async().await;
    assert_eq!(g.jobs[0].job_id, 1);

    assert!(matches!(
        client.quote(&JobArray::from(vec![])).await,
        Err(Error::Common(_))
    ));
}

#[tokio::test]
async fn preview_bytes_and_file() {
    let server = MockServer::start_async().await;
    let image = vec![0xFF_u8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/job/7/preview")
                .header_not("accept", "application/json")
                .query_param_exists("api_sig");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body(image.clone());
        })
        .await;

    let client = get_client(&server);
    let bytes = client.job_preview(7).await.unwrap();
    assert_eq!(bytes.as_ref(), image.as_slice());

    let path = std::env::temp_dir().join(format!("gengo-preview-{}.jpg", std::process::id()));
    client.save_job_preview(7, &path).await.unwrap();
    assert_eq!(tokio::fs::read(&path).await.unwrap(), image);
    tokio::fs::remove_file(&path).await.unwrap();
    mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn preview_error_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/8/preview");
            then.status(200).json_body(json!({
                "opstat": "error",
                "err": {"code": 2750, "msg": "not authorized"}
            }));
        })
        .await;

    let err = get_client(&server).job_preview(8).await.unwrap_err();
    assert_eq!(err.api_code(), Some(2750));
}

#[tokio::test]
async fn preview_forbidden_with_error_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/9/preview");
            then.status(403).json_body(json!({
                "opstat": "error",
                "err": {"code": 2750, "msg": "not authorized"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/translate/job/10/preview");
            then.status(404).body("not found");
        })
        .await;

    let client = get_client(&server);
    match client.job_preview(9).await.unwrap_err() {
        Error::Api { code, msg } => {
            assert_eq!(code, 2750);
            assert_eq!(msg, "not authorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        client.job_preview(10).await.unwrap_err(),
        Error::RequestAPIFailed { ref message, .. } if message == "not found"
    ));
}

#[tokio::test]
async fn raw_value_escape_hatch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/translate/jobs")
                .query_param("count", "5");
            then.status(200).json_body(json!({"opstat": "ok", "response": [{"job_id": "1"}]}));
        })
        .await;

    let value = get_client(&server)
        .get_value("translate/jobs", &json!({"count": 5}))
        .await
        .unwrap();
    assert_eq!(value[0]["job_id"], "1");
}
