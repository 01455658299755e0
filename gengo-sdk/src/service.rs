//! 语言、价格和报价

use crate::Error;
use crate::client::{Auth, Client, Params};
use crate::jobs::JobArray;
use bon::Builder;
use gengo_sdk_common::helper::to_query_map;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::collections::{BTreeMap, HashMap};

//region types
#[derive(Deserialize, Debug, Clone)]
pub struct Language {
    pub language: String,
    pub lc: String,
    pub localized_name: String,
    /// `word` 或 `character`
    pub unit_type: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct LanguagePair {
    pub lc_src: String,
    pub lc_tgt: String,
    pub tier: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub unit_price: f64,
    pub currency: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct QuotedJob {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub unit_count: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub eta: i64,
    pub currency: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Quote {
    #[serde(deserialize_with = "quoted_jobs")]
    pub jobs: Vec<QuotedJob>,
}

// jobs 可能是数组，也可能是 {"job_1": {...}, "job_2": {...}}，按编号而不是字符串排序
fn quoted_jobs<'de, D>(deserializer: D) -> Result<Vec<QuotedJob>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum QuotedJobs {
        List(Vec<QuotedJob>),
        Keyed(HashMap<String, QuotedJob>),
    }

    let keyed = match QuotedJobs::deserialize(deserializer)? {
        QuotedJobs::List(jobs) => return Ok(jobs),
        QuotedJobs::Keyed(jobs) => jobs,
    };

    let mut ordered = BTreeMap::new();
    for (key, job) in keyed {
        let index = key
            .strip_prefix("job_")
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| D::Error::custom(format!("unexpected quote key `{key}`")))?;
        ordered.insert(index, job);
    }
    Ok(ordered.into_values().collect())
}
//endregion

//region language pairs
#[derive(Builder, Serialize)]
pub struct LanguagePairs<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    /// 只返回该源语言的语言对
    lc_src: Option<&'a str>,
}

impl LanguagePairs<'_> {
    pub async fn send(&self) -> Result<Vec<LanguagePair>, Error> {
        let params = to_query_map(self)?;
        self.client
            .get("translate/service/language_pairs", Auth::Unsigned, &params)
            .await
    }
}
//endregion

impl Client {
    /// 支持的语言，不需要签名
    pub async fn languages(&self) -> Result<Vec<Language>, Error> {
        self.get(
            "translate/service/languages",
            Auth::Unsigned,
            &Params::new(),
        )
        .await
    }

    /// 支持的语言对以及单价，不需要签名
    pub fn language_pairs(&self) -> LanguagePairsBuilder<'_> {
        LanguagePairs::builder(self)
    }

    /// 获取报价，不会创建job
    pub async fn quote(&self, jobs: &JobArray) -> Result<Quote, Error> {
        jobs.check_not_empty()?;
        self.post("translate/service/quote", jobs).await
    }
}
