use crate::Error;
use crate::client::{Auth, Client, Params};
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

//region response
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct AccountStats {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub user_since: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits_spent: f64,
    pub currency: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct AccountBalance {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits: f64,
    pub currency: Option<String>,
}
//endregion

impl Client {
    /// 账户的消费统计
    pub async fn account_stats(&self) -> Result<AccountStats, Error> {
        self.get("account/stats", Auth::Signed, &Params::new())
            .await
    }

    /// 账户余额
    pub async fn account_balance(&self) -> Result<AccountBalance, Error> {
        self.get("account/balance", Auth::Signed, &Params::new())
            .await
    }
}
