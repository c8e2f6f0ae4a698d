use crate::core::{
    domain::model::floating_ip::FloatingIpRecord, infrastructure::api_client::RequestBody,
};

/// JSON body of a floating IP create (`POST`) or update (`PATCH`).
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingIpParams {
    pub name: String,
    pub billing_account_id: i64,
}

impl From<&FloatingIpRecord> for FloatingIpParams {
    fn from(ip: &FloatingIpRecord) -> Self {
        Self {
            name: ip.name.clone(),
            billing_account_id: ip.billing_account_id,
        }
    }
}

impl FloatingIpParams {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Json(serde_json::json!({
            "name": self.name,
            "billing_account_id": self.billing_account_id,
        }))
    }
}
