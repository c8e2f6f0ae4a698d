use crate::core::infrastructure::api_client::RequestBody;

/// JSON body of `PATCH /network/network/{uuid}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameNetworkRequest {
    pub name: String,
}

impl RenameNetworkRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Json(serde_json::json!({ "name": self.name }))
    }
}
