use serde::{Deserialize, Serialize};

use crate::field::{Field, Payload};

/// Request/response envelope for one profile section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct GroupEnvelope<P> {
    pub is_success: bool,
    pub status_code: u16,
    pub status_message: Option<String>,
    pub data: GroupData<P>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct GroupData<P> {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_share_button: Option<bool>,
    /// Section slug, e.g. `"contact"`.
    pub group: String,
    pub field_list: Vec<Field<P>>,
}

/// Partial `data` accepted by a dashboard commit. Only the field list is
/// replaced; every other envelope attribute is left as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct GroupUpdate<P> {
    pub field_list: Vec<Field<P>>,
}

impl<P: Payload> GroupEnvelope<P> {
    pub fn ok(data: GroupData<P>) -> Self {
        Self {
            is_success: true,
            status_code: 200,
            status_message: None,
            data,
        }
    }
}
