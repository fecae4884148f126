use oneplatform_core::BearerToken;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Token grant result returned by every OneID grant endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub username: String,
}

impl AuthenticationResult {
    pub fn bearer(&self) -> BearerToken {
        BearerToken::new(self.token_type.clone(), self.access_token.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mobile {
    pub mobile_no: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OneID account profile. Fields the SDK does not model are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    #[serde(default)]
    pub account_title_th: String,
    #[serde(default)]
    pub first_name_th: String,
    #[serde(default)]
    pub last_name_th: String,
    #[serde(default)]
    pub account_title_eng: String,
    #[serde(default)]
    pub first_name_eng: String,
    #[serde(default)]
    pub last_name_eng: String,
    #[serde(default)]
    pub id_card_type: String,
    #[serde(default)]
    pub id_card_num: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub thai_email: Option<String>,
    #[serde(default)]
    pub status_cd: Option<String>,
    #[serde(default)]
    pub mobile: Vec<Mobile>,
    #[serde(default)]
    pub email: Vec<Email>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountProfile {
    pub fn full_name_th(&self) -> String {
        join_name(&self.first_name_th, &self.last_name_th)
    }

    pub fn full_name_eng(&self) -> String {
        join_name(&self.first_name_eng, &self.last_name_eng)
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.email
            .first()
            .map(|entry| entry.email.as_str())
            .or(self.thai_email.as_deref())
    }

    pub fn primary_mobile(&self) -> Option<&str> {
        self.mobile.first().map(|entry| entry.mobile_no.as_str())
    }
}

/// Member of an organization department.
///
/// `position` is read from the record when present; the organize client overrides it with the
/// role name that `position_id` points to in the department's role table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub account_id: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(rename = "role_id", default)]
    pub position_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub account: Option<AccountProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn join_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
