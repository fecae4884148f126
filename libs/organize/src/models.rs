use oneplatform_identity::Employee;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(deserialize_with = "non_nil_uuid")]
    pub id: Uuid,
    #[serde(rename = "dept_name")]
    pub name: String,
    /// Unparseable or nil parents read as `None`.
    #[serde(default, deserialize_with = "loose_uuid")]
    pub parent_dept_id: Option<Uuid>,
}

/// A department together with the accounts assigned to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentMembers {
    pub id: Uuid,
    #[serde(rename = "dept_name")]
    pub name: String,
    #[serde(default)]
    pub parent_dept_id: Option<Uuid>,
    #[serde(rename = "has_account", default, deserialize_with = "null_as_empty")]
    pub accounts: Vec<Employee>,
}

pub type TeamMember = DepartmentMembers;
pub type HeadDepartment = DepartmentMembers;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub role_name: String,
}

/// Entry of a department's `has_role` list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RoleAssignment {
    pub role_id: Uuid,
    pub role: Role,
}

/// Raw `/department/{id}` payload, decoded further by the client.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DepartmentDetail {
    #[serde(default)]
    pub has_role: Value,
    #[serde(default)]
    pub has_account: Value,
}

fn non_nil_uuid<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Uuid::deserialize(deserializer)?;
    if id.is_nil() {
        return Err(D::Error::custom("department id is the nil uuid"));
    }
    Ok(id)
}

fn loose_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .filter(|id| !id.is_nil()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
