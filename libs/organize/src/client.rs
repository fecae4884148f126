use std::collections::HashMap;
use std::sync::Arc;

use oneplatform_core::api::{ApiRequest, join_url, parse_json};
use oneplatform_core::{ApiError, ApiResult, HttpTransport, ReqwestTransport};
use oneplatform_identity::{AccountProfile, Employee, IdentityClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::credentials::{OrgCredentials, OrgSignIn};
use crate::decode::decode_lenient;
use crate::envelope::{Envelope, TaxScope};
use crate::models::{Department, DepartmentDetail, HeadDepartment, RoleAssignment, TeamMember};

pub const DEFAULT_ENDPOINT: &str = "https://one.th/api/v2/service/business";

/// Business directory client.
///
/// Clones share one credential cell, so a [`OrgClient::refresh`] on any clone is seen by all.
#[derive(Debug, Clone)]
pub struct OrgClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    endpoint: String,
    credentials: Arc<RwLock<OrgCredentials>>,
}

impl<T: HttpTransport> OrgClient<T> {
    pub fn new(transport: T, credentials: OrgCredentials) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: Arc::new(RwLock::new(credentials)),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn credentials(&self) -> OrgCredentials {
        self.credentials.read().await.clone()
    }

    pub async fn set_credentials(&self, credentials: OrgCredentials) {
        *self.credentials.write().await = credentials;
    }

    /// Exchanges the held refresh token for a new token pair.
    pub async fn refresh<I: HttpTransport>(&self, identity: &IdentityClient<I>) -> ApiResult<()> {
        let refresh_token = self.credentials.read().await.refresh_token.clone();
        let result = identity.refresh_token(&refresh_token).await?;
        self.set_credentials(OrgCredentials::from(&result)).await;
        info!(account_id = %result.account_id, "organize credentials refreshed");
        Ok(())
    }

    /// Every account registered under the company.
    pub async fn accounts(&self, tax_id: &str) -> ApiResult<Vec<AccountProfile>> {
        let data = self.fetch("account", "/account", tax_id).await?;
        Ok(decode_lenient("account", data)?.into_items())
    }

    pub async fn departments(&self, tax_id: &str) -> ApiResult<Vec<Department>> {
        let data = self.fetch("department", "/department", tax_id).await?;
        Ok(decode_lenient("department", data)?.into_items())
    }

    /// Accounts of one department. `position` is resolved from the department roles when the
    /// employee's role is listed there.
    pub async fn department_accounts(
        &self,
        tax_id: &str,
        department_id: Uuid,
    ) -> ApiResult<Vec<Employee>> {
        let path = format!("/department/{department_id}");
        let data = self.fetch("department_accounts", &path, tax_id).await?;
        if !data.is_object() {
            return Err(ApiError::UnexpectedShape {
                endpoint: "department_accounts",
                expected: "object",
            });
        }
        let detail: DepartmentDetail =
            serde_json::from_value(data).map_err(|_| ApiError::UnexpectedShape {
                endpoint: "department_accounts",
                expected: "object",
            })?;

        let positions: HashMap<Uuid, String> =
            decode_lenient::<RoleAssignment>("department_roles", detail.has_role)?
                .into_items()
                .into_iter()
                .map(|assignment| (assignment.role_id, assignment.role.role_name))
                .collect();

        let mut employees =
            decode_lenient::<Employee>("department_accounts", detail.has_account)?.into_items();
        for employee in &mut employees {
            if let Some(name) = employee
                .position_id
                .and_then(|role_id| positions.get(&role_id))
            {
                employee.position = Some(name.clone());
            }
        }
        Ok(employees)
    }

    /// Departments below the ones `account_id` belongs to.
    pub async fn subordinate_departments(
        &self,
        account_id: &str,
        tax_id: &str,
    ) -> ApiResult<Vec<TeamMember>> {
        let path = format!("/account/{account_id}/subordinate-department");
        self.fetch_strict("subordinate_department", &path, tax_id)
            .await
    }

    /// Departments `account_id` heads.
    pub async fn head_departments(
        &self,
        account_id: &str,
        tax_id: &str,
    ) -> ApiResult<Vec<HeadDepartment>> {
        let path = format!("/account/{account_id}/head-department");
        self.fetch_strict("head_department", &path, tax_id).await
    }

    async fn fetch_strict<R>(
        &self,
        endpoint: &'static str,
        path: &str,
        tax_id: &str,
    ) -> ApiResult<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let data = self.fetch(endpoint, path, tax_id).await?;
        if data.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(data).map_err(|source| {
            warn!(endpoint, error = %source, "directory payload did not match");
            ApiError::UnexpectedShape {
                endpoint,
                expected: "array of departments",
            }
        })
    }

    async fn fetch(&self, endpoint: &'static str, path: &str, tax_id: &str) -> ApiResult<Value> {
        if tax_id.trim().is_empty() {
            return Err(ApiError::InvalidArgument("tax id required"));
        }
        let token = self.credentials.read().await.token.clone();
        if token.is_empty() {
            return Err(ApiError::InvalidArgument("login required"));
        }
        debug!(endpoint, path, "querying business directory");

        let response = ApiRequest::get(join_url(&self.endpoint, path))
            .bearer(&token)
            .json(&TaxScope { tax_id })?
            .send(&self.transport)
            .await?;
        let envelope: Envelope = parse_json(endpoint, &response)?;
        envelope.into_data(endpoint)
    }
}

impl<T: HttpTransport + Clone> OrgClient<T> {
    /// Signs in through `identity` and reuses its transport for directory calls.
    pub async fn sign_in(identity: &IdentityClient<T>, how: OrgSignIn<'_>) -> ApiResult<Self> {
        let result = match how {
            OrgSignIn::Password { username, password } => {
                identity.login(username, password).await?
            }
            OrgSignIn::RefreshToken(refresh_token) => {
                identity.refresh_token(refresh_token).await?
            }
        };
        info!(account_id = %result.account_id, "signed in to business directory");
        Ok(Self::new(
            identity.transport().clone(),
            OrgCredentials::from(&result),
        ))
    }
}
