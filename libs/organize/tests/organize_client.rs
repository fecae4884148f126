use oneplatform_core::{ApiError, BearerToken, ReqwestTransport, TransportConfig};
use oneplatform_identity::{IdentityClient, IdentityConfig};
use oneplatform_organize::{OrgClient, OrgCredentials, OrgSignIn};
use oneplatform_testutil::{MockServer, Stub, assert_json_includes};
use serde_json::{Value, json};
use tracing_test::traced_test;
use uuid::Uuid;

const TAX_ID: &str = "0105551234567";
const SALES: &str = "6f1c1f3e-2f6b-4b7e-9a59-0d5c8f3b1a10";
const ROOT: &str = "0b0a3c52-93a4-4c85-8d0e-54d1f6f0e2aa";
const MANAGER_ROLE: &str = "c3d6a2f0-5f7e-4a0b-b1a4-2f9e8d7c6b5a";
const STAFF_ROLE: &str = "9a8b7c6d-1e2f-4a3b-8c4d-5e6f7a8b9c0d";

fn envelope(data: Value) -> Value {
    json!({"result": "Success", "data": data, "errorMessage": null, "code": 200})
}

fn org_client(server: &MockServer) -> OrgClient {
    let transport = ReqwestTransport::new(&TransportConfig::default()).unwrap();
    OrgClient::new(
        transport,
        OrgCredentials::new(BearerToken::bearer("org-token"), "org-refresh"),
    )
    .with_endpoint(server.url("/api/v2/service/business"))
}

fn token_body(access: &str, refresh: &str) -> Value {
    json!({
        "token_type": "Bearer",
        "expires_in": 86400,
        "access_token": access,
        "refresh_token": refresh,
        "account_id": "2001",
        "result": "Success",
        "username": "alice"
    })
}

#[tokio::test]
async fn requests_are_get_with_tax_id_body() {
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/account").json(envelope(json!([
            {"id": "2001", "first_name_eng": "Alice"}
        ]))),
    ])
    .await
    else {
        return;
    };

    let accounts = org_client(&server).accounts(TAX_ID).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "2001");

    let request = server.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.header("authorization"), Some("Bearer org-token"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.json(), json!({"tax_id": TAX_ID}));
}

#[tokio::test]
#[traced_test]
async fn malformed_accounts_are_skipped() {
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/account").json(envelope(json!([
            {"id": "2001"},
            {"first_name_eng": "no id"},
            {"id": "2003"}
        ]))),
    ])
    .await
    else {
        return;
    };

    let ids: Vec<String> = org_client(&server)
        .accounts(TAX_ID)
        .await
        .unwrap()
        .into_iter()
        .map(|account| account.id)
        .collect();
    assert_eq!(ids, vec!["2001", "2003"]);
    assert!(logs_contain("skipping malformed record"));
}

#[tokio::test]
async fn departments_drop_invalid_ids() {
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/department").json(envelope(json!([
            {"id": ROOT, "dept_name": "Head office", "parent_dept_id": null},
            {"id": SALES, "dept_name": "Sales", "parent_dept_id": ROOT},
            {"id": "legacy-7", "dept_name": "Archive"},
            {"id": "00000000-0000-0000-0000-000000000000", "dept_name": "Ghost"}
        ]))),
    ])
    .await
    else {
        return;
    };

    let departments = org_client(&server).departments(TAX_ID).await.unwrap();
    assert_eq!(departments.len(), 2);
    assert!(departments.iter().all(|dept| !dept.id.is_nil()));
    assert_eq!(departments[0].name, "Head office");
    assert_eq!(departments[0].parent_dept_id, None);
    assert_eq!(
        departments[1].parent_dept_id,
        Some(Uuid::parse_str(ROOT).unwrap())
    );
}

#[tokio::test]
#[traced_test]
async fn department_accounts_resolve_positions_and_skip_bad_members() {
    let path = format!("/api/v2/service/business/department/{SALES}");
    let Some(server) = MockServer::try_start(vec![Stub::get(path).json(envelope(json!({
        "id": SALES,
        "dept_name": "Sales",
        "has_role": [
            {"role_id": MANAGER_ROLE, "role": {"role_name": "Manager"}},
            {"role_id": STAFF_ROLE, "role": {"role_name": "Staff"}}
        ],
        "has_account": [
            {"account_id": "2001", "role_id": MANAGER_ROLE, "employee_id": "E-1"},
            {"role_id": STAFF_ROLE, "employee_id": "E-2"},
            {"account_id": "2003", "role_id": STAFF_ROLE},
            {"account_id": "2004"},
            {"account_id": "2005", "position": "Contractor"}
        ]
    })))])
    .await
    else {
        return;
    };

    let employees = org_client(&server)
        .department_accounts(TAX_ID, Uuid::parse_str(SALES).unwrap())
        .await
        .unwrap();

    let summary: Vec<(&str, Option<&str>)> = employees
        .iter()
        .map(|e| (e.account_id.as_str(), e.position.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("2001", Some("Manager")),
            ("2003", Some("Staff")),
            ("2004", None),
            ("2005", Some("Contractor"))
        ]
    );
    assert!(logs_contain("skipping malformed record"));
}

#[tokio::test]
async fn department_accounts_rejects_list_payload() {
    let path = format!("/api/v2/service/business/department/{SALES}");
    let Some(server) = MockServer::try_start(vec![Stub::get(path).json(envelope(json!([])))]).await
    else {
        return;
    };

    let err = org_client(&server)
        .department_accounts(TAX_ID, Uuid::parse_str(SALES).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnexpectedShape {
            expected: "object",
            ..
        }
    ));
}

#[tokio::test]
async fn failed_envelope_with_ok_status_is_an_error() {
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/account").json(json!({
            "result": "Fail",
            "data": null,
            "errorMessage": "tax id not found",
            "code": 404
        })),
    ])
    .await
    else {
        return;
    };

    let err = org_client(&server).accounts(TAX_ID).await.unwrap_err();
    match err {
        ApiError::Rejected {
            endpoint,
            code,
            message,
        } => {
            assert_eq!(endpoint, "account");
            assert_eq!(code, 404);
            assert_eq!(message, "tax id not found");
        }
        other => panic!("expected rejected envelope, got {other:?}"),
    }
}

#[tokio::test]
async fn subordinate_and_head_departments_decode_members() {
    let members = json!([{
        "id": SALES,
        "dept_name": "Sales",
        "parent_dept_id": ROOT,
        "has_account": [{"account_id": "2003"}]
    }]);
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/account/2001/subordinate-department")
            .json(envelope(members.clone())),
        Stub::get("/api/v2/service/business/account/2001/head-department")
            .json(envelope(members)),
    ])
    .await
    else {
        return;
    };

    let client = org_client(&server);
    let team = client.subordinate_departments("2001", TAX_ID).await.unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].name, "Sales");
    assert_eq!(team[0].accounts[0].account_id, "2003");

    let heads = client.head_departments("2001", TAX_ID).await.unwrap();
    assert_eq!(heads, team);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let Some(server) = MockServer::try_start(vec![
        Stub::get("/api/v2/service/business/department")
            .status(403)
            .json(json!({"result": "Fail", "errorMessage": "forbidden", "code": 403})),
    ])
    .await
    else {
        return;
    };

    let err = org_client(&server).departments(TAX_ID).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    assert!(err.to_string().contains("forbidden"));
}

#[tokio::test]
async fn sign_in_with_refresh_token_sends_that_token() {
    let Some(server) = MockServer::try_start(vec![
        Stub::post("/api/oauth/get_refresh_token").json(token_body("fresh", "next")),
        Stub::get("/api/v2/service/business/department").json(envelope(json!([]))),
    ])
    .await
    else {
        return;
    };

    let identity = IdentityClient::new(
        IdentityConfig::new("client-1", "secret-1").with_endpoint(server.base_url()),
    )
    .unwrap();
    let client = OrgClient::sign_in(&identity, OrgSignIn::RefreshToken("supplied-refresh"))
        .await
        .unwrap()
        .with_endpoint(server.url("/api/v2/service/business"));

    assert_json_includes(
        &server.requests_to("/api/oauth/get_refresh_token")[0].json(),
        &json!({"grant_type": "refresh_token", "refresh_token": "supplied-refresh"}),
    );
    let credentials = client.credentials().await;
    assert_eq!(credentials.token.access_token, "fresh");
    assert_eq!(credentials.refresh_token, "next");

    client.departments(TAX_ID).await.unwrap();
    assert_eq!(
        server.requests_to("/api/v2/service/business/department")[0].header("authorization"),
        Some("Bearer fresh")
    );
}

#[tokio::test]
async fn refresh_replaces_credentials_for_every_clone() {
    let Some(server) = MockServer::try_start(vec![
        Stub::post("/api/oauth/get_refresh_token").json(token_body("rotated", "rotated-refresh")),
    ])
    .await
    else {
        return;
    };

    let identity = IdentityClient::new(
        IdentityConfig::new("client-1", "secret-1").with_endpoint(server.base_url()),
    )
    .unwrap();
    let client = org_client(&server);
    let shared = client.clone();

    client.refresh(&identity).await.unwrap();

    assert_json_includes(
        &server.single_request().json(),
        &json!({"refresh_token": "org-refresh"}),
    );
    assert_eq!(shared.credentials().await.token.access_token, "rotated");
    assert_eq!(shared.credentials().await.refresh_token, "rotated-refresh");
}

#[tokio::test]
async fn empty_tax_id_is_rejected_before_sending() {
    let Some(server) = MockServer::try_start(Vec::new()).await else {
        return;
    };

    let err = org_client(&server).accounts("").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument("tax id required")));
    assert!(server.requests().is_empty());
}
