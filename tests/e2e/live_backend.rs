//! Flows against a running backend

use crate::{assert_ok, skip_without_env};
use pergaminos_rs::config::ConfigBuilder;
use pergaminos_rs::sdk::{NewCompany, NewProject, UserRole};
use pergaminos_rs::{ApiClient, Session};

fn live_client() -> ApiClient {
    let url = std::env::var("PERGAMINOS_E2E_URL").unwrap();
    let config = ConfigBuilder::new().base_url(url).build().unwrap();
    ApiClient::new(&config, Session::default()).unwrap()
}

async fn login(client: &ApiClient) {
    assert_ok!(client.init_admin().await);
    let email = std::env::var("PERGAMINOS_E2E_EMAIL")
        .unwrap_or_else(|_| "admin@pergaminos.com".to_string());
    let password =
        std::env::var("PERGAMINOS_E2E_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let user = assert_ok!(client.login(&email, &password).await);
    assert_eq!(user.role, UserRole::Staff);
}

#[tokio::test]
#[ignore]
async fn test_login_and_me() {
    skip_without_env!("PERGAMINOS_E2E_URL");

    let client = live_client();
    login(&client).await;
    let me = assert_ok!(client.me().await);
    assert!(me.is_active);
}

#[tokio::test]
#[ignore]
async fn test_company_project_documents() {
    skip_without_env!("PERGAMINOS_E2E_URL");

    let client = live_client();
    login(&client).await;

    let company = assert_ok!(
        client
            .create_company(&NewCompany {
                name: "Notaría de prueba".to_string(),
                ..Default::default()
            })
            .await
    );
    let project = assert_ok!(
        client
            .create_project(&NewProject {
                name: "Proyecto de prueba".to_string(),
                company_id: company.id.clone(),
                ..Default::default()
            })
            .await
    );

    let documents = assert_ok!(client.list_documents(&project.id).await);
    assert!(documents.is_empty());

    let stats = assert_ok!(client.dashboard_stats().await);
    assert!(stats.projects_count.unwrap_or_default() >= 1);
}
