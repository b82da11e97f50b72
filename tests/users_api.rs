//! End-to-end tests over a real TCP listener.

use reqwest::StatusCode;
use users_api::client::ClientError;
use users_api::config::ServiceConfig;
use users_api::User;

mod common;

fn seed() -> Vec<User> {
    vec![
        User::new(1, "Helton", 30),
        User::new(2, "Laiz", 28),
        User::new(3, "Thomas", 0),
    ]
}

#[tokio::test]
async fn greeting_is_served_at_root() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let res = common::http()
        .get(format!("http://{}/", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().starts_with("<h1>"));
}

#[tokio::test]
async fn full_crud_cycle() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = &server.client;

    assert_eq!(client.list().await.unwrap(), seed());
    assert_eq!(client.get(2).await.unwrap(), Some(User::new(2, "Laiz", 28)));
    assert_eq!(client.get(999).await.unwrap(), None);

    let created = client.create(&User::new(4, "X", 1)).await.unwrap();
    assert_eq!(created.len(), 4);
    assert_eq!(created.last(), Some(&User::new(4, "X", 1)));

    let echoed = client.replace(1, &User::new(1, "Y", 99)).await.unwrap();
    assert_eq!(echoed, User::new(1, "Y", 99));
    assert_eq!(client.get(1).await.unwrap(), Some(User::new(1, "Y", 99)));

    client.delete(3).await.unwrap();
    let ids: Vec<i64> = client.list().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[tokio::test]
async fn delete_returns_empty_no_content() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let res = common::http()
        .delete(format!("http://{}/users/3", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.headers().contains_key("x-request-id"));
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn strict_mode_reports_missing_ids() {
    let mut config = ServiceConfig::default();
    config.api.strict_not_found = true;
    let server = common::spawn_server(config).await;

    let err = server
        .client
        .replace(42, &User::new(42, "Nobody", 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Status { status, .. } if status == StatusCode::NOT_FOUND
    ));

    assert!(matches!(
        server.client.delete(42).await,
        Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(server.client.get(42).await.unwrap(), None);
    assert_eq!(server.client.list().await.unwrap(), seed());
}

#[tokio::test]
async fn invalid_user_is_unprocessable() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let err = server
        .client
        .create(&User::new(5, "", 1))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body.contains("name must not be blank"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.client.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn concurrent_creates_are_all_kept() {
    let mut config = ServiceConfig::default();
    config.store.seed = false;
    let server = common::spawn_server(config).await;

    let tasks = 20;
    let mut handles = Vec::new();
    for i in 0..tasks {
        let client = server.client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create(&User::new(i, format!("user-{i}"), 20))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut ids: Vec<i64> = server.client.list().await.unwrap().iter().map(|u| u.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..tasks).collect::<Vec<_>>());
}
