//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`; they are skipped otherwise. Migrations are applied on
//! server start.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

async fn post_tweet(server: &TestServer, token: &str, body: &str) {
    let response = server
        .post_auth("/tweets/add", token, &BodyRequest::text(body))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

async fn tweets_of(server: &TestServer, user_id: &str) -> Vec<Tweet> {
    let response = server.get(&format!("/tweets/{user_id}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn detail(server: &TestServer, user_id: &str, tweet_id: i64) -> reqwest::Response {
    server
        .get(&format!("/tweets/{user_id}/{tweet_id}"))
        .await
        .unwrap()
}

async fn comment(
    server: &TestServer,
    token: &str,
    owner: &str,
    tweet_id: i64,
    body: &str,
) -> reqwest::Response {
    server
        .post_auth(
            &format!("/tweets/{owner}/{tweet_id}/add-comment"),
            token,
            &BodyRequest::text(body),
        )
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_openapi_document_served() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/api-docs/openapi.json").await.unwrap();
    let doc: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(doc["paths"]["/tweets/add"].is_object());
}

// ============================================================================
// Identity Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (request, registered) = server.register().await.unwrap();
    assert_eq!(registered.user.username, request.username);
    assert!(!registered.access_token.is_empty());
    assert!(registered.user.roles.is_empty());

    let logged_in = server.login(&request).await.unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (mut request, _) = server.register().await.unwrap();
    request.username = format!("{}x", request.username);

    let response = server.post("/user/register", &request).await.unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let login = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/user/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = server.register().await.unwrap();

    let response = server
        .post(
            "/user/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let reuse = server
        .post(
            "/user/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(reuse, StatusCode::UNAUTHORIZED).await.unwrap();

    let logout = server
        .post_empty_auth("/user/logout", &rotated.access_token)
        .await
        .unwrap();
    assert_status(logout, StatusCode::NO_CONTENT).await.unwrap();

    let after_logout = server
        .post(
            "/user/refresh",
            &RefreshTokenRequest {
                refresh_token: rotated.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(after_logout, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_user_info() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (request, auth) = server.register().await.unwrap();

    let response = server
        .get_auth("/user/manage/info", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);

    let anonymous = server.get("/user/manage/info").await.unwrap();
    assert_status(anonymous, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Tweet Tests
// ============================================================================

#[tokio::test]
async fn test_add_and_list_tweets() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (request, auth) = server.register().await.unwrap();
    post_tweet(&server, &auth.access_token, "hello world").await;

    let response = server.get("/tweets").await.unwrap();
    let all: Vec<Tweet> = assert_json(response, StatusCode::OK).await.unwrap();
    let mine: Vec<&Tweet> = all.iter().filter(|t| t.user.id == auth.user.id).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].body, "hello world");
    assert_eq!(mine[0].user.username, request.username);
    assert_eq!(mine[0].user.first_name, "Test");
    assert!(!mine[0].created_at.is_empty());

    let by_user = tweets_of(&server, &auth.user.id).await;
    assert_eq!(by_user.len(), 1);
}

#[tokio::test]
async fn test_tweets_of_unknown_user() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/tweets/no-such-user").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_add_tweet_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server
        .post("/tweets/add", &BodyRequest::text("anonymous"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Authentication is checked before the body is parsed
    for path in ["/tweets/add", "/tweets/someone/1/add-comment"] {
        let response = server
            .client
            .post(format!("{}{path}", server.base_url()))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}

#[tokio::test]
async fn test_add_tweet_with_empty_body() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = server.register().await.unwrap();

    for body in [BodyRequest::missing(), BodyRequest::text(""), BodyRequest::text("  ")] {
        let response = server
            .post_auth("/tweets/add", &auth.access_token, &body)
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    assert!(tweets_of(&server, &auth.user.id).await.is_empty());
}

#[tokio::test]
async fn test_tweet_detail_lists_comments_in_order() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    post_tweet(&server, &alice.access_token, "thread").await;
    let tweet_id = tweets_of(&server, &alice.user.id).await[0].id;

    for (token, text) in [
        (&bob.access_token, "first"),
        (&alice.access_token, "second"),
        (&bob.access_token, "third"),
    ] {
        let response = comment(&server, token, &alice.user.id, tweet_id, text).await;
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = detail(&server, &alice.user.id, tweet_id).await;
    let tweet: TweetDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tweet.id, tweet_id);
    assert_eq!(tweet.body, "thread");
    assert_eq!(tweet.user.id, alice.user.id);
    let bodies: Vec<&str> = tweet.comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
    assert_eq!(
        tweet.comments[0].user.as_ref().map(|u| u.id.as_str()),
        Some(bob.user.id.as_str())
    );

    let wrong_owner = detail(&server, &bob.user.id, tweet_id).await;
    assert_status(wrong_owner, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_add_comment_errors() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    post_tweet(&server, &alice.access_token, "target").await;
    let tweet_id = tweets_of(&server, &alice.user.id).await[0].id;

    let missing = comment(&server, &bob.access_token, &alice.user.id, i64::MAX, "hi").await;
    assert_status(missing, StatusCode::NOT_FOUND).await.unwrap();

    let mismatch = comment(&server, &bob.access_token, &bob.user.id, tweet_id, "hi").await;
    assert_status(mismatch, StatusCode::BAD_REQUEST).await.unwrap();

    let blank = comment(&server, &bob.access_token, &alice.user.id, tweet_id, "").await;
    assert_status(blank, StatusCode::BAD_REQUEST).await.unwrap();

    let response = detail(&server, &alice.user.id, tweet_id).await;
    let tweet: TweetDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(tweet.comments.is_empty());
}

#[tokio::test]
async fn test_delete_tweet_ownership() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    post_tweet(&server, &bob.access_token, "bob's").await;
    let tweet_id = tweets_of(&server, &bob.user.id).await[0].id;

    let anonymous = server.delete(&format!("/tweets/{tweet_id}")).await.unwrap();
    assert_status(anonymous, StatusCode::UNAUTHORIZED).await.unwrap();

    let forbidden = server
        .delete_auth(&format!("/tweets/{tweet_id}"), &alice.access_token)
        .await
        .unwrap();
    assert_status(forbidden, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(tweets_of(&server, &bob.user.id).await.len(), 1);

    let deleted = server
        .delete_auth(&format!("/tweets/{tweet_id}"), &bob.access_token)
        .await
        .unwrap();
    assert_status(deleted, StatusCode::NO_CONTENT).await.unwrap();

    let gone = detail(&server, &bob.user.id, tweet_id).await;
    assert_status(gone, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_comment_ownership() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    post_tweet(&server, &alice.access_token, "t").await;
    let tweet_id = tweets_of(&server, &alice.user.id).await[0].id;
    let response = comment(&server, &bob.access_token, &alice.user.id, tweet_id, "c").await;
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = detail(&server, &alice.user.id, tweet_id).await;
    let tweet: TweetDetail = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = tweet.comments[0].id;

    let forbidden = server
        .delete_auth(&format!("/comments/{comment_id}"), &alice.access_token)
        .await
        .unwrap();
    assert_status(forbidden, StatusCode::FORBIDDEN).await.unwrap();

    let deleted = server
        .delete_auth(&format!("/comments/{comment_id}"), &bob.access_token)
        .await
        .unwrap();
    assert_status(deleted, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Cascade Tests
// ============================================================================

#[tokio::test]
async fn test_deleting_account_cascades() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();

    post_tweet(&server, &alice.access_token, "alice's tweet").await;
    let alice_tweet = tweets_of(&server, &alice.user.id).await[0].id;
    post_tweet(&server, &bob.access_token, "bob's tweet").await;
    let bob_tweet = tweets_of(&server, &bob.user.id).await[0].id;

    let response =
        comment(&server, &bob.access_token, &alice.user.id, alice_tweet, "on alice").await;
    assert_status(response, StatusCode::OK).await.unwrap();
    let response =
        comment(&server, &alice.access_token, &bob.user.id, bob_tweet, "on bob").await;
    assert_status(response, StatusCode::OK).await.unwrap();

    let deleted = server
        .delete_auth("/user/manage", &alice.access_token)
        .await
        .unwrap();
    assert_status(deleted, StatusCode::NO_CONTENT).await.unwrap();

    let alice_gone = server.get(&format!("/tweets/{}", alice.user.id)).await.unwrap();
    assert_status(alice_gone, StatusCode::NOT_FOUND).await.unwrap();

    let response = detail(&server, &bob.user.id, bob_tweet).await;
    let tweet: TweetDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tweet.comments.len(), 1);
    assert_eq!(tweet.comments[0].body, "on bob");
    assert!(tweet.comments[0].user.is_none());
}

#[tokio::test]
async fn test_deleted_account_token_cannot_post() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    post_tweet(&server, &alice.access_token, "still standing").await;
    let tweet_id = tweets_of(&server, &alice.user.id).await[0].id;

    let deleted = server
        .delete_auth("/user/manage", &bob.access_token)
        .await
        .unwrap();
    assert_status(deleted, StatusCode::NO_CONTENT).await.unwrap();

    // The access token stays valid until it expires
    let response = server
        .post_auth("/tweets/add", &bob.access_token, &BodyRequest::text("ghost"))
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_USER");

    let response = comment(&server, &bob.access_token, &alice.user.id, tweet_id, "ghost").await;
    let error: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_USER");

    let response = detail(&server, &alice.user.id, tweet_id).await;
    let tweet: TweetDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(tweet.comments.is_empty());
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_only_and_delete_user() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (admin_request, plain) = server.register().await.unwrap();
    let (_, victim) = server.register().await.unwrap();

    let denied = server
        .get_auth("/tweets/admin-only", &plain.access_token)
        .await
        .unwrap();
    assert_status(denied, StatusCode::FORBIDDEN).await.unwrap();

    server.promote_to_admin(&plain.user.id).await.unwrap();
    let admin = server.login(&admin_request).await.unwrap();
    assert_eq!(admin.user.roles, vec!["Admin".to_string()]);

    let allowed = server
        .get_auth("/tweets/admin-only", &admin.access_token)
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(allowed.text().await.unwrap(), "Admin only");

    let path = format!("/users/{}", victim.user.id);
    let forbidden = server.delete_auth(&path, &victim.access_token).await.unwrap();
    assert_status(forbidden, StatusCode::FORBIDDEN).await.unwrap();

    let deleted = server.delete_auth(&path, &admin.access_token).await.unwrap();
    assert_status(deleted, StatusCode::NO_CONTENT).await.unwrap();

    let again = server.delete_auth(&path, &admin.access_token).await.unwrap();
    assert_status(again, StatusCode::NOT_FOUND).await.unwrap();
}
