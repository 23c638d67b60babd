//! In-memory repositories for service tests
//!
//! Mirrors the PostgreSQL schema's foreign keys: deleting a user removes
//! their tweets (and those tweets' comments) and detaches their comments on
//! other tweets; deleting a tweet removes its comments.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use tweet_common::auth::{JwtService, PasswordService};
use tweet_common::PasswordPolicy;
use tweet_core::entities::{Comment, NewComment, NewTweet, NewUser, RefreshSession, Role, Tweet, User};
use tweet_core::error::DomainError;
use tweet_core::traits::{
    CommentRepository, CommentWithAuthor, RefreshSessionRepository, RepoResult, TweetRepository,
    TweetWithAuthor, UserRepository,
};
use tweet_core::value_objects::{CommentId, TweetId, UserId};

use crate::dto::AddTweetRequest;

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    roles: HashMap<UserId, Vec<Role>>,
    tweets: Vec<Tweet>,
    comments: Vec<Comment>,
    sessions: Vec<RefreshSession>,
    next_tweet_id: i64,
    next_comment_id: i64,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.is(id))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn tweet_count(&self) -> usize {
        self.lock().tweets.len()
    }

    pub fn comment_count(&self) -> usize {
        self.lock().comments.len()
    }

    pub fn active_session_count(&self, user_id: &UserId) -> usize {
        self.lock()
            .sessions
            .iter()
            .filter(|s| &s.user_id == user_id && s.is_active())
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|(u, _)| u.email.eq_ignore_ascii_case(email)))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|(u, _)| u.username.eq_ignore_ascii_case(username)))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if state
            .users
            .iter()
            .any(|(u, _)| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(DomainError::UsernameAlreadyExists);
        }
        state.users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> RepoResult<()> {
        let mut state = self.lock();
        if state.user(id).is_none() {
            return Err(DomainError::UserNotFound(id.clone()));
        }

        let owned: Vec<TweetId> = state
            .tweets
            .iter()
            .filter(|t| t.is_owned_by(id))
            .map(|t| t.id)
            .collect();
        state.tweets.retain(|t| !t.is_owned_by(id));
        state.comments.retain(|c| !owned.contains(&c.tweet_id));
        for comment in state.comments.iter_mut().filter(|c| c.is_authored_by(id)) {
            comment.user_id = None;
        }
        state.sessions.retain(|s| &s.user_id != id);
        state.roles.remove(id);
        state.users.retain(|(u, _)| !u.is(id));
        Ok(())
    }

    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.is(id))
            .map(|(_, hash)| hash.clone()))
    }

    async fn roles(&self, id: &UserId) -> RepoResult<Vec<Role>> {
        Ok(self.lock().roles.get(id).cloned().unwrap_or_default())
    }

    async fn add_role(&self, id: &UserId, role: Role) -> RepoResult<()> {
        let mut state = self.lock();
        if state.user(id).is_none() {
            return Err(DomainError::UserNotFound(id.clone()));
        }
        let roles = state.roles.entry(id.clone()).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
        Ok(())
    }

    async fn any_with_role(&self, role: Role) -> RepoResult<bool> {
        Ok(self.lock().roles.values().any(|roles| roles.contains(&role)))
    }
}

#[async_trait]
impl TweetRepository for InMemoryStore {
    async fn list_with_authors(&self) -> RepoResult<Vec<TweetWithAuthor>> {
        let state = self.lock();
        let mut rows: Vec<TweetWithAuthor> = state
            .tweets
            .iter()
            .filter_map(|tweet| {
                state.user(&tweet.user_id).map(|author| TweetWithAuthor {
                    tweet: tweet.clone(),
                    author: author.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|row| (row.tweet.created_at, row.tweet.id));
        Ok(rows)
    }

    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Tweet>> {
        let mut tweets: Vec<Tweet> = self
            .lock()
            .tweets
            .iter()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect();
        tweets.sort_by_key(|t| (t.created_at, t.id));
        Ok(tweets)
    }

    async fn find_by_id(&self, id: TweetId) -> RepoResult<Option<Tweet>> {
        Ok(self.lock().tweets.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, tweet: &NewTweet) -> RepoResult<Tweet> {
        let mut state = self.lock();
        if state.user(&tweet.user_id).is_none() {
            return Err(DomainError::UserNotFound(tweet.user_id.clone()));
        }
        state.next_tweet_id += 1;
        let created = Tweet {
            id: TweetId::new(state.next_tweet_id),
            user_id: tweet.user_id.clone(),
            body: tweet.body.clone(),
            created_at: tweet.created_at,
        };
        state.tweets.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: TweetId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.tweets.iter().any(|t| t.id == id) {
            return Err(DomainError::TweetNotFound(id));
        }
        state.tweets.retain(|t| t.id != id);
        state.comments.retain(|c| c.tweet_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.lock().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_tweet_with_authors(
        &self,
        tweet_id: TweetId,
    ) -> RepoResult<Vec<CommentWithAuthor>> {
        let state = self.lock();
        let mut rows: Vec<CommentWithAuthor> = state
            .comments
            .iter()
            .filter(|c| c.tweet_id == tweet_id)
            .map(|comment| CommentWithAuthor {
                comment: comment.clone(),
                author: comment
                    .user_id
                    .as_ref()
                    .and_then(|id| state.user(id))
                    .cloned(),
            })
            .collect();
        rows.sort_by_key(|row| (row.comment.created_at, row.comment.id));
        Ok(rows)
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.lock();
        if !state.tweets.iter().any(|t| t.id == comment.tweet_id) {
            return Err(DomainError::TweetNotFound(comment.tweet_id));
        }
        if state.user(&comment.user_id).is_none() {
            return Err(DomainError::UserNotFound(comment.user_id.clone()));
        }
        state.next_comment_id += 1;
        let created = Comment {
            id: CommentId::new(state.next_comment_id),
            tweet_id: comment.tweet_id,
            user_id: Some(comment.user_id.clone()),
            body: comment.body.clone(),
            created_at: comment.created_at,
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.comments.iter().any(|c| c.id == id) {
            return Err(DomainError::CommentNotFound(id));
        }
        state.comments.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl RefreshSessionRepository for InMemoryStore {
    async fn create(&self, session: &RefreshSession) -> RepoResult<()> {
        self.lock().sessions.push(session.clone());
        Ok(())
    }

    async fn find_active(&self, id: Uuid) -> RepoResult<Option<RefreshSession>> {
        Ok(self
            .lock()
            .sessions
            .iter()
            .find(|s| s.id == id && s.is_active())
            .cloned())
    }

    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.lock();
        match state.sessions.iter_mut().find(|s| s.id == id && !s.is_revoked()) {
            Some(session) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let now = Utc::now();
        let mut revoked = 0;
        for session in self
            .lock()
            .sessions
            .iter_mut()
            .filter(|s| &s.user_id == user_id && !s.is_revoked())
        {
            session.revoked_at = Some(now);
            revoked += 1;
        }
        Ok(revoked)
    }
}

/// A service context wired to one shared in-memory store
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub ctx: ServiceContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_session_repo(|store| store as Arc<dyn RefreshSessionRepository>)
    }

    /// Like `new`, but sessions go through `wrap(store)`
    pub fn with_session_repo<F>(wrap: F) -> Self
    where
        F: FnOnce(Arc<InMemoryStore>) -> Arc<dyn RefreshSessionRepository>,
    {
        let store = Arc::new(InMemoryStore::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .tweet_repo(store.clone())
            .comment_repo(store.clone())
            .session_repo(wrap(store.clone()))
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-that-is-long-enough",
                900,
                604_800,
            )))
            .password_service(Arc::new(PasswordService::new(PasswordPolicy::default())))
            .build()
            .unwrap();

        Self { store, ctx }
    }

    /// Insert a user directly, bypassing registration
    pub async fn user(&self, username: &str) -> User {
        let user = User::new(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
        });
        UserRepository::create(self.store.as_ref(), &user, "not-a-real-hash")
            .await
            .unwrap();
        user
    }
}

pub fn body(text: &str) -> AddTweetRequest {
    AddTweetRequest {
        body: Some(text.to_string()),
    }
}
