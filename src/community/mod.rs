pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::AppError;
use dto::{
    CampusUpdateRequest, CircleRequest, CommunityProfile, Friend, FriendActionRequest,
    FriendRequest,
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct CommunityConfig {
    pub base_url: String,
    pub auth_token: String,
}

impl CommunityConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("COMMUNITY_BASE_URL")
            .map_err(|_| AppError::BadRequest("COMMUNITY_BASE_URL is not set".to_string()))?;
        let auth_token = env::var("COMMUNITY_TOKEN")
            .map_err(|_| AppError::BadRequest("COMMUNITY_TOKEN is not set".to_string()))?;

        Ok(Self {
            base_url,
            auth_token,
        })
    }
}

#[async_trait]
pub trait CommunityClient: Send + Sync {
    async fn fetch_friends(&self) -> Result<Vec<Friend>, AppError>;
    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, AppError>;
    async fn fetch_suggested_friends(&self) -> Result<Vec<Friend>, AppError>;
    async fn search_users(&self, query: &str) -> Result<Vec<Friend>, AppError>;
    async fn send_friend_request(&self, username: &str) -> Result<(), AppError>;
    async fn accept_friend_request(&self, username: &str) -> Result<(), AppError>;
    async fn reject_friend_request(&self, username: &str) -> Result<(), AppError>;
    async fn fetch_circle(&self, usernames: &[String]) -> Result<Vec<CommunityProfile>, AppError>;
    async fn update_campus(&self, campus: &str) -> Result<(), AppError>;
}

pub struct CommunityHttpClient {
    client: Client,
    config: CommunityConfig,
}

impl CommunityHttpClient {
    pub fn new(config: CommunityConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.config.auth_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET {}: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Community API error {}: {}",
                status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.config.auth_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("POST {}: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Community API error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl CommunityClient for CommunityHttpClient {
    async fn fetch_friends(&self) -> Result<Vec<Friend>, AppError> {
        self.get_json("/friends").await
    }

    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, AppError> {
        self.get_json("/friends/requests").await
    }

    async fn fetch_suggested_friends(&self) -> Result<Vec<Friend>, AppError> {
        self.get_json("/friends/suggested").await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<Friend>, AppError> {
        let response = self
            .client
            .get(self.url("/users/search"))
            .query(&[("q", query)])
            .bearer_auth(&self.config.auth_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET /users/search: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Community API error {}: {}",
                status, body
            )));
        }

        response
            .json::<Vec<Friend>>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse search response: {}", e)))
    }

    async fn send_friend_request(&self, username: &str) -> Result<(), AppError> {
        self.post_json(
            "/friends/requests",
            &FriendActionRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    async fn accept_friend_request(&self, username: &str) -> Result<(), AppError> {
        // Usernames travel in the body, never in a path segment.
        self.post_json(
            "/friends/requests/accept",
            &FriendActionRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    async fn reject_friend_request(&self, username: &str) -> Result<(), AppError> {
        self.post_json(
            "/friends/requests/reject",
            &FriendActionRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    async fn fetch_circle(&self, usernames: &[String]) -> Result<Vec<CommunityProfile>, AppError> {
        let body = CircleRequest {
            usernames: usernames.to_vec(),
        };
        let response = self
            .client
            .post(self.url("/circle"))
            .bearer_auth(&self.config.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("POST /circle: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Community API error {}: {}",
                status, body
            )));
        }

        response
            .json::<Vec<CommunityProfile>>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse circle response: {}", e)))
    }

    async fn update_campus(&self, campus: &str) -> Result<(), AppError> {
        self.post_json(
            "/profile/campus",
            &CampusUpdateRequest {
                campus: campus.to_string(),
            },
        )
        .await
    }
}

pub struct NoopCommunityClient;

#[async_trait]
impl CommunityClient for NoopCommunityClient {
    async fn fetch_friends(&self) -> Result<Vec<Friend>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_suggested_friends(&self) -> Result<Vec<Friend>, AppError> {
        Ok(Vec::new())
    }

    async fn search_users(&self, _query: &str) -> Result<Vec<Friend>, AppError> {
        Ok(Vec::new())
    }

    async fn send_friend_request(&self, _username: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn accept_friend_request(&self, _username: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn reject_friend_request(&self, _username: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_circle(&self, _usernames: &[String]) -> Result<Vec<CommunityProfile>, AppError> {
        Ok(Vec::new())
    }

    async fn update_campus(&self, _campus: &str) -> Result<(), AppError> {
        Ok(())
    }
}
