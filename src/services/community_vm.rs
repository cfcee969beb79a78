use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::community::CommunityClient;
use crate::community::dto::{CommunityProfile, Friend, FriendRequest};

/// Request/response forwarding into observable state. Each load posts
/// `Some(value)` on success and `None` on any failure; there is no
/// retry. Screens subscribe to the watch receivers for their visible
/// lifetime and drop them on teardown.
pub struct CommunityViewModel {
    client: Arc<dyn CommunityClient>,
    friends: watch::Sender<Option<Vec<Friend>>>,
    requests: watch::Sender<Option<Vec<FriendRequest>>>,
    suggested: watch::Sender<Option<Vec<Friend>>>,
    search_results: watch::Sender<Option<Vec<Friend>>>,
    circle: watch::Sender<Option<Vec<CommunityProfile>>>,
}

impl CommunityViewModel {
    pub fn new(client: Arc<dyn CommunityClient>) -> Self {
        Self {
            client,
            friends: watch::channel(None).0,
            requests: watch::channel(None).0,
            suggested: watch::channel(None).0,
            search_results: watch::channel(None).0,
            circle: watch::channel(None).0,
        }
    }

    pub fn subscribe_friends(&self) -> watch::Receiver<Option<Vec<Friend>>> {
        self.friends.subscribe()
    }

    pub fn subscribe_requests(&self) -> watch::Receiver<Option<Vec<FriendRequest>>> {
        self.requests.subscribe()
    }

    pub fn subscribe_suggested(&self) -> watch::Receiver<Option<Vec<Friend>>> {
        self.suggested.subscribe()
    }

    pub fn subscribe_search_results(&self) -> watch::Receiver<Option<Vec<Friend>>> {
        self.search_results.subscribe()
    }

    pub fn subscribe_circle(&self) -> watch::Receiver<Option<Vec<CommunityProfile>>> {
        self.circle.subscribe()
    }

    pub async fn load_friends(&self) {
        let result = self.client.fetch_friends().await;
        if let Err(e) = &result {
            warn!("failed to load friends: {}", e);
        }
        self.friends.send_replace(result.ok());
    }

    pub async fn load_requests(&self) {
        let result = self.client.fetch_friend_requests().await;
        if let Err(e) = &result {
            warn!("failed to load friend requests: {}", e);
        }
        self.requests.send_replace(result.ok());
    }

    pub async fn load_suggested(&self) {
        let result = self.client.fetch_suggested_friends().await;
        if let Err(e) = &result {
            warn!("failed to load suggested friends: {}", e);
        }
        self.suggested.send_replace(result.ok());
    }

    pub async fn search(&self, query: &str) {
        let result = self.client.search_users(query).await;
        if let Err(e) = &result {
            warn!("user search failed: {}", e);
        }
        self.search_results.send_replace(result.ok());
    }

    pub async fn load_circle(&self, usernames: &[String]) {
        let result = self.client.fetch_circle(usernames).await;
        if let Err(e) = &result {
            warn!("failed to load circle: {}", e);
        }
        self.circle.send_replace(result.ok());
    }

    /// Accepting reloads both lists on success; a failure posts an
    /// absent requests value instead.
    pub async fn accept_request(&self, username: &str) {
        match self.client.accept_friend_request(username).await {
            Ok(()) => {
                self.load_requests().await;
                self.load_friends().await;
            }
            Err(e) => {
                warn!("failed to accept friend request: {}", e);
                self.requests.send_replace(None);
            }
        }
    }

    pub async fn reject_request(&self, username: &str) {
        match self.client.reject_friend_request(username).await {
            Ok(()) => self.load_requests().await,
            Err(e) => {
                warn!("failed to reject friend request: {}", e);
                self.requests.send_replace(None);
            }
        }
    }

    pub async fn send_request(&self, username: &str) {
        match self.client.send_friend_request(username).await {
            Ok(()) => self.load_suggested().await,
            Err(e) => {
                warn!("failed to send friend request: {}", e);
                self.suggested.send_replace(None);
            }
        }
    }

    pub async fn update_campus(&self, campus: &str) -> bool {
        match self.client.update_campus(campus).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to update campus: {}", e);
                false
            }
        }
    }
}
