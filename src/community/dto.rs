use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub campus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub requested_at: Option<String>,
}

/// Profile returned by the circle batch endpoint; the timetable is
/// carried as opaque JSON and cached locally as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityProfile {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub timetable: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct FriendActionRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct CircleRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CampusUpdateRequest {
    pub campus: String,
}
