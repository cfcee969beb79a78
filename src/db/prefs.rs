use sqlx::SqlitePool;

/// Well-known preference keys written by the UI/network layer.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const USERNAME: &str = "username";
    pub const CAMPUS: &str = "campus";
    pub const PINNED_FRIENDS: &str = "pinned_friends";
    pub const COMMUNITY_TIMETABLE: &str = "community_timetable";
}

pub async fn get_pref(db: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT value FROM prefs WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
}

pub async fn set_pref(db: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO prefs (key, value) VALUES (?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_pref(db: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM prefs WHERE key = ?")
        .bind(key)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Pinned-friend slots, stored as a JSON array of usernames.
/// An unparsable stored value degrades to an empty list.
pub async fn get_pinned_friends(db: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let raw = get_pref(db, keys::PINNED_FRIENDS).await?;
    Ok(raw
        .and_then(|v| serde_json::from_str(&v).ok())
        .unwrap_or_default())
}

pub async fn set_pinned_friends(db: &SqlitePool, usernames: &[String]) -> Result<(), sqlx::Error> {
    let value = serde_json::to_string(usernames).unwrap_or_else(|_| "[]".to_string());
    set_pref(db, keys::PINNED_FRIENDS, &value).await
}

/// Cached community timetable blob, kept as opaque JSON.
pub async fn get_cached_timetable(
    db: &SqlitePool,
) -> Result<Option<serde_json::Value>, sqlx::Error> {
    let raw = get_pref(db, keys::COMMUNITY_TIMETABLE).await?;
    Ok(raw.and_then(|v| serde_json::from_str(&v).ok()))
}

pub async fn set_cached_timetable(
    db: &SqlitePool,
    timetable: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    set_pref(db, keys::COMMUNITY_TIMETABLE, &timetable.to_string()).await
}
