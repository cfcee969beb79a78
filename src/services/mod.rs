pub mod community_vm;
pub mod feeds;
pub mod maintenance;

pub use community_vm::CommunityViewModel;
pub use feeds::{NoteFeed, ReminderFeed};
pub use maintenance::{MAINTENANCE_PROBE_GREETING, MaintenanceChecker};
