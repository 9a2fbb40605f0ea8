// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can do everything, bypasses per-record PINs
pub const ROLE_ADMIN: &str = "admin";

/// Management role - publishes announcements and triages complaints
pub const ROLE_MANAGEMENT: &str = "management";

/// Mart owner role - updates the mart status indicator
pub const ROLE_MART_OWNER: &str = "mart_owner";

// =============================================================================
// DOMAIN CONSTANTS
// =============================================================================

/// Document store collection holding management posts
pub const MANAGEMENT_POSTS_COLLECTION: &str = "managementPosts";

/// Filter value meaning "every category"; never stored on an ad
pub const ALL_ADS: &str = "All Ads";

/// Width the numeric part of a villa number is padded to
pub const VILLA_NUMBER_WIDTH: usize = 3;

/// Fallback message when the script reports failure without details
pub const UNKNOWN_SCRIPT_ERROR: &str = "An unknown error occurred in the script.";
