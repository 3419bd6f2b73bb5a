/// Fixed identity of the pairing system deployment. Credentials for the
/// named profile live in the shared AWS config, outside this tool.

pub const AWS_PROFILE: &str = "icup_website_user";
pub const AWS_REGION: &str = "us-east-1";

// Pairing system tables, cleared in this order
pub const PLAYERS_TABLE: &str = "icup-players";
pub const PAIRINGS_TABLE: &str = "icup-pairings";
pub const REVEAL_STATE_TABLE: &str = "icup-reveal-state";

/// Primary key attribute shared by every pairing system table.
pub const PRIMARY_KEY: &str = "id";
