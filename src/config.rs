use crate::constants;

/// A table targeted for clearing. The label is display-only.
#[derive(Debug, Clone)]
pub struct TableTarget {
    pub name: String,
    pub label: String,
}

impl TableTarget {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Connection and target configuration, constructed explicitly and passed to
/// the store rather than captured from module scope.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: String,
    pub region: String,
    pub tables: Vec<TableTarget>,
}

impl Config {
    /// The fixed pairing system deployment: three tables, cleared in order.
    pub fn pairing_system() -> Self {
        Self {
            profile: constants::AWS_PROFILE.to_string(),
            region: constants::AWS_REGION.to_string(),
            tables: vec![
                TableTarget::new(constants::PLAYERS_TABLE, "1. Clearing Players Table"),
                TableTarget::new(constants::PAIRINGS_TABLE, "2. Clearing Pairings Table"),
                TableTarget::new(constants::REVEAL_STATE_TABLE, "3. Clearing Reveal State Table"),
            ],
        }
    }
}
