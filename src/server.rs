use chrono::{DateTime, Utc};

use crate::{config::Config, identity::Identifier};

/// The identity of the local server, stamped onto most numeric replies.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub created: DateTime<Utc>,
}

impl ServerIdentity {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_creation_time(config, Utc::now())
    }

    #[must_use]
    pub fn with_creation_time(config: &Config, created: DateTime<Utc>) -> Self {
        Self {
            name: config.server_name.clone(),
            version: config.server_version.clone(),
            created,
        }
    }
}

impl Identifier for ServerIdentity {
    fn id(&self) -> &str {
        &self.name
    }

    fn public_id(&self) -> &str {
        &self.name
    }

    fn nick(&self) -> &str {
        &self.name
    }
}
