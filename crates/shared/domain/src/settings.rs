use crate::ids::ConfigurationId;
use serde::{Deserialize, Serialize};

/// Site-wide settings editable by staff. At most one row ever exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfiguration {
    pub id: ConfigurationId,
    /// Where new-interest alerts are sent.
    pub notification_email: String,
}
