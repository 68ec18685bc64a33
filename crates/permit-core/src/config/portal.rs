//! Route and delivery configuration.

use serde::{Deserialize, Serialize};

/// Routes the access gate redirects to, and where downloads land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Login page.
    #[serde(default = "default_login")]
    pub login_route: String,
    /// Home page for admins.
    #[serde(default = "default_admin_home")]
    pub admin_home: String,
    /// Home page for citizens.
    #[serde(default = "default_citizen_home")]
    pub citizen_home: String,
    /// Directory for downloaded permit documents.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_route: default_login(),
            admin_home: default_admin_home(),
            citizen_home: default_citizen_home(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_admin_home() -> String {
    "/admin/dashboard".to_string()
}

fn default_citizen_home() -> String {
    "/citizen/dashboard".to_string()
}

fn default_download_dir() -> String {
    "data/downloads".to_string()
}
