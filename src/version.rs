// Version information for the Customer Document Gateway

/// Application name reported by the health routes
pub const APPLICATION: &str = "Customer Data Search";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Upstream integration reported by the health routes
pub const INTEGRATION: &str = "Document Service API";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "rsa-oaep-key-transport",
    "aes-256-gcm-identifiers",
    "sliding-session-expiry",
    "document-passthrough",
];

/// Get formatted version string
pub fn get_version_string() -> String {
    format!("{} v{}", APPLICATION, VERSION_NUMBER)
}
