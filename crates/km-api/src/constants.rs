/// The default base URL for the Kebab Map REST API
pub const DEFAULT_API_URL: &str = "http://192.168.0.210:8000/api/";

/// The default base URL for the login and registration scripts
pub const DEFAULT_AUTH_URL: &str = "http://192.168.0.210/kebab_api/";

/// Number of listings shown per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Email stored when the login response carries none
pub const FALLBACK_EMAIL: &str = "unknown@example.com";

/// Keys under which the listing endpoint may wrap its records
pub const RECORD_WRAPPER_KEYS: [&str; 3] = ["items", "kebabs", "data"];

/// Environment overrides for the endpoint configuration
pub const API_URL_ENV: &str = "KEBABMAP_API_URL";
pub const AUTH_URL_ENV: &str = "KEBABMAP_AUTH_URL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_end_with_slash() {
        assert!(DEFAULT_API_URL.ends_with('/'));
        assert!(DEFAULT_AUTH_URL.ends_with('/'));
    }
}
