use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MEMORY_FILE_PATH: &str = "memory.json";

/// Where the memory document lives and how to reach it.
#[derive(Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: Option<String>,
    pub token: Option<String>,
    pub api_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let owner = var("GITHUB_OWNER").ok_or("GITHUB_OWNER must be set")?;
        let repo = var("GITHUB_REPO").ok_or("GITHUB_REPO must be set")?;
        let path = var("MEMORY_FILE_PATH")
            .map(|p| p.trim_start_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_MEMORY_FILE_PATH.to_string());
        if path.is_empty() {
            return Err("MEMORY_FILE_PATH must name a file".to_string());
        }

        let token = var("GITHUB_TOKEN");
        if token.is_none() {
            log::warn!(
                "[Config] GITHUB_TOKEN not set, writes to {}/{} will be rejected",
                owner,
                repo
            );
        }

        Ok(Self {
            owner,
            repo,
            path,
            branch: var("GITHUB_BRANCH"),
            token,
            api_url: var("GITHUB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER", "octo"),
            ("GITHUB_REPO", "notes"),
        ]))
        .unwrap();
        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "notes");
        assert_eq!(config.path, DEFAULT_MEMORY_FILE_PATH);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.branch.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER", "octo"),
            ("GITHUB_REPO", "notes"),
            ("MEMORY_FILE_PATH", "/bot/memory.json"),
            ("GITHUB_BRANCH", "memories"),
            ("GITHUB_TOKEN", "ghp_secret"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
        ]))
        .unwrap();
        assert_eq!(config.path, "bot/memory.json");
        assert_eq!(config.branch.as_deref(), Some("memories"));
        assert_eq!(config.token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_missing_repo() {
        let err = Config::from_lookup(lookup(&[("GITHUB_OWNER", "octo")])).unwrap_err();
        assert!(err.contains("GITHUB_REPO"));
    }

    #[test]
    fn test_blank_owner_is_missing() {
        let err = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER", "  "),
            ("GITHUB_REPO", "notes"),
        ]))
        .unwrap_err();
        assert!(err.contains("GITHUB_OWNER"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER", "octo"),
            ("GITHUB_REPO", "notes"),
            ("GITHUB_TOKEN", "ghp_secret"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }
}
