//! Repository descriptor value object.

use crate::error::HoistError;

pub const DEFAULT_BRANCH: &str = "main";

/// The repository and branch a deploy is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    pub url: String,
    pub branch: String,
    /// Checkout directory name, derived from the URL
    pub local_name: String,
}

impl RepositoryDescriptor {
    pub fn new(url: &str, branch: Option<&str>) -> Result<Self, HoistError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(HoistError::input("repository", "repository URL is empty"));
        }

        let branch = branch.map(str::trim).filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BRANCH);
        if branch.starts_with('-') || branch.contains(char::is_whitespace) || branch.contains("..") {
            return Err(HoistError::input("branch", format!("'{branch}' is not a valid branch name")));
        }

        let local_name = derive_local_name(url).ok_or_else(|| {
            HoistError::input("repository", format!("cannot derive a directory name from '{url}'"))
        })?;

        Ok(Self {
            url: url.to_string(),
            branch: branch.to_string(),
            local_name,
        })
    }

    /// URL with an access token spliced in as HTTPS basic-auth user.
    ///
    /// Non-HTTPS URLs are returned unchanged; SSH remotes authenticate
    /// through the agent instead.
    pub fn authenticated_url(&self, token: Option<&str>) -> String {
        match (token, self.url.strip_prefix("https://")) {
            (Some(token), Some(rest)) if !token.is_empty() => {
                // Drop any credentials already in the URL.
                let rest = rest.split_once('@').map_or(rest, |(_, after)| after);
                format!("https://{token}@{rest}")
            }
            _ => self.url.clone(),
        }
    }
}

fn derive_local_name(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}
