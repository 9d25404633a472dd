use admin_client::error::AdminClientError;
use admin_client::routes::LOGIN_PATH;
use admin_client::session::{Navigator, TokenStore};
use anyhow::{Context, Result};
use colored::Colorize;
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bearer token kept in a file, `~/.admin_token` unless overridden.
pub struct TokenManager {
    token_path: PathBuf,
}

impl TokenManager {
    pub fn new(custom_path: Option<PathBuf>) -> Result<Self> {
        let token_path = match custom_path {
            Some(path) => path,
            None => {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                home.join(".admin_token")
            }
        };

        Ok(Self { token_path })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    /// Writes the token into a file readable only by the owner.
    fn write(&self, token: &str) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.token_path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // mode() only applies to new files
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(token.as_bytes())?;
        file.sync_all()
    }
}

impl TokenStore for TokenManager {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.token_path) {
            Ok(token) => {
                let token = token.trim().to_string();
                (!token.is_empty()).then_some(token)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {:?}: {}", self.token_path, e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), AdminClientError> {
        self.write(token).map_err(|e| {
            AdminClientError::Storage(format!(
                "failed to save token to {:?}: {}",
                self.token_path, e
            ))
        })?;
        tracing::debug!("Token saved to {:?}", self.token_path);
        Ok(())
    }

    fn clear(&self) {
        match fs::remove_file(&self.token_path) {
            Ok(()) => tracing::debug!("Token file {:?} removed", self.token_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove token file {:?}: {}", self.token_path, e),
        }
    }
}

/// Terminal stand-in for page navigation. Being sent to the login page means
/// the session is gone, so it prints how to sign in again.
pub struct CliNavigator {
    current: RefCell<String>,
}

impl CliNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            current: RefCell::new(start.to_string()),
        }
    }
}

impl Navigator for CliNavigator {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        if path == LOGIN_PATH && self.current_path() != LOGIN_PATH {
            eprintln!(
                "{} {}",
                "→".yellow(),
                "Please login again: admin-cli login --email <email> --password <password>"
                    .yellow()
            );
        }
        *self.current.borrow_mut() = path.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TokenManager::new(Some(dir.path().join("token"))).unwrap();

        assert_eq!(manager.load(), None);
        manager.save("abc.def").unwrap();
        assert_eq!(manager.load().as_deref(), Some("abc.def"));
        manager.clear();
        assert_eq!(manager.load(), None);
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let manager = TokenManager::new(Some(dir.path().join("token"))).unwrap();
        manager.save("secret").unwrap();

        let mode = fs::metadata(manager.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_token_file_is_narrowed_and_truncated() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "a-much-longer-old-token").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let manager = TokenManager::new(Some(path)).unwrap();
        manager.save("new").unwrap();

        let mode = fs::metadata(manager.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(manager.load().as_deref(), Some("new"));
    }

    #[test]
    fn blank_file_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        let manager = TokenManager::new(Some(path)).unwrap();
        assert_eq!(manager.load(), None);
    }

    #[test]
    fn navigator_tracks_location() {
        let navigator = CliNavigator::new("/admin");
        navigator.navigate(LOGIN_PATH);
        assert_eq!(navigator.current_path(), LOGIN_PATH);
    }
}
