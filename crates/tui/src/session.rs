use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role of a chat line in the persisted AI assistant transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Durable session state: bearer token, display name, and the AI chat
/// transcript. Persisted as JSON so the session survives restarts.
///
/// Logout clears all three in a single save; a token without its
/// dependent state (or the reverse) must never be observable on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub chat: Vec<ChatMessage>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    pub session: Session,
}

impl SessionStore {
    /// Loads the session from `path`, falling back to an empty session when
    /// the file does not exist yet.
    pub fn load(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);
        let session = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Session::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, session })
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn login(&mut self, token: String, display_name: Option<String>) -> Result<()> {
        self.session.token = Some(token);
        if display_name.is_some() {
            self.session.display_name = display_name;
        }
        self.save()
    }

    pub fn push_chat(&mut self, message: ChatMessage) -> Result<()> {
        self.session.chat.push(message);
        self.save()
    }

    /// Clears token, display name and chat transcript in one atomic save.
    pub fn logout(&mut self) -> Result<()> {
        self.session = Session::default();
        self.save()
    }

    fn save(&self) -> Result<()> {
        write_json_file(&self.path, &self.session)
    }
}

fn write_json_file(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(session)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> String {
        let dir = std::env::temp_dir().join("seyfo_tui_tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(format!("session_{tag}_{}.json", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_loads_empty_session() {
        let store = SessionStore::load(&temp_path("missing")).unwrap();
        assert!(!store.is_logged_in());
        assert!(store.session.chat.is_empty());
    }

    #[test]
    fn login_roundtrips_through_disk() {
        let path = temp_path("login");
        let mut store = SessionStore::load(&path).unwrap();
        store
            .login("tok-123".to_string(), Some("Kevin".to_string()))
            .unwrap();

        let reloaded = SessionStore::load(&path).unwrap();
        assert_eq!(reloaded.token(), Some("tok-123"));
        assert_eq!(reloaded.session.display_name.as_deref(), Some("Kevin"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn logout_clears_token_name_and_chat_together() {
        let path = temp_path("logout");
        let mut store = SessionStore::load(&path).unwrap();
        store
            .login("tok-456".to_string(), Some("Ayşe".to_string()))
            .unwrap();
        store
            .push_chat(ChatMessage {
                role: ChatRole::User,
                content: "Nakit durumum nasıl?".to_string(),
            })
            .unwrap();

        store.logout().unwrap();

        let reloaded = SessionStore::load(&path).unwrap();
        assert!(reloaded.token().is_none());
        assert!(reloaded.session.display_name.is_none());
        assert!(reloaded.session.chat.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
