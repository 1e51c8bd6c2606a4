use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Name of the single slot holding the signed-in user.
pub const SESSION_KEY: &str = "userData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Parent,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Parent, Role::Faculty, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Parent => "Parent",
            Role::Faculty => "Faculty",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Identity captured at login and read back by the dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,
    pub role: Role,
    #[serde(rename = "college", alias = "institution")]
    pub institution: String,
    pub name: String,
    pub id: String,
}

/// Storage for the current session. Implementations keep exactly one record.
///
/// `load` never fails: an absent slot and an unreadable one both come back
/// as `None`, so callers only ever deal with "signed in" or "not signed in".
pub trait SessionRepository {
    fn save(&self, session: &SessionRecord) -> Result<(), SessionError>;
    fn load(&self) -> Option<SessionRecord>;
    fn clear(&self) -> Result<(), SessionError>;
}

impl<T: SessionRepository + ?Sized> SessionRepository for Box<T> {
    fn save(&self, session: &SessionRecord) -> Result<(), SessionError> {
        (**self).save(session)
    }

    fn load(&self) -> Option<SessionRecord> {
        (**self).load()
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

fn decode_record(raw: &str) -> Option<SessionRecord> {
    match serde_json::from_str::<SessionRecord>(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("[session] Ignoring unreadable {SESSION_KEY} record: {e}");
            None
        }
    }
}

/// Keeps the serialized record in memory. Gone when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts raw text into the slot as-is, bypassing serialization.
    pub fn put_raw(&self, raw: impl Into<String>) {
        *self.slot.write() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.read().clone()
    }
}

impl SessionRepository for MemorySessionStore {
    fn save(&self, session: &SessionRecord) -> Result<(), SessionError> {
        let json = serde_json::to_string(session)?;
        *self.slot.write() = Some(json);
        debug!("[session] Stored {SESSION_KEY} for {}", session.email);
        Ok(())
    }

    fn load(&self) -> Option<SessionRecord> {
        self.slot.read().as_deref().and_then(decode_record)
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.slot.write().take();
        Ok(())
    }
}

/// Keeps the record in `<base>/runtime/userData.json` so it survives a relaunch.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(base: &Path) -> Self {
        Self {
            path: session_path(base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

pub fn session_path(base: &Path) -> PathBuf {
    base.join("runtime").join(format!("{SESSION_KEY}.json"))
}

impl SessionRepository for FileSessionStore {
    fn save(&self, session: &SessionRecord) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        info!(
            "[session] Saved session for {} to {}",
            session.email,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Option<SessionRecord> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => decode_record(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("[session] Could not read {}: {e}", self.path.display());
                None
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("[session] Cleared {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
