use crate::errors::AppError;
use crate::models::{Audience, Combo, ComboDetail, Greeting};
use rusqlite::{params, Connection};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, error, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS greetings (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        text  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS audiences (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        text  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS combos (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        greeting_id  INTEGER NOT NULL REFERENCES greetings(id),
        audience_id  INTEGER NOT NULL REFERENCES audiences(id),
        UNIQUE (greeting_id, audience_id)
    );
";

/// Location of the SQLite store. Holds no connection; every request opens its own [`Session`].
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn from_url(url: &str) -> Self {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        Self {
            path: PathBuf::from(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_schema(&self) -> Result<(), rusqlite::Error> {
        let session = self.open()?;
        session.conn.execute_batch(SCHEMA)?;
        info!("schema ready at {}", self.path.display());
        Ok(())
    }

    pub fn open(&self) -> Result<Session, rusqlite::Error> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        debug!("session opened on {}", self.path.display());
        Ok(Session { conn })
    }

    /// Runs `f` against a fresh session on the blocking pool. The session is
    /// closed before this returns, whether `f` succeeds or fails.
    pub async fn with_session<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Session) -> Result<T, rusqlite::Error> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            let session = db.open()?;
            f(&session)
        })
        .await?;

        result.map_err(|err| {
            error!("database error: {err}");
            AppError::from(err)
        })
    }
}

pub struct Session {
    conn: Connection,
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("session closed");
    }
}

impl Session {
    pub fn list_greetings(&self) -> Result<Vec<Greeting>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text FROM greetings ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Greeting {
                id: row.get(0)?,
                text: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    pub fn insert_greeting(&self, text: Option<&str>) -> Result<Greeting, rusqlite::Error> {
        self.conn.query_row(
            "INSERT INTO greetings (text) VALUES (?1) RETURNING id, text",
            params![text],
            |row| {
                Ok(Greeting {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            },
        )
    }

    pub fn list_audiences(&self) -> Result<Vec<Audience>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text FROM audiences ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Audience {
                id: row.get(0)?,
                text: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    pub fn insert_audience(&self, text: Option<&str>) -> Result<Audience, rusqlite::Error> {
        self.conn.query_row(
            "INSERT INTO audiences (text) VALUES (?1) RETURNING id, text",
            params![text],
            |row| {
                Ok(Audience {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            },
        )
    }

    pub fn list_combos(&self) -> Result<Vec<ComboDetail>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.greeting_id, c.audience_id, g.text, a.text
             FROM combos c
             JOIN greetings g ON c.greeting_id = g.id
             JOIN audiences a ON c.audience_id = a.id
             ORDER BY c.id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ComboDetail {
                id: row.get(0)?,
                greeting_id: row.get(1)?,
                audience_id: row.get(2)?,
                greeting_text: row.get(3)?,
                audience_text: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    pub fn insert_combo(
        &self,
        greeting_id: Option<i64>,
        audience_id: Option<i64>,
    ) -> Result<Combo, rusqlite::Error> {
        self.conn.query_row(
            "INSERT INTO combos (greeting_id, audience_id) VALUES (?1, ?2)
             RETURNING id, greeting_id, audience_id",
            params![greeting_id, audience_id],
            |row| {
                Ok(Combo {
                    id: row.get(0)?,
                    greeting_id: row.get(1)?,
                    audience_id: row.get(2)?,
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_db(name: &str) -> Database {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("greeting_combos_{name}_{}_{nanos}.db", std::process::id()));
        let db = Database::from_url(&format!("sqlite://{}", path.display()));
        db.ensure_schema().unwrap();
        db
    }

    #[test]
    fn url_prefixes_are_stripped() {
        assert_eq!(Database::from_url("sqlite:///tmp/a.db").path(), Path::new("/tmp/a.db"));
        assert_eq!(Database::from_url("sqlite:b.db").path(), Path::new("b.db"));
        assert_eq!(Database::from_url("c.db").path(), Path::new("c.db"));
    }

    #[test]
    fn combos_join_current_text_newest_first() {
        let db = scratch_db("join");
        let session = db.open().unwrap();
        let hello = session.insert_greeting(Some("Hello")).unwrap();
        let hi = session.insert_greeting(Some("Hi")).unwrap();
        let world = session.insert_audience(Some("World")).unwrap();

        session.insert_combo(Some(hello.id), Some(world.id)).unwrap();
        session.insert_combo(Some(hi.id), Some(world.id)).unwrap();

        let combos = session.list_combos().unwrap();
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].greeting_text, "Hi");
        assert_eq!(combos[1].greeting_text, "Hello");
        assert!(combos[0].id > combos[1].id);
    }

    #[test]
    fn constraints_reject_bad_combos() {
        let db = scratch_db("constraints");
        let session = db.open().unwrap();
        let hello = session.insert_greeting(Some("Hello")).unwrap();
        let world = session.insert_audience(Some("World")).unwrap();

        session.insert_combo(Some(hello.id), Some(world.id)).unwrap();
        assert!(session.insert_combo(Some(hello.id), Some(world.id)).is_err());
        assert!(session.insert_combo(Some(hello.id), Some(9999)).is_err());
        assert!(session.insert_combo(None, Some(world.id)).is_err());
        assert!(session.insert_greeting(None).is_err());
    }
}
