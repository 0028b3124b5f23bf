use crate::catalog::Playlist;
use anyhow::{bail, Context, Result};
use log::debug;
use rusqlite::Connection;
use std::path::Path;

/// Connect to the catalog DB. If it doesn't exist, `SQLite` creates it.
/// Returns `rusqlite::Connection`.
pub fn connect(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Rusqlite DB connection refused. DB location: {db_path:?}"))?;

    Ok(conn)
}

/// Create the playlist table and load the imported catalog into it.
///
/// Refuses to clobber an existing database unless `force` is set; with
/// `force`, the old file is removed first so the import starts clean.
pub fn init(playlists: &[Playlist], db_path: &Path, force: bool) -> Result<Connection> {
    if db_path.exists() {
        if !force {
            bail!(
                "Database already exists at {}. Use --force to overwrite it.",
                db_path.display()
            );
        }
        std::fs::remove_file(db_path)
            .with_context(|| format!("Failed to remove existing database {}", db_path.display()))?;
    }

    let mut conn = connect(db_path).context("Connection refused when initializing DB.")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS playlist (
            id      TEXT NOT NULL,
            name    TEXT NOT NULL,
            genre   TEXT,
            UNIQUE(id, genre)
        )",
        (),
    )
    .with_context(|| format!("Invalid SQL command when CREATEing playlist TABLE in `{conn:?}`."))?;

    insert(playlists, &mut conn).with_context(|| {
        format!("Failed to INSERT playlists INTO database `{conn:?}` while initializing.")
    })?;

    Ok(conn)
}

/// Part of initialization: bulk-adds the imported playlists inside one
/// transaction with a prepared statement.
fn insert(playlists: &[Playlist], conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    {
        let mut stmt =
            tx.prepare("INSERT OR IGNORE INTO playlist (id, name, genre) VALUES (?1, ?2, ?3)")?;

        for playlist in playlists {
            stmt.execute((&playlist.id, &playlist.name, &playlist.genre))
                .with_context(|| {
                    format!(
                        "Invalid SQL statement when INSERTing Playlist INTO database!\nPlaylist: {playlist:?}"
                    )
                })?;
        }
    }

    tx.commit().context("Commiting SQL transaction failed.")?;
    debug!("Inserted {} playlist rows", playlists.len());
    Ok(())
}

/// Retrieves the whole playlist catalog, in insertion (rowid) order so the
/// pipeline sees the same catalog order every run.
pub fn retrieve_playlists(conn: &Connection) -> Result<Vec<Playlist>> {
    let mut stmt = conn
        .prepare("SELECT id, name, genre FROM playlist ORDER BY rowid")
        .with_context(|| {
            format!("Invalid SQL statement when SELECTing all FROM playlist in {conn:?}.")
        })?;

    let playlist_iter = stmt
        .query_map([], |row| {
            Ok(Playlist {
                id: row.get(0)?,
                name: row.get(1)?,
                genre: row.get(2)?,
            })
        })
        .context("Cannot query playlists.")?;

    let mut playlists: Vec<Playlist> = Vec::new();
    // Could use extend, but then no error handling.
    for playlist in playlist_iter {
        playlists.push(playlist.context("Queried playlist unwrap failed.")?);
    }

    Ok(playlists)
}

/// Number of catalog rows (not distinct playlist ids).
pub fn count_playlists(conn: &Connection) -> Result<u32> {
    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM playlist")
        .context("Could not count database entries.")?;

    let rows: u32 = stmt
        .query_row([], |row| row.get(0))
        .context("Failed to count playlist rows.")?;
    Ok(rows)
}
