//! fixtures.rs
//!
//! Loading of the static JSON files that seed each list view.
//!
//! A fixture is a JSON array of objects. Loading never fails from the
//! caller's point of view: an unreadable or malformed file is logged and
//! the view starts empty.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::pipeline::Record;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a fixture body. Later rows that reuse an id are dropped.
pub fn parse_fixture<T>(path: &Path, raw: &str) -> Result<Vec<T>, FixtureError>
where
    T: Record + DeserializeOwned,
{
    let rows: Vec<T> = serde_json::from_str(raw).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dedupe(path, rows))
}

pub async fn read_fixture<T>(path: &Path) -> Result<Vec<T>, FixtureError>
where
    T: Record + DeserializeOwned,
{
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FixtureError::Io { path: path.to_path_buf(), source })?;
    parse_fixture(path, &raw)
}

/// Like [`read_fixture`], but any failure yields an empty collection.
pub async fn load_fixture<T>(path: &Path) -> Vec<T>
where
    T: Record + DeserializeOwned,
{
    match read_fixture(path).await {
        Ok(rows) => {
            info!("Loaded {} records from {}", rows.len(), path.display());
            rows
        }
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

fn dedupe<T: Record>(path: &Path, rows: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| {
            let fresh = seen.insert(row.id());
            if !fresh {
                warn!("Dropping duplicate id {} in {}", row.id(), path.display());
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingStatus, Room, RoomStatus, User};
    use std::io::Write;

    #[test]
    fn keeps_first_row_of_a_duplicated_id() {
        let raw = r#"[
            {"id": 1, "name": "Ana", "email": "ana@example.com"},
            {"id": 2, "name": "Budi", "email": "budi@example.com"},
            {"id": 1, "name": "Copy", "email": "copy@example.com"}
        ]"#;

        let users: Vec<User> = parse_fixture(Path::new("users.json"), raw).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Ana");
    }

    #[test]
    fn unreadable_cells_blank_only_their_row() {
        let raw = r#"[
            {"id": 1, "name": "Melati", "capacity": 8, "category": "Meeting", "price": 100, "status": "Available"},
            {"id": 2, "name": "Anggrek", "capacity": 20, "category": "Hall", "price": 300, "status": "Booked"}
        ]"#;

        let rooms: Vec<Room> = parse_fixture(Path::new("rooms.json"), raw).unwrap();

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].status, Some(RoomStatus::Available));
        assert_eq!(rooms[1].status, None);
        assert_eq!(rooms[1].name, "Anggrek");

        let raw = r#"[
            {"id": 1, "nama": "Ana", "ruangan": "Aula", "tanggal": "2025-13-40", "status": "Waiting"},
            {"id": 2, "nama": "Budi", "ruangan": "Aula", "tanggal": "2025-03-05", "status": "pending"}
        ]"#;

        let bookings: Vec<Booking> = parse_fixture(Path::new("bookings.json"), raw).unwrap();

        assert_eq!(bookings.len(), 2);
        assert_eq!((bookings[0].date, bookings[0].status), (None, None));
        assert_eq!(bookings[1].status, Some(BookingStatus::Pending));
    }

    #[test]
    fn rejects_non_array_documents() {
        let result = parse_fixture::<Room>(Path::new("room.json"), r#"{"id": 1}"#);
        assert!(matches!(result, Err(FixtureError::Parse { .. })));
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let rows: Vec<Booking> = load_fixture(Path::new("/definitely/not/here.json")).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_loads_as_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": 1, \"name\": ").unwrap();

        let rows: Vec<Room> = load_fixture(file.path()).await;

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn reads_rooms_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "nama": "Melati", "kapasitas": 8, "kategori": "Meeting", "harga": 100, "status": "Available"}}]"#
        )
        .unwrap();

        let rooms: Vec<Room> = load_fixture(file.path()).await;

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Melati");
    }
}
