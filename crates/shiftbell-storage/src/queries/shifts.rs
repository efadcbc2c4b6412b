// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shift upsert and lookup queries.

use chrono::NaiveDate;
use rusqlite::params;
use shiftbell_core::date::{format_date, parse_date};
use shiftbell_core::{ShiftEntry, ShiftbellError};

use crate::database::{map_tr_err, Database};

const UPSERT_SQL: &str = "INSERT INTO shifts (date, shift) VALUES (?1, ?2)
     ON CONFLICT(date) DO UPDATE SET
         shift = excluded.shift,
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ShiftEntry> {
    let raw: String = row.get(0)?;
    let date = parse_date(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ShiftEntry {
        date,
        label: row.get(1)?,
    })
}

/// Insert or overwrite one shift.
pub async fn upsert_shift(db: &Database, entry: &ShiftEntry) -> Result<(), ShiftbellError> {
    let date = format_date(entry.date);
    let label = entry.label.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(UPSERT_SQL, params![date, label])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or overwrite many shifts inside a single transaction.
///
/// Either every entry is written or, on error, none are.
pub async fn upsert_shifts(db: &Database, entries: &[ShiftEntry]) -> Result<usize, ShiftbellError> {
    let rows: Vec<(String, String)> = entries
        .iter()
        .map(|e| (format_date(e.date), e.label.clone()))
        .collect();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(UPSERT_SQL)?;
                for (date, label) in &rows {
                    stmt.execute(params![date, label])?;
                }
            }
            tx.commit()?;
            Ok(rows.len())
        })
        .await
        .map_err(map_tr_err)
}

/// Get the shift stored for `date`.
pub async fn get_shift(
    db: &Database,
    date: NaiveDate,
) -> Result<Option<ShiftEntry>, ShiftbellError> {
    let key = format_date(date);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare_cached("SELECT date, shift FROM shifts WHERE date = ?1")?;
            match stmt.query_row(params![key], row_to_entry) {
                Ok(entry) => Ok(Some(entry)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List shifts in date order, optionally starting at `from`.
pub async fn list_shifts(
    db: &Database,
    from: Option<NaiveDate>,
    limit: usize,
) -> Result<Vec<ShiftEntry>, ShiftbellError> {
    let from = from.map(format_date);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date, shift FROM shifts
                 WHERE ?1 IS NULL OR date >= ?1
                 ORDER BY date ASC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![from, limit], row_to_entry)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrips() {
        let db = Database::open_in_memory().await.unwrap();
        upsert_shift(&db, &ShiftEntry::new(day(10), "Morning")).await.unwrap();

        let got = get_shift(&db, day(10)).await.unwrap();
        assert_eq!(got, Some(ShiftEntry::new(day(10), "Morning")));
    }

    #[tokio::test]
    async fn missing_date_is_none() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(get_shift(&db, day(11)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_label() {
        let db = Database::open_in_memory().await.unwrap();
        upsert_shift(&db, &ShiftEntry::new(day(10), "Morning")).await.unwrap();
        upsert_shift(&db, &ShiftEntry::new(day(10), "Afternoon")).await.unwrap();

        let got = get_shift(&db, day(10)).await.unwrap().unwrap();
        assert_eq!(got.label, "Afternoon");
        let all = list_shifts(&db, None, 10).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn batch_keeps_last_duplicate() {
        let db = Database::open_in_memory().await.unwrap();
        let written = upsert_shifts(
            &db,
            &[
                ShiftEntry::new(day(10), "Morning"),
                ShiftEntry::new(day(11), "Night"),
                ShiftEntry::new(day(10), "Afternoon"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(written, 3);
        assert_eq!(get_shift(&db, day(10)).await.unwrap().unwrap().label, "Afternoon");
        assert_eq!(get_shift(&db, day(11)).await.unwrap().unwrap().label, "Night");
    }

    #[tokio::test]
    async fn list_orders_by_date_and_honours_from_and_limit() {
        let db = Database::open_in_memory().await.unwrap();
        upsert_shifts(
            &db,
            &[
                ShiftEntry::new(day(12), "C"),
                ShiftEntry::new(day(10), "A"),
                ShiftEntry::new(day(11), "B"),
                ShiftEntry::new(day(13), "D"),
            ],
        )
        .await
        .unwrap();

        let labels: Vec<String> = list_shifts(&db, Some(day(11)), 2)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, ["B", "C"]);
    }
}
