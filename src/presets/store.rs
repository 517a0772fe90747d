//! SQLite access to the `presets` table.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{PrefsError, Result};
use crate::presets::file::{load_preset, save_preset};
use crate::presets::row::{AutoApplyFilter, PresetRow};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS presets (
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    operation TEXT NOT NULL,
    op_version INTEGER NOT NULL,
    op_params BLOB,
    enabled INTEGER NOT NULL DEFAULT 1,
    blendop_params BLOB,
    blendop_version INTEGER NOT NULL DEFAULT 1,
    model TEXT NOT NULL DEFAULT '%',
    maker TEXT NOT NULL DEFAULT '%',
    lens TEXT NOT NULL DEFAULT '%',
    iso_min REAL NOT NULL DEFAULT 0,
    iso_max REAL NOT NULL DEFAULT 3.4028234663852886e38,
    exposure_min REAL NOT NULL DEFAULT 0,
    exposure_max REAL NOT NULL DEFAULT 3.4028234663852886e38,
    aperture_min REAL NOT NULL DEFAULT 0,
    aperture_max REAL NOT NULL DEFAULT 3.4028234663852886e38,
    focal_length_min REAL NOT NULL DEFAULT 0,
    focal_length_max REAL NOT NULL DEFAULT 1000,
    writeprotect INTEGER NOT NULL DEFAULT 0,
    autoapply INTEGER NOT NULL DEFAULT 0
);
CREATE UNIQUE INDEX IF NOT EXISTS presets_idx ON presets(name, operation, op_version);";

const COLUMNS: &str = "rowid, name, description, operation, op_version, op_params, enabled, \
     blendop_params, blendop_version, model, maker, lens, iso_min, iso_max, exposure_min, \
     exposure_max, aperture_min, aperture_max, focal_length_min, focal_length_max, \
     writeprotect, autoapply";

fn read_row(row: &Row<'_>) -> rusqlite::Result<PresetRow> {
    let real = |i: usize| -> rusqlite::Result<f32> { Ok(row.get::<_, f64>(i)? as f32) };
    Ok(PresetRow {
        rowid: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        operation: row.get(3)?,
        op_version: row.get(4)?,
        op_params: row.get::<_, Option<Vec<u8>>>(5)?.unwrap_or_default(),
        enabled: row.get(6)?,
        blendop_params: row.get::<_, Option<Vec<u8>>>(7)?.unwrap_or_default(),
        blendop_version: row.get(8)?,
        filter: AutoApplyFilter {
            model: row.get(9)?,
            maker: row.get(10)?,
            lens: row.get(11)?,
            iso_min: real(12)?,
            iso_max: real(13)?,
            exposure_min: real(14)?,
            exposure_max: real(15)?,
            aperture_min: real(16)?,
            aperture_max: real(17)?,
            focal_length_min: real(18)?,
            focal_length_max: real(19)?,
        },
        write_protect: row.get(20)?,
        autoapply: row.get(21)?,
    })
}

pub struct PresetStore {
    conn: Connection,
}

impl PresetStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PrefsError::io("create", parent, e))?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Every preset, ordered by operation then name.
    pub fn list(&self) -> Result<Vec<PresetRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM presets ORDER BY operation, name"))?;
        let rows = stmt.query_map([], read_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, rowid: i64) -> Result<PresetRow> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM presets WHERE rowid = ?1"),
                params![rowid],
                read_row,
            )
            .optional()?
            .ok_or(PrefsError::PresetNotFound(rowid))
    }

    /// Deletes a writable preset and returns what was deleted.
    pub fn delete(&self, rowid: i64) -> Result<PresetRow> {
        let row = self.get(rowid)?;
        if row.write_protect {
            return Err(PrefsError::WriteProtected(rowid));
        }
        self.conn.execute(
            "DELETE FROM presets WHERE rowid = ?1 AND writeprotect = 0",
            params![rowid],
        )?;
        tracing::info!(rowid, operation = %row.operation, name = %row.name, "deleted preset");
        Ok(row)
    }

    /// Stores the editable fields of a writable preset.
    pub fn update(&self, row: &PresetRow) -> Result<()> {
        let f = &row.filter;
        let changed = self.conn.execute(
            "UPDATE presets SET name = ?1, description = ?2, autoapply = ?3, model = ?4,
                 maker = ?5, lens = ?6, iso_min = ?7, iso_max = ?8, exposure_min = ?9,
                 exposure_max = ?10, aperture_min = ?11, aperture_max = ?12,
                 focal_length_min = ?13, focal_length_max = ?14
             WHERE rowid = ?15 AND writeprotect = 0",
            params![
                row.name,
                row.description,
                row.autoapply,
                f.model,
                f.maker,
                f.lens,
                f64::from(f.iso_min),
                f64::from(f.iso_max),
                f64::from(f.exposure_min),
                f64::from(f.exposure_max),
                f64::from(f.aperture_min),
                f64::from(f.aperture_max),
                f64::from(f.focal_length_min),
                f64::from(f.focal_length_max),
                row.rowid,
            ],
        )?;
        if changed == 0 {
            // distinguish a protected row from a missing one
            let existing = self.get(row.rowid)?;
            return Err(PrefsError::WriteProtected(existing.rowid));
        }
        Ok(())
    }

    /// Inserts a preset, replacing one with the same name, operation and
    /// version. Returns the new rowid.
    pub fn insert(&self, row: &PresetRow) -> Result<i64> {
        let f = &row.filter;
        self.conn.execute(
            "INSERT OR REPLACE INTO presets (name, description, operation, op_version, op_params,
                 enabled, blendop_params, blendop_version, model, maker, lens, iso_min, iso_max,
                 exposure_min, exposure_max, aperture_min, aperture_max, focal_length_min,
                 focal_length_max, writeprotect, autoapply)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                 ?18, ?19, ?20, ?21)",
            params![
                row.name,
                row.description,
                row.operation,
                row.op_version,
                row.op_params,
                row.enabled,
                row.blendop_params,
                row.blendop_version,
                f.model,
                f.maker,
                f.lens,
                f64::from(f.iso_min),
                f64::from(f.iso_max),
                f64::from(f.exposure_min),
                f64::from(f.exposure_max),
                f64::from(f.aperture_min),
                f64::from(f.aperture_max),
                f64::from(f.focal_length_min),
                f64::from(f.focal_length_max),
                row.write_protect,
                row.autoapply,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Writes every writable preset into `dir`, creating it if needed.
    /// Returns how many files were written. When a write fails, the files
    /// written by this call are removed again.
    pub fn export_all(&self, dir: &Path) -> Result<usize> {
        fs::create_dir_all(dir).map_err(|e| PrefsError::io("create", dir, e))?;
        let rows = {
            let mut stmt = self.conn.prepare(&format!(
                "SELECT {COLUMNS} FROM presets WHERE writeprotect = 0 ORDER BY operation, name"
            ))?;
            let rows = stmt.query_map([], read_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut written = Vec::with_capacity(rows.len());
        for row in &rows {
            match save_preset(row, dir) {
                Ok(path) => written.push(path),
                Err(e) => {
                    for path in &written {
                        if let Err(remove) = fs::remove_file(path) {
                            tracing::warn!(path = %path.display(), error = %remove, "failed to remove partial export");
                        }
                    }
                    return Err(e);
                }
            }
        }
        tracing::info!(dir = %dir.display(), written = written.len(), "exported presets");
        Ok(written.len())
    }

    /// Imports preset files. Files that cannot be read or stored are logged
    /// and skipped; returns the number imported.
    pub fn import_files(&self, paths: &[PathBuf]) -> usize {
        let mut imported = 0;
        for path in paths {
            match load_preset(path).and_then(|row| self.insert(&row)) {
                Ok(_) => imported += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to import preset")
                }
            }
        }
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(rows: &[PresetRow]) -> PresetStore {
        let store = PresetStore::open_in_memory().unwrap();
        for row in rows {
            store.insert(row).unwrap();
        }
        store
    }

    #[test]
    fn test_list_order() {
        let store = store_with(&[
            PresetRow::new("sharpen", "strong"),
            PresetRow::new("exposure", "bright"),
            PresetRow::new("exposure", "+1 EV"),
        ]);
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| format!("{}/{}", r.operation, r.name))
            .collect();
        assert_eq!(names, ["exposure/+1 EV", "exposure/bright", "sharpen/strong"]);
    }

    #[test]
    fn test_filter_round_trips_through_real_columns() {
        let mut row = PresetRow::new("exposure", "night");
        row.filter.iso_min = 1600.0;
        row.filter.exposure_min = 1.0 / 60.0;
        let store = store_with(&[row.clone()]);
        let stored = &store.list().unwrap()[0];
        assert_eq!(stored.filter, row.filter);
    }

    #[test]
    fn test_delete_honours_write_protection() {
        let mut protected = PresetRow::new("exposure", "builtin");
        protected.write_protect = true;
        let store = store_with(&[protected, PresetRow::new("exposure", "mine")]);
        let rows = store.list().unwrap();

        let builtin = rows.iter().find(|r| r.name == "builtin").unwrap();
        assert!(matches!(
            store.delete(builtin.rowid),
            Err(PrefsError::WriteProtected(_))
        ));

        let mine = rows.iter().find(|r| r.name == "mine").unwrap();
        assert_eq!(store.delete(mine.rowid).unwrap().name, "mine");
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(matches!(store.get(mine.rowid), Err(PrefsError::PresetNotFound(_))));
    }

    #[test]
    fn test_insert_replaces_same_identity() {
        let store = store_with(&[PresetRow::new("exposure", "bright")]);
        let mut again = PresetRow::new("exposure", "bright");
        again.description = "brighter".to_string();
        store.insert(&again).unwrap();
        let rows = store.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "brighter");
    }

    #[test]
    fn test_update() {
        let store = store_with(&[PresetRow::new("exposure", "bright")]);
        let mut row = store.list().unwrap().remove(0);
        row.autoapply = true;
        row.filter.lens = "Summicron%".to_string();
        store.update(&row).unwrap();
        assert_eq!(store.get(row.rowid).unwrap(), row);
    }

    #[test]
    fn test_export_skips_protected_and_import_skips_bad_files() {
        let mut protected = PresetRow::new("exposure", "builtin");
        protected.write_protect = true;
        let store = store_with(&[protected, PresetRow::new("sharpen", "strong")]);
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(store.export_all(dir.path()).unwrap(), 1);
        let exported = dir.path().join("sharpen_strong.lpreset");
        assert!(exported.exists());

        let garbage = dir.path().join("garbage.lpreset");
        std::fs::write(&garbage, "not a preset").unwrap();
        let missing = dir.path().join("missing.lpreset");

        let fresh = PresetStore::open_in_memory().unwrap();
        assert_eq!(fresh.import_files(&[garbage, exported, missing]), 1);
        assert_eq!(fresh.list().unwrap()[0].name, "strong");
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let store = store_with(&[PresetRow::new("sharpen", "strong")]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("presets").join("export");

        assert_eq!(store.export_all(&out).unwrap(), 1);
        assert!(out.join("sharpen_strong.lpreset").exists());
    }

    #[test]
    fn test_failed_export_removes_written_files() {
        let store = store_with(&[
            PresetRow::new("exposure", "bright"),
            PresetRow::new("exposure", "dark"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        // a directory where the second file should go makes its write fail
        fs::create_dir(dir.path().join("exposure_dark.lpreset")).unwrap();

        assert!(store.export_all(dir.path()).is_err());
        assert!(!dir.path().join("exposure_bright.lpreset").exists());
    }
}
