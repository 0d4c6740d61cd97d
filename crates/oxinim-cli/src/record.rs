use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::schema::record::RecordedGame;

/// File name of a recording without the extension: `{first}_vs_{second}_{YYYYMMDD_HHMMSS}`.
fn file_stem(record: &RecordedGame) -> String {
    let [first, second] = &record.players;
    format!(
        "{}_vs_{}_{}",
        first.controller,
        second.controller,
        record.recorded_at.format("%Y%m%d_%H%M%S")
    )
}

/// Creates a new file named after `stem`, never replacing an existing one.
///
/// The first free name among `{stem}.json`, `{stem}_1.json`, `{stem}_2.json`,
/// and so on is taken.
fn create_unique(record_dir: &Path, stem: &str) -> anyhow::Result<(File, PathBuf)> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    for n in 0..u32::MAX {
        let filepath = if n == 0 {
            record_dir.join(format!("{stem}.json"))
        } else {
            record_dir.join(format!("{stem}_{n}.json"))
        };
        match options.open(&filepath) {
            Ok(file) => return Ok((file, filepath)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create file: {}", filepath.display()));
            }
        }
    }
    anyhow::bail!("No free file name for {stem} in {}", record_dir.display())
}

/// Writes `record` as pretty-printed JSON into `record_dir` and returns the file path.
///
/// Existing recordings are kept: a name clash gets a `_N` suffix.
pub(crate) fn save(record: &RecordedGame, record_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(record_dir)
        .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

    let (file, filepath) = create_unique(record_dir, &file_stem(record))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)
        .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

    tracing::info!(path = %filepath.display(), "recording saved");
    Ok(filepath)
}
