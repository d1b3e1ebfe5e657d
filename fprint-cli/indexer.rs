use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

pub const CSV_HEADER: &str = "person_id,hand,finger,difficulty,alteration,filename,filepath";

/// One dataset sample, ready to be written as a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    pub person_id: String,
    pub hand: String,
    pub finger: String,
    pub difficulty: String,
    pub alteration: String,
    pub filename: String,
    pub filepath: PathBuf,
}

impl SampleRecord {
    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.person_id,
            self.hand,
            self.finger,
            self.difficulty,
            self.alteration,
            self.filename,
            self.filepath.display()
        )
    }
}

/// Fields parsed out of a sample file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub person_id: String,
    pub hand: String,
    pub finger: String,
}

/// Parses a file stem of the form `<digits>__<M|F>_<Left|Right>_<finger>`.
///
/// The finger part keeps any trailing alteration tag the capture tool
/// appended (e.g. `thumb_finger_Zcut`). Names outside the grammar yield
/// `None` and the caller skips them.
pub fn parse_sample_name(stem: &str) -> Option<ParsedName> {
    let (id, rest) = stem.split_once("__")?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut parts = rest.splitn(3, '_');
    let sex = parts.next()?;
    if sex != "M" && sex != "F" {
        return None;
    }
    let hand = parts.next()?;
    if hand != "Left" && hand != "Right" {
        return None;
    }
    let finger = parts.next()?;
    if finger.is_empty() {
        return None;
    }

    Some(ParsedName {
        person_id: id.to_string(),
        hand: hand.to_string(),
        finger: finger.to_string(),
    })
}

/// Walks a dataset tree and collects sample metadata.
///
/// Expected layout: `<root>/person_<id>/Original/*.png` plus
/// `<root>/person_<id>/Altered_<difficulty>/<alteration>/*.png`.
/// Traversal is sorted at every level so output order is stable;
/// entries that do not fit the layout or the name grammar are skipped.
pub fn index_dataset(root: &Path) -> PipelineResult<Vec<SampleRecord>> {
    let mut records = Vec::new();

    for person_dir in sorted_dirs(root)? {
        let person_name = file_name(&person_dir);
        let person_id = strip_person_prefix(&person_name);

        for group_dir in sorted_dirs(&person_dir)? {
            let group_name = file_name(&group_dir);
            if group_name.eq_ignore_ascii_case("original") {
                collect_samples(&group_dir, &person_id, "original", "none", &mut records)?;
            } else {
                let difficulty = group_name
                    .strip_prefix("Altered_")
                    .unwrap_or(&group_name)
                    .to_ascii_lowercase();
                for alteration_dir in sorted_dirs(&group_dir)? {
                    let alteration = file_name(&alteration_dir);
                    collect_samples(
                        &alteration_dir,
                        &person_id,
                        &difficulty,
                        &alteration,
                        &mut records,
                    )?;
                }
            }
        }
    }

    log::info!("indexed {} samples under {}", records.len(), root.display());
    Ok(records)
}

/// Writes the records as a 7-column CSV with a header row
pub fn write_csv(records: &[SampleRecord], path: &Path) -> PipelineResult<()> {
    let mut out = String::with_capacity(records.len() * 64 + CSV_HEADER.len());
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.csv_row());
        out.push('\n');
    }
    fs::write(path, out).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn collect_samples(
    dir: &Path,
    person_id: &str,
    difficulty: &str,
    alteration: &str,
    records: &mut Vec<SampleRecord>,
) -> PipelineResult<()> {
    for path in sorted_files(dir)? {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = match parse_sample_name(&stem) {
            Some(p) => p,
            None => {
                log::debug!("name outside grammar, skipping: {}", path.display());
                continue;
            }
        };
        records.push(SampleRecord {
            person_id: person_id.to_string(),
            hand: parsed.hand,
            finger: parsed.finger,
            difficulty: difficulty.to_string(),
            alteration: alteration.to_string(),
            filename: file_name(&path),
            filepath: path,
        });
    }
    Ok(())
}

fn strip_person_prefix(name: &str) -> String {
    // get() avoids slicing inside a multibyte character
    match name.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("person_") => name[7..].to_string(),
        _ => name.to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sorted_entries(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn sorted_dirs(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

fn sorted_files(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}
