/*! Diagnostic dump

The corpus is written as a json object keyed by record index (`{"0": {...}, "1": {...}}`),
keys following corpus order,
in a file named after the sha256 of its content, so that dumping the same corpus twice
lands on the same file.
!*/
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::pivot::Pivot;

fn keyed(corpus: &[Pivot]) -> Result<Value, Error> {
    let mut map = Map::with_capacity(corpus.len());
    for (idx, pivot) in corpus.iter().enumerate() {
        map.insert(idx.to_string(), serde_json::to_value(pivot)?);
    }
    Ok(Value::Object(map))
}

/// Write the corpus into `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn persist_json(corpus: &[Pivot], dir: &Path) -> Result<PathBuf, Error> {
    if !dir.is_dir() {
        debug!("creating dump directory {:?}", dir);
        fs::create_dir_all(dir)?;
    }

    let serialized = serde_json::to_string(&keyed(corpus)?)?;
    let digest = Sha256::digest(serialized.as_bytes());
    let name = digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>();

    let path = dir.join(format!("{name}.json"));
    let mut f = File::create(&path)?;
    f.write_all(serialized.as_bytes())?;
    info!("dumped {} records to {:?}", corpus.len(), path);
    Ok(path)
}
