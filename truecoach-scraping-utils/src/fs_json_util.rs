use std::{
    fmt::Debug,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))()
        .with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        })
}

/// Like [`read_json`], but a missing file yields `T::default()`.
pub fn read_json_or_default<P: Into<PathBuf> + Debug, T: Default + for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    match File::open(&path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file)).with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Serializes `value` as compact JSON, replacing whatever `path` held.
pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.into();
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("While trying to write {path:?}"))?;
    writer.flush()?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{read_json, read_json_or_default, write_json};

    #[test]
    fn write_then_read_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_json(&path, &vec![1, 2, 3]).unwrap();
        write_json(&path, &vec![4]).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "[4]");
        assert_eq!(read_json::<_, Vec<u32>>(&path).unwrap(), vec![4]);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let res: BTreeMap<String, u32> =
            read_json_or_default(dir.path().join("absent.json")).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs_err::write(&path, "{").unwrap();
        assert!(read_json_or_default::<_, Vec<u32>>(&path).is_err());
    }
}
