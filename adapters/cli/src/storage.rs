//! Level files on disk.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tracing::info;
use wise_mole_core::LEVEL_FILE_EXTENSION;
use wise_mole_world::World;

/// Reads a level file, naming the world after the file stem.
pub(crate) fn load_level_file(path: &Path) -> Result<World> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read level file {}", path.display()))?;
    let mut world = World::from_level_bytes(&bytes)
        .with_context(|| format!("failed to decode level file {}", path.display()))?;
    if let Some(stem) = path.file_stem() {
        world.set_name(stem.to_string_lossy());
    }
    Ok(world)
}

/// Appends the level extension unless the path already carries it.
#[must_use]
pub(crate) fn with_level_extension(path: &Path) -> PathBuf {
    if path
        .extension()
        .is_some_and(|extension| extension == LEVEL_FILE_EXTENSION)
    {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(LEVEL_FILE_EXTENSION);
    PathBuf::from(name)
}

/// Writes level bytes, refusing to replace an existing file unless `overwrite` is set.
///
/// Returns the path actually written, with the level extension applied.
pub(crate) fn save_level_bytes(path: &Path, bytes: &[u8], overwrite: bool) -> Result<PathBuf> {
    let path = with_level_extension(path);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    let _ = options.write(true);
    if overwrite {
        let _ = options.create(true).truncate(true);
    } else {
        let _ = options.create_new(true);
    }

    let mut file = match options.open(&path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::AlreadyExists => {
            bail!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }
        Err(error) => {
            return Err(error).with_context(|| format!("failed to create {}", path.display()));
        }
    };
    file.write_all(bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "level saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wise-mole-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn extension_is_appended_once() {
        assert_eq!(
            with_level_extension(Path::new("levels/first")),
            PathBuf::from("levels/first.wmgame")
        );
        assert_eq!(
            with_level_extension(Path::new("first.wmgame")),
            PathBuf::from("first.wmgame")
        );
        assert_eq!(
            with_level_extension(Path::new("first.txt")),
            PathBuf::from("first.txt.wmgame")
        );
    }

    #[test]
    fn saving_refuses_to_overwrite_without_force() {
        let dir = scratch_dir("overwrite");
        let target = dir.join("level");

        let written = save_level_bytes(&target, b"WMW\n", false).expect("first save succeeds");
        assert_eq!(written, dir.join("level.wmgame"));
        assert!(save_level_bytes(&target, b"WWW\n", false).is_err());
        assert_eq!(fs::read(&written).expect("file readable"), b"WMW\n");

        let _ = save_level_bytes(&target, b"WWW\n", true).expect("forced save succeeds");
        assert_eq!(fs::read(&written).expect("file readable"), b"WWW\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn loaded_world_is_named_after_file_stem() {
        let dir = scratch_dir("load");
        let written =
            save_level_bytes(&dir.join("corridor"), b"WWWWW\nWMBTW\nWWWWW\n", false)
                .expect("save succeeds");

        let world = load_level_file(&written).expect("level loads");
        assert_eq!(wise_mole_world::query::name(&world), "corridor");

        let _ = fs::remove_dir_all(&dir);
    }
}
