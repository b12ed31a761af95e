// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use anyhow::Result;
use cairn_core::FsError;
use cairn_io::FileSystem;
use common::{init_logger, BrokenArchive, MemoryArchive, MemoryPak};
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;

fn write_file(root: &Path, relative: &str, bytes: &[u8]) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

fn dir_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn test_directories_resolve_in_registration_order() -> Result<()> {
    init_logger();
    let first = tempdir()?;
    let second = tempdir()?;
    write_file(first.path(), "materials/wall.vmt", b"first")?;
    write_file(second.path(), "materials/wall.vmt", b"second")?;
    write_file(second.path(), "materials/floor.vmt", b"floor")?;

    let mut fs = FileSystem::new();
    fs.register_directory(dir_string(first.path()));
    fs.register_directory(dir_string(second.path()));

    assert_eq!(fs.read("materials/wall.vmt")?, b"first");
    assert_eq!(fs.read("materials/floor.vmt")?, b"floor");
    Ok(())
}

#[test]
fn test_pak_wins_regardless_of_registration_order() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "maps/cfg/demo.cfg", b"from directory")?;
    let pak = || MemoryPak::default().with("maps/cfg/demo.cfg", b"from pak");

    let mut pak_first = FileSystem::new();
    pak_first.register_pak(Box::new(pak()));
    pak_first.register_directory(dir_string(dir.path()));

    let mut pak_last = FileSystem::new();
    pak_last.register_directory(dir_string(dir.path()));
    pak_last.register_pak(Box::new(pak()));

    assert_eq!(pak_first.read("maps/cfg/demo.cfg")?, b"from pak");
    assert_eq!(pak_last.read("maps/cfg/demo.cfg")?, b"from pak");
    Ok(())
}

#[test]
fn test_empty_pak_result_falls_through() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "scripts/game.txt", b"directory")?;

    let mut fs = FileSystem::new();
    fs.register_pak(Box::new(MemoryPak::default().with("scripts/game.txt", b"")));
    fs.register_directory(dir_string(dir.path()));

    assert_eq!(fs.read("scripts/game.txt")?, b"directory");
    Ok(())
}

#[test]
fn test_lookup_ignores_case_and_separator_style() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "foo/bar.txt", b"bar")?;

    let mut fs = FileSystem::new();
    fs.register_directory(dir_string(dir.path()));

    assert_eq!(fs.read("Foo/Bar.TXT")?, fs.read("foo\\Bar.txt")?);

    let upper = fs.read("Foo/Missing.TXT").unwrap_err();
    let lower = fs.read("foo\\missing.txt").unwrap_err();
    assert!(upper.is_not_found() && lower.is_not_found());
    Ok(())
}

#[test]
fn test_unregister_directory_restores_resolution() -> Result<()> {
    let base = tempdir()?;
    let overlay = tempdir()?;
    write_file(base.path(), "sound/step.wav", b"base")?;
    write_file(overlay.path(), "sound/step.wav", b"overlay")?;
    write_file(overlay.path(), "sound/extra.wav", b"extra")?;

    let mut fs = FileSystem::new();
    fs.register_directory(dir_string(base.path()));
    let before = (fs.read("sound/step.wav")?, fs.contains("sound/extra.wav"));

    let overlay_dir = dir_string(overlay.path());
    fs.register_directory(overlay_dir.clone());
    assert!(fs.contains("sound/extra.wav"));
    fs.unregister_directory(&overlay_dir);

    let after = (fs.read("sound/step.wav")?, fs.contains("sound/extra.wav"));
    assert_eq!(before, after);
    assert_eq!(fs.list_search_paths(), vec![dir_string(base.path())]);
    Ok(())
}

#[test]
fn test_directories_shadow_archives() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "models/crate.mdl", b"loose")?;

    let mut fs = FileSystem::new();
    fs.register_archive(
        "/games/demo/demo/pak01_dir.vpk",
        Box::new(
            MemoryArchive::default()
                .with("models/crate.mdl", b"packed")
                .with("models/barrel.mdl", b"barrel"),
        ),
    );
    fs.register_directory(dir_string(dir.path()));

    assert_eq!(fs.read("models/crate.mdl")?, b"loose");
    assert_eq!(fs.read("Models\\Barrel.MDL")?, b"barrel");
    Ok(())
}

// Archive iteration order is unspecified, so every fixture below has at
// most one archive that can satisfy a given name.
#[test]
fn test_each_archive_is_searched() -> Result<()> {
    let mut fs = FileSystem::new();
    fs.register_archive("a", Box::new(MemoryArchive::default().with("a.txt", b"a")));
    fs.register_archive("b", Box::new(MemoryArchive::default().with("b.txt", b"b")));
    fs.register_archive("c", Box::new(MemoryArchive::default()));

    let mut reader = fs.resolve("A.TXT")?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    assert_eq!(bytes, b"a");
    assert_eq!(fs.read("b.txt")?, b"b");

    let mut keys: Vec<&str> = fs.archive_keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_not_found_carries_original_name() {
    let fs = FileSystem::new();
    match fs.resolve("Materials\\Missing.VMT") {
        Err(FsError::NotFound { name }) => assert_eq!(name, "Materials\\Missing.VMT"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty registry resolved a file"),
    };
}

#[test]
fn test_directory_at_lookup_path_is_a_miss() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("materials"))?;

    let mut fs = FileSystem::new();
    fs.register_directory(dir_string(dir.path()));
    fs.register_archive("pak01", Box::new(MemoryArchive::default().with("materials", b"entry")));

    assert_eq!(fs.read("materials")?, b"entry");
    Ok(())
}

#[test]
fn test_file_registered_as_directory_is_a_miss() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "gameinfo.txt", b"GameInfo {}")?;

    let mut fs = FileSystem::new();
    fs.register_directory(dir_string(&dir.path().join("gameinfo.txt")));
    fs.register_archive(
        "pak01",
        Box::new(MemoryArchive::default().with("materials/wall.vmt", b"packed wall")),
    );

    assert_eq!(fs.read("materials/wall.vmt")?, b"packed wall");
    assert!(fs.read("materials/floor.vmt").unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_archive_open_failure_is_propagated() {
    let mut fs = FileSystem::new();
    fs.register_archive("broken", Box::new(BrokenArchive));

    let err = fs.read("anything.txt").unwrap_err();
    assert!(matches!(err, FsError::Io { ref path, .. } if path == "broken:anything.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_existing_file_is_a_hard_error() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    write_file(dir.path(), "secret.txt", b"hidden")?;
    let file = dir.path().join("secret.txt");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o000))?;
    if fs::read(&file).is_ok() {
        // Running with privileges that bypass permission bits.
        return Ok(());
    }

    let mut registry = FileSystem::new();
    registry.register_directory(dir_string(dir.path()));
    registry.register_archive("pak01", Box::new(MemoryArchive::default().with("secret.txt", b"x")));

    let err = registry.read("secret.txt").unwrap_err();
    assert!(matches!(err, FsError::Io { .. }));
    Ok(())
}
