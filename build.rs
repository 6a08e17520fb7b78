//! Build script to generate sprite manifests for WASM builds
//!
//! Scans assets/MainCharacters/ and writes a manifest.txt into each
//! character folder listing its PNG sheets, since WASM can't enumerate
//! directories at runtime.

use std::fs;
use std::path::Path;

fn png_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.to_ascii_lowercase() == "png")
                .unwrap_or(false)
        })
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    files.sort();
    files
}

fn main() {
    println!("cargo:rerun-if-changed=assets/MainCharacters");

    let characters_dir = Path::new("assets/MainCharacters");
    if !characters_dir.exists() {
        return;
    }

    let mut characters: Vec<_> = fs::read_dir(characters_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();

    characters.sort_by_key(|e| e.file_name());

    for character in characters {
        let dir = character.path();
        let sheets = png_files(&dir);

        let mut manifest = String::new();
        for sheet in &sheets {
            manifest.push_str(sheet);
            manifest.push('\n');
        }

        // Only touch the file when the listing changed
        let manifest_path = dir.join("manifest.txt");
        if fs::read_to_string(&manifest_path).ok().as_deref() != Some(manifest.as_str()) {
            fs::write(&manifest_path, manifest).unwrap();
        }
    }
}
