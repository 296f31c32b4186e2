//! Checks that the crate keeps `forbid(unsafe_code)` and avoids macros that expand to `allow(unsafe_code)`

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    fn sources(dir: &Path, out: &mut Vec<(String, String)>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for path in entries.filter_map(|entry| entry.ok().map(|e| e.path())) {
            if path.is_dir() {
                sources(&path, out);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let content = fs::read_to_string(&path).unwrap_or_default();
                out.push((path.display().to_string(), content));
            }
        }
    }

    // Tests the library root forbids unsafe code
    // Verified by relaxing the attribute to deny
    #[test]
    fn test_library_forbids_unsafe_code() {
        let lib = fs::read_to_string("src/lib.rs").expect("read src/lib.rs");

        assert!(lib.contains("#![forbid(unsafe_code)]"));
    }

    // Tests no source slices with ndarray's s! macro, which cannot compile under forbid
    // Verified by slicing a pixel lane with s![row, col, ..]
    #[test]
    fn test_no_slice_macro() {
        let mut files = Vec::new();
        sources(Path::new("src"), &mut files);
        assert!(!files.is_empty());

        let offending: Vec<&String> = files
            .iter()
            .filter(|(_, content)| content.contains("s!["))
            .map(|(path, _)| path)
            .collect();

        assert!(offending.is_empty(), "s! macro used in {offending:?}");
    }
}
