use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Manifest for the `utilitiestest` project: one target of its own and one
/// external target from the `basis` project.
pub const UTILITIESTEST_MANIFEST: &str = r#"
namespace = "utilitiestest"

[[target]]
name = "helloworld"
build_dir = "/build/utilitiestest/bin"
install_dir = "/usr/local/bin/utilitiestest"

[[target]]
namespace = "basis"
name = "basisproject.sh"
executable = "basisproject"
build_dir = "/opt/basis/bin"
"#;

/// Writes `contents` to `targets.toml` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_manifest(contents: &str) -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let path = Utf8PathBuf::from_path_buf(dir.path().join("targets.toml"))
        .unwrap_or_else(|path| panic!("non UTF-8 temp path: {}", path.display()));
    std::fs::write(&path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
    (dir, path)
}
