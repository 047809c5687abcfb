//! A small shell script standing in for pipreqs
//!
//! Every `import X` line of the folder's scripts becomes `X==1.0.0`, every
//! `# pin REQUIREMENT` line is emitted verbatim, and folders whose path contains
//! `broken` fail the way a pipreqs crash would.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

const FAKE_PIPREQS: &str = r#"#!/bin/sh
dir="$1"
shift
savepath=""
while [ $# -gt 0 ]; do
  case "$1" in
    --savepath) savepath="$2"; shift 2 ;;
    --mode|--encoding|--ignore) shift 2 ;;
    *) shift ;;
  esac
done
case "$dir" in
  *broken*) echo "SyntaxError: invalid syntax" >&2; exit 1 ;;
esac
: > "$savepath"
for f in "$dir"/*.py; do
  [ -f "$f" ] || continue
  sed -n -e 's/^import \([A-Za-z0-9_]*\).*/\1==1.0.0/p' -e 's/^# pin //p' "$f" >> "$savepath"
done
"#;

/// Path of the fake pipreqs, written once per test binary
pub fn fake_pipreqs() -> &'static Path {
    static SCRIPT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = SCRIPT.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipreqs");
        fs::write(&path, FAKE_PIPREQS).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

/// Writes a Python script (or any file), creating parent folders
pub fn write_script(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
