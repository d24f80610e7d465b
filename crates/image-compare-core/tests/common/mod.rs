use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use image_compare_core::{Config, Toolkit};

/// Install a stub toolkit executable in `dir` that plays back a canned run
pub fn install_stub(dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(script.as_bytes()).unwrap();

    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
}

/// Script line a stub uses to record its argument list for later inspection
pub const RECORD_ARGS: &str = r#"printf '%s\n' "$@" > "$(dirname "$0")/args.txt""#;

/// Read back the argument list a stub recorded with [`RECORD_ARGS`]
pub fn recorded_args(dir: &Path) -> Vec<String> {
    let text = fs::read_to_string(dir.join("args.txt")).unwrap();
    text.lines().map(str::to_string).collect()
}

/// Config whose executable lookup resolves inside `dir`
pub fn stub_config(dir: &Path, toolkit: Toolkit) -> Config {
    Config {
        toolkit,
        app_path: Some(format!("{}/", dir.display())),
        ..Config::default()
    }
}
