//! End-to-end resolution behavior against real directory layouts.

use autoimport_common::to_forward_slashes;
use autoimport_config::{AliasMapping, AliasTable, PathsMap};
use autoimport_resolver::{Resolution, WorkspaceRegistry, resolve_import_path};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test directory");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn shared_table(base_dir: &Path) -> AliasTable {
    let mut paths = PathsMap::new();
    paths.insert("@shared/*".to_string(), vec!["shared/*".to_string()]);
    AliasTable::new(
        Some(AliasMapping::from_paths(&paths)),
        Some(base_dir.to_path_buf()),
    )
}

/// `/ws/shared` and `/ws/appA` are separate sub-projects; `/ws/libA` holds
/// two files under one boundary.
fn layout() -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    write_file(temp.path(), "shared/tsconfig.json", "{}");
    write_file(temp.path(), "appA/tsconfig.json", "{}");
    write_file(temp.path(), "libA/tsconfig.json", "{}");
    temp
}

#[test]
fn repeated_resolution_is_stable() {
    let temp = layout();
    let ws = temp.path();
    let table = shared_table(ws);

    let declaring = ws.join("shared/util.ts");
    let consuming = ws.join("appA/src/index.ts");
    let first = resolve_import_path(&table, &declaring, &consuming, ws);
    let second = resolve_import_path(&table, &declaring, &consuming, ws);
    assert_eq!(first, second);

    let declaring = ws.join("libA/src/foo.ts");
    let consuming = ws.join("libA/src/bar.ts");
    assert_eq!(
        resolve_import_path(&table, &declaring, &consuming, ws),
        resolve_import_path(&table, &declaring, &consuming, ws)
    );
}

#[test]
fn results_never_end_in_ts() {
    let temp = layout();
    let ws = temp.path();
    let table = shared_table(ws);

    let cases = [
        ("shared/util.ts", "appA/src/index.ts", "@shared/util"),
        ("shared/nested/types.d.ts", "appA/index.ts", "@shared/nested/types.d"),
        ("libA/src/foo.ts", "libA/src/bar.ts", "./foo"),
        ("libA/src/types.d.ts", "libA/src/bar.ts", "./types.d"),
    ];
    for (declaring, consuming, expected) in cases {
        let resolution = resolve_import_path(&table, &ws.join(declaring), &ws.join(consuming), ws);
        let spec = resolution.specifier().expect("resolvable");
        assert!(!spec.ends_with(".ts"), "{declaring} -> {spec}");
        assert_eq!(spec, expected);
    }
}

#[test]
fn sibling_in_same_boundary_is_dot_relative() {
    let temp = layout();
    let ws = temp.path();

    let resolution = resolve_import_path(
        &shared_table(ws),
        &ws.join("libA/src/foo.ts"),
        &ws.join("libA/src/bar.ts"),
        ws,
    );
    assert_eq!(resolution, Resolution::Relative("./foo".to_string()));
}

#[test]
fn alias_wins_across_boundaries() {
    let temp = layout();
    let ws = temp.path();

    let resolution = resolve_import_path(
        &shared_table(ws),
        &ws.join("shared/util.ts"),
        &ws.join("appA/src/index.ts"),
        ws,
    );
    assert_eq!(resolution, Resolution::Alias("@shared/util".to_string()));
}

#[test]
fn no_matching_prefix_is_not_resolvable() {
    let temp = layout();
    let ws = temp.path();
    let table = shared_table(ws);

    assert_eq!(
        resolve_import_path(&table, &ws.join("libA/src/foo.ts"), &ws.join("appA/x.ts"), ws),
        Resolution::NotResolvable
    );
    assert_eq!(
        resolve_import_path(
            &AliasTable::default(),
            &ws.join("shared/util.ts"),
            &ws.join("appA/src/index.ts"),
            ws
        ),
        Resolution::NotResolvable
    );
}

#[test]
fn files_without_any_boundary_resolve_relative() {
    let temp = TempDir::new().expect("temp dir");
    let ws = temp.path();
    write_file(ws, "tsconfig.json", "{}");

    let resolution = resolve_import_path(
        &shared_table(ws),
        &ws.join("shared/util.ts"),
        &ws.join("app/src/index.ts"),
        ws,
    );
    assert_eq!(
        resolution,
        Resolution::Relative("../../shared/util".to_string())
    );
}

#[test]
fn reload_is_never_observed_half_applied() {
    const CONFIG_A: &str =
        r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@a/*": ["shared/*"]}}}"#;
    const CONFIG_B: &str =
        r#"{"compilerOptions": {"baseUrl": "shared", "paths": {"@b/*": ["./*"]}}}"#;

    let temp = layout();
    let ws = temp.path().to_path_buf();
    write_file(&ws, "tsconfig.json", CONFIG_A);
    let registry = WorkspaceRegistry::default();
    let workspace = registry.workspace(&ws);

    let declaring = ws.join("shared/util.ts");
    let consuming = ws.join("appA/src/index.ts");
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let resolution = workspace.resolve_import_path(&declaring, &consuming);
                    let spec = resolution.specifier().unwrap_or("<none>");
                    assert!(
                        spec == "@a/util" || spec == "@b/util",
                        "mixed table observed: {spec}"
                    );
                }
            });
        }

        for round in 0..50 {
            let config = if round % 2 == 0 { CONFIG_B } else { CONFIG_A };
            write_file(&ws, "tsconfig.json", config);
            registry.reload(&ws).expect("reload");
        }
        done.store(true, Ordering::Relaxed);
    });

    assert_eq!(
        workspace.resolve_import_path(&declaring, &consuming),
        Resolution::Alias("@a/util".to_string())
    );
}

#[test]
fn separators_are_forward_slashes() {
    assert_eq!(to_forward_slashes(Path::new(r"..\lib\foo")), "../lib/foo");
}

#[cfg(windows)]
#[test]
fn windows_relative_paths_use_forward_slashes() {
    let resolution = resolve_import_path(
        &AliasTable::default(),
        Path::new(r"C:\ws\lib\shared\foo.ts"),
        Path::new(r"C:\ws\lib\src\bar.ts"),
        Path::new(r"C:\ws"),
    );
    assert_eq!(
        resolution,
        Resolution::Relative("../shared/foo".to_string())
    );
}
