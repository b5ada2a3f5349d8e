use crate::alias::{AliasMapping, AliasTable};
use crate::error::ConfigError;
use crate::settings::AutoImportSettings;
use crate::tsconfig::PathsMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test directory");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn paths(entries: &[(&str, &[&str])]) -> PathsMap {
    entries
        .iter()
        .map(|(alias, targets)| {
            (
                alias.to_string(),
                targets.iter().map(|target| target.to_string()).collect(),
            )
        })
        .collect()
}

fn table(entries: &[(&str, &[&str])], base_dir: &str) -> AliasTable {
    AliasTable::new(
        Some(AliasMapping::from_paths(&paths(entries))),
        Some(PathBuf::from(base_dir)),
    )
}

#[test]
fn wildcard_entry_maps_declaring_file() {
    let table = table(&[("@shared/*", &["shared/*"])], "/ws");
    assert_eq!(
        table.alias_path_for(Path::new("/ws/shared/util.ts")),
        Some("@shared/util".to_string())
    );
    assert_eq!(
        table.alias_path_for(Path::new("/ws/shared/deep/nested/thing.ts")),
        Some("@shared/deep/nested/thing".to_string())
    );
}

#[test]
fn non_wildcard_entries_and_targets_are_ignored() {
    let table = table(
        &[
            ("@exact", &["shared/index.ts"]),
            ("@mixed/*", &["shared/index.ts", "mixed/*"]),
        ],
        "/ws",
    );
    assert_eq!(table.prefixes().len(), 1);
    assert_eq!(table.alias_path_for(Path::new("/ws/shared/index.ts")), None);
    assert_eq!(
        table.alias_path_for(Path::new("/ws/mixed/a.ts")),
        Some("@mixed/a".to_string())
    );
}

#[test]
fn first_declared_match_wins() {
    let table = table(
        &[("@libs/*", &["libs/*"]), ("@ui/*", &["libs/ui/*"])],
        "/ws",
    );
    assert_eq!(
        table.alias_path_for(Path::new("/ws/libs/ui/button.ts")),
        Some("@libs/ui/button".to_string())
    );
}

#[test]
fn prefix_match_respects_component_boundaries() {
    let table = table(&[("@shared/*", &["shared/*"])], "/ws");
    assert_eq!(table.alias_path_for(Path::new("/ws/shared2/util.ts")), None);
    assert_eq!(table.alias_path_for(Path::new("/ws/shared")), None);
}

#[test]
fn target_paths_are_normalized() {
    let table = table(&[("~/*", &["./src/../src/*"])], "/ws/app/./");
    assert_eq!(table.base_dir(), Some(Path::new("/ws/app")));
    assert_eq!(
        table.alias_path_for(Path::new("/ws/app/src/./models/user.ts")),
        Some("~/models/user".to_string())
    );
}

#[test]
fn only_ts_extension_is_stripped_from_alias_paths() {
    let table = table(&[("@shared/*", &["shared/*"])], "/ws");
    assert_eq!(
        table.alias_path_for(Path::new("/ws/shared/types.d.ts")),
        Some("@shared/types.d".to_string())
    );
    assert_eq!(
        table.alias_path_for(Path::new("/ws/shared/button.tsx")),
        Some("@shared/button.tsx".to_string())
    );
    assert_eq!(
        table.alias_path_for(Path::new("/ws/shared/legacy.js")),
        Some("@shared/legacy.js".to_string())
    );
}

#[test]
fn unconfigured_table_never_matches() {
    let no_base = AliasTable::new(
        Some(AliasMapping::from_paths(&paths(&[("@a/*", &["a/*"])]))),
        None,
    );
    assert!(!no_base.is_configured());
    assert_eq!(no_base.alias_path_for(Path::new("/ws/a/x.ts")), None);

    let no_mapping = AliasTable::new(None, Some(PathBuf::from("/ws")));
    assert_eq!(no_mapping.alias_path_for(Path::new("/ws/a/x.ts")), None);
}

#[test]
fn empty_target_lists_are_dropped() {
    let mapping = AliasMapping::from_paths(&paths(&[("@a/*", &[]), ("@b/*", &["b/*"])]));
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.entries()[0].alias_prefix, "@b/*");
}

#[test]
fn load_reads_root_tsconfig() {
    let temp = TempDir::new().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.json",
        r#"{
          // workspace-wide aliases
          "compilerOptions": {
            "baseUrl": "./",
            "paths": { "@shared/*": ["shared/*"] },
          },
        }"#,
    );

    let table = AliasTable::load(temp.path(), &AutoImportSettings::default()).expect("load");
    assert!(table.is_configured());
    assert_eq!(table.base_dir(), Some(temp.path()));
    assert_eq!(
        table.alias_path_for(&temp.path().join("shared/util.ts")),
        Some("@shared/util".to_string())
    );
}

#[test]
fn load_without_config_files_leaves_table_unset() {
    let temp = TempDir::new().expect("temp dir");
    let settings = AutoImportSettings::default().with_override_config_file("tsconfig.base.json");

    let table = AliasTable::load(temp.path(), &settings).expect("absence is not an error");
    assert_eq!(table, AliasTable::default());
}

#[test]
fn override_file_supersedes_defined_fields_only() {
    let temp = TempDir::new().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"baseUrl": "src", "paths": {"@old/*": ["old/*"]}}}"#,
    );
    write_file(
        temp.path(),
        "tsconfig.base.json",
        r#"{"compilerOptions": {"paths": {"@new/*": ["new/*"]}}}"#,
    );
    let settings = AutoImportSettings::default().with_override_config_file("tsconfig.base.json");

    let table = AliasTable::load(temp.path(), &settings).expect("load");
    assert_eq!(table.base_dir(), Some(temp.path().join("src").as_path()));
    let mapping = table.mapping().expect("mapping set");
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.entries()[0].alias_prefix, "@new/*");
    assert_eq!(
        table.alias_path_for(&temp.path().join("src/new/a.ts")),
        Some("@new/a".to_string())
    );
}

#[test]
fn base_url_resolves_against_workspace_root() {
    let temp = TempDir::new().expect("temp dir");
    write_file(
        temp.path(),
        "configs/tsconfig.paths.json",
        r#"{"compilerOptions": {"baseUrl": "libs", "paths": {"@lib/*": ["*"]}}}"#,
    );
    let settings =
        AutoImportSettings::default().with_override_config_file("configs/tsconfig.paths.json");

    let table = AliasTable::load(temp.path(), &settings).expect("load");
    assert_eq!(table.base_dir(), Some(temp.path().join("libs").as_path()));
}

#[test]
fn empty_paths_object_is_not_adopted() {
    let temp = TempDir::new().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"baseUrl": ".", "paths": {}}}"#,
    );

    let table = AliasTable::load(temp.path(), &AutoImportSettings::default()).expect("load");
    assert!(table.mapping().is_none());
    assert!(!table.is_configured());
}

#[test]
fn malformed_config_is_a_parse_error() {
    let temp = TempDir::new().expect("temp dir");
    write_file(temp.path(), "tsconfig.json", r#"{"compilerOptions": "#);

    let err = AliasTable::load(temp.path(), &AutoImportSettings::default())
        .expect_err("malformed config should error");
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}
