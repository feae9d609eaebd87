//! Integration tests driving the `catalog-scaffold` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ROUTES: &str = "<?php

use Illuminate\\Support\\Facades\\Route;

Route::get('/', function () {
    return 'ok';
});
";

/// Project root with a routes file and a JSON schema describing `products`
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("routes")).unwrap();
    fs::write(dir.path().join("routes/web.php"), ROUTES).unwrap();

    let schema = serde_json::json!({
        "tables": {
            "products": [
                { "name": "id", "nullable": false, "type_name": "bigint" },
                { "name": "name", "nullable": false, "type_name": "varchar", "length": 120 },
                { "name": "price", "nullable": false, "type_name": "decimal" },
                { "name": "notes", "nullable": true, "type_name": "text" },
                { "name": "created_at", "nullable": true, "type_name": "timestamp" },
                { "name": "updated_at", "nullable": true, "type_name": "timestamp" }
            ]
        }
    });
    fs::write(dir.path().join("schema.json"), schema.to_string()).unwrap();
    dir
}

/// Run the binary inside `root` with a clean environment
fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_catalog-scaffold"))
        .args(args)
        .current_dir(root)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn generate(root: &Path, extra: &[&str]) -> Output {
    let mut args = vec!["generate", "products", "--schema-file", "schema.json"];
    args.extend_from_slice(extra);
    run(root, &args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_creates_every_artifact() {
    let dir = project();
    let output = generate(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    for path in [
        "app/Models/Product.php",
        "app/Http/Controllers/ProductController.php",
        "app/Http/Requests/ProductRequest.php",
        "database/seeders/ProductPermissionsSeeder.php",
        "resources/js/Pages/Product/Index.tsx",
        "resources/js/Pages/Product/Create.tsx",
        "resources/js/Pages/Product/Edit.tsx",
        "resources/js/Pages/Product/Form.tsx",
    ] {
        assert!(dir.path().join(path).is_file(), "{path} was not generated");
    }

    let request =
        fs::read_to_string(dir.path().join("app/Http/Requests/ProductRequest.php")).unwrap();
    assert!(request.contains("'name' => 'required|string|max:120',"));
    assert!(request.contains("'notes' => 'nullable|string',"));

    let routes = fs::read_to_string(dir.path().join("routes/web.php")).unwrap();
    assert!(routes.contains(
        "use Illuminate\\Support\\Facades\\Route;\nuse App\\Http\\Controllers\\ProductController;\n"
    ));
    assert!(routes.ends_with("Route::resource('products', ProductController::class);\n"));
    assert!(stdout(&output).contains("Next steps"));
}

#[test]
fn test_rerun_leaves_routes_untouched() {
    let dir = project();
    assert!(generate(dir.path(), &[]).status.success());
    let routes_once = fs::read_to_string(dir.path().join("routes/web.php")).unwrap();

    let output = generate(dir.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already exists"));
    assert_eq!(fs::read_to_string(dir.path().join("routes/web.php")).unwrap(), routes_once);
}

#[test]
fn test_missing_table_exits_with_one_and_writes_nothing() {
    let dir = project();
    let output = run(dir.path(), &["generate", "widgets", "--schema-file", "schema.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("widgets"));
    assert!(!dir.path().join("app").exists());
    assert_eq!(fs::read_to_string(dir.path().join("routes/web.php")).unwrap(), ROUTES);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = project();
    let output = generate(dir.path(), &["--dry-run"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Would generate"));
    assert!(!dir.path().join("app").exists());
    assert_eq!(fs::read_to_string(dir.path().join("routes/web.php")).unwrap(), ROUTES);
}

#[test]
fn test_missing_stub_is_partial_failure() {
    let dir = project();
    let stubs = dir.path().join("stubs");
    fs::create_dir_all(&stubs).unwrap();
    fs::write(stubs.join("model.stub"), "<?php // {{modelName}}\n").unwrap();

    let output = generate(dir.path(), &["--stubs", "stubs"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("partial"));
    assert_eq!(
        fs::read_to_string(dir.path().join("app/Models/Product.php")).unwrap(),
        "<?php // Product\n"
    );
}

#[test]
fn test_strict_placeholders_fail_the_artifact() {
    let dir = project();
    let output = run(dir.path(), &["templates", "init", "--dir", "stubs", "--force"]);
    assert!(output.status.success());
    fs::write(dir.path().join("stubs/model.stub"), "{{modelName}} {{unknownThing}}\n").unwrap();

    let output = generate(dir.path(), &["--stubs", "stubs", "--strict-placeholders"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("unknownThing"));
    assert!(!dir.path().join("app/Models/Product.php").exists());
    assert!(dir.path().join("app/Http/Controllers/ProductController.php").exists());
}

#[test]
fn test_initialized_stubs_are_used_by_generate() {
    let dir = project();
    let output = run(dir.path(), &["templates", "init", "--force"]);
    assert!(output.status.success());
    fs::write(dir.path().join("stubs/catalog/model.stub"), "CUSTOM {{modelName}}\n").unwrap();

    let output = generate(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        fs::read_to_string(dir.path().join("app/Models/Product.php")).unwrap(),
        "CUSTOM Product\n"
    );
}

#[test]
fn test_relative_stubs_flag_is_resolved_against_project_root() {
    let dir = project();
    let app = dir.path().join("app-root");
    fs::create_dir_all(app.join("routes")).unwrap();
    fs::write(app.join("routes/web.php"), ROUTES).unwrap();
    fs::create_dir_all(app.join("my-stubs")).unwrap();
    fs::write(app.join("my-stubs/model.stub"), "ROOTED {{modelName}}\n").unwrap();

    let output = generate(dir.path(), &["--project-root", "app-root", "--stubs", "my-stubs"]);
    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(app.join("app/Models/Product.php")).unwrap(),
        "ROOTED Product\n"
    );
}

#[test]
fn test_schema_command_lists_rules() {
    let dir = project();
    let output = run(dir.path(), &["schema", "products", "--schema-file", "schema.json"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("required|string|max:120"));
    assert!(out.contains("required|numeric"));
}

#[test]
fn test_config_file_changes_output_locations() {
    let dir = project();
    fs::write(
        dir.path().join("custom.toml"),
        "[paths]\nmodels = \"src/Domain\"\n",
    )
    .unwrap();

    let output = generate(dir.path(), &["--config", "custom.toml"]);
    assert!(output.status.success());
    assert!(dir.path().join("src/Domain/Product.php").is_file());
}
