//! Pipeline ordering and fail-fast tests

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use crate::config::{BootstrapConfig, CommandPrefix, ExtraStage};
use crate::error::BootstrapError;
use crate::pipeline::{Pipeline, StageKind};
use crate::test_fixtures::{ScriptedRunner, create_project};
use crate::ui::RecordingReporter;

const PIP: &str = "pip install -r requirements.txt";
const APT_UPDATE: &str = "apt-get update";
const APT_INSTALL: &str = "apt-get install -y tesseract-ocr tesseract-ocr-eng";
const COLLECTSTATIC: &str = "python manage.py collectstatic --no-input";
const MIGRATE: &str = "python manage.py migrate";

fn default_pipeline(workdir: &std::path::Path) -> Pipeline {
    Pipeline::from_config(&BootstrapConfig::default(), workdir).unwrap()
}

#[test]
fn test_default_stage_order() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let kinds: Vec<StageKind> = pipeline.stages().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, StageKind::BUILTIN);
}

#[test]
fn test_plan_matches_build_script() {
    let temp = create_project();
    let plan: Vec<String> = default_pipeline(temp.path())
        .plan()
        .into_iter()
        .map(|p| p.command)
        .collect();
    assert_eq!(plan, [PIP, APT_UPDATE, APT_INSTALL, COLLECTSTATIC, MIGRATE]);
}

#[test]
fn test_all_steps_succeed() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default();
    let mut reporter = RecordingReporter::default();

    let report = pipeline.run(&mut runner, &mut reporter).unwrap();

    assert_eq!(runner.calls, [PIP, APT_UPDATE, APT_INSTALL, COLLECTSTATIC, MIGRATE]);
    assert_eq!(
        report.stages,
        ["dependencies", "system-packages", "static-assets", "migrations"]
    );
    assert_eq!(report.commands, 5);
    assert_eq!(reporter.events.last().map(String::as_str), Some("done 4"));
}

#[test]
fn test_dependency_failure_stops_everything() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default().fail_on("pip", 2);
    let mut reporter = RecordingReporter::default();

    let err = pipeline.run(&mut runner, &mut reporter).unwrap_err();

    assert_eq!(runner.calls, [PIP]);
    assert_eq!(err.exit_code(), 2);
    assert!(matches!(
        err,
        BootstrapError::StepFailed { ref stage, .. } if stage == "dependencies"
    ));
    assert_eq!(
        reporter.events,
        ["start 1/4 dependencies", "fail dependencies 2"]
    );
}

#[test]
fn test_package_index_failure_skips_install() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default().fail_on("update", 100);

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert_eq!(runner.calls, [PIP, APT_UPDATE]);
    assert_eq!(err.exit_code(), 100);
}

#[test]
fn test_system_package_failure_skips_assets_and_migrations() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    // "install" also appears in the pip command, so trigger on -y
    let mut runner = ScriptedRunner::default().fail_on("-y", 100);

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert_eq!(runner.calls, [PIP, APT_UPDATE, APT_INSTALL]);
    assert_eq!(err.exit_code(), 100);
}

#[test]
fn test_asset_failure_skips_migrations() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default().fail_on("collectstatic", 1);

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert_eq!(runner.calls, [PIP, APT_UPDATE, APT_INSTALL, COLLECTSTATIC]);
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_migration_failure_is_last() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default().fail_on("migrate", 5);

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert_eq!(runner.calls.len(), 5);
    assert_eq!(err.exit_code(), 5);
    assert!(err.to_string().contains(MIGRATE));
}

#[test]
fn test_missing_manifest_fails_first_step_without_running_pip() {
    let temp = create_project();
    std::fs::remove_file(temp.path().join("requirements.txt")).unwrap();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default();

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert!(runner.calls.is_empty());
    assert!(matches!(err, BootstrapError::ManifestNotFound { .. }));
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn test_empty_manifest_fails_first_step() {
    let temp = create_project();
    std::fs::write(temp.path().join("requirements.txt"), "# nothing yet\n").unwrap();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default();

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert!(runner.calls.is_empty());
    assert!(matches!(err, BootstrapError::ManifestEmpty { .. }));
}

#[test]
fn test_rerun_after_success_runs_same_commands() {
    let temp = create_project();
    let pipeline = default_pipeline(temp.path());
    let mut runner = ScriptedRunner::default();

    pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap();
    pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap();

    assert_eq!(runner.calls.len(), 10);
    assert_eq!(runner.calls[..5], runner.calls[5..]);
}

#[test]
fn test_empty_package_list_drops_system_stage() {
    let temp = create_project();
    let config = BootstrapConfig {
        system_packages: Vec::new(),
        ..BootstrapConfig::default()
    };
    let pipeline = Pipeline::from_config(&config, temp.path()).unwrap();
    let names: Vec<&str> = pipeline.stages().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["dependencies", "static-assets", "migrations"]);
}

#[test]
fn test_custom_commands_and_paths() {
    let temp = create_project();
    let config = BootstrapConfig {
        manifest: PathBuf::from("requirements/prod.txt"),
        pip: CommandPrefix::parse("python3 -m pip"),
        python: CommandPrefix::parse("python3"),
        manage: PathBuf::from("src/manage.py"),
        apt_get: CommandPrefix::parse("sudo apt-get"),
        system_packages: vec!["tesseract-ocr".to_string(), "tesseract-ocr-fra".to_string()],
        ..BootstrapConfig::default()
    };
    let pipeline = Pipeline::from_config(&config, temp.path()).unwrap();
    let plan: Vec<String> = pipeline.plan().into_iter().map(|p| p.command).collect();
    assert_eq!(
        plan,
        [
            "python3 -m pip install -r requirements/prod.txt",
            "sudo apt-get update",
            "sudo apt-get install -y tesseract-ocr tesseract-ocr-fra",
            "python3 src/manage.py collectstatic --no-input",
            "python3 src/manage.py migrate",
        ]
    );
    assert_eq!(
        pipeline.manifest_path(),
        temp.path().join("requirements/prod.txt")
    );
}

#[test]
fn test_extra_stages_run_after_migrations() {
    let temp = create_project();
    let config = BootstrapConfig {
        extra_stages: vec![ExtraStage {
            name: "create-superuser".to_string(),
            commands: vec![CommandPrefix::parse("python manage.py create_superuser")],
        }],
        ..BootstrapConfig::default()
    };
    let pipeline = Pipeline::from_config(&config, temp.path()).unwrap();
    let mut runner = ScriptedRunner::default().fail_on("create_superuser", 4);

    let err = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap_err();

    assert_eq!(runner.calls.len(), 6);
    assert_eq!(runner.calls[4], MIGRATE);
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = create_project();
    let config = BootstrapConfig {
        python: CommandPrefix::parse(""),
        ..BootstrapConfig::default()
    };
    let result = Pipeline::from_config(&config, temp.path());
    assert!(matches!(result, Err(BootstrapError::ConfigInvalid { .. })));
}

#[test]
fn test_skip_removes_named_stage() {
    let temp = create_project();
    let mut pipeline = default_pipeline(temp.path());
    pipeline.skip(&["system-packages".to_string()]).unwrap();

    let mut runner = ScriptedRunner::default();
    let report = pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap();

    assert_eq!(runner.calls, [PIP, COLLECTSTATIC, MIGRATE]);
    assert_eq!(report.stages.len(), 3);
}

#[test]
fn test_skip_dependencies_does_not_read_manifest() {
    let temp = create_project();
    std::fs::remove_file(temp.path().join("requirements.txt")).unwrap();
    let mut pipeline = default_pipeline(temp.path());
    pipeline.skip(&["dependencies".to_string()]).unwrap();

    let mut runner = ScriptedRunner::default();
    pipeline
        .run(&mut runner, &mut RecordingReporter::default())
        .unwrap();
    assert_eq!(runner.calls.first().map(String::as_str), Some(APT_UPDATE));
}

#[test]
fn test_skip_absent_builtin_is_accepted() {
    let temp = create_project();
    let config = BootstrapConfig {
        system_packages: Vec::new(),
        ..BootstrapConfig::default()
    };
    let mut pipeline = Pipeline::from_config(&config, temp.path()).unwrap();
    assert!(pipeline.skip(&["system-packages".to_string()]).is_ok());
}

#[test]
fn test_skip_unknown_stage_fails() {
    let temp = create_project();
    let mut pipeline = default_pipeline(temp.path());
    let err = pipeline.skip(&["deploy".to_string()]).unwrap_err();
    assert!(matches!(err, BootstrapError::UnknownStage { .. }));
    assert_eq!(pipeline.stages().len(), 4);
}

#[test]
fn test_plan_argv_keeps_words_intact() {
    let temp = create_project();
    let config = BootstrapConfig {
        python: CommandPrefix::new(["/opt/my python/bin/python"]),
        ..BootstrapConfig::default()
    };
    let pipeline = Pipeline::from_config(&config, temp.path()).unwrap();
    let plan = pipeline.plan();
    let migrate = plan.last().expect("plan should not be empty");
    assert_eq!(migrate.argv[0], "/opt/my python/bin/python");
    assert_eq!(migrate.command, "'/opt/my python/bin/python' manage.py migrate");
}
