//! Integration tests for the args pipeline module.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cgr::args::{
    build_command_list, classify, extract_options, option_registry, plan, project_with_version,
    Classification, CommandSpec, ProjectSet,
};
use cgr::config::Options;
use cgr::{Application, CgrError};

fn raw_args(args: Vec<&str>) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

fn argv(args: Vec<&str>) -> Vec<OsString> {
    let mut v = vec![OsString::from("cgr")];
    v.extend(raw_args(args));
    v
}

fn options() -> Options {
    Options {
        composer_path: "composer".into(),
        base_dir: "/base".into(),
        bin_dir: "/bin-dir".into(),
    }
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn global_require(classification: Classification) -> (ProjectSet, Vec<OsString>) {
    match classification {
        Classification::GlobalRequire {
            projects,
            composer_args,
        } => (projects, composer_args),
        Classification::Passthrough(args) => panic!("expected global require, got passthrough {args:?}"),
    }
}

// =============================================================================
// OPTION EXTRACTOR TESTS
// =============================================================================

#[test]
fn extract_sets_options_and_leaves_nothing() {
    let defaults = Options::defaults(Path::new("/home/u"));
    let extracted = extract_options(
        &argv(vec!["--composer-path", "/usr/bin/composer", "--base-dir", "/tmp"]),
        &option_registry(),
        &defaults,
    )
    .unwrap();

    assert!(extracted.remaining.is_empty());
    assert_eq!(extracted.options.composer_path, "/usr/bin/composer");
    assert_eq!(extracted.options.base_dir, "/tmp");
    assert_eq!(extracted.options.bin_dir, "/home/u/.composer/vendor/bin");
}

#[test]
fn extract_discards_program_name_and_keeps_order() {
    let extracted = extract_options(
        &argv(vec!["global", "--bin-dir", "/b", "require", "--no-dev", "a/b"]),
        &option_registry(),
        &options(),
    )
    .unwrap();

    assert_eq!(extracted.remaining, raw_args(vec!["global", "require", "--no-dev", "a/b"]));
    assert_eq!(extracted.options.bin_dir, "/b");
}

#[test]
fn extract_trailing_option_is_malformed() {
    let err = extract_options(
        &argv(vec!["global", "require", "--composer-path"]),
        &option_registry(),
        &options(),
    )
    .unwrap_err();

    match &err {
        CgrError::MalformedOption { option } => assert_eq!(option, "composer-path"),
        other => panic!("expected MalformedOption, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn extract_ignores_unknown_and_equals_forms() {
    let extracted = extract_options(
        &argv(vec!["--base-dir=/x", "--prefer-dist", "--bin-dirs", "y"]),
        &option_registry(),
        &options(),
    )
    .unwrap();

    assert_eq!(
        extracted.remaining,
        raw_args(vec!["--base-dir=/x", "--prefer-dist", "--bin-dirs", "y"])
    );
    assert_eq!(extracted.options, options());
}

#[test]
fn extract_last_occurrence_wins() {
    let extracted = extract_options(
        &argv(vec!["--base-dir", "/one", "--base-dir", "/two"]),
        &option_registry(),
        &options(),
    )
    .unwrap();
    assert_eq!(extracted.options.base_dir, "/two");
}

#[test]
fn extract_empty_argv() {
    let extracted = extract_options(&[], &option_registry(), &options()).unwrap();
    assert!(extracted.remaining.is_empty());
    assert_eq!(extracted.options, options());
}

// =============================================================================
// CLASSIFIER TESTS
// =============================================================================

#[test]
fn classify_projects_with_both_version_styles() {
    let (projects, composer_args) =
        global_require(classify(&raw_args(vec!["global", "require", "a/b:1.0", "c/d", "2.0"])));

    let expected: ProjectSet = [("a/b", "1.0"), ("c/d", "2.0")].into_iter().collect();
    assert_eq!(projects, expected);
    assert!(composer_args.is_empty());
}

#[test]
fn classify_equals_and_colon_are_interchangeable() {
    let colon = classify(&raw_args(vec!["global", "require", "a/b:1.0"]));
    let equals = classify(&raw_args(vec!["global", "require", "a/b=1.0"]));
    assert_eq!(colon, equals);
}

#[test]
fn classify_flags_are_forwarded_in_order() {
    let (projects, composer_args) = global_require(classify(&raw_args(vec![
        "-v",
        "global",
        "require",
        "drupal/core:9.0",
        "--prefer-source",
    ])));

    assert_eq!(projects.get("drupal/core"), Some("9.0"));
    assert_eq!(composer_args, raw_args(vec!["-v", "--prefer-source"]));
}

#[test]
fn classify_other_command_passes_everything_through() {
    let args = raw_args(vec!["foo", "bar"]);
    assert_eq!(classify(&args), Classification::Passthrough(args.clone()));
}

#[test]
fn classify_abort_discards_partial_work() {
    let args = raw_args(vec!["--no-dev", "a/b:1.0", "require", "c/d"]);
    let classification = classify(&args);
    assert_eq!(classification, Classification::Passthrough(args));
    assert!(classification.projects().is_none());
}

#[test]
fn classify_require_without_global_is_passthrough() {
    let args = raw_args(vec!["require", "a/b"]);
    assert_eq!(classify(&args), Classification::Passthrough(args.clone()));
}

#[test]
fn classify_global_other_command_is_passthrough() {
    let args = raw_args(vec!["global", "update"]);
    assert_eq!(classify(&args), Classification::Passthrough(args.clone()));
}

#[test]
fn classify_later_name_overwrites_version() {
    let (projects, _) =
        global_require(classify(&raw_args(vec!["global", "require", "a/b:1.0", "a/b:2.0"])));
    assert_eq!(projects.len(), 1);
    assert_eq!(projects.get("a/b"), Some("2.0"));
}

#[test]
fn classify_bare_version_attaches_to_last_named_project() {
    let (projects, _) = global_require(classify(&raw_args(vec![
        "global", "require", "a/b", "c/d", "a/b", "^3.1",
    ])));

    let entries: Vec<_> = projects.iter().collect();
    assert_eq!(entries, vec![("a/b", "^3.1"), ("c/d", "")]);
}

#[test]
fn classify_version_before_any_project_is_forwarded() {
    let (projects, composer_args) =
        global_require(classify(&raw_args(vec!["global", "require", "1.0", "a/b"])));

    assert_eq!(composer_args, raw_args(vec!["1.0"]));
    assert_eq!(projects.get("a/b"), Some(""));
}

#[test]
fn classify_global_require_without_projects() {
    let (projects, composer_args) =
        global_require(classify(&raw_args(vec!["global", "require", "--dry-run"])));
    assert!(projects.is_empty());
    assert_eq!(composer_args, raw_args(vec!["--dry-run"]));
}

#[test]
fn classify_empty_token_is_passthrough() {
    let args = raw_args(vec!["global", ""]);
    assert_eq!(classify(&args), Classification::Passthrough(args.clone()));
}

// =============================================================================
// PLANNER TESTS
// =============================================================================

#[test]
fn plan_passthrough_is_single_verbatim_command() {
    let args = raw_args(vec!["foo", "bar"]);
    let commands = plan(&classify(&args), &options());

    assert_eq!(commands, vec![CommandSpec::passthrough("composer", &args)]);
    assert!(commands[0].env.is_empty());
    assert!(commands[0].cwd.is_none());
}

#[test]
fn plan_without_projects_is_passthrough_of_flags() {
    let commands = build_command_list(&raw_args(vec!["--help"]), &ProjectSet::new(), &options());
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].args, raw_args(vec!["--help"]));
}

#[test]
fn plan_one_command_per_project() {
    let projects: ProjectSet = [("a/b", "1.0"), ("c/d", "")].into_iter().collect();
    let commands = build_command_list(&raw_args(vec!["--no-dev"]), &projects, &options());

    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0].args,
        raw_args(vec!["--no-dev", "--working-dir=/base/a/b", "require", "a/b:1.0"])
    );
    assert_eq!(
        commands[1].args,
        raw_args(vec!["--no-dev", "--working-dir=/base/c/d", "require", "c/d"])
    );
    for command in &commands {
        assert_eq!(command.program, "composer");
        assert_eq!(
            command.env,
            vec![("COMPOSER_BIN_DIR".to_string(), "/bin-dir".to_string())]
        );
    }
    assert_eq!(commands[1].cwd, Some(PathBuf::from("/base/c/d")));
}

#[test]
fn plan_is_deterministic() {
    let classification = classify(&raw_args(vec!["global", "require", "a/b", "c/d:^2"]));
    assert_eq!(plan(&classification, &options()), plan(&classification, &options()));
}

#[test]
fn project_with_version_omits_empty_version() {
    assert_eq!(project_with_version("a/b", ""), "a/b");
    assert_eq!(project_with_version("a/b", "~1"), "a/b:~1");
}

// =============================================================================
// APPLICATION PLAN TESTS
// =============================================================================

#[test]
fn end_to_end_global_require() {
    let commands = Application::new()
        .plan(
            &argv(vec!["global", "require", "drupal/core:9.0", "--prefer-source"]),
            Path::new("/home/u"),
            no_env,
        )
        .unwrap();

    assert_eq!(
        commands,
        vec![CommandSpec {
            program: "composer".into(),
            args: raw_args(vec![
                "--prefer-source",
                "--working-dir=/home/u/.composer/global/drupal/core",
                "require",
                "drupal/core:9.0",
            ]),
            env: vec![(
                "COMPOSER_BIN_DIR".to_string(),
                "/home/u/.composer/vendor/bin".to_string()
            )],
            cwd: Some(PathBuf::from("/home/u/.composer/global/drupal/core")),
        }]
    );
}

#[test]
fn end_to_end_options_and_env() {
    let env = |key: &str| (key == "CGR_BIN_DIR").then(|| "/env/bin".to_string());
    let commands = Application::new()
        .plan(
            &argv(vec!["--base-dir", "/opt/cgr", "global", "require", "a/b"]),
            Path::new("/home/u"),
            env,
        )
        .unwrap();

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].cwd, Some(PathBuf::from("/opt/cgr/a/b")));
    assert_eq!(commands[0].env[0].1, "/env/bin");
}

#[test]
fn end_to_end_passthrough_uses_remaining_args() {
    let commands = Application::new()
        .plan(
            &argv(vec!["--composer-path", "/usr/local/bin/composer", "install", "--no-dev"]),
            Path::new("/home/u"),
            no_env,
        )
        .unwrap();

    assert_eq!(
        commands,
        vec![CommandSpec::passthrough(
            "/usr/local/bin/composer",
            &raw_args(vec!["install", "--no-dev"])
        )]
    );
}

#[test]
fn end_to_end_malformed_option_plans_nothing() {
    let result = Application::new().plan(
        &argv(vec!["global", "require", "a/b", "--bin-dir"]),
        Path::new("/home/u"),
        no_env,
    );
    assert!(matches!(result, Err(CgrError::MalformedOption { .. })));
}

// =============================================================================
// NON-UNICODE ARGUMENT TESTS
// =============================================================================

#[cfg(unix)]
fn bytes_arg(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes.to_vec())
}

#[cfg(unix)]
#[test]
fn non_unicode_word_passes_through_byte_for_byte() {
    let mut args = raw_args(vec!["validate"]);
    args.push(bytes_arg(b"caf\xe9.json"));

    let commands = plan(&classify(&args), &options());
    assert_eq!(commands, vec![CommandSpec::passthrough("composer", &args)]);
}

#[cfg(unix)]
#[test]
fn non_unicode_flag_is_forwarded_to_each_project() {
    let flag = bytes_arg(b"--label=\xff");
    let mut args = raw_args(vec!["global", "require", "a/b"]);
    args.push(flag.clone());

    let commands = plan(&classify(&args), &options());
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].args[0], flag);
}

#[cfg(unix)]
#[test]
fn non_unicode_option_value_is_rejected() {
    let mut args = argv(vec!["--base-dir"]);
    args.push(bytes_arg(b"/tmp/\xe9"));

    let err = extract_options(&args, &option_registry(), &options()).unwrap_err();
    assert!(matches!(err, CgrError::InvalidOptionValue { ref option } if option == "base-dir"));
    assert_eq!(err.exit_code(), 2);
}
