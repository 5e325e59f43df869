//! A failed restart leaves the synced tree in place for a manual retry.

use crate::common::TestEnv;

#[test]
fn scenario_unknown_service_fails_after_sync() {
    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");

    let result = env.run_with_env(
        &["deploy"],
        &[("FAKE_SUPERVISORCTL_OUTPUT", "riepete: ERROR (no such process)")],
    );

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert_eq!(env.read_deployed("app.jar").as_deref(), Some("riepete 1.0"));
    assert!(result.stderr.contains("restart failed"), "{}", result.stderr);

    let retry = env.run(&["restart"]);
    assert!(retry.success, "{}", retry.combined_output());
    assert_eq!(
        env.tools_invoked(),
        vec!["sbt", "supervisorctl", "supervisorctl"]
    );
}

#[test]
fn scenario_concurrent_deploy_is_refused() {
    use fs2::FileExt;

    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");

    let lock = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(env.project_dir().join(".riepete-deploy.lock"))
        .unwrap();
    lock.lock_exclusive().unwrap();

    let result = env.run(&["deploy"]);

    assert!(!result.success);
    assert!(result.stderr.contains("another deploy is running"), "{}", result.stderr);
    assert!(env.tool_log().is_empty());

    let dry = env.run(&["deploy", "--dry-run"]);
    assert!(dry.success, "{}", dry.combined_output());

    lock.unlock().unwrap();
}
