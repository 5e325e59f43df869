//! Repeat deploys mirror the newest build and nothing else.

use crate::common::TestEnv;

#[test]
fn scenario_redeploy_removes_stale_files() {
    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");
    env.write_artifact("lib/riemann-client-0.4.jar", "old client");

    assert!(env.run(&["deploy"]).success);
    assert!(env.read_deployed("lib/riemann-client-0.4.jar").is_some());

    std::fs::remove_dir_all(env.artifact_dir()).unwrap();
    env.write_artifact("app.jar", "riepete 1.1");
    env.write_artifact("lib/riemann-client-0.5.jar", "new client");

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read_deployed("app.jar").as_deref(), Some("riepete 1.1"));
    assert!(env.read_deployed("lib/riemann-client-0.4.jar").is_none());
    assert_eq!(
        env.read_deployed("lib/riemann-client-0.5.jar").as_deref(),
        Some("new client")
    );
}

#[test]
fn scenario_second_deploy_is_a_noop_sync() {
    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");
    env.write_artifact("config/riepete.conf", "from the build");
    env.write_deployed("log/riepete.log", "previous run");

    assert!(env.run(&["deploy"]).success);
    let result = env.run(&["deploy", "-v"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("changed 0 paths"), "{}", result.stdout);
    assert_eq!(env.read_deployed("log/riepete.log").as_deref(), Some("previous run"));
    assert!(env.read_deployed("config/riepete.conf").is_none());
}

#[test]
fn scenario_delete_disabled_keeps_destination_only_files() {
    let env = TestEnv::local();
    env.append_config("\n[sync]\ndelete = false\n");
    env.write_artifact("app.jar", "riepete 1.0");
    env.write_deployed("hotfix.jar", "applied by hand");

    let result = env.run(&["sync"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read_deployed("hotfix.jar").as_deref(), Some("applied by hand"));
}

#[test]
fn scenario_gitignore_entries_are_not_shipped() {
    let env = TestEnv::local();
    std::fs::write(env.project_dir().join(".gitignore"), "*.tmp\n").unwrap();
    env.write_artifact("app.jar", "riepete 1.0");
    env.write_artifact("cache/build.tmp", "scratch");

    let result = env.run(&["sync"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.read_deployed("app.jar").is_some());
    assert!(env.read_deployed("cache/build.tmp").is_none());
}
