//! First deploy into a prepared deployment root.

use crate::common::TestEnv;

#[test]
fn scenario_first_deploy_keeps_host_owned_files() {
    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");
    env.write_artifact("bin/riepete", "#!/bin/sh\n");
    env.write_artifact("config/riepete.conf", "from the build");
    env.write_artifact("config/logback.xml", "<configuration/>");

    env.write_deployed("app.jar", "riepete 0.9");
    env.write_deployed("config/riepete.conf", "production settings");
    env.write_deployed("log/riepete.log", "previous run");

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read_deployed("app.jar").as_deref(), Some("riepete 1.0"));
    assert_eq!(env.read_deployed("bin/riepete").as_deref(), Some("#!/bin/sh\n"));
    assert_eq!(
        env.read_deployed("config/logback.xml").as_deref(),
        Some("<configuration/>")
    );
    assert_eq!(
        env.read_deployed("config/riepete.conf").as_deref(),
        Some("production settings")
    );
    assert_eq!(env.read_deployed("log/riepete.log").as_deref(), Some("previous run"));

    // Local targets need no rsync or ssh.
    assert_eq!(env.tools_invoked(), vec!["sbt", "supervisorctl"]);
    assert!(result.stdout.contains("changed 3 paths"), "{}", result.stdout);
}

#[test]
fn scenario_missing_deployment_root_fails_the_sync() {
    let env = TestEnv::local();
    env.write_artifact("app.jar", "riepete 1.0");
    std::fs::remove_dir_all(env.deploy_root()).unwrap();

    let result = env.run(&["deploy"]);

    assert!(!result.success);
    assert_eq!(env.tools_invoked(), vec!["sbt"]);
    assert!(!env.deploy_root().exists());
}
