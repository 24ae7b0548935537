#![cfg(unix)]

use sfdx_sandbox::{ProcessRunner, SandboxError, Sfdx};
use tokio_test::assert_err;

// `sh force:org:list --json` fails to open the namespace as a script file and
// reports it on stderr.
#[tokio::test]
async fn test_stderr_from_real_process_is_a_command_error() {
    let sfdx = Sfdx::with_program(ProcessRunner::new(), "sh");

    let err = assert_err!(sfdx.list_orgs().await);

    match err {
        SandboxError::CommandError { stderr, command } => {
            assert!(!stderr.is_empty());
            assert!(command.starts_with("sh "));
            assert!(command.contains("force:org:list"));
            assert!(command.ends_with("--json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_import_without_source_never_spawns() {
    // the program does not exist, so reaching the runner would be a SpawnError
    let sfdx = Sfdx::with_program(ProcessRunner::new(), "missing-sfdx-binary-98765");

    let err = assert_err!(sfdx.data_import("dev1", None, None).await);
    assert!(matches!(err, SandboxError::MissingImportSource));

    let err = assert_err!(sfdx.list_orgs().await);
    assert!(matches!(err, SandboxError::SpawnError { .. }));
}
