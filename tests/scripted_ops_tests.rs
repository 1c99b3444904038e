//! Scripted-operations mode: strict fleet order, one repository at a time,
//! exclusions honored, and per-step failures reported without stopping the
//! run.

mod fixtures;

use fixtures::{fleet_config, RecordingShell};
use repo_fleet::{FleetOrchestrator, GitExecutor, RemoteOp, ScriptedOps};
use std::sync::Arc;
use tempfile::TempDir;

fn orchestrator(
    shell: RecordingShell,
    names: &[&str],
    existing: &[&str],
) -> (Arc<RecordingShell>, TempDir, FleetOrchestrator) {
    let base = TempDir::new().unwrap();
    for name in existing {
        std::fs::create_dir(base.path().join(name)).unwrap();
    }
    let shell = Arc::new(shell);
    let executor = Arc::new(GitExecutor::new(shell.clone()));
    let orchestrator = FleetOrchestrator::new(
        fleet_config("org", names),
        base.path().to_path_buf(),
        executor,
    );
    (shell, base, orchestrator)
}

fn repo_of(call: &fixtures::RecordedCall) -> String {
    call.cwd
        .as_ref()
        .and_then(|d| d.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[tokio::test]
async fn repositories_are_processed_sequentially_in_fleet_order() {
    let names = ["alpha", "beta", "gamma"];
    let (shell, _base, orchestrator) = orchestrator(RecordingShell::new(), &names, &names);

    let ops = ScriptedOps {
        checkout: Some("develop".to_string()),
        push: true,
        ..ScriptedOps::default()
    };
    orchestrator.run_scripted(&ops).await.unwrap();

    // checkout-and-pull is three git calls, push is one
    let sequence: Vec<String> = shell.calls().iter().map(repo_of).collect();
    let expected: Vec<String> = names
        .iter()
        .flat_map(|name| std::iter::repeat(name.to_string()).take(4))
        .collect();
    assert_eq!(sequence, expected);
    assert!(shell.max_in_flight() <= 1);
}

#[tokio::test]
async fn step_failure_does_not_block_later_steps_or_repositories() {
    let shell = RecordingShell::new().failing_on("checkout develop");
    let names = ["alpha", "beta"];
    let (shell, _base, orchestrator) = orchestrator(shell, &names, &names);

    let ops = ScriptedOps {
        checkout: Some("develop".to_string()),
        push: true,
        ..ScriptedOps::default()
    };
    let outcomes = orchestrator.run_scripted(&ops).await.unwrap();

    // both repositories still pushed despite the failed checkout
    assert_eq!(shell.count_git("push"), 2);
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes.iter().filter(|o| !o.succeeded).count(), 2);
}

#[tokio::test]
async fn excluded_and_missing_repositories_are_left_untouched() {
    let names = ["alpha", "excluded", "missing"];
    let (shell, _base, orchestrator) =
        orchestrator(RecordingShell::new(), &names, &["alpha", "excluded"]);

    let ops = ScriptedOps {
        push: true,
        exclude: vec!["excluded".to_string()],
        ..ScriptedOps::default()
    };
    let outcomes = orchestrator.run_scripted(&ops).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].repository, "alpha");
    assert!(shell.calls().iter().all(|c| repo_of(c) == "alpha"));
}

#[tokio::test]
async fn commit_stages_then_commits_with_the_given_message() {
    let (shell, _base, orchestrator) =
        orchestrator(RecordingShell::new(), &["alpha"], &["alpha"]);

    let ops = ScriptedOps {
        commit_message: Some("chore: roll modules".to_string()),
        ..ScriptedOps::default()
    };
    let outcomes = orchestrator.run_scripted(&ops).await.unwrap();

    assert!(outcomes.iter().all(|o| o.succeeded));
    let argv: Vec<Vec<String>> = shell.calls().into_iter().map(|c| c.args).collect();
    assert_eq!(argv[0], ["add", "."]);
    assert_eq!(
        argv[1],
        ["commit", "-m", "chore: roll modules", "--allow-empty"]
    );
}

#[tokio::test]
async fn remote_operations_append_the_repository_name_to_the_url() {
    let (shell, _base, orchestrator) =
        orchestrator(RecordingShell::new(), &["alpha"], &["alpha"]);

    let ops = ScriptedOps {
        remote: Some(RemoteOp::Add {
            name: "mirror".to_string(),
            url: "git@backup.example.com:org/".to_string(),
        }),
        ..ScriptedOps::default()
    };
    orchestrator.run_scripted(&ops).await.unwrap();

    let call = &shell.calls()[0];
    assert_eq!(
        call.args,
        ["remote", "add", "mirror", "git@backup.example.com:org/alpha"]
    );
}

#[tokio::test]
async fn push_uses_the_explicit_branch_when_given() {
    let (shell, _base, orchestrator) =
        orchestrator(RecordingShell::new(), &["alpha"], &["alpha"]);

    let ops = ScriptedOps {
        push: true,
        push_branch: Some("release".to_string()),
        ..ScriptedOps::default()
    };
    orchestrator.run_scripted(&ops).await.unwrap();

    assert_eq!(shell.calls()[0].args, ["push", "origin", "release"]);
}
