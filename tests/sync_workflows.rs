//! Download, upload and list workflows against a scripted git and prompt

mod common;

use common::{runtime, Fixture, ScriptedPrompt, ScriptedRunner};
use logics::registry::Repository;
use logics::vcs::ExecError;
use logics::workflow::{Orchestrator, WorkflowError, DEFAULT_COMMIT_MESSAGE};

async fn two_projects() -> Fixture {
    let fixture = Fixture::new();
    let song = fixture.projects.join("song");
    let album = fixture.projects.join("album");
    std::fs::create_dir_all(&song).unwrap();
    std::fs::create_dir_all(&album).unwrap();
    fixture
        .with_registry(vec![
            Repository::new("song", song),
            Repository::new("album", album),
        ])
        .await
}

#[tokio::test]
async fn test_download_without_fetch_flag_only_pulls() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new().respond("pull origin", Ok("Already up to date.\n"));
    let prompt = ScriptedPrompt::new().select(1);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let downloaded = orchestrator.download(false).await.unwrap();

    assert_eq!(prompt.offered.borrow()[0], vec!["song", "album"]);
    assert_eq!(downloaded.repository.name, "album");
    assert_eq!(runner.verbs(), vec!["git pull origin master"]);
    assert_eq!(
        runner.calls()[0],
        format!(
            "git -C {} pull origin master",
            fixture.projects.join("album").display()
        )
    );
    assert_eq!(downloaded.report.steps[0].stdout, "Already up to date.\n");
}

#[tokio::test]
async fn test_download_with_fetch_flag_pulls_then_fetches_content() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new();
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let downloaded = orchestrator.download(true).await.unwrap();

    assert_eq!(runner.verbs(), vec!["git pull origin master", "git lfs pull"]);
    assert_eq!(downloaded.report.steps.len(), 2);
}

#[tokio::test]
async fn test_failed_pull_skips_content_fetch() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new().respond(
        "pull origin",
        Err(runtime("fatal: '/shared/song' does not appear to be a git repository\n")),
    );
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.download(true).await.unwrap_err();

    assert!(err.to_string().contains("does not appear to be a git repository"));
    assert_eq!(runner.verbs(), vec!["git pull origin master"]);
}

#[tokio::test]
async fn test_download_with_empty_registry_is_actionable() {
    let fixture = Fixture::new().with_registry(vec![]).await;
    let runner = ScriptedRunner::new();
    let prompt = ScriptedPrompt::new();
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.download(false).await.unwrap_err();

    match err {
        WorkflowError::Validation(message) => assert!(message.contains("logics install")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_selection_runs_nothing() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new();
    let prompt = ScriptedPrompt::new().cancel();
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.upload(None).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_upload_clean_working_copy_is_nothing_to_do() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new().respond("status --porcelain", Ok("\n  \n"));
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.upload(None).await.unwrap_err();

    match err {
        WorkflowError::Validation(message) => assert!(message.contains("nothing to do")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(runner.verbs(), vec!["git status --porcelain"]);
}

#[tokio::test]
async fn test_upload_stages_commits_and_pushes_in_order() {
    let fixture = two_projects().await;
    let runner =
        ScriptedRunner::new().respond("status --porcelain", Ok(" M song.logicx\n?? vox.wav\n"));
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let uploaded = orchestrator.upload(None).await.unwrap();

    assert_eq!(
        runner.verbs(),
        vec![
            "git status --porcelain".to_string(),
            "git add -A .".to_string(),
            format!("git commit -m {DEFAULT_COMMIT_MESSAGE}"),
            "git push origin master".to_string(),
        ]
    );
    assert_eq!(uploaded.changes, " M song.logicx\n?? vox.wav\n");
    assert_eq!(uploaded.report.steps.len(), 3);
}

#[tokio::test]
async fn test_upload_forwards_custom_message() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new().respond("status --porcelain", Ok("?? bass.wav\n"));
    let prompt = ScriptedPrompt::new().select(1);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let uploaded = orchestrator.upload(Some("bass overdub")).await.unwrap();

    let commit = &uploaded.report.steps[1].step;
    assert_eq!(commit.args[2..], ["commit", "-m", "bass overdub"]);
}

#[tokio::test]
async fn test_failed_commit_aborts_before_push() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new()
        .respond("status --porcelain", Ok("?? bass.wav\n"))
        .respond(
            "commit -m",
            Err(ExecError::Unexpected {
                message: "exit status: 1".to_string(),
            }),
        );
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.upload(None).await.unwrap_err();

    assert_eq!(
        runner.verbs(),
        vec![
            "git status --porcelain".to_string(),
            "git add -A .".to_string(),
            format!("git commit -m {DEFAULT_COMMIT_MESSAGE}"),
        ]
    );
    let completed = err.completed_steps();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].purpose, "stage all changes");
}

#[tokio::test]
async fn test_failed_push_keeps_local_commit() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new()
        .respond("status --porcelain", Ok("?? bass.wav\n"))
        .respond("push origin", Err(runtime("error: failed to push some refs\n")));
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.upload(None).await.unwrap_err();

    let purposes: Vec<&str> = err
        .completed_steps()
        .iter()
        .map(|s| s.purpose.as_str())
        .collect();
    assert_eq!(purposes, vec!["stage all changes", "commit changes"]);
    assert!(err.to_string().starts_with("push to the shared folder failed"));
}

#[tokio::test]
async fn test_status_failure_is_reported_as_step() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new().respond(
        "status --porcelain",
        Err(runtime("fatal: not a git repository\n")),
    );
    let prompt = ScriptedPrompt::new().select(0);
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let err = orchestrator.upload(None).await.unwrap_err();
    match err {
        WorkflowError::Step { step, completed, .. } => {
            assert_eq!(step.purpose, "detect local changes");
            assert!(completed.is_empty());
        }
        other => panic!("expected step error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_keeps_registry_order() {
    let fixture = two_projects().await;
    let runner = ScriptedRunner::new();
    let prompt = ScriptedPrompt::new();
    let orchestrator = Orchestrator::new(&fixture.settings, &runner, &prompt);

    let names: Vec<String> = orchestrator
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["song", "album"]);
    assert!(runner.calls().is_empty());
}
