//! Git publishing of the generated page

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

use crate::config::PublishConfig;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Repository directory does not exist: {0:?}")]
    RepoMissing(PathBuf),

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Runs `git add .`, `git commit` and `git push` in the hosting repository.
/// Stops at the first command that fails.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_dir: PathBuf,
    git_binary: String,
    commit_message: String,
    allow_empty: bool,
    dry_run: bool,
}

impl GitPublisher {
    pub fn new(config: &PublishConfig) -> Self {
        Self {
            repo_dir: config.repo_dir.clone(),
            git_binary: config.git_binary.clone(),
            commit_message: config.commit_message.clone(),
            allow_empty: config.allow_empty,
            dry_run: false,
        }
    }

    /// Log the commands instead of running them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Argument lists for each git invocation, in order
    pub fn commands(&self) -> Vec<Vec<String>> {
        let mut commit =
            vec!["commit".to_string(), "-m".to_string(), self.commit_message.clone()];
        if self.allow_empty {
            commit.push("--allow-empty".to_string());
        }

        vec![vec!["add".to_string(), ".".to_string()], commit, vec!["push".to_string()]]
    }

    fn describe(&self, args: &[String]) -> String {
        let args: Vec<String> = args
            .iter()
            .map(|arg| if arg.contains(' ') { format!("\"{arg}\"") } else { arg.clone() })
            .collect();
        format!("{} {}", self.git_binary, args.join(" "))
    }

    pub async fn publish(&self) -> Result<(), PublishError> {
        if !self.repo_dir.is_dir() {
            return Err(PublishError::RepoMissing(self.repo_dir.clone()));
        }

        for args in self.commands() {
            let command = self.describe(&args);

            if self.dry_run {
                info!(repo = ?self.repo_dir, "[dry run] {}", command);
                continue;
            }

            info!(repo = ?self.repo_dir, "Running {}", command);
            let status = Command::new(&self.git_binary)
                .args(&args)
                .current_dir(&self.repo_dir)
                .status()
                .await
                .map_err(|source| PublishError::Spawn { command: command.clone(), source })?;

            if !status.success() {
                return Err(PublishError::Failed { command, status });
            }
        }

        info!(repo = ?self.repo_dir, "Changes pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) -> String {
        let out = std::process::Command::new("git").args(args).current_dir(dir).output().unwrap();
        assert!(
            out.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    }

    fn publisher(repo_dir: &Path) -> GitPublisher {
        GitPublisher::new(&PublishConfig {
            repo_dir: repo_dir.to_path_buf(),
            commit_message: "Automated standings update".to_string(),
            ..PublishConfig::default()
        })
    }

    #[test]
    fn test_commands() {
        let publisher = publisher(Path::new("."));
        let commands = publisher.commands();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], vec!["add", "."]);
        assert_eq!(
            commands[1],
            vec!["commit", "-m", "Automated standings update", "--allow-empty"]
        );
        assert_eq!(commands[2], vec!["push"]);
        assert_eq!(
            publisher.describe(&commands[1]),
            "git commit -m \"Automated standings update\" --allow-empty"
        );
    }

    #[tokio::test]
    async fn test_missing_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = publisher(&dir.path().join("absent")).publish().await.unwrap_err();
        assert!(matches!(err, PublishError::RepoMissing(_)));
    }

    #[tokio::test]
    async fn test_dry_run_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = GitPublisher::new(&PublishConfig {
            repo_dir: dir.path().to_path_buf(),
            git_binary: "definitely-not-a-git-binary".to_string(),
            ..PublishConfig::default()
        })
        .dry_run(true);

        publisher.publish().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = GitPublisher::new(&PublishConfig {
            repo_dir: dir.path().to_path_buf(),
            git_binary: "definitely-not-a-git-binary".to_string(),
            ..PublishConfig::default()
        });

        let err = publisher.publish().await.unwrap_err();
        assert!(matches!(
            err,
            PublishError::Spawn { ref command, .. } if command.ends_with("add .")
        ));
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        // Not a repository, so `git add .` fails and nothing else runs
        let dir = tempfile::tempdir().unwrap();
        let err = publisher(dir.path()).publish().await.unwrap_err();

        assert!(matches!(err, PublishError::Failed { ref command, .. } if command == "git add ."));
    }

    #[tokio::test]
    async fn test_publish_pushes_to_remote() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        let root = tempfile::tempdir().unwrap();
        let remote = root.path().join("remote.git");
        let work = root.path().join("site");
        std::fs::create_dir_all(&remote).unwrap();
        std::fs::create_dir_all(&work).unwrap();

        git(&remote, &["init", "--bare", "--quiet"]);
        git(&work, &["init", "--quiet"]);
        git(&work, &["config", "user.email", "league@example.com"]);
        git(&work, &["config", "user.name", "League Bot"]);
        git(&work, &["config", "commit.gpgsign", "false"]);
        git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);

        std::fs::write(work.join("README.md"), "standings\n").unwrap();
        git(&work, &["add", "."]);
        git(&work, &["commit", "--quiet", "-m", "initial"]);
        git(&work, &["push", "--quiet", "-u", "origin", "HEAD"]);

        std::fs::write(work.join("index.html"), "<p>standings</p>\n").unwrap();
        publisher(&work).publish().await.unwrap();

        let local_head = git(&work, &["rev-parse", "HEAD"]);
        let branch = git(&work, &["rev-parse", "--abbrev-ref", "HEAD"]);
        let remote_head = git(&remote, &["rev-parse", &branch]);
        assert_eq!(local_head, remote_head);
        assert_eq!(git(&work, &["log", "-1", "--format=%s"]), "Automated standings update");
    }
}
