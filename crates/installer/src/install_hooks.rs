use crate::{ensure_exported, BarrelLocks, CancelFlag};
use futures_util::future;
use hooksmith_config::Settings;
use hooksmith_fs::stage_file;
use hooksmith_network::ThrottledClient;
use hooksmith_reporter::InstallReport;
use hooksmith_resolver::{PlannedHook, Resolution};
use pipe_trait::Pipe;
use std::{path::PathBuf, sync::Mutex};

/// This subroutine fetches and writes every unit of a resolved install plan.
///
/// **Brief overview for each planned hook:**
/// * Fetch the hook's source text from the remote repository.
/// * Write it to `{hooksPath}/{name}/{name}.{ext}` through a staged write.
/// * Fetch each of its local helper files into the nested `helpers/` directory.
///
/// Shared utilities from the plan are fetched once each into `{utilsPath}`
/// and re-exported from the barrel file.
///
/// The batch is partial-failure tolerant: a missing remote file or a broken
/// transitive dependency is logged and skipped, and only outcomes of
/// directly requested hooks surface in the report.
#[must_use]
pub struct InstallHooks<'a> {
    pub http_client: &'a ThrottledClient,
    pub settings: &'static Settings,
    /// Consumer project root; relative settings paths are joined onto it.
    pub cwd: &'a PathBuf,
    pub resolution: &'a Resolution,
    /// Re-fetch and overwrite units whose target file already exists.
    pub overwrite: bool,
    pub cancel: &'a CancelFlag,
    pub barrel_locks: &'a BarrelLocks,
}

impl<'a> InstallHooks<'a> {
    /// Execute the subroutine.
    pub async fn run(self) -> InstallReport {
        let report = Mutex::new(InstallReport::default());

        // Directly requested names with no registry entry fail per-name
        // without touching the rest of the batch.
        for name in &self.resolution.unknown {
            report.lock().expect("report lock").failed(name, "no registry entry");
        }

        tracing::info!(
            target: "hooksmith::install",
            hooks = self.resolution.hooks.len(),
            utils = self.resolution.utils.len(),
            "Start batch",
        );

        self.resolution
            .hooks
            .iter()
            .map(|hook| self.install_hook(hook, &report))
            .pipe(future::join_all)
            .await;

        self.resolution
            .utils
            .iter()
            .map(|symbol| self.install_util(symbol))
            .pipe(future::join_all)
            .await;

        tracing::info!(target: "hooksmith::install", "Complete batch");

        report.into_inner().expect("report lock")
    }

    async fn install_hook(&self, hook: &PlannedHook, report: &Mutex<InstallReport>) {
        let PlannedHook { name, requested, helpers } = hook;
        let ext = self.settings.ext();
        let hook_dir = self.cwd.join(&self.settings.hooks_path).join(name);
        let target = hook_dir.join(format!("{name}.{ext}"));

        if self.cancel.is_cancelled() {
            tracing::info!(target: "hooksmith::install", name, "Cancelled before start");
            return;
        }

        if target.is_file() && !self.overwrite {
            tracing::debug!(target: "hooksmith::install", name, "Already present");
            if *requested {
                report.lock().expect("report lock").skipped(name);
            }
            return;
        }

        let url = self.settings.hook_source_url(name);
        let source = match self.http_client.fetch_text(&url).await {
            Ok(source) => source,
            Err(error) if *requested => {
                let reason = if error.is_not_found() {
                    "not found in the remote repository".to_string()
                } else {
                    error.to_string()
                };
                tracing::warn!(target: "hooksmith::install", name, %error, "Requested hook failed");
                report.lock().expect("report lock").failed(name, reason);
                return;
            }
            Err(error) => {
                tracing::warn!(target: "hooksmith::install", name, %error, "Skip transitive hook");
                return;
            }
        };

        if self.cancel.is_cancelled() {
            tracing::info!(target: "hooksmith::install", name, "Cancelled in flight, discarding");
            return;
        }

        if let Err(error) = stage_file(&target, source.as_bytes()) {
            tracing::warn!(target: "hooksmith::install", name, %error, "Write failed");
            if *requested {
                report.lock().expect("report lock").failed(name, error.to_string());
            }
            return;
        }

        for helper in helpers {
            self.install_helper(name, helper, &hook_dir).await;
        }

        tracing::info!(target: "hooksmith::install", name, "Installed hook");
        if *requested {
            report.lock().expect("report lock").installed(name);
        }
    }

    /// Helper files live under their owning hook; a failed helper downgrades
    /// to a logged skip and never fails the hook itself.
    async fn install_helper(&self, hook: &str, helper: &str, hook_dir: &PathBuf) {
        let ext = self.settings.ext();
        let target = hook_dir.join("helpers").join(format!("{helper}.{ext}"));

        if target.is_file() && !self.overwrite {
            return;
        }
        if self.cancel.is_cancelled() {
            return;
        }

        let url = self.settings.helper_source_url(hook, helper);
        match self.http_client.fetch_text(&url).await {
            Ok(source) => {
                if self.cancel.is_cancelled() {
                    return;
                }
                if let Err(error) = stage_file(&target, source.as_bytes()) {
                    tracing::warn!(target: "hooksmith::install", hook, helper, %error, "Helper write failed");
                }
            }
            Err(error) => {
                tracing::warn!(target: "hooksmith::install", hook, helper, %error, "Skip helper");
            }
        }
    }

    /// Utilities are plan-level leaves, fetched at most once per batch. The
    /// barrel export is ensured even when the file itself is already present.
    async fn install_util(&self, symbol: &str) {
        let ext = self.settings.ext();
        let utils_dir = self.cwd.join(&self.settings.utils_path);
        let target = utils_dir.join(format!("{symbol}.{ext}"));

        if self.cancel.is_cancelled() {
            return;
        }

        if !target.is_file() || self.overwrite {
            let url = self.settings.util_source_url(symbol);
            let source = match self.http_client.fetch_text(&url).await {
                Ok(source) => source,
                Err(error) => {
                    tracing::warn!(target: "hooksmith::install", symbol, %error, "Skip utility");
                    return;
                }
            };
            if self.cancel.is_cancelled() {
                return;
            }
            if let Err(error) = stage_file(&target, source.as_bytes()) {
                tracing::warn!(target: "hooksmith::install", symbol, %error, "Utility write failed");
                return;
            }
        }

        if let Err(error) = ensure_exported(&utils_dir, symbol, ext, self.barrel_locks).await {
            tracing::warn!(target: "hooksmith::install", symbol, %error, "Barrel update failed");
        }
    }
}
