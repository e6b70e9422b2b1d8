//! nginx site adapter
//!
//! Implements the `ProxyServer` port for Debian-style nginx layouts
//! (`sites-available` plus symlinks in `sites-enabled`).

use std::io::Write;

use tracing::debug;

use crate::domain::ports::{ProxyServer, RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::shell::quote;
use crate::domain::value_objects::{RemoteLayout, PROXY_STAGING_PATH};
use crate::error::{HoistError, HoistResult};

pub struct NginxSites<E> {
    exec: E,
    layout: RemoteLayout,
}

impl<E: RemoteExecutor> NginxSites<E> {
    pub fn new(exec: E, layout: RemoteLayout) -> Self {
        Self { exec, layout }
    }

    fn stage(&self, content: &str) -> HoistResult<()> {
        let mut staged = tempfile::NamedTempFile::new()?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        debug!("uploading proxy site to {}", PROXY_STAGING_PATH);
        let result = self
            .exec
            .upload(staged.path(), PROXY_STAGING_PATH)
            .map_err(|e| self.exec.connectivity(e))?;
        if !result.success() {
            return Err(HoistError::RemoteCommand {
                step: "upload proxy site".to_string(),
                status: result.status,
                output: result.output.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl<E: RemoteExecutor> ProxyServer for NginxSites<E> {
    fn install_site(&self, content: &str) -> HoistResult<()> {
        self.stage(content)?;
        let target = quote(&self.layout.site_available());
        self.exec.run_checked(
            "install proxy site",
            &format!(
                "sudo mv {} {target} && sudo chown root:root {target} && sudo chmod 644 {target}",
                quote(PROXY_STAGING_PATH)
            ),
        )?;
        Ok(())
    }

    fn remove_default_site(&self) -> HoistResult<()> {
        self.exec.run_checked(
            "remove default site",
            &format!("sudo rm -f {}", quote(&self.layout.default_site_enabled())),
        )?;
        Ok(())
    }

    fn relink_site(&self) -> HoistResult<()> {
        let link = quote(&self.layout.site_enabled());
        // Always drop the old link first so a stale or dangling one is replaced.
        self.exec
            .run_checked("remove site link", &format!("sudo rm -f {link}"))?;
        self.exec.run_checked(
            "link proxy site",
            &format!("sudo ln -s {} {link}", quote(&self.layout.site_available())),
        )?;
        Ok(())
    }

    fn validate(&self) -> HoistResult<Result<(), String>> {
        let result = self
            .exec
            .execute("sudo nginx -t 2>&1")
            .map_err(|e| self.exec.connectivity(e))?;
        if result.success() {
            Ok(Ok(()))
        } else {
            Ok(Err(result.output))
        }
    }

    fn reload(&self) -> HoistResult<()> {
        self.exec
            .run_checked("reload nginx", "sudo systemctl reload nginx")?;
        Ok(())
    }

    fn remove_site(&self) -> HoistResult<()> {
        self.exec.run_checked(
            "remove proxy site",
            &format!(
                "sudo rm -f {} {}",
                quote(&self.layout.site_enabled()),
                quote(&self.layout.site_available())
            ),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SshUser;
    use crate::infrastructure::remote::recording::RecordingExecutor;

    fn sites(exec: &RecordingExecutor) -> NginxSites<&RecordingExecutor> {
        NginxSites::new(exec, RemoteLayout::for_user(&SshUser::parse("deploy").unwrap()))
    }

    #[test]
    fn install_uploads_to_staging_then_moves_as_root() {
        let exec = RecordingExecutor::new();

        sites(&exec).install_site("server {}\n").unwrap();

        let uploads = exec.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].1, "/tmp/app_proxy");
        assert_eq!(uploads[0].2, "server {}\n");
        assert_eq!(
            exec.commands(),
            vec!["sudo mv '/tmp/app_proxy' '/etc/nginx/sites-available/app_proxy' \
                  && sudo chown root:root '/etc/nginx/sites-available/app_proxy' \
                  && sudo chmod 644 '/etc/nginx/sites-available/app_proxy'"
                .to_string()]
        );
    }

    #[test]
    fn rejected_upload_is_a_remote_command_error() {
        let exec = RecordingExecutor::new().reject_uploads(1, "scp: /tmp/app_proxy: Permission denied\n");

        let err = sites(&exec).install_site("server {}\n").unwrap_err();

        match err {
            HoistError::RemoteCommand { step, status, output } => {
                assert_eq!(step, "upload proxy site");
                assert_eq!(status, 1);
                assert_eq!(output, "scp: /tmp/app_proxy: Permission denied");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(exec.commands().is_empty());
    }

    #[test]
    fn relink_removes_before_linking() {
        let exec = RecordingExecutor::new();

        sites(&exec).relink_site().unwrap();

        assert_eq!(
            exec.commands(),
            vec![
                "sudo rm -f '/etc/nginx/sites-enabled/app_proxy'".to_string(),
                "sudo ln -s '/etc/nginx/sites-available/app_proxy' '/etc/nginx/sites-enabled/app_proxy'"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn validate_returns_diagnostic_verbatim() {
        let diag = "nginx: [emerg] unknown directive \"proxy_pas\" in /etc/nginx/sites-enabled/app_proxy:9\n";
        let exec = RecordingExecutor::new().respond("nginx -t", 1, diag);

        let verdict = sites(&exec).validate().unwrap();

        assert_eq!(verdict, Err(diag.to_string()));
    }

    #[test]
    fn validate_passes_on_zero_exit() {
        let exec = RecordingExecutor::new();
        assert_eq!(sites(&exec).validate().unwrap(), Ok(()));
    }

    #[test]
    fn remove_site_touches_both_paths() {
        let exec = RecordingExecutor::new();
        sites(&exec).remove_site().unwrap();
        let cmd = &exec.commands()[0];
        assert!(cmd.contains("/etc/nginx/sites-enabled/app_proxy"));
        assert!(cmd.contains("/etc/nginx/sites-available/app_proxy"));
    }
}
