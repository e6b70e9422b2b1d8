//! Proxy server port - the remote nginx installation.

use crate::error::HoistResult;

/// nginx site management on the remote host.
///
/// Paths are fixed by `RemoteLayout`; the port only speaks in terms of the
/// `app_proxy` site.
pub trait ProxyServer {
    /// Upload `content` to staging, then move it into sites-available as
    /// root:root 0644.
    fn install_site(&self, content: &str) -> HoistResult<()>;

    /// Remove the distribution's default site link, if present.
    fn remove_default_site(&self) -> HoistResult<()>;

    /// Remove the site link unconditionally, then link it again.
    fn relink_site(&self) -> HoistResult<()>;

    /// Run the syntax check. `Err(output)` carries nginx's diagnostic.
    fn validate(&self) -> HoistResult<Result<(), String>>;

    fn reload(&self) -> HoistResult<()>;

    /// Remove both the sites-enabled link and the sites-available file.
    fn remove_site(&self) -> HoistResult<()>;
}

impl<T: ProxyServer + ?Sized> ProxyServer for &T {
    fn install_site(&self, content: &str) -> HoistResult<()> {
        (**self).install_site(content)
    }

    fn remove_default_site(&self) -> HoistResult<()> {
        (**self).remove_default_site()
    }

    fn relink_site(&self) -> HoistResult<()> {
        (**self).relink_site()
    }

    fn validate(&self) -> HoistResult<Result<(), String>> {
        (**self).validate()
    }

    fn reload(&self) -> HoistResult<()> {
        (**self).reload()
    }

    fn remove_site(&self) -> HoistResult<()> {
        (**self).remove_site()
    }
}
