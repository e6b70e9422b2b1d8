//! HTTP probe port - reachability from the operator's machine.

/// Fetches a URL from where hoist runs, not from the remote host.
pub trait HttpProbe {
    /// Status code of a single GET without following redirects, or a
    /// description of why no response arrived.
    fn status(&self, url: &str) -> Result<u16, String>;
}

impl<T: HttpProbe + ?Sized> HttpProbe for &T {
    fn status(&self, url: &str) -> Result<u16, String> {
        (**self).status(url)
    }
}
