//! Shell snippet builders.
//!
//! Every command string sent to the host that more than one component
//! needs is built here, so adapters and test doubles agree on its shape.

/// Quote a value for safe use as a single POSIX shell word
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

pub fn command_exists(binary: &str) -> String {
    format!("command -v {} >/dev/null 2>&1", quote(binary))
}

pub fn service_active(unit: &str) -> String {
    format!("systemctl is-active --quiet {}", quote(unit))
}

pub fn service_enabled(unit: &str) -> String {
    format!("systemctl is-enabled --quiet {}", quote(unit))
}

/// HTTP status of `http://127.0.0.1:<port>/` as seen from the host.
///
/// Prints `000` when nothing answers; never exits non-zero.
pub fn loopback_http_status(port: u16) -> String {
    format!(
        "curl -s -o /dev/null -w '%{{http_code}}' --max-time 5 http://127.0.0.1:{port}/ || true"
    )
}

/// Parse curl's `%{http_code}` output; `000` means no response.
pub fn parse_http_status(output: &str) -> Option<u16> {
    let code: u16 = output.trim().chars().take(3).collect::<String>().parse().ok()?;
    (code != 0).then_some(code)
}

/// 2xx or 3xx
pub fn is_success_or_redirect(code: u16) -> bool {
    (200..400).contains(&code)
}

/// 5xx: a proxy answering this has reached, or failed to reach, its upstream.
pub fn is_upstream_failure(code: u16) -> bool {
    (500..600).contains(&code)
}

pub fn make_dir(path: &str) -> String {
    format!("mkdir -p {}", quote(path))
}

pub fn remove_tree(path: &str) -> String {
    format!("rm -rf {}", quote(path))
}
