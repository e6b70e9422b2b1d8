//! nginx site rendering.
//!
//! Turns a `ProxyRoute` into the text of the `app_proxy` site file. Every
//! interpolated value comes from a validated type (`ServerName`, `AppPort`),
//! so the output cannot gain extra directives from operator input.

use crate::domain::entities::ProxyRoute;

const HEADER: &str = "# Managed by hoist. Re-running a deploy replaces this file.";
/// Connection header map; scoped name so it cannot clash with other sites.
const CONNECTION_MAP_VAR: &str = "$app_proxy_connection";
const TLS_NAME_HINT: &str = "your-domain.example";

/// Render the complete site file for `route`.
pub fn render_site(route: &ProxyRoute) -> String {
    let server_name = route.server_name.as_str();
    let tls_name = if route.server_name.is_placeholder() {
        TLS_NAME_HINT
    } else {
        server_name
    };

    let mut lines: Vec<String> = vec![
        HEADER.to_string(),
        String::new(),
        format!("map $http_upgrade {CONNECTION_MAP_VAR} {{"),
        "    default upgrade;".to_string(),
        "    ''      \"\";".to_string(),
        "}".to_string(),
        String::new(),
        "server {".to_string(),
        format!("    listen {};", route.listen_port),
        format!("    listen [::]:{};", route.listen_port),
        format!("    server_name {server_name};"),
        String::new(),
    ];
    lines.extend(location_block(route, "$scheme"));
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push(format!(
        "# TLS termination. Issue a certificate for {tls_name}, then uncomment"
    ));
    lines.push("# this block and redirect the port 80 server to https.".to_string());
    lines.push("#".to_string());

    let mut tls: Vec<String> = vec![
        "server {".to_string(),
        "    listen 443 ssl;".to_string(),
        "    listen [::]:443 ssl;".to_string(),
        format!("    server_name {tls_name};"),
        String::new(),
        format!("    ssl_certificate /etc/letsencrypt/live/{tls_name}/fullchain.pem;"),
        format!("    ssl_certificate_key /etc/letsencrypt/live/{tls_name}/privkey.pem;"),
        String::new(),
    ];
    tls.extend(location_block(route, "https"));
    tls.push("}".to_string());
    lines.extend(tls.into_iter().map(|l| {
        if l.is_empty() {
            "#".to_string()
        } else {
            format!("# {l}")
        }
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn location_block(route: &ProxyRoute, forwarded_proto: &str) -> Vec<String> {
    vec![
        "    location / {".to_string(),
        format!("        proxy_pass http://{};", route.upstream()),
        "        proxy_http_version 1.1;".to_string(),
        "        proxy_set_header Upgrade $http_upgrade;".to_string(),
        format!("        proxy_set_header Connection {CONNECTION_MAP_VAR};"),
        "        proxy_set_header Host $host;".to_string(),
        "        proxy_set_header X-Real-IP $remote_addr;".to_string(),
        "        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;".to_string(),
        format!("        proxy_set_header X-Forwarded-Proto {forwarded_proto};"),
        "        proxy_cache_bypass $http_upgrade;".to_string(),
        "    }".to_string(),
    ]
}
