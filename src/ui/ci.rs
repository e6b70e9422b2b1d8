//! GitHub Actions workflow annotations, so warnings and failures show up on
//! the run summary page.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Warning,
    Error,
}

pub fn github_actions_annotation(level: AnnotationLevel, message: &str, title: &str) -> String {
    let level_str = match level {
        AnnotationLevel::Warning => "warning",
        AnnotationLevel::Error => "error",
    };

    format!(
        "::{} title={}::{}",
        level_str,
        escape_property(title),
        escape_message(message)
    )
}

fn escape_message(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_message(s).replace(':', "%3A").replace(',', "%2C")
}
