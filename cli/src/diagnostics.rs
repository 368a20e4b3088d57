use std::io::{self, Write};
use streamchat_core::{ChatError, ConnectionConfig};
use streamchat_core::config::PROJECT_VAR;

pub fn print_header<W: Write>(out: &mut W, config: &ConnectionConfig) -> io::Result<()> {
    writeln!(out, "TENEX OpenAI Client Examples")?;
    writeln!(out, "Server: {}", config.server_url())?;
    writeln!(out, "Project: {}", config.project())?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out)
}

pub fn print_placeholder_warning<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Warning: {PROJECT_VAR} is not set!")?;
    writeln!(
        out,
        "Set it via environment variable: export {PROJECT_VAR}=your-actual-project-dtag"
    )?;
    writeln!(out, "Or pass --project <DTAG> on the command line.")?;
    writeln!(out)
}

/// Describe a failed run along with the usual reasons it happens.
pub fn print_failure<W: Write>(out: &mut W, error: &ChatError) -> io::Result<()> {
    writeln!(out, "\nError: {}", error)?;
    if !error.is_transport_failure() {
        return Ok(());
    }
    writeln!(out, "\nMake sure:")?;
    writeln!(out, "1. The TENEX server is running (tenex-tui --server)")?;
    writeln!(out, "2. {PROJECT_VAR} names an existing project")?;
    writeln!(out, "3. The project has an agent online to answer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_includes_checklist() {
        let mut out = Vec::new();
        print_failure(&mut out, &ChatError::ApiError("status 404".to_string())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: API error: status 404"));
        assert!(text.contains("server is running"));
        assert!(text.contains("PROJECT_DTAG"));
        assert!(text.contains("agent online"));
    }

    #[test]
    fn test_config_failure_has_no_checklist() {
        let mut out = Vec::new();
        print_failure(&mut out, &ChatError::ConfigError("bad url".to_string())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid configuration: bad url"));
        assert!(!text.contains("Make sure"));
    }

    #[test]
    fn test_header_names_server_and_project() {
        let mut out = Vec::new();
        print_header(&mut out, &ConnectionConfig::new("http://h:1", "p")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Server: http://h:1"));
        assert!(text.contains("Project: p"));
    }
}
