//! Handlers that hand work to other desktop programs

use std::process::{Command, Stdio};

use reqwest::Url;

use crate::command::dispatcher::{Handler, HandlerCall, HandlerError, SideChannel};

/// Start `program` with `args` and leave it running
fn spawn_detached(program: &str, args: &[&str]) -> Result<(), HandlerError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

/// Opens a terminal window
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    program: String,
}

impl TerminalLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Handler for TerminalLauncher {
    fn handle(&self, _call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        spawn_detached(&self.program, &[])?;
        tracing::info!(program = %self.program, "Opened terminal");
        Ok(SideChannel::new("", " Terminal Opened"))
    }
}

/// Opens a search page for the parameter text in the browser
#[derive(Debug, Clone)]
pub struct WebSearch {
    opener: String,
    base_url: &'static str,
    query_key: &'static str,
    default_query: &'static str,
}

impl WebSearch {
    pub fn google(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
            base_url: "https://www.google.com/search",
            query_key: "q",
            default_query: "Google",
        }
    }

    pub fn youtube(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
            base_url: "https://www.youtube.com/results",
            query_key: "search_query",
            default_query: "Youtube",
        }
    }

    pub fn search_url(&self, call: &HandlerCall) -> Result<Url, HandlerError> {
        let query = call.parameter_text().unwrap_or(self.default_query);
        Url::parse_with_params(self.base_url, &[(self.query_key, query)])
            .map_err(|e| HandlerError::Failed(format!("bad search URL: {e}")))
    }
}

impl Handler for WebSearch {
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        let url = self.search_url(call)?;
        spawn_detached(&self.opener, &[url.as_str()])?;
        tracing::info!(%url, "Opened search");
        Ok(SideChannel::new(format!(" {url}"), ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_url_encodes_query() {
        let search = WebSearch::google("xdg-open");
        let url = search
            .search_url(&HandlerCall::new("search google ", " rust & tokio"))
            .unwrap();
        assert_eq!(url.as_str(), "https://www.google.com/search?q=rust+%26+tokio");
    }

    #[test]
    fn test_youtube_default_query() {
        let search = WebSearch::youtube("xdg-open");
        let url = search.search_url(&HandlerCall::new("play a video", "")).unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/results?search_query=Youtube");
    }

    #[test]
    fn test_missing_opener_is_io_error() {
        let search = WebSearch::google("conviva-no-such-opener");
        let result = search.handle(&HandlerCall::new("search", " x"));
        assert!(matches!(result, Err(HandlerError::Io(_))));
    }

    #[test]
    fn test_missing_terminal_is_io_error() {
        let launcher = TerminalLauncher::new("conviva-no-such-terminal");
        assert!(launcher.handle(&HandlerCall::new("open cmd", "")).is_err());
    }
}
