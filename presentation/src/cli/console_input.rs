//! Parsing of lines typed into the console driver

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// `name: text`, a reply posted by a group member
    Reply { sender: String, text: String },
    /// `/auth <identity> <code>`, stands in for the authorization callback
    Authorize { identity: String, code: String },
}

impl ConsoleInput {
    /// Parse a line; `None` for blank or unrecognized input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("/auth") {
            let mut parts = rest.split_whitespace();
            let identity = parts.next()?;
            let code = parts.next()?;
            return Some(ConsoleInput::Authorize {
                identity: identity.to_string(),
                code: code.to_string(),
            });
        }

        let (sender, text) = line.split_once(':')?;
        let (sender, text) = (sender.trim(), text.trim());
        if sender.is_empty() || sender.contains(char::is_whitespace) || text.is_empty() {
            return None;
        }
        Some(ConsoleInput::Reply {
            sender: sender.to_string(),
            text: text.to_string(),
        })
    }
}
