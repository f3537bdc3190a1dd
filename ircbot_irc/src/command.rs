pub const PREFIX: char = '!';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    /// `None` when nothing followed the name, `Some("")` when only whitespace did
    pub arg: Option<&'a str>,
}

/// `!<letters>` optionally followed by whitespace and an argument
pub fn recognize(body: &str) -> Option<ParsedCommand<'_>> {
    let tail = body.strip_prefix(PREFIX)?;
    let end = tail
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tail.len());

    let (name, tail) = tail.split_at(end);
    if name.is_empty() {
        return None;
    }

    if tail.is_empty() {
        return Some(ParsedCommand { name, arg: None });
    }

    tail.starts_with(char::is_whitespace)
        .then(|| ParsedCommand {
            name,
            arg: Some(tail.trim_start()),
        })
}
