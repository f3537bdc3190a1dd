use super::{Message, Privmsg, Sender};

pub fn parse(line: &str) -> Message<'_> {
    if let Some(token) = ping(line) {
        return Message::Ping { token };
    }
    privmsg(line).map_or(Message::Unrecognized, Message::Chat)
}

fn ping(line: &str) -> Option<&str> {
    line.strip_prefix("PING :")
        .or_else(|| line.strip_prefix("PING "))
}

// :<nick>!<user>@<host> PRIVMSG <target> :<body>
fn privmsg(line: &str) -> Option<Privmsg<'_>> {
    let (prefix, tail) = line.strip_prefix(':')?.split_once(' ')?;
    let sender = Sender::parse(prefix)?;

    let (command, tail) = tail.split_once(' ')?;
    if !command.eq_ignore_ascii_case("PRIVMSG") {
        return None;
    }

    let (target, body) = tail.split_once(" :")?;
    if target.is_empty() || target.contains(' ') {
        return None;
    }

    Some(Privmsg {
        sender,
        target,
        body,
    })
}
