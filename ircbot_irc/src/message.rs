#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Message<'a> {
    Ping { token: &'a str },
    Chat(Privmsg<'a>),
    Unrecognized,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Privmsg<'a> {
    pub sender: Sender<'a>,
    pub target: &'a str,
    pub body: &'a str,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sender<'a> {
    pub raw: &'a str,
    pub nick: &'a str,
    pub user: &'a str,
    pub host: &'a str,
}

impl<'a> Sender<'a> {
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (nick, tail) = raw.split_once('!')?;
        let (user, host) = tail.split_once('@')?;
        [nick, user, host]
            .iter()
            .all(|s| !s.is_empty())
            .then_some(Self {
                raw,
                nick,
                user,
                host,
            })
    }
}

impl std::fmt::Display for Sender<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}
