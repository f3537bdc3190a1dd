#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Disconnected,
    Connecting,
    Registering,
    Joined,
    Listening,
}

#[derive(Copy, Clone)]
pub struct Registration<'a> {
    pub nick: &'a str,
    pub realname: &'a str,
    pub password: Option<&'a str>,
}
