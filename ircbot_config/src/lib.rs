use std::path::Path;

use anyhow::Context;

mod secret;
pub use secret::Secret;

fn redact(s: &str) -> impl std::fmt::Debug {
    struct NoDebug(String);
    impl std::fmt::Debug for NoDebug {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    NoDebug(format!("{{len = {}}}", s.len()))
}

pub fn load_from_file<T>(path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let path = path.as_ref();
    log::trace!("loading {} from {}", std::any::type_name::<T>(), path.display());

    let data = std::fs::read_to_string(path)
        .with_context(|| anyhow::anyhow!("cannot read '{}'", path.display()))?;
    load_from_str(&data).with_context(|| anyhow::anyhow!("cannot parse '{}'", path.display()))
}

pub fn load_from_str<T>(data: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    toml::from_str(data).map_err(Into::into)
}

pub type Assign<T> = fn(&mut T, String);

pub fn apply_env<T>(mut this: T, keys: &[(&str, Assign<T>)]) -> T {
    apply_with(&mut this, keys, |key| std::env::var(key).ok());
    this
}

fn apply_with<T>(this: &mut T, keys: &[(&str, Assign<T>)], get: impl Fn(&str) -> Option<String>) {
    for &(key, func) in keys {
        log::trace!("looking up {key}");
        if let Some(val) = get(key).filter(|s| !s.is_empty()) {
            log::debug!("overriding {} from {key}", std::any::type_name::<T>());
            func(this, val)
        }
    }
}

pub trait LoadFromEnv
where
    Self: Sized,
{
    fn apply_env(self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, serde::Deserialize)]
    struct Thing {
        name: String,
        token: Secret<String>,
    }

    #[test]
    fn secret_is_redacted() {
        let thing: Thing = load_from_str(
            r#"
            name = "foo"
            token = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(thing.name, "foo");
        assert_eq!(&*thing.token, "hunter2");
        assert_eq!(format!("{:?}", thing.token), "{len = 7}");
        assert!(!format!("{thing:?}").contains("hunter2"));
    }

    #[test]
    fn env_overrides_only_present_keys() {
        let mut thing = Thing::default();
        let keys: &[(&str, Assign<Thing>)] = &[
            ("THING_NAME", |t, v| t.name = v),
            ("THING_TOKEN", |t, v| t.token = Secret(v)),
        ];

        apply_with(&mut thing, keys, |key| {
            (key == "THING_TOKEN").then(|| String::from("from env"))
        });
        assert_eq!(thing.name, "");
        assert_eq!(&*thing.token, "from env");

        apply_with(&mut thing, keys, |_| Some(String::new()));
        assert_eq!(&*thing.token, "from env");
    }
}
