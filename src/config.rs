use std::env;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";

/// Settings read once when the lambda process starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Topic that upload notifications are published to. `None` disables publishing.
    pub sns_topic_arn: Option<String>,
    /// Value sent back in `Access-Control-Allow-Origin`.
    pub allowed_origin: String,
    /// Whether faults logged by the handler carry stack frames. Follows the
    /// std rules for `RUST_LIB_BACKTRACE` and `RUST_BACKTRACE`.
    pub backtraces_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let sns_topic_arn = lookup("SNS_TOPIC_ARN")
            .map(|arn| arn.trim().to_string())
            .filter(|arn| !arn.is_empty());

        // Only an unset origin gets the default, an empty one is sent back as is.
        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let backtraces_enabled = lookup("RUST_LIB_BACKTRACE")
            .or_else(|| lookup("RUST_BACKTRACE"))
            .is_some_and(|value| value != "0");

        Self {
            sns_topic_arn,
            allowed_origin,
            backtraces_enabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.sns_topic_arn, None);
        assert_eq!(config.allowed_origin, "*");
        assert!(!config.backtraces_enabled);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_topic_disables_publishing() {
        assert_eq!(config_from(&[("SNS_TOPIC_ARN", "")]).sns_topic_arn, None);
        assert_eq!(config_from(&[("SNS_TOPIC_ARN", "   ")]).sns_topic_arn, None);
    }

    #[test]
    fn reads_topic_and_origin() {
        let config = config_from(&[
            ("SNS_TOPIC_ARN", "arn:aws:sns:eu-north-1:123456789012:uploads"),
            ("ALLOWED_ORIGIN", "https://videos.example.com"),
        ]);
        assert_eq!(
            config.sns_topic_arn.as_deref(),
            Some("arn:aws:sns:eu-north-1:123456789012:uploads")
        );
        assert_eq!(config.allowed_origin, "https://videos.example.com");
    }

    #[test]
    fn empty_origin_is_sent_back_unchanged() {
        assert_eq!(config_from(&[("ALLOWED_ORIGIN", "")]).allowed_origin, "");
    }

    #[test]
    fn backtraces_follow_std_variables() {
        assert!(!config_from(&[]).backtraces_enabled);
        assert!(config_from(&[("RUST_BACKTRACE", "1")]).backtraces_enabled);
        assert!(config_from(&[("RUST_LIB_BACKTRACE", "full")]).backtraces_enabled);
        assert!(!config_from(&[("RUST_BACKTRACE", "0")]).backtraces_enabled);
        assert!(
            !config_from(&[("RUST_BACKTRACE", "1"), ("RUST_LIB_BACKTRACE", "0")]).backtraces_enabled
        );
    }
}
