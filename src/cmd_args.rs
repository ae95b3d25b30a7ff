use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Optional. Profile section to read from the profile file. Default is 'default'.
    /// If the profile is not configured, built-in defaults are used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Evaluation server
    /// Optional. Base URL of the evaluation service. Overrides the profile's server.
    #[clap(short = 's', long, help = "evaluation server base URL")]
    server: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&String> {
        self.server.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert_eq!(args.server(), None);
    }

    #[test]
    fn test_parse_args_server() {
        let args = CommandLineArgs::parse_from(["program", "--server", "http://calc.local:8000"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(
            args.server().map(String::as_str),
            Some("http://calc.local:8000")
        );
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-s", "http://x"]);
        assert_eq!(args.profile(), "dev");
        assert_eq!(args.server().map(String::as_str), Some("http://x"));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert!(args.server().is_none());
    }
}
