//! Command-line flag registration and lookup.
//!
//! Every command-line name of a PrecedenceSpec becomes a long flag:
//! port names take an unsigned integer, address names may repeat, root names take
//! a single string. No help or version flags are registered.

use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::config::Settings;

/// Build the parser for the given flag names.
pub(crate) fn command(settings: &Settings) -> Command {
    let ports = settings.port.iter().map(|name| {
        Arg::new(name.clone())
            .long(name.clone())
            .value_name("PORT")
            .action(ArgAction::Set)
            .value_parser(value_parser!(u32))
    });
    let addresses = settings.address.iter().map(|name| {
        Arg::new(name.clone())
            .long(name.clone())
            .value_name("ADDRESS")
            .action(ArgAction::Append)
    });
    let roots = settings.root.iter().map(|name| {
        Arg::new(name.clone())
            .long(name.clone())
            .value_name("ROOT")
            .action(ArgAction::Set)
    });

    Command::new("listen-resolver")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args(ports)
        .args(addresses)
        .args(roots)
}

/// Parse `args` (program name excluded) against the registered flags.
pub(crate) fn parse<I, T>(settings: &Settings, args: I) -> Result<ArgMatches, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    command(settings).try_get_matches_from(args)
}

/// Port given for `name`, when inside 1..=65535.
pub(crate) fn port(matches: &ArgMatches, name: &str) -> Option<u16> {
    matches
        .get_one::<u32>(name)
        .and_then(|&port| u16::try_from(port).ok())
        .filter(|&port| port != 0)
}

/// Every address given for `name`, in argument order.
pub(crate) fn addresses(matches: &ArgMatches, name: &str) -> Vec<String> {
    matches
        .get_many::<String>(name)
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

/// Root given for `name`, when non-empty.
pub(crate) fn root(matches: &ArgMatches, name: &str) -> Option<String> {
    matches
        .get_one::<String>(name)
        .filter(|root| !root.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrecedenceSpec;

    fn parse_default(args: &[&str]) -> Result<ArgMatches, clap::Error> {
        parse(&PrecedenceSpec::default().command_line, args.iter().copied())
    }

    #[test]
    fn reads_every_flag_kind() {
        let matches = parse_default(&[
            "--port",
            "8000",
            "--addr",
            "a",
            "--address=b",
            "--addr",
            "c",
            "--root",
            "/x",
        ])
        .unwrap();

        assert_eq!(port(&matches, "port"), Some(8000));
        assert_eq!(addresses(&matches, "addr"), vec!["a", "c"]);
        assert_eq!(addresses(&matches, "address"), vec!["b"]);
        assert_eq!(root(&matches, "root").as_deref(), Some("/x"));
    }

    #[test]
    fn absent_flags_read_as_unset() {
        let matches = parse_default(&[]).unwrap();
        assert_eq!(port(&matches, "port"), None);
        assert!(addresses(&matches, "addr").is_empty());
        assert_eq!(root(&matches, "root"), None);
    }

    #[test]
    fn out_of_range_ports_read_as_unset() {
        let matches = parse_default(&["--port", "0"]).unwrap();
        assert_eq!(port(&matches, "port"), None);

        let matches = parse_default(&["--port", "65536"]).unwrap();
        assert_eq!(port(&matches, "port"), None);

        let matches = parse_default(&["--port", "65535"]).unwrap();
        assert_eq!(port(&matches, "port"), Some(65535));
    }

    #[test]
    fn empty_root_reads_as_unset() {
        let matches = parse_default(&["--root", ""]).unwrap();
        assert_eq!(root(&matches, "root"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_default(&["--port", "eighty"]).is_err());
        assert!(parse_default(&["--verbose"]).is_err());
        assert!(parse_default(&["stray"]).is_err());
        assert!(parse_default(&["--help"]).is_err());
    }

    #[test]
    fn empty_settings_accept_no_arguments() {
        let settings = Settings::default();
        assert!(parse(&settings, Vec::<String>::new()).is_ok());
        assert!(parse(&settings, ["--port", "1"]).is_err());
    }
}
