// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

// Where records come from and who is looking at them.
fn source_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("group")
            .long("group")
            .value_parser(value_parser!(i64))
            .help("Group id to fetch from the backend"),
    )
    .arg(
        Arg::new("file")
            .long("file")
            .help("Read expenses from a JSON export instead of the backend"),
    )
    .arg(
        Arg::new("member")
            .long("member")
            .value_parser(value_parser!(i64))
            .conflicts_with("profile")
            .help("Viewer's member id in the group"),
    )
    .arg(
        Arg::new("profile")
            .long("profile")
            .help("Viewer's profile id; the member id is looked up per group"),
    )
}

fn feed_args(cmd: Command) -> Command {
    source_args(cmd)
        .arg(
            Arg::new("tz")
                .long("tz")
                .default_value("local")
                .help("Zone deciding the calendar day: local, utc, an IANA name, or +HH:MM"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .help("Only keep expenses whose title matches this regex"),
        )
}

pub fn build_cli() -> Command {
    Command::new("tabsplit")
        .version(crate_version!())
        .about("Shared-expense feed, balance impact, and group overview")
        .subcommand(json_args(feed_args(
            Command::new("feed").about("List a group's expenses by day with your impact"),
        )))
        .subcommand(json_args(
            source_args(Command::new("impact").about("Show your impact for one expense")).arg(
                Arg::new("expense")
                    .long("expense")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        ))
        .subcommand(
            Command::new("groups")
                .about("Group overview and pinned groups")
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("file")
                            .long("file")
                            .help("Read groups from a JSON export instead of the backend"),
                    ),
                ))
                .subcommand(
                    Command::new("anchor").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("unanchor").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the day feed to a file")
                .subcommand(feed_args(
                    Command::new("feed")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Backend connection and viewer identity")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("backend-url").long("backend-url"))
                        .arg(Arg::new("api-key").long("api-key"))
                        .arg(Arg::new("profile").long("profile")),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn member_and_profile_conflict() {
        let r = build_cli().try_get_matches_from([
            "tabsplit", "feed", "--group", "1", "--member", "2", "--profile", "p",
        ]);
        assert!(r.is_err());
    }
}
