// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .value_name("TYPE")
            .help("all | income | expense | upcoming"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Start of date range (inclusive, needs --to)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("End of date range (inclusive, needs --from)"),
    )
}

fn page_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("page")
            .long("page")
            .value_parser(value_parser!(usize))
            .default_value("1"),
    )
    .arg(
        Arg::new("page-size")
            .long("page-size")
            .value_parser(value_parser!(usize))
            .default_value("10"),
    )
}

fn tx_form_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("title").long("title").required(required))
        .arg(Arg::new("description").long("description"))
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(required)
                .help("Positive magnitude; the type carries the sign"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .required(required)
                .help("income | expense | upcoming"),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .value_name("YYYY-MM-DD")
                .help("Defaults to now"),
        )
}

fn goal_form_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(Arg::new("description").long("description"))
        .arg(
            Arg::new("time-limit")
                .long("time-limit")
                .value_name("YYYY-MM-DD")
                .required(required),
        )
}

pub fn build_cli() -> Command {
    Command::new("inflow")
        .about("Inflow: transactions, goals, analysis and an assistant for your finances")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides INFLOW_API_URL and saved config)"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use the local store instead of the backend"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("config")
                .about("Session configuration")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-api").arg(Arg::new("url").required(true))),
        )
        .subcommand(
            Command::new("auth")
                .about("Sign in and out")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("profile"))
                .subcommand(Command::new("logout")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(tx_form_args(Command::new("add"), true))
                .subcommand(tx_form_args(
                    Command::new("edit").arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("delete").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(page_args(filter_args(Command::new("list"))))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(goal_form_args(Command::new("add"), true))
                .subcommand(goal_form_args(
                    Command::new("edit").arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("delete").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("toggle").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("overdue")
                            .long("overdue")
                            .action(ArgAction::SetTrue)
                            .help("Only goals past their time limit"),
                    ),
                )),
        )
        .subcommand(json_flags(page_args(filter_args(
            Command::new("analysis")
                .about("Type and monthly totals with the filtered list")
                .arg(
                    Arg::new("segment")
                        .long("segment")
                        .action(ArgAction::Append)
                        .value_name("TYPE")
                        .help("Pie segment click; repeat to replay a click sequence"),
                ),
        ))))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Totals, overdue goals and recent transactions")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                ),
        ))
        .subcommand(
            Command::new("insights")
                .about("Assistant-generated categorisation and summary")
                .subcommand(json_flags(Command::new("categorise")))
                .subcommand(json_flags(Command::new("summarise"))),
        )
        .subcommand(
            Command::new("chat")
                .about("Talk to the financial assistant")
                .arg(
                    Arg::new("message")
                        .long("message")
                        .short('m')
                        .help("Ask one question and exit"),
                ),
        )
        .subcommand(
            Command::new("contact")
                .about("Send a message to the Inflow team")
                .arg(Arg::new("name").long("name").default_value(""))
                .arg(Arg::new("email").long("email").default_value(""))
                .arg(Arg::new("message").long("message").default_value("")),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(filter_args(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
