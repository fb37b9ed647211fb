/*
 * pando is a decentralized, content-addressed version-control core
 * Copyright (C) 2026  Javier Lancha Vázquez <javier.lancha@gmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use clap::Parser;

use pando::commands::{self, Cli, Command};
use pando::ui;

fn run(args: &Cli) -> pando::Result<()> {
    match &args.command {
        Command::Init(cmd_args) => commands::init::run(&args.global_args, cmd_args),
        Command::Status(cmd_args) => commands::status::run(&args.global_args, cmd_args),
        Command::Stage(cmd_args) => commands::stage::run(&args.global_args, cmd_args),
        Command::Snapshot(cmd_args) => commands::snapshot::run(&args.global_args, cmd_args),
        Command::Branch(cmd_args) => commands::branch::run(&args.global_args, cmd_args),
        Command::Checkout(cmd_args) => commands::checkout::run(&args.global_args, cmd_args),
        Command::Merge(cmd_args) => commands::merge::run(&args.global_args, cmd_args),
        Command::Log(cmd_args) => commands::log::run(&args.global_args, cmd_args),
    }
}

fn main() {
    let args = Cli::parse();
    args.global_args.apply_verbosity();

    if let Err(e) = run(&args) {
        ui::log_error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
