//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("recordio")
        .about("Pack, dump and check RecordIO files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_pack())
        .subcommand(build_cat())
        .subcommand(build_stat())
        .subcommand(build_scan())
}

fn build_pack() -> Command {
    Command::new("pack")
        .about("Write input files as records (stdin when no inputs are given)")
        .arg(Arg::new("out").required(true).help("Output RecordIO file"))
        .arg(
            Arg::new("inputs")
                .num_args(0..)
                .help("Input files, one record each"),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .help("Write each line of each input as its own record")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("append")
                .long("append")
                .help("Append to the output file instead of truncating it")
                .action(ArgAction::SetTrue),
        )
}

fn build_cat() -> Command {
    Command::new("cat")
        .about("Write every record of a file to stdout")
        .arg(Arg::new("file").required(true).help("RecordIO file"))
        .arg(
            Arg::new("separator")
                .long("separator")
                .short('s')
                .default_value("\n")
                .help("Bytes written after each record"),
        )
        .arg(
            Arg::new("hex")
                .long("hex")
                .help("Print records as lowercase hex")
                .action(ArgAction::SetTrue),
        )
}

fn build_stat() -> Command {
    Command::new("stat")
        .about("Count records, chunks and magic collisions")
        .arg(Arg::new("file").required(true).help("RecordIO file"))
}

fn build_scan() -> Command {
    Command::new("scan")
        .about("Recover records, skipping damaged regions")
        .arg(Arg::new("file").required(true).help("RecordIO file"))
}
