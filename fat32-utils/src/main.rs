#[macro_use]
extern crate log;

mod cat;
mod dump;
mod list;
mod partition;

use clap::Parser;
use fat32::FAT32;

use partition::Partition;

#[derive(Debug, clap::Args)]
struct List {
    /// Specify path to list, default to current directory
    #[clap(default_value = ".")]
    path: String,
}

#[derive(Debug, clap::Args)]
struct Cat {
    /// Specify path to concatenate
    path: String,
}

#[derive(Debug, clap::Args)]
struct Dump {
    /// Specify cluster number to dump
    cluster: u32,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Print volume geometry
    Info,
    /// List file and directory in specified path
    #[clap(name = "ls")]
    List(List),
    /// Concatenate file and print on the standard output
    Cat(Cat),
    /// Print current directory
    #[clap(name = "pwd")]
    PrintWorkingDirectory,
    /// Hex dump a cluster
    Dump(Dump),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// block device or file that formatted with fat32
    #[clap(short, long)]
    device: String,
    /// MBR partition index, whole device if absent
    #[clap(short, long)]
    partition: Option<usize>,
    /// Change directory before action
    #[clap(long)]
    cd: Option<String>,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stdout).init();

    let io = match Partition::open(&args.device, args.partition) {
        Ok(io) => io,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };
    let mut fat32 = match FAT32::mount(io) {
        Ok(fat32) => fat32,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let mut result = match args.cd {
        Some(path) => fat32.change_directory(&path),
        None => Ok(()),
    };
    if result.is_ok() {
        result = match args.action {
            Action::Info => {
                dump::info(&fat32);
                Ok(())
            }
            Action::List(args) => list::list(&mut fat32, &args.path),
            Action::Cat(args) => cat::cat(&mut fat32, &args.path),
            Action::PrintWorkingDirectory => {
                println!("{}", fat32.current_path());
                Ok(())
            }
            Action::Dump(args) => dump::dump(&mut fat32, args.cluster),
        };
    }
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
