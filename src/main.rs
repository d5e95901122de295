use clap::{Parser as ClapParser, Subcommand};
use setlang::cli::{self, CliError, RunOptions, RunResult};
use setlang::Engine;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "setl")]
#[command(about = "setl - declarative field transformations for JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and execute a script
    Run {
        /// The script to execute
        script: Option<String>,

        /// Read the script from a file
        #[arg(short, long, conflicts_with = "script")]
        file: Option<String>,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// List available transformers
    Transformers,

    /// Run the sample script against the sample document
    Demo {
        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            script,
            file,
            input,
            pretty,
            syntax_only,
        } => run(script, file, input, pretty, syntax_only),
        Commands::Transformers => {
            print!("{}", cli::get_transformers_overview(Engine::new().registry()));
            Ok(())
        }
        Commands::Demo { pretty } => cli::execute_demo(pretty).map(|output| println!("{}", output)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    script: Option<String>,
    file: Option<String>,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        script,
        script_file: file,
        input,
        pretty,
        syntax_only,
    };

    match cli::execute_run(&options)? {
        RunResult::SyntaxValid(programs) => {
            for program in &programs {
                println!("{}", program);
            }
            println!("Syntax is valid ({} programs)", programs.len());
        }
        RunResult::Success(output) => println!("{}", output),
    }
    Ok(())
}
