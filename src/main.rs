use clap::Parser as CliParser;
use glade_lang::environment::Env;
use glade_lang::parser::Parser;
use glade_lang::{evaluator, RunError};
use log::error;

#[derive(CliParser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long)]
    file: std::path::PathBuf,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let file_content = std::fs::read_to_string(&args.file).unwrap_or_else(|_| {
        panic!("Could not read file: '{}'", args.file.to_string_lossy())
    });

    let (program, errors) = Parser::new().parse_program(&file_content);

    if !errors.is_empty() {
        eprintln!("{}", RunError::Parse(errors));
        std::process::exit(1);
    }

    match evaluator::eval_program(&program, &Env::new()) {
        Ok(value) => println!("{}", value.inspect()),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
