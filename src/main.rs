use html_grader::{ cli::Cli, run, };
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::args()) {
        Ok(report) => println!("{report}"),
        Err(err) => {
            eprintln!("{err:#}");
            exit(1);
        }
    }

}
