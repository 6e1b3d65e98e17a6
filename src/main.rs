use chrono::{Local, NaiveDate};
use clap::Parser;
use textnote::application::{
    init::init, list_notes::list_notes, ConfigService, OpenNoteService, OpenRequest,
};
use textnote::cli::{format_config, format_note_list, Cli, Commands};
use textnote::domain::TimeReference;
use textnote::error::TextnoteError;
use textnote::infrastructure::FileSystemRepository;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn resolve(time_ref: &str, today: NaiveDate) -> Result<NaiveDate, TextnoteError> {
    TimeReference::parse(time_ref)?.resolve(today)
}

fn run(cli: Cli) -> Result<(), TextnoteError> {
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init { path, sections }) => {
            init(&path, sections)?;
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                print!("{}", format_config(&service.list()?));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: textnote config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: editor, sections, extension, file_date_format, header_date_format"
                );
            }
            Ok(())
        }
        Some(Commands::List { from, to, limit }) => {
            let repo = FileSystemRepository::discover()?;
            let from = from.map(|r| resolve(&r, today)).transpose()?;
            let to = to.map(|r| resolve(&r, today)).transpose()?;

            let notes = list_notes(&repo, from, to, limit)?;
            let output = format_note_list(&notes);
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
            Ok(())
        }
        None => {
            let date = resolve(cli.time_ref.as_deref().unwrap_or("today"), today)?;
            let request = OpenRequest {
                sections: cli.copy,
                source_date: cli.from.map(|r| resolve(&r, today)).transpose()?,
                move_sections: cli.delete,
                ..OpenRequest::new(date)
            };

            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let root = repo.root().to_path_buf();
            let service = OpenNoteService::new(repo, root, config);

            let path = service.execute(&request, !cli.no_edit)?;
            if cli.no_edit {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}
