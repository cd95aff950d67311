//! Command-line entry point over `surat_core`.
//!
//! # Responsibility
//! - Expose taxonomy, numbering, pagination, preview, archive and reprint flows.
//! - Wire the configured archive backend; no business rules live here.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use surat_core::pagination::plan_pages;
use surat_core::repo::{LetterSort, SortDirection, SortKey};
use surat_core::{
    format_hint, format_letter_number, get_category_options, get_subcategory_options, init_logging,
    open_db, ApiClient, AppConfig, DocumentType, HttpLetterRepository, LetterDocument, LetterForm,
    LetterListQuery, LetterRepository, LetterService, PeopleLayout, Person, RenderContext,
    SqliteLetterRepository, StorageConfig, SubmitError,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "surat", version, about = "Office letter numbering, preview and archive")]
struct Cli {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "surat.toml")]
    config: PathBuf,

    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Command,
}

/// Credentials for the remote backend.
#[derive(Debug, Args)]
struct SessionArgs {
    /// Bearer token from an earlier login.
    #[arg(long, global = true)]
    token: Option<String>,
    #[arg(long, global = true, requires = "password")]
    username: Option<String>,
    #[arg(long, global = true, requires = "username")]
    password: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List top-level letter categories.
    Categories,
    /// List the flattened subcategories of one category.
    Subcategories { category: String },
    /// Format a letter number.
    FormatNumber {
        #[arg(long)]
        nomor: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        subcategory: String,
        #[arg(long)]
        month: String,
        #[arg(long)]
        year: String,
    },
    /// Show how many people land on each printed page.
    Plan {
        #[arg(long)]
        people: usize,
        #[arg(long)]
        table: bool,
    },
    /// Render a form (JSON tagged by `documentType`) as print-ready text.
    Preview {
        form: PathBuf,
        /// Signature date, `YYYY-MM-DD`; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit the page/block model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Validate a form and save it to the configured archive.
    Submit { form: PathBuf },
    /// Search employees by NIP or name on the remote backend.
    SearchEmployee { query: String },
    #[command(subcommand)]
    Archive(ArchiveCommand),
}

#[derive(Debug, Subcommand)]
enum ArchiveCommand {
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    Show { id: String },
    /// Render an archived letter again for printing.
    Preview {
        id: String,
        /// Signature date, `YYYY-MM-DD`; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Remove every archived letter.
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    SuratTugas,
    NotaDinas,
    SuratKeputusan,
}

impl From<KindArg> for DocumentType {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::SuratTugas => Self::SuratTugas,
            KindArg::NotaDinas => Self::NotaDinas,
            KindArg::SuratKeputusan => Self::SuratKeputusan,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Number,
    Title,
    Created,
    People,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Number => Self::LetterNumber,
            SortArg::Title => Self::Title,
            SortArg::Created => Self::CreatedAt,
            SortArg::People => Self::PeopleCount,
        }
    }
}

enum ArchiveAction {
    Submit(LetterForm),
    List(LetterListQuery),
    Show(String),
    Reprint {
        id: String,
        ctx: RenderContext,
        json: bool,
    },
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(Some(&cli.config))?;
    if let Some(dir) = &config.logging.dir {
        init_logging(&config.logging.level, &dir.to_string_lossy())?;
    }

    match cli.command {
        Command::Categories => {
            for option in get_category_options() {
                println!("{}\t{}", option.id, option.name);
            }
        }
        Command::Subcategories { category } => {
            for option in get_subcategory_options(&category) {
                println!("{}\t{}", option.value, option.text);
            }
        }
        Command::FormatNumber {
            nomor,
            category,
            subcategory,
            month,
            year,
        } => {
            let number = format_letter_number(&nomor, &subcategory, &month, &year, &category);
            if number.is_empty() {
                println!("{}", format_hint(&category, &subcategory, &month, &year));
            } else {
                println!("{number}");
            }
        }
        Command::Plan { people, table } => {
            let people: Vec<Person> = (1..=people)
                .map(|index| Person::named(format!("#{index}")))
                .collect();
            let plan = plan_pages(
                &people,
                PeopleLayout::from_table_flag(table),
                &config.pagination,
            );
            println!("needs_pagination={}", plan.needs_pagination);
            println!("first_page={}", plan.first_page_people.len());
            println!("second_page={}", plan.second_page_people.len());
            println!("pages={}", plan.page_count());
        }
        Command::Preview { form, date, json } => {
            let form = read_form(&form)?;
            let ctx = config.render_context(date.unwrap_or_else(|| Local::now().date_naive()));
            print_document(&form.render(&ctx), json)?;
        }
        Command::Submit { form } => {
            let form = read_form(&form)?;
            with_archive(&config, &cli.session, ArchiveAction::Submit(form))?;
        }
        Command::SearchEmployee { query } => {
            let StorageConfig::Remote { base_url, .. } = &config.storage else {
                return Err("employee search needs the remote backend".into());
            };
            let client = connect(base_url, &cli.session)?;
            for person in client.search_employees(&query)? {
                println!(
                    "{}\t{}\t{}\t{}",
                    person.nip, person.nama, person.jabatan, person.unit_kerja
                );
            }
        }
        Command::Archive(command) => {
            let action = match command {
                ArchiveCommand::List {
                    kind,
                    search,
                    sort,
                    desc,
                } => ArchiveAction::List(LetterListQuery {
                    document_type: kind.map(DocumentType::from),
                    search,
                    sort: sort.map(|key| LetterSort {
                        key: key.into(),
                        direction: if desc {
                            SortDirection::Descending
                        } else {
                            SortDirection::Ascending
                        },
                    }),
                }),
                ArchiveCommand::Show { id } => ArchiveAction::Show(id),
                ArchiveCommand::Preview { id, date, json } => ArchiveAction::Reprint {
                    id,
                    ctx: config.render_context(date.unwrap_or_else(|| Local::now().date_naive())),
                    json,
                },
                ArchiveCommand::Clear => ArchiveAction::Clear,
            };
            with_archive(&config, &cli.session, action)?;
        }
    }
    Ok(())
}

fn print_document(document: &LetterDocument, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(document)?);
    } else {
        print!("{}", document.to_plain_text());
    }
    Ok(())
}

fn read_form(path: &Path) -> CliResult<LetterForm> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read form `{}`: {err}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

fn connect(base_url: &str, session: &SessionArgs) -> CliResult<ApiClient> {
    let client = ApiClient::new(base_url)?;
    match (&session.token, &session.username, &session.password) {
        (Some(token), _, _) => Ok(client.with_token(token.clone())),
        (None, Some(username), Some(password)) => {
            client.login(username, password)?;
            Ok(client)
        }
        _ => Err("remote backend needs --token or --username/--password".into()),
    }
}

fn with_archive(config: &AppConfig, session: &SessionArgs, action: ArchiveAction) -> CliResult<()> {
    match &config.storage {
        StorageConfig::Local { db_path } => {
            let conn = open_db(db_path)?;
            let repo = SqliteLetterRepository::try_new(&conn)?;
            execute(LetterService::new(repo), action)
        }
        StorageConfig::Remote {
            base_url,
            created_by,
        } => {
            let client = connect(base_url, session)?;
            let repo = HttpLetterRepository::new(&client, *created_by);
            execute(LetterService::new(repo), action)
        }
    }
}

fn execute<R: LetterRepository>(service: LetterService<R>, action: ArchiveAction) -> CliResult<()> {
    match action {
        ArchiveAction::Submit(form) => match service.submit(&form) {
            Ok(letter) => {
                info!("event=cli_submit module=cli status=ok");
                println!("Tersimpan: {} ({})", letter.letter_number, letter.id);
            }
            Err(SubmitError::Validation(errors)) => {
                for (field, message) in errors.iter() {
                    eprintln!("{field}: {message}");
                }
                return Err(SubmitError::Validation(errors).into());
            }
            Err(err) if err.requires_login() => {
                return Err(format!("{err}; login ulang dengan --username/--password").into());
            }
            Err(err) => return Err(err.into()),
        },
        ArchiveAction::List(query) => {
            for letter in service.list_letters(&query)? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    letter.id,
                    letter.created_at.to_rfc3339(),
                    letter.document_type,
                    letter.letter_number,
                    letter.title
                );
            }
        }
        ArchiveAction::Show(id) => match service.get_letter(&id)? {
            Some(letter) => println!("{}", serde_json::to_string_pretty(&letter)?),
            None => return Err(format!("surat tidak ditemukan: {id}").into()),
        },
        ArchiveAction::Reprint { id, ctx, json } => match service.reprint(&id, &ctx)? {
            Some(document) => print_document(&document, json)?,
            None => return Err(format!("surat tidak ditemukan: {id}").into()),
        },
        ArchiveAction::Clear => {
            service.clear_archive()?;
            println!("Arsip dikosongkan");
        }
    }
    Ok(())
}
