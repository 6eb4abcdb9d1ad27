//! `eventol` admin command line.
//!
//! # Responsibility
//! - Open (and migrate) the event database.
//! - Run venue-scoped list, detail and export requests as a named user.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventol_core::db::migrations::{current_version, latest_version};
use eventol_core::{
    default_log_level, init_logging, open_db, AdminService, EntityRegistry, ExportFormat,
    LogConfig, Record, RecordId, RecordTable,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eventol", version, about = "Venue-scoped admin tools for EventoL")]
struct Cli {
    /// SQLite database file; created and migrated when missing
    #[arg(long, env = "EVENTOL_DB")]
    db: PathBuf,
    /// Directory for rotating log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, default_value = default_log_level())]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations and print the schema version
    Migrate,
    /// List registered entity names
    Entities,
    /// Print records visible to a user
    List {
        entity: String,
        #[arg(long)]
        user: String,
    },
    /// Print one record if visible to a user
    Get {
        entity: String,
        id: RecordId,
        #[arg(long)]
        user: String,
    },
    /// Export records visible to a user
    Export {
        entity: String,
        #[arg(long)]
        user: String,
        /// csv|json
        #[arg(long, value_parser = ExportFormat::parse, default_value = "csv")]
        format: ExportFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("resolving log dir {}", dir.display()))?;
        let config = LogConfig::new(&cli.log_level, dir)?;
        init_logging(&config)?;
    }

    let conn = open_db(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    let registry = EntityRegistry::eventol_default()?;
    let service = AdminService::new(&conn, &registry);

    match cli.command {
        Command::Migrate => {
            println!(
                "schema_version={} latest={}",
                current_version(&conn)?,
                latest_version()
            );
        }
        Command::Entities => {
            for name in registry.entity_names() {
                println!("{name}");
            }
        }
        Command::List { entity, user } => {
            let table = service.list(&user, &entity)?;
            print_table(&table);
        }
        Command::Get { entity, id, user } => match service.get(&user, &entity, id)? {
            Some(record) => print_record(&record),
            None => anyhow::bail!("{entity} {id} not found"),
        },
        Command::Export {
            entity,
            user,
            format,
        } => {
            let rendered = service.export(&user, &entity, format)?;
            print!("{rendered}");
        }
    }

    log::logger().flush();
    Ok(())
}

fn print_table(table: &RecordTable) {
    println!("{}", header_line(table));
    for record in &table.rows {
        print_record(record);
    }
    eprintln!("{} row(s)", table.len());
}

fn print_record(record: &Record) {
    println!("{}", record_line(record));
}

/// `id` first so listed rows can be fed back into `eventol get`.
fn header_line(table: &RecordTable) -> String {
    std::iter::once("id")
        .chain(table.columns.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\t")
}

fn record_line(record: &Record) -> String {
    std::iter::once(record.id.to_string())
        .chain(record.values.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::{header_line, record_line, Cli, Command};
    use clap::Parser;
    use eventol_core::{CellValue, EntityKind, ExportFormat, Record, RecordTable};

    #[test]
    fn listing_lines_lead_with_the_record_id() {
        let table = RecordTable {
            entity: EntityKind::Comment,
            columns: vec!["activity".to_string(), "created".to_string(), "user".to_string()],
            rows: vec![Record {
                id: 12,
                values: vec![
                    CellValue::Integer(3),
                    CellValue::Integer(1_714_176_000_000),
                    CellValue::Null,
                ],
            }],
        };

        assert_eq!(header_line(&table), "id\tactivity\tcreated\tuser");
        assert_eq!(record_line(&table.rows[0]), "12\t3\t1714176000000\t");
    }

    #[test]
    fn export_format_is_parsed_by_core() {
        let cli = Cli::try_parse_from([
            "eventol", "--db", "events.db", "export", "comment", "--user", "ana", "--format",
            "JSON",
        ])
        .expect("valid args");
        match cli.command {
            Command::Export { format, .. } => assert_eq!(format, ExportFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }

        let defaulted =
            Cli::try_parse_from(["eventol", "--db", "events.db", "export", "venue", "--user", "ana"])
                .expect("valid args");
        assert!(matches!(
            defaulted.command,
            Command::Export {
                format: ExportFormat::Csv,
                ..
            }
        ));

        assert!(Cli::try_parse_from([
            "eventol", "--db", "events.db", "export", "venue", "--user", "ana", "--format", "xlsx",
        ])
        .is_err());
    }
}
