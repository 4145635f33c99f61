use journal_common::analysis::{Analyzer, PendingAnalyzer};
use journal_common::db::entry::Dao;
use journal_common::db::in_memory::InMemoryDao;
use journal_common::db::{self, EntryRepository};
use journal_common::service::EntryService;

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use flexi_logger::{Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming, WriteMode};
use std::sync::Arc;

mod env;
mod handlers;
mod services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let mut port = 9000u16;
    let mut bind_addr = String::from("127.0.0.1");

    let mut args = std::env::args();

    // Eat the first argument, which is the relative path to the executable
    args.next();

    while let Some(arg) = args.next() {
        match arg.to_lowercase().as_str() {
            "--port" => {
                let port_str = {
                    let next_arg = args.next();

                    match next_arg {
                        Some(s) => s,
                        None => {
                            eprintln!("ERROR: --port option specified but no port was given");
                            std::process::exit(1);
                        }
                    }
                };

                port = {
                    let port_result = port_str.parse::<u16>();

                    match port_result {
                        Ok(p) => p,
                        Err(_) => {
                            eprintln!("ERROR: Incorrect format for port. Integer expected");
                            std::process::exit(1);
                        }
                    }
                };

                continue;
            }
            "--bind" => {
                bind_addr = match args.next() {
                    Some(a) => a,
                    None => {
                        eprintln!("ERROR: --bind option specified but no address was given");
                        std::process::exit(1);
                    }
                };

                continue;
            }
            a => {
                eprintln!("ERROR: Invalid argument: {}", &a);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = env::Config::from_env() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }

    let base_addr = format!("{}:{}", &bind_addr, &port);

    let logger = match Logger::try_with_str(&env::CONF.log_level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("ERROR: Invalid log level '{}': {e}", env::CONF.log_level);
            std::process::exit(1);
        }
    };

    let _logger = logger
        .log_to_file(FileSpec::default().directory(&env::CONF.log_dir))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogAndCompressedFiles(60, 365),
        )
        .cleanup_in_background_thread(true)
        .duplicate_to_stdout(Duplicate::All)
        .write_mode(WriteMode::Async)
        .format(|writer, now, record| {
            write!(
                writer,
                "{:5} | {} | {}:{} | {}",
                record.level(),
                now.format("%Y-%m-%dT%H:%M:%S%.6fZ"),
                record.module_path().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .use_utc()
        .start()
        .expect("Failed to start logger");

    let actix_workers = env::CONF.actix_worker_count;

    let (repository, db_async_pool): (Arc<dyn EntryRepository>, _) = match &env::CONF.db {
        Some(db_config) => {
            log::info!("Connecting to database...");

            // To prevent resource starvation, max connections must be at least as large as the
            // number of actix workers
            let db_max_connections = db_config.max_connections.max(actix_workers as u32);

            let db_async_pool = match db::create_db_async_pool(
                &db_config.database_uri(),
                db_max_connections,
                db_config.idle_timeout,
            )
            .await
            {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("ERROR: Failed to connect to database: {e}");
                    std::process::exit(1);
                }
            };

            log::info!("Successfully connected to database");

            if db_config.run_migrations {
                if let Err(e) = db::create_schema_if_missing(&db_async_pool).await {
                    eprintln!("ERROR: Failed to create database schema: {e}");
                    std::process::exit(1);
                }

                log::info!("Database schema is up to date");
            }

            let repository: Arc<dyn EntryRepository> = Arc::new(Dao::new(&db_async_pool));
            (repository, Some(Data::new(db_async_pool)))
        }
        None => {
            log::warn!("No database host configured. Entries will be kept in memory.");
            let repository: Arc<dyn EntryRepository> = Arc::new(InMemoryDao::new());
            (repository, None)
        }
    };

    let entry_service = Data::new(EntryService::new(repository));

    let analyzer: Analyzer = Box::new(PendingAnalyzer::new());
    let analyzer = Data::new(analyzer);

    log::info!("Listening on {base_addr}");

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(entry_service.clone())
            .app_data(analyzer.clone());

        if let Some(db_async_pool) = &db_async_pool {
            app = app.app_data(db_async_pool.clone());
        }

        app.configure(services::api::configure)
            .wrap(actix_web::middleware::Logger::default())
    })
    .workers(actix_workers)
    .bind(base_addr)?
    .run()
    .await?;

    Ok(())
}
