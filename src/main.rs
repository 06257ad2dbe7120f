//! Composition root: resolve settings, build the facade once, run startup

use recon_logger::prelude::*;
use recon_logger::{debug, error, info, warning};
use std::io;
use std::process::ExitCode;

fn run(log: &LoggerFacade, settings: &Settings) {
    info!(log.app(), "Iniciando la aplicación"; version = env!("CARGO_PKG_VERSION"));

    info!(log.excel(), "Preparando para procesar archivo Excel");
    debug!(log.excel(), "Configurando parámetros de lectura");

    info!(log.siigo(), "Iniciando conexión con SIIGO");
    if settings.siigo.api_url.is_empty() {
        warning!(
            log.siigo(),
            "api_url vacía, la conexión con SIIGO queda deshabilitada";
            config_file = settings.config_file.display().to_string()
        );
    }

    let controlled = io::Error::new(io::ErrorKind::InvalidData, "Ejemplo de error controlado");
    error!(log.error(), source = &controlled, "Error en el procesamiento: {}", controlled);

    info!(log.app(), "Aplicación inicializada correctamente");
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let factory = LoggerFactory::new(SharedSettings::new(settings));
    let log = match LoggerFacade::new(&factory) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to initialize loggers: {}", e);
            return ExitCode::FAILURE;
        }
    };

    run(&log, &factory.settings().current());

    if let Err(e) = log.flush() {
        eprintln!("Failed to flush logs: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
