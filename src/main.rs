// src/main.rs
//
// Calculatrice décimale: point d’entrée terminal
// ------------------------------------------------
// - une expression par ligne sur l’entrée standard, un résultat par ligne en sortie
// - `-d N` / `--digits N` : places décimales du résultat (plafonnées à 28)
// - verbosité des journaux : RUST_LOG (défaut "warn")

use std::io;
use std::process::ExitCode;

use log::warn;

use calculatrice_decimale::app::{self, AppCalc};
use calculatrice_decimale::noyau::{DECIMALES_DEFAUT, DECIMALES_MAX};

const USAGE: &str = "usage: calculatrice_decimale [-d N | --digits N] [-h | --help]
Lit une expression par ligne sur l’entrée standard.";

/// None : aide demandée.
fn lire_arguments(args: &[String]) -> Result<Option<u32>, String> {
    let mut digits = None;
    let mut it = args.iter();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-d" | "--digits" => {
                let valeur = it.next().ok_or_else(|| format!("{arg} attend une valeur"))?;
                let n = valeur
                    .parse::<u32>()
                    .map_err(|_| format!("nombre de décimales invalide: '{valeur}'"))?;
                digits = Some(n);
            }
            autre => return Err(format!("argument inconnu: '{autre}'")),
        }
    }
    Ok(Some(digits.unwrap_or(DECIMALES_DEFAUT)))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let digits = match lire_arguments(&args) {
        Ok(Some(d)) => d,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if digits > DECIMALES_MAX {
        warn!("{digits} décimales demandées, ramené à {DECIMALES_MAX}");
    }

    let mut app = AppCalc::default();
    app.set_digits(digits);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match app::executer(stdin.lock(), stdout.lock(), &mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("erreur d’entrée/sortie: {e}");
            ExitCode::FAILURE
        }
    }
}
