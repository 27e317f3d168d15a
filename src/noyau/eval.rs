//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> découpe (arbre) -> évaluation postfixe (Fraction) -> valeur décimale -> arrondi
//!
//! Aucun état partagé : chaque appel construit ses jetons et son arbre, puis les jette.

use log::debug;
use rust_decimal::Decimal;

use super::decoupe::parse;
use super::erreurs::CalcError;
use super::format::{format_arbre, format_fraction, format_resultat};
use super::jetons::{format_tokens, tokenize};

/// Places décimales du résultat par défaut.
pub const DECIMALES_DEFAUT: u32 = 20;
/// Échelle maximale du substrat décimal.
pub const DECIMALES_MAX: u32 = 28;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
    pub exact: String,
    pub note: String,
}

/// API publique minimale : résultat arrondi à DECIMALES_DEFAUT places.
pub fn evaluate(expr_str: &str) -> Result<String, CalcError> {
    eval_expression(expr_str, DECIMALES_DEFAUT).map(|(resultat, _)| resultat)
}

/// Évalue une expression et retourne le résultat arrondi et la démarche
/// (jetons, arbre, fraction exacte). `decimales` est ramené à DECIMALES_MAX.
pub fn eval_expression(
    expr_str: &str,
    decimales: u32,
) -> Result<(String, DemarcheNoyau), CalcError> {
    let decimales = decimales.min(DECIMALES_MAX);

    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    // 2) Arbre
    let arbre = parse(&jetons)?;
    let arbre_txt = format_arbre(&arbre);
    debug!("arbre: {arbre_txt} ({} nœuds)", arbre.taille());

    // 3) Valeur exacte puis lecture décimale
    let exact = arbre.evaluate()?;
    let valeur = exact.value()?;
    let resultat = format_resultat(valeur, decimales);
    debug!("exact: {exact} -> {resultat}");

    let note = if exact.denom() == Decimal::ONE {
        String::new()
    } else {
        format!("arrondi à {decimales} décimales")
    };

    Ok((
        resultat,
        DemarcheNoyau {
            jetons: jetons_txt,
            arbre: arbre_txt,
            exact: format_fraction(&exact),
            note,
        },
    ))
}
