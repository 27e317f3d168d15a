//! Noyau décimal exact
//!
//! Organisation interne :
//! - erreurs.rs      : taxonomie des erreurs (CalcError)
//! - jetons.rs       : découpage en jetons (classes de caractères)
//! - decoupe.rs      : jetons -> arbre (découpe sur la plus faible priorité)
//! - expr.rs         : arbre + évaluation postfixe
//! - rationnel.rs    : Fraction exacte sur Decimal
//! - elementaires.rs : constantes + séries (ln, exp, sin, cos, tan)
//! - format.rs       : arrondi du résultat, rendu fraction / arbre
//! - eval.rs         : pipeline complet

pub mod decoupe;
pub mod elementaires;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rationnel;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreurs::CalcError;
pub use eval::{eval_expression, evaluate, DemarcheNoyau, DECIMALES_DEFAUT, DECIMALES_MAX};
