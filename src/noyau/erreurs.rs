// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// Une erreur est toujours locale à un appel d’évaluation : rien ne survit à un échec.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /* ------------------------ Lexicales ------------------------ */
    #[error("Caractère inattendu à la position {position}.")]
    UnexpectedChar { position: usize },

    #[error("Fin d’expression inattendue (position {position}).")]
    UnexpectedEnd { position: usize },

    #[error("Nombre invalide '{text}' à la position {position}.")]
    InvalidNumber { text: String, position: usize },

    #[error("Fonction inconnue '{name}'.")]
    UnknownFunction { name: String },

    /* ------------------------ Syntaxe ------------------------ */
    #[error("Entrée vide.")]
    EmptyInput,

    #[error("Expression mal formée : {0}.")]
    Syntax(String),

    /* ------------------------ Évaluation ------------------------ */
    #[error("Fonction '{0}' non implémentée.")]
    NotImplemented(String),

    #[error("Hors domaine : {0}.")]
    Domain(String),

    #[error("Division par zéro.")]
    DivideByZero,

    #[error("Dépassement de capacité du décimal.")]
    Overflow,
}

impl CalcError {
    /// Erreur levée par le découpage en jetons (avant tout arbre).
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            CalcError::UnexpectedChar { .. }
                | CalcError::UnexpectedEnd { .. }
                | CalcError::InvalidNumber { .. }
                | CalcError::UnknownFunction { .. }
        )
    }

    /// Position (index de caractère) pour les erreurs qui en portent une.
    pub fn position(&self) -> Option<usize> {
        match self {
            CalcError::UnexpectedChar { position }
            | CalcError::UnexpectedEnd { position }
            | CalcError::InvalidNumber { position, .. } => Some(*position),
            _ => None,
        }
    }
}
