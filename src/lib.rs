//! Calculatrice décimale : noyau (jetons, arbre, fractions exactes sur décimal fixe)
//! et état d’application indépendant de toute interface.

pub mod app;
pub mod noyau;

pub use noyau::{evaluate, CalcError};
