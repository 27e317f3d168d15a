// src/app.rs
//
// Calculatrice décimale: module App (racine)
// -------------------------------------------
// Rôle:
// - Déclarer le sous-module d’état (etat.rs)
// - Ré-exporter AppCalc
// - Fournir une boucle ligne à ligne (terminal, fichiers, tests) au-dessus de AppCalc

pub mod etat;

// Ré-export pratique : `use calculatrice_decimale::app::AppCalc;`
pub use etat::AppCalc;

use std::io::{self, BufRead, Write};

use log::debug;

/// Une expression par ligne : écrit le résultat, ou `erreur: <message>`.
/// Les lignes vides sont ignorées.
pub fn executer<R: BufRead, W: Write>(
    entree: R,
    mut sortie: W,
    app: &mut AppCalc,
) -> io::Result<()> {
    for ligne in entree.lines() {
        let ligne = ligne?;
        if ligne.trim().is_empty() {
            continue;
        }

        app.clear_entree();
        app.inserer(&ligne);
        app.calculer();

        if app.erreur.is_empty() {
            debug!("{} -> {}", ligne, app.affichage);
            writeln!(sortie, "{}", app.affichage)?;
        } else {
            writeln!(sortie, "erreur: {}", app.erreur)?;
        }
    }
    sortie.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn une_ligne_une_reponse() {
        let entree = Cursor::new("1+1\n\n   \n2^10\n1/0\ncot(1)\n");
        let mut sortie = Vec::new();
        let mut app = AppCalc::default();

        executer(entree, &mut sortie, &mut app).unwrap();

        let texte = String::from_utf8(sortie).unwrap();
        assert_eq!(
            texte,
            "2\n1024\nerreur: Division par zéro.\nerreur: Fonction 'cot' non implémentée.\n"
        );
    }

    #[test]
    fn digits_de_l_app() {
        let mut app = AppCalc::default();
        app.set_digits(4);
        let mut sortie = Vec::new();
        executer(Cursor::new("1/3"), &mut sortie, &mut app).unwrap();
        assert_eq!(String::from_utf8(sortie).unwrap(), "0.3333\n");
    }
}
