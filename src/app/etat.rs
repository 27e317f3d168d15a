//! src/app/etat.rs
//!
//! État UI (sans vue) : texte affiché, curseur, sélection, erreur, digits, démarche.
//!
//! Contrats :
//! - Aucune logique de parsing ici : `calculer` délègue au noyau.
//! - Positions en caractères (pas en octets) : l’affichage peut contenir de l’Unicode.
//! - Un échec de calcul ne touche pas à l’affichage : seul le message d’erreur change.

use log::warn;

use crate::noyau::{eval_expression, DemarcheNoyau, DECIMALES_DEFAUT, DECIMALES_MAX};

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée / affichage ---
    pub affichage: String,
    /// Position du curseur (en caractères).
    pub curseur: usize,
    /// Longueur de la sélection à partir du curseur (en caractères).
    pub selection: usize,

    // --- sorties ---
    pub erreur: String,
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub digits: u32,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            affichage: String::new(),
            curseur: 0,
            selection: 0,
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            digits: DECIMALES_DEFAUT,
        }
    }
}

impl AppCalc {
    fn longueur(&self) -> usize {
        self.affichage.chars().count()
    }

    /// Index d’octet du caractère `pos` (fin de chaîne au-delà).
    fn octet(&self, pos: usize) -> usize {
        self.affichage
            .char_indices()
            .nth(pos)
            .map_or(self.affichage.len(), |(i, _)| i)
    }

    /// Plage [début, fin) de la sélection, bornée au texte.
    fn plage(&self) -> (usize, usize) {
        let n = self.longueur();
        let debut = self.curseur.min(n);
        let fin = (debut + self.selection).min(n);
        (debut, fin)
    }

    /* ------------------------ Édition ------------------------ */

    pub fn selectionner(&mut self, debut: usize, longueur: usize) {
        let n = self.longueur();
        self.curseur = debut.min(n);
        self.selection = longueur.min(n - self.curseur);
    }

    /// Remplace la sélection (ou insère au curseur) ; le curseur passe après le texte.
    pub fn inserer(&mut self, texte: &str) {
        let (debut, fin) = self.plage();
        let (a, b) = (self.octet(debut), self.octet(fin));
        self.affichage.replace_range(a..b, texte);

        self.curseur = debut + texte.chars().count();
        self.selection = 0;
    }

    /// Retour arrière : efface la sélection, sinon le caractère avant le curseur.
    pub fn effacer_arriere(&mut self) {
        let (debut, fin) = self.plage();

        if fin > debut {
            let (a, b) = (self.octet(debut), self.octet(fin));
            self.affichage.replace_range(a..b, "");
            self.curseur = debut;
        } else if debut > 0 {
            let (a, b) = (self.octet(debut - 1), self.octet(debut));
            self.affichage.replace_range(a..b, "");
            self.curseur = debut - 1;
        } else {
            self.curseur = 0;
        }
        self.selection = 0;
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// = : évalue l’affichage et le remplace par le résultat.
    /// En cas d’échec, l’affichage reste tel quel et l’erreur est exposée.
    pub fn calculer(&mut self) {
        self.erreur.clear();

        match eval_expression(&self.affichage, self.digits) {
            Ok((resultat, demarche)) => {
                self.affichage = resultat;
                self.curseur = self.longueur();
                self.selection = 0;
                self.demarche = demarche;
            }
            Err(e) => {
                warn!("échec de calcul pour '{}': {e}", self.affichage);
                self.erreur = e.to_string();
                self.demarche = DemarcheNoyau::default();
            }
        }
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.affichage.clear();
        self.curseur = 0;
        self.selection = 0;
    }

    /// AC : remise à zéro totale (entrée + erreur + démarche + digits par défaut).
    pub fn reset_total(&mut self) {
        *self = AppCalc::default();
    }

    /// Garde-fou : le substrat décimal ne dépasse pas 28 places.
    pub fn set_digits(&mut self, digits: u32) {
        self.digits = digits.min(DECIMALES_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(texte: &str) -> AppCalc {
        let mut a = AppCalc::default();
        a.inserer(texte);
        a
    }

    #[test]
    fn insertion_au_curseur() {
        let mut a = app("1+3");
        a.selectionner(2, 0);
        a.inserer("2*");
        assert_eq!(a.affichage, "1+2*3");
        assert_eq!(a.curseur, 4);
    }

    #[test]
    fn insertion_remplace_selection() {
        let mut a = app("sin(1)");
        a.selectionner(0, 3);
        a.inserer("cos");
        assert_eq!(a.affichage, "cos(1)");
        assert_eq!((a.curseur, a.selection), (3, 0));
    }

    #[test]
    fn retour_arriere() {
        let mut a = app("12+34");
        a.effacer_arriere();
        assert_eq!(a.affichage, "12+3");

        a.selectionner(1, 2);
        a.effacer_arriere();
        assert_eq!(a.affichage, "13");
        assert_eq!(a.curseur, 1);

        a.selectionner(0, 0);
        a.effacer_arriere();
        assert_eq!(a.affichage, "13");
    }

    #[test]
    fn positions_unicode() {
        let mut a = app("é+1");
        a.effacer_arriere();
        a.effacer_arriere();
        assert_eq!(a.affichage, "é");
        a.effacer_arriere();
        assert!(a.affichage.is_empty());
    }

    #[test]
    fn calcul_remplace_affichage() {
        let mut a = app("1/3+1/3+1/3");
        a.calculer();
        assert_eq!(a.affichage, "1");
        assert!(a.erreur.is_empty());
        assert_eq!(a.curseur, 1);
        assert_eq!(a.demarche.exact, "1");
    }

    #[test]
    fn echec_garde_affichage() {
        let mut a = app("1/0");
        a.calculer();
        assert_eq!(a.affichage, "1/0");
        assert_eq!(a.erreur, "Division par zéro.");

        // l’erreur disparaît au calcul suivant
        a.clear_entree();
        a.inserer("2+2");
        a.calculer();
        assert!(a.erreur.is_empty());
        assert_eq!(a.affichage, "4");
    }

    #[test]
    fn digits_bornes() {
        let mut a = AppCalc::default();
        assert_eq!(a.digits, DECIMALES_DEFAUT);
        a.set_digits(500);
        assert_eq!(a.digits, DECIMALES_MAX);

        a.set_digits(3);
        a.inserer("2/3");
        a.calculer();
        assert_eq!(a.affichage, "0.667");

        a.reset_total();
        assert_eq!(a.digits, DECIMALES_DEFAUT);
        assert!(a.affichage.is_empty());
    }
}
