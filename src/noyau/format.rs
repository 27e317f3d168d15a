// src/noyau/format.rs

use rust_decimal::Decimal;

use super::expr::Node;
use super::rationnel::Fraction;

/* ------------------------ Résultat décimal ------------------------ */

/// Arrondi bancaire à `decimales` places, zéros de queue retirés ("-0" -> "0").
pub fn format_resultat(v: Decimal, decimales: u32) -> String {
    v.round_dp(decimales).normalize().to_string()
}

/* ------------------------ Fraction exacte ------------------------ */

/// n/d (ou n seul si d = 1)
pub fn format_fraction(f: &Fraction) -> String {
    f.to_string()
}

/* ------------------------ Arbre (démarche) ------------------------ */

/// Rendu infixe entièrement parenthésé : l’ordre réel d’évaluation est visible.
pub fn format_arbre(node: &Node) -> String {
    let mut out = String::new();
    ecrire(node, &mut out);
    out
}

fn ecrire(node: &Node, out: &mut String) {
    match node {
        Node::Number(v) => out.push_str(&v.to_string()),
        Node::Operation { op, left, right } => match right {
            Some(r) => {
                out.push('(');
                ecrire(left, out);
                out.push(' ');
                out.push_str(op.symbole());
                out.push(' ');
                ecrire(r, out);
                out.push(')');
            }
            None => {
                out.push_str(op.symbole());
                out.push('(');
                ecrire(left, out);
                out.push(')');
            }
        },
    }
}
