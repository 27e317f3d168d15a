// src/noyau/decoupe.rs
//
// Jetons -> arbre, par découpe sur l’opérateur de plus faible priorité.
// - balayage de droite à gauche, en ignorant ce qui est entre parenthèses ;
// - à priorité égale, le plus à droite gagne : évaluation de gauche à droite ;
// - opérateur en tête (+/-) : opérande gauche = 0 (signe).

use rust_decimal::Decimal;

use super::erreurs::CalcError;
use super::expr::{Node, Op};
use super::jetons::{Tok, TokKind};
use super::rationnel::Fraction;

pub fn parse(tokens: &[Tok]) -> Result<Node, CalcError> {
    if tokens.is_empty() {
        return Err(CalcError::Syntax("opérande vide".into()));
    }

    match point_de_decoupe(tokens) {
        Some(i) => decouper(tokens, i),
        None => feuille(tokens),
    }
}

/// Index de l’opérateur de niveau 0 le moins prioritaire (le plus à droite en cas d’égalité).
fn point_de_decoupe(tokens: &[Tok]) -> Option<usize> {
    let mut profondeur: i32 = 0;
    let mut meilleur: Option<(usize, u8)> = None;

    for (i, tok) in tokens.iter().enumerate().rev() {
        match tok.kind {
            TokKind::RightBracket => profondeur += 1,
            TokKind::LeftBracket => profondeur -= 1,
            TokKind::Operator(op) if profondeur == 0 => {
                if let Some(p) = op.priorite() {
                    if meilleur.map_or(true, |(_, q)| p < q) {
                        meilleur = Some((i, p));
                    }
                }
            }
            _ => {}
        }
    }
    meilleur.map(|(i, _)| i)
}

fn decouper(tokens: &[Tok], i: usize) -> Result<Node, CalcError> {
    let op = tokens[i]
        .operateur()
        .ok_or_else(|| CalcError::Syntax(format!("'{}' n’est pas un opérateur", tokens[i].text)))?;

    let droite = &tokens[i + 1..];
    if droite.is_empty() {
        return Err(CalcError::Syntax(format!("opérande manquante après '{op}'")));
    }
    let right = parse(droite)?;

    let left = if i == 0 {
        if !matches!(op, Op::Add | Op::Sub) {
            return Err(CalcError::Syntax(format!("'{op}' sans opérande gauche")));
        }
        Node::nombre(Fraction::from_decimal(Decimal::ZERO))
    } else {
        parse(&tokens[..i])?
    };

    Ok(Node::binaire(op, left, right))
}

fn feuille(tokens: &[Tok]) -> Result<Node, CalcError> {
    let premier = &tokens[0];

    match (&premier.kind, tokens.len()) {
        (TokKind::Number(v), 1) => Ok(Node::nombre(Fraction::from_decimal(*v))),

        (TokKind::LeftBracket, n)
            if n >= 2 && tokens[n - 1].kind == TokKind::RightBracket =>
        {
            parse(&tokens[1..n - 1])
        }

        (TokKind::Function(op), n) if n >= 2 => Ok(Node::unaire(*op, parse(&tokens[1..])?)),

        _ => Err(CalcError::Syntax(format!(
            "forme inattendue à la position {}",
            premier.start
        ))),
    }
}
