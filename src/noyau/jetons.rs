// src/noyau/jetons.rs
//
// Découpage en jetons par classes de caractères.
// - Une position virtuelle « fin » après le dernier caractère vide le dernier jeton.
// - Chiffres, point et lettres s’accumulent dans un même mot ; le mot reste
//   indécis (nombre ou fonction) jusqu’au jeton suivant : suivi de '(' c’est une
//   fonction, sinon un nombre.
// - Opérateurs et parenthèses font toujours un jeton d’un caractère.
// - Les espaces ne commencent ni ne terminent rien : ils sont transparents.
//
// Tout l’état de travail vit dans un Scanner local à l’appel (réentrant).

use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use log::trace;
use rust_decimal::Decimal;

use super::erreurs::CalcError;
use super::expr::Op;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Start,
    Digit,
    Dot,
    Function,
    Whitespace,
    LeftBracket,
    RightBracket,
    Operator,
    End,
}

impl CharClass {
    /// None : caractère interdit.
    pub fn of(c: char) -> Option<CharClass> {
        match c {
            '0'..='9' => Some(CharClass::Digit),
            '.' => Some(CharClass::Dot),
            '(' => Some(CharClass::LeftBracket),
            ')' => Some(CharClass::RightBracket),
            '+' | '-' | '*' | '/' | '^' => Some(CharClass::Operator),
            c if c.is_whitespace() => Some(CharClass::Whitespace),
            c if c.is_alphabetic() => Some(CharClass::Function),
            _ => None,
        }
    }

    fn is_mot(self) -> bool {
        matches!(self, CharClass::Digit | CharClass::Dot | CharClass::Function)
    }

    fn bit(self) -> Classes {
        match self {
            CharClass::Digit => Classes::DIGIT,
            CharClass::Dot => Classes::DOT,
            CharClass::Function => Classes::FUNCTION,
            CharClass::Whitespace => Classes::WHITESPACE,
            CharClass::LeftBracket => Classes::LEFT_BRACKET,
            CharClass::RightBracket => Classes::RIGHT_BRACKET,
            CharClass::Operator => Classes::OPERATOR,
            CharClass::Start | CharClass::End => Classes::VIDE,
        }
    }
}

/// Ensemble des classes vues pendant l’accumulation d’un jeton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classes(u16);

impl Classes {
    pub const VIDE: Classes = Classes(0);
    pub const DIGIT: Classes = Classes(1);
    pub const OPERATOR: Classes = Classes(2);
    pub const LEFT_BRACKET: Classes = Classes(4);
    pub const RIGHT_BRACKET: Classes = Classes(8);
    pub const FUNCTION: Classes = Classes(16);
    pub const WHITESPACE: Classes = Classes(64);
    pub const DOT: Classes = Classes(256);

    pub fn contains(self, other: Classes) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Classes {
    type Output = Classes;

    fn bitor(self, rhs: Classes) -> Classes {
        Classes(self.0 | rhs.0)
    }
}

impl BitOrAssign for Classes {
    fn bitor_assign(&mut self, rhs: Classes) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokKind {
    Number(Decimal),
    Operator(Op),
    Function(Op),
    LeftBracket,
    RightBracket,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tok {
    pub text: String,
    /// Index (en caractères) du premier caractère.
    pub start: usize,
    pub classes: Classes,
    pub kind: TokKind,
}

impl Tok {
    pub fn operateur(&self) -> Option<Op> {
        match self.kind {
            TokKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

/// Mot en attente : nombre ou nom de fonction selon ce qui suit.
struct Mot {
    text: String,
    start: usize,
    classes: Classes,
}

/// Ce qui précède le jeton en cours de validation.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Precedent {
    Rien,
    Mot,
    Nombre,
    Fonction,
    Operateur,
    Gauche,
    Droite,
}

struct Scanner<'a> {
    chars: &'a [char],
    jetons: Vec<Tok>,
    indecis: Option<Mot>,
    mot: String,
    classes_mot: Classes,
    profondeur: usize,
}

impl<'a> Scanner<'a> {
    fn new(chars: &'a [char]) -> Self {
        Scanner {
            chars,
            jetons: Vec::new(),
            indecis: None,
            mot: String::new(),
            classes_mot: Classes::VIDE,
            profondeur: 0,
        }
    }

    fn precedent(&self) -> Precedent {
        if self.indecis.is_some() {
            return Precedent::Mot;
        }
        match self.jetons.last().map(|t| &t.kind) {
            None => Precedent::Rien,
            Some(TokKind::Number(_)) => Precedent::Nombre,
            Some(TokKind::Function(_)) => Precedent::Fonction,
            Some(TokKind::Operator(_)) => Precedent::Operateur,
            Some(TokKind::LeftBracket) => Precedent::Gauche,
            Some(TokKind::RightBracket) => Precedent::Droite,
        }
    }

    /// Termine le jeton dont le dernier caractère est en `i - 1`.
    fn valider(&mut self, prev: CharClass, i: usize) -> Result<(), CalcError> {
        match prev {
            c if c.is_mot() => self.valider_mot(i),
            CharClass::LeftBracket => self.valider_gauche(i - 1),
            CharClass::RightBracket => self.valider_droite(i - 1),
            CharClass::Operator => self.valider_operateur(self.chars[i - 1], i - 1),
            _ => Ok(()),
        }
    }

    fn valider_mot(&mut self, i: usize) -> Result<(), CalcError> {
        let text = std::mem::take(&mut self.mot);
        let classes = std::mem::replace(&mut self.classes_mot, Classes::VIDE);
        let start = i - text.chars().count();

        if matches!(
            self.precedent(),
            Precedent::Mot | Precedent::Nombre | Precedent::Fonction | Precedent::Droite
        ) {
            return Err(CalcError::UnexpectedChar { position: start });
        }

        let points = text.chars().filter(|c| *c == '.').count();
        if !classes.contains(Classes::DIGIT) || points > 1 {
            // Ne peut pas être un nombre : nom de fonction ou rien
            let op = Op::from_function(&text)
                .ok_or_else(|| CalcError::UnknownFunction { name: text.clone() })?;
            trace!("jeton fonction '{text}' en {start}");
            self.jetons.push(Tok {
                text,
                start,
                classes,
                kind: TokKind::Function(op),
            });
        } else {
            self.indecis = Some(Mot {
                text,
                start,
                classes,
            });
        }
        Ok(())
    }

    fn valider_gauche(&mut self, pos: usize) -> Result<(), CalcError> {
        match self.precedent() {
            Precedent::Droite | Precedent::Nombre => {
                return Err(CalcError::UnexpectedChar { position: pos })
            }
            Precedent::Mot => self.mot_en_fonction()?,
            _ => {}
        }
        self.pousser_simple(pos, Classes::LEFT_BRACKET, TokKind::LeftBracket);
        self.profondeur += 1;
        Ok(())
    }

    fn valider_droite(&mut self, pos: usize) -> Result<(), CalcError> {
        if self.profondeur == 0 {
            return Err(CalcError::UnexpectedEnd { position: pos });
        }
        match self.precedent() {
            Precedent::Fonction | Precedent::Gauche | Precedent::Operateur | Precedent::Rien => {
                return Err(CalcError::UnexpectedChar { position: pos })
            }
            Precedent::Mot => self.mot_en_nombre()?,
            _ => {}
        }
        self.pousser_simple(pos, Classes::RIGHT_BRACKET, TokKind::RightBracket);
        self.profondeur -= 1;
        Ok(())
    }

    fn valider_operateur(&mut self, c: char, pos: usize) -> Result<(), CalcError> {
        let op = Op::from_operator(c).ok_or(CalcError::UnexpectedChar { position: pos })?;

        match self.precedent() {
            Precedent::Operateur | Precedent::Fonction => {
                return Err(CalcError::UnexpectedChar { position: pos })
            }
            // Seuls + et - peuvent ouvrir une expression ou un groupe (signe)
            Precedent::Rien | Precedent::Gauche if !matches!(op, Op::Add | Op::Sub) => {
                return Err(CalcError::UnexpectedChar { position: pos })
            }
            Precedent::Mot => self.mot_en_nombre()?,
            _ => {}
        }
        self.pousser_simple(pos, Classes::OPERATOR, TokKind::Operator(op));
        Ok(())
    }

    fn pousser_simple(&mut self, pos: usize, classes: Classes, kind: TokKind) {
        self.jetons.push(Tok {
            text: self.chars[pos].to_string(),
            start: pos,
            classes,
            kind,
        });
    }

    fn mot_en_fonction(&mut self) -> Result<(), CalcError> {
        if let Some(mot) = self.indecis.take() {
            let op = Op::from_function(&mot.text)
                .ok_or_else(|| CalcError::UnknownFunction { name: mot.text.clone() })?;
            trace!("jeton fonction '{}' en {}", mot.text, mot.start);
            self.jetons.push(Tok {
                text: mot.text,
                start: mot.start,
                classes: mot.classes,
                kind: TokKind::Function(op),
            });
        }
        Ok(())
    }

    fn mot_en_nombre(&mut self) -> Result<(), CalcError> {
        if let Some(mot) = self.indecis.take() {
            // Des lettres ne font jamais partie d’un nombre (pas de notation 1e5)
            let value = if mot.classes.contains(Classes::FUNCTION) {
                None
            } else {
                lire_nombre(&mot.text)
            };
            let value = value.ok_or_else(|| CalcError::InvalidNumber {
                text: mot.text.clone(),
                position: mot.start,
            })?;
            trace!("jeton nombre '{}' en {}", mot.text, mot.start);
            self.jetons.push(Tok {
                text: mot.text,
                start: mot.start,
                classes: mot.classes,
                kind: TokKind::Number(value),
            });
        }
        Ok(())
    }

    fn terminer(mut self) -> Result<Vec<Tok>, CalcError> {
        let fin = self.chars.len();
        if self.profondeur != 0 {
            return Err(CalcError::UnexpectedEnd { position: fin });
        }
        match self.precedent() {
            Precedent::Rien => return Err(CalcError::EmptyInput),
            Precedent::Operateur | Precedent::Fonction => {
                return Err(CalcError::UnexpectedEnd { position: fin })
            }
            Precedent::Mot => self.mot_en_nombre()?,
            _ => {}
        }
        Ok(self.jetons)
    }
}

/// Littéral décimal : ".5" et "5." sont acceptés.
fn lire_nombre(text: &str) -> Option<Decimal> {
    let mut s = String::with_capacity(text.len() + 1);
    if text.starts_with('.') {
        s.push('0');
    }
    s.push_str(text.strip_suffix('.').unwrap_or(text));
    Decimal::from_str(&s).ok()
}

/// Frontière de jeton entre le caractère précédent et le courant.
fn frontiere(prev: CharClass, courant: CharClass) -> bool {
    match prev {
        CharClass::Start | CharClass::Whitespace | CharClass::End => false,
        c if c.is_mot() => !courant.is_mot(),
        // opérateurs et parenthèses : un caractère par jeton
        _ => true,
    }
}

pub fn tokenize(expr: &str) -> Result<Vec<Tok>, CalcError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut scanner = Scanner::new(&chars);
    let mut prev = CharClass::Start;

    for i in 0..=chars.len() {
        let courant = match chars.get(i) {
            Some(&c) => CharClass::of(c).ok_or(CalcError::UnexpectedChar { position: i })?,
            None => CharClass::End,
        };

        if frontiere(prev, courant) {
            scanner.valider(prev, i)?;
        }

        if courant.is_mot() {
            scanner.mot.push(chars[i]);
            scanner.classes_mot |= courant.bit();
        }
        prev = courant;
    }

    scanner.terminer()
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match &t.kind {
            TokKind::Number(v) => v.normalize().to_string(),
            TokKind::Operator(op) | TokKind::Function(op) => op.symbole().to_string(),
            TokKind::LeftBracket => "(".to_string(),
            TokKind::RightBracket => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
