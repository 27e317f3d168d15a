// src/noyau/expr.rs
//
// Arbre d’expression.
// - Number    : feuille (fraction exacte)
// - Operation : opérateur binaire (left, right) ou fonction unaire (left seul)
//
// Chaque nœud possède ses enfants (Box) : pas de pointeur parent, pas de partage.
// L’évaluation est un parcours postfixe ; un arbre ne sert qu’une fois.

use std::fmt;

use super::erreurs::CalcError;
use super::rationnel::Fraction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    Sin,
    Cos,
    Tan,
    Cot,
    Log10,
    Ln,
}

/// Noms de fonctions reconnus (sensibles à la casse).
pub const FONCTIONS: [(&str, Op); 6] = [
    ("sin", Op::Sin),
    ("cos", Op::Cos),
    ("tan", Op::Tan),
    ("cot", Op::Cot),
    ("log10", Op::Log10),
    ("ln", Op::Ln),
];

impl Op {
    pub fn from_operator(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            '^' => Some(Op::Pow),
            _ => None,
        }
    }

    pub fn from_function(name: &str) -> Option<Op> {
        FONCTIONS
            .iter()
            .find(|(nom, _)| *nom == name)
            .map(|(_, op)| *op)
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
            Op::Sin => "sin",
            Op::Cos => "cos",
            Op::Tan => "tan",
            Op::Cot => "cot",
            Op::Log10 => "log10",
            Op::Ln => "ln",
        }
    }

    /// Priorité de découpe : `/` passe au-dessus de `*` (on divise d’abord).
    /// None pour les fonctions (jamais point de découpe).
    pub fn priorite(self) -> Option<u8> {
        match self {
            Op::Add | Op::Sub => Some(1),
            Op::Mul => Some(2),
            Op::Div => Some(3),
            Op::Pow => Some(4),
            _ => None,
        }
    }

    pub fn is_binaire(self) -> bool {
        self.priorite().is_some()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

#[derive(Clone, Debug)]
pub enum Node {
    Number(Fraction),
    Operation {
        op: Op,
        left: Box<Node>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn nombre(value: Fraction) -> Node {
        Node::Number(value)
    }

    pub fn binaire(op: Op, left: Node, right: Node) -> Node {
        Node::Operation {
            op,
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    pub fn unaire(op: Op, arg: Node) -> Node {
        Node::Operation {
            op,
            left: Box::new(arg),
            right: None,
        }
    }

    /// Nombre de nœuds (journal de l’évaluation).
    pub fn taille(&self) -> usize {
        match self {
            Node::Number(_) => 1,
            Node::Operation { left, right, .. } => {
                1 + left.taille() + right.as_ref().map_or(0, |r| r.taille())
            }
        }
    }

    pub fn evaluate(&self) -> Result<Fraction, CalcError> {
        match self {
            Node::Number(v) => Ok(*v),
            Node::Operation { op, left, right } => {
                let a = left.evaluate()?;

                if op.is_binaire() {
                    let b = match right {
                        Some(r) => r.evaluate()?,
                        None => {
                            return Err(CalcError::Syntax(format!(
                                "opérande droite manquante pour '{op}'"
                            )))
                        }
                    };
                    return match op {
                        Op::Add => a.add(&b),
                        Op::Sub => a.sub(&b),
                        Op::Mul => a.mul(&b),
                        Op::Div => a.div(&b),
                        _ => a.pow(&b),
                    };
                }

                match op {
                    Op::Sin => a.sin(),
                    Op::Cos => a.cos(),
                    Op::Tan => a.tan(),
                    Op::Log10 => a.log10(),
                    Op::Ln => a.ln(),
                    _ => Err(CalcError::NotImplemented(op.symbole().to_string())),
                }
            }
        }
    }
}
