// src/noyau/rationnel.rs
//
// Fraction exacte sur substrat décimal à précision fixe.
// ------------------------------------------------------
// - num/den sont des Decimal (96 bits, ~28-29 chiffres significatifs).
// - Après chaque opération, la paire est réduite par son PGCD : les grandeurs
//   restent dans la plage du décimal pour les longues chaînes d’opérations.
// - Addition / multiplication / division réduisent AVANT de combiner
//   (PGCD croisés), puis réduisent encore le résultat.
// - La valeur décimale n’est matérialisée qu’à la demande (affichage, entrée
//   d’une fonction transcendante) : 1/3 + 1/3 + 1/3 donne exactement 1.

use std::fmt;

use log::trace;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::elementaires;
use super::erreurs::CalcError;

#[derive(Clone, Copy, Debug)]
pub struct Fraction {
    num: Decimal,
    den: Decimal,
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl From<Decimal> for Fraction {
    fn from(value: Decimal) -> Self {
        Fraction::from_decimal(value)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == Decimal::ONE {
            write!(f, "{}", self.num.normalize())
        } else {
            write!(f, "{}/{}", self.num.normalize(), self.den.normalize())
        }
    }
}

/* ------------------------ PGCD ------------------------ */

/// PGCD d’Euclide sur le décimal (valeurs absolues).
/// Fonctionne aussi pour des décimaux non entiers (ex: pgcd(2.5, 5) = 2.5).
pub fn pgcd(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    let (mut a, mut b) = (a.abs(), b.abs());
    if b > a {
        std::mem::swap(&mut a, &mut b);
    }

    while !b.is_zero() {
        let r = a.checked_rem(b).ok_or(CalcError::Overflow)?;
        a = b;
        b = r;
    }
    Ok(a)
}

/// Facteur de réduction : PGCD ramené à 1 s’il vaut au plus 1
/// (opérandes premiers entre eux, opérande nul, ou PGCD non entier < 1).
fn facteur(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    let g = pgcd(a, b)?;
    Ok(if g > Decimal::ONE { g } else { Decimal::ONE })
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_mul(b).ok_or(CalcError::Overflow)
}

fn div(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    if b.is_zero() {
        return Err(CalcError::DivideByZero);
    }
    a.checked_div(b).ok_or(CalcError::Overflow)
}

/// Carrés successifs sur la valeur décimale (les termes minuscules s’arrondissent à 0).
fn pow_decimal(mut b: Decimal, mut n: u64) -> Result<Decimal, CalcError> {
    let mut acc = Decimal::ONE;
    while n > 0 {
        if n & 1 == 1 {
            acc = mul(acc, b)?;
        }
        n >>= 1;
        if n > 0 {
            b = mul(b, b)?;
        }
    }
    Ok(acc)
}

/* ------------------------ Fraction ------------------------ */

impl Fraction {
    pub fn zero() -> Self {
        Fraction {
            num: Decimal::ZERO,
            den: Decimal::ONE,
        }
    }

    pub fn one() -> Self {
        Fraction {
            num: Decimal::ONE,
            den: Decimal::ONE,
        }
    }

    /// Littéral : dénominateur 1.
    pub fn from_decimal(value: Decimal) -> Self {
        Fraction {
            num: value,
            den: Decimal::ONE,
        }
    }

    /// Fraction réduite ; dénominateur toujours positif.
    pub fn new(num: Decimal, den: Decimal) -> Result<Self, CalcError> {
        if den.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        let g = facteur(num, den)?;
        let mut num = div(num, g)?;
        let mut den = div(den, g)?;

        if den.is_sign_negative() {
            num = -num;
            den = -den;
        }
        if num.is_zero() {
            return Ok(Fraction::zero());
        }
        Ok(Fraction { num, den })
    }

    pub fn numer(&self) -> Decimal {
        self.num
    }

    pub fn denom(&self) -> Decimal {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Valeur décimale num/den (seule valeur « flottante » observée de l’extérieur).
    pub fn value(&self) -> Result<Decimal, CalcError> {
        div(self.num, self.den)
    }

    pub fn neg(&self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }

    /// a/b + c/d avec g = pgcd(b, d) : (d/g)·a + (b/g)·c sur (b/g)·d
    pub fn add(&self, rhs: &Fraction) -> Result<Fraction, CalcError> {
        let g = facteur(self.den, rhs.den)?;
        let b_g = div(self.den, g)?;
        let d_g = div(rhs.den, g)?;

        let gauche = mul(d_g, self.num)?;
        let droite = mul(b_g, rhs.num)?;
        let num = gauche.checked_add(droite).ok_or(CalcError::Overflow)?;
        let den = mul(b_g, rhs.den)?;

        Fraction::new(num, den)
    }

    pub fn sub(&self, rhs: &Fraction) -> Result<Fraction, CalcError> {
        self.add(&rhs.neg())
    }

    /// Réduction croisée num×den de l’autre avant de multiplier.
    pub fn mul(&self, rhs: &Fraction) -> Result<Fraction, CalcError> {
        let g1 = facteur(self.num, rhs.den)?;
        let g2 = facteur(self.den, rhs.num)?;

        let num = mul(div(self.num, g1)?, div(rhs.num, g2)?)?;
        let den = mul(div(self.den, g2)?, div(rhs.den, g1)?)?;

        Fraction::new(num, den)
    }

    /// a/b ÷ c/d = a/b × d/c ; réduction num/num et den/den.
    pub fn div(&self, rhs: &Fraction) -> Result<Fraction, CalcError> {
        if rhs.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        let g1 = facteur(self.num, rhs.num)?;
        let g2 = facteur(self.den, rhs.den)?;

        let num = mul(div(self.num, g1)?, div(rhs.den, g2)?)?;
        let den = mul(div(self.den, g2)?, div(rhs.num, g1)?)?;

        Fraction::new(num, den)
    }

    pub fn recip(&self) -> Result<Fraction, CalcError> {
        Fraction::one().div(self)
    }

    /// Puissance :
    /// - exposant entier : exponentiation binaire exacte sur num et den ;
    /// - sinon base^⌊e⌋ (exact) × exp({e}·ln base) (approché).
    pub fn pow(&self, exposant: &Fraction) -> Result<Fraction, CalcError> {
        let e = exposant.value()?;

        if e.fract().is_zero() {
            return self.pow_entier(e);
        }

        let plancher = e.floor();
        let partie_frac = e - plancher;

        let base = self.value()?;
        if base.is_zero() {
            // 0^e, e non entier
            if e.is_sign_negative() {
                return Err(CalcError::DivideByZero);
            }
            return Ok(Fraction::zero());
        }

        let entiere = self.pow_entier(plancher)?;
        let reste = elementaires::pow_fractionnaire(base, partie_frac)?;
        entiere.mul(&Fraction::from_decimal(reste))
    }

    fn pow_entier(&self, e: Decimal) -> Result<Fraction, CalcError> {
        // Bases triviales d’abord : l’exposant peut dépasser u64
        if self.num.is_zero() {
            if e.is_sign_negative() {
                return Err(CalcError::DivideByZero);
            }
            return Ok(if e.is_zero() { Fraction::one() } else { Fraction::zero() });
        }
        if self.num.abs() == self.den {
            let impair = !(e % Decimal::TWO).is_zero();
            return Ok(if self.num.is_sign_negative() && impair {
                Fraction::one().neg()
            } else {
                Fraction::one()
            });
        }

        let n = e.abs().to_u64().ok_or(CalcError::Overflow)?;
        let base = if e.is_sign_negative() {
            self.recip()?
        } else {
            *self
        };

        match base.pow_u64(n) {
            // num et den débordent alors que le quotient tient : lecture décimale
            Err(CalcError::Overflow) if base.den != Decimal::ONE => {
                trace!("puissance {base}^{n} hors plage exacte, repli décimal");
                pow_decimal(base.value()?, n).map(Fraction::from_decimal)
            }
            r => r,
        }
    }

    /// Carrés successifs (exact tant que le décimal ne déborde pas).
    fn pow_u64(&self, mut n: u64) -> Result<Fraction, CalcError> {
        if n == 0 {
            return Ok(Fraction::one());
        }

        let mut num_acc = Decimal::ONE;
        let mut den_acc = Decimal::ONE;
        let mut num_b = self.num;
        let mut den_b = self.den;

        loop {
            if n & 1 == 1 {
                num_acc = mul(num_acc, num_b)?;
                den_acc = mul(den_acc, den_b)?;
            }
            n >>= 1;
            if n == 0 {
                break;
            }
            num_b = mul(num_b, num_b)?;
            den_b = mul(den_b, den_b)?;
        }

        Fraction::new(num_acc, den_acc)
    }

    /* ------------------------ Fonctions transcendantes ------------------------ */

    pub fn sin(&self) -> Result<Fraction, CalcError> {
        Ok(Fraction::from_decimal(elementaires::sin(self.value()?)?))
    }

    pub fn cos(&self) -> Result<Fraction, CalcError> {
        Ok(Fraction::from_decimal(elementaires::cos(self.value()?)?))
    }

    pub fn tan(&self) -> Result<Fraction, CalcError> {
        Ok(Fraction::from_decimal(elementaires::tan(self.value()?)?))
    }

    pub fn ln(&self) -> Result<Fraction, CalcError> {
        Ok(Fraction::from_decimal(elementaires::ln(self.value()?)?))
    }

    pub fn log10(&self) -> Result<Fraction, CalcError> {
        Ok(Fraction::from_decimal(elementaires::log10(self.value()?)?))
    }
}
