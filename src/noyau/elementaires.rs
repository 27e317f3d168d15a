// src/noyau/elementaires.rs
//
// Fonctions élémentaires sur le substrat décimal (rust_decimal, ~28 chiffres)
// ---------------------------------------------------------------------------
// - Table de constantes (π, e, ln2, …) écrites à haute précision puis arrondies
//   une seule fois à l’échelle maximale du décimal.
// - ln   : série atanh  ln(x) = 2(u + u³/3 + u⁵/5 + …), u = (x-1)/(x+1),
//          après réduction x·2^n vers [2/3, 4/3].
// - exp  : Taylor Σ xⁱ/i! jusqu’à ce que le terme s’annule ; e^{-x} = 1/e^{x}.
// - sin/cos : réduction modulo 2π puis π, repli sur [0, π/4] avant la série.
// - tan  : sin/cos après réduction dans (-π/2, π/2) ; π/2 exact => indéfini.

use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;

use super::erreurs::CalcError;

/// Échelle maximale du substrat (chiffres après la virgule).
pub const ECHELLE_MAX: u32 = 28;

/// Nombre de termes de la série du logarithme (|u| ≤ 1/5 après réduction).
const TERMES_LN: u32 = 40;

/// Garde-fou des boucles « jusqu’à annulation du terme ».
const MAX_TERMES_SERIE: u32 = 2_000;

/* ------------------------ Constantes ------------------------ */

#[cfg(test)]
const LIT_E: &str = "2.7182818284590452353602874713526624977572470936999595749669676277";
const LIT_LN_2: &str = "0.6931471805599453094172321214581765680755001343602552541206800094";
const LIT_LN_10: &str = "2.3025850929940456840179914546843642076011014886287729760333279009";
#[cfg(test)]
const LIT_LN_SQRT_10: &str = "1.1512925464970228420089957273421821038005507443143864880166639504";
#[cfg(test)]
const LIT_SQRT_10: &str = "3.1622776601683793319988935444327185337195551393252168268575048527";
const LIT_LOG10_E: &str = "0.4342944819032518276511289189166050822943970058036665661144537831";

const LIT_PI: &str = "3.1415926535897932384626433832795028841971693993751058209749445923";
const LIT_DEUX_PI: &str = "6.2831853071795864769252867665590057683943387987502116419498891846";
#[cfg(test)]
const LIT_TROIS_DEMI_PI: &str = "4.7123889803846898576939650749192543262957540990626587314624168884";
const LIT_TROIS_QUART_PI: &str =
    "2.3561944901923449288469825374596271631478770495313293657312084442";
const LIT_DEMI_PI: &str = "1.5707963267948966192313216916397514420985846996875529104874722961";
const LIT_QUART_PI: &str = "0.7853981633974483096156608458198757210492923498437764552437361480";

#[derive(Debug, Clone, Copy)]
pub struct Constantes {
    pub ln_2: Decimal,
    pub ln_10: Decimal,
    pub log10_e: Decimal,

    pub pi: Decimal,
    pub deux_pi: Decimal,
    pub trois_quart_pi: Decimal,
    pub demi_pi: Decimal,
    pub quart_pi: Decimal,
}

static CONSTANTES: OnceLock<Constantes> = OnceLock::new();

/// Table partagée (lecture seule, initialisée une fois, sûre entre threads).
pub fn constantes() -> &'static Constantes {
    CONSTANTES.get_or_init(|| Constantes {
        ln_2: lire_constante(LIT_LN_2),
        ln_10: lire_constante(LIT_LN_10),
        log10_e: lire_constante(LIT_LOG10_E),

        pi: lire_constante(LIT_PI),
        deux_pi: lire_constante(LIT_DEUX_PI),
        trois_quart_pi: lire_constante(LIT_TROIS_QUART_PI),
        demi_pi: lire_constante(LIT_DEMI_PI),
        quart_pi: lire_constante(LIT_QUART_PI),
    })
}

/// Littéral long -> décimal arrondi (demi vers le haut) à ECHELLE_MAX chiffres.
/// Les parties entières de la table sont ≤ 6 : 29 chiffres tiennent dans 96 bits.
fn lire_constante(litteral: &str) -> Decimal {
    let (entier, frac) = litteral.split_once('.').unwrap_or((litteral, ""));
    let garde = frac.len().min(ECHELLE_MAX as usize);

    let tronque = if garde == 0 {
        entier.to_string()
    } else {
        format!("{entier}.{}", &frac[..garde])
    };
    let mut d = Decimal::from_str(&tronque).expect("constante littérale");

    if frac.as_bytes().get(garde).is_some_and(|c| *c >= b'5') {
        d += Decimal::new(1, ECHELLE_MAX);
    }
    d
}

/* ------------------------ Logarithmes ------------------------ */

/// ln(x) pour x > 0.
pub fn ln(x: Decimal) -> Result<Decimal, CalcError> {
    if x <= Decimal::ZERO {
        return Err(CalcError::Domain(format!("ln({x}) non défini")));
    }

    let c = constantes();

    // ln(a·10^k) = ln(a) + k·ln(10), a dans [1, 10) (décalage d’échelle exact)
    let mut a = x;
    let mut k: i64 = 0;
    while a >= Decimal::TEN {
        a /= Decimal::TEN;
        k += 1;
    }
    while a < Decimal::ONE {
        a *= Decimal::TEN;
        k -= 1;
    }

    // ln(a·2^n) = ln(a) + n·ln(2)
    let deux_tiers = Decimal::TWO / Decimal::from(3);
    let quatre_tiers = Decimal::from(4) / Decimal::from(3);

    let mut n: i64 = 0;
    while a > quatre_tiers {
        a /= Decimal::TWO;
        n += 1;
    }
    while a < deux_tiers {
        a *= Decimal::TWO;
        n -= 1;
    }

    Ok(ln_serie(a) + Decimal::from(n) * c.ln_2 + Decimal::from(k) * c.ln_10)
}

/// Série brute, valable près de 1 seulement.
fn ln_serie(x: Decimal) -> Decimal {
    let u = (x - Decimal::ONE) / (x + Decimal::ONE);
    let u2 = u * u;

    let mut puissance = u;
    let mut somme = u;
    for k in 1..TERMES_LN {
        puissance *= u2;
        if puissance.is_zero() {
            break;
        }
        somme += puissance / Decimal::from(2 * k + 1);
    }

    somme * Decimal::TWO
}

/// log10(x) = ln(x)·log10(e)
pub fn log10(x: Decimal) -> Result<Decimal, CalcError> {
    if x <= Decimal::ZERO {
        return Err(CalcError::Domain(format!("log10({x}) non défini")));
    }
    Ok(ln(x)? * constantes().log10_e)
}

/* ------------------------ Exponentielle / puissance ------------------------ */

/// e^x par Taylor, terme courant multiplié par x/i (diviser d’abord retarde le dépassement).
pub fn exp(x: Decimal) -> Result<Decimal, CalcError> {
    if x.is_zero() {
        return Ok(Decimal::ONE);
    }

    let ax = x.abs();
    let mut somme = Decimal::ONE;
    let mut produit = Decimal::ONE;

    for i in 1..=MAX_TERMES_SERIE {
        let f = ax / Decimal::from(i);
        produit = match produit.checked_mul(f) {
            Some(p) => p,
            None => return depassement_exp(x),
        };
        if produit.is_zero() {
            break;
        }
        somme = match somme.checked_add(produit) {
            Some(s) => s,
            None => return depassement_exp(x),
        };
    }

    if x.is_sign_negative() {
        // e^{-x} = 1/e^{x}
        return Decimal::ONE.checked_div(somme).ok_or(CalcError::Overflow);
    }
    Ok(somme)
}

/// e^{x} hors de portée : vers +∞ c’est une erreur, vers -∞ le résultat s’arrondit à 0.
fn depassement_exp(x: Decimal) -> Result<Decimal, CalcError> {
    if x.is_sign_negative() {
        Ok(Decimal::ZERO)
    } else {
        Err(CalcError::Overflow)
    }
}

/// a^b pour un exposant quelconque via exp(b·ln a).
/// La partie entière de l’exposant est traitée exactement par Fraction::pow ;
/// ici on ne reçoit normalement que la partie fractionnaire.
pub fn pow_fractionnaire(base: Decimal, exposant: Decimal) -> Result<Decimal, CalcError> {
    if exposant.is_zero() {
        return Ok(Decimal::ONE);
    }
    if base.is_zero() {
        if exposant.is_sign_negative() {
            return Err(CalcError::DivideByZero);
        }
        return Ok(Decimal::ZERO);
    }
    if base.is_sign_negative() {
        return Err(CalcError::Domain(format!(
            "{base}^{exposant} : base négative et exposant non entier"
        )));
    }

    let produit = exposant
        .checked_mul(ln(base)?)
        .ok_or(CalcError::Overflow)?;
    exp(produit)
}

/* ------------------------ Trigonométrie ------------------------ */

/// sin(x) avec réduction d’argument.
pub fn sin(x: Decimal) -> Result<Decimal, CalcError> {
    if x.is_sign_negative() {
        return Ok(-sin(-x)?);
    }
    if x.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let c = constantes();

    // 0 <= r < 2π, puis x1 dans (-π, π)
    let r = x % c.deux_pi;
    let x1 = if r > c.pi {
        r - c.deux_pi
    } else if r < c.pi {
        r
    } else {
        return Ok(Decimal::ZERO);
    };

    let a = x1.abs();
    let v = if a > c.quart_pi && a < c.trois_quart_pi {
        // sin(x) = cos(x - π/2)
        cos_serie(a - c.demi_pi)
    } else if a > c.trois_quart_pi {
        // sin(x) = -sin(x - π)
        -sin_serie(a - c.pi)
    } else {
        sin_serie(a)
    };

    Ok(if x1.is_sign_negative() { -v } else { v })
}

/// cos(x) avec réduction d’argument.
pub fn cos(x: Decimal) -> Result<Decimal, CalcError> {
    let c = constantes();

    // cos est pair : on travaille sur |x| mod 2π, replié sur [0, π]
    let mut r = x.abs() % c.deux_pi;
    if r > c.pi {
        r = c.deux_pi - r;
    }

    // cos(π - r) = -cos(r) : r dans [0, π/2]
    let mut negatif = false;
    if r > c.demi_pi {
        r = c.pi - r;
        negatif = true;
    }

    // cos(r) = sin(π/2 - r) : argument de la série <= π/4
    let v = if r > c.quart_pi {
        sin_serie(c.demi_pi - r)
    } else {
        cos_serie(r)
    };

    Ok(if negatif { -v } else { v })
}

/// tan(x) ; indéfini aux multiples impairs de π/2.
pub fn tan(x: Decimal) -> Result<Decimal, CalcError> {
    if x.is_sign_negative() {
        return Ok(-tan(-x)?);
    }

    let c = constantes();
    let r = x % c.pi;

    if r.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if r == c.demi_pi {
        return Err(CalcError::Domain(format!("tangente indéfinie en {x}")));
    }

    // t dans (-π/2, π/2)
    let t = if r > c.demi_pi { r - c.pi } else { r };
    let cosinus = cos(t)?;
    if cosinus.is_zero() {
        return Err(CalcError::Domain(format!("tangente indéfinie en {x}")));
    }
    sin(t)?
        .checked_div(cosinus)
        .ok_or(CalcError::Overflow)
}

/// Série de Taylor brute du sinus (argument déjà réduit).
fn sin_serie(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::ZERO;
    }
    if x.is_sign_negative() {
        return -sin_serie(-x);
    }

    let mut somme = x;
    let mut terme = x;
    let mut moins = true;
    let mut i = Decimal::ONE;

    for _ in 0..MAX_TERMES_SERIE {
        terme = terme * (x / (i + Decimal::ONE)) * (x / (i + Decimal::TWO));
        if terme.is_zero() {
            break;
        }
        if moins {
            somme -= terme;
        } else {
            somme += terme;
        }
        moins = !moins;
        i += Decimal::TWO;
    }

    somme
}

/// Série de Taylor brute du cosinus (argument déjà réduit).
fn cos_serie(x: Decimal) -> Decimal {
    let mut somme = Decimal::ONE;
    let mut terme = Decimal::ONE;
    let mut moins = true;
    let mut n = Decimal::TWO;

    for _ in 0..MAX_TERMES_SERIE {
        terme = terme * (x / (n - Decimal::ONE)) * (x / n);
        if terme.is_zero() {
            break;
        }
        if moins {
            somme -= terme;
        } else {
            somme += terme;
        }
        moins = !moins;
        n += Decimal::TWO;
    }

    somme
}
