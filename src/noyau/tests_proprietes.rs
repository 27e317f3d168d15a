//! Tests de propriétés (proptest).
//!
//! - arithmétique de Fraction comparée à un oracle exact (BigRational)
//! - indifférence aux espaces entre jetons
//! - chaînes de +/- comparées à l’arithmétique entière
//! - robustesse : aucune entrée ne fait paniquer le pipeline

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use proptest::prelude::*;

use super::jetons::tokenize;
use super::{eval_expression, evaluate};

fn format_oracle(r: &BigRational) -> String {
    if r.denom().is_one() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn op_binaire() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')]
}

proptest! {
    #[test]
    fn prop_fraction_exacte(
        a in 0i64..1000,
        b in 1i64..1000,
        c in 1i64..1000,
        d in 1i64..1000,
        op in op_binaire(),
    ) {
        let expr = format!("{a}/{b} {op} {c}/{d}");
        let (_, dem) = eval_expression(&expr, 20).unwrap();

        // '/' chaîné : ((a/b)/c)/d
        let attendu = match op {
            '+' => rat(a, b) + rat(c, d),
            '-' => rat(a, b) - rat(c, d),
            '*' => rat(a, b) * rat(c, d),
            _ => rat(a, b) / BigRational::from_integer(BigInt::from(c)) / BigRational::from_integer(BigInt::from(d)),
        };
        prop_assert_eq!(dem.exact, format_oracle(&attendu), "expr={}", expr);
    }

    #[test]
    fn prop_espaces_indifferents(
        termes in prop::collection::vec((0u32..100, op_binaire(), any::<bool>()), 1..12),
        dernier in 0u32..100,
    ) {
        let mut compact = String::new();
        let mut espace = String::from("  ");
        for (n, op, blanc) in &termes {
            compact.push_str(&format!("{n}{op}"));
            if *blanc {
                espace.push_str(&format!("{n} {op}  "));
            } else {
                espace.push_str(&format!("{n}{op}"));
            }
        }
        compact.push_str(&dernier.to_string());
        espace.push_str(&format!(" {dernier} "));

        prop_assert_eq!(evaluate(&compact), evaluate(&espace));
    }

    #[test]
    fn prop_chaine_additive(
        premier in 0i64..1_000_000,
        negatif in any::<bool>(),
        suite in prop::collection::vec((any::<bool>(), 0i64..1_000_000), 0..20),
    ) {
        let mut expr = String::new();
        let mut total = if negatif { -premier } else { premier };
        if negatif {
            expr.push('-');
        }
        expr.push_str(&premier.to_string());

        for (plus, n) in &suite {
            if *plus {
                expr.push('+');
                total += n;
            } else {
                expr.push('-');
                total -= n;
            }
            expr.push_str(&n.to_string());
        }

        prop_assert_eq!(evaluate(&expr).unwrap(), total.to_string(), "expr={}", expr);
    }

    #[test]
    fn prop_jamais_de_panique(s in "[0-9a-z+*/^(). -]{0,40}") {
        // Ok ou Err, mais jamais de panique
        let _ = tokenize(&s);
        let _ = evaluate(&s);
    }

    #[test]
    fn prop_positions_dans_l_entree(s in "\\PC{0,30}") {
        if let Err(e) = tokenize(&s) {
            if let Some(p) = e.position() {
                prop_assert!(p <= s.chars().count(), "position {} hors de {:?}", p, s);
            }
        }
    }
}
