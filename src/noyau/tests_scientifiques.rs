//! Tests scientifiques (campagne) : identités + taxonomie des erreurs + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (longueur des chaînes, profondeur des parenthèses)
//! - tolérance explicite pour tout ce qui passe par une série

use std::str::FromStr;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use super::{eval_expression, evaluate, CalcError};

fn eval_ok(expr: &str) -> Decimal {
    let r = evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    Decimal::from_str(&r).unwrap_or_else(|e| panic!("expr={expr:?} sortie={r:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: &str, tolerance: &str) {
    let v = eval_ok(expr);
    let a = Decimal::from_str(attendu).unwrap();
    let tol = Decimal::from_scientific(tolerance).unwrap();
    assert!(
        (v - a).abs() <= tol,
        "expr={expr:?} valeur={v} attendu={a}"
    );
}

fn assert_memes(e1: &str, e2: &str, tolerance: &str) {
    let tol = Decimal::from_scientific(tolerance).unwrap();
    let (a, b) = (eval_ok(e1), eval_ok(e2));
    assert!((a - b).abs() <= tol, "{e1:?}={a} vs {e2:?}={b}");
}

fn assert_erreur(expr: &str, attendue: CalcError) {
    match evaluate(expr) {
        Ok(r) => panic!("expr={expr:?} devait échouer, a donné {r}"),
        Err(e) => assert_eq!(e, attendue, "expr={expr:?}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identités trig ------------------------ */

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x), cos(-x) = cos(x), tan(-x) = -tan(x)
    for x in ["0.3", "1", "2.5", "7.25"] {
        assert_memes(&format!("sin(-{x})"), &format!("-sin({x})"), "1e-20");
        assert_memes(&format!("cos(-{x})"), &format!("cos({x})"), "1e-20");
        assert_memes(&format!("tan(-{x})"), &format!("-tan({x})"), "1e-18");
    }
}

#[test]
fn sci_pythagore() {
    for x in ["0.1", "0.7", "1.3", "3", "12.5"] {
        assert_proche(&format!("sin({x})^2+cos({x})^2"), "1", "1e-18");
    }
}

#[test]
fn sci_periodicite() {
    let deux_pi = "6.2831853071795864769252867666";
    assert_memes("sin(1)", &format!("sin(1+{deux_pi})"), "1e-18");
    assert_memes("cos(2)", &format!("cos(2-{deux_pi})"), "1e-18");
    assert_memes("tan(0.5)", "tan(0.5+3.1415926535897932384626433833)", "1e-18");
}

#[test]
fn sci_valeurs_remarquables() {
    assert_proche("sin(0)", "0", "0e0");
    assert_proche("cos(0)", "1", "0e0");
    assert_proche("tan(1)", "1.55740772465490223051", "1e-19");
    assert_proche("sin(3.1415926535897932384626433833)", "0", "1e-19");
    assert_proche("cos(3.1415926535897932384626433833)", "-1", "1e-19");
}

/* ------------------------ Logarithmes / puissances ------------------------ */

#[test]
fn sci_logarithmes() {
    assert_memes("ln(1024)", "10*ln(2)", "1e-18");
    assert_memes("ln(6)", "ln(2)+ln(3)", "1e-18");
    assert_proche("log10(1000)", "3", "1e-18");
    assert_proche("log10(0.01)", "-2", "1e-18");
    assert_proche("ln(2.7182818284590452353602874714)", "1", "1e-18");
}

#[test]
fn sci_puissances() {
    assert_proche("2^(-1/3)", "0.7937005259840997373758528196", "1e-18");
    assert_proche("729^(1/3)", "9", "1e-18");
    assert_proche("2^0.5*2^0.5", "2", "1e-18");
    assert_eq!(evaluate("2^10").unwrap(), "1024");
    assert_eq!(evaluate("(1/2)^3").unwrap(), "0.125");
    assert!(evaluate("10^-1+1").is_err());
    assert_eq!(evaluate("10^(-2)").unwrap(), "0.01");
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_erreurs_lexicales() {
    for expr in ["sin(.)", "234.56*23 5+123", "8244.0735992+2.36.25", "3 # 4", "1e5", "2E3+1"] {
        let e = evaluate(expr).unwrap_err();
        assert!(e.is_lexical(), "expr={expr:?} err={e:?}");
    }
    assert_erreur(" 7+ (5 ", CalcError::UnexpectedEnd { position: 7 });
    assert_erreur(" 7  + ((5* 3  )", CalcError::UnexpectedEnd { position: 15 });
    assert_erreur("2(3)", CalcError::UnknownFunction { name: "2".into() });
    assert_erreur("sinus(1)", CalcError::UnknownFunction { name: "sinus".into() });
}

#[test]
fn sci_erreurs_evaluation() {
    assert_erreur("cot(1)", CalcError::NotImplemented("cot".into()));
    assert_erreur("1/0", CalcError::DivideByZero);
    assert_erreur("1/(2-2)", CalcError::DivideByZero);
    assert_erreur("0^(-0.5)", CalcError::DivideByZero);
    assert_erreur("79228162514264337593543950335+1", CalcError::Overflow);

    for expr in [
        "tan(1.5707963267948966192313216916)",
        "tan(4.7123889803846898576939650749)",
        "ln(0)",
        "ln(-2)",
        "log10(0)",
        "(-8)^(1/3)",
    ] {
        assert!(
            matches!(evaluate(expr), Err(CalcError::Domain(_))),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_echec_sans_trace() {
    // un échec ne laisse rien : l’appel suivant est indépendant
    assert!(evaluate("1/0").is_err());
    assert_eq!(evaluate("1+1").unwrap(), "2");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_longues_chaines() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // 1 + 1 + ... (n termes)
    for n in [10usize, 100, 400] {
        let expr = vec!["1"; n].join("+");
        assert_eq!(evaluate(&expr).unwrap(), n.to_string());
        budget(t0, max);
    }

    // somme de n septièmes : exacte
    for n in [7usize, 70, 210] {
        let expr = vec!["1/7"; n].join(" + ");
        assert_eq!(evaluate(&expr).unwrap(), (n / 7).to_string());
        budget(t0, max);
    }
}

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    for profondeur in [1usize, 10, 60] {
        let expr = format!("{}2{}*3", "(".repeat(profondeur), ")".repeat(profondeur));
        assert_eq!(evaluate(&expr).unwrap(), "6");
        budget(t0, max);
    }

    // fonctions imbriquées
    let expr = format!("{}0.5{}", "sin(".repeat(20), ")".repeat(20));
    let (r, dem) = eval_expression(&expr, 20).unwrap();
    assert!(!r.is_empty());
    assert_eq!(dem.jetons.matches("sin").count(), 20);
    budget(t0, max);
}
