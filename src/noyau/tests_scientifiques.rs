//! Tests scientifiques (campagne) : propriétés de bout en bout du pipeline.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Moins unaire : seulement "-chiffre" en tête d’expression ou après '('.
//!   "-(2+3)" passe la validation mais échoue à l’évaluation (opérandes insuffisantes).
//! - ∞/NaN ne sont pas des erreurs : ils se propagent jusqu’au résultat.
//! - Trig en radians, log en base 10.

use std::f64::consts::PI;

use super::eval::{presque_egaux, Resultats};
use super::jetons::tokenize;
use super::rpn::{eval_rpn, format_postfixe, to_rpn};
use super::validation::validate;
use super::erreur::TypeErreur;
use super::eval_expression;

fn resultats_ok(expr: &str) -> Resultats {
    eval_expression(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .resultats
        .unwrap_or_else(|| panic!("évaluation sautée pour expr={expr:?}"))
}

fn assert_valeur(expr: &str, attendu: f64) {
    let res = resultats_ok(expr);
    let a = res.infixe.clone().unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    let b = res.postfixe.clone().unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert!(presque_egaux(a, attendu), "infixe expr={expr:?} {a} != {attendu}");
    assert!(presque_egaux(b, attendu), "postfixe expr={expr:?} {b} != {attendu}");
}

fn assert_postfixe(expr: &str, attendu: &str) {
    let r = eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(r.postfixe, attendu, "expr={expr:?}");
}

/* ------------------------ Validation ------------------------ */

#[test]
fn sci_parentheses_equilibrees() {
    assert!(!validate("(3 + 4"));
    assert!(!validate("3 + 4)"));
    assert!(validate("(3+4)"));
}

#[test]
fn sci_operateurs_consecutifs() {
    assert!(!validate("3 ++ 4"));
    let e = eval_expression("3 + + 4").unwrap_err();
    assert_eq!(e.kind(), TypeErreur::ConsecutiveOperators);
}

/* ------------------------ Associativité / priorités ------------------------ */

#[test]
fn sci_associativite() {
    assert_postfixe("2 ^ 3 ^ 2", "2 3 2 ^ ^ ");
    assert_valeur("2 ^ 3 ^ 2", 512.0);

    assert_postfixe("8 - 3 - 2", "8 3 - 2 - ");
    assert_valeur("8 - 3 - 2", 3.0);

    assert_valeur("2 * 3 ^ 2", 18.0);
    assert_valeur("(2 * 3) ^ 2", 36.0);
    assert_valeur("100 / 10 / 5", 2.0);
}

#[test]
fn sci_scenario_bout_en_bout() {
    assert_postfixe("3 + 4 * 2", "3 4 2 * + ");
    assert_valeur("3 + 4 * 2", 11.0);
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_fonction_attachee() {
    assert_postfixe("sin(90) + 1", "90 sin 1 + ");
    assert_valeur("sin(90) + 1", 90f64.sin() + 1.0);
    assert!((90f64.sin() + 1.0 - 1.8940).abs() < 1e-4);
}

#[test]
fn sci_exemple_de_la_banniere() {
    let expr = "(3 * log(100) + (sin(90))^2 - cos(log(1000)) + 2 - 3 * 4 + 12)";
    let attendu = 3.0 * 2.0 + 90f64.sin().powi(2) - 3f64.cos() + 2.0 - 12.0 + 12.0;
    assert_valeur(expr, attendu);
    assert_postfixe(
        expr,
        "3 100 log * 90 sin 2 ^ + 1000 log cos - 2 + 3 4 * - 12 + ",
    );
}

#[test]
fn sci_pi() {
    assert_valeur("cos(pi)", -1.0);
    assert_valeur("pi / 2", PI / 2.0);
    assert_postfixe("2 * pi", "2 pi * ");
}

/* ------------------------ Variables ------------------------ */

#[test]
fn sci_variables_detectees() {
    let r = eval_expression("2 * x + 1").unwrap();
    assert_eq!(r.variables.iter().collect::<Vec<_>>(), vec!["x"]);
    assert!(r.resultats.is_none());
    assert_eq!(r.postfixe, "2 x * 1 + ");
}

#[test]
fn sci_nom_de_fonction_colle_est_variable() {
    // "sinx" n’est pas sin(x)
    let r = eval_expression("sinx + 1").unwrap();
    assert!(r.variables.contains("sinx"));
}

/* ------------------------ Erreurs d’évaluation ------------------------ */

#[test]
fn sci_operandes_insuffisantes() {
    let e = eval_rpn(&tokenize("3 +")).unwrap_err();
    assert_eq!(e.kind(), TypeErreur::InsufficientOperands);

    let res = resultats_ok("-(2+3)");
    assert_eq!(res.infixe.unwrap_err().kind(), TypeErreur::InsufficientOperands);
    assert_eq!(res.postfixe.unwrap_err().kind(), TypeErreur::InsufficientOperands);
}

#[test]
fn sci_fonction_sans_parenthese() {
    let e = eval_expression("log 10").unwrap_err();
    assert_eq!(e.kind(), TypeErreur::MismatchedFunctionCall);
}

#[test]
fn sci_non_finis() {
    let res = resultats_ok("1 / 0");
    assert_eq!(res.infixe, Ok(f64::INFINITY));
    assert_eq!(res.postfixe, Ok(f64::INFINITY));
    assert!(res.concordent());

    let res = resultats_ok("log(0)");
    assert_eq!(res.postfixe, Ok(f64::NEG_INFINITY));

    let res = resultats_ok("(-4) ^ 0.5");
    assert!(res.infixe.unwrap().is_nan());
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sci_conversion_pure() {
    let jetons = tokenize("cos(log(1000)) * x ^ 2 ^ y");
    let p1 = to_rpn(&jetons).unwrap();
    let p2 = to_rpn(&jetons).unwrap();
    assert_eq!(p1, p2);
    assert_eq!(format_postfixe(&p1.sequence), "1000 log cos x 2 y ^ ^ * ");
}

#[test]
fn sci_entree_vide() {
    assert_valeur("", 0.0);
    assert_valeur("   ", 0.0);
    assert_postfixe("", "");
}
