//! Noyau — évaluation (pipeline réel)
//!
//! validation -> jetons -> RPN (+ variables) -> eval_rpn
//!                    \-> eval_infix (contre-vérification)
//!
//! Remarque : une erreur de validation ou de conversion arrête tout ;
//! une erreur d’évaluation reste locale à son chemin (infixe ou postfixe).

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::direct::eval_infix;
use super::erreur::ErreurExpr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, format_postfixe, to_rpn};
use super::validation::verifier;

/// Écart relatif toléré entre les deux chemins d’évaluation.
pub const TOLERANCE_RELATIVE: f64 = 1e-9;

/// Résultats des deux évaluateurs, chacun avec sa propre issue.
#[derive(Clone, Debug, PartialEq)]
pub struct Resultats {
    pub infixe: Result<f64, ErreurExpr>,
    pub postfixe: Result<f64, ErreurExpr>,
}

impl Resultats {
    /// Vrai si les deux chemins réussissent et donnent la même valeur.
    pub fn concordent(&self) -> bool {
        match (&self.infixe, &self.postfixe) {
            (Ok(a), Ok(b)) => presque_egaux(*a, *b),
            _ => false,
        }
    }
}

/// Égalité à TOLERANCE_RELATIVE près ; NaN == NaN, ∞ == ∞ de même signe.
pub fn presque_egaux(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let echelle = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TOLERANCE_RELATIVE * echelle
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rapport {
    pub jetons: String,
    pub postfixe: String,
    pub variables: BTreeSet<String>,
    // None <=> variables libres présentes (évaluation sautée)
    pub resultats: Option<Resultats>,
}

/// API publique : traite une expression et retourne :
/// - la RPN rendue ("3 4 2 * + ")
/// - les variables libres
/// - les deux résultats (si aucune variable)
pub fn eval_expression(expr_str: &str) -> Result<Rapport, ErreurExpr> {
    // 1) Validation lexicale
    verifier(expr_str)?;

    // 2) Jetons
    let jetons = tokenize(expr_str);
    debug!(n = jetons.len(), "tokenisation");

    // 3) RPN
    let rpn = to_rpn(&jetons)?;

    let mut rapport = Rapport {
        jetons: format_tokens(&jetons),
        postfixe: format_postfixe(&rpn.sequence),
        variables: rpn.variables.clone(),
        resultats: None,
    };

    if !rpn.evaluable() {
        debug!(variables = ?rapport.variables, "évaluation sautée");
        return Ok(rapport);
    }

    // 4) Deux chemins indépendants
    let resultats = Resultats {
        infixe: eval_infix(&jetons),
        postfixe: eval_rpn(&rpn.sequence),
    };

    if let (Ok(a), Ok(b)) = (&resultats.infixe, &resultats.postfixe) {
        if !a.is_finite() || !b.is_finite() {
            warn!(infixe = a, postfixe = b, "résultat non fini");
        }
    }
    if resultats.infixe.is_ok() && resultats.postfixe.is_ok() && !resultats.concordent() {
        warn!(?resultats, "les évaluations infixe et postfixe divergent");
    }

    rapport.resultats = Some(resultats);
    Ok(rapport)
}
