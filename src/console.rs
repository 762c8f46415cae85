// src/console.rs
//
// Mode console (natif) : chaque argument de la ligne de commande est traité
// comme une expression, et le rapport est écrit sur stdout.
// Aucune fenêtre n’est ouverte dans ce mode.

use std::fmt::Write as _;

use crate::noyau::{eval_expression, ErreurExpr, Rapport};

/// Texte d’un rapport.
pub fn rendu_rapport(rapport: &Rapport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Expression postfixe : {}", rapport.postfixe);

    match &rapport.resultats {
        Some(res) => {
            let _ = writeln!(
                s,
                "Résultat (infixe) : {}",
                rendu_valeur(&res.infixe)
            );
            let _ = writeln!(
                s,
                "Résultat (postfixe) : {}",
                rendu_valeur(&res.postfixe)
            );
        }
        None => {
            let _ = writeln!(
                s,
                "Note : l’expression contient des variables, pas d’évaluation."
            );
        }
    }
    s
}

fn rendu_valeur(v: &Result<f64, ErreurExpr>) -> String {
    match v {
        Ok(x) => format!("{x}"),
        Err(e) => format!("Erreur : {e}"),
    }
}

/// Texte d’une erreur bloquante (validation ou conversion).
pub fn rendu_erreur(e: &ErreurExpr) -> String {
    if e.est_validation() {
        format!("Expression invalide ({e}) : vérifier les opérateurs et les parenthèses.")
    } else {
        format!("Erreur : {e}")
    }
}

/// Traite chaque expression ; renvoie false si au moins une a échoué.
pub fn executer<I>(expressions: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut tout_ok = true;
    for e in expressions {
        println!("{e}");
        match eval_expression(&e) {
            Ok(rapport) => print!("{}", rendu_rapport(&rapport)),
            Err(err) => {
                tracing::info!(expression = %e, erreur = %err, "expression rejetée");
                println!("{}", rendu_erreur(&err));
                tout_ok = false;
            }
        }
    }
    tout_ok
}
