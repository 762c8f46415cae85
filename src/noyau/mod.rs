//! Noyau RPN
//!
//! Organisation interne :
//! - priorite.rs   : table de priorité + associativité
//! - validation.rs : parenthèses, alphabet, opérateurs consécutifs
//! - jetons.rs     : tokenisation (pi => marqueur dédié)
//! - rpn.rs        : shunting-yard + évaluation RPN
//! - direct.rs     : évaluation infixe directe (double pile)
//! - erreur.rs     : taxonomie des erreurs
//! - eval.rs       : pipeline complet

pub mod direct;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod priorite;
pub mod rpn;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurExpr;
pub use eval::{eval_expression, Rapport};
