// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - validation : CaractereInvalide, ParenthesesDesequilibrees, OperateursConsecutifs
// - conversion : AppelFonctionMalForme, ParenthesesMalAppariees
// - réduction  : OperandesInsuffisantes, JetonIndefini, OperandesExcedentaires

use thiserror::Error;

/// Erreur du pipeline (validation, conversion ou réduction).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurExpr {
    #[error("caractère invalide: '{0}'")]
    CaractereInvalide(char),

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    #[error("opérateurs consécutifs: '{0}' puis '{1}'")]
    OperateursConsecutifs(char, char),

    #[error("'(' attendue après la fonction '{0}'")]
    AppelFonctionMalForme(String),

    #[error("parenthèses mal appariées")]
    ParenthesesMalAppariees,

    #[error("opérandes insuffisantes pour '{0}'")]
    OperandesInsuffisantes(String),

    #[error("variable ou fonction indéfinie '{0}'")]
    JetonIndefini(String),

    #[error("{0} valeurs restantes sur la pile (une seule attendue)")]
    OperandesExcedentaires(usize),
}

/// Nature de l’erreur, sans contexte (pour comparer sans dépendre du message).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeErreur {
    InvalidCharacter,
    UnbalancedParentheses,
    ConsecutiveOperators,
    MismatchedFunctionCall,
    MismatchedParentheses,
    InsufficientOperands,
    UndefinedToken,
    ExcessOperands,
}

impl ErreurExpr {
    pub fn kind(&self) -> TypeErreur {
        match self {
            ErreurExpr::CaractereInvalide(_) => TypeErreur::InvalidCharacter,
            ErreurExpr::ParenthesesDesequilibrees => TypeErreur::UnbalancedParentheses,
            ErreurExpr::OperateursConsecutifs(..) => TypeErreur::ConsecutiveOperators,
            ErreurExpr::AppelFonctionMalForme(_) => TypeErreur::MismatchedFunctionCall,
            ErreurExpr::ParenthesesMalAppariees => TypeErreur::MismatchedParentheses,
            ErreurExpr::OperandesInsuffisantes(_) => TypeErreur::InsufficientOperands,
            ErreurExpr::JetonIndefini(_) => TypeErreur::UndefinedToken,
            ErreurExpr::OperandesExcedentaires(_) => TypeErreur::ExcessOperands,
        }
    }

    /// Vrai si l’erreur vient du validateur (entrée rejetée avant tokenisation).
    pub fn est_validation(&self) -> bool {
        matches!(
            self.kind(),
            TypeErreur::InvalidCharacter
                | TypeErreur::UnbalancedParentheses
                | TypeErreur::ConsecutiveOperators
        )
    }
}
