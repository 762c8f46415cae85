// src/noyau/validation.rs
//
// Validation lexicale AVANT toute tokenisation :
// - profondeur de parenthèses jamais négative, nulle à la fin
// - alphabet : chiffres, lettres, espaces, + - * / ^ ( ) .
// - pas deux opérateurs binaires de suite (espaces ignorés entre eux)
//
// Limite assumée : "2 * -3" est refusé (adjacence pure, pas de cas spécial unaire).

use super::erreur::ErreurExpr;

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

fn est_autorise(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || c.is_whitespace()
        || est_operateur(c)
        || matches!(c, '(' | ')' | '.')
}

/// Vérifie l’entrée et indique la première règle violée.
pub fn verifier(s: &str) -> Result<(), ErreurExpr> {
    let mut profondeur: usize = 0;
    let mut dernier: Option<char> = None;

    for c in s.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or(ErreurExpr::ParenthesesDesequilibrees)?;
            }
            _ => {}
        }

        if !est_autorise(c) {
            return Err(ErreurExpr::CaractereInvalide(c));
        }

        if est_operateur(c) {
            if let Some(p) = dernier.filter(|&p| est_operateur(p)) {
                return Err(ErreurExpr::OperateursConsecutifs(p, c));
            }
        }

        if !c.is_whitespace() {
            dernier = Some(c);
        }
    }

    if profondeur != 0 {
        return Err(ErreurExpr::ParenthesesDesequilibrees);
    }
    Ok(())
}

/// Contrat booléen : vrai si la chaîne peut être tokenisée.
pub fn validate(s: &str) -> bool {
    verifier(s).is_ok()
}
