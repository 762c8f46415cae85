// src/noyau/direct.rs
//
// Évaluation directe de l’infixe (double pile), sans RPN intermédiaire.
// Même boucle que to_rpn : là où to_rpn "sort" un opérateur, on l’applique tout de suite.
// Sert de contre-vérification de eval_rpn.

use super::erreur::ErreurExpr;
use super::jetons::Tok;
use super::priorite::doit_depiler;
use super::rpn::{reduire_binaire, reduire_fonction, valeur_finale};

/// Applique le sommet de `ops` (opérateur ou fonction) sur `valeurs`.
fn appliquer_sommet(valeurs: &mut Vec<f64>, ops: &mut Vec<Tok>) -> Result<(), ErreurExpr> {
    match ops.pop() {
        Some(Tok::Op(op)) => reduire_binaire(valeurs, op),
        Some(Tok::Fonction(f)) => reduire_fonction(valeurs, f),
        // '(' restante en fin d’entrée
        Some(Tok::LPar) => Err(ErreurExpr::ParenthesesMalAppariees),
        Some(autre) => Err(ErreurExpr::JetonIndefini(autre.to_string())),
        None => Ok(()),
    }
}

/// Évalue une suite de jetons infixe.
pub fn eval_infix(tokens: &[Tok]) -> Result<f64, ErreurExpr> {
    let mut valeurs: Vec<f64> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) | Tok::Pi => valeurs.extend(tok.valeur()),

            Tok::Fonction(f) => {
                if iter.next_if(|t| matches!(t, Tok::LPar)).is_none() {
                    return Err(ErreurExpr::AppelFonctionMalForme(f.nom().into()));
                }
                ops.push(tok.clone());
                ops.push(Tok::LPar);
            }

            Tok::LPar => ops.push(Tok::LPar),

            Tok::RPar => {
                // résout toute la parenthèse
                while !matches!(ops.last(), Some(Tok::LPar)) {
                    if ops.is_empty() {
                        return Err(ErreurExpr::ParenthesesMalAppariees);
                    }
                    appliquer_sommet(&mut valeurs, &mut ops)?;
                }
                ops.pop();

                // fonction en attente de son argument
                if matches!(ops.last(), Some(Tok::Fonction(_))) {
                    appliquer_sommet(&mut valeurs, &mut ops)?;
                }
            }

            Tok::Op(_) => {
                while ops.last().is_some_and(|top| doit_depiler(top, tok)) {
                    appliquer_sommet(&mut valeurs, &mut ops)?;
                }
                ops.push(tok.clone());
            }

            Tok::Ident(_) | Tok::Inconnu(_) => {
                return Err(ErreurExpr::JetonIndefini(tok.to_string()));
            }
        }
    }

    while !ops.is_empty() {
        appliquer_sommet(&mut valeurs, &mut ops)?;
    }

    valeur_finale(valeurs)
}
