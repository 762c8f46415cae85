// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix) + ensemble des variables libres
// - Puis réduire la RPN sur une pile de f64
//
// Règles:
// - Fonction (sin/cos/log) : doit être suivie de '(' ; fonction + '(' empilées ensemble,
//   la fonction sort juste après la ')' correspondante.
// - Ident : variable libre => sortie directe + enregistrée.
// - ^ associatif à droite, les autres à gauche (voir priorite.rs).
//
// NOTE:
// - Division par zéro, log(<0), etc. ne sont pas des erreurs : ∞/NaN se propagent.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::erreur::ErreurExpr;
use super::jetons::{Fonction, Operateur, Tok};
use super::priorite::doit_depiler;

/// Résultat de la conversion : RPN (sans parenthèses) + variables rencontrées.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Postfixe {
    pub sequence: Vec<Tok>,
    pub variables: BTreeSet<String>,
}

impl Postfixe {
    /// Une RPN avec variables libres ne doit pas être évaluée.
    pub fn evaluable(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(90), RPar, Op(Plus), Num(1)]
///   rpn:    [Num(90), Fonction(Sin), Num(1), Op(Plus)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Postfixe, ErreurExpr> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();
    let mut variables = BTreeSet::new();

    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::Inconnu(_) => out.push(tok.clone()),

            Tok::Fonction(f) => {
                // fonction : on la garde sur la pile (elle sortira après son argument)
                if iter.next_if(|t| matches!(t, Tok::LPar)).is_none() {
                    return Err(ErreurExpr::AppelFonctionMalForme(f.nom().into()));
                }
                ops.push(tok.clone());
                ops.push(Tok::LPar);
            }

            Tok::Ident(name) => {
                out.push(tok.clone());
                variables.insert(name.clone());
            }

            Tok::LPar => ops.push(Tok::LPar),

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurExpr::ParenthesesMalAppariees),
                    }
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(f @ Tok::Fonction(_)) = ops.last() {
                    out.push(f.clone());
                    ops.pop();
                }
            }

            Tok::Op(_) => {
                while let Some(top) = ops.last() {
                    if !doit_depiler(top, tok) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(tok.clone());
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurExpr::ParenthesesMalAppariees);
        }
        out.push(op);
    }

    debug!(rpn = %format_postfixe(&out), ?variables, "conversion RPN");
    Ok(Postfixe {
        sequence: out,
        variables,
    })
}

/// Rendu RPN : chaque jeton suivi d’un espace ("3 4 2 * + ").
pub fn format_postfixe(rpn: &[Tok]) -> String {
    let mut s = String::new();
    for t in rpn {
        s.push_str(&t.to_string());
        s.push(' ');
    }
    s
}

/* ------------------------ Réduction (partagée avec direct.rs) ------------------------ */

/// Applique un opérateur binaire : dépile droite puis gauche, empile le résultat.
pub(crate) fn reduire_binaire(pile: &mut Vec<f64>, op: Operateur) -> Result<(), ErreurExpr> {
    let insuffisant = || ErreurExpr::OperandesInsuffisantes(op.symbole().to_string());
    let b = pile.pop().ok_or_else(insuffisant)?;
    let a = pile.pop().ok_or_else(insuffisant)?;
    let r = op.appliquer(a, b);
    trace!(a, b, op = %op.symbole(), r, "réduction binaire");
    pile.push(r);
    Ok(())
}

/// Applique une fonction unaire au sommet de pile.
pub(crate) fn reduire_fonction(pile: &mut Vec<f64>, f: Fonction) -> Result<(), ErreurExpr> {
    let x = pile
        .pop()
        .ok_or_else(|| ErreurExpr::OperandesInsuffisantes(f.nom().into()))?;
    let r = f.appliquer(x);
    trace!(x, fonction = f.nom(), r, "réduction fonction");
    pile.push(r);
    Ok(())
}

/// Valeur finale : pile vide => 0 (convention), une valeur => elle, sinon erreur.
pub(crate) fn valeur_finale(mut pile: Vec<f64>) -> Result<f64, ErreurExpr> {
    match pile.len() {
        0 => Ok(0.0),
        1 => Ok(pile.pop().unwrap_or_default()),
        n => Err(ErreurExpr::OperandesExcedentaires(n)),
    }
}

/// Évalue une RPN.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurExpr> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(_) | Tok::Pi => st.extend(tok.valeur()),
            Tok::Op(op) => reduire_binaire(&mut st, *op)?,
            Tok::Fonction(f) => reduire_fonction(&mut st, *f)?,
            Tok::Ident(_) | Tok::Inconnu(_) | Tok::LPar | Tok::RPar => {
                return Err(ErreurExpr::JetonIndefini(tok.to_string()));
            }
        }
    }

    valeur_finale(st)
}
