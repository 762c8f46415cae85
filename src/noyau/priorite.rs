// src/noyau/priorite.rs

use super::jetons::{Operateur, Tok};

/// Niveau de priorité d’un jeton (plus haut = lie plus fort).
///
/// fonctions 5, ^ 4, * / 3, + - 2, ( 1, sinon 0 (pas un opérateur).
pub fn precedence(t: &Tok) -> u8 {
    match t {
        Tok::Fonction(_) => 5,
        Tok::Op(Operateur::Puissance) => 4,
        Tok::Op(Operateur::Fois | Operateur::Divise) => 3,
        Tok::Op(Operateur::Plus | Operateur::Moins) => 2,
        Tok::LPar => 1,
        _ => 0,
    }
}

pub fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Op(Operateur::Puissance))
}

/// Le sommet de pile `top` doit-il sortir avant d’empiler `tok` ?
pub fn doit_depiler(top: &Tok, tok: &Tok) -> bool {
    let p_top = precedence(top);
    let p_tok = precedence(tok);
    if is_right_associative(tok) {
        p_top > p_tok
    } else {
        p_top >= p_tok
    }
}
