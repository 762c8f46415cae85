//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, RPN, deux résultats, erreur,
//! démarche, précision d’affichage) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : on dépose un `Rapport` déjà calculé.
//! - Actions déterministes, sans effet de bord caché.
//! - Précision bornée (DECIMALES_MAX).

use crate::noyau::validation::validate;
use crate::noyau::{ErreurExpr, Rapport};

/// Précision fixe proposée quand l’utilisateur active l’arrondi.
const DECIMALES_DEFAUT: usize = 6;

/// Au-delà, f64 n’a plus de chiffres significatifs à montrer.
const DECIMALES_MAX: usize = 17;

/// Exemple d’expression valide (bouton "Exemple").
pub const EXEMPLE: &str = "(3 * log(100) + (sin(90))^2 - cos(log(1000)) + 2 - 3 * 4 + 12)";

/// Motifs retirés d’un bloc par DEL.
const MOTIFS_DEL: [&str; 4] = ["sin(", "cos(", "log(", "pi"];

/// Nature d’un texte inséré par un bouton (règle d’espacement).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Chiffre,
    Mot,
    Fonction,
    Operateur,
    ParOuvrante,
    ParFermante,
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub variables: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub postfixe: String,
    pub resultat_infixe: String,
    pub resultat_postfixe: String,
    pub concordance: Option<bool>, // None : pas d’évaluation (variables, erreur, vide)
    pub erreur: String,
    pub resultats_dispo: bool, // false si variables / erreur / vide

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    // None : affichage par défaut de f64 ; Some(n) : n décimales
    pub decimales: Option<usize>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            postfixe: String::new(),
            resultat_infixe: String::new(),
            resultat_postfixe: String::new(),
            concordance: None,
            erreur: String::new(),
            resultats_dispo: false, // au démarrage : rien à lire
            demarche: Demarche::default(),
            decimales: None,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.decimales = None;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    fn clear_valeurs(&mut self) {
        self.resultat_infixe.clear();
        self.resultat_postfixe.clear();
        self.concordance = None;
        self.resultats_dispo = false;
    }

    /// CLR : effacer RPN + résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.postfixe.clear();
        self.clear_valeurs();
        self.erreur.clear();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /* ------------------------ Édition de l’entrée ------------------------ */

    /// Insère le texte d’un bouton en gardant une entrée lisible ("3 + sin(2)").
    ///
    /// - opérateur : entouré d’un espace
    /// - fonction / '(' : espace si collé à une valeur
    /// - mot (pi, x) : espace si collé à un chiffre ou ')'
    /// - chiffre / ')' : collés
    pub fn inserer(&mut self, texte: &str, genre: Insertion) {
        let dernier = self.entree.trim_end().chars().last();
        let apres_valeur = |c: char| c.is_ascii_digit() || c == ')';

        match genre {
            Insertion::Operateur => {
                self.retirer_espaces_finaux();
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
            Insertion::ParFermante => {
                self.retirer_espaces_finaux();
                self.entree.push_str(texte);
            }
            Insertion::Fonction | Insertion::ParOuvrante => {
                if dernier.is_some_and(|c| apres_valeur(c) || c.is_ascii_alphabetic()) {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
            }
            Insertion::Mot => {
                let colle = !self.entree.ends_with(char::is_whitespace);
                if colle && dernier.is_some_and(apres_valeur) {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
            }
            Insertion::Chiffre => self.entree.push_str(texte),
        }

        self.focus_entree = true;
    }

    /// DEL : retire un motif entier ("sin(", "pi"...) ou, à défaut, un caractère.
    pub fn retour_arriere(&mut self) {
        self.retirer_espaces_finaux();

        let motif = MOTIFS_DEL.iter().find(|m| self.entree.ends_with(*m));
        let n = motif.map_or(1, |m| m.len());
        for _ in 0..n {
            self.entree.pop();
        }

        self.retirer_espaces_finaux();
        self.focus_entree = true;
    }

    /// Contrôle en direct pendant la saisie (une entrée vide n’est pas signalée).
    pub fn entree_suspecte(&self) -> bool {
        let s = self.entree.trim();
        !s.is_empty() && !validate(s)
    }

    fn retirer_espaces_finaux(&mut self) {
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
    }

    /// Utilitaire : placer une erreur bloquante (validation / conversion).
    ///
    /// Pas de RPN ni de résultat dans ce cas : tout est effacé sauf l’entrée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.postfixe.clear();
        self.clear_valeurs();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un rapport complet (RPN + résultats éventuels + démarche).
    pub fn set_rapport(&mut self, rapport: &Rapport) {
        self.erreur.clear();
        self.postfixe = rapport.postfixe.clone();

        let variables = rapport
            .variables
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let note = match &rapport.resultats {
            Some(res) => {
                self.resultat_infixe = self.rendu_valeur(&res.infixe);
                self.resultat_postfixe = self.rendu_valeur(&res.postfixe);
                self.concordance = Some(res.concordent());
                self.resultats_dispo = true;
                "Pipeline: validation → jetons → RPN → évaluation RPN, et en parallèle évaluation infixe directe."
            }
            None => {
                self.clear_valeurs();
                "Variables présentes : évaluation non effectuée."
            }
        };

        self.demarche = Demarche {
            jetons: rapport.jetons.clone(),
            rpn: rapport.postfixe.clone(),
            variables,
            note: note.into(),
        };

        self.focus_entree = true;
    }

    /// Affichage d’un résultat selon la précision courante.
    pub fn rendu_valeur(&self, v: &Result<f64, ErreurExpr>) -> String {
        match (v, self.decimales) {
            (Ok(x), None) => format!("{x}"),
            (Ok(x), Some(n)) => format!("{x:.n$}"),
            (Err(e), _) => format!("erreur : {e}"),
        }
    }

    /// Active/désactive l’arrondi d’affichage.
    pub fn set_arrondi(&mut self, actif: bool) {
        self.decimales = actif.then_some(self.decimales.unwrap_or(DECIMALES_DEFAUT));
        self.focus_entree = true;
    }

    /// Garde-fou : limite le nombre de décimales.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.decimales = Some(decimales.min(DECIMALES_MAX));
        self.focus_entree = true;
    }

    pub fn decimales_max() -> usize {
        DECIMALES_MAX
    }
}
