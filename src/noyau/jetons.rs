// src/noyau/jetons.rs

use std::f64::consts::PI;
use std::fmt;

/// Opérateurs binaires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
        }
    }

    pub fn appliquer(self, a: f64, b: f64) -> f64 {
        match self {
            Operateur::Plus => a + b,
            Operateur::Moins => a - b,
            Operateur::Fois => a * b,
            Operateur::Divise => a / b,
            Operateur::Puissance => a.powf(b),
        }
    }
}

/// Fonctions unaires reconnues (radians, log décimal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Log,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "log" => Some(Fonction::Log),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Log => "log",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Log => x.log10(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    // Constante π : marqueur dédié, jamais reconnu par comparaison de texte.
    Pi,

    // Tout identifiant qui n’est ni une fonction ni pi : variable libre.
    Ident(String),
    Fonction(Fonction),
    Op(Operateur),

    LPar,
    RPar,

    // Suite de chiffres/points illisible ("1.2.3") ou caractère hors grammaire.
    Inconnu(String),
}

impl Tok {
    /// Valeur numérique si le jeton est un nombre (ou π).
    pub fn valeur(&self) -> Option<f64> {
        match self {
            Tok::Num(v) => Some(*v),
            Tok::Pi => Some(PI),
            _ => None,
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Pi => f.write_str("pi"),
            Tok::Ident(nom) => f.write_str(nom),
            Tok::Fonction(func) => f.write_str(func.nom()),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Inconnu(s) => f.write_str(s),
        }
    }
}

fn est_operande(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Tokenize une chaîne (déjà validée) en jetons.
///
/// - espaces ignorés
/// - suite maximale de chiffres/points => Num
/// - '-' collé à un chiffre, en position d’opérande => nombre négatif
/// - suite maximale de lettres => Fonction (sin/cos/log), Pi, ou Ident
/// - tout autre caractère => jeton d’un caractère
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let moins_unaire = c == '-'
            && i + 1 < chars.len()
            && chars[i + 1].is_ascii_digit()
            && attend_operande(&out);

        if est_operande(c) || moins_unaire {
            let start = i;
            i += 1;
            while i < chars.len() && est_operande(chars[i]) {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push(nombre(texte));
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();

            if mot == "pi" {
                out.push(Tok::Pi);
            } else if let Some(func) = Fonction::depuis_nom(&mot) {
                out.push(Tok::Fonction(func));
            } else {
                out.push(Tok::Ident(mot));
            }
            continue;
        }

        let tok = match c {
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => match Operateur::depuis_char(c) {
                Some(op) => Tok::Op(op),
                None => Tok::Inconnu(c.to_string()),
            },
        };
        out.push(tok);
        i += 1;
    }

    out
}

/// Position d’opérande : début, après '(' ou après un opérateur.
fn attend_operande(prec: &[Tok]) -> bool {
    matches!(prec.last(), None | Some(Tok::LPar) | Some(Tok::Op(_)))
}

fn nombre(texte: String) -> Tok {
    match texte.parse::<f64>() {
        Ok(v) if v.is_finite() => Tok::Num(v),
        _ => Tok::Inconnu(texte),
    }
}

/// Liste de jetons en texte (séparés par un espace).
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
