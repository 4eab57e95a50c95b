// src/noyau/jetons.rs

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    Plus,
    Moins,
    Fois,   // ×
    Divise, // ÷

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.5, 4., .25) ; un seul '.' par nombre
/// - opérateurs + - × ÷ (et leurs alias ASCII * /)
/// - parenthèses ( )
///
/// Le '-' sort toujours en `Tok::Moins` : c’est le RPN qui décide s’il est unaire.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Moins),
            '×' | '*' => Some(Tok::Fois),
            '÷' | '/' => Some(Tok::Divise),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre décimal : suite maximale de chiffres et de points
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.push(Tok::Num(lire_nombre(&mot)?));
            continue;
        }

        return Err(ErreurEval::CaractereInattendu(c));
    }

    Ok(out)
}

/// "." seul, "1.2.3" : refusés (pas de nombre vide, pas de double point).
fn lire_nombre(mot: &str) -> Result<f64, ErreurEval> {
    let a_un_chiffre = mot.chars().any(|c| c.is_ascii_digit());
    if !a_un_chiffre || mot.matches('.').count() > 1 {
        return Err(ErreurEval::NombreInvalide(mot.to_string()));
    }
    mot.parse::<f64>()
        .map_err(|_| ErreurEval::NombreInvalide(mot.to_string()))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => super::format::rendre(*v),

            Tok::Plus => "+".to_string(),
            Tok::Moins => "-".to_string(),
            Tok::Fois => "×".to_string(),
            Tok::Divise => "÷".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
