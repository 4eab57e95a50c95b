//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> valeur f64 -> arrondi (N chiffres significatifs) -> rendu
//!
//! Aucune évaluation dynamique : la grammaire est fermée (nombres, + - × ÷, parenthèses).

use super::erreur::ErreurEval;
use super::format::{arrondir_significatif, rendre};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, format_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// Évaluation réussie : valeur arrondie + rendu + démarche.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub expression: String,
    pub valeur: f64,
    pub rendu: String,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue une expression complète.
pub fn eval_expression(expr_str: &str, chiffres: usize) -> Result<Evaluation, ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::ExpressionVide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Valeur
    let brute = eval_rpn(&rpn)?;

    // 4) Arrondi : près de f64::MAX, l’arrondi peut déborder vers l’infini
    let valeur = arrondir_significatif(brute, chiffres);
    if !valeur.is_finite() {
        return Err(ErreurEval::ResultatNonFini);
    }

    // 5) Rendu (relu tel quel si réutilisé comme opérande)
    let rendu = rendre(valeur);

    Ok(Evaluation {
        expression: s.to_string(),
        valeur,
        rendu,
        demarche: DemarcheNoyau {
            jetons: format_tokens(&jetons),
            rpn: format_rpn(&rpn),
        },
    })
}
