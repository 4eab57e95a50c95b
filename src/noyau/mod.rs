//! Noyau — moteur d’expression de la calculatrice
//!
//! Organisation interne :
//! - tampon.rs   : tampon d’expression + règles d’édition (chiffre, opérateur, ., +/-, %, ⌫, C, =)
//! - suffixe.rs  : nombre final du tampon (pour +/- et %)
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + évaluation RPN
//! - eval.rs     : pipeline complet (jetons -> RPN -> valeur -> rendu)
//! - format.rs   : arrondi significatif, rendu décimal, pourcentage exact
//! - erreur.rs   : erreurs d’évaluation typées
//! - moteur.rs   : propriétaire du tampon (`texte_courant` / `dispatch`)

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod rpn;
pub mod suffixe;
pub mod tampon;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use moteur::Moteur;
pub use tampon::{Issue, Operateur, Operation, Parenthese};
