// src/noyau/erreur.rs
//
// Erreurs d’évaluation typées.
// Aucune n’est fatale : le moteur les absorbe toutes dans le tampon "Error".

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurEval {
    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("expression vide")]
    ExpressionVide,

    #[error("opérande manquant")]
    OperandeManquant,

    #[error("opérateur manquant")]
    OperateurManquant,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseNonOuverte,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    ResultatNonFini,
}
