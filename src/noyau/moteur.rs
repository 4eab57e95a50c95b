// src/noyau/moteur.rs
//
// Moteur : propriétaire unique du tampon.
// Un seul écrivain (le répartiteur d’entrées), aucune suspension :
// chaque `dispatch` lit le tampon courant et le remplace par le suivant.

use tracing::debug;

use super::format::{CHIFFRES_MAX, CHIFFRES_MIN};
use super::tampon::{Issue, Operation, Tampon};

/// Précision d’affichage par défaut (chiffres significatifs).
pub const CHIFFRES_DEFAUT: usize = 15;

#[derive(Clone, Debug)]
pub struct Moteur {
    tampon: Tampon,
    chiffres: usize,
}

impl Default for Moteur {
    fn default() -> Self {
        Self::new(CHIFFRES_DEFAUT)
    }
}

impl Moteur {
    pub fn new(chiffres: usize) -> Self {
        Self {
            tampon: Tampon::default(),
            chiffres: chiffres.clamp(CHIFFRES_MIN, CHIFFRES_MAX),
        }
    }

    /// Texte à afficher.
    pub fn texte_courant(&self) -> &str {
        self.tampon.texte()
    }

    pub fn tampon(&self) -> &Tampon {
        &self.tampon
    }

    pub fn chiffres(&self) -> usize {
        self.chiffres
    }

    /// Seul mutateur.
    pub fn dispatch(&mut self, op: Operation) -> Issue {
        let (suivant, issue) = self.tampon.appliquer(op, self.chiffres);

        match &issue {
            Issue::Echec(err) => {
                debug!(?op, expression = self.tampon.texte(), %err, "évaluation échouée");
            }
            Issue::Evaluee(e) => {
                debug!(?op, expression = %e.expression, resultat = %e.rendu, "évaluation");
            }
            Issue::Ignoree => debug!(?op, texte = self.tampon.texte(), "touche ignorée"),
            Issue::Edition => debug!(?op, avant = self.tampon.texte(), apres = suivant.texte()),
        }

        self.tampon = suivant;
        issue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErreurEval;
    use crate::noyau::tampon::{Operateur, ERREUR};

    #[test]
    fn saisie_complete() {
        let mut m = Moteur::default();
        for op in [
            Operation::Chiffre(1),
            Operation::Chiffre(2),
            Operation::Operateur(Operateur::Plus),
            Operation::Chiffre(3),
        ] {
            assert_eq!(m.dispatch(op), Issue::Edition);
        }
        assert_eq!(m.texte_courant(), "12+3");

        assert!(matches!(m.dispatch(Operation::Evaluer), Issue::Evaluee(_)));
        assert_eq!(m.texte_courant(), "15");
        assert!(m.tampon().resultat_affiche());
    }

    #[test]
    fn evaluer_deux_fois() {
        let mut m = Moteur::default();
        m.dispatch(Operation::Chiffre(9));
        m.dispatch(Operation::Operateur(Operateur::Divise));
        m.dispatch(Operation::Chiffre(4));
        m.dispatch(Operation::Evaluer);
        let apres_un = m.tampon().clone();

        assert_eq!(m.dispatch(Operation::Evaluer), Issue::Ignoree);
        assert_eq!(m.tampon(), &apres_un);
        assert_eq!(m.texte_courant(), "2.25");
    }

    #[test]
    fn erreur_puis_effacer() {
        let mut m = Moteur::default();
        m.dispatch(Operation::Chiffre(1));
        m.dispatch(Operation::Operateur(Operateur::Divise));
        m.dispatch(Operation::Chiffre(0));
        assert!(matches!(m.dispatch(Operation::Evaluer), Issue::Echec(_)));
        assert_eq!(m.texte_courant(), ERREUR);

        m.dispatch(Operation::Effacer);
        assert_eq!(m.tampon(), &Tampon::default());
    }

    #[test]
    fn resultat_geant_en_erreur() {
        let mut m = Moteur::default();
        for c in format!("{}", f64::MAX).chars() {
            m.dispatch(Operation::Chiffre(c as u8 - b'0'));
        }
        assert!(matches!(
            m.dispatch(Operation::Evaluer),
            Issue::Echec(ErreurEval::ResultatNonFini)
        ));
        assert_eq!(m.texte_courant(), ERREUR);
    }

    #[test]
    fn precision_bornee() {
        assert_eq!(Moteur::new(0).chiffres(), 1);
        assert_eq!(Moteur::new(99).chiffres(), 17);

        let mut m = Moteur::new(3);
        for op in [
            Operation::Chiffre(2),
            Operation::Operateur(Operateur::Divise),
            Operation::Chiffre(3),
            Operation::Evaluer,
        ] {
            m.dispatch(op);
        }
        assert_eq!(m.texte_courant(), "0.667");
    }
}
