//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder le moteur, l’écouteur clavier et les panneaux annexes
//! (historique, démarche). Boutons et clavier passent par le MÊME `dispatch`.
//!
//! Contrats :
//! - Aucune règle d’édition ici : tout passe par `Moteur::dispatch`.
//! - L’écouteur clavier vit exactement aussi longtemps que la vue calculatrice.

use std::collections::VecDeque;

use tracing::debug;

use super::clavier::{ecouteur_calculatrice, Document, EcouteClavier, FileOperations, ToucheClavier};
use super::config::Config;
use crate::noyau::{Issue, Moteur, Operation};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LigneHistorique {
    pub expression: String,
    pub resultat: String,
}

pub struct AppCalc {
    pub config: Config,
    moteur: Moteur,

    // --- clavier ---
    document: Document,
    file: FileOperations,
    ecoute: Option<EcouteClavier>,

    // --- panneaux ---
    pub historique: VecDeque<LigneHistorique>,
    pub demarche: Demarche,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppCalc {
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            moteur: Moteur::new(config.chiffres_significatifs),
            config,
            document: Document::default(),
            file: FileOperations::default(),
            ecoute: None,
            historique: VecDeque::new(),
            demarche: Demarche::default(),
        };
        // au lancement, la calculatrice est visible : on écoute tout de suite
        app.afficher_calculatrice(true);
        app
    }

    /* ------------------------ Moteur ------------------------ */

    pub fn texte_courant(&self) -> &str {
        self.moteur.texte_courant()
    }

    pub fn resultat_affiche(&self) -> bool {
        self.moteur.tampon().resultat_affiche()
    }

    /// Point d’entrée unique (boutons + clavier).
    pub fn dispatch(&mut self, op: Operation) {
        match self.moteur.dispatch(op) {
            Issue::Evaluee(e) => {
                self.demarche = Demarche {
                    jetons: e.demarche.jetons,
                    rpn: e.demarche.rpn,
                };
                self.noter(LigneHistorique {
                    expression: e.expression,
                    resultat: e.rendu,
                });
            }
            Issue::Echec(_) => self.demarche = Demarche::default(),
            Issue::Edition | Issue::Ignoree => {}
        }
    }

    fn noter(&mut self, ligne: LigneHistorique) {
        if self.config.historique_max == 0 {
            return;
        }
        while self.historique.len() >= self.config.historique_max {
            self.historique.pop_back();
        }
        self.historique.push_front(ligne);
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Vue + clavier ------------------------ */

    pub fn calculatrice_visible(&self) -> bool {
        self.ecoute.is_some()
    }

    /// Montrer la vue attache l’écouteur ; la cacher le détache.
    pub fn afficher_calculatrice(&mut self, visible: bool) {
        if visible == self.calculatrice_visible() {
            return;
        }
        if visible {
            let ecoute = self
                .document
                .ecouter("calculatrice", ecouteur_calculatrice(self.file.clone()));
            self.ecoute = Some(ecoute);
        } else {
            self.ecoute = None;
            self.file.borrow_mut().clear();
        }
    }

    /// Diffuse les touches reçues au niveau document, puis applique la file.
    /// Rend les touches dont l’action par défaut doit être empêchée.
    pub fn pomper_clavier(&mut self, touches: &[ToucheClavier]) -> Vec<ToucheClavier> {
        let empechees: Vec<ToucheClavier> = touches
            .iter()
            .filter(|t| self.document.emettre(t))
            .cloned()
            .collect();

        let ops: Vec<Operation> = self.file.borrow_mut().drain(..).collect();
        if !ops.is_empty() {
            debug!(n = ops.len(), "opérations clavier");
        }
        for op in ops {
            self.dispatch(op);
        }
        empechees
    }
}
