// src/app/clavier.rs
//
// Clavier — écouteur de niveau "document"
// ---------------------------------------
// - `Document` : registre des écouteurs de touches (niveau document, pas de focus).
// - `EcouteClavier` : jeton RAII ; le lâcher détache l’écouteur (pas de fuite entre vues).
// - Table des touches : noms DOM (`KeyboardEvent.key`) -> `Operation`.
//
// Un widget voisin qui garde le focus clavier (zone de texte) consomme ses touches :
// elles n’arrivent jamais ici. Ce module ne filtre rien lui-même.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use eframe::egui;
use tracing::{info, trace, warn};

use crate::noyau::{Operateur, Operation, Parenthese};

/// Touche reçue au niveau document (valeur DOM de `KeyboardEvent.key`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToucheClavier {
    pub key: String,
}

impl ToucheClavier {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Réaction d’un écouteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    Ignoree,
    Consommee { empecher_defaut: bool },
}

/* ------------------------ Table des touches ------------------------ */

/// Touche -> opération (1:1). `None` pour toute autre touche.
pub fn operation_pour_touche(key: &str) -> Option<Operation> {
    let op = match key {
        "Enter" | "=" => Operation::Evaluer,
        "Backspace" => Operation::Retour,
        "Escape" | "c" | "C" => Operation::Effacer,
        "." => Operation::Decimale,
        "(" => Operation::Parenthese(Parenthese::Ouvrante),
        ")" => Operation::Parenthese(Parenthese::Fermante),
        _ => {
            let mut it = key.chars();
            let c = it.next()?;
            if it.next().is_some() {
                return None;
            }
            if let Some(d) = c.to_digit(10) {
                Operation::Chiffre(d as u8)
            } else {
                Operation::Operateur(Operateur::depuis_symbole(c)?)
            }
        }
    };
    Some(op)
}

/// Touches dont l’action par défaut du navigateur (envoi, recherche rapide) est bloquée.
pub fn empeche_defaut(key: &str) -> bool {
    matches!(key, "Enter" | "/")
}

/* ------------------------ Registre document ------------------------ */

type Ecouteur = Rc<RefCell<dyn FnMut(&ToucheClavier) -> Reaction>>;
type Registre = RefCell<Vec<(u64, Ecouteur)>>;

/// Registre des écouteurs de touches de niveau document.
#[derive(Default)]
pub struct Document {
    ecouteurs: Rc<Registre>,
    prochain_id: Cell<u64>,
}

impl Document {
    /// Attache un écouteur ; il reste actif tant que le jeton rendu est vivant.
    #[must_use = "lâcher le jeton détache immédiatement l’écouteur"]
    pub fn ecouter(
        &self,
        nom: &'static str,
        ecouteur: impl FnMut(&ToucheClavier) -> Reaction + 'static,
    ) -> EcouteClavier {
        let id = self.prochain_id.get();
        self.prochain_id.set(id + 1);
        let ecouteur: Ecouteur = Rc::new(RefCell::new(ecouteur));
        self.ecouteurs.borrow_mut().push((id, ecouteur));
        info!(nom, id, "écouteur clavier attaché");

        EcouteClavier {
            id,
            nom,
            registre: Rc::downgrade(&self.ecouteurs),
        }
    }

    /// Diffuse une touche à tous les écouteurs vivants.
    /// Rend `true` si l’action par défaut doit être empêchée.
    ///
    /// Le registre n’est pas emprunté pendant les appels : un écouteur peut
    /// lâcher un jeton sans conflit d’emprunt.
    pub fn emettre(&self, touche: &ToucheClavier) -> bool {
        let instantane: Vec<(u64, Ecouteur)> = self.ecouteurs.borrow().clone();

        let mut empecher = false;
        for (id, ecouteur) in instantane {
            // détaché par un écouteur précédent de cette même diffusion
            if !self.ecouteurs.borrow().iter().any(|(i, _)| *i == id) {
                continue;
            }
            let Ok(mut f) = ecouteur.try_borrow_mut() else {
                warn!(id, key = %touche.key, "écouteur déjà en cours, touche ignorée");
                continue;
            };
            if let Reaction::Consommee { empecher_defaut } = (&mut *f)(touche) {
                empecher |= empecher_defaut;
            }
        }
        if empecher {
            trace!(key = %touche.key, "action par défaut empêchée");
        }
        empecher
    }

    pub(crate) fn nb_ecouteurs(&self) -> usize {
        self.ecouteurs.borrow().len()
    }
}

/// Jeton d’écoute : détache l’écouteur à la destruction.
pub struct EcouteClavier {
    id: u64,
    nom: &'static str,
    registre: Weak<Registre>,
}

impl Drop for EcouteClavier {
    fn drop(&mut self) {
        if let Some(registre) = self.registre.upgrade() {
            registre.borrow_mut().retain(|(id, _)| *id != self.id);
            info!(nom = self.nom, id = self.id, "écouteur clavier détaché");
        }
    }
}

impl std::fmt::Debug for EcouteClavier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcouteClavier")
            .field("id", &self.id)
            .field("nom", &self.nom)
            .finish()
    }
}

/// File d’opérations partagée entre l’écouteur et la vue.
pub type FileOperations = Rc<RefCell<VecDeque<Operation>>>;

/// Écouteur de la calculatrice : traduit la touche et la met en file.
pub fn ecouteur_calculatrice(file: FileOperations) -> impl FnMut(&ToucheClavier) -> Reaction {
    move |touche| match operation_pour_touche(&touche.key) {
        Some(op) => {
            file.borrow_mut().push_back(op);
            Reaction::Consommee {
                empecher_defaut: empeche_defaut(&touche.key),
            }
        }
        None => Reaction::Ignoree,
    }
}

/* ------------------------ Pont egui ------------------------ */

/// Événements egui -> touches DOM.
/// Les caractères viennent de `Text` (déjà avec Maj/clavier local) ;
/// seules Enter/Backspace/Escape viennent de `Key` (pas de doublon).
pub fn touches_depuis_egui(events: &[egui::Event]) -> Vec<ToucheClavier> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(t) => {
                out.extend(t.chars().map(|c| ToucheClavier::new(c.to_string())));
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => {
                let nom = match key {
                    egui::Key::Enter => "Enter",
                    egui::Key::Backspace => "Backspace",
                    egui::Key::Escape => "Escape",
                    _ => continue,
                };
                out.push(ToucheClavier::new(nom));
            }
            _ => {}
        }
    }
    out
}

/// Retire de la file egui les touches dont l’action par défaut est empêchée :
/// aucun widget (bouton focalisé, etc.) ne les verra plus dans cette frame.
pub fn retirer_des_evenements(events: &mut Vec<egui::Event>, empechees: &[ToucheClavier]) {
    if empechees.is_empty() {
        return;
    }
    let empeche = |nom: &str| empechees.iter().any(|t| t.key == nom);

    events.retain_mut(|ev| match ev {
        egui::Event::Text(t) => {
            t.retain(|c| !empeche(c.encode_utf8(&mut [0; 4])));
            !t.is_empty()
        }
        egui::Event::Key { key, .. } => match key {
            egui::Key::Enter => !empeche("Enter"),
            egui::Key::Slash => !empeche("/"),
            _ => true,
        },
        _ => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_des_touches() {
        assert_eq!(operation_pour_touche("7"), Some(Operation::Chiffre(7)));
        assert_eq!(
            operation_pour_touche("*"),
            Some(Operation::Operateur(Operateur::Fois))
        );
        assert_eq!(
            operation_pour_touche("/"),
            Some(Operation::Operateur(Operateur::Divise))
        );
        assert_eq!(
            operation_pour_touche("-"),
            Some(Operation::Operateur(Operateur::Moins))
        );
        assert_eq!(
            operation_pour_touche("("),
            Some(Operation::Parenthese(Parenthese::Ouvrante))
        );
        assert_eq!(operation_pour_touche("="), Some(Operation::Evaluer));
        assert_eq!(operation_pour_touche("Enter"), Some(Operation::Evaluer));
        assert_eq!(operation_pour_touche("Backspace"), Some(Operation::Retour));
        assert_eq!(operation_pour_touche("C"), Some(Operation::Effacer));
        assert_eq!(operation_pour_touche("Escape"), Some(Operation::Effacer));
        assert_eq!(operation_pour_touche("a"), None);
        assert_eq!(operation_pour_touche("F5"), None);
        assert_eq!(operation_pour_touche(""), None);
    }

    #[test]
    fn defaut_empeche() {
        assert!(empeche_defaut("Enter"));
        assert!(empeche_defaut("/"));
        assert!(!empeche_defaut("5"));
    }

    #[test]
    fn ecoute_liee_au_jeton() {
        let doc = Document::default();
        let file = FileOperations::default();

        let jeton = doc.ecouter("calculatrice", ecouteur_calculatrice(file.clone()));
        assert_eq!(doc.nb_ecouteurs(), 1);

        assert!(!doc.emettre(&ToucheClavier::new("4")));
        assert!(doc.emettre(&ToucheClavier::new("Enter")));
        assert!(!doc.emettre(&ToucheClavier::new("x")));
        assert_eq!(
            file.borrow().iter().copied().collect::<Vec<_>>(),
            vec![Operation::Chiffre(4), Operation::Evaluer]
        );

        drop(jeton);
        assert_eq!(doc.nb_ecouteurs(), 0);
        doc.emettre(&ToucheClavier::new("9"));
        assert_eq!(file.borrow().len(), 2);
    }

    #[test]
    fn ecouteur_qui_lache_un_jeton() {
        let doc = Document::default();
        let jeton_b: Rc<RefCell<Option<EcouteClavier>>> = Rc::default();
        let vus = Rc::new(Cell::new(0));

        let cible = jeton_b.clone();
        let _a = doc.ecouter("a", move |_| {
            // lâche B (et donc l’emprunt du registre) pendant la diffusion
            cible.borrow_mut().take();
            Reaction::Ignoree
        });
        let compteur = vus.clone();
        *jeton_b.borrow_mut() = Some(doc.ecouter("b", move |_| {
            compteur.set(compteur.get() + 1);
            Reaction::Ignoree
        }));

        doc.emettre(&ToucheClavier::new("1"));
        assert_eq!(doc.nb_ecouteurs(), 1);
        assert_eq!(vus.get(), 0);
    }

    #[test]
    fn retrait_des_touches_empechees() {
        let enter = |pressed| egui::Event::Key {
            key: egui::Key::Enter,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        let mut events = vec![
            egui::Event::Text("8/2".to_string()),
            egui::Event::Text("/".to_string()),
            enter(true),
            enter(false),
            egui::Event::Key {
                key: egui::Key::Backspace,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
        ];

        retirer_des_evenements(
            &mut events,
            &[ToucheClavier::new("/"), ToucheClavier::new("Enter")],
        );

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], egui::Event::Text("82".to_string()));
        assert!(matches!(
            events[1],
            egui::Event::Key {
                key: egui::Key::Backspace,
                ..
            }
        ));
    }

    #[test]
    fn jeton_survit_au_document() {
        let jeton = {
            let doc = Document::default();
            doc.ecouter("calculatrice", |_| Reaction::Ignoree)
        };
        // le registre n’existe plus : le drop ne fait rien
        drop(jeton);
    }

    #[test]
    fn pont_egui() {
        let events = vec![
            egui::Event::Text("1+".to_string()),
            egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
            egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: false,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
            egui::Event::Key {
                key: egui::Key::Num5,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
        ];
        let touches: Vec<String> = touches_depuis_egui(&events)
            .into_iter()
            .map(|t| t.key)
            .collect();
        assert_eq!(touches, vec!["1", "+", "Enter"]);
    }
}
